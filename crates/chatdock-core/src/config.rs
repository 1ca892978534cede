#![forbid(unsafe_code)]

//! Host-supplied widget configuration.
//!
//! The host embeds the widget with a JSON theme object. Only the fields the
//! geometry engine and its collaborators consume are modelled here; anything
//! else (conversation-engine settings, API host, ...) is ignored.
//!
//! Numeric fields must be finite. Sizes that are finite but too small are
//! *clamped* later, never rejected here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{
    Anchor, CssLength, DEFAULT_ANCHOR_OFFSET, DEFAULT_PANEL_HEIGHT, DEFAULT_PANEL_WIDTH,
    MIN_PANEL_WIDTH, PanelSize, floor_axis,
};

/// Default breakpoint at or below which the viewport counts as mobile.
pub const DEFAULT_MOBILE_BREAKPOINT: f64 = 768.0;
/// Fixed gap between the toggle button and the panel.
pub const PANEL_GAP: f64 = 10.0;
/// Width assumed when clamping the panel's right offset without a configured width.
pub const RIGHT_CLAMP_FALLBACK_WIDTH: f64 = 410.0;
/// Default toggle-button background.
pub const DEFAULT_BUTTON_COLOR: &str = "#3B81F6";
/// Default toggle-button icon color.
pub const DEFAULT_ICON_COLOR: &str = "white";
/// Default panel background.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse widget config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid widget config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Toggle-button size preset.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "RawButtonSize")]
pub enum ButtonSize {
    Small,
    Medium,
    Large,
    Pixels(f64),
}

impl ButtonSize {
    /// Rendered edge length of the button in pixels.
    #[must_use]
    pub const fn px(self) -> f64 {
        match self {
            Self::Small => 32.0,
            Self::Medium => 48.0,
            Self::Large => 64.0,
            Self::Pixels(px) => px,
        }
    }
}

impl Default for ButtonSize {
    fn default() -> Self {
        Self::Medium
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawButtonSize {
    Number(f64),
    Named(String),
}

impl From<RawButtonSize> for ButtonSize {
    fn from(raw: RawButtonSize) -> Self {
        match raw {
            RawButtonSize::Number(px) => Self::Pixels(px),
            RawButtonSize::Named(name) => match name.as_str() {
                "small" => Self::Small,
                "large" => Self::Large,
                _ => Self::Medium,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutoWindowOpen {
    pub auto_open: bool,
    /// Delay in seconds before the panel opens on its own.
    pub open_delay: Option<f64>,
    pub auto_open_on_mobile: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonConfig {
    pub size: Option<ButtonSize>,
    pub bottom: Option<f64>,
    pub right: Option<f64>,
    pub background_color: Option<String>,
    pub icon_color: Option<String>,
    pub drag_and_drop: bool,
    pub auto_window_open: AutoWindowOpen,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatWindowConfig {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub background_color: Option<String>,
    pub background_image: Option<String>,
    /// Split-view width that replaces the user-resizable width on desktop.
    pub fixed_canvas_width: Option<CssLength>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TooltipConfig {
    pub show_tooltip: bool,
    pub tooltip_message: Option<String>,
    pub tooltip_background_color: Option<String>,
    pub tooltip_text_color: Option<String>,
    pub tooltip_font_size: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeConfig {
    pub button: ButtonConfig,
    pub chat_window: ChatWindowConfig,
    pub tooltip: TooltipConfig,
    #[serde(rename = "customCSS")]
    pub custom_css: Option<String>,
}

/// Immutable per-instance widget configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetConfig {
    pub theme: ThemeConfig,
    pub mobile_breakpoint: Option<f64>,
}

impl WidgetConfig {
    /// Parse and validate a host JSON configuration object.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject non-finite numeric fields.
    pub fn validate(&self) -> Result<()> {
        let button = &self.theme.button;
        let window = &self.theme.chat_window;
        let checks: [(&'static str, Option<f64>); 8] = [
            ("theme.button.size", button.size.map(ButtonSize::px)),
            ("theme.button.bottom", button.bottom),
            ("theme.button.right", button.right),
            (
                "theme.button.autoWindowOpen.openDelay",
                button.auto_window_open.open_delay,
            ),
            ("theme.chatWindow.width", window.width),
            ("theme.chatWindow.height", window.height),
            (
                "theme.chatWindow.fixedCanvasWidth",
                window.fixed_canvas_width.as_ref().and_then(CssLength::as_px),
            ),
            ("mobileBreakpoint", self.mobile_breakpoint),
        ];
        for (field, value) in checks {
            if let Some(v) = value.filter(|v| !v.is_finite()) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("expected a finite number, got {v}"),
                });
            }
        }
        if matches!(&window.fixed_canvas_width, Some(CssLength::Raw(raw)) if raw.is_empty()) {
            return Err(ConfigError::Invalid {
                field: "theme.chatWindow.fixedCanvasWidth",
                reason: "empty CSS length".into(),
            });
        }
        Ok(())
    }

    /// Rendered toggle-button size in pixels.
    #[must_use]
    pub fn button_size(&self) -> f64 {
        self.theme.button.size.unwrap_or_default().px()
    }

    /// Initial toggle-button anchor.
    #[must_use]
    pub fn default_anchor(&self) -> Anchor {
        Anchor::new(
            self.theme.button.bottom.unwrap_or(DEFAULT_ANCHOR_OFFSET),
            self.theme.button.right.unwrap_or(DEFAULT_ANCHOR_OFFSET),
        )
    }

    /// Initial panel size, clamped to the floor.
    #[must_use]
    pub fn default_panel_size(&self) -> PanelSize {
        PanelSize::new(
            self.theme.chat_window.width.unwrap_or(DEFAULT_PANEL_WIDTH),
            self.theme.chat_window.height.unwrap_or(DEFAULT_PANEL_HEIGHT),
        )
        .clamped()
    }

    /// Width used to keep the panel's right offset inside the viewport.
    #[must_use]
    pub fn right_clamp_width(&self) -> f64 {
        self.theme
            .chat_window
            .width
            .unwrap_or(RIGHT_CLAMP_FALLBACK_WIDTH)
    }

    /// Lowest bottom offset at which the panel clears the configured button.
    ///
    /// Derived from the configured button position, not the live anchor.
    #[must_use]
    pub fn chat_window_bottom(&self) -> f64 {
        self.theme.button.bottom.unwrap_or(DEFAULT_ANCHOR_OFFSET) + self.button_size() + PANEL_GAP
    }

    /// Fixed split-view canvas width, raised to the width floor in any unit.
    #[must_use]
    pub fn fixed_canvas_width(&self) -> Option<CssLength> {
        self.theme
            .chat_window
            .fixed_canvas_width
            .clone()
            .map(|w| w.at_least(MIN_PANEL_WIDTH))
    }

    /// Whether split view uses a fixed canvas width instead of the panel width.
    #[must_use]
    pub fn has_fixed_canvas(&self) -> bool {
        self.theme.chat_window.fixed_canvas_width.is_some()
    }

    /// Mobile breakpoint in pixels.
    #[must_use]
    pub fn mobile_breakpoint(&self) -> f64 {
        self.mobile_breakpoint
            .map_or(DEFAULT_MOBILE_BREAKPOINT, |bp| floor_axis(bp, 0.0))
    }

    /// Panel background color.
    #[must_use]
    pub fn background_color(&self) -> &str {
        self.theme
            .chat_window
            .background_color
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_BACKGROUND_COLOR)
    }

    /// Custom CSS text injected alongside the widget stylesheet.
    #[must_use]
    pub fn custom_css(&self) -> Option<&str> {
        self.theme.custom_css.as_deref().filter(|css| !css.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::MIN_PANEL_HEIGHT;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_uses_defaults() {
        let config = WidgetConfig::from_json("{}").unwrap();
        assert_eq!(config.button_size(), 48.0);
        assert_eq!(config.default_anchor(), Anchor::new(20.0, 20.0));
        assert_eq!(config.default_panel_size(), PanelSize::new(400.0, 704.0));
        assert_eq!(config.right_clamp_width(), 410.0);
        assert_eq!(config.chat_window_bottom(), 78.0);
        assert_eq!(config.mobile_breakpoint(), 768.0);
        assert_eq!(config.background_color(), "#ffffff");
        assert!(!config.has_fixed_canvas());
        assert_eq!(config.custom_css(), None);
    }

    #[test]
    fn parses_camel_case_theme() {
        let json = r##"{
            "chatflowid": "abc",
            "apiHost": "http://localhost:3000",
            "theme": {
                "button": {
                    "size": "large",
                    "bottom": 30,
                    "right": 40,
                    "dragAndDrop": true,
                    "autoWindowOpen": { "autoOpen": true, "openDelay": 2, "autoOpenOnMobile": false }
                },
                "chatWindow": { "width": 450, "height": 600, "fixedCanvasWidth": "520px" },
                "tooltip": { "showTooltip": true, "tooltipMessage": "Hi" },
                "customCSS": ".x { color: red; }"
            }
        }"##;
        let config = WidgetConfig::from_json(json).unwrap();
        assert_eq!(config.button_size(), 64.0);
        assert_eq!(config.default_anchor(), Anchor::new(30.0, 40.0));
        assert_eq!(config.default_panel_size(), PanelSize::new(450.0, 600.0));
        assert_eq!(config.chat_window_bottom(), 30.0 + 64.0 + 10.0);
        assert_eq!(config.fixed_canvas_width(), Some(CssLength::Px(520.0)));
        assert!(config.theme.button.drag_and_drop);
        assert_eq!(config.theme.button.auto_window_open.open_delay, Some(2.0));
        assert!(config.theme.tooltip.show_tooltip);
        assert_eq!(config.custom_css(), Some(".x { color: red; }"));
    }

    #[test]
    fn button_size_presets() {
        for (raw, px) in [("\"small\"", 32.0), ("\"medium\"", 48.0), ("\"huge\"", 48.0), ("56", 56.0)] {
            let size: ButtonSize = serde_json::from_str(raw).unwrap();
            assert_eq!(size.px(), px, "preset {raw}");
        }
    }

    #[test]
    fn tiny_sizes_are_clamped_not_rejected() {
        let config =
            WidgetConfig::from_json(r#"{"theme":{"chatWindow":{"width":0,"height":-5,"fixedCanvasWidth":0}}}"#)
                .unwrap();
        assert_eq!(config.default_panel_size(), PanelSize::MIN);
        assert_eq!(config.fixed_canvas_width(), Some(CssLength::Px(300.0)));
        assert_eq!(PanelSize::MIN.height, MIN_PANEL_HEIGHT);
    }

    #[test]
    fn zero_canvas_width_is_floored_in_any_unit() {
        for raw in ["0vw", "0rem", "-5vh", "0px"] {
            let config = WidgetConfig::from_json(&format!(
                r#"{{"theme":{{"chatWindow":{{"fixedCanvasWidth":"{raw}"}}}}}}"#
            ))
            .unwrap();
            assert_eq!(config.fixed_canvas_width(), Some(CssLength::Px(300.0)), "{raw}");
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = WidgetConfig::from_json("{ theme: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn empty_canvas_string_is_invalid() {
        let err = WidgetConfig::from_json(r#"{"theme":{"chatWindow":{"fixedCanvasWidth":"  "}}}"#)
            .unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => {
                assert_eq!(field, "theme.chatWindow.fixedCanvasWidth");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_finite_values_are_invalid() {
        let mut config = WidgetConfig::default();
        config.theme.button.bottom = Some(f64::NAN);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("theme.button.bottom"));
    }
}
