#![forbid(unsafe_code)]

//! The concrete CSS box applied to the panel's root container.

use chatdock_core::CssLength;
use serde::Serialize;

/// Themed transition set used whenever the panel is not being resized.
pub const THEMED_TRANSITION: &str = "transform 400ms cubic-bezier(0.16, 1, 0.3, 1), \
     opacity 200ms ease-out, width 200ms ease-out, height 200ms ease-out";
/// Scale used while the panel is open.
pub const TRANSFORM_OPEN: &str = "scale3d(1, 1, 1)";
/// Scale used while the panel is collapsed into the button.
pub const TRANSFORM_CLOSED: &str = "scale3d(0, 0, 1)";
pub const BOX_SHADOW: &str = "0 12px 40px rgba(0, 0, 0, 0.12)";
pub const PANEL_Z_INDEX: u32 = 42_424_242;
const THEMED_RADIUS: &str = "var(--chatbot-border-radius)";

/// Corner rounding for the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderRadius {
    /// Theme radius on every corner (floating panel).
    Themed,
    /// Square corners (docked split view).
    Square,
    /// Rounded on the left edge only (docked fixed-width canvas on desktop).
    LeadingEdge,
}

impl BorderRadius {
    #[must_use]
    pub fn css(self) -> String {
        match self {
            Self::Themed => THEMED_RADIUS.to_owned(),
            Self::Square => "0".to_owned(),
            Self::LeadingEdge => format!("{THEMED_RADIUS} 0 0 {THEMED_RADIUS}"),
        }
    }
}

/// Transition mode for the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionMode {
    /// All transitions suppressed so the panel tracks the pointer exactly.
    Suppressed,
    Themed,
}

impl TransitionMode {
    #[must_use]
    pub const fn css(self) -> &'static str {
        match self {
            Self::Suppressed => "none",
            Self::Themed => THEMED_TRANSITION,
        }
    }
}

/// Resolved panel geometry and presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelBox {
    pub width: CssLength,
    pub height: CssLength,
    pub top: Option<CssLength>,
    pub right: CssLength,
    pub bottom: CssLength,
    pub border_radius: BorderRadius,
    pub transition: TransitionMode,
    pub visible: bool,
    pub background_color: String,
    pub background_image: Option<String>,
}

impl PanelBox {
    #[must_use]
    pub const fn transform(&self) -> &'static str {
        if self.visible {
            TRANSFORM_OPEN
        } else {
            TRANSFORM_CLOSED
        }
    }

    /// Render the box as ordered `(property, value)` declarations.
    ///
    /// Properties that do not apply are emitted with an empty value so that
    /// applying the list to an element also clears stale values.
    #[must_use]
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        let background_image = self
            .background_image
            .as_ref()
            .map_or_else(|| "none".to_owned(), |url| format!("url({url})"));
        vec![
            ("position", "fixed".to_owned()),
            ("width", self.width.to_string()),
            ("height", self.height.to_string()),
            ("transition", self.transition.css().to_owned()),
            ("transform-origin", "bottom right".to_owned()),
            ("transform", self.transform().to_owned()),
            ("opacity", if self.visible { "1" } else { "0" }.to_owned()),
            (
                "pointer-events",
                if self.visible { "" } else { "none" }.to_owned(),
            ),
            ("box-shadow", BOX_SHADOW.to_owned()),
            ("background-color", self.background_color.clone()),
            ("background-image", background_image),
            ("background-size", "cover".to_owned()),
            ("background-position", "center".to_owned()),
            ("background-repeat", "no-repeat".to_owned()),
            ("z-index", PANEL_Z_INDEX.to_string()),
            (
                "top",
                self.top.as_ref().map(ToString::to_string).unwrap_or_default(),
            ),
            ("right", self.right.to_string()),
            ("bottom", self.bottom.to_string()),
            ("border-radius", self.border_radius.css()),
        ]
    }

    /// Render the declarations as an inline `style` attribute value.
    #[must_use]
    pub fn to_style_attribute(&self) -> String {
        self.declarations()
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(prop, value)| format!("{prop}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
