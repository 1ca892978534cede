#![forbid(unsafe_code)]

//! Pixel-space geometry primitives.
//!
//! All values are CSS pixels stored as `f64`, matching what the browser
//! reports for pointer coordinates and element offsets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hard floor for the panel width.
pub const MIN_PANEL_WIDTH: f64 = 300.0;
/// Hard floor for the panel height.
pub const MIN_PANEL_HEIGHT: f64 = 400.0;
/// Panel width used when the host does not configure one.
pub const DEFAULT_PANEL_WIDTH: f64 = 400.0;
/// Panel height used when the host does not configure one.
pub const DEFAULT_PANEL_HEIGHT: f64 = 704.0;
/// Default toggle-button offset from the bottom and right viewport edges.
pub const DEFAULT_ANCHOR_OFFSET: f64 = 20.0;

/// Clamp one axis to `floor`. Non-finite input collapses to the floor.
#[inline]
#[must_use]
pub fn floor_axis(value: f64, floor: f64) -> f64 {
    if value.is_finite() {
        value.max(floor)
    } else {
        floor
    }
}

/// Logical panel dimensions.
///
/// # Invariants
///
/// Every value produced by [`PanelSize::clamped`] satisfies
/// `width >= MIN_PANEL_WIDTH` and `height >= MIN_PANEL_HEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelSize {
    pub width: f64,
    pub height: f64,
}

impl PanelSize {
    /// The smallest size the panel may take.
    pub const MIN: Self = Self::new(MIN_PANEL_WIDTH, MIN_PANEL_HEIGHT);

    /// Size used when nothing is configured.
    pub const DEFAULT: Self = Self::new(DEFAULT_PANEL_WIDTH, DEFAULT_PANEL_HEIGHT);

    /// Create a size without clamping.
    #[inline]
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Clamp both axes to the hard floor.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            width: floor_axis(self.width, MIN_PANEL_WIDTH),
            height: floor_axis(self.height, MIN_PANEL_HEIGHT),
        }
    }

    /// Whether this size already respects the floor.
    #[must_use]
    pub fn is_within_floor(&self) -> bool {
        self.width >= MIN_PANEL_WIDTH && self.height >= MIN_PANEL_HEIGHT
    }
}

impl Default for PanelSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Toggle-button offsets from the bottom-right corner of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub bottom: f64,
    pub right: f64,
}

impl Anchor {
    #[inline]
    #[must_use]
    pub const fn new(bottom: f64, right: f64) -> Self {
        Self { bottom, right }
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Self::new(DEFAULT_ANCHOR_OFFSET, DEFAULT_ANCHOR_OFFSET)
    }
}

/// Pointer location in client (viewport) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Displacement of `self` measured against `origin`, inverted so that
    /// moving left or up yields a positive delta.
    ///
    /// The panel is anchored at the bottom-right, so dragging its top-left
    /// handles towards the origin of the viewport grows it.
    #[inline]
    #[must_use]
    pub fn growth_from(self, origin: PointerPosition) -> (f64, f64) {
        (origin.x - self.x, origin.y - self.y)
    }
}

/// Host window inner dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[inline]
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// A CSS length value.
///
/// Hosts may configure lengths either as bare numbers (pixels) or as CSS
/// length strings. Strings of the form `<n>px`, `<n>vw` and `<n>vh` are
/// normalised; anything else is kept verbatim in [`CssLength::Raw`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawLength")]
pub enum CssLength {
    Px(f64),
    Vw(f64),
    Vh(f64),
    Raw(String),
}

impl CssLength {
    /// Full viewport width.
    pub const FULL_WIDTH: Self = Self::Vw(100.0);
    /// Full viewport height.
    pub const FULL_HEIGHT: Self = Self::Vh(100.0);
    /// Zero offset.
    pub const ZERO: Self = Self::Px(0.0);

    /// Parse a CSS length string.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        let numeric = |suffix: &str| {
            trimmed
                .strip_suffix(suffix)
                .and_then(|n| n.trim().parse::<f64>().ok())
                .filter(|n| n.is_finite())
        };
        if let Some(px) = numeric("px") {
            Self::Px(px)
        } else if let Some(vw) = numeric("vw") {
            Self::Vw(vw)
        } else if let Some(vh) = numeric("vh") {
            Self::Vh(vh)
        } else if let Some(px) = trimmed.parse::<f64>().ok().filter(|n| n.is_finite()) {
            Self::Px(px)
        } else {
            Self::Raw(trimmed.to_owned())
        }
    }

    /// Pixel value, if this length is expressed in pixels.
    #[must_use]
    pub const fn as_px(&self) -> Option<f64> {
        match self {
            Self::Px(px) => Some(*px),
            _ => None,
        }
    }

    /// Raise this length to at least `floor` pixels.
    ///
    /// Pixel values are clamped directly. A zero, negative or non-finite
    /// magnitude in any other unit collapses to `Px(floor)`. Positive
    /// relative lengths and math functions become `max(<floor>px, <len>)`
    /// so the browser enforces the floor. Bare keywords are kept verbatim.
    #[must_use]
    pub fn at_least(self, floor: f64) -> Self {
        let magnitude = match &self {
            Self::Px(px) => return Self::Px(floor_axis(*px, floor)),
            Self::Vw(v) | Self::Vh(v) => Some(*v),
            Self::Raw(raw) => leading_number(raw),
        };
        match magnitude {
            Some(n) if !(n.is_finite() && n > 0.0) => Self::Px(floor),
            Some(_) => Self::Raw(format!("max({floor}px, {self})")),
            None if matches!(&self, Self::Raw(raw) if raw.contains('(')) => {
                Self::Raw(format!("max({floor}px, {self})"))
            }
            None => self,
        }
    }
}

/// Numeric prefix of a CSS dimension such as `35rem` or `-2em`.
fn leading_number(text: &str) -> Option<f64> {
    let end = text
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+')))
        .unwrap_or(text.len());
    text[..end].parse().ok()
}

impl fmt::Display for CssLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Vw(v) => write!(f, "{v}vw"),
            Self::Vh(v) => write!(f, "{v}vh"),
            Self::Raw(s) => f.write_str(s),
        }
    }
}

impl Serialize for CssLength {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLength {
    Number(f64),
    Text(String),
}

impl From<RawLength> for CssLength {
    fn from(raw: RawLength) -> Self {
        match raw {
            RawLength::Number(px) => Self::Px(px),
            RawLength::Text(text) => Self::parse(&text),
        }
    }
}
