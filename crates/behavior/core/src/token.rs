use std::fmt;

/// Unique identifier for a movable token, as assigned by the host engine.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenId(String);

impl TokenId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TokenId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Scene-space point, in the host engine's canvas units.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Live visual representation of a token on the scene canvas.
///
/// Tokens always have a persistent document, but the visual only exists once
/// the token is loaded into the active scene. A missing visual means the
/// countdown must not start.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenVisual {
    /// Center of the token on the canvas; floating text anchors here.
    pub center: Point,
    /// Rendered height of the token in canvas units.
    pub height: f64,
}

impl TokenVisual {
    pub fn new(center: Point, height: f64) -> Self {
        Self { center, height }
    }
}
