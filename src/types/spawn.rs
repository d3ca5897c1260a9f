//! Word spawn configuration

use serde::{Deserialize, Serialize};
use crate::types::{ColorTag, WordStyle};

/// Fully resolved description of one word to throw into the barrage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordSpawnConfig {
    pub text: String,
    #[serde(default)]
    pub style: WordStyle,
    /// Explicit scale; `None` lets the voice level decide
    #[serde(default)]
    pub scale: Option<f64>,
    /// Mirror sign (1 or -1)
    #[serde(default = "one")]
    pub scale_x: f64,
    #[serde(default)]
    pub rotation: f64,
    /// Explicit color; `None` keeps the style's base color
    #[serde(default)]
    pub color: Option<ColorTag>,
    /// Absolute vertical velocity
    #[serde(default)]
    pub vy: Option<f64>,
    /// Applied after `vy`
    #[serde(default = "one")]
    pub vy_mult: f64,
    #[serde(default)]
    pub flash: bool,
    #[serde(default)]
    pub shake: f64,
}

fn one() -> f64 {
    1.0
}

impl WordSpawnConfig {
    /// Plain white word with no overrides
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: WordStyle::Normal,
            scale: None,
            scale_x: 1.0,
            rotation: 0.0,
            color: None,
            vy: None,
            vy_mult: 1.0,
            flash: false,
            shake: 0.0,
        }
    }

    pub fn with_style(mut self, style: WordStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_color(mut self, color: ColorTag) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_vy(mut self, vy: f64) -> Self {
        self.vy = Some(vy);
        self
    }
}
