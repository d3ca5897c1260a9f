//! Word styles and color tags

use serde::{Deserialize, Serialize};

/// Closed set of word styles. Anything unrecognized on the wire is `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum WordStyle {
    #[default]
    Normal,
    Impact,
    Glitch,
    InvertV,
    InvertH,
    InvertC,
    Conjunction,
    Hesitation,
    SilenceDots,
    SilenceMa,
    SilenceHeavy,
    SilenceAbyss,
}

impl WordStyle {
    /// Wire tag
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Impact => "impact",
            Self::Glitch => "glitch",
            Self::InvertV => "invert_v",
            Self::InvertH => "invert_h",
            Self::InvertC => "invert_c",
            Self::Conjunction => "conjunction",
            Self::Hesitation => "hesitation",
            Self::SilenceDots => "silence_dots",
            Self::SilenceMa => "silence_ma",
            Self::SilenceHeavy => "silence_heavy",
            Self::SilenceAbyss => "silence_abyss",
        }
    }

    /// Parse a wire tag, falling back to `Normal`
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "impact" => Self::Impact,
            "glitch" => Self::Glitch,
            "invert_v" => Self::InvertV,
            "invert_h" => Self::InvertH,
            "invert_c" => Self::InvertC,
            "conjunction" => Self::Conjunction,
            "hesitation" => Self::Hesitation,
            "silence_dots" => Self::SilenceDots,
            "silence_ma" => Self::SilenceMa,
            "silence_heavy" => Self::SilenceHeavy,
            "silence_abyss" => Self::SilenceAbyss,
            _ => Self::Normal,
        }
    }

    pub fn is_silence(&self) -> bool {
        matches!(
            self,
            Self::SilenceDots | Self::SilenceMa | Self::SilenceHeavy | Self::SilenceAbyss
        )
    }
}

impl From<String> for WordStyle {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl std::fmt::Display for WordStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Symbolic color carried by spawn configs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColorTag {
    #[default]
    White,
    Red,
    Cyan,
    Yellow,
    Grey,
    GreyAlpha,
    BlueWhite,
    DarkGrey,
    Black,
}

impl ColorTag {
    /// Concrete color for this tag
    pub fn rgba(&self) -> Rgba {
        match self {
            ColorTag::White => Rgba::new(240, 240, 240, 255),
            ColorTag::Red => Rgba::new(198, 40, 40, 255),
            ColorTag::Cyan => Rgba::new(0, 229, 255, 255),
            ColorTag::Yellow => Rgba::new(253, 216, 53, 255),
            ColorTag::Grey => Rgba::new(150, 150, 150, 255),
            ColorTag::GreyAlpha => Rgba::new(180, 180, 180, 120),
            ColorTag::BlueWhite => Rgba::new(210, 230, 255, 255),
            ColorTag::DarkGrey => Rgba::new(70, 70, 70, 255),
            ColorTag::Black => Rgba::new(10, 10, 10, 255),
        }
    }
}

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}
