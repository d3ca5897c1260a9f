//! Conversational state definitions

use serde::{Deserialize, Serialize};
use crate::{TENSION_THRESHOLD_ALIGNED, TENSION_THRESHOLD_SPLIT};

/// The three bands a conversation's tension falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConversationalState {
    /// Calm or not enough talk yet
    #[default]
    Unknown,
    /// Conversation is flowing
    Aligned,
    /// Conversation is in conflict
    Split,
}

impl ConversationalState {
    /// Classify a tension value. Band edges are exclusive on the low side.
    pub fn from_tension(tension: f64) -> Self {
        if tension > TENSION_THRESHOLD_SPLIT {
            ConversationalState::Split
        } else if tension > TENSION_THRESHOLD_ALIGNED {
            ConversationalState::Aligned
        } else {
            ConversationalState::Unknown
        }
    }

    pub fn is_split(&self) -> bool {
        *self == ConversationalState::Split
    }

    /// Get emoji for state
    pub fn emoji(&self) -> &'static str {
        match self {
            ConversationalState::Unknown => "…",
            ConversationalState::Aligned => "〜",
            ConversationalState::Split => "⚡",
        }
    }
}

impl std::fmt::Display for ConversationalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConversationalState::Unknown => "UNKNOWN",
            ConversationalState::Aligned => "ALIGNED",
            ConversationalState::Split => "SPLIT",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for ConversationalState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UNKNOWN" => Ok(ConversationalState::Unknown),
            "ALIGNED" => Ok(ConversationalState::Aligned),
            "SPLIT" => Ok(ConversationalState::Split),
            other => Err(format!("unknown state: {}", other)),
        }
    }
}
