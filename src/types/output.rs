//! Records emitted towards the renderer

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::{ConversationalState, ParticleView};
use crate::SPLIT_DEGREE_SCALE;

/// Periodic state record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateRecord {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Current band
    pub state: ConversationalState,
    /// Current tension (never negative)
    pub tension: f64,
    /// Tension mapped onto [0, 1]
    pub split_degree: f64,
}

impl StateRecord {
    pub fn new(state: ConversationalState, tension: f64) -> Self {
        Self {
            timestamp: Utc::now(),
            state,
            tension,
            split_degree: split_degree(tension),
        }
    }

    /// Format for terminal display (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "state={} | tension={:.2} | split={:.2}",
            self.state, self.tension, self.split_degree
        )
    }
}

/// Map tension onto [0, 1]
pub fn split_degree(tension: f64) -> f64 {
    (tension / SPLIT_DEGREE_SCALE).clamp(0.0, 1.0)
}

/// A word flashed across the whole screen for `ttl` ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashRecord {
    pub word: String,
    pub ttl: u32,
}

/// Events pushed to renderers over the socket
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outbound {
    State(StateRecord),
    Flash(FlashRecord),
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub tick: u64,
    pub state: ConversationalState,
    /// Background color currently displayed (RGB)
    pub background: [u8; 3],
    /// Alert strobe phase while SPLIT
    pub strobe: bool,
    pub shake: f64,
    pub flash: f64,
    pub flash_word: Option<FlashRecord>,
    pub voice_level: f64,
    pub particles: Vec<ParticleView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_degree_clamped() {
        assert_eq!(split_degree(0.0), 0.0);
        assert_eq!(split_degree(5.0), 0.5);
        assert_eq!(split_degree(25.0), 1.0);
    }

    #[test]
    fn test_outbound_tagging() {
        let flash = Outbound::Flash(FlashRecord { word: "嘘".into(), ttl: 60 });
        let json = serde_json::to_value(&flash).unwrap();
        assert_eq!(json["type"], "flash");
        assert_eq!(json["word"], "嘘");
        assert_eq!(json["ttl"], 60);
    }
}
