//! Inbound control messages

use serde::Deserialize;
use crate::error::AtmosphereError;
use crate::types::{ConversationalState, WordSpawnConfig};

/// Commands accepted from the network, applied under the tick lock
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlMessage {
    /// Clear tension, silence stage, speaker side and the barrage
    Reset,
    /// Flash a word across the screen
    Flash { word: String },
    /// Spawn a word with explicit overrides
    SpawnWord(WordSpawnConfig),
    /// Overwrite conversational state from a remote authority
    State {
        state: ConversationalState,
        #[serde(default)]
        tension: Option<f64>,
        #[serde(default)]
        split_degree: Option<f64>,
    },
}

impl ControlMessage {
    /// Parse a JSON control message
    pub fn parse(raw: &str) -> Result<Self, AtmosphereError> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WordStyle;

    #[test]
    fn test_parse_reset() {
        assert_eq!(ControlMessage::parse(r#"{"type":"reset"}"#).unwrap(), ControlMessage::Reset);
    }

    #[test]
    fn test_parse_spawn_word_with_unknown_style() {
        let msg = ControlMessage::parse(
            r#"{"type":"spawn_word","text":"光","style":"rainbow","scale":3.0}"#,
        )
        .unwrap();
        match msg {
            ControlMessage::SpawnWord(cfg) => {
                assert_eq!(cfg.style, WordStyle::Normal);
                assert_eq!(cfg.scale, Some(3.0));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_state_overwrite() {
        let msg = ControlMessage::parse(r#"{"type":"state","state":"SPLIT","split_degree":0.9}"#).unwrap();
        assert_eq!(
            msg,
            ControlMessage::State {
                state: ConversationalState::Split,
                tension: None,
                split_degree: Some(0.9),
            }
        );
    }

    #[test]
    fn test_malformed_is_error() {
        assert!(ControlMessage::parse("{not json").is_err());
        assert!(ControlMessage::parse(r#"{"type":"explode"}"#).is_err());
    }
}
