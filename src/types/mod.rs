//! Core types for Kuuki

mod state;
mod style;
mod spawn;
mod particle;
mod output;
mod control;
mod config;

pub use state::ConversationalState;
pub use style::{WordStyle, ColorTag, Rgba};
pub use spawn::WordSpawnConfig;
pub use particle::{WordParticle, ParticleView, GlyphHandle};
pub use output::{StateRecord, FlashRecord, Outbound, Frame, split_degree};
pub use control::ControlMessage;
pub use config::AtmosphereConfig;

/// Which side of the screen the current speaker throws words from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeakerSide {
    #[default]
    Left,
    Right,
}

impl SpeakerSide {
    pub fn flipped(self) -> Self {
        match self {
            SpeakerSide::Left => SpeakerSide::Right,
            SpeakerSide::Right => SpeakerSide::Left,
        }
    }
}
