//! Core modules for Kuuki

pub mod tension;
pub mod classifier;
pub mod silence;
pub mod turn;
pub mod particles;
pub mod effects;
pub mod atmosphere;
pub mod inbox;
pub mod api;

pub use tension::TensionEngine;
pub use classifier::SemanticClassifier;
pub use silence::{SilenceEscalator, MAX_SILENCE_STAGE};
pub use turn::TurnTracker;
pub use particles::{ParticleSimulator, SpawnEffects};
pub use effects::{EffectDecay, BackgroundTint, VoiceLevel, FlashWord, hue_color, hsv_to_rgb};
pub use atmosphere::{Atmosphere, Heard, ControlOutcome};
pub use inbox::{Feeds, Inbox};
pub use api::{create_state, create_router, step, advance, run_tick_loop, run_server, AppState, Heartbeat};
