//! Kuuki: conversational atmosphere engine
//!
//! Recognized speech and microphone level drive a tension model, a keyword
//! classifier, a silence escalator and a word-particle simulation. The
//! renderer only draws what [`core::Atmosphere`] hands it.

pub mod core;
pub mod error;
pub mod types;

pub use error::AtmosphereError;

// =============================================================================
// TENSION
// =============================================================================

/// Tension added by an utterance containing a danger word
pub const TENSION_DANGER_HIT: f64 = 3.0;

/// Tension added by any other utterance
pub const TENSION_UTTERANCE: f64 = 0.2;

/// Linear tension decay (per second)
pub const TENSION_DECAY_PER_SEC: f64 = 0.5;

/// Tension above which the conversation is SPLIT
pub const TENSION_THRESHOLD_SPLIT: f64 = 8.0;

/// Tension above which the conversation is ALIGNED
pub const TENSION_THRESHOLD_ALIGNED: f64 = 2.0;

/// Divisor mapping tension onto split degree [0, 1]
pub const SPLIT_DEGREE_SCALE: f64 = 10.0;

/// Default danger words
pub const DANGER_WORDS: &[&str] = &["矛盾", "ふざけるな", "嘘", "絶対", "違う", "変", "おかしい"];

// =============================================================================
// SILENCE (seconds since last speech)
// =============================================================================

pub const SILENCE_DOTS_SECS: f64 = 2.0;
pub const SILENCE_MA_SECS: f64 = 5.0;
pub const SILENCE_HEAVY_SECS: f64 = 8.0;
pub const SILENCE_ABYSS_SECS: f64 = 12.0;

/// Interval between repeated dots once the abyss is reached
pub const SILENCE_LOOP_SECS: f64 = 5.0;

// =============================================================================
// TURNS
// =============================================================================

/// Gap after which the next utterance is attributed to the other side
pub const TURN_GAP_SECS: f64 = 2.0;

// =============================================================================
// PHYSICS (per tick)
// =============================================================================

pub const GRAVITY: f64 = 0.25;

/// Gravity multiplier for filler words
pub const FILLER_GRAVITY_SCALE: f64 = 0.2;

pub const FRICTION: f64 = 0.98;
pub const FLOOR_RESTITUTION: f64 = -0.6;
pub const FLOOR_FRICTION: f64 = 0.8;
pub const WALL_RESTITUTION: f64 = -0.8;

/// Below this rebound speed a particle comes to rest
pub const REST_SPEED: f64 = 1.0;

/// Glyphs this short (in chars) float as fillers
pub const FILLER_MAX_CHARS: usize = 3;

// =============================================================================
// EFFECTS
// =============================================================================

pub const SHAKE_DECAY: f64 = 0.9;
pub const SHAKE_SNAP: f64 = 0.5;
pub const FLASH_DECAY: f64 = 0.85;
pub const BACKGROUND_LERP: f64 = 0.05;

/// Flash word lifetime for a recognized utterance (ticks)
pub const FLASH_TTL_UTTERANCE: u32 = 120;

/// Flash word lifetime for a `flash` control event (ticks)
pub const FLASH_TTL_CONTROL: u32 = 60;

// =============================================================================
// VOICE
// =============================================================================

/// Visual gain applied to incoming volume samples
pub const VOICE_GAIN: f64 = 8.0;
pub const VOICE_RELEASE: f64 = 0.92;
pub const VOICE_IDLE_DECAY: f64 = 0.95;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
