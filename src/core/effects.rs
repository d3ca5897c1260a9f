//! Ambient effects: shake/flash decay, background tint, voice level, flash word

use sha2::{Digest, Sha256};
use crate::{
    SHAKE_DECAY, SHAKE_SNAP, FLASH_DECAY, BACKGROUND_LERP,
    VOICE_GAIN, VOICE_RELEASE, VOICE_IDLE_DECAY,
};
use crate::types::{ConversationalState, FlashRecord, WordStyle};

/// Shake and flash accumulators
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectDecay {
    pub shake: f64,
    pub flash: f64,
}

impl EffectDecay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_shake(&mut self, amount: f64) {
        self.shake += amount;
    }

    pub fn trigger_flash(&mut self) {
        self.flash = 1.0;
    }

    /// Decay both accumulators one tick
    pub fn tick(&mut self) {
        self.shake *= SHAKE_DECAY;
        if self.shake < SHAKE_SNAP {
            self.shake = 0.0;
        }
        self.flash *= FLASH_DECAY;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// =============================================================================
// BACKGROUND
// =============================================================================

/// Background while SPLIT
pub const ALERT_BACKGROUND: [f64; 3] = [30.0, 0.0, 0.0];
/// Background target for conjunctions
pub const NEUTRAL_BACKGROUND: [f64; 3] = [40.0, 40.0, 40.0];
/// Starting background
pub const BASE_BACKGROUND: [f64; 3] = [10.0, 10.0, 10.0];

const HUE_SATURATION: f64 = 0.6;
const HUE_VALUE: f64 = 0.2;

/// Background color that eases toward a target
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundTint {
    current: [f64; 3],
    target: [f64; 3],
}

impl Default for BackgroundTint {
    fn default() -> Self {
        Self {
            current: BASE_BACKGROUND,
            target: BASE_BACKGROUND,
        }
    }
}

impl BackgroundTint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retarget after a word. Silence words leave the target alone unless SPLIT.
    pub fn observe(&mut self, text: &str, style: WordStyle, state: ConversationalState) {
        if state.is_split() {
            self.target = ALERT_BACKGROUND;
        } else if style == WordStyle::Conjunction {
            self.target = NEUTRAL_BACKGROUND;
        } else if !style.is_silence() {
            self.target = hue_color(text);
        }
    }

    /// Keep the alert color while SPLIT even without new words
    pub fn hold_alert(&mut self, state: ConversationalState) {
        if state.is_split() {
            self.target = ALERT_BACKGROUND;
        }
    }

    /// Move every channel 5% of the way to the target
    pub fn tick(&mut self) {
        for (c, t) in self.current.iter_mut().zip(self.target.iter()) {
            *c += (t - *c) * BACKGROUND_LERP;
        }
    }

    pub fn target(&self) -> [f64; 3] {
        self.target
    }

    pub fn current(&self) -> [f64; 3] {
        self.current
    }

    /// Displayed color as 8-bit RGB
    pub fn rgb(&self) -> [u8; 3] {
        self.current.map(|c| c.round().clamp(0.0, 255.0) as u8)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Dark color whose hue is derived from the text's digest
pub fn hue_color(text: &str) -> [f64; 3] {
    let digest = Sha256::digest(text.as_bytes());
    let hue = u16::from_be_bytes([digest[0], digest[1]]) % 360;
    hsv_to_rgb(hue as f64, HUE_SATURATION, HUE_VALUE)
}

/// Standard HSV → RGB; h in degrees, s and v in [0, 1], output in [0, 255]
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [f64; 3] {
    let c = v * s;
    let hp = (h % 360.0) / 60.0;
    let x = c * (1.0 - ((hp % 2.0) - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = v - c;
    [(r + m) * 255.0, (g + m) * 255.0, (b + m) * 255.0]
}

// =============================================================================
// VOICE
// =============================================================================

/// Smoothed microphone level: instant attack, slow release
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoiceLevel {
    level: f64,
}

impl VoiceLevel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sample arrived this tick
    pub fn sample(&mut self, volume: f64) {
        let target = volume.max(0.0) * VOICE_GAIN;
        if target > self.level {
            self.level = target;
        } else {
            self.level *= VOICE_RELEASE;
        }
    }

    /// No sample this tick
    pub fn idle(&mut self) {
        self.level *= VOICE_IDLE_DECAY;
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn reset(&mut self) {
        self.level = 0.0;
    }
}

// =============================================================================
// FLASH WORD
// =============================================================================

/// Word flashed full-screen for a number of ticks
#[derive(Debug, Clone, Default)]
pub struct FlashWord {
    current: Option<FlashRecord>,
}

impl FlashWord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, word: impl Into<String>, ttl: u32) -> FlashRecord {
        let record = FlashRecord { word: word.into(), ttl };
        self.current = Some(record.clone());
        record
    }

    /// Count down; the word disappears when its TTL reaches 0
    pub fn tick(&mut self) {
        if let Some(record) = self.current.as_mut() {
            record.ttl = record.ttl.saturating_sub(1);
            if record.ttl == 0 {
                self.current = None;
            }
        }
    }

    pub fn current(&self) -> Option<&FlashRecord> {
        self.current.as_ref()
    }

    pub fn reset(&mut self) {
        self.current = None;
    }
}
