//! Atmosphere: the one owner of all conversational and visual state
//!
//! Everything that mutates tension, silence stage, speaker side or the
//! barrage goes through `&mut Atmosphere`. The server keeps it behind a
//! single lock; the CLI owns it directly.

use std::time::Instant;
use tracing::{debug, info};
use crate::{FLASH_TTL_CONTROL, FLASH_TTL_UTTERANCE};
use crate::core::{
    BackgroundTint, EffectDecay, FlashWord, ParticleSimulator, SemanticClassifier,
    SilenceEscalator, TensionEngine, TurnTracker, VoiceLevel,
};
use crate::types::{
    AtmosphereConfig, ControlMessage, FlashRecord, Frame, SpeakerSide, StateRecord,
    WordSpawnConfig, WordStyle,
};

/// Result of hearing one utterance
#[derive(Debug, Clone)]
pub struct Heard {
    pub record: StateRecord,
    pub config: WordSpawnConfig,
    pub side: SpeakerSide,
    pub flash: FlashRecord,
}

/// What a control message produced for the outside world
#[derive(Debug, Clone, PartialEq)]
pub enum ControlOutcome {
    Reset,
    Flash(FlashRecord),
    Spawned,
    StateOverwritten,
}

/// Owning aggregate of the whole engine
#[derive(Debug)]
pub struct Atmosphere {
    config: AtmosphereConfig,
    tension: TensionEngine,
    classifier: SemanticClassifier,
    silence: SilenceEscalator,
    turns: TurnTracker,
    particles: ParticleSimulator,
    effects: EffectDecay,
    background: BackgroundTint,
    voice: VoiceLevel,
    flash: FlashWord,
    tick: u64,
}

impl Atmosphere {
    pub fn new(config: AtmosphereConfig) -> Self {
        Self::starting_at(config, Instant::now())
    }

    /// Build with all clocks starting at `now`
    pub fn starting_at(config: AtmosphereConfig, now: Instant) -> Self {
        let tension = TensionEngine::starting_at(now).with_danger_words(config.danger_words.clone());
        let particles = ParticleSimulator::new(&config);
        Self {
            tension,
            classifier: SemanticClassifier::new(),
            silence: SilenceEscalator::starting_at(now),
            turns: TurnTracker::new(),
            particles,
            effects: EffectDecay::new(),
            background: BackgroundTint::new(),
            voice: VoiceLevel::new(),
            flash: FlashWord::new(),
            tick: 0,
            config,
        }
    }

    /// Hear a recognized utterance. Blank text is not speech.
    pub fn hear_at(&mut self, text: &str, now: Instant) -> Option<Heard> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let record = self.tension.process_at(text, now);
        self.silence.mark_speech_at(now);

        let config = self.classifier.classify(text);
        let side = self
            .turns
            .observe_at(now, config.style == WordStyle::Conjunction);

        self.spawn(&config, side);
        self.background.observe(text, config.style, record.state);
        let flash = self.flash.show(text, FLASH_TTL_UTTERANCE);

        debug!(text, style = %config.style, state = %record.state, tension = record.tension, "heard");

        Some(Heard { record, config, side, flash })
    }

    pub fn hear(&mut self, text: &str) -> Option<Heard> {
        self.hear_at(text, Instant::now())
    }

    /// Feed one volume sample (None when the queue was empty this tick)
    pub fn observe_volume(&mut self, sample: Option<f64>) {
        match sample {
            Some(volume) => self.voice.sample(volume),
            None => self.voice.idle(),
        }
    }

    /// One fixed simulation step
    pub fn tick_at(&mut self, now: Instant) -> Option<WordSpawnConfig> {
        self.tick += 1;

        let state = self.tension.reading_at(now).state;
        let ambient = self.silence.check_at(now);
        if let Some(config) = ambient.as_ref() {
            self.spawn(config, self.turns.side());
            self.background.observe(&config.text, config.style, state);
        }
        self.background.hold_alert(state);

        self.particles.tick();
        self.effects.tick();
        self.background.tick();
        self.flash.tick();

        ambient
    }

    pub fn tick(&mut self) -> Option<WordSpawnConfig> {
        self.tick_at(Instant::now())
    }

    fn spawn(&mut self, config: &WordSpawnConfig, side: SpeakerSide) {
        let state = self.tension.state();
        let effects = self.particles.spawn(config, state, side, self.voice.level());
        self.effects.add_shake(effects.shake);
        if effects.flash {
            self.effects.trigger_flash();
        }
    }

    /// Apply a control message under the caller's exclusive access
    pub fn apply_at(&mut self, message: ControlMessage, now: Instant) -> ControlOutcome {
        match message {
            ControlMessage::Reset => {
                self.reset_at(now);
                ControlOutcome::Reset
            }
            ControlMessage::Flash { word } => {
                ControlOutcome::Flash(self.flash.show(word, FLASH_TTL_CONTROL))
            }
            ControlMessage::SpawnWord(config) => {
                self.spawn(&config, self.turns.side());
                ControlOutcome::Spawned
            }
            ControlMessage::State { state, tension, split_degree } => {
                self.tension.overwrite_at(state, tension, split_degree, now);
                ControlOutcome::StateOverwritten
            }
        }
    }

    /// Clear tension, silence, side, barrage and effects
    pub fn reset_at(&mut self, now: Instant) {
        self.tension.reset();
        self.silence.reset_at(now);
        self.turns.reset();
        self.particles.clear();
        self.effects.reset();
        self.background.reset();
        self.voice.reset();
        self.flash.reset();
        info!("atmosphere reset");
    }

    /// Current state record (recalculates decay)
    pub fn reading_at(&mut self, now: Instant) -> StateRecord {
        self.tension.reading_at(now)
    }

    pub fn reading(&mut self) -> StateRecord {
        self.reading_at(Instant::now())
    }

    /// Snapshot for the renderer
    pub fn frame(&self) -> Frame {
        let state = self.tension.state();
        Frame {
            tick: self.tick,
            state,
            background: self.background.rgb(),
            strobe: state.is_split() && self.tick % 10 < 5,
            shake: self.effects.shake,
            flash: self.effects.flash,
            flash_word: self.flash.current().cloned(),
            voice_level: self.voice.level(),
            particles: self.particles.particles().iter().map(|p| p.view()).collect(),
        }
    }

    pub fn config(&self) -> &AtmosphereConfig {
        &self.config
    }

    pub fn tension(&self) -> &TensionEngine {
        &self.tension
    }

    pub fn silence(&self) -> &SilenceEscalator {
        &self.silence
    }

    pub fn turns(&self) -> &TurnTracker {
        &self.turns
    }

    pub fn particles(&self) -> &ParticleSimulator {
        &self.particles
    }

    /// Renderer hook for attaching glyphs
    pub fn particles_mut(&mut self) -> &mut ParticleSimulator {
        &mut self.particles
    }

    pub fn effects(&self) -> &EffectDecay {
        &self.effects
    }

    pub fn background(&self) -> &BackgroundTint {
        &self.background
    }

    pub fn voice(&self) -> &VoiceLevel {
        &self.voice
    }

    pub fn flash_word(&self) -> Option<&FlashRecord> {
        self.flash.current()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use crate::types::ConversationalState;

    fn seeded() -> AtmosphereConfig {
        AtmosphereConfig {
            seed: Some(11),
            ..AtmosphereConfig::default()
        }
    }

    #[test]
    fn test_blank_is_not_speech() {
        let t0 = Instant::now();
        let mut atmo = Atmosphere::starting_at(seeded(), t0);
        assert!(atmo.hear_at("   ", t0).is_none());
        assert_eq!(atmo.tension().utterance_count(), 0);
        assert!(atmo.particles().is_empty());
    }

    #[test]
    fn test_hear_spawns_and_flashes() {
        let t0 = Instant::now();
        let mut atmo = Atmosphere::starting_at(seeded(), t0);
        let heard = atmo.hear_at("嘘つき", t0).unwrap();
        assert_eq!(heard.config.style, WordStyle::Impact);
        assert_eq!(heard.flash.ttl, FLASH_TTL_UTTERANCE);
        assert_eq!(atmo.particles().len(), 1);
        assert_eq!(atmo.effects().shake, 20.0);
        assert_eq!(atmo.effects().flash, 1.0);
    }

    #[test]
    fn test_speech_resets_silence() {
        let t0 = Instant::now();
        let mut atmo = Atmosphere::starting_at(seeded(), t0);
        atmo.tick_at(t0 + Duration::from_secs(3));
        assert_eq!(atmo.silence().stage(), 1);
        atmo.hear_at("はい", t0 + Duration::from_secs(4));
        assert_eq!(atmo.silence().stage(), 0);
    }

    #[test]
    fn test_control_reset_clears_everything() {
        let t0 = Instant::now();
        let mut atmo = Atmosphere::starting_at(seeded(), t0);
        atmo.hear_at("絶対", t0);
        atmo.hear_at("でも", t0);
        assert_eq!(atmo.turns().side(), SpeakerSide::Right);
        let outcome = atmo.apply_at(ControlMessage::Reset, t0);
        assert_eq!(outcome, ControlOutcome::Reset);
        assert_eq!(atmo.tension().tension(), 0.0);
        assert_eq!(atmo.silence().stage(), 0);
        assert_eq!(atmo.turns().side(), SpeakerSide::Left);
        assert!(atmo.particles().is_empty());
    }

    #[test]
    fn test_state_overwrite_drives_spawns() {
        let t0 = Instant::now();
        let mut atmo = Atmosphere::starting_at(seeded(), t0);
        atmo.apply_at(
            ControlMessage::State {
                state: ConversationalState::Split,
                tension: Some(9.5),
                split_degree: None,
            },
            t0,
        );
        atmo.apply_at(ControlMessage::SpawnWord(WordSpawnConfig::new("外から")), t0);
        let frame = atmo.frame();
        assert_eq!(frame.state, ConversationalState::Split);
        assert_eq!(frame.particles.len(), 1);
        assert_eq!(frame.particles[0].color, crate::types::ColorTag::Red.rgba());
    }

    #[test]
    fn test_volume_queue_absence_decays() {
        let mut atmo = Atmosphere::new(seeded());
        atmo.observe_volume(Some(0.1));
        let attacked = atmo.voice().level();
        atmo.observe_volume(None);
        assert!((atmo.voice().level() - attacked * 0.95).abs() < 1e-12);
    }
}
