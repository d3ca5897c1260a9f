//! Tension Engine: scalar heat with linear decay
//!
//! Band transitions (re-derived on every recalculation):
//! - tension > 8.0 → SPLIT
//! - tension > 2.0 → ALIGNED
//! - otherwise     → UNKNOWN
//!
//! Each utterance adds 3.0 when it carries a danger word and 0.2 otherwise.
//! Tension bleeds off at 0.5 per second and is never negative.

use std::time::Instant;
use crate::{TENSION_DANGER_HIT, TENSION_UTTERANCE, TENSION_DECAY_PER_SEC, DANGER_WORDS};
use crate::types::{ConversationalState, StateRecord};

/// Tension state machine
#[derive(Debug)]
pub struct TensionEngine {
    /// Current band
    state: ConversationalState,
    /// Current heat, never negative
    tension: f64,
    /// When decay was last applied
    last_update: Instant,
    /// Words that spike tension
    danger_words: Vec<String>,
    /// Number of utterances processed
    utterance_count: u64,
}

impl Default for TensionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TensionEngine {
    /// Create new engine with the default danger words
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create new engine whose clock starts at `now`
    pub fn starting_at(now: Instant) -> Self {
        Self {
            state: ConversationalState::Unknown,
            tension: 0.0,
            last_update: now,
            danger_words: DANGER_WORDS.iter().map(|w| w.to_string()).collect(),
            utterance_count: 0,
        }
    }

    /// Replace the danger vocabulary
    pub fn with_danger_words(mut self, words: Vec<String>) -> Self {
        self.danger_words = words.into_iter().filter(|w| !w.is_empty()).collect();
        self
    }

    /// Does the text contain a danger word?
    pub fn is_dangerous(&self, text: &str) -> bool {
        self.danger_words.iter().any(|w| text.contains(w.as_str()))
    }

    /// Feed an utterance, return the resulting record
    pub fn process(&mut self, text: &str) -> StateRecord {
        self.process_at(text, Instant::now())
    }

    pub fn process_at(&mut self, text: &str, now: Instant) -> StateRecord {
        self.utterance_count += 1;
        self.tension += if self.is_dangerous(text) {
            TENSION_DANGER_HIT
        } else {
            TENSION_UTTERANCE
        };
        self.recalculate_at(now);
        self.record()
    }

    /// Apply decay since the last update and re-band
    pub fn recalculate_at(&mut self, now: Instant) {
        let dt = now.saturating_duration_since(self.last_update).as_secs_f64();
        // Out-of-order instants must not move the clock backwards
        if now > self.last_update {
            self.last_update = now;
        }
        self.tension = (self.tension - dt * TENSION_DECAY_PER_SEC).max(0.0);
        self.state = ConversationalState::from_tension(self.tension);
    }

    /// Recalculate and return the current record
    pub fn reading(&mut self) -> StateRecord {
        self.reading_at(Instant::now())
    }

    pub fn reading_at(&mut self, now: Instant) -> StateRecord {
        self.recalculate_at(now);
        self.record()
    }

    /// Overwrite from a remote authority. Tension is taken as given, or
    /// derived from the split degree, or set to a value well inside the band
    /// so the next recalculation keeps the authority's state.
    pub fn overwrite_at(
        &mut self,
        state: ConversationalState,
        tension: Option<f64>,
        split: Option<f64>,
        now: Instant,
    ) {
        let tension = tension
            .or_else(|| split.map(|s| s.clamp(0.0, 1.0) * crate::SPLIT_DEGREE_SCALE))
            .unwrap_or(match state {
                ConversationalState::Unknown => 0.0,
                ConversationalState::Aligned => {
                    (crate::TENSION_THRESHOLD_ALIGNED + crate::TENSION_THRESHOLD_SPLIT) / 2.0
                }
                ConversationalState::Split => crate::SPLIT_DEGREE_SCALE,
            });
        self.tension = tension.max(0.0);
        self.state = state;
        if now > self.last_update {
            self.last_update = now;
        }
    }

    /// Get current state without recalculating
    pub fn state(&self) -> ConversationalState {
        self.state
    }

    /// Get current tension without recalculating
    pub fn tension(&self) -> f64 {
        self.tension
    }

    pub fn utterance_count(&self) -> u64 {
        self.utterance_count
    }

    fn record(&self) -> StateRecord {
        StateRecord::new(self.state, self.tension)
    }

    /// Clear tension; the clock keeps running
    pub fn reset(&mut self) {
        self.tension = 0.0;
        self.state = ConversationalState::Unknown;
    }
}

// =============================================================================
// TESTS
// =============================================================================
