//! Turn tracker: guesses who is speaking from timing and conjunctions
//!
//! There is no diarization. A pause longer than 2 seconds, or an utterance
//! that contains a conjunction anywhere ("でも", "しかし", ...), is taken as
//! the other person answering.

use std::time::{Duration, Instant};
use crate::TURN_GAP_SECS;
use crate::types::SpeakerSide;

#[derive(Debug, Default)]
pub struct TurnTracker {
    side: SpeakerSide,
    last_utterance: Option<Instant>,
    turns: u64,
}

impl TurnTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an utterance and return the side it is attributed to
    pub fn observe_at(&mut self, now: Instant, conjunction: bool) -> SpeakerSide {
        let gap = Duration::from_secs_f64(TURN_GAP_SECS);
        let long_pause = self
            .last_utterance
            .map(|prev| now.saturating_duration_since(prev) > gap)
            .unwrap_or(false);

        if long_pause || conjunction {
            self.side = self.side.flipped();
            self.turns += 1;
        }
        self.last_utterance = Some(now);
        self.side
    }

    pub fn side(&self) -> SpeakerSide {
        self.side
    }

    /// Number of side changes so far
    pub fn turns(&self) -> u64 {
        self.turns
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
