//! Silence escalator: the longer nobody speaks, the heavier the words
//!
//! Stages, measured from the last utterance:
//! - 0 → 1 after 2s:  "…"   drifting dots
//! - 1 → 2 after 5s:  "間"  a still interval
//! - 2 → 3 after 8s:  "沈黙" heavy silence that falls
//! - 3 → 4 after 12s: "静寂" deep silence that rises
//! - 4 → 4 every 5s after that: "…" again

use std::time::{Duration, Instant};
use crate::{SILENCE_DOTS_SECS, SILENCE_MA_SECS, SILENCE_HEAVY_SECS, SILENCE_ABYSS_SECS, SILENCE_LOOP_SECS};
use crate::types::{ColorTag, WordSpawnConfig, WordStyle};

pub const MAX_SILENCE_STAGE: u8 = 4;

/// Elapsed-silence automaton
#[derive(Debug)]
pub struct SilenceEscalator {
    stage: u8,
    last_speech: Instant,
}

impl Default for SilenceEscalator {
    fn default() -> Self {
        Self::new()
    }
}

impl SilenceEscalator {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self {
            stage: 0,
            last_speech: now,
        }
    }

    /// Someone spoke: back to stage 0
    pub fn mark_speech_at(&mut self, now: Instant) {
        self.last_speech = now;
        self.stage = 0;
    }

    /// Current stage (0-4)
    pub fn stage(&self) -> u8 {
        self.stage
    }

    /// Seconds of silence as of `now`
    pub fn silence_secs_at(&self, now: Instant) -> f64 {
        now.saturating_duration_since(self.last_speech).as_secs_f64()
    }

    /// Advance at most one stage. Returns the word to spawn, if any.
    pub fn check_at(&mut self, now: Instant) -> Option<WordSpawnConfig> {
        let duration = self.silence_secs_at(now);

        match self.stage {
            0 if duration > SILENCE_DOTS_SECS => {
                self.stage = 1;
                Some(dots(0.8))
            }
            1 if duration > SILENCE_MA_SECS => {
                self.stage = 2;
                Some(
                    WordSpawnConfig::new("間")
                        .with_style(WordStyle::SilenceMa)
                        .with_color(ColorTag::BlueWhite)
                        .with_scale(1.0)
                        .with_vy(0.0),
                )
            }
            2 if duration > SILENCE_HEAVY_SECS => {
                self.stage = 3;
                Some(
                    WordSpawnConfig::new("沈黙")
                        .with_style(WordStyle::SilenceHeavy)
                        .with_color(ColorTag::DarkGrey)
                        .with_scale(1.5)
                        .with_vy(15.0),
                )
            }
            3 if duration > SILENCE_ABYSS_SECS => {
                self.stage = 4;
                Some(
                    WordSpawnConfig::new("静寂")
                        .with_style(WordStyle::SilenceAbyss)
                        .with_color(ColorTag::Black)
                        .with_scale(2.0)
                        .with_vy(-1.0),
                )
            }
            MAX_SILENCE_STAGE if duration > SILENCE_ABYSS_SECS + SILENCE_LOOP_SECS => {
                // Rewind to the 12s mark so the next dots come 5s later
                self.last_speech = now
                    .checked_sub(Duration::from_secs_f64(SILENCE_ABYSS_SECS))
                    .unwrap_or(self.last_speech);
                Some(dots(1.0))
            }
            _ => None,
        }
    }

    pub fn reset_at(&mut self, now: Instant) {
        self.mark_speech_at(now);
    }
}

fn dots(scale: f64) -> WordSpawnConfig {
    WordSpawnConfig::new("…")
        .with_style(WordStyle::SilenceDots)
        .with_color(ColorTag::GreyAlpha)
        .with_scale(scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(t0: Instant, s: f64) -> Instant {
        t0 + Duration::from_secs_f64(s)
    }

    #[test]
    fn test_nothing_before_two_seconds() {
        let t0 = Instant::now();
        let mut silence = SilenceEscalator::starting_at(t0);
        assert!(silence.check_at(at(t0, 2.0)).is_none());
        assert_eq!(silence.stage(), 0);
    }

    #[test]
    fn test_one_emission_per_call() {
        let t0 = Instant::now();
        let mut silence = SilenceEscalator::starting_at(t0);
        // Long overdue, still only one step per check
        let cfg = silence.check_at(at(t0, 30.0)).unwrap();
        assert_eq!(cfg.style, WordStyle::SilenceDots);
        assert_eq!(silence.stage(), 1);
        let cfg = silence.check_at(at(t0, 30.0)).unwrap();
        assert_eq!(cfg.style, WordStyle::SilenceMa);
        assert_eq!(silence.stage(), 2);
    }

    #[test]
    fn test_stage_params() {
        let t0 = Instant::now();
        let mut silence = SilenceEscalator::starting_at(t0);
        let dots = silence.check_at(at(t0, 2.1)).unwrap();
        assert_eq!(dots.text, "…");
        assert_eq!(dots.scale, Some(0.8));
        assert_eq!(dots.color, Some(ColorTag::GreyAlpha));

        let ma = silence.check_at(at(t0, 5.1)).unwrap();
        assert_eq!(ma.vy, Some(0.0));

        let heavy = silence.check_at(at(t0, 8.1)).unwrap();
        assert_eq!(heavy.text, "沈黙");
        assert_eq!(heavy.vy, Some(15.0));
        assert_eq!(heavy.scale, Some(1.5));

        let abyss = silence.check_at(at(t0, 12.1)).unwrap();
        assert_eq!(abyss.text, "静寂");
        assert_eq!(abyss.vy, Some(-1.0));
        assert_eq!(abyss.color, Some(ColorTag::Black));
        assert_eq!(silence.stage(), MAX_SILENCE_STAGE);
    }

    #[test]
    fn test_speech_resets_stage() {
        let t0 = Instant::now();
        let mut silence = SilenceEscalator::starting_at(t0);
        silence.check_at(at(t0, 2.5));
        silence.check_at(at(t0, 5.5));
        assert_eq!(silence.stage(), 2);
        silence.mark_speech_at(at(t0, 6.0));
        assert_eq!(silence.stage(), 0);
        assert!(silence.check_at(at(t0, 7.0)).is_none());
        assert!(silence.check_at(at(t0, 8.1)).is_some());
        assert_eq!(silence.stage(), 1);
    }

    #[test]
    fn test_abyss_loops_every_five_seconds() {
        let t0 = Instant::now();
        let mut silence = SilenceEscalator::starting_at(t0);
        for s in [2.1, 5.1, 8.1, 12.1] {
            silence.check_at(at(t0, s)).unwrap();
        }
        assert!(silence.check_at(at(t0, 16.9)).is_none());

        let looped = silence.check_at(at(t0, 17.1)).unwrap();
        assert_eq!(looped.style, WordStyle::SilenceDots);
        assert_eq!(looped.scale, Some(1.0));
        assert_eq!(silence.stage(), MAX_SILENCE_STAGE);

        assert!(silence.check_at(at(t0, 21.0)).is_none());
        assert!(silence.check_at(at(t0, 22.2)).is_some());
        assert_eq!(silence.stage(), MAX_SILENCE_STAGE);
    }
}
