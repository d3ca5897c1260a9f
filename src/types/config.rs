//! Runtime configuration

use serde::{Deserialize, Serialize};
use crate::error::AtmosphereError;
use crate::DANGER_WORDS;

/// Screen geometry, timing and vocabulary for one atmosphere
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtmosphereConfig {
    pub width: f64,
    pub height: f64,
    /// Distance of the floor line above the bottom edge
    pub floor_margin: f64,
    /// Horizontal band particles bounce off
    pub wall_margin: f64,
    /// Simulation steps per second
    pub tick_hz: u32,
    /// Capacity of each producer queue
    pub queue_capacity: usize,
    /// Fixed seed for jitter; entropy when absent
    pub seed: Option<u64>,
    pub danger_words: Vec<String>,
}

impl Default for AtmosphereConfig {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
            floor_margin: 50.0,
            wall_margin: 50.0,
            tick_hz: 60,
            queue_capacity: 64,
            seed: None,
            danger_words: DANGER_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl AtmosphereConfig {
    /// Y coordinate of the floor line
    pub fn floor(&self) -> f64 {
        self.height - self.floor_margin
    }

    /// Reject geometry and timing the simulation cannot run with
    pub fn validate(&self) -> Result<(), AtmosphereError> {
        for (name, extent) in [("width", self.width), ("height", self.height)] {
            if !extent.is_finite() || extent < 1.0 {
                return Err(AtmosphereError::InvalidConfig(format!(
                    "{} must be at least 1 pixel, got {}",
                    name, extent
                )));
            }
        }
        if !self.floor_margin.is_finite() || !self.wall_margin.is_finite() {
            return Err(AtmosphereError::InvalidConfig("margins must be finite".to_string()));
        }
        if self.tick_hz == 0 {
            return Err(AtmosphereError::InvalidConfig("tick rate must be positive".to_string()));
        }
        Ok(())
    }
}
