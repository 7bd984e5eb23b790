use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunable game rules. Defaults are the standard rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub round_seconds: u32,
    pub max_guesses: u32,
    pub progress_per_stroke: u32,
    /// Guesses are only scheduled once drawing progress reaches this value.
    pub guess_progress_threshold: u8,
    pub guess_delay_min_ms: u64,
    pub guess_delay_max_ms: u64,
    pub hint_cost: u32,
    pub time_bonus_per_second: u32,
    pub round_bonus: u32,
    pub low_time_threshold: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_seconds: 60,
            max_guesses: 15,
            progress_per_stroke: 2,
            guess_progress_threshold: 10,
            guess_delay_min_ms: 2000, // 2-4 seconds between guesses
            guess_delay_max_ms: 4000,
            hint_cost: 50,
            time_bonus_per_second: 10,
            round_bonus: 50,
            low_time_threshold: 10,
        }
    }
}

impl GameConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1)
    }

    /// Map a unit draw in `[0, 1)` onto the guess delay window.
    pub fn guess_delay(&self, unit: f64) -> Duration {
        let span = self.guess_delay_max_ms.saturating_sub(self.guess_delay_min_ms);
        Duration::from_millis(self.guess_delay_min_ms + (unit * span as f64) as u64)
    }
}
