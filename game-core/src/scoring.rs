use crate::GameConfig;

pub struct ScoringEngine;

impl ScoringEngine {
    /// Points for a round the guesser solved: a time bonus plus a bonus
    /// that grows with the round number.
    pub fn win_bonus(time_remaining: u32, round_number: u32, config: &GameConfig) -> u32 {
        let time_bonus = time_remaining.saturating_mul(config.time_bonus_per_second);
        let round_bonus = round_number.saturating_mul(config.round_bonus);
        time_bonus.saturating_add(round_bonus)
    }

    /// Deduct the hint cost, never going below zero.
    pub fn apply_hint_cost(score: u32, config: &GameConfig) -> u32 {
        score.saturating_sub(config.hint_cost)
    }

    /// Drawing progress (0-100) for a number of strokes.
    pub fn drawing_progress(stroke_count: u32, config: &GameConfig) -> u8 {
        stroke_count
            .saturating_mul(config.progress_per_stroke)
            .min(100) as u8
    }
}
