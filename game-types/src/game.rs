use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::RoundId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum GameStatus {
    Idle,    // No round started yet
    Playing, // Round in progress, timers running
    Won,     // Guesser found the word
    Lost,    // Timer ran out
}

impl GameStatus {
    /// States from which a fresh round may be entered via `start`.
    pub fn can_start_round(self) -> bool {
        matches!(self, GameStatus::Idle | GameStatus::Won | GameStatus::Lost)
    }

    pub fn is_round_over(self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameStatus::Idle => "idle",
            GameStatus::Playing => "playing",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        };
        f.write_str(name)
    }
}

/// Closed set of word categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Category {
    Animals,
    Food,
    Objects,
    Nature,
    People,
    Activities,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Animals,
        Category::Food,
        Category::Objects,
        Category::Nature,
        Category::People,
        Category::Activities,
    ];

    /// Display label shown to the player.
    pub fn label(self) -> &'static str {
        match self {
            Category::Animals => "动物",
            Category::Food => "食物",
            Category::Objects => "物品",
            Category::Nature => "自然",
            Category::People => "人物",
            Category::Activities => "活动",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Category::Animals => "animals",
            Category::Food => "food",
            Category::Objects => "objects",
            Category::Nature => "nature",
            Category::People => "people",
            Category::Activities => "activities",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GuessRecord {
    pub guess: String,
    pub confidence: u8,
    pub is_correct: bool,
    pub timestamp: String, // ISO 8601 string
}

impl GuessRecord {
    pub fn confidence_band(&self) -> ConfidenceBand {
        ConfidenceBand::from_confidence(self.confidence)
    }
}

/// Coarse bucket used to color a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ConfidenceBand {
    High,   // >= 70
    Medium, // >= 40
    Low,
}

impl ConfidenceBand {
    pub fn from_confidence(confidence: u8) -> Self {
        if confidence >= 70 {
            ConfidenceBand::High
        } else if confidence >= 40 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }
}

/// Everything a renderer needs. The target word is withheld while the
/// round is in progress unless the player revealed it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameSnapshot {
    pub status: GameStatus,
    pub round_id: Option<RoundId>,
    pub round_number: u32,
    pub score: u32,
    pub time_remaining: u32,
    pub time_is_low: bool,
    pub drawing_progress: u8,
    pub category: Option<Category>,
    pub word: Option<String>,
    pub word_length: u32,
    pub guesses: Vec<GuessRecord>,
    pub guess_count: u32,
    pub hints_used: u32,
    pub started_at: Option<String>, // ISO 8601 string
}
