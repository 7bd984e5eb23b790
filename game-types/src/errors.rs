use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::GameStatus;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameError {
    #[error("cannot {action} while the game is {current_state}")]
    InvalidState {
        action: String,
        current_state: GameStatus,
    },
    #[error("'{word}' is not in the word bank")]
    UnknownWord { word: String },
}

impl GameError {
    pub fn invalid_state(action: &str, current_state: GameStatus) -> Self {
        GameError::InvalidState {
            action: action.to_string(),
            current_state,
        }
    }
}
