use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::GameSnapshot;

/// Actions the presentation layer can send to the game core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PlayerAction {
    Start,
    /// One or more atomic drawing actions (strokes).
    Draw { count: u32 },
    RequestHint,
    RevealWord,
    NextRound,
    ResetGame,
}

/// Result of applying a [`PlayerAction`].
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ActionResult {
    pub snapshot: GameSnapshot,
    /// Only set for `RequestHint`.
    pub hint: Option<String>,
}
