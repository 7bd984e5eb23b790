use game_types::{Category, GuessRecord, RoundId};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    RoundStarted {
        round_id: RoundId,
        round_number: u32,
        category: Category,
        word_length: u32,
    },
    DrawProgress {
        round_id: RoundId,
        stroke_count: u32,
        progress: u8,
    },
    GuessMade {
        round_id: RoundId,
        guess_number: u32,
        record: GuessRecord,
    },
    RoundWon {
        round_id: RoundId,
        word: String,
        time_remaining: u32,
        points_awarded: u32,
        score: u32,
    },
    RoundLost {
        round_id: RoundId,
        word: String,
    },
    HintRevealed {
        round_id: RoundId,
        level: u32,
        hint: String,
        score: u32,
    },
    WordRevealed {
        round_id: RoundId,
        word: String,
    },
    GameReset,
}

impl GameEvent {
    pub fn round_id(&self) -> Option<RoundId> {
        match self {
            GameEvent::RoundStarted { round_id, .. } => Some(*round_id),
            GameEvent::DrawProgress { round_id, .. } => Some(*round_id),
            GameEvent::GuessMade { round_id, .. } => Some(*round_id),
            GameEvent::RoundWon { round_id, .. } => Some(*round_id),
            GameEvent::RoundLost { round_id, .. } => Some(*round_id),
            GameEvent::HintRevealed { round_id, .. } => Some(*round_id),
            GameEvent::WordRevealed { round_id, .. } => Some(*round_id),
            GameEvent::GameReset => None,
        }
    }
}

/// Event handler trait for processing game events
pub trait GameEventHandler: Send {
    fn handle_event(&mut self, event: GameEvent);
}

/// Simple event bus for distributing game events
pub struct GameEventBus {
    handlers: Vec<Box<dyn GameEventHandler>>,
}

impl GameEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn publish(&mut self, event: GameEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }
}

impl Default for GameEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GameEventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameEventBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    struct TestHandler {
        events: Arc<Mutex<Vec<GameEvent>>>,
    }

    impl GameEventHandler for TestHandler {
        fn handle_event(&mut self, event: GameEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[test]
    fn test_event_bus() {
        let mut bus = GameEventBus::new();
        let events = Arc::new(Mutex::new(Vec::new()));

        bus.add_handler(Box::new(TestHandler { events: events.clone() }));
        bus.add_handler(Box::new(TestHandler { events: events.clone() }));
        assert_eq!(bus.handler_count(), 2);

        let round_id = Uuid::new_v4();
        bus.publish(GameEvent::WordRevealed {
            round_id,
            word: "猫".to_string(),
        });

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].round_id(), Some(round_id));
    }

    #[test]
    fn test_reset_has_no_round() {
        assert_eq!(GameEvent::GameReset.round_id(), None);
    }
}
