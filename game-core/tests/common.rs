#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use game_core::{GameConfig, GameEvent, GameEventHandler, GameSession, RandomSource, WordBank};
use game_types::{Category, RoundId};
use std::sync::{Arc, Mutex};

/// The built-in catalog
pub fn create_standard_bank() -> Arc<WordBank> {
    Arc::new(WordBank::standard().unwrap())
}

/// A catalog small enough to exhaust: 猫 and 狗 are animals, 苹果 is food
pub fn create_tiny_bank() -> Arc<WordBank> {
    create_bank(&[(Category::Animals, &["猫", "狗"]), (Category::Food, &["苹果"])])
}

pub fn create_bank(entries: &[(Category, &[&str])]) -> Arc<WordBank> {
    let categories = entries
        .iter()
        .map(|(category, words)| (*category, words.iter().map(|w| w.to_string()).collect()))
        .collect();
    Arc::new(WordBank::new(categories).unwrap())
}

pub fn fixed_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

/// Session over the standard catalog with a seeded RNG
pub fn create_session(seed: u64) -> GameSession {
    GameSession::with_seed(create_standard_bank(), GameConfig::default(), seed)
}

/// Session whose every random draw comes from `values`, cycling
pub fn create_scripted_session(values: &[f64]) -> GameSession<ScriptedRng> {
    GameSession::new(
        create_standard_bank(),
        GameConfig::default(),
        ScriptedRng::new(values),
        fixed_epoch(),
    )
}

/// Random source replaying a fixed list of unit values
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<f64>,
    position: usize,
}

impl ScriptedRng {
    pub fn new(values: &[f64]) -> Self {
        assert!(!values.is_empty(), "script needs at least one value");
        Self {
            values: values.to_vec(),
            position: 0,
        }
    }

    /// Always returns `value`
    pub fn constant(value: f64) -> Self {
        Self::new(&[value])
    }
}

impl RandomSource for ScriptedRng {
    fn next_unit(&mut self) -> f64 {
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value
    }
}

/// Report `count` draw actions
pub fn draw<R: RandomSource>(session: &mut GameSession<R>, count: u32) {
    for _ in 0..count {
        session.report_draw_action();
    }
}

/// Event collector for testing event emissions
#[derive(Clone)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Register a clone of this collector on the session
    pub fn attach<R: RandomSource>(&self, session: &mut GameSession<R>) {
        session.add_event_handler(Box::new(self.clone()));
    }

    pub fn get_events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn last_event(&self) -> Option<GameEvent> {
        self.events.lock().unwrap().last().cloned()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn has_event_type(&self, check_fn: impl Fn(&GameEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(check_fn)
    }

    pub fn events_for_round(&self, round_id: RoundId) -> Vec<GameEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.round_id() == Some(round_id))
            .cloned()
            .collect()
    }
}

impl GameEventHandler for EventCollector {
    fn handle_event(&mut self, event: GameEvent) {
        self.events.lock().unwrap().push(event);
    }
}
