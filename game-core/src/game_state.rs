use chrono::{DateTime, Utc};
use game_types::{
    ActionResult, Category, GameError, GameSnapshot, GameStatus, GuessRecord, PlayerAction,
    RoundId,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    GameConfig, GameEvent, GameEventBus, GameEventHandler, GameRng, GuessSimulator, RandomSource,
    ScheduledTimer, Scheduler, ScoringEngine, TimerId, TimerKind, WordBank,
};

/// State of the round currently on the board. Replaced wholesale when a
/// new round starts.
#[derive(Debug)]
pub struct Round {
    pub id: RoundId,
    pub target_word: String,
    pub category: Category,
    pub started_at: DateTime<Utc>,
    pub time_remaining: u32,
    pub stroke_count: u32,
    pub drawing_progress: u8,
    pub guesses: Vec<GuessRecord>,
    pub word_revealed: bool,
    pub hints_used: u32,
    simulator: GuessSimulator,
    guess_timer: Option<TimerId>,
}

impl Round {
    pub fn word_length(&self) -> u32 {
        self.target_word.chars().count() as u32
    }

    pub fn guess_pending(&self) -> bool {
        self.guess_timer.is_some()
    }
}

/// The whole game: score, round counter and the active round, driven by
/// explicit commands and by [`GameSession::advance`].
#[derive(Debug)]
pub struct GameSession<R: RandomSource = GameRng> {
    config: GameConfig,
    word_bank: Arc<WordBank>,
    rng: R,
    scheduler: Scheduler,
    epoch: DateTime<Utc>,
    status: GameStatus,
    score: u32,
    round_number: u32,
    round: Option<Round>,
    event_bus: GameEventBus,
}

impl GameSession<GameRng> {
    /// Session with a seeded ChaCha RNG, starting its clock now.
    pub fn with_seed(word_bank: Arc<WordBank>, config: GameConfig, seed: u64) -> Self {
        Self::new(word_bank, config, GameRng::new(seed), Utc::now())
    }
}

impl<R: RandomSource> GameSession<R> {
    pub fn new(word_bank: Arc<WordBank>, config: GameConfig, rng: R, epoch: DateTime<Utc>) -> Self {
        Self {
            config,
            word_bank,
            rng,
            scheduler: Scheduler::new(),
            epoch,
            status: GameStatus::Idle,
            score: 0,
            round_number: 1,
            round: None,
            event_bus: GameEventBus::new(),
        }
    }

    pub fn add_event_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.event_bus.add_handler(handler);
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// The current target word. Not subject to the reveal policy.
    pub fn target_word(&self) -> Option<&str> {
        self.round.as_ref().map(|r| r.target_word.as_str())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn now(&self) -> DateTime<Utc> {
        chrono::Duration::from_std(self.scheduler.now())
            .ok()
            .and_then(|elapsed| self.epoch.checked_add_signed(elapsed))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Begin a round with a random word. Allowed from idle, won or lost.
    pub fn start(&mut self) -> Result<GameSnapshot, GameError> {
        self.ensure_can_start("start")?;
        let (word, category) = self.word_bank.random_word(&mut self.rng);
        self.begin_round(word, category);
        Ok(self.snapshot())
    }

    /// Begin a round with a chosen catalog word. Allowed from idle, won or lost.
    pub fn start_with_word(&mut self, word: &str) -> Result<GameSnapshot, GameError> {
        self.ensure_can_start("start")?;
        let category = self
            .word_bank
            .category_of(word)
            .ok_or_else(|| GameError::UnknownWord {
                word: word.to_string(),
            })?;
        self.begin_round(word.to_string(), category);
        Ok(self.snapshot())
    }

    /// Move on after a finished round.
    pub fn next_round(&mut self) -> Result<GameSnapshot, GameError> {
        if !self.status.is_round_over() {
            warn!("Rejected next round while {}", self.status);
            return Err(GameError::invalid_state("start the next round", self.status));
        }
        self.round_number += 1;
        let (word, category) = self.word_bank.random_word(&mut self.rng);
        self.begin_round(word, category);
        Ok(self.snapshot())
    }

    /// Back to round 1 with a zero score, from any state.
    pub fn reset_game(&mut self) -> GameSnapshot {
        self.cancel_round_timers();
        self.score = 0;
        self.round_number = 1;
        self.event_bus.publish(GameEvent::GameReset);
        info!("Game reset");

        let (word, category) = self.word_bank.random_word(&mut self.rng);
        self.begin_round(word, category);
        self.snapshot()
    }

    /// One atomic drawing action from the canvas. Ignored unless playing.
    pub fn report_draw_action(&mut self) -> GameSnapshot {
        if self.status != GameStatus::Playing {
            debug!("Ignoring draw action while {}", self.status);
            return self.snapshot();
        }

        if let Some(round) = self.round.as_mut() {
            round.stroke_count = round.stroke_count.saturating_add(1);
            let progress = ScoringEngine::drawing_progress(round.stroke_count, &self.config);
            round.drawing_progress = round.drawing_progress.max(progress);

            self.event_bus.publish(GameEvent::DrawProgress {
                round_id: round.id,
                stroke_count: round.stroke_count,
                progress: round.drawing_progress,
            });
        }

        self.arm_guess_timer();
        self.snapshot()
    }

    /// Spend points for a hint. Only while playing.
    pub fn request_hint(&mut self) -> Result<String, GameError> {
        if self.status != GameStatus::Playing {
            warn!("Rejected hint request while {}", self.status);
            return Err(GameError::invalid_state("request a hint", self.status));
        }
        let Some(round) = self.round.as_mut() else {
            return Err(GameError::invalid_state("request a hint", self.status));
        };

        self.score = ScoringEngine::apply_hint_cost(self.score, &self.config);
        let hint = round.simulator.hint().to_string();
        round.hints_used += 1;

        info!("Hint {} for round {}: {}", round.hints_used, round.id, hint);
        self.event_bus.publish(GameEvent::HintRevealed {
            round_id: round.id,
            level: round.simulator.hint_level(),
            hint: hint.clone(),
            score: self.score,
        });

        Ok(hint)
    }

    /// Let the player see the word they are drawing. Only while playing.
    pub fn reveal_word(&mut self) -> Result<GameSnapshot, GameError> {
        if self.status != GameStatus::Playing {
            return Err(GameError::invalid_state("reveal the word", self.status));
        }
        if let Some(round) = self.round.as_mut() {
            if !round.word_revealed {
                round.word_revealed = true;
                self.event_bus.publish(GameEvent::WordRevealed {
                    round_id: round.id,
                    word: round.target_word.clone(),
                });
            }
        }
        Ok(self.snapshot())
    }

    /// Move virtual time forward, firing every timer that falls due.
    pub fn advance(&mut self, elapsed: Duration) -> GameSnapshot {
        let horizon = self.scheduler.now().saturating_add(elapsed);
        while let Some(timer) = self.scheduler.pop_due(horizon) {
            self.fire(timer);
        }
        self.scheduler.advance_to(horizon);
        self.snapshot()
    }

    pub fn apply(&mut self, action: PlayerAction) -> Result<ActionResult, GameError> {
        let mut hint = None;
        let snapshot = match action {
            PlayerAction::Start => self.start()?,
            PlayerAction::Draw { count } => {
                for _ in 0..count {
                    self.report_draw_action();
                }
                self.snapshot()
            }
            PlayerAction::RequestHint => {
                hint = Some(self.request_hint()?);
                self.snapshot()
            }
            PlayerAction::RevealWord => self.reveal_word()?,
            PlayerAction::NextRound => self.next_round()?,
            PlayerAction::ResetGame => self.reset_game(),
        };
        Ok(ActionResult { snapshot, hint })
    }

    pub fn snapshot(&self) -> GameSnapshot {
        match &self.round {
            Some(round) => {
                let show_word = round.word_revealed || self.status.is_round_over();
                GameSnapshot {
                    status: self.status,
                    round_id: Some(round.id),
                    round_number: self.round_number,
                    score: self.score,
                    time_remaining: round.time_remaining,
                    time_is_low: self.status == GameStatus::Playing
                        && round.time_remaining <= self.config.low_time_threshold,
                    drawing_progress: round.drawing_progress,
                    category: Some(round.category),
                    word: show_word.then(|| round.target_word.clone()),
                    word_length: round.word_length(),
                    guesses: round.guesses.clone(),
                    guess_count: round.guesses.len() as u32,
                    hints_used: round.hints_used,
                    started_at: Some(round.started_at.to_rfc3339()),
                }
            }
            None => GameSnapshot {
                status: self.status,
                round_id: None,
                round_number: self.round_number,
                score: self.score,
                time_remaining: self.config.round_seconds,
                time_is_low: false,
                drawing_progress: 0,
                category: None,
                word: None,
                word_length: 0,
                guesses: Vec::new(),
                guess_count: 0,
                hints_used: 0,
                started_at: None,
            },
        }
    }

    fn ensure_can_start(&self, action: &str) -> Result<(), GameError> {
        if self.status.can_start_round() {
            Ok(())
        } else {
            warn!("Rejected {} while {}", action, self.status);
            Err(GameError::invalid_state(action, self.status))
        }
    }

    fn begin_round(&mut self, word: String, category: Category) {
        // Nothing from the previous round may fire into this one.
        self.cancel_round_timers();

        let id = Uuid::new_v4();
        let simulator = GuessSimulator::new(self.word_bank.clone(), &word, self.config.max_guesses);
        let round = Round {
            id,
            target_word: word,
            category,
            started_at: self.now(),
            time_remaining: self.config.round_seconds,
            stroke_count: 0,
            drawing_progress: 0,
            guesses: Vec::new(),
            word_revealed: false,
            hints_used: 0,
            simulator,
            guess_timer: None,
        };

        info!(
            "Round {} started: category {}, {} characters",
            self.round_number,
            category,
            round.word_length()
        );
        self.event_bus.publish(GameEvent::RoundStarted {
            round_id: id,
            round_number: self.round_number,
            category,
            word_length: round.word_length(),
        });

        self.round = Some(round);
        self.status = GameStatus::Playing;
        self.scheduler
            .schedule(self.config.tick_interval(), TimerKind::Tick, id);
        self.arm_guess_timer();
    }

    /// Schedule the next guess if none is pending and the drawing is far
    /// enough along.
    fn arm_guess_timer(&mut self) {
        if self.status != GameStatus::Playing {
            return;
        }
        let Some(round) = self.round.as_mut() else {
            return;
        };
        if round.guess_timer.is_some()
            || round.drawing_progress < self.config.guess_progress_threshold
        {
            return;
        }

        let delay = self.config.guess_delay(self.rng.next_unit());
        round.guess_timer = Some(self.scheduler.schedule(delay, TimerKind::Guess, round.id));
        debug!("Next guess in {:?}", delay);
    }

    fn cancel_round_timers(&mut self) {
        if let Some(round) = self.round.as_mut() {
            round.guess_timer = None;
            let cancelled = self.scheduler.cancel_round(round.id);
            if cancelled > 0 {
                debug!("Cancelled {} timers of round {}", cancelled, round.id);
            }
        }
    }

    fn fire(&mut self, timer: ScheduledTimer) {
        let is_current = self.round.as_ref().is_some_and(|r| r.id == timer.round_id);
        if !is_current || self.status != GameStatus::Playing {
            debug!("Dropping stale {:?} timer of round {}", timer.kind, timer.round_id);
            return;
        }

        match timer.kind {
            TimerKind::Tick => self.on_tick(),
            TimerKind::Guess => self.on_guess(),
        }
    }

    fn on_tick(&mut self) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        round.time_remaining = round.time_remaining.saturating_sub(1);

        if round.time_remaining == 0 {
            self.finish_lost();
        } else {
            let id = round.id;
            self.scheduler
                .schedule(self.config.tick_interval(), TimerKind::Tick, id);
        }
    }

    fn on_guess(&mut self) {
        let timestamp = self.now().to_rfc3339();
        let Some(round) = self.round.as_mut() else {
            return;
        };
        round.guess_timer = None;

        if round.drawing_progress < self.config.guess_progress_threshold {
            return;
        }

        let guess = round.simulator.guess(round.drawing_progress, &mut self.rng);
        let record = guess.into_record(timestamp);
        let is_correct = record.is_correct;
        round.guesses.push(record.clone());

        self.event_bus.publish(GameEvent::GuessMade {
            round_id: round.id,
            guess_number: round.guesses.len() as u32,
            record,
        });

        if is_correct {
            self.finish_won();
        } else {
            self.arm_guess_timer();
        }
    }

    fn finish_won(&mut self) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        let points = ScoringEngine::win_bonus(round.time_remaining, self.round_number, &self.config);
        self.score = self.score.saturating_add(points);
        self.status = GameStatus::Won;
        round.guess_timer = None;
        self.scheduler.cancel_round(round.id);

        info!(
            "Round {} won with {}s left: +{} points (score {})",
            self.round_number, round.time_remaining, points, self.score
        );
        self.event_bus.publish(GameEvent::RoundWon {
            round_id: round.id,
            word: round.target_word.clone(),
            time_remaining: round.time_remaining,
            points_awarded: points,
            score: self.score,
        });
    }

    fn finish_lost(&mut self) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        round.time_remaining = 0;
        self.status = GameStatus::Lost;
        round.guess_timer = None;
        self.scheduler.cancel_round(round.id);

        info!("Round {} lost: time ran out", self.round_number);
        self.event_bus.publish(GameEvent::RoundLost {
            round_id: round.id,
            word: round.target_word.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_session(seed: u64) -> GameSession {
        let bank = Arc::new(WordBank::standard().unwrap());
        GameSession::with_seed(bank, GameConfig::default(), seed)
    }

    #[test]
    fn test_session_creation() {
        let session = create_test_session(1);
        assert_eq!(session.status(), GameStatus::Idle);
        assert_eq!(session.score(), 0);
        assert_eq!(session.round_number(), 1);
        assert!(session.round().is_none());

        let snapshot = session.snapshot();
        assert_eq!(snapshot.time_remaining, 60);
        assert!(snapshot.word.is_none());
    }

    #[test]
    fn test_start_resets_round_state() {
        let mut session = create_test_session(2);
        let snapshot = session.start().unwrap();

        assert_eq!(snapshot.status, GameStatus::Playing);
        assert_eq!(snapshot.time_remaining, 60);
        assert_eq!(snapshot.drawing_progress, 0);
        assert!(snapshot.guesses.is_empty());
        assert!(snapshot.word.is_none());
        assert!(snapshot.category.is_some());
        assert_eq!(session.scheduler().pending(), 1); // tick only
    }

    #[test]
    fn test_start_rejected_while_playing() {
        let mut session = create_test_session(3);
        session.start().unwrap();

        let err = session.start().unwrap_err();
        assert_eq!(
            err,
            GameError::invalid_state("start", GameStatus::Playing)
        );
        assert!(session.next_round().is_err());
    }

    #[test]
    fn test_unknown_word_rejected() {
        let mut session = create_test_session(4);
        let err = session.start_with_word("恐龙").unwrap_err();
        assert!(matches!(err, GameError::UnknownWord { .. }));
        assert_eq!(session.status(), GameStatus::Idle);
    }

    #[test]
    fn test_guess_timer_armed_at_threshold() {
        let mut session = create_test_session(5);
        session.start().unwrap();

        for _ in 0..4 {
            session.report_draw_action();
        }
        assert!(!session.round().unwrap().guess_pending());

        session.report_draw_action();
        let round = session.round().unwrap();
        assert_eq!(round.drawing_progress, 10);
        assert!(round.guess_pending());
        assert_eq!(session.scheduler().pending(), 2);

        // Further strokes do not stack more guess timers.
        session.report_draw_action();
        assert_eq!(session.scheduler().pending(), 2);
    }

    #[test]
    fn test_reveal_policy() {
        let mut session = create_test_session(6);
        session.start_with_word("猫").unwrap();
        assert!(session.snapshot().word.is_none());
        assert_eq!(session.target_word(), Some("猫"));

        let snapshot = session.reveal_word().unwrap();
        assert_eq!(snapshot.word.as_deref(), Some("猫"));
    }

    #[test]
    fn test_time_is_low_flag() {
        let mut session = create_test_session(7);
        session.start().unwrap();
        assert!(!session.snapshot().time_is_low);

        let snapshot = session.advance(Duration::from_secs(50));
        assert_eq!(snapshot.time_remaining, 10);
        assert!(snapshot.time_is_low);
    }
}
