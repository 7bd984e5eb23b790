//! Simulated guesser.
//!
//! The guesser never looks at the drawing. It becomes more likely to name
//! the target as drawing progress and its own attempt count grow, and its
//! wrong guesses drift from random catalog words towards words of the
//! target's category.

use game_types::{Category, GuessRecord};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::{RandomSource, WordBank};

const MAX_CORRECT_PROBABILITY: f64 = 0.95;
const PROGRESS_WEIGHT: f64 = 0.3;
const ATTEMPT_WEIGHT: f64 = 0.7;
/// The guesser cannot be right before its third attempt.
const MIN_ATTEMPTS_FOR_CORRECT: u32 = 3;
const MIXED_POOL_PREFIX: usize = 20;
const FORCED_CONFIDENCE: u8 = 95;

/// Candidate pool composition, chosen by attempt number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessPhase {
    Exploration, // attempts 1-2
    Mixed,       // attempts 3-5
    WarmingUp,   // attempts 6+
}

impl GuessPhase {
    pub fn for_attempt(attempt: u32) -> Self {
        match attempt {
            0..=2 => GuessPhase::Exploration,
            3..=5 => GuessPhase::Mixed,
            _ => GuessPhase::WarmingUp,
        }
    }
}

/// One guess before it is stamped with a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedGuess {
    pub word: String,
    pub confidence: u8,
    pub is_correct: bool,
}

impl SimulatedGuess {
    pub fn into_record(self, timestamp: String) -> GuessRecord {
        GuessRecord {
            guess: self.word,
            confidence: self.confidence,
            is_correct: self.is_correct,
            timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hint {
    Category(Category),
    Length(usize),
    FirstChar(char),
    Prefix(String),
    Unavailable,
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hint::Category(category) => write!(f, "这是一个{}", category.label()),
            Hint::Length(length) => write!(f, "这个词有 {} 个字", length),
            Hint::FirstChar(first) => write!(f, "第一个字是\"{}\"", first),
            Hint::Prefix(prefix) => write!(f, "开头是\"{}\"", prefix),
            Hint::Unavailable => f.write_str("提示不可用"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GuessSimulator {
    word_bank: Arc<WordBank>,
    target_word: String,
    category: Option<Category>,
    guessed_words: HashSet<String>,
    guess_count: u32,
    hint_level: u32,
    max_guesses: u32,
}

impl GuessSimulator {
    pub fn new(word_bank: Arc<WordBank>, target_word: &str, max_guesses: u32) -> Self {
        let category = word_bank.category_of(target_word);
        Self {
            word_bank,
            target_word: target_word.to_string(),
            category,
            guessed_words: HashSet::new(),
            guess_count: 0,
            hint_level: 0,
            max_guesses: max_guesses.max(1),
        }
    }

    pub fn target_word(&self) -> &str {
        &self.target_word
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn guess_count(&self) -> u32 {
        self.guess_count
    }

    pub fn hint_level(&self) -> u32 {
        self.hint_level
    }

    pub fn has_guessed(&self, word: &str) -> bool {
        self.guessed_words.contains(word)
    }

    /// Probability that the current attempt is correct, ignoring the
    /// minimum-attempt floor.
    pub fn correct_probability(&self, progress: u8) -> f64 {
        let progress_factor = f64::from(progress.min(100)) / 100.0;
        let attempt_factor = f64::from(self.guess_count) / f64::from(self.max_guesses);
        (progress_factor * PROGRESS_WEIGHT + attempt_factor * ATTEMPT_WEIGHT)
            .min(MAX_CORRECT_PROBABILITY)
    }

    /// Produce the next guess for the given drawing progress (0-100).
    pub fn guess<R: RandomSource + ?Sized>(&mut self, progress: u8, rng: &mut R) -> SimulatedGuess {
        let progress = progress.min(100);
        self.guess_count += 1;

        let probability = self.correct_probability(progress);
        let roll = rng.next_unit();
        if roll < probability && self.guess_count >= MIN_ATTEMPTS_FOR_CORRECT {
            let confidence = 80 + (rng.next_unit() * 20.0) as u8;
            debug!(
                "Guess {} correct (roll {:.3} < {:.3})",
                self.guess_count, roll, probability
            );
            return self.correct_guess(confidence.min(99));
        }

        let pool = self.candidate_pool();
        if pool.is_empty() {
            debug!("Candidate pool exhausted after {} guesses", self.guess_count);
            return self.correct_guess(FORCED_CONFIDENCE);
        }

        let pool_size = pool.len();
        let word = pool[rng.next_index(pool_size)].to_string();
        self.guessed_words.insert(word.clone());

        let progress_factor = f64::from(progress) / 100.0;
        let raw = (30.0 + progress_factor * 40.0 + rng.next_unit() * 20.0) as u8;
        let confidence = raw.min(75);

        debug!(
            "Guess {} wrong: '{}' ({:?}, pool {}, confidence {})",
            self.guess_count,
            word,
            GuessPhase::for_attempt(self.guess_count),
            pool_size,
            confidence
        );

        SimulatedGuess {
            word,
            confidence,
            is_correct: false,
        }
    }

    /// Next hint, each call revealing more of the target.
    pub fn hint(&mut self) -> Hint {
        self.hint_level += 1;

        match self.hint_level {
            1 => self.category.map_or(Hint::Unavailable, Hint::Category),
            2 => Hint::Length(self.target_word.chars().count()),
            3 => self
                .target_word
                .chars()
                .next()
                .map_or(Hint::Unavailable, Hint::FirstChar),
            level => {
                let length = self.target_word.chars().count();
                let reveal = (level as usize - 2).min(length.saturating_sub(1));
                Hint::Prefix(self.target_word.chars().take(reveal).collect())
            }
        }
    }

    /// Start over with a new target word.
    pub fn reset(&mut self, new_target_word: &str) {
        self.target_word = new_target_word.to_string();
        self.category = self.word_bank.category_of(new_target_word);
        self.guessed_words.clear();
        self.guess_count = 0;
        self.hint_level = 0;
    }

    fn correct_guess(&self, confidence: u8) -> SimulatedGuess {
        SimulatedGuess {
            word: self.target_word.clone(),
            confidence,
            is_correct: true,
        }
    }

    fn similar_words(&self) -> impl Iterator<Item = &str> {
        let words = match self.category {
            Some(category) => self.word_bank.words_in_category(category),
            None => &[],
        };
        words
            .iter()
            .map(String::as_str)
            .filter(move |w| *w != self.target_word)
    }

    fn exploration_pool(&self) -> Vec<&str> {
        self.word_bank
            .all_words()
            .iter()
            .map(String::as_str)
            .filter(|w| *w != self.target_word && !self.guessed_words.contains(*w))
            .collect()
    }

    fn candidate_pool(&self) -> Vec<&str> {
        match GuessPhase::for_attempt(self.guess_count) {
            GuessPhase::Exploration => self.exploration_pool(),
            GuessPhase::Mixed => {
                let leading = self
                    .word_bank
                    .all_words()
                    .iter()
                    .take(MIXED_POOL_PREFIX)
                    .map(String::as_str);
                self.similar_words()
                    .chain(leading)
                    .filter(|w| *w != self.target_word && !self.guessed_words.contains(*w))
                    .collect()
            }
            GuessPhase::WarmingUp => {
                let similar: Vec<&str> = self
                    .similar_words()
                    .filter(|w| !self.guessed_words.contains(*w))
                    .collect();
                if similar.is_empty() {
                    self.exploration_pool()
                } else {
                    similar
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameRng;

    struct Fixed(f64);

    impl RandomSource for Fixed {
        fn next_unit(&mut self) -> f64 {
            self.0
        }
    }

    fn standard_simulator(target: &str) -> GuessSimulator {
        GuessSimulator::new(Arc::new(WordBank::standard().unwrap()), target, 15)
    }

    #[test]
    fn test_phases() {
        assert_eq!(GuessPhase::for_attempt(1), GuessPhase::Exploration);
        assert_eq!(GuessPhase::for_attempt(2), GuessPhase::Exploration);
        assert_eq!(GuessPhase::for_attempt(3), GuessPhase::Mixed);
        assert_eq!(GuessPhase::for_attempt(5), GuessPhase::Mixed);
        assert_eq!(GuessPhase::for_attempt(6), GuessPhase::WarmingUp);
        assert_eq!(GuessPhase::for_attempt(40), GuessPhase::WarmingUp);
    }

    #[test]
    fn test_probability_is_capped() {
        let mut simulator = standard_simulator("猫");
        simulator.guess_count = 15;
        assert_eq!(simulator.correct_probability(100), MAX_CORRECT_PROBABILITY);

        simulator.guess_count = 3;
        let expected = 0.5 * 0.3 + 3.0 / 15.0 * 0.7;
        assert!((simulator.correct_probability(50) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_certain_roll_still_respects_floor() {
        // A roll of 0.0 beats any positive probability.
        let mut simulator = standard_simulator("猫");
        let mut rng = Fixed(0.0);

        assert!(!simulator.guess(100, &mut rng).is_correct);
        assert!(!simulator.guess(100, &mut rng).is_correct);

        let third = simulator.guess(100, &mut rng);
        assert!(third.is_correct);
        assert_eq!(third.word, "猫");
        assert_eq!(third.confidence, 80);
    }

    #[test]
    fn test_warming_up_stays_in_category() {
        let mut simulator = standard_simulator("猫");
        let mut rng = GameRng::new(5);
        let mut never = Fixed(0.99);

        for _ in 0..5 {
            simulator.guess(40, &mut never);
        }
        for _ in 0..5 {
            let guess = simulator.guess(40, &mut rng);
            if !guess.is_correct {
                assert_eq!(
                    simulator.word_bank.category_of(&guess.word),
                    Some(Category::Animals),
                    "late guess '{}' outside the target category",
                    guess.word
                );
            }
        }
    }

    #[test]
    fn test_hint_progression_for_three_character_word() {
        let mut simulator = standard_simulator("冰淇淋");

        assert_eq!(simulator.hint(), Hint::Category(Category::Food));
        assert_eq!(simulator.hint(), Hint::Length(3));
        assert_eq!(simulator.hint(), Hint::FirstChar('冰'));
        assert_eq!(simulator.hint(), Hint::Prefix("冰淇".to_string()));
        assert_eq!(simulator.hint(), Hint::Prefix("冰淇".to_string()));
    }

    #[test]
    fn test_hint_text() {
        assert_eq!(Hint::Category(Category::Animals).to_string(), "这是一个动物");
        assert_eq!(Hint::Length(2).to_string(), "这个词有 2 个字");
        assert_eq!(Hint::FirstChar('猫').to_string(), "第一个字是\"猫\"");
        assert_eq!(Hint::Prefix("冰淇".into()).to_string(), "开头是\"冰淇\"");
    }

    #[test]
    fn test_unknown_word_has_no_category_hint() {
        let mut simulator = standard_simulator("恐龙");
        assert_eq!(simulator.hint(), Hint::Unavailable);
        assert_eq!(simulator.hint(), Hint::Length(2));
    }

    #[test]
    fn test_reset_clears_round_state() {
        let mut simulator = standard_simulator("猫");
        let mut rng = Fixed(0.99);
        let first = simulator.guess(10, &mut rng);
        simulator.hint();

        simulator.reset("苹果");

        assert_eq!(simulator.target_word(), "苹果");
        assert_eq!(simulator.category(), Some(Category::Food));
        assert_eq!(simulator.guess_count(), 0);
        assert_eq!(simulator.hint_level(), 0);
        assert!(!simulator.has_guessed(&first.word));
    }

    #[test]
    fn test_hints_do_not_change_probability() {
        let mut simulator = standard_simulator("猫");
        let before = simulator.correct_probability(50);
        simulator.hint();
        simulator.hint();
        assert_eq!(simulator.correct_probability(50), before);
    }
}
