mod common;

use common::*;
use game_types::{Category, GameStatus};

#[test]
fn test_session_creation() {
    let session = create_session(1);
    assert_eq!(session.status(), GameStatus::Idle);
    assert_eq!(session.score(), 0);
    assert_eq!(session.round_number(), 1);
}

#[test]
fn test_standard_bank() {
    let bank = create_standard_bank();
    assert_eq!(bank.len(), 120);
    for category in Category::ALL {
        assert_eq!(bank.words_in_category(category).len(), 20);
    }
}

#[test]
fn test_tiny_bank() {
    let bank = create_tiny_bank();
    assert_eq!(bank.all_words(), &["猫", "狗", "苹果"]);
    assert_eq!(bank.category_of("苹果"), Some(Category::Food));
}

#[test]
fn test_scripted_rng_cycles() {
    use game_core::RandomSource;

    let mut rng = ScriptedRng::new(&[0.1, 0.2]);
    assert_eq!(rng.next_unit(), 0.1);
    assert_eq!(rng.next_unit(), 0.2);
    assert_eq!(rng.next_unit(), 0.1);
}
