pub mod config;
pub mod rng;
pub mod word_bank;
pub mod guess_simulator;
pub mod scheduler;
pub mod scoring;
pub mod game_events;
pub mod game_state;

// Re-export main components
pub use config::*;
pub use rng::*;
pub use word_bank::*;
pub use guess_simulator::*;
pub use scheduler::*;
pub use scoring::*;
pub use game_events::*;
pub use game_state::*;
