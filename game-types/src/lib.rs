pub mod game;
pub mod messages;
pub mod errors;

// Re-export all types
pub use game::*;
pub use messages::*;
pub use errors::*;

/// Identifies one round; every scheduled timer is tagged with it.
pub type RoundId = uuid::Uuid;
