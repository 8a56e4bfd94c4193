//! Domain layer: pure game logic types and helpers.

pub mod deck;
pub mod room_code;
pub mod session;

#[cfg(test)]
mod test_gens;

// Re-exports for ergonomics
pub use deck::{create_deck, STARTER_TILE};
pub use session::{Move, Placement, Seats, SessionState, TurnOutcome};
