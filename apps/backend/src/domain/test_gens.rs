// Proptest generators for session types.

use proptest::prelude::*;

use crate::domain::deck::DISTRIBUTION;
use crate::domain::session::Move;

/// A tile type id from the deck table
pub fn tile_id() -> impl Strategy<Value = String> {
    proptest::sample::select(DISTRIBUTION.map(|(id, _)| id).to_vec())
        .prop_map(|id: &str| id.to_string())
}

/// An arbitrary placement; positions and rotations are not validated
pub fn any_move() -> impl Strategy<Value = Move> {
    let rotation = prop_oneof![Just(0i32), Just(60), Just(120), Just(180), Just(240), Just(300)];
    (-20i32..=20, -20i32..=20, tile_id(), rotation).prop_map(|(q, r, tile_id, rotation)| Move {
        q,
        r,
        tile_id,
        rotation,
    })
}

/// A sequence of placements long enough to exhaust a full deck
pub fn moves(max: usize) -> impl Strategy<Value = Vec<Move>> {
    proptest::collection::vec(any_move(), 1..=max)
}
