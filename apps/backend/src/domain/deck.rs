//! Tile deck construction.

use rand::seq::SliceRandom;

/// Tile placed at the origin when a session starts; belongs to neither player.
pub const STARTER_TILE: &str = "starter_y_junction";

/// Tile type id and how many copies go into a fresh deck.
pub const DISTRIBUTION: [(&str, usize); 11] = [
    ("road_straight_ns", 4),
    ("road_straight_nesw", 4),
    ("road_straight_senw", 4),
    ("road_t_junction", 3),
    ("road_curve", 6),
    ("river_straight_ns", 3),
    ("river_straight_nesw", 3),
    ("river_curve", 4),
    ("city_road_1", 3),
    ("city_road_2", 2),
    ("city_full", 1),
];

pub const DECK_SIZE: usize = 37;

/// Fresh deck in table order.
fn ordered_deck() -> Vec<String> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for (tile_id, count) in DISTRIBUTION {
        deck.extend((0..count).map(|_| tile_id.to_string()));
    }
    deck
}

/// Build a shuffled deck holding exactly the tiles in [`DISTRIBUTION`].
pub fn create_deck() -> Vec<String> {
    let mut deck = ordered_deck();
    deck.shuffle(&mut rand::rng());
    deck
}
