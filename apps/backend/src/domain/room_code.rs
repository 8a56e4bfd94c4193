//! Room identifier generation and validation.
//!
//! Room ids are 6 characters drawn from `A-Z0-9`. They are shown to players,
//! so lookups accept lowercase input and normalise it.

use rand::Rng;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const ROOM_ID_LEN: usize = 6;

/// Generate a random room id. Uniqueness is enforced by the store.
pub fn generate_room_id() -> String {
    let mut rng = rand::rng();
    (0..ROOM_ID_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Upper-case a room id taken from a request.
///
/// `None` when the input cannot name any room; callers report that as an
/// unknown room.
pub fn normalize_room_id(raw: &str) -> Option<String> {
    let id = raw.trim().to_ascii_uppercase();
    (id.len() == ROOM_ID_LEN && id.bytes().all(|b| ALPHABET.contains(&b))).then_some(id)
}
