//! Repository functions for domain layer.

pub mod rooms;
pub mod sessions;
pub mod users;
