//! Adapters for external dependencies.

pub mod placements_sea;
pub mod rooms_sea;
pub mod sessions_sea;
pub mod users_sea;
