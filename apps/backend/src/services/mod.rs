//! Transactional use-cases. Every function here runs inside the caller's
//! transaction and never touches the pool directly.

pub mod debug;
pub mod matchmaking;
pub mod notify;
pub mod sessions;
pub mod users;
