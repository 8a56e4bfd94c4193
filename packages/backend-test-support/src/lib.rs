//! Shared helpers for backend tests: one-time log setup and assertions on
//! RFC 7807 Problem Details responses.

pub mod logging;
pub mod problem_details;

pub use problem_details::{assert_problem, Problem};
