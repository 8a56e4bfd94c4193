//! Configuration loaded from environment variables.

pub mod app;
pub mod db;

pub use app::Config;
