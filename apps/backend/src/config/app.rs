//! Application configuration loaded from environment variables.

use std::env;

use crate::config::db::DbKind;
use crate::error::AppError;

const DEFAULT_MAX_JSON_PAYLOAD_SIZE: usize = 64 * 1024;

/// Server-level settings for the binary.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_kind: DbKind,
    /// Mount `/debug/*` endpoints
    pub debug_routes: bool,
    pub max_json_payload_size: usize,
}

impl Config {
    /// Load and validate all configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port_str = env::var("BACKEND_PORT").unwrap_or_else(|_| "3001".to_string());
        let port = port_str.parse::<u16>().map_err(|_| {
            AppError::config(format!(
                "BACKEND_PORT must be a valid port number, got '{port_str}'"
            ))
        })?;

        let db_kind = match env::var("HEXLINK_DB_KIND") {
            Ok(raw) => DbKind::parse(&raw).ok_or_else(|| {
                AppError::config(format!(
                    "HEXLINK_DB_KIND must be one of postgres, sqlite-file, sqlite-memory; got '{raw}'"
                ))
            })?,
            Err(_) => DbKind::Postgres,
        };

        let debug_routes = env::var("HEXLINK_DEBUG_ROUTES")
            .map(|v| flag_enabled(&v))
            .unwrap_or(false);

        let max_json_payload_size = env::var("MAX_JSON_PAYLOAD_SIZE")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_JSON_PAYLOAD_SIZE);

        Ok(Config {
            host,
            port,
            db_kind,
            debug_routes,
            max_json_payload_size,
        })
    }
}

fn flag_enabled(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
