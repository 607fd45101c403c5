// File: crates/termcandle-core/src/error.rs
// Summary: Error type for bar construction and configuration.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    #[error("invalid bar at {timestamp}: {reason}")]
    InvalidBar { timestamp: i64, reason: &'static str },

    #[error("invalid value {value:?} for {key}: {reason}")]
    Config {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("unknown theme {0:?}")]
    UnknownTheme(String),
}

pub type Result<T> = std::result::Result<T, ChartError>;
