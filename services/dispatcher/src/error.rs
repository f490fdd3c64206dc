//! services/dispatcher/src/error.rs
//!
//! Defines the primary error type for the dispatcher service.
//!
//! Every variant is fatal for the invocation it occurs in: it propagates out
//! of the handler and the runtime reports the invocation as failed. Mail send
//! failures never show up here, they are reported in the response instead.

use crate::config::ConfigError;
use daily_learning_core::ports::PortError;

/// The primary error type for the `dispatcher` service.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents an error from the MongoDB driver outside of a port call.
    #[error("Database Error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// Represents a failure to read or write the invocation payload.
    #[error("Serialization Error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Represents a standard Input/Output error (e.g., reading an event file).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
