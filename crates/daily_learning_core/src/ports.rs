//! crates/daily_learning_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the dispatcher's core logic.
//! These traits form the boundary of the hexagonal architecture, keeping the core
//! independent of the concrete document store, mail relay and system clock.

use crate::domain::{DailyLearningRecord, EmailMessage};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (database, SMTP).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Connection failed: {0}")]
    Connection(String),
    #[error("Query failed: {0}")]
    Query(String),
    #[error("Delivery failed: {0}")]
    Delivery(String),
    #[error("Malformed record: {0}")]
    MalformedRecord(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Read-only access to the daily learning records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Finds the record whose `learning_date` is exactly midnight of `date`.
    async fn find_by_learning_date(&self, date: NaiveDate)
        -> PortResult<Option<DailyLearningRecord>>;
}

/// An authenticated outbound mail session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Sends one message to the configured recipient string.
    async fn send(&self, message: &EmailMessage) -> PortResult<()>;
}

/// Source of the current time, so "today" can be pinned in tests.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The production clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
