// Remote events API
// The scheduler talks to the server only through `ScheduleApi`

pub mod client;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::models::date_range::DateRange;
use crate::models::event::Event;
use crate::models::routine::Routine;

pub use client::HttpScheduleApi;

/// Broad failure classes reported by the API layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The request could not be sent or the server rejected it.
    NetworkFailure,
    /// The response body did not have the expected shape.
    ParseFailure,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server responded with HTTP status {0}")]
    Status(u16),
    #[error("unexpected response body: {0}")]
    Parse(String),
}

impl ApiError {
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::Network(_) | ApiError::Status(_) => ApiErrorKind::NetworkFailure,
            ApiError::Parse(_) => ApiErrorKind::ParseFailure,
        }
    }
}

/// Remote collaborator holding all durable routine and event state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleApi: Send + Sync {
    async fn fetch_routines(&self) -> Result<Vec<Routine>, ApiError>;

    /// All events overlapping `range`.
    async fn fetch_events(&self, range: &DateRange) -> Result<Vec<Event>, ApiError>;

    async fn create_event(&self, routine_id: &str, date: NaiveDate) -> Result<(), ApiError>;

    async fn delete_event(&self, event_id: i64) -> Result<(), ApiError>;
}
