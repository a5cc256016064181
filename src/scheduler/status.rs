use crate::services::api::ApiError;
use crate::services::notification::SyncOperation;

/// Non-blocking indicator of remote activity and the most recent failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStatus {
    pub is_fetching: bool,
    pub last_error: Option<SyncFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncFailure {
    pub operation: SyncOperation,
    pub error: ApiError,
}

impl SyncStatus {
    pub fn record_failure(&mut self, operation: SyncOperation, error: ApiError) {
        self.last_error = Some(SyncFailure { operation, error });
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Clear the recorded failure only if it came from `operation`.
    pub fn clear_error_for(&mut self, operation: SyncOperation) {
        if self
            .last_error
            .as_ref()
            .is_some_and(|failure| failure.operation == operation)
        {
            self.last_error = None;
        }
    }

    /// Short text for a status line, `None` when there is nothing to show.
    pub fn message(&self) -> Option<String> {
        if self.is_fetching {
            return Some("Fetching data...".to_string());
        }
        self.last_error
            .as_ref()
            .map(|failure| format!("{:?} failed: {}", failure.operation, failure.error))
    }
}
