use thiserror::Error;

pub const CONNECT_FAILED: &str = "Failed to connect to the API server. Make sure it is running.";
pub const REFRESH_FAILED: &str = "Failed to refresh data from the API.";
pub const ADD_EMPLOYEE_FAILED: &str = "Failed to add employee";
pub const APPLY_LEAVE_FAILED: &str = "Failed to apply for leave";
pub const UPDATE_STATUS_FAILED: &str = "Failed to update leave status";
pub const DETAIL_FAILED: &str = "Could not fetch latest employee details.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// initial load failed, nothing committed yet
    Connectivity,
    /// a later load failed, the last good snapshot is kept
    Refresh,
    /// a create request was rejected or could not be built
    Validation,
    /// a status change or detail read failed
    Action,
}

/// The only failure the controller ever sees. Transport errors are folded
/// into one of the four kinds at the loader / coordinator boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SyncError {
    pub kind: ErrorKind,
    pub message: String,
}

impl SyncError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn connectivity() -> Self {
        Self::new(ErrorKind::Connectivity, CONNECT_FAILED)
    }

    pub fn refresh() -> Self {
        Self::new(ErrorKind::Refresh, REFRESH_FAILED)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn action(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Action, message)
    }

    /// Connectivity errors replace the whole view; the rest are shown
    /// alongside the data.
    pub fn is_fatal(&self) -> bool {
        self.kind == ErrorKind::Connectivity
    }
}
