//! Error types for plandash.

use thiserror::Error;

/// Errors that can occur in plandash operations.
///
/// Feed errors propagate to the caller that started the import. Storage
/// errors are swallowed by [`crate::store::DashboardStore`] and only logged.
#[derive(Error, Debug)]
pub enum PlanDashError {
    #[error("Could not parse calendar feed: {0}")]
    FeedParse(String),

    #[error("Could not fetch calendar feed: {0}")]
    FeedFetch(String),

    #[error("Could not read dashboard storage: {0}")]
    StorageRead(String),

    #[error("Could not write dashboard storage: {0}")]
    StorageWrite(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for plandash operations.
pub type PlanDashResult<T> = Result<T, PlanDashError>;
