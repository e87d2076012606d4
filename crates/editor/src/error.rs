//! Editor error types.

use thiserror::Error;

/// Errors raised by the editor state machines.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The suggested responses list already holds the maximum of 5 entries.
    #[error("suggested responses are limited to 5 entries")]
    SuggestedResponseLimit,

    /// A list operation referenced a position that does not exist.
    #[error("no suggested response at index {0}")]
    IndexOutOfRange(usize),

    /// Save was requested while fields still carry validation errors.
    #[error("cannot save: {count} field(s) have validation errors")]
    ValidationPending { count: usize },
}
