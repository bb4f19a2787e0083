//! Error types for decoding diagnostic events.

use thiserror::Error;

/// Result type for event decoding.
pub type EventResult<T> = Result<T, EventError>;

/// Errors raised while turning serialized frames into [`crate::DiagnosticEvent`]s.
///
/// Comparison outcomes are never errors; they are reported as
/// [`crate::VerificationResult`] data.
#[derive(Debug, Error)]
pub enum EventError {
    /// Malformed JSON or a value outside the frame layout.
    #[error("invalid diagnostic event json: {0}")]
    Json(#[from] serde_json::Error),

    /// The same sensor id appears twice in one value table.
    #[error("duplicate sensor id {id} in {table}")]
    DuplicateSensor { table: &'static str, id: i32 },
}

impl EventError {
    /// Returns true if this error came from a duplicated sensor id.
    pub fn is_duplicate_sensor(&self) -> bool {
        matches!(self, Self::DuplicateSensor { .. })
    }
}
