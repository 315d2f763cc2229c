use crate::types::DbId;

/// Domain error taxonomy for the reservation engine.
///
/// Every variant is recoverable at the caller; the HTTP mapping lives in
/// the api crate's `AppError`. There are no fatal errors in this core.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The requested date range is malformed (check_out <= check_in, or
    /// a check-in in the past for booking flows).
    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    /// The range conflicts with an existing reservation or manual block,
    /// whether detected by a pre-check or by a storage-level unique
    /// constraint violation.
    #[error("Range not available: {0}")]
    RangeNotAvailable(String),

    /// Illegal reservation status change, e.g. `completed -> pending`.
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}
