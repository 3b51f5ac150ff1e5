use thiserror::Error;

/// Domain-level failures for the Turnstile service.
///
/// Store-side failures live in `turnstile-graph`; every variant here is
/// decided either before the store is touched (Validation,
/// InvalidRelationshipType) or after an explicit check of what the store
/// returned (NotFound, HoursNotSet, OutsideHours).
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed or missing input, rejected before any store call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Relationship-type name failed the allow-list, rejected before any
    /// store call. Type names are the only caller input woven into query
    /// text, so they never reach the store unvalidated.
    #[error("Invalid relationship type: {0}")]
    InvalidRelationshipType(String),

    /// A well-formed request referenced an entity or relationship that does
    /// not exist, or an endpoint that treats an empty result as an error
    /// came back with zero rows.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An hours-gated operation hit an organization whose opening/closing
    /// times were never configured.
    #[error("Operating hours not set: {0}")]
    HoursNotSet(String),

    /// The operating-hours gate rejected the operation.
    #[error("Outside operating hours: {0}")]
    OutsideHours(String),
}
