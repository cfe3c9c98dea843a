//! Trigger dispatcher error types.

/// Errors raised while resolving a trigger's inputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum DispatchErrorKind {
    /// Requested pillar is not in the configured list
    #[display("Unknown pillar: {}", _0)]
    UnknownPillar(String),

    /// Requested post type is not one of the supported types
    #[display("Unknown post type: {} (expected one of: {})", given, expected)]
    UnknownPostType {
        /// Value supplied by the caller
        given: String,
        /// Comma-separated list of accepted values
        expected: String,
    },

    /// Neither the store nor the fallback supplied any pillar
    #[display("No pillars available")]
    NoPillars,
}

/// Dispatch error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Dispatch Error: {} at line {} in {}", kind, line, file)]
pub struct DispatchError {
    /// The error kind
    pub kind: DispatchErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl DispatchError {
    /// Create a new DispatchError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: DispatchErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether the caller supplied bad input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self.kind,
            DispatchErrorKind::UnknownPillar(_) | DispatchErrorKind::UnknownPostType { .. }
        )
    }
}
