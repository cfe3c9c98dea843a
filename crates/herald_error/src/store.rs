//! Configuration store error types.

/// Specific configuration store failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StoreErrorKind {
    /// Transport failure talking to a remote store
    #[display("Store request failed: {}", _0)]
    Http(String),

    /// Remote store answered with a non-success status
    #[display("Store returned HTTP {}: {}", status, body)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body as returned by the store
        body: String,
    },

    /// Local store could not be read
    #[display("Store I/O error: {}", _0)]
    Io(String),

    /// Store address could not be built
    #[display("Invalid store URL: {}", _0)]
    InvalidUrl(String),

    /// Stored value is not a recognized pillar list
    #[display("Stored value could not be parsed: {}", _0)]
    Parse(String),
}

/// Configuration store error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Store Error: {} at line {} in {}", kind, line, file)]
pub struct StoreError {
    /// The error kind
    pub kind: StoreErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl StoreError {
    /// Create a new StoreError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoreErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
