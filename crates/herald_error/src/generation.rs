//! Content generation error types.

/// Failures of the text generation step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// Transport failure before a response arrived
    #[display("Generation request failed: {}", _0)]
    Http(String),

    /// Provider answered with a non-success status
    #[display("Generation provider returned HTTP {}: {}", status, body)]
    Api {
        /// HTTP status code
        status: u16,
        /// Remote response body
        body: String,
    },

    /// Provider response contained no text
    #[display("Generation provider returned no text")]
    EmptyResponse,

    /// Provider response envelope could not be decoded
    #[display("Failed to decode provider response: {}", _0)]
    Decode(String),

    /// Text was returned but no title/content could be extracted
    #[display("Generated text could not be parsed into a post ({} chars)", length)]
    Unparsable {
        /// Length of the unparsable reply
        length: usize,
    },
}

/// Generation error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The error kind
    pub kind: GenerationErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
