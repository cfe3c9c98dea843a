//! Social platform (Reddit) error types.

/// Failures of the credential exchange and post submission calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SocialErrorKind {
    /// Transport failure before a response arrived
    #[display("Platform request failed: {}", _0)]
    Http(String),

    /// Token endpoint refused the credentials
    #[display("Token exchange failed (HTTP {}): {}", status, body)]
    TokenExchange {
        /// HTTP status code
        status: u16,
        /// Remote response body
        body: String,
    },

    /// Submission endpoint rejected the post
    #[display("Submission failed (HTTP {}): {}", status, body)]
    Submission {
        /// HTTP status code
        status: u16,
        /// Remote response body
        body: String,
    },

    /// Response could not be decoded
    #[display("Failed to parse platform response: {}", _0)]
    Parse(String),
}

impl SocialErrorKind {
    /// Remote response body, when the platform sent one.
    pub fn remote_body(&self) -> Option<&str> {
        match self {
            SocialErrorKind::TokenExchange { body, .. }
            | SocialErrorKind::Submission { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Social platform error with source location tracking.
///
/// # Examples
///
/// ```
/// use herald_error::{SocialError, SocialErrorKind};
///
/// let err = SocialError::new(SocialErrorKind::Submission {
///     status: 403,
///     body: "SUBREDDIT_NOTALLOWED".to_string(),
/// });
/// assert_eq!(err.kind.remote_body(), Some("SUBREDDIT_NOTALLOWED"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Social Error: {} at line {} in {}", kind, line, file)]
pub struct SocialError {
    /// The kind of error that occurred
    pub kind: SocialErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl SocialError {
    /// Create a new SocialError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SocialErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
