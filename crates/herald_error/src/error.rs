//! Top-level error wrapper types.

use crate::{
    ConfigError, DispatchError, GenerationError, JsonError, ServerError, SocialError, StoreError,
};

/// Every error a Herald operation can produce.
///
/// # Examples
///
/// ```
/// use herald_error::{HeraldError, ConfigError};
///
/// let err: HeraldError = ConfigError::new("bad value").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum HeraldErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration store error
    #[from(StoreError)]
    Store(StoreError),
    /// Credential exchange or submission error
    #[from(SocialError)]
    Social(SocialError),
    /// Content generation error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Trigger input error
    #[from(DispatchError)]
    Dispatch(DispatchError),
    /// Inbound HTTP server error
    #[from(ServerError)]
    Server(ServerError),
}

/// Herald error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Herald Error: {}", _0)]
pub struct HeraldError(Box<HeraldErrorKind>);

impl HeraldError {
    /// Create a new error from a kind.
    pub fn new(kind: HeraldErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &HeraldErrorKind {
        &self.0
    }

    /// True when the failure was caused by the caller's input rather than by
    /// Herald or a remote service.
    pub fn is_client_error(&self) -> bool {
        match self.kind() {
            HeraldErrorKind::Dispatch(e) => e.is_client_error(),
            _ => false,
        }
    }

    /// Message suitable for returning to a remote caller: the error
    /// condition without the source location.
    ///
    /// ```
    /// use herald_error::{HeraldError, DispatchError, DispatchErrorKind};
    ///
    /// let err: HeraldError =
    ///     DispatchError::new(DispatchErrorKind::UnknownPillar("Chaos".into())).into();
    /// assert_eq!(err.message(), "Unknown pillar: Chaos");
    /// ```
    pub fn message(&self) -> String {
        match self.kind() {
            HeraldErrorKind::Config(e) => e.message.clone(),
            HeraldErrorKind::Json(e) => e.message.clone(),
            HeraldErrorKind::Store(e) => e.kind.to_string(),
            HeraldErrorKind::Social(e) => e.kind.to_string(),
            HeraldErrorKind::Generation(e) => e.kind.to_string(),
            HeraldErrorKind::Dispatch(e) => e.kind.to_string(),
            HeraldErrorKind::Server(e) => e.kind.to_string(),
        }
    }
}

impl<T> From<T> for HeraldError
where
    T: Into<HeraldErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Herald operations.
pub type HeraldResult<T> = std::result::Result<T, HeraldError>;
