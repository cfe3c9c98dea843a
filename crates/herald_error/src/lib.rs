//! Error types for the Herald posting bot.
//!
//! Every fallible Herald operation returns [`HeraldResult`]. The remote-call
//! helpers (credential exchange, generation, submission) and the dispatcher
//! all report through the same type, so callers check one thing.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use herald_error::{HeraldResult, SocialError, SocialErrorKind};
//!
//! fn exchange() -> HeraldResult<String> {
//!     Err(SocialError::new(SocialErrorKind::TokenExchange {
//!         status: 401,
//!         body: "{\"message\": \"Unauthorized\"}".to_string(),
//!     }))?
//! }
//!
//! let err = exchange().unwrap_err();
//! assert!(err.to_string().contains("Unauthorized"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod dispatch;
mod error;
mod generation;
mod json;
mod server;
mod social;
mod store;

pub use config::ConfigError;
pub use dispatch::{DispatchError, DispatchErrorKind};
pub use error::{HeraldError, HeraldErrorKind, HeraldResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use json::JsonError;
pub use server::{ServerError, ServerErrorKind};
pub use social::{SocialError, SocialErrorKind};
pub use store::{StoreError, StoreErrorKind};
