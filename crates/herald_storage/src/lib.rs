//! Key-value configuration store backends for Herald.
//!
//! The pipeline reads exactly one key from the store: a JSON array of
//! pillars. From the pipeline's perspective every backend is read-only.
//!
//! # Backends
//!
//! - [`FileConfigStore`]: a local JSON object file mapping keys to values
//! - [`CloudflareKvStore`]: a Workers KV namespace over the REST API
//! - [`MemoryConfigStore`]: an in-process map, for tests and static setups

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cloudflare;
mod file;
mod memory;
mod record;
mod store;

pub use cloudflare::{CLOUDFLARE_API_BASE, CloudflareKvConfig, CloudflareKvStore};
pub use file::FileConfigStore;
pub use memory::MemoryConfigStore;
pub use record::{load_pillars, parse_pillars};
pub use store::{ConfigStore, DEFAULT_PILLARS_KEY};
