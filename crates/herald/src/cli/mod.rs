//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the herald binary.

mod commands;
mod handlers;

pub use commands::{Cli, Commands};
pub use handlers::{check_config, list_pillars, post_once, run_once, serve};
