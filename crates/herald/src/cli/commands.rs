//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Herald - generate and publish themed Reddit posts on a schedule or on demand
#[derive(Parser, Debug)]
#[command(name = "herald")]
#[command(
    about = "Generate and publish themed Reddit posts on a schedule or on demand",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ./herald.toml when present)
    #[arg(short, long, global = true, env = "HERALD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the HTTP trigger API and run the internal scheduler
    Serve,

    /// Publish one post for a random pillar and post type, then exit
    RunOnce,

    /// Publish one post for the given pillar and post type
    Post {
        /// Pillar name
        #[arg(long)]
        pillar: String,

        /// Post type (discussion, question, tip, story, reflection)
        #[arg(long)]
        post_type: String,
    },

    /// Print the pillar list the bot would use
    Pillars,

    /// Validate configuration and print it with secrets redacted
    CheckConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_post_command_parses_flags() {
        let cli = Cli::parse_from([
            "herald",
            "post",
            "--pillar",
            "Resilience",
            "--post-type",
            "tip",
            "-v",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Post { pillar, post_type } => {
                assert_eq!(pillar, "Resilience");
                assert_eq!(post_type, "tip");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
