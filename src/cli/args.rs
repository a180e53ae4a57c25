//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Args, Parser, Subcommand};

use crate::config::{
    DEFAULT_INSTALL_COMMAND, DEFAULT_MARKER_DIR, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_TEST_COMMAND,
};

/// Breaking Bad API - characters, sightings and the bootstrap pipeline
#[derive(Parser, Debug)]
#[command(name = "breakingbad-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Dotenv file to load (defaults to `.env` when present)
    #[arg(long, global = true, env = "ENV_FILE")]
    pub env_file: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply pending migrations and start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Install, migrate, test and serve, stopping at the first failure
    Bootstrap(BootstrapArgs),
}

/// Listening address shared by `serve` and `bootstrap`
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long, default_value = DEFAULT_SERVER_HOST, env = "SERVER_HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_SERVER_PORT, env = "SERVER_PORT")]
    pub port: u16,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// List pending migrations without applying them
    Plan,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the bootstrap command
#[derive(Parser, Debug)]
pub struct BootstrapArgs {
    /// Directory whose presence means the install already happened
    #[arg(long, default_value = DEFAULT_MARKER_DIR, env = "BOOTSTRAP_MARKER_DIR")]
    pub marker_dir: String,

    /// Development-mode install command
    #[arg(long, default_value = DEFAULT_INSTALL_COMMAND, env = "BOOTSTRAP_INSTALL_CMD")]
    pub install_cmd: String,

    /// Test suite command
    #[arg(long, default_value = DEFAULT_TEST_COMMAND, env = "BOOTSTRAP_TEST_CMD")]
    pub test_cmd: String,

    /// Skip the test stage
    #[arg(long)]
    pub skip_tests: bool,

    #[command(flatten)]
    pub server: ServeArgs,
}

/// Find `--env-file` among raw arguments.
///
/// The dotenv file has to be loaded before clap parses, so that variables it
/// defines reach the `env` fallbacks of every other flag.
pub fn env_file_arg(args: &[String]) -> Option<String> {
    let mut args = args.iter().skip(1).take_while(|a| a.as_str() != "--");
    while let Some(arg) = args.next() {
        if arg == "--env-file" {
            return args.next().cloned();
        }
        if let Some(path) = arg.strip_prefix("--env-file=") {
            return Some(path.to_string());
        }
    }
    None
}
