//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `migrate` - Database migrations
//! - `bootstrap` - Install, migrate, test and serve in one go

pub mod args;

pub use args::{env_file_arg, Cli, Commands};
