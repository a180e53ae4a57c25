//! Breaking Bad API - characters, their sightings and a bootstrap pipeline
//!
//! A REST API over two resources, characters and the locations where they
//! were seen, with a geographic "near" search. The `bootstrap` command takes
//! a fresh checkout to a running server.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **bootstrap**: Fail-fast install/migrate/test/serve pipeline
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and geographic math
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, repositories)
//! - **api**: HTTP handlers, extractors and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Install, migrate, test and serve on 0.0.0.0:8000
//! cargo run -- bootstrap
//!
//! # Start the server
//! cargo run -- serve
//!
//! # Show pending migrations
//! cargo run -- migrate plan
//! ```

pub mod api;
pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Character, Location};
pub use errors::{AppError, AppResult};
