//! Breaking Bad API - Application entry point
//!
//! CLI-based entry point that dispatches to various commands.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use breakingbad_api::{
    cli::{env_file_arg, Cli, Commands},
    commands,
    config::Config,
};

#[tokio::main]
async fn main() {
    // Load the dotenv file first so clap's env fallbacks can see it
    let args: Vec<String> = std::env::args().collect();
    let env_file = env_file_arg(&args).or_else(|| std::env::var("ENV_FILE").ok());
    let env_loaded = Config::load_env_file(env_file.as_deref());

    // Parse CLI arguments
    let cli = Cli::parse_from(args);

    // Initialize tracing (verbose mode sets debug level)
    init_tracing(cli.verbose);

    if let (Some(path), Err(e)) = (env_file.as_deref(), &env_loaded) {
        tracing::warn!("Could not load env file {}: {}", path, e);
    }

    // Load configuration
    let config = Config::from_env();
    tracing::debug!(?config, "Configuration loaded");

    // Execute command
    let result = match cli.command {
        Commands::Serve(args) => commands::serve::execute(args, config).await,
        Commands::Migrate(args) => commands::migrate::execute(args, config).await,
        Commands::Bootstrap(args) => commands::bootstrap::execute(args, config).await,
    };

    // Failed external commands propagate their own exit code
    if let Err(e) = result {
        tracing::error!("Command failed: {}", e);
        std::process::exit(e.exit_code());
    }
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
