//! Bootstrap command - Install, migrate, test and serve.
//!
//! ## Usage
//!
//! ```bash
//! # Full pipeline on 0.0.0.0:8000
//! breakingbad-api bootstrap
//!
//! # Skip the test suite
//! breakingbad-api bootstrap --skip-tests
//! ```

use crate::bootstrap::{
    ApplyMigrationsStep, ExternalCommand, InstallStep, Pipeline, PlanMigrationsStep, ServeStep,
    SharedDatabase, TestStep,
};
use crate::cli::args::BootstrapArgs;
use crate::config::Config;
use crate::errors::AppResult;

/// Execute the bootstrap command
pub async fn execute(args: BootstrapArgs, config: Config) -> AppResult<()> {
    let pipeline = build_pipeline(args, config)?;
    tracing::debug!(stages = ?pipeline.stages(), "Bootstrap pipeline assembled");

    pipeline.run().await
}

/// Assemble the stages from the CLI arguments.
///
/// Nothing connects here; the database is opened by the first stage that
/// needs it and then shared with the rest.
pub fn build_pipeline(args: BootstrapArgs, config: Config) -> AppResult<Pipeline> {
    let install = ExternalCommand::parse(&args.install_cmd)?;
    let tests = ExternalCommand::parse(&args.test_cmd)?;
    let database = SharedDatabase::new(config);

    let mut pipeline = Pipeline::new()
        .step(InstallStep::new(&args.marker_dir, install))
        .step(PlanMigrationsStep::new(database.clone()))
        .step(ApplyMigrationsStep::new(database.clone()));

    if args.skip_tests {
        tracing::warn!("Test stage disabled");
    } else {
        pipeline = pipeline.step(TestStep::new(tests));
    }

    Ok(pipeline.step(ServeStep::new(database, args.server.host, args.server.port)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::Stage;
    use crate::cli::args::ServeArgs;
    use crate::config::{DEFAULT_INSTALL_COMMAND, DEFAULT_TEST_COMMAND};
    use crate::errors::AppError;

    fn args(marker_dir: &str, install_cmd: &str, skip_tests: bool) -> BootstrapArgs {
        BootstrapArgs {
            marker_dir: marker_dir.to_string(),
            install_cmd: install_cmd.to_string(),
            test_cmd: DEFAULT_TEST_COMMAND.to_string(),
            skip_tests,
            server: ServeArgs {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
        }
    }

    fn unreachable_database() -> Config {
        Config::with_database_url("sqlite:/nonexistent/dir/db.sqlite")
    }

    #[test]
    fn test_stages_in_order() {
        let pipeline = build_pipeline(
            args("target/debug", DEFAULT_INSTALL_COMMAND, false),
            unreachable_database(),
        )
        .unwrap();

        assert_eq!(
            pipeline.stages(),
            [
                Stage::Install,
                Stage::MakeMigrations,
                Stage::Migrate,
                Stage::Test,
                Stage::Serve
            ]
        );
    }

    #[test]
    fn test_skip_tests_drops_only_the_test_stage() {
        let pipeline = build_pipeline(
            args("target/debug", DEFAULT_INSTALL_COMMAND, true),
            unreachable_database(),
        )
        .unwrap();

        assert_eq!(
            pipeline.stages(),
            [Stage::Install, Stage::MakeMigrations, Stage::Migrate, Stage::Serve]
        );
    }

    #[test]
    fn test_blank_install_command_rejected() {
        assert!(build_pipeline(args("target/debug", "  ", false), unreachable_database()).is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_install_failure_reported_before_connecting() {
        let root = tempfile::tempdir().unwrap();
        let marker = root.path().join("missing");
        let pipeline = build_pipeline(
            args(marker.to_str().unwrap(), "false", false),
            unreachable_database(),
        )
        .unwrap();

        let err = pipeline.run().await.unwrap_err();
        assert!(matches!(err, AppError::CommandFailed { code: 1, .. }), "{err}");
    }
}
