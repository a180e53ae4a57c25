//! Concrete pipeline stages.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use super::{ExternalCommand, Stage, Step, StepOutcome};
use crate::commands::serve::run_server;
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;

/// Database handle shared by the stages, connected on first use.
///
/// Earlier stages such as the install never touch the database, so an
/// unreachable server only fails the first migration stage.
pub struct SharedDatabase {
    config: Config,
    database: OnceCell<Arc<Database>>,
}

impl SharedDatabase {
    pub fn new(config: Config) -> Arc<Self> {
        Arc::new(Self {
            config,
            database: OnceCell::new(),
        })
    }

    pub fn is_connected(&self) -> bool {
        self.database.initialized()
    }

    /// Connect without migrating, or reuse the existing connection
    pub async fn get(&self) -> AppResult<Arc<Database>> {
        let database = self
            .database
            .get_or_try_init(|| async {
                tracing::debug!("Connecting to database");
                Database::connect_without_migrations(&self.config)
                    .await
                    .map(Arc::new)
            })
            .await?;
        Ok(database.clone())
    }
}

/// Development-mode install, guarded by a marker directory
pub struct InstallStep {
    marker_dir: PathBuf,
    command: ExternalCommand,
}

impl InstallStep {
    pub fn new(marker_dir: impl Into<PathBuf>, command: ExternalCommand) -> Self {
        Self {
            marker_dir: marker_dir.into(),
            command,
        }
    }
}

#[async_trait]
impl Step for InstallStep {
    fn stage(&self) -> Stage {
        Stage::Install
    }

    async fn run(&self) -> AppResult<StepOutcome> {
        if self.marker_dir.is_dir() {
            tracing::info!(
                marker = %self.marker_dir.display(),
                "Marker present, skipping install"
            );
            return Ok(StepOutcome::Skipped);
        }

        tracing::info!(command = %self.command, "Marker absent, installing");
        self.command.run().await?;
        Ok(StepOutcome::Completed)
    }
}

/// Report pending schema migrations without applying them
pub struct PlanMigrationsStep {
    database: Arc<SharedDatabase>,
}

impl PlanMigrationsStep {
    pub fn new(database: Arc<SharedDatabase>) -> Self {
        Self { database }
    }
}

#[async_trait]
impl Step for PlanMigrationsStep {
    fn stage(&self) -> Stage {
        Stage::MakeMigrations
    }

    async fn run(&self) -> AppResult<StepOutcome> {
        let pending = self.database.get().await?.pending_migrations().await?;
        if pending.is_empty() {
            tracing::info!("No changes detected");
        }
        for name in &pending {
            tracing::info!(migration = %name, "Pending migration");
        }
        Ok(StepOutcome::Completed)
    }
}

/// Apply pending migrations
pub struct ApplyMigrationsStep {
    database: Arc<SharedDatabase>,
}

impl ApplyMigrationsStep {
    pub fn new(database: Arc<SharedDatabase>) -> Self {
        Self { database }
    }
}

#[async_trait]
impl Step for ApplyMigrationsStep {
    fn stage(&self) -> Stage {
        Stage::Migrate
    }

    async fn run(&self) -> AppResult<StepOutcome> {
        self.database.get().await?.run_migrations().await?;
        Ok(StepOutcome::Completed)
    }
}

/// Run the test suite
pub struct TestStep {
    command: ExternalCommand,
}

impl TestStep {
    pub fn new(command: ExternalCommand) -> Self {
        Self { command }
    }
}

#[async_trait]
impl Step for TestStep {
    fn stage(&self) -> Stage {
        Stage::Test
    }

    async fn run(&self) -> AppResult<StepOutcome> {
        self.command.run().await?;
        Ok(StepOutcome::Completed)
    }
}

/// Serve the API until Ctrl+C
pub struct ServeStep {
    database: Arc<SharedDatabase>,
    host: String,
    port: u16,
}

impl ServeStep {
    pub fn new(database: Arc<SharedDatabase>, host: impl Into<String>, port: u16) -> Self {
        Self {
            database,
            host: host.into(),
            port,
        }
    }
}

#[async_trait]
impl Step for ServeStep {
    fn stage(&self) -> Stage {
        Stage::Serve
    }

    async fn run(&self) -> AppResult<StepOutcome> {
        run_server(self.database.get().await?, &self.host, self.port).await?;
        Ok(StepOutcome::Completed)
    }
}
