//! Bootstrap pipeline - install, migrate, test, serve.
//!
//! Stages run strictly one after another. The first failure halts the
//! pipeline and its error carries the process exit code.

mod command;
mod steps;

use std::fmt;

use async_trait::async_trait;

use crate::errors::AppResult;

pub use command::ExternalCommand;
pub use steps::{
    ApplyMigrationsStep, InstallStep, PlanMigrationsStep, ServeStep, SharedDatabase, TestStep,
};

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Install,
    MakeMigrations,
    Migrate,
    Test,
    Serve,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Install => "install",
            Stage::MakeMigrations => "makemigrations",
            Stage::Migrate => "migrate",
            Stage::Test => "test",
            Stage::Serve => "serve",
        };
        f.write_str(name)
    }
}

/// How a stage finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Completed,
    Skipped,
}

/// A single pipeline stage
#[async_trait]
pub trait Step: Send + Sync {
    fn stage(&self) -> Stage;

    async fn run(&self) -> AppResult<StepOutcome>;
}

/// Ordered, fail-fast sequence of steps
#[derive(Default)]
pub struct Pipeline {
    steps: Vec<Box<dyn Step>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step
    pub fn step(mut self, step: impl Step + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn stages(&self) -> Vec<Stage> {
        self.steps.iter().map(|s| s.stage()).collect()
    }

    /// Run every step in order, stopping at the first error
    pub async fn run(&self) -> AppResult<()> {
        for step in &self.steps {
            let stage = step.stage();
            tracing::info!(%stage, "Stage started");

            match step.run().await {
                Ok(StepOutcome::Completed) => tracing::info!(%stage, "Stage completed"),
                Ok(StepOutcome::Skipped) => tracing::info!(%stage, "Stage skipped"),
                Err(e) => {
                    tracing::error!(%stage, error = %e, "Stage failed");
                    return Err(e);
                }
            }
        }
        Ok(())
    }
}
