//! External command runner.

use std::fmt;
use std::process::Stdio;

use tokio::process::Command;

use crate::config::EXIT_CODE_FAILURE;
use crate::errors::{AppError, AppResult};

/// A program and its arguments, run to completion with inherited output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
}

impl ExternalCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a command line on whitespace. No shell quoting is applied.
    pub fn parse(line: &str) -> AppResult<Self> {
        let mut parts = line.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| AppError::internal("empty command line"))?;
        Ok(Self::new(program, parts))
    }

    /// Run with stdin closed so the command can never prompt.
    ///
    /// A non-zero exit becomes [`AppError::CommandFailed`] carrying the
    /// command's own code; termination by signal reports code 1.
    pub async fn run(&self) -> AppResult<()> {
        tracing::debug!(command = %self, "Spawning command");

        let status = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|source| AppError::CommandSpawn {
                command: self.to_string(),
                source,
            })?;

        if status.success() {
            return Ok(());
        }

        Err(AppError::CommandFailed {
            command: self.to_string(),
            code: status.code().unwrap_or(EXIT_CODE_FAILURE),
        })
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
