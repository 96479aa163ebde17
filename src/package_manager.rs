//! Package manager integration for fetching the pinned dependency
//!
//! This module provides:
//! - The runner trait used by the orchestrator
//! - A system runner that shells out to `go get`, streaming its output

use crate::error::FetchError;
use std::path::Path;
use std::process::{Command, Stdio};

/// Default program that provides the `get` subcommand
pub const DEFAULT_GO_PROGRAM: &str = "go";

/// Subcommand used to fetch a dependency
const GET_SUBCOMMAND: &str = "get";

/// Trait for running the package manager fetch command
pub trait PackageManagerRunner {
    /// Fetch `target` (`<module path>@<revision>`) in the specified directory
    fn run_get(&self, target: &str, working_dir: &Path) -> Result<(), FetchError>;

    /// Human readable command name, used in error messages
    fn command_name(&self) -> String;
}

/// Default package manager runner that executes real commands
#[derive(Debug, Clone)]
pub struct SystemPackageManager {
    program: String,
}

impl SystemPackageManager {
    /// Create a runner for the `go` binary on `PATH`
    pub fn new() -> Self {
        Self::with_program(DEFAULT_GO_PROGRAM)
    }

    /// Create a runner for a specific program
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Build the command without running it
    fn build_command(&self, target: &str, working_dir: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg(GET_SUBCOMMAND)
            .arg(target)
            .current_dir(working_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        command
    }
}

impl Default for SystemPackageManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageManagerRunner for SystemPackageManager {
    fn run_get(&self, target: &str, working_dir: &Path) -> Result<(), FetchError> {
        let status = self
            .build_command(target, working_dir)
            .status()
            .map_err(|e| FetchError::SpawnFailed {
                command: self.command_name(),
                source: e,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(FetchError::CommandFailed {
                command: self.command_name(),
                status: status.to_string(),
            })
        }
    }

    fn command_name(&self) -> String {
        format!("{} {}", self.program, GET_SUBCOMMAND)
    }
}
