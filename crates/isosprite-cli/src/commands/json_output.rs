//! JSON output types for machine-readable CLI output.
//!
//! Every command accepts `--json`. The output is one document with a
//! `success` flag, the errors that occurred, and a command-specific result.

use anyhow::Result;
use isosprite_spec::PipelineErrorCode;
use serde::Serialize;
use std::process::ExitCode;

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "SPRITE_001", "SPEC_003")
    pub code: String,
    /// Error category ("sprite", "spec")
    pub category: String,
    /// Human-readable error message
    pub message: String,
}

impl JsonError {
    pub fn from_error<E: PipelineErrorCode>(err: &E) -> Self {
        Self {
            code: err.code().to_string(),
            category: err.category().to_string(),
            message: err.message(),
        }
    }
}

/// JSON output of a command.
#[derive(Debug, Clone, Serialize)]
pub struct CommandOutput<T> {
    /// Whether the command succeeded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Command result (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T: Serialize> CommandOutput<T> {
    /// Creates a successful output.
    pub fn success(result: T) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }

    /// Builds the output from a command outcome.
    pub fn from_result<E: PipelineErrorCode>(outcome: std::result::Result<T, E>) -> Self {
        match outcome {
            Ok(result) => Self::success(result),
            Err(err) => Self::failure(vec![JsonError::from_error(&err)]),
        }
    }

    /// Prints the output to stdout and returns the matching exit code.
    pub fn print(&self) -> Result<ExitCode> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(if self.success {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        })
    }
}
