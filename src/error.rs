/*============================================================
  Synavera Project: vsce-stats
  Module: vsce_stats::error
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Centralise vsce-stats error types so fetch, decode, and
    output failures surface with distinct diagnostics.

  Security / Safety Notes:
    Messages carry command lines and parser positions only;
    no marketplace payload is echoed back.

  Dependencies:
    thiserror for ergonomic error definitions.

  Operational Scope:
    Used across modules to propagate fatal failures to the
    binary entry point, which exits with status 1.

  Revision History:
    2026-10-15 COD  Adapted shared error definitions.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Explicit error taxonomy with actionable context
    - No silent failure paths
    - Single failure exit code for schedulers
============================================================*/

use std::io;

use thiserror::Error;

/// Result alias for vsce-stats operations.
pub type Result<T> = std::result::Result<T, StatsError>;

/// Enumerates the failure domains of one reporting run.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("vsce failed: required command `{command}` not found in PATH")]
    CommandMissing { command: String },
    #[error("vsce failed: `{command}` {status}")]
    CommandFailure { command: String, status: String },
    #[error("vsce failed: `{command}` interrupted before completion")]
    Interrupted { command: String },
    #[error("vsce failed: {0}")]
    Runtime(String),
    #[error("decode failed: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("write failed: {0}")]
    Write(String),
    #[error("filesystem: {0}")]
    Filesystem(String),
}

impl StatsError {
    /// True for failures raised while querying the marketplace tool.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            StatsError::CommandMissing { .. }
                | StatsError::CommandFailure { .. }
                | StatsError::Interrupted { .. }
                | StatsError::Runtime(_)
                | StatsError::Decode(_)
        )
    }
}

impl From<csv::Error> for StatsError {
    fn from(err: csv::Error) -> Self {
        StatsError::Write(err.to_string())
    }
}

impl From<io::Error> for StatsError {
    fn from(err: io::Error) -> Self {
        StatsError::Write(err.to_string())
    }
}
