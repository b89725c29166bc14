//! Error types for sysdiagram operations.
//!
//! This module provides the main error type [`SysdiagramError`] which wraps
//! the error conditions that can occur while building and rendering diagrams.

use std::io;

use thiserror::Error;

use sysdiagram_core::error::GraphError;

use crate::export;

/// The main error type for sysdiagram operations.
#[derive(Debug, Error)]
pub enum SysdiagramError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A diagram definition violates a graph invariant.
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// The native rendering executable cannot be located or invoked.
    #[error("Rendering dependency `{executable}` is unavailable: {reason}")]
    RenderingUnavailable { executable: String, reason: String },

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<export::Error> for SysdiagramError {
    fn from(error: export::Error) -> Self {
        match error {
            export::Error::ExecutableNotFound { .. }
            | export::Error::Spawn { .. }
            | export::Error::Failed { .. } => Self::RenderingUnavailable {
                executable: error.executable().unwrap_or_default(),
                reason: error.to_string(),
            },
            export::Error::Write { .. } => Self::Export(Box::new(error)),
        }
    }
}
