//! Configuration types for diagram generation.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file. Every field has a default, so an empty file is a valid
//! configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`OutputConfig`] - Where diagrams are written and in which format.
//! - [`GraphvizConfig`] - How the native `dot` executable is located.
//!
//! # Example
//!
//! ```
//! # use sysdiagram::{config::AppConfig, export::OutputFormat};
//! let config = AppConfig::default();
//! assert_eq!(config.output().directory().to_str(), Some("docs/diagrams"));
//! assert_eq!(config.output().format(), OutputFormat::Png);
//! assert_eq!(config.graphviz().executable(), "dot");
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::export::{OutputFormat, graphviz::DEFAULT_EXECUTABLE};

/// Default directory for rendered diagrams, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "docs/diagrams";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,

    /// Graphviz configuration section.
    #[serde(default)]
    graphviz: GraphvizConfig,
}

impl AppConfig {
    pub fn new(output: OutputConfig, graphviz: GraphvizConfig) -> Self {
        Self { output, graphviz }
    }

    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut OutputConfig {
        &mut self.output
    }

    pub fn graphviz(&self) -> &GraphvizConfig {
        &self.graphviz
    }

    pub fn graphviz_mut(&mut self) -> &mut GraphvizConfig {
        &mut self.graphviz
    }
}

/// Output location and format.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the diagrams are written to. Created if absent.
    #[serde(default = "default_directory")]
    directory: PathBuf,

    #[serde(default)]
    format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            format: OutputFormat::default(),
        }
    }
}

impl OutputConfig {
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn set_directory(&mut self, directory: impl Into<PathBuf>) {
        self.directory = directory.into();
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        self.format = format;
    }
}

/// Location of the Graphviz `dot` executable.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphvizConfig {
    /// Executable name or path. A bare name is looked up on the search path.
    #[serde(default = "default_executable")]
    executable: String,

    /// Extra directories searched after `PATH` and the platform defaults.
    #[serde(default)]
    search_paths: Vec<PathBuf>,
}

impl Default for GraphvizConfig {
    fn default() -> Self {
        Self {
            executable: default_executable(),
            search_paths: Vec::new(),
        }
    }
}

impl GraphvizConfig {
    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    pub fn set_executable(&mut self, executable: impl Into<String>) {
        self.executable = executable.into();
    }

    pub fn set_search_paths(&mut self, search_paths: Vec<PathBuf>) {
        self.search_paths = search_paths;
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_executable() -> String {
    DEFAULT_EXECUTABLE.to_string()
}
