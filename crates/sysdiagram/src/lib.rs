//! Sysdiagram - schema and architecture diagrams for the chatbot system.
//!
//! The diagrams are fixed graph definitions built in code. They are
//! exported to Graphviz DOT and rendered either by the native `dot`
//! executable (PNG, SVG, PDF) or written as DOT source directly.
//!
//! # Example
//!
//! ```rust,no_run
//! use sysdiagram::{DiagramGenerator, DiagramKind};
//!
//! let generator = DiagramGenerator::default();
//! let path = generator
//!     .generate(DiagramKind::Architecture)
//!     .expect("Graphviz is installed");
//! println!("Saved: {}", path.display());
//! ```

pub mod config;
pub mod diagram;
pub mod export;
pub mod search_path;

mod error;

pub use sysdiagram_core::{color, graph, identifier, label, style};

pub use diagram::DiagramKind;
pub use error::SysdiagramError;

use std::path::{Path, PathBuf};

use log::{debug, info};

use sysdiagram_core::graph::Graph;

use config::AppConfig;
use export::{DotSourceRenderer, GraphRenderer, OutputFormat, graphviz::GraphvizRenderer};
use search_path::SearchPath;

/// Facade for building and rendering the diagrams.
///
/// The executable search path is resolved once, when the generator is
/// created, from `PATH`, the platform's well-known Graphviz directories and
/// the configured extra directories. It is only ever passed to the rendering
/// child process.
///
/// # Examples
///
/// ```
/// use sysdiagram::{DiagramGenerator, DiagramKind, config::AppConfig};
///
/// let generator = DiagramGenerator::new(AppConfig::default());
/// let path = generator.output_path(DiagramKind::Schema);
/// assert!(path.ends_with("docs/diagrams/database_schema.png"));
/// ```
#[derive(Debug, Clone)]
pub struct DiagramGenerator {
    config: AppConfig,
    search_path: SearchPath,
}

impl Default for DiagramGenerator {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl DiagramGenerator {
    /// Creates a generator with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        let mut search_path = SearchPath::from_env();
        let appended = search_path.augment(search_path::platform_candidates());
        if !appended.is_empty() {
            info!(dirs:? = appended; "Added Graphviz install directories to search path");
        }
        search_path.augment(config.graphviz().search_paths().iter().cloned());

        Self {
            config,
            search_path,
        }
    }

    /// Replaces the executable search path.
    pub fn with_search_path(mut self, search_path: SearchPath) -> Self {
        self.search_path = search_path;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn search_path(&self) -> &SearchPath {
        &self.search_path
    }

    /// Builds the graph of a diagram.
    ///
    /// # Errors
    ///
    /// Returns [`SysdiagramError::Graph`] if the diagram definition violates
    /// a graph invariant.
    pub fn build(&self, kind: DiagramKind) -> Result<Graph, SysdiagramError> {
        debug!(diagram = kind.file_stem(); "Building diagram");
        let graph = kind.try_build()?;
        Ok(graph)
    }

    /// DOT source of a diagram.
    ///
    /// # Errors
    ///
    /// Returns an error if the diagram cannot be built.
    pub fn to_dot(&self, kind: DiagramKind) -> Result<String, SysdiagramError> {
        Ok(export::dot::to_dot(&self.build(kind)?))
    }

    /// Path the diagram is written to in the configured format.
    pub fn output_path(&self, kind: DiagramKind) -> PathBuf {
        self.path_for(kind, self.config.output().format())
    }

    /// The renderer for the configured output format.
    pub fn renderer(&self) -> Box<dyn GraphRenderer> {
        match self.config.output().format() {
            OutputFormat::Dot => Box::new(DotSourceRenderer),
            format => Box::new(
                GraphvizRenderer::new(format, self.search_path.clone())
                    .with_executable(self.config.graphviz().executable()),
            ),
        }
    }

    /// Builds and renders a diagram with the configured renderer.
    ///
    /// Returns the path of the written file.
    ///
    /// # Errors
    ///
    /// Returns [`SysdiagramError::RenderingUnavailable`] if `dot` cannot be
    /// located or fails, in which case nothing is written.
    pub fn generate(&self, kind: DiagramKind) -> Result<PathBuf, SysdiagramError> {
        self.generate_with(self.renderer().as_ref(), kind)
    }

    /// Builds and renders a diagram with `renderer`.
    ///
    /// The file extension follows the renderer's format.
    ///
    /// # Errors
    ///
    /// Returns an error if the renderer fails.
    pub fn generate_with(
        &self,
        renderer: &dyn GraphRenderer,
        kind: DiagramKind,
    ) -> Result<PathBuf, SysdiagramError> {
        let graph = self.build(kind)?;
        let output_path = self.path_for(kind, renderer.format());

        info!(
            diagram = kind.file_stem(),
            format = renderer.format().extension();
            "Generating diagram"
        );
        let path = renderer.render(&graph, &output_path)?;
        Ok(path)
    }

    /// Renders several diagrams with the configured renderer.
    ///
    /// The renderer is checked before anything is built, so a missing
    /// dependency leaves every output untouched.
    ///
    /// # Errors
    ///
    /// Returns the first error; diagrams rendered before it stay on disk.
    pub fn generate_all(&self, kinds: &[DiagramKind]) -> Result<Vec<PathBuf>, SysdiagramError> {
        let renderer = self.renderer();
        renderer.check()?;

        kinds
            .iter()
            .map(|&kind| self.generate_with(renderer.as_ref(), kind))
            .collect()
    }

    fn path_for(&self, kind: DiagramKind, format: OutputFormat) -> PathBuf {
        output_file(self.config.output().directory(), kind, format)
    }
}

fn output_file(directory: &Path, kind: DiagramKind, format: OutputFormat) -> PathBuf {
    directory.join(format!("{}.{}", kind.file_stem(), format.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_file_names() {
        let dir = Path::new("out");
        assert_eq!(
            output_file(dir, DiagramKind::Architecture, OutputFormat::Png),
            Path::new("out/system_architecture.png")
        );
        assert_eq!(
            output_file(dir, DiagramKind::Schema, OutputFormat::Dot),
            Path::new("out/database_schema.dot")
        );
    }

    #[test]
    fn test_renderer_follows_format() {
        let mut config = AppConfig::default();
        config.output_mut().set_format(OutputFormat::Dot);
        let generator = DiagramGenerator::new(config);
        assert_eq!(generator.renderer().format(), OutputFormat::Dot);

        let generator = DiagramGenerator::default();
        assert_eq!(generator.renderer().format(), OutputFormat::Png);
    }

    #[test]
    fn test_build_returns_definition_graph() {
        let generator = DiagramGenerator::default();
        for kind in DiagramKind::ALL {
            assert_eq!(generator.build(kind).unwrap(), kind.build());
        }
        let source = generator.to_dot(DiagramKind::Schema).unwrap();
        assert!(source.contains("digraph"));
    }

    #[test]
    fn test_configured_search_paths_are_appended() {
        let extra = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config
            .graphviz_mut()
            .set_search_paths(vec![extra.path().to_path_buf()]);

        let generator = DiagramGenerator::new(config);
        let dirs = generator.search_path().dirs();
        assert!(dirs.contains(&extra.path().to_path_buf()));
    }
}
