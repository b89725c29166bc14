//! Rendering of graph descriptions to files.
//!
//! This module provides the [`GraphRenderer`] trait that every rendering
//! backend implements. It is the final stage of diagram generation.
//!
//! # Pipeline Position
//!
//! ```text
//! DiagramKind
//!     ↓ build
//! Graph (nodes, edges, clusters)
//!     ↓ dot (DOT source)
//!     ↓ render (this module)
//! Output File
//! ```
//!
//! # Available Backends
//!
//! - [`graphviz::GraphvizRenderer`]: rasterizes through the native `dot`
//!   executable (PNG, SVG, PDF).
//! - [`DotSourceRenderer`]: writes the DOT source itself; needs no native
//!   dependency.
//!
//! # Error Handling
//!
//! Backends return [`Error`]. At the crate boundary it converts into
//! [`SysdiagramError::RenderingUnavailable`] when the native dependency is
//! missing or failing, and into [`SysdiagramError::Export`] otherwise.
//!
//! [`SysdiagramError::RenderingUnavailable`]: crate::SysdiagramError::RenderingUnavailable
//! [`SysdiagramError::Export`]: crate::SysdiagramError::Export

pub mod dot;
pub mod graphviz;

use std::{
    fmt, io,
    io::Write,
    path::{Path, PathBuf},
    process::ExitStatus,
    str::FromStr,
};

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use sysdiagram_core::graph::Graph;

/// File format of a rendered diagram.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
    Pdf,
    /// DOT source text, written without invoking Graphviz.
    Dot,
}

impl OutputFormat {
    /// File extension, which is also the `dot -T` format name.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
            Self::Dot => "dot",
        }
    }

    /// Whether producing this format needs the native `dot` executable.
    pub fn needs_graphviz(self) -> bool {
        !matches!(self, Self::Dot)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            "pdf" => Ok(Self::Pdf),
            "dot" | "gv" => Ok(Self::Dot),
            _ => Err(format!(
                "unknown output format `{s}` (expected png, svg, pdf or dot)"
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Abstraction over rendering backends.
///
/// A renderer turns a [`Graph`] into a file. The graph data never depends on
/// which backend is used.
pub trait GraphRenderer {
    /// Format of the files this renderer writes.
    fn format(&self) -> OutputFormat;

    /// Verifies that the backend can run, without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExecutableNotFound`] when a required native
    /// dependency cannot be located.
    fn check(&self) -> Result<(), Error> {
        Ok(())
    }

    /// Renders `graph` to `output_path`, creating parent directories and
    /// replacing any existing file.
    ///
    /// Returns the path of the written file.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the backend cannot run or the file cannot be
    /// written. No file is left at `output_path` on failure.
    fn render(&self, graph: &Graph, output_path: &Path) -> Result<PathBuf, Error>;
}

/// Errors that can occur while rendering a graph.
#[derive(Debug, Error)]
pub enum Error {
    #[error("`{executable}` was not found in any of {} search path directories", searched.len())]
    ExecutableNotFound {
        executable: String,
        searched: Vec<PathBuf>,
    },

    #[error("failed to run `{}`: {source}", executable.display())]
    Spawn {
        executable: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("`{}` exited with {status}: {stderr}", executable.display())]
    Failed {
        executable: PathBuf,
        status: ExitStatus,
        stderr: String,
    },

    #[error("failed to write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Name or path of the executable involved, if any.
    pub fn executable(&self) -> Option<String> {
        match self {
            Self::ExecutableNotFound { executable, .. } => Some(executable.clone()),
            Self::Spawn { executable, .. } | Self::Failed { executable, .. } => {
                Some(executable.display().to_string())
            }
            Self::Write { .. } => None,
        }
    }
}

/// Writes the DOT source of a graph. Needs no native dependency.
#[derive(Debug, Default, Clone, Copy)]
pub struct DotSourceRenderer;

impl GraphRenderer for DotSourceRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Dot
    }

    fn render(&self, graph: &Graph, output_path: &Path) -> Result<PathBuf, Error> {
        let source = dot::to_dot(graph);
        write_output(output_path, source.as_bytes())
    }
}

/// Writes `bytes` to `path` through a temporary file in the same directory.
///
/// The file appears at `path` only once it is complete, replacing any
/// previous file there. On unix it gets the same mode as a file created with
/// [`std::fs::write`], i.e. `0o666` masked by the process umask.
pub(crate) fn write_output(path: &Path, bytes: &[u8]) -> Result<PathBuf, Error> {
    let to_write_error = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(to_write_error)?;

    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut temp_file = builder.tempfile_in(parent).map_err(to_write_error)?;
    temp_file.write_all(bytes).map_err(to_write_error)?;
    temp_file
        .persist(path)
        .map_err(|err| to_write_error(err.error))?;

    debug!(path = path.display().to_string(), bytes = bytes.len(); "Output written");
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("png".parse::<OutputFormat>(), Ok(OutputFormat::Png));
        assert_eq!("SVG".parse::<OutputFormat>(), Ok(OutputFormat::Svg));
        assert_eq!("gv".parse::<OutputFormat>(), Ok(OutputFormat::Dot));
        assert!("jpeg2000".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_only_dot_skips_graphviz() {
        assert!(OutputFormat::Png.needs_graphviz());
        assert!(OutputFormat::Pdf.needs_graphviz());
        assert!(!OutputFormat::Dot.needs_graphviz());
    }

    #[test]
    fn test_write_output_creates_parents_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("out.dot");

        write_output(&path, b"first").unwrap();
        let written = write_output(&path, b"second").unwrap();

        assert_eq!(written, path);
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");

        // Only the final file remains, no leftover temporaries
        let entries: Vec<_> = fs::read_dir(path.parent().unwrap()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_output_mode_matches_plain_write() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let rendered = dir.path().join("system_architecture.dot");
        let plain = dir.path().join("plain.dot");

        write_output(&rendered, b"digraph G {}").unwrap();
        fs::write(&plain, b"digraph G {}").unwrap();

        let mode_of = |path: &Path| fs::metadata(path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode_of(&rendered), mode_of(&plain));
    }

    #[test]
    fn test_executable_of_error() {
        let err = Error::ExecutableNotFound {
            executable: "dot".to_string(),
            searched: vec![PathBuf::from("/usr/bin")],
        };
        assert_eq!(err.executable().as_deref(), Some("dot"));
        assert_eq!(
            err.to_string(),
            "`dot` was not found in any of 1 search path directories"
        );
    }
}
