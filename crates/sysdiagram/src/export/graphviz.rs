//! Rendering through the native Graphviz `dot` executable.
//!
//! The DOT source is piped to `dot -T<format>` and the rendered bytes are
//! read back from its standard output. The executable is resolved against a
//! [`SearchPath`] before anything is written, so a missing Graphviz install
//! fails fast and leaves the output directory untouched.

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    process::{Command, Stdio},
    thread,
};

use log::{debug, info, warn};

use sysdiagram_core::graph::Graph;

use super::{Error, GraphRenderer, OutputFormat, dot, write_output};
use crate::search_path::SearchPath;

/// Default name of the Graphviz layout executable.
pub const DEFAULT_EXECUTABLE: &str = "dot";

/// Renders graphs by invoking Graphviz.
#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    format: OutputFormat,
    executable: String,
    search_path: SearchPath,
}

impl GraphvizRenderer {
    /// Creates a renderer for `format` that resolves `dot` on `search_path`.
    pub fn new(format: OutputFormat, search_path: SearchPath) -> Self {
        Self {
            format,
            executable: DEFAULT_EXECUTABLE.to_string(),
            search_path,
        }
    }

    /// Uses a different executable name or path instead of `dot`.
    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    pub fn search_path(&self) -> &SearchPath {
        &self.search_path
    }

    /// Locates the executable on the search path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExecutableNotFound`] if no directory contains it.
    pub fn resolve(&self) -> Result<PathBuf, Error> {
        self.search_path
            .find_executable(&self.executable)
            .ok_or_else(|| Error::ExecutableNotFound {
                executable: self.executable.clone(),
                searched: self.search_path.dirs().to_vec(),
            })
    }

    /// Runs the executable on `source` and returns its standard output.
    fn run(&self, executable: &Path, source: &str) -> Result<Vec<u8>, Error> {
        let to_spawn_error = |source| Error::Spawn {
            executable: executable.to_path_buf(),
            source,
        };

        let mut command = Command::new(executable);
        command
            .arg(format!("-T{}", self.format.extension()))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        match self.search_path.to_env_value() {
            Some(path) => {
                command.env("PATH", path);
            }
            None => warn!("Search path cannot be joined, child inherits PATH unchanged"),
        }

        debug!(
            executable = executable.display().to_string(),
            format = self.format.extension();
            "Spawning renderer"
        );
        let mut child = command.spawn().map_err(to_spawn_error)?;

        // Stdin is fed from its own thread while stdout and stderr drain
        let stdin = child.stdin.take();
        let (written, output) = thread::scope(|scope| {
            let writer = scope.spawn(move || -> io::Result<()> {
                if let Some(mut stdin) = stdin {
                    stdin.write_all(source.as_bytes())?;
                }
                Ok(())
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
            (written, output)
        });

        let output = output.map_err(to_spawn_error)?;
        if !output.status.success() {
            return Err(Error::Failed {
                executable: executable.to_path_buf(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        written.map_err(to_spawn_error)?;

        Ok(output.stdout)
    }
}

impl GraphRenderer for GraphvizRenderer {
    fn format(&self) -> OutputFormat {
        self.format
    }

    fn check(&self) -> Result<(), Error> {
        self.resolve().map(|_| ())
    }

    fn render(&self, graph: &Graph, output_path: &Path) -> Result<PathBuf, Error> {
        let executable = self.resolve()?;
        let source = dot::to_dot(graph);
        let bytes = self.run(&executable, &source)?;

        let path = write_output(output_path, &bytes)?;
        info!(path = path.display().to_string(), bytes = bytes.len(); "Graph rendered");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use sysdiagram_core::{
        graph::Node,
        style::{GraphStyle, RankDir, Splines},
    };

    use super::*;

    fn tiny_graph() -> Graph {
        let mut graph = Graph::new("tiny", GraphStyle::new(RankDir::TopBottom, Splines::Spline));
        graph.add_node(Node::new("a", "a")).unwrap();
        graph
    }

    #[test]
    fn test_missing_executable_writes_nothing() {
        let empty = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        let output = out_dir.path().join("diagrams").join("tiny.png");

        let renderer = GraphvizRenderer::new(
            OutputFormat::Png,
            SearchPath::new([empty.path().to_path_buf()]),
        );

        assert!(matches!(renderer.check(), Err(Error::ExecutableNotFound { .. })));

        let err = renderer.render(&tiny_graph(), &output).unwrap_err();
        match err {
            Error::ExecutableNotFound {
                executable,
                searched,
            } => {
                assert_eq!(executable, "dot");
                assert_eq!(searched, [empty.path().to_path_buf()]);
            }
            other => panic!("expected ExecutableNotFound, got {other:?}"),
        }

        assert!(!output.exists());
        assert!(!out_dir.path().join("diagrams").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_custom_executable_output_is_written() {
        use std::os::unix::fs::PermissionsExt;

        // Stand-in renderer using shell builtins only, since the child PATH
        // holds nothing but the temporary directory
        let bin = tempfile::tempdir().unwrap();
        let script = bin.path().join("fake-dot");
        fs::write(&script, "#!/bin/sh\nwhile read -r _; do :; done\nprintf 'RENDERED'\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let out_dir = tempfile::tempdir().unwrap();
        let output = out_dir.path().join("tiny.svg");

        let renderer = GraphvizRenderer::new(
            OutputFormat::Svg,
            SearchPath::new([bin.path().to_path_buf()]),
        )
        .with_executable("fake-dot");

        let written = renderer.render(&tiny_graph(), &output).unwrap();
        assert_eq!(written, output);
        assert_eq!(fs::read_to_string(&output).unwrap(), "RENDERED");
    }

    #[cfg(unix)]
    #[test]
    fn test_renderer_writing_before_reading_does_not_block() {
        use std::os::unix::fs::PermissionsExt;

        // Fills the stdout pipe before consuming any input
        let bin = tempfile::tempdir().unwrap();
        let script = bin.path().join("eager-dot");
        fs::write(
            &script,
            "#!/bin/sh\n\
             i=0\n\
             while [ $i -lt 20000 ]; do echo 0123456789abcdef; i=$((i+1)); done\n\
             while read -r _; do :; done\n",
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        // DOT source well above a pipe buffer
        let mut graph = tiny_graph();
        for i in 0..2000 {
            graph
                .add_node(Node::new(format!("n{i}"), "x".repeat(64).as_str()))
                .unwrap();
        }
        assert!(dot::to_dot(&graph).len() > 128 * 1024);

        let out_dir = tempfile::tempdir().unwrap();
        let output = out_dir.path().join("big.svg");
        let renderer = GraphvizRenderer::new(
            OutputFormat::Svg,
            SearchPath::new([bin.path().to_path_buf()]),
        )
        .with_executable("eager-dot");

        renderer.render(&graph, &output).unwrap();
        assert_eq!(fs::metadata(&output).unwrap().len(), 20000 * 17);
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_executable_reports_stderr() {
        use std::os::unix::fs::PermissionsExt;

        let bin = tempfile::tempdir().unwrap();
        let script = bin.path().join("broken-dot");
        fs::write(
            &script,
            "#!/bin/sh\nwhile read -r _; do :; done\necho 'no layout plugin' >&2\nexit 3\n",
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let out_dir = tempfile::tempdir().unwrap();
        let output = out_dir.path().join("tiny.png");

        let renderer = GraphvizRenderer::new(
            OutputFormat::Png,
            SearchPath::new([bin.path().to_path_buf()]),
        )
        .with_executable("broken-dot");

        match renderer.render(&tiny_graph(), &output).unwrap_err() {
            Error::Failed { stderr, .. } => assert_eq!(stderr, "no layout plugin"),
            other => panic!("expected Failed, got {other:?}"),
        }
        assert!(!output.exists());
    }
}
