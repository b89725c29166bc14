//! Error adapter for converting SysdiagramError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI. Each error
//! variant gets a stable code, and the ones a user can act on get help text.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use sysdiagram::SysdiagramError;

/// How to install Graphviz on each supported platform.
pub const INSTALL_HINTS: [(&str, &str); 3] = [
    ("Windows", "winget install --id Graphviz.Graphviz -e"),
    ("macOS", "brew install graphviz"),
    ("Linux", "sudo apt-get install graphviz"),
];

/// Adapter rendering a [`SysdiagramError`] as a miette diagnostic.
pub struct ErrorAdapter<'a>(pub &'a SysdiagramError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            SysdiagramError::Io(_) => "sysdiagram::io",
            SysdiagramError::Config(_) => "sysdiagram::config",
            SysdiagramError::Graph(_) => "sysdiagram::graph",
            SysdiagramError::RenderingUnavailable { .. } => "sysdiagram::rendering_unavailable",
            SysdiagramError::Export(_) => "sysdiagram::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            SysdiagramError::RenderingUnavailable { .. } => Some(Box::new(install_help())),
            SysdiagramError::Config(_) => Some(Box::new(
                "fix the configuration file or pass a different one with --config",
            )),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Help text for a missing or failing Graphviz install.
fn install_help() -> String {
    let mut help = String::from(
        "make sure Graphviz is installed and `dot` is on PATH, \
         or use --format dot to write DOT source instead:",
    );
    for (platform, command) in INSTALL_HINTS {
        help.push_str(&format!("\n  - {platform}: {command}"));
    }
    help
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_of(err: &SysdiagramError) -> String {
        ErrorAdapter(err).code().unwrap().to_string()
    }

    #[test]
    fn test_rendering_unavailable_has_install_hints() {
        let err = SysdiagramError::RenderingUnavailable {
            executable: "dot".to_string(),
            reason: "not found".to_string(),
        };
        let adapter = ErrorAdapter(&err);

        assert_eq!(code_of(&err), "sysdiagram::rendering_unavailable");
        let help = adapter.help().unwrap().to_string();
        assert!(help.contains("winget install --id Graphviz.Graphviz -e"));
        assert!(help.contains("brew install graphviz"));
        assert!(help.contains("sudo apt-get install graphviz"));
    }

    #[test]
    fn test_codes() {
        let io = SysdiagramError::Io(std::io::Error::other("disk full"));
        assert_eq!(code_of(&io), "sysdiagram::io");
        assert!(ErrorAdapter(&io).help().is_none());

        let config = SysdiagramError::Config("bad".to_string());
        assert_eq!(code_of(&config), "sysdiagram::config");
        assert!(ErrorAdapter(&config).help().is_some());
    }

    #[test]
    fn test_display_matches_error() {
        let err = SysdiagramError::Config("Missing configuration file: x.toml".to_string());
        assert_eq!(
            ErrorAdapter(&err).to_string(),
            "Configuration error: Missing configuration file: x.toml"
        );
    }
}
