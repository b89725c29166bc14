//! Command-line argument definitions for the sysdiagram CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the diagrams to generate, where and in
//! which format they are written, the configuration file and logging
//! verbosity.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use sysdiagram::{DiagramKind, export::OutputFormat};

/// Which diagrams to generate.
#[derive(ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DiagramSelection {
    #[default]
    Architecture,
    Schema,
    All,
}

impl DiagramSelection {
    /// The selected diagrams, in generation order.
    pub fn kinds(self) -> &'static [DiagramKind] {
        match self {
            Self::Architecture => &[DiagramKind::Architecture],
            Self::Schema => &[DiagramKind::Schema],
            Self::All => &DiagramKind::ALL,
        }
    }
}

/// Command-line arguments for the sysdiagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Diagrams to generate
    #[arg(short, long, value_enum, default_value_t = DiagramSelection::Architecture)]
    pub diagram: DiagramSelection,

    /// Output directory [default: docs/diagrams]
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Output format: png, svg, pdf or dot [default: png]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["sysdiagram"]);
        assert_eq!(args.diagram, DiagramSelection::Architecture);
        assert_eq!(args.output_dir, None);
        assert_eq!(args.format, None);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_all_options() {
        let args = Args::parse_from([
            "sysdiagram",
            "-d",
            "all",
            "-o",
            "out",
            "-f",
            "svg",
            "-c",
            "sysdiagram.toml",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.diagram.kinds(), DiagramKind::ALL);
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
        assert_eq!(args.format, Some(OutputFormat::Svg));
        assert_eq!(args.config, Some(PathBuf::from("sysdiagram.toml")));
        assert_eq!(args.log_level, "debug");
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result = Args::try_parse_from(["sysdiagram", "--format", "gif"]);
        assert!(result.is_err());
    }
}
