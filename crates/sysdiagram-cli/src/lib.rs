//! CLI logic for the sysdiagram tool.
//!
//! This module loads the configuration, applies command-line overrides,
//! generates the selected diagrams and prints a summary.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, DiagramSelection};

use std::{
    io::{self, Write},
    path::PathBuf,
};

use log::info;

use sysdiagram::{DiagramGenerator, DiagramKind, SysdiagramError};

/// Run the sysdiagram CLI application
///
/// Generates the selected diagrams and prints the saved paths and a summary
/// to standard output.
///
/// Returns the paths of the written files.
///
/// # Errors
///
/// Returns `SysdiagramError` for:
/// - Configuration loading errors
/// - Graphviz not being installed or failing
/// - File I/O errors
pub fn run(args: &Args) -> Result<Vec<PathBuf>, SysdiagramError> {
    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(output_dir) = &args.output_dir {
        app_config.output_mut().set_directory(output_dir);
    }
    if let Some(format) = args.format {
        app_config.output_mut().set_format(format);
    }

    let kinds = args.diagram.kinds();
    info!(
        diagrams:? = kinds,
        output_dir = app_config.output().directory().display().to_string(),
        format = app_config.output().format().extension();
        "Generating diagrams"
    );

    let generator = DiagramGenerator::new(app_config);
    let paths = generator.generate_all(kinds)?;

    let mut stdout = io::stdout().lock();
    write_summary(&mut stdout, &generator, kinds, &paths)?;

    info!(count = paths.len(); "Diagrams generated successfully");

    Ok(paths)
}

/// Writes the saved paths and what each diagram shows.
fn write_summary(
    out: &mut impl Write,
    generator: &DiagramGenerator,
    kinds: &[DiagramKind],
    paths: &[PathBuf],
) -> io::Result<()> {
    for (kind, path) in kinds.iter().zip(paths) {
        writeln!(out, "{}: saved {}", kind.title(), path.display())?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "Location: {}",
        generator.config().output().directory().display()
    )?;
    for kind in kinds {
        writeln!(out)?;
        writeln!(out, "{} shows:", kind.title())?;
        for item in kind.highlights() {
            writeln!(out, "  • {item}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use sysdiagram::config::AppConfig;

    use super::*;

    #[test]
    fn test_summary_lists_paths_and_highlights() {
        let mut config = AppConfig::default();
        config.output_mut().set_directory("out");
        let generator = DiagramGenerator::new(config);
        let paths = [Path::new("out").join("system_architecture.png")];

        let mut buf = Vec::new();
        write_summary(&mut buf, &generator, &[DiagramKind::Architecture], &paths).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("System Architecture: saved out"));
        assert!(text.contains("system_architecture.png"));
        assert!(text.contains("Location: out"));
        assert!(text.contains("  • Cache (Redis)"));
    }
}
