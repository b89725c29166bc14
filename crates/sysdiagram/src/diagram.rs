//! The fixed diagrams of the chatbot system.
//!
//! Both diagrams are defined in code. [`DiagramKind`] names them and ties each
//! one to the file stem it is saved under.

pub mod architecture;
pub mod schema;

use std::{fmt, str::FromStr};

use sysdiagram_core::{error::GraphError, graph::Graph};

pub use architecture::build_architecture_graph;
pub use schema::build_schema_graph;

/// One of the diagrams this crate can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagramKind {
    /// Entity-relationship view of the database tables.
    Schema,
    /// Layered view of the deployed services and their communication.
    Architecture,
}

impl DiagramKind {
    /// Every diagram, in generation order.
    pub const ALL: [DiagramKind; 2] = [Self::Architecture, Self::Schema];

    /// File name of the rendered diagram, without extension.
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::Schema => "database_schema",
            Self::Architecture => "system_architecture",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Schema => "Database Schema",
            Self::Architecture => "System Architecture",
        }
    }

    /// What the diagram shows, one item per line of the run summary.
    pub fn highlights(self) -> &'static [&'static str] {
        match self {
            Self::Schema => &[
                "Users, admins and admin permissions",
                "Chat sessions and messages",
                "Message flags and admin activity log",
                "Verification and password reset tokens",
                "Ownership (solid) and reference (dashed) relations",
            ],
            Self::Architecture => &[
                "Frontend (React + Vite)",
                "Backend (Spring Boot with 12 controllers)",
                "Database (MySQL)",
                "Cache (Redis)",
                "AI (Ollama LLM)",
                "External Services (Email)",
                "All data flows and connections",
            ],
        }
    }

    /// Builds the graph for this diagram.
    pub fn build(self) -> Graph {
        match self {
            Self::Schema => build_schema_graph(),
            Self::Architecture => build_architecture_graph(),
        }
    }

    /// Builds the graph, reporting a malformed definition as an error.
    pub fn try_build(self) -> Result<Graph, GraphError> {
        match self {
            Self::Schema => schema::schema_graph(),
            Self::Architecture => architecture::architecture_graph(),
        }
    }
}

impl FromStr for DiagramKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "schema" => Ok(Self::Schema),
            "architecture" => Ok(Self::Architecture),
            _ => Err(format!(
                "unknown diagram `{s}` (expected schema or architecture)"
            )),
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stems() {
        assert_eq!(DiagramKind::Schema.file_stem(), "database_schema");
        assert_eq!(DiagramKind::Architecture.file_stem(), "system_architecture");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("schema".parse::<DiagramKind>(), Ok(DiagramKind::Schema));
        assert_eq!(
            "Architecture".parse::<DiagramKind>(),
            Ok(DiagramKind::Architecture)
        );
        assert!("erd".parse::<DiagramKind>().is_err());
    }

    #[test]
    fn test_build_matches_kind() {
        assert_eq!(DiagramKind::Schema.build().node_count(), 9);
        assert_eq!(DiagramKind::Architecture.build().node_count(), 7);
        for kind in DiagramKind::ALL {
            assert_eq!(kind.build(), kind.build());
            assert_eq!(kind.try_build(), Ok(kind.build()));
            assert!(!kind.highlights().is_empty());
        }
    }
}
