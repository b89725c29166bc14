//! Database entity-relationship diagram.
//!
//! One node per table, labelled with the table's columns and constraints, and
//! one edge per foreign-key or reviewer relationship. Ownership relations
//! (`1:N`) are drawn solid and take part in ranking. Admin moderation
//! references are dashed layout hints that do not constrain ranks.

use sysdiagram_core::{
    color::Color,
    error::GraphError,
    graph::{Edge, Graph, Node},
    label::{Align, Cell, Row, TableLabel, TextRun},
    style::{EdgeStyle, Font, GraphStyle, NodeStyle, RankDir, Shape, Splines},
};

/// A database table and its columns.
#[derive(Debug, Clone, Copy)]
pub struct Table {
    /// Node identifier.
    pub id: &'static str,
    /// Title shown in the header row.
    pub title: &'static str,
    /// Header background.
    pub accent: &'static str,
    /// `(column: Type, constraints)` pairs in declaration order.
    pub columns: &'static [(&'static str, &'static str)],
}

/// How a relationship is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// Parent owns many children. Solid, ranked.
    Ownership,
    /// Moderation reference from an admin. Dashed, not ranked.
    Reference,
}

/// A relationship between two tables.
#[derive(Debug, Clone, Copy)]
pub struct Relation {
    pub from: &'static str,
    pub to: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub kind: RelationKind,
}

pub const TABLES: &[Table] = &[
    Table {
        id: "User",
        title: "User",
        accent: "#4A90E2",
        columns: &[
            ("🔑 id: Long", "PK"),
            ("username: String(50)", "UNIQUE, NOT NULL"),
            ("email: String(255)", "UNIQUE, NOT NULL"),
            ("password_hash: String", "NOT NULL"),
            ("salt: String(64)", "NOT NULL"),
            ("first_name: String(100)", ""),
            ("last_name: String(100)", ""),
            ("profile_picture: String(500)", ""),
            ("is_active: Boolean", "DEFAULT true"),
            ("email_verified: Boolean", "DEFAULT false"),
            ("login_attempts: Integer", "DEFAULT 0"),
            ("locked_until: DateTime", ""),
            ("created_at: DateTime", "NOT NULL"),
            ("updated_at: DateTime", ""),
            ("last_login_at: DateTime", ""),
        ],
    },
    Table {
        id: "Admin",
        title: "Admin",
        accent: "#E74C3C",
        columns: &[
            ("🔑 id: Long", "PK"),
            ("username: String(50)", "UNIQUE, NOT NULL"),
            ("email: String(255)", "UNIQUE, NOT NULL"),
            ("password_hash: String", "NOT NULL"),
            ("salt: String(64)", "NOT NULL"),
            ("first_name: String(100)", ""),
            ("last_name: String(100)", ""),
            ("profile_picture: String(500)", ""),
            ("level: Integer", "DEFAULT 2"),
            ("is_active: Boolean", "DEFAULT true"),
            ("login_attempts: Integer", "DEFAULT 0"),
            ("locked_until: DateTime", ""),
            ("created_by: Long", "FK"),
            ("created_at: DateTime", "NOT NULL"),
            ("updated_at: DateTime", ""),
            ("last_login_at: DateTime", ""),
        ],
    },
    // Element collection table backing Admin.permissions
    Table {
        id: "AdminPermissions",
        title: "Admin_Permissions",
        accent: "#E67E22",
        columns: &[("🔑 admin_id: Long", "FK"), ("permission: String", "")],
    },
    Table {
        id: "ChatSession",
        title: "ChatSession",
        accent: "#27AE60",
        columns: &[
            ("🔑 session_id: String(36)", "PK (UUID)"),
            ("user_id: Long", "FK, NOT NULL"),
            ("title: String(255)", ""),
            ("model: String(50)", "DEFAULT 'gpt-3.5-turbo'"),
            ("status: Enum", "ACTIVE/PAUSED/ARCHIVED/DELETED"),
            ("message_count: Integer", "DEFAULT 0"),
            ("token_usage: Long", "DEFAULT 0"),
            ("is_public: Boolean", "DEFAULT false"),
            ("is_flagged: Boolean", "DEFAULT false"),
            ("flag_reason: Text", ""),
            ("flagged_by: Long", "FK (Admin)"),
            ("flagged_at: DateTime", ""),
            ("created_at: DateTime", "NOT NULL"),
            ("updated_at: DateTime", ""),
            ("last_accessed_at: DateTime", ""),
            ("expires_at: DateTime", ""),
        ],
    },
    Table {
        id: "Message",
        title: "Message",
        accent: "#9B59B6",
        columns: &[
            ("🔑 id: Long", "PK"),
            ("session_id: String(36)", "FK, NOT NULL"),
            ("role: Enum", "USER/ASSISTANT/SYSTEM"),
            ("content: Text", "NOT NULL"),
            ("token_count: Integer", ""),
            ("model: String(50)", ""),
            ("metadata: JSON", ""),
            ("is_flagged: Boolean", "DEFAULT false"),
            ("flag_reason: Text", ""),
            ("flagged_by: Long", "FK (Admin)"),
            ("flagged_at: DateTime", ""),
            ("timestamp: DateTime", "NOT NULL"),
        ],
    },
    Table {
        id: "MessageFlag",
        title: "MessageFlag",
        accent: "#F39C12",
        columns: &[
            ("🔑 id: Long", "PK"),
            ("message_id: Long", "FK, NOT NULL"),
            ("flagged_by: Long", "FK (Admin), NOT NULL"),
            ("flag_type: Enum", "INAPPROPRIATE/SPAM/HARMFUL/OTHER"),
            ("reason: Text", ""),
            ("status: Enum", "PENDING/REVIEWED/RESOLVED/DISMISSED"),
            ("reviewed_by: Long", "FK (Admin)"),
            ("reviewed_at: DateTime", ""),
            ("created_at: DateTime", "NOT NULL"),
        ],
    },
    Table {
        id: "AdminActivityLog",
        title: "AdminActivityLog",
        accent: "#16A085",
        columns: &[
            ("🔑 id: Long", "PK"),
            ("admin_id: Long", "FK, NOT NULL"),
            ("action: String(100)", "NOT NULL"),
            ("resource_type: String(50)", "NOT NULL"),
            ("resource_id: String(100)", ""),
            ("details: JSON", ""),
            ("ip_address: String(45)", ""),
            ("user_agent: Text", ""),
            ("created_at: DateTime", "NOT NULL"),
        ],
    },
    Table {
        id: "VerificationToken",
        title: "VerificationToken",
        accent: "#3498DB",
        columns: &[
            ("🔑 id: Long", "PK"),
            ("token: String", "UNIQUE, NOT NULL"),
            ("user_id: Long", "NOT NULL"),
            ("user_type: String", "'user' or 'admin'"),
            ("expiry_date: DateTime", "NOT NULL (+24h)"),
            ("created_date: DateTime", "NOT NULL"),
        ],
    },
    Table {
        id: "PasswordResetToken",
        title: "PasswordResetToken",
        accent: "#E67E22",
        columns: &[
            ("🔑 id: Long", "PK"),
            ("token: String", "UNIQUE, NOT NULL"),
            ("user_id: Long", "NOT NULL"),
            ("user_type: String", "'user' or 'admin'"),
            ("expiry_date: DateTime", "NOT NULL (+15min)"),
            ("created_date: DateTime", "NOT NULL"),
            ("attempt_count: Integer", "DEFAULT 0"),
            ("requesting_ip: String", ""),
        ],
    },
];

pub const RELATIONS: &[Relation] = &[
    Relation {
        from: "User",
        to: "ChatSession",
        label: "1:N",
        color: "#2C3E50",
        kind: RelationKind::Ownership,
    },
    Relation {
        from: "ChatSession",
        to: "Message",
        label: "1:N",
        color: "#2C3E50",
        kind: RelationKind::Ownership,
    },
    Relation {
        from: "Admin",
        to: "AdminPermissions",
        label: "1:N",
        color: "#C0392B",
        kind: RelationKind::Ownership,
    },
    Relation {
        from: "Admin",
        to: "AdminActivityLog",
        label: "1:N",
        color: "#C0392B",
        kind: RelationKind::Ownership,
    },
    Relation {
        from: "Admin",
        to: "ChatSession",
        label: "flags",
        color: "#E74C3C",
        kind: RelationKind::Reference,
    },
    Relation {
        from: "Message",
        to: "MessageFlag",
        label: "1:N",
        color: "#8E44AD",
        kind: RelationKind::Ownership,
    },
    // MessageFlag.flagged_by
    Relation {
        from: "Admin",
        to: "MessageFlag",
        label: "flags",
        color: "#E74C3C",
        kind: RelationKind::Reference,
    },
    // MessageFlag.reviewed_by
    Relation {
        from: "Admin",
        to: "MessageFlag",
        label: "reviews",
        color: "#27AE60",
        kind: RelationKind::Reference,
    },
];

const OWNERSHIP_PEN_WIDTH: f32 = 2.0;

/// Builds the database schema diagram.
///
/// The definition is static; the same graph is returned on every call.
pub fn build_schema_graph() -> Graph {
    schema_graph().expect("built-in schema diagram is well-formed")
}

pub(crate) fn schema_graph() -> Result<Graph, GraphError> {
    let mut graph = Graph::new(
        "Chatbot Database Schema",
        GraphStyle::new(RankDir::TopBottom, Splines::Ortho)
            .with_node_sep(0.8)
            .with_rank_sep(1.2),
    )
    .with_node_defaults(
        NodeStyle::new()
            .with_shape(Shape::Record)
            .with_fill(Color::new("lightblue")?)
            .with_font(Font::new("Arial", 10.0)),
    )
    .with_edge_defaults(EdgeStyle::new().with_font(Font::new("Arial", 9.0)));

    for table in TABLES {
        graph.add_node(
            Node::new(table.id, table_label(table)?)
                .with_style(NodeStyle::new().with_shape(Shape::Plaintext)),
        )?;
    }

    for relation in RELATIONS {
        graph.add_edge(relation_edge(relation)?)?;
    }

    Ok(graph)
}

fn table_label(table: &Table) -> Result<TableLabel, GraphError> {
    let header = Cell::new(TextRun::new(table.title).bold())
        .with_colspan(2)
        .with_bgcolor(Color::new(table.accent)?);

    let mut label = TableLabel::new().with_row(Row::new().with_cell(header));
    for (column, constraints) in table.columns {
        label.push_row(
            Row::new()
                .with_cell(Cell::text(*column).with_align(Align::Left))
                .with_cell(Cell::text(*constraints).with_align(Align::Left)),
        );
    }
    Ok(label)
}

fn relation_edge(relation: &Relation) -> Result<Edge, GraphError> {
    let color = Color::new(relation.color)?;
    let style = match relation.kind {
        RelationKind::Ownership => EdgeStyle::solid(color).with_pen_width(OWNERSHIP_PEN_WIDTH),
        RelationKind::Reference => EdgeStyle::dashed(color).without_constraint(),
    };
    Ok(Edge::new(relation.from, relation.to)
        .with_label(relation.label)
        .with_style(style))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use sysdiagram_core::style::LineStyle;

    use super::*;

    #[test]
    fn test_definition_is_well_formed() {
        let result = schema_graph();
        assert!(result.is_ok(), "schema definition invalid: {:?}", result.err());
    }

    #[test]
    fn test_node_set_is_fixed_table_set() {
        let graph = build_schema_graph();
        let ids: Vec<_> = graph.nodes().map(|n| n.id().as_str()).collect();

        assert_eq!(
            ids,
            [
                "User",
                "Admin",
                "AdminPermissions",
                "ChatSession",
                "Message",
                "MessageFlag",
                "AdminActivityLog",
                "VerificationToken",
                "PasswordResetToken",
            ]
        );
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_every_edge_endpoint_is_registered() {
        let graph = build_schema_graph();
        assert_eq!(graph.edges().len(), RELATIONS.len());
        for edge in graph.edges() {
            assert!(graph.contains_node(edge.from().as_str()), "{}", edge.from());
            assert!(graph.contains_node(edge.to().as_str()), "{}", edge.to());
        }
    }

    #[test]
    fn test_reference_edges_are_dashed_hints() {
        let graph = build_schema_graph();
        for edge in graph.edges() {
            let style = edge.style();
            if edge.label() == Some("1:N") {
                assert_eq!(style.line_style(), LineStyle::Solid);
                assert!(style.is_constraint());
                assert_eq!(style.pen_width(), Some(OWNERSHIP_PEN_WIDTH));
            } else {
                assert_eq!(edge.from(), "Admin");
                assert_eq!(style.line_style(), LineStyle::Dashed);
                assert!(!style.is_constraint());
            }
        }
    }

    #[test]
    fn test_labels_list_every_column() {
        let graph = build_schema_graph();
        for table in TABLES {
            let node = graph.node(table.id).unwrap();
            let label = node.label().as_table().unwrap();

            assert_eq!(label.title().as_deref(), Some(table.title));
            assert_eq!(label.rows().len(), table.columns.len() + 1);
            for row in label.rows() {
                assert_eq!(row.width(), 2);
            }
        }
    }

    #[test]
    fn test_primary_key_marked_first() {
        for table in TABLES {
            let (first, _) = table.columns[0];
            assert!(first.starts_with("🔑"), "{} has no key column first", table.id);
        }
    }

    #[test]
    fn test_repeated_builds_are_equal() {
        assert_eq!(build_schema_graph(), build_schema_graph());
    }
}
