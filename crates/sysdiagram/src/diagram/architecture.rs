//! System architecture diagram.
//!
//! Each layer of the chatbot system is a cluster holding one component card:
//! a table with a colored header, a technology subtitle, the listening port
//! and bulleted feature sections. Edges are the communication paths between
//! layers. Synchronous calls are solid and asynchronous or caching paths are
//! dashed, as explained by the legend cluster.

use sysdiagram_core::{
    color::Color,
    error::GraphError,
    graph::{Cluster, Edge, Graph, Node},
    label::{Align, Cell, Row, TableLabel, TextRun},
    style::{
        ClusterStyle, EdgeStyle, Font, GraphStyle, LabelJust, LineStyle, NodeStyle, RankDir,
        Shape, Splines,
    },
};

const FONT: &str = "Segoe UI";
const CLUSTER_FONT: &str = "Segoe UI Bold";
const SECTION_BG: &str = "#F5F5F5";
const BULLET: &str = "• ";

/// Whether a communication path blocks the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Communication {
    /// Request/response on the caller's path. Drawn solid.
    Synchronous,
    /// Fire-and-forget or cache traffic. Drawn dashed.
    Asynchronous,
}

impl Communication {
    /// Line style used for this kind of communication.
    pub fn line_style(self) -> LineStyle {
        match self {
            Self::Synchronous => LineStyle::Solid,
            Self::Asynchronous => LineStyle::Dashed,
        }
    }
}

/// A communication path between two components.
#[derive(Debug, Clone, Copy)]
pub struct Flow {
    pub from: &'static str,
    pub to: &'static str,
    /// One purpose per line.
    pub purposes: &'static [&'static str],
    pub color: &'static str,
    pub pen_width: f32,
    pub communication: Communication,
}

impl Flow {
    /// Edge label: purposes on separate lines, padded away from the edge.
    pub fn label(&self) -> String {
        format!("  {}  ", self.purposes.join("\n  "))
    }
}

pub const FLOWS: &[Flow] = &[
    Flow {
        from: "Browser",
        to: "SpringBoot",
        purposes: &["HTTP/REST API", "JWT Authentication", "JSON Payloads"],
        color: "#1976D2",
        pen_width: 3.0,
        communication: Communication::Synchronous,
    },
    Flow {
        from: "SpringBoot",
        to: "MySQL",
        purposes: &["JPA/Hibernate", "SQL Queries", "Transactions"],
        color: "#388E3C",
        pen_width: 3.0,
        communication: Communication::Synchronous,
    },
    Flow {
        from: "SpringBoot",
        to: "Redis",
        purposes: &["Caching", "Rate Limiting", "Session Store"],
        color: "#D32F2F",
        pen_width: 2.5,
        communication: Communication::Asynchronous,
    },
    Flow {
        from: "SpringBoot",
        to: "Ollama",
        purposes: &["Chat Prompts", "AI Responses", "Streaming"],
        color: "#7B1FA2",
        pen_width: 3.0,
        communication: Communication::Synchronous,
    },
    Flow {
        from: "SpringBoot",
        to: "Email",
        purposes: &["SMTP", "Async Emails", "Templates"],
        color: "#F57C00",
        pen_width: 2.5,
        communication: Communication::Asynchronous,
    },
];

/// A system layer: one cluster holding one component card.
struct Layer {
    cluster: &'static str,
    title: &'static str,
    tint: &'static str,
    node: &'static str,
    card: fn() -> Result<TableLabel, GraphError>,
}

const LAYERS: &[Layer] = &[
    Layer {
        cluster: "cluster_frontend",
        title: "Frontend Layer",
        tint: "#E3F2FD",
        node: "Browser",
        card: frontend,
    },
    Layer {
        cluster: "cluster_backend",
        title: "Backend Layer",
        tint: "#E8F5E9",
        node: "SpringBoot",
        card: backend,
    },
    Layer {
        cluster: "cluster_database",
        title: "Database Layer",
        tint: "#FFF3E0",
        node: "MySQL",
        card: database,
    },
    Layer {
        cluster: "cluster_cache",
        title: "Cache Layer",
        tint: "#FFEBEE",
        node: "Redis",
        card: cache,
    },
    Layer {
        cluster: "cluster_ai",
        title: "AI/LLM Layer",
        tint: "#F3E5F5",
        node: "Ollama",
        card: ai,
    },
    Layer {
        cluster: "cluster_external",
        title: "External Services",
        tint: "#E8EAF6",
        node: "Email",
        card: email,
    },
];

const FLOW_LABEL_SIZE: f32 = 10.0;
const FLOW_ARROW_SIZE: f32 = 1.2;

/// Builds the system architecture diagram.
///
/// The definition is static; the same graph is returned on every call.
pub fn build_architecture_graph() -> Graph {
    architecture_graph().expect("built-in architecture diagram is well-formed")
}

pub(crate) fn architecture_graph() -> Result<Graph, GraphError> {
    let mut graph = Graph::new(
        "Chatbot System Architecture",
        GraphStyle::new(RankDir::LeftRight, Splines::Spline)
            .with_node_sep(1.2)
            .with_rank_sep(2.0)
            .with_background(Color::new("#F8F9FA")?)
            .with_dpi(300),
    )
    .with_node_defaults(NodeStyle::new().with_font(Font::new(FONT, 11.0)))
    .with_edge_defaults(EdgeStyle::new().with_font(Font::new(FONT, 9.0)));

    for layer in LAYERS {
        add_layer(&mut graph, layer)?;
    }

    for flow in FLOWS {
        graph.add_edge(flow_edge(flow)?)?;
    }

    let legend = Cluster::new("cluster_legend", "Communication Legend").with_style(
        ClusterStyle::filled_rounded(Color::new("#ECEFF1")?)
            .with_font(Font::new(CLUSTER_FONT, 11.0))
            .with_pen_width(2.0)
            .with_margin(15.0),
    );
    graph.add_cluster(legend)?;
    graph.add_node_to_cluster("cluster_legend", card_node("legend", legend_table()?))?;

    Ok(graph)
}

fn add_layer(graph: &mut Graph, layer: &Layer) -> Result<(), GraphError> {
    let cluster = Cluster::new(layer.cluster, layer.title).with_style(
        ClusterStyle::filled_rounded(Color::new(layer.tint)?)
            .with_font(Font::new(CLUSTER_FONT, 14.0))
            .with_label_just(LabelJust::Left)
            .with_pen_width(2.0)
            .with_margin(20.0),
    );
    graph.add_cluster(cluster)?;
    graph.add_node_to_cluster(layer.cluster, card_node(layer.node, (layer.card)()?))
}

fn card_node(id: &str, card: TableLabel) -> Node {
    Node::new(id, card).with_style(NodeStyle::new().with_shape(Shape::Plaintext))
}

fn flow_edge(flow: &Flow) -> Result<Edge, GraphError> {
    let color = Color::new(flow.color)?;
    let style = EdgeStyle::solid(color)
        .with_line_style(flow.communication.line_style())
        .with_pen_width(flow.pen_width)
        .with_label_font(Some(color), Some(FLOW_LABEL_SIZE))
        .with_arrow_size(FLOW_ARROW_SIZE);
    Ok(Edge::new(flow.from, flow.to)
        .with_label(flow.label())
        .with_style(style))
}

/// Builder for component cards.
///
/// Every row spans both columns except [`Card::pair`] rows.
struct Card {
    table: TableLabel,
    tint: Color,
    section: Color,
}

impl Card {
    /// Starts a card with a colored title row.
    ///
    /// `title_color` is the title text color; `None` keeps the default black.
    fn new(
        title: &str,
        header: &str,
        title_color: Option<&str>,
        tint: &str,
    ) -> Result<Self, GraphError> {
        let mut run = TextRun::new(title).bold().with_point_size(13.0);
        if let Some(color) = title_color {
            run = run.with_color(Color::new(color)?);
        }
        let title_cell = Cell::new(run)
            .with_colspan(2)
            .with_bgcolor(Color::new(header)?);
        let table = TableLabel::new()
            .with_cell_padding(10)
            .with_bgcolor(Color::new("white")?)
            .with_row(Row::new().with_cell(title_cell));
        Ok(Self {
            table,
            tint: Color::new(tint)?,
            section: Color::new(SECTION_BG)?,
        })
    }

    /// Bold technology line on the layer tint.
    fn subtitle(mut self, text: &str) -> Self {
        let cell = wide(Cell::new(TextRun::new(text).bold())).with_bgcolor(self.tint);
        self.table.push_row(Row::new().with_cell(cell));
        self
    }

    fn line(mut self, text: &str) -> Self {
        self.table.push_row(Row::new().with_cell(wide(Cell::text(text))));
        self
    }

    /// Bold section heading on a grey background.
    fn section(mut self, heading: &str) -> Self {
        let cell = wide(Cell::new(TextRun::new(heading).bold())).with_bgcolor(self.section);
        self.table.push_row(Row::new().with_cell(cell));
        self
    }

    fn bullet(self, text: &str) -> Self {
        self.line(&format!("{BULLET}{text}"))
    }

    fn bullets(self, items: &[&str]) -> Self {
        items.iter().fold(self, |card, item| card.bullet(item))
    }

    /// Two bullets side by side.
    fn pair(mut self, left: &str, right: &str) -> Self {
        self.table.push_row(
            Row::new()
                .with_cell(Cell::text(format!("{BULLET}{left}")).with_align(Align::Left))
                .with_cell(Cell::text(format!("{BULLET}{right}")).with_align(Align::Left)),
        );
        self
    }

    fn pairs(self, items: &[(&str, &str)]) -> Self {
        items.iter().fold(self, |card, (left, right)| card.pair(left, right))
    }

    fn build(self) -> TableLabel {
        self.table
    }
}

fn wide(cell: Cell) -> Cell {
    cell.with_align(Align::Left).with_colspan(2)
}

fn frontend() -> Result<TableLabel, GraphError> {
    Ok(Card::new("🌐 React Frontend", "#61DAFB", None, "#E3F2FD")?
        .subtitle("Vite + React 18")
        .line("Port: 5173")
        .section("Pages:")
        .pairs(&[
            ("ChatPage", "LoginPage"),
            ("RegisterPage", "ProfilePage"),
            ("ForgotPassword", "ResetPassword"),
            ("EmailVerify", "AdminDashboard"),
        ])
        .section("Features:")
        .bullets(&["Context API (Auth, Chat)", "Custom Hooks", "Component Library"])
        .build())
}

fn backend() -> Result<TableLabel, GraphError> {
    Ok(Card::new("☕ Spring Boot REST API", "#6DB33F", Some("white"), "#E8F5E9")?
        .subtitle("Java 17 + Spring Boot 3.4.4")
        .line("Port: 8080")
        .section("Controllers (12):")
        .pairs(&[
            ("AuthController", "ChatController"),
            ("ChatSessionController", "MessageController"),
            ("UserProfileController", "UserManagementController"),
            ("AdminManagementController", "AdminProfileController"),
            ("AdminSessionController", "AdminMessageController"),
            ("AdminActivityLogController", "AdminTokenManagement"),
        ])
        .section("Core Services:")
        .bullets(&[
            "JWT Authentication & Authorization",
            "Session & Message Management",
            "User & Admin Services",
            "Email Service (SMTP)",
            "Activity Logging & Auditing",
            "Rate Limiting & Security",
        ])
        .build())
}

fn database() -> Result<TableLabel, GraphError> {
    Ok(Card::new("🐬 MySQL Database", "#00758F", Some("white"), "#FFF3E0")?
        .subtitle("Relational DBMS")
        .line("Port: 3306")
        .section("Tables (8):")
        .pairs(&[
            ("users", "admins"),
            ("chat_sessions", "messages"),
            ("message_flags", "admin_activity_log"),
            ("verification_tokens", "password_reset_tokens"),
        ])
        .section("Features:")
        .bullets(&["JPA/Hibernate ORM", "Connection Pooling", "Transaction Management"])
        .build())
}

fn cache() -> Result<TableLabel, GraphError> {
    Ok(Card::new("⚡ Redis Cache", "#DC382D", Some("white"), "#FFEBEE")?
        .subtitle("In-Memory Data Store")
        .line("Port: 6379")
        .line("Docker: chatbot-redis")
        .section("Use Cases:")
        .bullets(&[
            "Session Data Caching",
            "Rate Limiting",
            "JWT Token Blacklist",
            "Temporary Token Storage",
            "Response Caching",
        ])
        .build())
}

fn ai() -> Result<TableLabel, GraphError> {
    Ok(Card::new("🤖 Ollama LLM Server", "#000000", Some("white"), "#F3E5F5")?
        .subtitle("Local Language Model")
        .line("Port: 11434")
        .section("Available Models:")
        .bullets(&["llama3 (Default)", "Other Compatible Models"])
        .section("API Endpoints:")
        .bullets(&["POST /api/generate", "POST /api/chat"])
        .build())
}

fn email() -> Result<TableLabel, GraphError> {
    Ok(Card::new("📧 Email Service", "#EA4335", Some("white"), "#E8EAF6")?
        .subtitle("SMTP Server")
        .section("Features:")
        .bullets(&[
            "Email Verification Links",
            "Password Reset Tokens",
            "System Notifications",
        ])
        .build())
}

fn legend_table() -> Result<TableLabel, GraphError> {
    let heading = Color::new(SECTION_BG)?;
    let header_cell = |text: &str| {
        Cell::new(TextRun::new(text).bold())
            .with_align(Align::Left)
            .with_bgcolor(heading)
    };
    let entry = |line: &str, meaning: &str| {
        Row::new()
            .with_cell(Cell::text(line).with_align(Align::Left))
            .with_cell(Cell::text(meaning).with_align(Align::Left))
    };

    Ok(TableLabel::new()
        .with_cell_padding(8)
        .with_bgcolor(Color::new("white")?)
        .with_row(
            Row::new()
                .with_cell(header_cell("Line Type"))
                .with_cell(header_cell("Description")),
        )
        .with_row(entry("Solid Line", "Synchronous Communication"))
        .with_row(entry("Dashed Line", "Asynchronous/Caching")))
}
