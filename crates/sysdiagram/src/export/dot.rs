//! Conversion of a [`Graph`] into Graphviz DOT source.
//!
//! The graph is first mapped onto the `dot-structures` syntax tree and then
//! printed with the `graphviz-rust` printer. Statements are emitted in a
//! fixed order: global attribute blocks, top-level nodes, one subgraph per
//! cluster, then edges. The same graph always yields the same text.

use dot_structures::{
    Attribute, Edge as DotEdge, EdgeTy, Graph as DotGraph, GraphAttributes, Id as DotId,
    Node as DotNode, NodeId, Stmt, Subgraph, Vertex,
};
use graphviz_rust::printer::{DotPrinter, PrinterContext};
use log::trace;

use sysdiagram_core::{
    graph::{Cluster, Edge, Graph, Node},
    label::Label,
    style::{EdgeStyle, Font, LineStyle, NodeStyle},
};

/// Serializes `graph` to DOT source text.
///
/// # Examples
///
/// ```
/// use sysdiagram::{diagram::build_schema_graph, export::dot::to_dot};
///
/// let source = to_dot(&build_schema_graph());
/// assert!(source.contains("digraph"));
/// assert!(source.contains("User -> ChatSession"));
/// ```
pub fn to_dot(graph: &Graph) -> String {
    let dot_graph = to_dot_graph(graph);
    let body = dot_graph.print(&mut PrinterContext::default());
    trace!(bytes = body.len(); "Graph serialized to DOT");

    if graph.comment().is_empty() {
        body
    } else {
        format!("// {}\n{body}", graph.comment().replace('\n', " "))
    }
}

/// Maps `graph` onto the `dot-structures` syntax tree.
pub fn to_dot_graph(graph: &Graph) -> DotGraph {
    let mut stmts = Vec::new();

    let graph_attrs = graph_attributes(graph);
    if !graph_attrs.is_empty() {
        stmts.push(Stmt::GAttribute(GraphAttributes::Graph(graph_attrs)));
    }
    if !graph.node_defaults().is_empty() {
        stmts.push(Stmt::GAttribute(GraphAttributes::Node(node_attributes(
            graph.node_defaults(),
        ))));
    }
    if !graph.edge_defaults().is_empty() {
        stmts.push(Stmt::GAttribute(GraphAttributes::Edge(edge_attributes(
            graph.edge_defaults(),
        ))));
    }

    stmts.extend(graph.top_level_nodes().map(node_stmt));

    for cluster in graph.clusters() {
        stmts.push(Stmt::Subgraph(cluster_subgraph(graph, cluster)));
    }

    stmts.extend(graph.edges().iter().map(edge_stmt));

    DotGraph::DiGraph {
        id: plain("G"),
        strict: false,
        stmts,
    }
}

fn graph_attributes(graph: &Graph) -> Vec<Attribute> {
    let style = graph.style();
    let mut attrs = vec![
        attr("rankdir", plain(style.rank_dir().as_str())),
        attr("splines", plain(style.splines().as_str())),
    ];
    if let Some(sep) = style.node_sep() {
        attrs.push(attr("nodesep", number(sep)));
    }
    if let Some(sep) = style.rank_sep() {
        attrs.push(attr("ranksep", number(sep)));
    }
    if let Some(color) = style.background() {
        attrs.push(attr("bgcolor", quoted(&color.to_string())));
    }
    if let Some(dpi) = style.dpi() {
        attrs.push(attr("dpi", plain(&dpi.to_string())));
    }
    attrs
}

fn node_attributes(style: &NodeStyle) -> Vec<Attribute> {
    let mut attrs = Vec::new();
    if let Some(shape) = style.shape() {
        attrs.push(attr("shape", plain(shape.as_str())));
    }
    if style.is_filled() {
        attrs.push(attr("style", plain("filled")));
    }
    if let Some(color) = style.fill_color() {
        attrs.push(attr("fillcolor", quoted(&color.to_string())));
    }
    if let Some(font) = style.font() {
        push_font(&mut attrs, font);
    }
    attrs
}

fn edge_attributes(style: &EdgeStyle) -> Vec<Attribute> {
    let mut attrs = Vec::new();
    if let Some(color) = style.color() {
        attrs.push(attr("color", quoted(&color.to_string())));
    }
    if let Some(width) = style.pen_width() {
        attrs.push(attr("penwidth", number(width)));
    }
    if style.line_style() != LineStyle::Solid {
        attrs.push(attr("style", plain(style.line_style().as_str())));
    }
    if let Some(font) = style.font() {
        push_font(&mut attrs, font);
    }
    if let Some(color) = style.font_color() {
        attrs.push(attr("fontcolor", quoted(&color.to_string())));
    }
    if let Some(size) = style.font_size() {
        attrs.push(attr("fontsize", number(size)));
    }
    if let Some(size) = style.arrow_size() {
        attrs.push(attr("arrowsize", number(size)));
    }
    if !style.is_constraint() {
        attrs.push(attr("constraint", plain("false")));
    }
    attrs
}

fn push_font(attrs: &mut Vec<Attribute>, font: &Font) {
    attrs.push(attr("fontname", quoted(font.family())));
    attrs.push(attr("fontsize", number(font.size())));
}

fn node_stmt(node: &Node) -> Stmt {
    let mut attributes = vec![attr("label", label_id(node.label()))];
    attributes.extend(node_attributes(node.style()));
    Stmt::Node(DotNode {
        id: NodeId(id(node.id().as_str()), None),
        attributes,
    })
}

fn cluster_subgraph(graph: &Graph, cluster: &Cluster) -> Subgraph {
    let style = cluster.style();
    let mut stmts = vec![Stmt::Attribute(attr("label", quoted(cluster.label())))];

    let mut styles = Vec::new();
    if style.fill_color().is_some() {
        styles.push("filled");
    }
    if style.is_rounded() {
        styles.push("rounded");
    }
    if !styles.is_empty() {
        stmts.push(Stmt::Attribute(attr("style", quoted(&styles.join(",")))));
    }
    if let Some(color) = style.border_color() {
        stmts.push(Stmt::Attribute(attr("color", quoted(&color.to_string()))));
    }
    if let Some(color) = style.fill_color() {
        stmts.push(Stmt::Attribute(attr("fillcolor", quoted(&color.to_string()))));
    }
    if let Some(font) = style.font() {
        stmts.push(Stmt::Attribute(attr("fontname", quoted(font.family()))));
        stmts.push(Stmt::Attribute(attr("fontsize", number(font.size()))));
    }
    if let Some(just) = style.label_just() {
        stmts.push(Stmt::Attribute(attr("labeljust", plain(just.as_str()))));
    }
    if let Some(width) = style.pen_width() {
        stmts.push(Stmt::Attribute(attr("penwidth", number(width))));
    }
    if let Some(margin) = style.margin() {
        stmts.push(Stmt::Attribute(attr("margin", number(margin))));
    }

    stmts.extend(
        cluster
            .members()
            .iter()
            .filter_map(|member| graph.node(member.as_str()))
            .map(node_stmt),
    );

    Subgraph {
        id: id(cluster.id().as_str()),
        stmts,
    }
}

fn edge_stmt(edge: &Edge) -> Stmt {
    let mut attributes = Vec::new();
    if let Some(label) = edge.label() {
        attributes.push(attr("label", quoted(label)));
    }
    attributes.extend(edge_attributes(edge.style()));

    Stmt::Edge(DotEdge {
        ty: EdgeTy::Pair(
            Vertex::N(NodeId(id(edge.from().as_str()), None)),
            Vertex::N(NodeId(id(edge.to().as_str()), None)),
        ),
        attributes,
    })
}

fn attr(key: &str, value: DotId) -> Attribute {
    Attribute(DotId::Plain(key.to_string()), value)
}

fn label_id(label: &Label) -> DotId {
    match label {
        Label::Text(text) => quoted(text),
        Label::Table(table) => DotId::Html(format!("<{}>", table.to_html())),
    }
}

/// Node or subgraph identifier, quoted unless it is a plain DOT identifier.
fn id(value: &str) -> DotId {
    if is_plain_identifier(value) {
        plain(value)
    } else {
        quoted(value)
    }
}

fn plain(value: &str) -> DotId {
    DotId::Plain(value.to_string())
}

fn number(value: f32) -> DotId {
    DotId::Plain(value.to_string())
}

/// Double-quoted DOT string. Newlines become the `\n` centered line break.
fn quoted(value: &str) -> DotId {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(ch),
        }
    }
    out.push('"');
    DotId::Escaped(out)
}

fn is_plain_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use sysdiagram_core::{
        color::Color,
        graph::{Cluster, Edge, Graph, Node},
        label::{Cell, Row, TableLabel},
        style::{ClusterStyle, EdgeStyle, GraphStyle, RankDir, Splines},
    };

    use super::*;

    fn sample_graph() -> Graph {
        let mut graph = Graph::new(
            "Sample",
            GraphStyle::new(RankDir::LeftRight, Splines::Spline).with_node_sep(1.2),
        );
        let tint = Color::new("#E8F5E9").unwrap();
        graph
            .add_cluster(
                Cluster::new("cluster_backend", "Backend Layer")
                    .with_style(ClusterStyle::filled_rounded(tint)),
            )
            .unwrap();
        let card = TableLabel::new().with_row(Row::new().with_cell(Cell::text("API & more")));
        graph
            .add_node_to_cluster("cluster_backend", Node::new("SpringBoot", card))
            .unwrap();
        graph.add_node(Node::new("MySQL", "My \"SQL\"")).unwrap();
        let style = EdgeStyle::dashed(Color::new("#388E3C").unwrap()).without_constraint();
        graph
            .add_edge(
                Edge::new("SpringBoot", "MySQL")
                    .with_label("JPA\nSQL")
                    .with_style(style),
            )
            .unwrap();
        graph
    }

    #[test]
    fn test_quoting() {
        assert_eq!(quoted("a\"b"), DotId::Escaped("\"a\\\"b\"".to_string()));
        assert_eq!(quoted("a\nb"), DotId::Escaped("\"a\\nb\"".to_string()));
        assert_eq!(quoted("C:\\bin"), DotId::Escaped("\"C:\\\\bin\"".to_string()));
    }

    #[test]
    fn test_plain_identifiers() {
        assert!(is_plain_identifier("cluster_frontend"));
        assert!(is_plain_identifier("legend"));
        assert!(!is_plain_identifier("1abc"));
        assert!(!is_plain_identifier("with space"));
        assert!(!is_plain_identifier(""));
        assert_eq!(id("has-dash"), DotId::Escaped("\"has-dash\"".to_string()));
    }

    #[test]
    fn test_dot_contains_all_parts() {
        let source = to_dot(&sample_graph());

        assert!(source.starts_with("// Sample\n"));
        assert!(source.contains("digraph"));
        assert!(source.contains("rankdir=LR"));
        assert!(source.contains("nodesep=1.2"));
        assert!(source.contains("subgraph cluster_backend"));
        assert!(source.contains("\"filled,rounded\""));
        assert!(source.contains("API &amp; more"));
        assert!(source.contains("label=\"My \\\"SQL\\\"\""));
        assert!(source.contains("SpringBoot -> MySQL"));
        assert!(source.contains("label=\"JPA\\nSQL\""));
        assert!(source.contains("style=dashed"));
        assert!(source.contains("constraint=false"));
        assert!(source.contains("color=\"#388e3c\""));
    }

    #[test]
    fn test_statement_order() {
        let DotGraph::DiGraph { stmts, .. } = to_dot_graph(&sample_graph()) else {
            panic!("expected a digraph");
        };

        assert!(matches!(stmts[0], Stmt::GAttribute(GraphAttributes::Graph(_))));
        // Top-level node, cluster, edge
        assert!(matches!(stmts[1], Stmt::Node(_)));
        assert!(matches!(stmts[2], Stmt::Subgraph(_)));
        assert!(matches!(stmts[3], Stmt::Edge(_)));
        assert_eq!(stmts.len(), 4);
    }

    #[test]
    fn test_cluster_nodes_only_inside_subgraph() {
        let source = to_dot(&sample_graph());
        let declarations =
            source.matches("SpringBoot[").count() + source.matches("SpringBoot [").count();
        assert_eq!(declarations, 1);
    }

    #[test]
    fn test_serialization_is_stable() {
        let graph = sample_graph();
        assert_eq!(to_dot(&graph), to_dot(&graph));
    }
}
