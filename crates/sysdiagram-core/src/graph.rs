//! The graph description handed to a renderer.
//!
//! A [`Graph`] is an ordered collection of [`Node`]s, [`Edge`]s and
//! [`Cluster`]s plus global layout attributes. Insertion order is preserved
//! so that serializing the same graph twice yields identical output.
//!
//! # Invariants
//!
//! - Node identifiers are unique across the whole graph, clusters included.
//! - Both endpoints of an edge are registered before the edge is added.
//! - A node belongs to at most one cluster.
//!
//! Every mutating method checks these and returns a [`GraphError`] instead
//! of overwriting or dangling.
//!
//! # Example
//!
//! ```
//! use sysdiagram_core::{
//!     graph::{Edge, Graph, Node},
//!     style::{GraphStyle, RankDir, Splines},
//! };
//!
//! let mut graph = Graph::new("Example", GraphStyle::new(RankDir::TopBottom, Splines::Ortho));
//! graph.add_node(Node::new("User", "User")).unwrap();
//! graph.add_node(Node::new("ChatSession", "ChatSession")).unwrap();
//! graph.add_edge(Edge::new("User", "ChatSession").with_label("1:N")).unwrap();
//!
//! assert!(graph.add_edge(Edge::new("User", "Missing")).is_err());
//! assert_eq!(graph.edges().len(), 1);
//! ```

use std::collections::HashMap;

use indexmap::IndexMap;
use log::trace;

use crate::{
    error::GraphError,
    identifier::Id,
    label::Label,
    style::{ClusterStyle, EdgeStyle, GraphStyle, NodeStyle},
};

/// A labelled vertex, standing in for a database table or a system component.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: Id,
    label: Label,
    style: NodeStyle,
}

impl Node {
    pub fn new(id: impl Into<Id>, label: impl Into<Label>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            style: NodeStyle::default(),
        }
    }

    pub fn with_style(mut self, style: NodeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn style(&self) -> &NodeStyle {
        &self.style
    }
}

/// A directed, labelled relationship between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    from: Id,
    to: Id,
    label: Option<String>,
    style: EdgeStyle,
}

impl Edge {
    pub fn new(from: impl Into<Id>, to: impl Into<Id>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: None,
            style: EdgeStyle::default(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_style(mut self, style: EdgeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn from(&self) -> &Id {
        &self.from
    }

    pub fn to(&self) -> &Id {
        &self.to
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn style(&self) -> &EdgeStyle {
        &self.style
    }
}

/// A named visual grouping of nodes.
///
/// Graphviz only draws a boundary around subgraphs whose name starts with
/// `cluster`, so [`Cluster::new`] expects such a name.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    id: Id,
    label: String,
    style: ClusterStyle,
    members: Vec<Id>,
}

impl Cluster {
    pub fn new(id: impl Into<Id>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            style: ClusterStyle::default(),
            members: Vec::new(),
        }
    }

    pub fn with_style(mut self, style: ClusterStyle) -> Self {
        self.style = style;
        self
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn style(&self) -> &ClusterStyle {
        &self.style
    }

    /// Identifiers of the nodes in this cluster, in insertion order.
    pub fn members(&self) -> &[Id] {
        &self.members
    }
}

/// A complete graph description.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    comment: String,
    style: GraphStyle,
    node_defaults: NodeStyle,
    edge_defaults: EdgeStyle,
    nodes: IndexMap<Id, Node>,
    clusters: IndexMap<Id, Cluster>,
    cluster_of: HashMap<Id, Id>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Creates an empty graph.
    ///
    /// # Arguments
    ///
    /// * `comment` - Free-form description, emitted as a DOT comment.
    /// * `style` - Global layout attributes.
    pub fn new(comment: impl Into<String>, style: GraphStyle) -> Self {
        Self {
            comment: comment.into(),
            style,
            node_defaults: NodeStyle::default(),
            edge_defaults: EdgeStyle::default(),
            nodes: IndexMap::new(),
            clusters: IndexMap::new(),
            cluster_of: HashMap::new(),
            edges: Vec::new(),
        }
    }

    /// Sets the attributes applied to every node unless overridden.
    pub fn with_node_defaults(mut self, defaults: NodeStyle) -> Self {
        self.node_defaults = defaults;
        self
    }

    /// Sets the attributes applied to every edge unless overridden.
    pub fn with_edge_defaults(mut self, defaults: EdgeStyle) -> Self {
        self.edge_defaults = defaults;
        self
    }

    /// Registers a top-level node.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateNode`] if the identifier is taken.
    pub fn add_node(&mut self, node: Node) -> Result<(), GraphError> {
        if self.nodes.contains_key(node.id()) {
            return Err(GraphError::DuplicateNode(node.id().clone()));
        }
        trace!(node_id = node.id().as_str(); "Node registered");
        self.nodes.insert(node.id().clone(), node);
        Ok(())
    }

    /// Registers an empty cluster.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateCluster`] if the identifier is taken.
    pub fn add_cluster(&mut self, mut cluster: Cluster) -> Result<(), GraphError> {
        if self.clusters.contains_key(cluster.id()) {
            return Err(GraphError::DuplicateCluster(cluster.id().clone()));
        }
        cluster.members.clear();
        trace!(cluster_id = cluster.id().as_str(); "Cluster registered");
        self.clusters.insert(cluster.id().clone(), cluster);
        Ok(())
    }

    /// Registers a node as a member of an existing cluster.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownCluster`] if the cluster is not registered,
    /// or [`GraphError::DuplicateNode`] if the node identifier is taken.
    pub fn add_node_to_cluster(&mut self, cluster_id: &str, node: Node) -> Result<(), GraphError> {
        let Some(cluster) = self.clusters.get_mut(cluster_id) else {
            return Err(GraphError::UnknownCluster(Id::new(cluster_id)));
        };
        if self.nodes.contains_key(node.id()) {
            return Err(GraphError::DuplicateNode(node.id().clone()));
        }
        cluster.members.push(node.id().clone());
        self.cluster_of.insert(node.id().clone(), cluster.id().clone());
        trace!(node_id = node.id().as_str(), cluster_id; "Node registered in cluster");
        self.nodes.insert(node.id().clone(), node);
        Ok(())
    }

    /// Registers an edge between two existing nodes.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownNode`] naming the first endpoint that is
    /// not registered.
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        for endpoint in [edge.from(), edge.to()] {
            if !self.nodes.contains_key(endpoint) {
                return Err(GraphError::UnknownNode {
                    from: edge.from().clone(),
                    to: edge.to().clone(),
                    missing: endpoint.clone(),
                });
            }
        }
        trace!(from = edge.from().as_str(), to = edge.to().as_str(); "Edge registered");
        self.edges.push(edge);
        Ok(())
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn style(&self) -> &GraphStyle {
        &self.style
    }

    pub fn node_defaults(&self) -> &NodeStyle {
        &self.node_defaults
    }

    pub fn edge_defaults(&self) -> &EdgeStyle {
        &self.edge_defaults
    }

    /// Looks up a node by identifier.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// All nodes, clustered or not, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Nodes that do not belong to any cluster, in insertion order.
    pub fn top_level_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes
            .values()
            .filter(|node| !self.cluster_of.contains_key(node.id()))
    }

    pub fn clusters(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.values()
    }

    /// Returns the cluster a node belongs to, if any.
    pub fn cluster_of(&self, node_id: &str) -> Option<&Cluster> {
        self.cluster_of
            .get(node_id)
            .and_then(|cluster_id| self.clusters.get(cluster_id))
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
