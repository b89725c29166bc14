//! sysdiagram core types
//!
//! This crate provides the graph description model used by sysdiagram. It
//! includes:
//!
//! - **Identifiers**: Node and cluster identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Styles**: Typed Graphviz attribute groups ([`style`] module)
//! - **Labels**: HTML-like table labels ([`label`] module)
//! - **Graph**: Nodes, edges and clusters with invariant checks ([`graph`] module)

pub mod color;
pub mod error;
pub mod graph;
pub mod identifier;
pub mod label;
pub mod style;
