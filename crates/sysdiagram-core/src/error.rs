//! Errors raised while building a [`Graph`](crate::graph::Graph).

use thiserror::Error;

use crate::{color::ColorError, identifier::Id};

/// Violation of a graph invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("node `{0}` is already registered")]
    DuplicateNode(Id),

    #[error("cluster `{0}` is already registered")]
    DuplicateCluster(Id),

    #[error("edge `{from}` -> `{to}` references unknown node `{missing}`")]
    UnknownNode { from: Id, to: Id, missing: Id },

    #[error("unknown cluster `{0}`")]
    UnknownCluster(Id),

    #[error(transparent)]
    Color(#[from] ColorError),
}
