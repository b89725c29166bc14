//! Node and cluster identifiers.
//!
//! This module provides the [`Id`] type used to key nodes and clusters
//! within a [`Graph`](crate::graph::Graph).

use std::{borrow::Borrow, fmt};

/// Identifier of a node or cluster, unique within one graph.
///
/// # Examples
///
/// ```
/// use sysdiagram_core::identifier::Id;
///
/// let user = Id::new("User");
/// let session: Id = "ChatSession".into();
///
/// assert_eq!(user, "User");
/// assert_ne!(user, session);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(String);

impl Id {
    /// Creates an `Id` from a string slice.
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Id {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for Id {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
