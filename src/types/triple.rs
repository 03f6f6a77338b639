//! Triple types for the knowledge graph

use serde::{Deserialize, Serialize};

/// Raw (head, relation, tail) fact as read from a dataset file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub head: String,
    pub relation: String,
    pub tail: String,
}

impl Triple {
    /// Create a new triple
    pub fn new(
        head: impl Into<String>,
        relation: impl Into<String>,
        tail: impl Into<String>,
    ) -> Self {
        Self {
            head: head.into(),
            relation: relation.into(),
            tail: tail.into(),
        }
    }
}

/// Triple after vocabulary lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IndexedTriple {
    pub head: usize,
    pub relation: usize,
    pub tail: usize,
}

impl IndexedTriple {
    /// Create a new indexed triple
    pub fn new(head: usize, relation: usize, tail: usize) -> Self {
        Self {
            head,
            relation,
            tail,
        }
    }
}

impl From<(usize, usize, usize)> for IndexedTriple {
    fn from((head, relation, tail): (usize, usize, usize)) -> Self {
        Self::new(head, relation, tail)
    }
}
