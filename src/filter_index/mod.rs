//! Filter Index - known true links for filtered ranking
//!
//! Maps `entity → relation → [entity]` over the training split. Every
//! training triple `(e1, r, e2)` is recorded in both directions, so the
//! knowledge graph is treated as undirected for filtering, regardless of
//! whether `r` is a symmetric relation.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DatasetError, DatasetResult};
use crate::types::{IndexedTriple, Triple};
use crate::vocabulary::TokenVocabulary;

/// Adjacency of known links, keyed by source entity then relation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterIndex {
    /// entity → relation → targets (insertion order, no duplicates)
    links: HashMap<usize, HashMap<usize, Vec<usize>>>,
}

impl FilterIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw training triples, resolving tokens through the vocabularies
    ///
    /// Unknown tokens resolve to the OOV index rather than failing.
    pub fn build(
        training: &[Triple],
        entities: &TokenVocabulary,
        relations: &TokenVocabulary,
    ) -> Self {
        let indexed: Vec<IndexedTriple> = training
            .iter()
            .map(|t| {
                IndexedTriple::new(
                    entities.index_of(&t.head),
                    relations.index_of(&t.relation),
                    entities.index_of(&t.tail),
                )
            })
            .collect();
        Self::from_indexed(&indexed)
    }

    /// Build from already indexed triples
    pub fn from_indexed(triples: &[IndexedTriple]) -> Self {
        let mut index = Self::new();
        for triple in triples {
            index.add_triple(*triple);
        }
        debug!(
            triples = triples.len(),
            entities = index.entity_count(),
            links = index.link_count(),
            "built filter index"
        );
        index
    }

    /// Record a triple in both directions
    pub fn add_triple(&mut self, triple: IndexedTriple) {
        self.insert(triple.head, triple.relation, triple.tail);
        self.insert(triple.tail, triple.relation, triple.head);
    }

    /// Record `source --relation--> target`; returns false if already present
    pub fn insert(&mut self, source: usize, relation: usize, target: usize) -> bool {
        let targets = self
            .links
            .entry(source)
            .or_default()
            .entry(relation)
            .or_default();

        if targets.contains(&target) {
            return false;
        }
        targets.push(target);
        true
    }

    /// Known targets for `(entity, relation)`
    ///
    /// Fails with [`DatasetError::UnknownEntity`] if the entity never
    /// appeared in training, or [`DatasetError::UnknownRelation`] if it never
    /// appeared with that relation.
    pub fn lookup(&self, entity: usize, relation: usize) -> DatasetResult<&[usize]> {
        let by_relation = self
            .links
            .get(&entity)
            .ok_or(DatasetError::UnknownEntity(entity))?;

        by_relation
            .get(&relation)
            .map(Vec::as_slice)
            .ok_or(DatasetError::UnknownRelation { entity, relation })
    }

    /// Whether `source --relation--> target` is a known link
    pub fn contains(&self, source: usize, relation: usize, target: usize) -> bool {
        self.lookup(source, relation)
            .map(|targets| targets.contains(&target))
            .unwrap_or(false)
    }

    /// Number of distinct source entities
    pub fn entity_count(&self) -> usize {
        self.links.len()
    }

    /// Total number of recorded (source, relation, target) links
    pub fn link_count(&self) -> usize {
        self.links
            .values()
            .flat_map(|by_relation| by_relation.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Same lookup results as `other`, ignoring target order
    pub fn same_links(&self, other: &FilterIndex) -> bool {
        if self.links.len() != other.links.len() {
            return false;
        }

        self.links.iter().all(|(entity, by_relation)| {
            let Some(other_by_relation) = other.links.get(entity) else {
                return false;
            };
            by_relation.len() == other_by_relation.len()
                && by_relation.iter().all(|(relation, targets)| {
                    other_by_relation.get(relation).map_or(false, |other_targets| {
                        let mine: HashSet<&usize> = targets.iter().collect();
                        let theirs: HashSet<&usize> = other_targets.iter().collect();
                        mine == theirs
                    })
                })
        })
    }
}
