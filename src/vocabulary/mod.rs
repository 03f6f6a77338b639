//! Token vocabularies
//!
//! Bidirectional string ↔ index maps for entities and relations. Index 0 is
//! always `"OOV"` and index 1 is always `""`; data tokens follow from index 2
//! in lexicographic order so the assignment is reproducible across runs.

mod blob;

use std::collections::HashMap;

use rayon::prelude::*;

use crate::error::{DatasetError, DatasetResult};
use crate::types::{
    TokenKind, Triple, OOV_INDEX, OOV_TOKEN, PAD_INDEX, PAD_TOKEN, RESERVED_COUNT,
};

pub use blob::DictionaryBlob;

/// Bidirectional token ↔ index mapping for one token class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenVocabulary {
    token_to_index: HashMap<String, usize>,
    /// Dense: position is the index
    index_to_token: Vec<String>,
}

impl Default for TokenVocabulary {
    fn default() -> Self {
        Self::build(Vec::<String>::new())
    }
}

impl TokenVocabulary {
    /// Build a vocabulary from a token sequence
    ///
    /// Duplicates are dropped and the remaining tokens are sorted before
    /// indices `2..` are assigned. Tokens equal to a reserved entry keep the
    /// reserved index and are not counted by [`size`](Self::size).
    pub fn build<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = tokens
            .into_iter()
            .map(Into::<String>::into)
            .filter(|t| t != OOV_TOKEN && t != PAD_TOKEN)
            .collect();
        unique.par_sort_unstable();
        unique.dedup();

        let mut index_to_token = Vec::with_capacity(unique.len() + RESERVED_COUNT);
        index_to_token.push(OOV_TOKEN.to_string());
        index_to_token.push(PAD_TOKEN.to_string());
        index_to_token.extend(unique);

        let token_to_index = index_to_token
            .iter()
            .enumerate()
            .map(|(idx, token)| (token.clone(), idx))
            .collect();

        Self {
            token_to_index,
            index_to_token,
        }
    }

    /// Entity vocabulary over the union of head and tail columns
    pub fn entities(triples: &[Triple]) -> Self {
        Self::build(
            triples
                .iter()
                .flat_map(|t| [t.head.as_str(), t.tail.as_str()]),
        )
    }

    /// Relation vocabulary over the relation column
    pub fn relations(triples: &[Triple]) -> Self {
        Self::build(triples.iter().map(|t| t.relation.as_str()))
    }

    /// Index of `token`, or 0 if the token is unknown
    pub fn index_of(&self, token: &str) -> usize {
        self.token_to_index
            .get(token)
            .copied()
            .unwrap_or(OOV_INDEX)
    }

    /// Token at `index`, or `"OOV"` if the index is unassigned
    pub fn token_of(&self, index: usize) -> &str {
        self.index_to_token
            .get(index)
            .map(String::as_str)
            .unwrap_or(OOV_TOKEN)
    }

    /// Whether `token` is a non-reserved vocabulary entry
    pub fn contains(&self, token: &str) -> bool {
        self.token_to_index
            .get(token)
            .map_or(false, |&idx| idx >= RESERVED_COUNT)
    }

    /// Number of non-reserved entries
    pub fn size(&self) -> usize {
        self.index_to_token.len() - RESERVED_COUNT
    }

    /// Number of assigned indices, reserved ones included
    pub fn index_space(&self) -> usize {
        self.index_to_token.len()
    }

    /// Non-reserved `(index, token)` pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.index_to_token
            .iter()
            .enumerate()
            .skip(RESERVED_COUNT)
            .map(|(idx, token)| (idx, token.as_str()))
    }

    /// Both directions as plain maps, reserved entries included
    pub fn to_maps(&self) -> (HashMap<String, usize>, HashMap<usize, String>) {
        let index_to_token = self
            .index_to_token
            .iter()
            .enumerate()
            .map(|(idx, token)| (idx, token.clone()))
            .collect();
        (self.token_to_index.clone(), index_to_token)
    }

    /// Rebuild a vocabulary from its two persisted directions
    ///
    /// Fails with [`DatasetError::BlobCorrupted`] unless indices are
    /// contiguous from 0, the reserved entries are in place and both maps
    /// are mutual inverses.
    pub fn from_maps(
        token_to_index: HashMap<String, usize>,
        index_to_token: HashMap<usize, String>,
    ) -> DatasetResult<Self> {
        let len = index_to_token.len();
        if len < RESERVED_COUNT {
            return Err(DatasetError::BlobCorrupted(
                "vocabulary is missing reserved entries".to_string(),
            ));
        }

        let mut dense = vec![None; len];
        for (idx, token) in index_to_token {
            match dense.get_mut(idx) {
                Some(slot) => *slot = Some(token),
                None => {
                    return Err(DatasetError::BlobCorrupted(format!(
                        "index {} outside contiguous range 0..{}",
                        idx, len
                    )))
                }
            }
        }
        let dense: Vec<String> = dense.into_iter().flatten().collect();

        if dense[OOV_INDEX] != OOV_TOKEN || dense[PAD_INDEX] != PAD_TOKEN {
            return Err(DatasetError::BlobCorrupted(
                "reserved indices 0/1 must map to \"OOV\"/\"\"".to_string(),
            ));
        }
        if token_to_index.len() != dense.len() {
            return Err(DatasetError::BlobCorrupted(format!(
                "token map has {} entries, index map has {}",
                token_to_index.len(),
                dense.len()
            )));
        }
        for (token, &idx) in &token_to_index {
            if dense.get(idx) != Some(token) {
                return Err(DatasetError::BlobCorrupted(format!(
                    "token '{}' maps to {} but index {} maps elsewhere",
                    token, idx, idx
                )));
            }
        }

        Ok(Self {
            token_to_index,
            index_to_token: dense,
        })
    }
}

/// Entity and relation vocabularies of one dataset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabularies {
    pub entities: TokenVocabulary,
    pub relations: TokenVocabulary,
}

impl Vocabularies {
    /// Build both vocabularies from raw triples
    pub fn from_triples(triples: &[Triple]) -> Self {
        Self {
            entities: TokenVocabulary::entities(triples),
            relations: TokenVocabulary::relations(triples),
        }
    }

    /// Vocabulary for one token class
    pub fn get(&self, kind: TokenKind) -> &TokenVocabulary {
        match kind {
            TokenKind::Entity => &self.entities,
            TokenKind::Relation => &self.relations,
        }
    }

    /// Persistable form: (entityToIndex, relationToIndex, indexToEntity, indexToRelation)
    pub fn to_blob(&self) -> DictionaryBlob {
        let (entity_to_index, index_to_entity) = self.entities.to_maps();
        let (relation_to_index, index_to_relation) = self.relations.to_maps();
        DictionaryBlob {
            entity_to_index,
            relation_to_index,
            index_to_entity,
            index_to_relation,
        }
    }

    /// Restore both vocabularies from a persisted dictionary
    pub fn from_blob(blob: DictionaryBlob) -> DatasetResult<Self> {
        Ok(Self {
            entities: TokenVocabulary::from_maps(blob.entity_to_index, blob.index_to_entity)?,
            relations: TokenVocabulary::from_maps(
                blob.relation_to_index,
                blob.index_to_relation,
            )?,
        })
    }
}
