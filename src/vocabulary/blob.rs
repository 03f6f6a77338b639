//! Persisted dictionary shape

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The four dictionary maps as they are written to the blob store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryBlob {
    #[serde(rename = "entity2idx")]
    pub entity_to_index: HashMap<String, usize>,
    #[serde(rename = "rel2idx")]
    pub relation_to_index: HashMap<String, usize>,
    #[serde(rename = "idx2entity")]
    pub index_to_entity: HashMap<usize, String>,
    #[serde(rename = "idx2rel")]
    pub index_to_relation: HashMap<usize, String>,
}

impl DictionaryBlob {
    /// Total number of entries across both token-to-index maps
    pub fn entry_count(&self) -> usize {
        self.entity_to_index.len() + self.relation_to_index.len()
    }
}
