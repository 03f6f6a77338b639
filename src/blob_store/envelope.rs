//! JSON envelope for typed blobs
//!
//! ```text
//! { "meta": { "kind", "dataset", "createdAt", "entries" }, "payload": ... }
//! ```

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{DatasetError, DatasetResult};

use super::{BlobKey, BlobKind, BlobStore};

/// Metadata written alongside every payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlobMeta {
    pub kind: BlobKind,
    pub dataset: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub entries: usize,
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    meta: &'a BlobMeta,
    payload: &'a T,
}

#[derive(Deserialize)]
struct Envelope<T> {
    meta: BlobMeta,
    payload: T,
}

/// Serialize `payload` under `key`; `entries` is recorded for diagnostics
pub fn save_json<S, T>(
    store: &S,
    key: &BlobKey,
    payload: &T,
    entries: usize,
) -> DatasetResult<BlobMeta>
where
    S: BlobStore + ?Sized,
    T: Serialize,
{
    let meta = BlobMeta {
        kind: key.kind,
        dataset: key.dataset.clone(),
        created_at: Utc::now(),
        entries,
    };
    let bytes = serde_json::to_vec(&EnvelopeRef {
        meta: &meta,
        payload,
    })?;
    store.put(key, &bytes)?;

    info!(blob = %key, entries, bytes = bytes.len(), "saved blob");
    Ok(meta)
}

/// Load and decode the payload under `key`
///
/// A blob that does not decode, or whose recorded kind differs from
/// `key.kind`, is reported as [`DatasetError::BlobCorrupted`].
pub fn load_json<S, T>(store: &S, key: &BlobKey) -> DatasetResult<(BlobMeta, T)>
where
    S: BlobStore + ?Sized,
    T: DeserializeOwned,
{
    let bytes = store.get(key)?;
    let envelope: Envelope<T> = serde_json::from_slice(&bytes)
        .map_err(|e| DatasetError::BlobCorrupted(format!("{}: {}", key, e)))?;

    if envelope.meta.kind != key.kind {
        return Err(DatasetError::BlobCorrupted(format!(
            "{}: expected {} blob, found {}",
            key, key.kind, envelope.meta.kind
        )));
    }

    info!(blob = %key, entries = envelope.meta.entries, "loaded blob");
    Ok((envelope.meta, envelope.payload))
}
