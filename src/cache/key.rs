//! Deterministic cache keys.
//!
//! A key is `"{namespace}:{sha256}"` where the digest covers a canonical
//! JSON rendering of the input: object keys sorted recursively, array order
//! preserved. Two inputs that serialize to the same logical JSON produce the
//! same key whatever order their map entries were inserted in.
//!
//! SHA-256 keeps keys stable across processes, unlike `DefaultHasher`.

use serde::Serialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::Result;

/// Compute the cache key for `input` under `namespace`.
///
/// Fails only if `input` cannot be represented as JSON (e.g. a map with
/// non-string keys).
pub fn create_key<T: Serialize + ?Sized>(input: &T, namespace: &str) -> Result<String> {
    let canonical = canonicalize(serde_json::to_value(input)?);
    let rendered = serde_json::to_string(&canonical)?;
    let digest = Sha256::digest(rendered.as_bytes());
    Ok(format!("{namespace}:{}", hex::encode(digest)))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::with_capacity(entries.len());
            for (k, v) in entries {
                sorted.insert(k, canonicalize(v));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}
