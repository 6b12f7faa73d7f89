//! Vocabulary-relative compaction
//!
//! Shortens IRIs that live under the `@vocab` namespace, which is all the
//! compaction documents need when emitted with `{"@vocab": ...}` as context:
//! property keys and `@type` values lose the namespace prefix. `@id` values
//! are never touched, since JSON-LD does not resolve them against `@vocab`.

use serde_json::{Map, Value};

/// Shorten `iri` against `vocab`, if it lives under it
pub fn compact_iri<'a>(iri: &'a str, vocab: &str) -> &'a str {
    match iri.strip_prefix(vocab) {
        Some(rest) if !rest.is_empty() => rest,
        _ => iri,
    }
}

/// Compact a document in place, recursing into nested objects and arrays
pub fn compact_value(value: &mut Value, vocab: &str) {
    match value {
        Value::Object(obj) => {
            let entries = std::mem::take(obj);
            let mut compacted = Map::with_capacity(entries.len());
            for (key, mut item) in entries {
                if key == "@type" {
                    compact_types(&mut item, vocab);
                } else {
                    compact_value(&mut item, vocab);
                }
                let key = if key.starts_with('@') {
                    key
                } else {
                    compact_iri(&key, vocab).to_string()
                };
                compacted.insert(key, item);
            }
            *obj = compacted;
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                compact_value(item, vocab);
            }
        }
        _ => {}
    }
}

fn compact_types(value: &mut Value, vocab: &str) {
    match value {
        Value::String(iri) => {
            let short = compact_iri(iri, vocab);
            if short.len() != iri.len() {
                *iri = short.to_string();
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                compact_types(item, vocab);
            }
        }
        _ => {}
    }
}
