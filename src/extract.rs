//! Main extraction logic
//!
//! Discovers entities, builds one document per id per kind, and assembles
//! the three id-keyed maps.

use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::compact::compact_value;
use crate::discover::{discover, EntityKind};
use crate::document::build_document;
use crate::error::ExtractError;
use crate::index::{TripleIndex, TripleStore};
use crate::materialize::{Diagnostic, Materializer, DEFAULT_MAX_DEPTH};
use crate::term::Triple;
use crate::vocab::{context, TREE_NS};

/// Options for extraction
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Shorten IRIs under `vocab` in keys and `@type` values
    pub compact: bool,
    /// Namespace used as `@vocab` for compaction and the output context
    pub vocab: String,
    /// Put an `@context` into every document
    pub embed_context: bool,
    /// Maximum number of ids on one expansion path
    pub max_depth: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            compact: true,
            vocab: TREE_NS.to_string(),
            embed_context: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Result of extraction
#[derive(Debug, Clone, Default)]
pub struct ExtractResult {
    /// Collection documents keyed by id, in discovery order
    pub collections: Map<String, Value>,
    pub nodes: Map<String, Value>,
    pub relations: Map<String, Value>,
    /// The `@context` matching the documents, when compacted
    pub context: Option<Value>,
    /// Cycles and depth cut-offs met while materializing
    pub diagnostics: Vec<Diagnostic>,
    pub stats: ExtractStats,
}

impl ExtractResult {
    fn get_mut(&mut self, kind: EntityKind) -> Option<&mut Map<String, Value>> {
        match kind {
            EntityKind::Collection => Some(&mut self.collections),
            EntityKind::Node => Some(&mut self.nodes),
            EntityKind::Relation => Some(&mut self.relations),
            EntityKind::ConditionalImport => None,
        }
    }
}

/// Statistics from extraction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractStats {
    /// Triples in the input store
    pub triples: usize,
    pub collections: usize,
    pub nodes: usize,
    pub relations: usize,
    pub cycles_truncated: usize,
    pub depth_truncated: usize,
}

/// Main extraction function
pub fn extract(store: &dyn TripleStore, options: &ExtractOptions) -> ExtractResult {
    let discovered = discover(store);
    let mut materializer = Materializer::new(store).with_max_depth(options.max_depth);
    let mut result = ExtractResult::default();
    let doc_context = context(&options.vocab);

    for kind in EntityKind::DISCOVERABLE {
        for id in discovered.get(kind) {
            let Some(key) = id.id() else {
                continue;
            };

            let mut doc = Value::Object(build_document(&mut materializer, id, kind));
            if options.compact {
                compact_value(&mut doc, &options.vocab);
            }
            if options.embed_context {
                if let Value::Object(obj) = &doc {
                    let mut with_context = Map::new();
                    with_context.insert("@context".to_string(), doc_context.clone());
                    with_context.extend(obj.clone());
                    doc = Value::Object(with_context);
                }
            }

            if let Some(map) = result.get_mut(kind) {
                map.insert(key.to_string(), doc);
            }
        }
    }

    result.diagnostics = materializer.take_diagnostics();
    result.context = options.compact.then_some(doc_context);
    result.stats = ExtractStats {
        triples: store.len(),
        collections: result.collections.len(),
        nodes: result.nodes.len(),
        relations: result.relations.len(),
        cycles_truncated: result
            .diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::CycleTruncated { .. }))
            .count(),
        depth_truncated: result
            .diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::DepthLimit { .. }))
            .count(),
    };

    debug!(
        triples = result.stats.triples,
        collections = result.stats.collections,
        nodes = result.stats.nodes,
        relations = result.stats.relations,
        cycles = result.stats.cycles_truncated,
        depth_cutoffs = result.stats.depth_truncated,
        "Extraction finished"
    );

    result
}

/// Build an index from triples and extract from it
pub fn extract_triples(
    triples: impl IntoIterator<Item = Triple>,
    options: &ExtractOptions,
) -> ExtractResult {
    let index: TripleIndex = triples.into_iter().collect();
    extract(&index, options)
}

/// Build the output JSON document from an extraction result
pub fn to_jsonld(result: &ExtractResult) -> Value {
    let mut doc = Map::new();
    if let Some(ctx) = &result.context {
        doc.insert("@context".to_string(), ctx.clone());
    }
    doc.insert("collections".to_string(), Value::Object(result.collections.clone()));
    doc.insert("nodes".to_string(), Value::Object(result.nodes.clone()));
    doc.insert("relations".to_string(), Value::Object(result.relations.clone()));
    Value::Object(doc)
}

/// [`to_jsonld`] followed by the run's `diagnostics` and `stats`
pub fn to_jsonld_with_report(result: &ExtractResult) -> Result<Value, ExtractError> {
    let mut doc = to_jsonld(result);
    if let Value::Object(map) = &mut doc {
        map.insert("diagnostics".to_string(), serde_json::to_value(&result.diagnostics)?);
        map.insert("stats".to_string(), serde_json::to_value(&result.stats)?);
    }
    Ok(doc)
}

/// Serialize an extraction result to a JSON string
///
/// With `report` set, diagnostics and statistics are appended to the output.
pub fn to_json_string(
    result: &ExtractResult,
    pretty: bool,
    report: bool,
) -> Result<String, ExtractError> {
    let doc = if report {
        to_jsonld_with_report(result)?
    } else {
        to_jsonld(result)
    };
    if pretty {
        Ok(serde_json::to_string_pretty(&doc)?)
    } else {
        Ok(serde_json::to_string(&doc)?)
    }
}

/// Discovered ids per kind as JSON lists
pub fn discovered_ids_json(store: &dyn TripleStore) -> Value {
    let found = discover(store);
    let ids = |kind: EntityKind| {
        found
            .get(kind)
            .iter()
            .filter_map(|t| t.id())
            .collect::<Vec<_>>()
    };
    json!({
        "collections": ids(EntityKind::Collection),
        "nodes": ids(EntityKind::Node),
        "relations": ids(EntityKind::Relation),
    })
}
