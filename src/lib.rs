//! TREE Metadata Extraction Library
//!
//! This library derives self-contained JSON-LD-shaped documents describing
//! the hypermedia controls of a fragmented RDF dataset: the collections, the
//! nodes (pages) and the relations between them, per the TREE vocabulary and
//! its Hydra, void and Dublin Core predecessors.
//!
//! # Overview
//!
//! Given a complete set of triples, extraction:
//!
//! 1. Discovers which subjects are collections, nodes or relations using
//!    fixed structural rules (types, `tree:view`, `tree:relation`, ...)
//! 2. Builds one document per discovered id per kind from a declarative
//!    field table
//! 3. Materializes deep fields by walking the graph, cutting reference
//!    cycles per traversal path with `{"@id": ...}` stubs
//! 4. Optionally shortens IRIs under the TREE namespace, matching an
//!    `{"@vocab": "https://w3id.org/tree#"}` context
//!
//! # Usage
//!
//! ```ignore
//! use tree_metadata::{extract, parse_str, to_json_string, ExtractOptions, RdfFormat};
//!
//! let index = parse_str(turtle, RdfFormat::Turtle, Some("https://example.org/page"))?;
//! let result = extract(&index, &ExtractOptions::default());
//!
//! for (id, relation) in &result.relations {
//!     println!("{} -> {}", id, relation["node"]);
//! }
//! println!("{}", to_json_string(&result, true, false)?);
//! ```

pub mod compact;
pub mod discover;
pub mod document;
pub mod error;
pub mod extract;
pub mod fields;
pub mod index;
pub mod loader;
pub mod materialize;
pub mod term;
pub mod vocab;

// Re-export main types for convenience
pub use crate::discover::{discover, DiscoveredIds, EntityKind};
pub use crate::document::{build_document, Document};
pub use crate::error::ExtractError;
pub use crate::extract::{
    discovered_ids_json, extract, extract_triples, to_json_string, to_jsonld,
    to_jsonld_with_report, ExtractOptions, ExtractResult, ExtractStats,
};
pub use crate::index::{TripleIndex, TriplePattern, TripleStore};
pub use crate::loader::{load, parse_str, LoadOptions, RdfFormat, Source};
pub use crate::materialize::{Diagnostic, Materializer, VisitedPath, DEFAULT_MAX_DEPTH};
pub use crate::term::{Literal, Term, Triple};
pub use crate::vocab::TREE_NS;
