//! Graph materialization
//!
//! Turns a term into a nested JSON-LD-shaped value by walking the triples it
//! is the subject of. Cycles are cut per traversal path: an id already on the
//! path from the entity down to the current term is emitted as a bare
//! `{"@id": ...}` stub instead of being expanded again. The same id may still
//! be expanded in full on a sibling branch.

use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::index::{TriplePattern, TripleStore};
use crate::term::{Literal, Term};
use crate::vocab::RDF_TYPE;

/// The ids between the entity and the term being resolved
///
/// An immutable parent-linked list living on the call stack. Extending it
/// borrows the parent, so sibling branches each see only their own ancestors.
#[derive(Debug, Clone, Copy)]
pub struct VisitedPath<'a> {
    id: Option<&'a str>,
    parent: Option<&'a VisitedPath<'a>>,
    depth: usize,
}

impl VisitedPath<'static> {
    /// Empty path
    pub fn root() -> Self {
        VisitedPath {
            id: None,
            parent: None,
            depth: 0,
        }
    }
}

impl<'a> VisitedPath<'a> {
    /// A new path with `id` appended; `self` is left untouched
    pub fn extend<'b>(&'b self, id: &'b str) -> VisitedPath<'b> {
        VisitedPath {
            id: Some(id),
            parent: Some(self),
            depth: self.depth + 1,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        let mut current = Some(self);
        while let Some(path) = current {
            if path.id == Some(id) {
                return true;
            }
            current = path.parent;
        }
        false
    }

    /// Number of ids on the path
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// A non-fatal anomaly met while materializing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    /// A reference back to an id already on the path was stubbed
    CycleTruncated { id: String },
    /// Expansion stopped at the configured depth
    DepthLimit { id: String, depth: usize },
}

/// Bare reference to a term
pub fn stub(id: &str) -> Value {
    json!({ "@id": id })
}

/// `{"@value", "@type"?, "@language"?}` for a literal
pub fn literal_value(literal: &Literal) -> Value {
    let mut item = Map::new();
    item.insert("@value".to_string(), json!(literal.value));
    if let Some(datatype) = &literal.datatype {
        item.insert("@type".to_string(), json!(datatype));
    }
    if let Some(language) = &literal.language {
        item.insert("@language".to_string(), json!(language));
    }
    Value::Object(item)
}

/// Default limit on the number of ids on one expansion path
///
/// Expansion recurses once per id, so the limit also bounds stack use on
/// long acyclic chains such as RDF lists.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Recursive term resolver over a triple store
pub struct Materializer<'a> {
    store: &'a dyn TripleStore,
    max_depth: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Materializer<'a> {
    pub fn new(store: &'a dyn TripleStore) -> Self {
        Self {
            store,
            max_depth: DEFAULT_MAX_DEPTH,
            diagnostics: Vec::new(),
        }
    }

    /// Stop expanding below `max_depth` ids on a path
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn store(&self) -> &'a dyn TripleStore {
        self.store
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Hand over the diagnostics collected so far
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Resolve a term without any cycle check of its own
    ///
    /// `path` must already contain the term's id when `recursive` is set;
    /// [`Materializer::resolve_child`] takes care of that.
    pub fn resolve(&mut self, term: &Term, recursive: bool, path: &VisitedPath<'_>) -> Value {
        match term {
            Term::Literal(literal) => literal_value(literal),
            // Variables carry no data to materialize
            Term::Variable(_) => Value::Object(Map::new()),
            Term::Iri(id) | Term::BlankNode(id) if !recursive => stub(id),
            Term::Iri(_) | Term::BlankNode(_) => self.expand(term, path),
        }
    }

    /// Resolve a term reached from `path`, applying the cycle guard
    pub fn resolve_child(&mut self, term: &Term, path: &VisitedPath<'_>) -> Value {
        let Some(id) = term.id() else {
            return self.resolve(term, true, path);
        };

        if path.contains(id) {
            warn!(id, "Reference cycle detected, emitting stub");
            self.diagnostics.push(Diagnostic::CycleTruncated { id: id.to_string() });
            return stub(id);
        }

        if path.depth() >= self.max_depth {
            warn!(
                id,
                max_depth = self.max_depth,
                "Maximum expansion depth reached, emitting stub"
            );
            self.diagnostics.push(Diagnostic::DepthLimit {
                id: id.to_string(),
                depth: path.depth(),
            });
            return stub(id);
        }

        let next = path.extend(id);
        self.resolve(term, true, &next)
    }

    /// Expand an IRI or blank node into an object of its properties
    ///
    /// `@type` keeps only the last `rdf:type` seen. Every other predicate maps
    /// to a list holding one value per triple, in first-seen predicate order.
    fn expand(&mut self, term: &Term, path: &VisitedPath<'_>) -> Value {
        let mut object = Map::new();
        if let Term::Iri(iri) = term {
            object.insert("@id".to_string(), json!(iri));
        }

        let store = self.store;
        for triple in store.matching(&TriplePattern::any().subject(term)) {
            if triple.predicate == RDF_TYPE {
                if let Some(type_id) = triple.object.id() {
                    object.insert("@type".to_string(), json!(type_id));
                }
                continue;
            }

            let value = self.resolve_child(&triple.object, path);
            let slot = object
                .entry(triple.predicate.clone())
                .or_insert_with(|| Value::Array(Vec::new()));
            if let Value::Array(items) = slot {
                items.push(value);
            }
        }

        Value::Object(object)
    }
}
