//! Document building
//!
//! One generic builder applies a kind's field table to an entity. Shallow
//! fields become `{"@id"}` stubs, deep fields go through the materializer,
//! and conditional imports are built recursively against their own table.

use serde_json::{json, Map, Value};
use tracing::debug;

use crate::discover::EntityKind;
use crate::fields::{fields_for, FieldSpec, Resolution, Source};
use crate::index::TriplePattern;
use crate::materialize::{literal_value, stub, Materializer, VisitedPath};
use crate::term::Term;
use crate::vocab::RDF_TYPE;

/// An ordered mapping of field name to value(s)
pub type Document = Map<String, Value>;

/// Build the document for a discovered entity
///
/// Sets `@id`, then `@type` as the list of every `rdf:type` of the entity,
/// then each field of the kind's table that has at least one value.
pub fn build_document(
    materializer: &mut Materializer<'_>,
    id: &Term,
    kind: EntityKind,
) -> Document {
    let mut doc = Document::new();
    let Some(entity_id) = id.id() else {
        return doc;
    };
    doc.insert("@id".to_string(), json!(entity_id));

    let types: Vec<Value> = materializer
        .store()
        .matching(&TriplePattern::any().subject(id).predicate(RDF_TYPE))
        .into_iter()
        .filter_map(|t| t.object.id())
        .map(|type_id| json!(type_id))
        .collect();
    if !types.is_empty() {
        doc.insert("@type".to_string(), Value::Array(types));
    }

    let root = VisitedPath::root();
    let path = root.extend(entity_id);
    apply_fields(materializer, id, fields_for(kind), &path, &mut doc);

    debug!(id = entity_id, kind = %kind, fields = doc.len(), "Built document");
    doc
}

/// Build a conditional import: `{@id?, path?, import?, importStream?}`
///
/// `path` must already contain the import's own id, if it has one.
fn build_conditional_import(
    materializer: &mut Materializer<'_>,
    term: &Term,
    path: &VisitedPath<'_>,
) -> Value {
    let mut doc = Document::new();
    if let Term::Iri(iri) = term {
        doc.insert("@id".to_string(), json!(iri));
    }
    apply_fields(
        materializer,
        term,
        fields_for(EntityKind::ConditionalImport),
        path,
        &mut doc,
    );
    Value::Object(doc)
}

fn apply_fields(
    materializer: &mut Materializer<'_>,
    subject: &Term,
    fields: &[FieldSpec],
    path: &VisitedPath<'_>,
    doc: &mut Document,
) {
    for field in fields {
        let mut values = Vec::new();
        for term in source_terms(materializer, subject, field.sources) {
            values.push(resolve_field_value(materializer, &term, field.resolution, path));
        }
        append_field(doc, field.name, values);
    }
}

fn resolve_field_value(
    materializer: &mut Materializer<'_>,
    term: &Term,
    resolution: Resolution,
    path: &VisitedPath<'_>,
) -> Value {
    match resolution {
        Resolution::Shallow => match term {
            Term::Literal(literal) => literal_value(literal),
            Term::Iri(id) | Term::BlankNode(id) => stub(id),
            Term::Variable(_) => Value::Object(Map::new()),
        },
        Resolution::Deep => materializer.resolve_child(term, path),
        Resolution::ConditionalImport => match term.id() {
            Some(id) if path.contains(id) => materializer.resolve_child(term, path),
            Some(id) => {
                let next = path.extend(id);
                build_conditional_import(materializer, term, &next)
            }
            None => materializer.resolve(term, true, path),
        },
    }
}

/// Terms feeding a field, in source order
fn source_terms(
    materializer: &Materializer<'_>,
    subject: &Term,
    sources: &[Source],
) -> Vec<Term> {
    let store = materializer.store();
    let mut terms = Vec::new();
    for source in sources {
        match *source {
            Source::Forward(predicate) => terms.extend(
                store
                    .matching(&TriplePattern::any().subject(subject).predicate(predicate))
                    .into_iter()
                    .map(|t| t.object.clone()),
            ),
            Source::Reverse(predicate) => terms.extend(
                store
                    .matching(&TriplePattern::any().predicate(predicate).object(subject))
                    .into_iter()
                    .map(|t| t.subject.clone()),
            ),
        }
    }
    terms
}

/// Append values to a field, creating it only when there is something to add
///
/// Repeated writes to the same field accumulate.
pub fn append_field(doc: &mut Document, field: &str, values: Vec<Value>) {
    if values.is_empty() {
        return;
    }
    match doc.get_mut(field) {
        Some(Value::Array(existing)) => existing.extend(values),
        _ => {
            doc.insert(field.to_string(), Value::Array(values));
        }
    }
}
