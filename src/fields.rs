//! Field tables
//!
//! Which document field is filled from which predicates, and how deep the
//! values are resolved. The document builder is generic over these tables.

use crate::discover::EntityKind;
use crate::vocab::*;

/// How the object terms of a field are turned into values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// `{"@id": ...}` stub, no graph walk
    Shallow,
    /// Full recursive materialization
    Deep,
    /// Built against the conditional import table
    ConditionalImport,
}

/// Where the terms of a field come from, relative to the entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Objects of `(entity, predicate, ?)`
    Forward(&'static str),
    /// Subjects of `(?, predicate, entity)`
    Reverse(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub sources: &'static [Source],
    pub resolution: Resolution,
}

const fn field(
    name: &'static str,
    sources: &'static [Source],
    resolution: Resolution,
) -> FieldSpec {
    FieldSpec {
        name,
        sources,
        resolution,
    }
}

const IMPORT: FieldSpec = field("import", &[Source::Forward(TREE_IMPORT)], Resolution::Deep);

const IMPORT_STREAM: FieldSpec = field(
    "importStream",
    &[Source::Forward(TREE_IMPORT_STREAM)],
    Resolution::Deep,
);

const CONDITIONAL_IMPORT: FieldSpec = field(
    "conditionalImport",
    &[Source::Forward(TREE_CONDITIONAL_IMPORT_LINK)],
    Resolution::ConditionalImport,
);

pub const COLLECTION_FIELDS: &[FieldSpec] = &[
    field(
        "view",
        &[
            Source::Forward(TREE_VIEW),
            Source::Forward(HYDRA_VIEW),
            Source::Forward(VOID_SUBSET),
            Source::Reverse(DCT_IS_PART_OF),
        ],
        Resolution::Shallow,
    ),
    field(
        "member",
        &[
            Source::Forward(TREE_MEMBER),
            Source::Forward(HYDRA_MEMBER),
        ],
        Resolution::Shallow,
    ),
    IMPORT,
    IMPORT_STREAM,
    CONDITIONAL_IMPORT,
];

pub const NODE_FIELDS: &[FieldSpec] = &[
    field("search", &[Source::Forward(TREE_SEARCH)], Resolution::Deep),
    field("relation", &[Source::Forward(TREE_RELATION)], Resolution::Shallow),
    IMPORT,
    IMPORT_STREAM,
    CONDITIONAL_IMPORT,
];

pub const RELATION_FIELDS: &[FieldSpec] = &[
    field("remainingItems", &[Source::Forward(TREE_REMAINING_ITEMS)], Resolution::Deep),
    field("path", &[Source::Forward(TREE_PATH)], Resolution::Deep),
    field("value", &[Source::Forward(TREE_VALUE)], Resolution::Deep),
    field("node", &[Source::Forward(TREE_NODE_LINK)], Resolution::Shallow),
    IMPORT,
    IMPORT_STREAM,
    CONDITIONAL_IMPORT,
];

pub const CONDITIONAL_IMPORT_FIELDS: &[FieldSpec] = &[
    field("path", &[Source::Forward(TREE_PATH)], Resolution::Deep),
    IMPORT,
    IMPORT_STREAM,
];

/// Field table for a kind
pub fn fields_for(kind: EntityKind) -> &'static [FieldSpec] {
    match kind {
        EntityKind::Collection => COLLECTION_FIELDS,
        EntityKind::Node => NODE_FIELDS,
        EntityKind::Relation => RELATION_FIELDS,
        EntityKind::ConditionalImport => CONDITIONAL_IMPORT_FIELDS,
    }
}
