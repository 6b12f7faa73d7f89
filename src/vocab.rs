//! Vocabulary definitions for TREE metadata extraction
//!
//! The closed table of predicate and type IRIs the discovery rules and field
//! tables refer to: the current TREE vocabulary plus the Hydra, void and
//! Dublin Core terms older publishers still use.

/// TREE namespace, also the default `@vocab` for compacted output
pub const TREE_NS: &str = "https://w3id.org/tree#";

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

// Types
pub const TREE_COLLECTION: &str = "https://w3id.org/tree#Collection";
pub const TREE_NODE: &str = "https://w3id.org/tree#Node";
pub const TREE_CONDITIONAL_IMPORT: &str = "https://w3id.org/tree#ConditionalImport";
pub const HYDRA_COLLECTION: &str = "http://www.w3.org/ns/hydra/core#Collection";
pub const HYDRA_PARTIAL_COLLECTION_VIEW: &str =
    "http://www.w3.org/ns/hydra/core#PartialCollectionView";

// Collection predicates
pub const TREE_VIEW: &str = "https://w3id.org/tree#view";
pub const TREE_MEMBER: &str = "https://w3id.org/tree#member";
pub const HYDRA_VIEW: &str = "http://www.w3.org/ns/hydra/core#view";
pub const HYDRA_MEMBER: &str = "http://www.w3.org/ns/hydra/core#member";
pub const VOID_SUBSET: &str = "http://rdfs.org/ns/void#subset";
pub const DCT_IS_PART_OF: &str = "http://purl.org/dc/terms/isPartOf";

// Node predicates
pub const TREE_SEARCH: &str = "https://w3id.org/tree#search";
pub const TREE_RELATION: &str = "https://w3id.org/tree#relation";

// Relation predicates
pub const TREE_REMAINING_ITEMS: &str = "https://w3id.org/tree#remainingItems";
pub const TREE_PATH: &str = "https://w3id.org/tree#path";
pub const TREE_VALUE: &str = "https://w3id.org/tree#value";
pub const TREE_NODE_LINK: &str = "https://w3id.org/tree#node";

// Import predicates, shared by all three kinds
pub const TREE_IMPORT: &str = "https://w3id.org/tree#import";
pub const TREE_IMPORT_STREAM: &str = "https://w3id.org/tree#importStream";
pub const TREE_CONDITIONAL_IMPORT_LINK: &str = "https://w3id.org/tree#conditionalImport";

/// Every `rdf:type` that marks a subject as a TREE relation
///
/// The last two entries are the spellings used before the TREE vocabulary
/// settled on `...OrEqualTo...`.
pub const RELATION_TYPES: &[&str] = &[
    "https://w3id.org/tree#Relation",
    "https://w3id.org/tree#PrefixRelation",
    "https://w3id.org/tree#SubstringRelation",
    "https://w3id.org/tree#GreaterThanRelation",
    "https://w3id.org/tree#GreaterThanOrEqualToRelation",
    "https://w3id.org/tree#LessThanRelation",
    "https://w3id.org/tree#LessThanOrEqualToRelation",
    "https://w3id.org/tree#EqualThanRelation",
    "https://w3id.org/tree#GeospatiallyContainsRelation",
    "https://w3id.org/tree#InBetweenRelation",
    "https://w3id.org/tree#GreaterOrEqualThanRelation",
    "https://w3id.org/tree#LessOrEqualThanRelation",
];

/// JSON-LD context matching output compacted against `vocab`
pub fn context(vocab: &str) -> serde_json::Value {
    serde_json::json!({ "@vocab": vocab })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context() {
        let ctx = context(TREE_NS);
        assert_eq!(ctx.get("@vocab"), Some(&serde_json::json!(TREE_NS)));
    }

    #[test]
    fn test_relation_types_live_in_tree_namespace() {
        assert!(RELATION_TYPES.iter().all(|t| t.starts_with(TREE_NS)));
        assert!(RELATION_TYPES.contains(&"https://w3id.org/tree#GreaterOrEqualThanRelation"));
        assert!(!RELATION_TYPES.contains(&TREE_NODE));
    }
}
