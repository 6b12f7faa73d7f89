//! Entity discovery
//!
//! Finds the subjects that qualify as collections, nodes or relations using
//! fixed structural rules. Rules for a kind are unioned; a subject matched by
//! several rules is reported once, at its first match.

use std::collections::HashSet;
use std::fmt;
use tracing::debug;

use crate::index::{TriplePattern, TripleStore};
use crate::term::Term;
use crate::vocab::*;

/// Kind of document extraction produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Collection,
    Node,
    Relation,
    /// Only ever nested inside the other three
    ConditionalImport,
}

impl EntityKind {
    /// Kinds discovered as top-level entities, in output order
    pub const DISCOVERABLE: [EntityKind; 3] =
        [EntityKind::Collection, EntityKind::Node, EntityKind::Relation];

    /// Discovery rules for this kind; empty for nested-only kinds
    pub fn rules(self) -> &'static [Rule] {
        match self {
            EntityKind::Collection => COLLECTION_RULES,
            EntityKind::Node => NODE_RULES,
            EntityKind::Relation => RELATION_RULES,
            EntityKind::ConditionalImport => &[],
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Collection => "collection",
            EntityKind::Node => "node",
            EntityKind::Relation => "relation",
            EntityKind::ConditionalImport => "conditionalImport",
        };
        f.write_str(name)
    }
}

/// A structural discovery rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Subject has `rdf:type` equal to the IRI
    HasType(&'static str),
    /// Subject has `rdf:type` equal to any of the IRIs
    HasAnyType(&'static [&'static str]),
    /// Subject of any triple with the predicate
    SubjectOf(&'static str),
    /// Object of any triple with the predicate
    ObjectOf(&'static str),
}

pub const COLLECTION_RULES: &[Rule] = &[
    Rule::HasType(TREE_COLLECTION),
    Rule::HasType(HYDRA_COLLECTION),
    Rule::SubjectOf(TREE_VIEW),
    Rule::SubjectOf(HYDRA_VIEW),
    Rule::SubjectOf(VOID_SUBSET),
    // The collection is what a page claims to be part of
    Rule::ObjectOf(DCT_IS_PART_OF),
    Rule::SubjectOf(TREE_MEMBER),
    Rule::SubjectOf(HYDRA_MEMBER),
];

pub const NODE_RULES: &[Rule] = &[
    Rule::HasType(TREE_NODE),
    Rule::HasType(HYDRA_PARTIAL_COLLECTION_VIEW),
    Rule::SubjectOf(TREE_SEARCH),
    Rule::SubjectOf(TREE_RELATION),
];

pub const RELATION_RULES: &[Rule] = &[Rule::HasAnyType(RELATION_TYPES)];

/// Ids found per kind, each list in discovery order without duplicates
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DiscoveredIds {
    pub collections: Vec<Term>,
    pub nodes: Vec<Term>,
    pub relations: Vec<Term>,
}

impl DiscoveredIds {
    pub fn get(&self, kind: EntityKind) -> &[Term] {
        match kind {
            EntityKind::Collection => &self.collections,
            EntityKind::Node => &self.nodes,
            EntityKind::Relation => &self.relations,
            EntityKind::ConditionalImport => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty() && self.nodes.is_empty() && self.relations.is_empty()
    }
}

/// Run discovery for all top-level kinds
pub fn discover(store: &dyn TripleStore) -> DiscoveredIds {
    DiscoveredIds {
        collections: discover_kind(store, EntityKind::Collection),
        nodes: discover_kind(store, EntityKind::Node),
        relations: discover_kind(store, EntityKind::Relation),
    }
}

/// Ids matching any rule of one kind
pub fn discover_kind(store: &dyn TripleStore, kind: EntityKind) -> Vec<Term> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    for rule in kind.rules() {
        for candidate in apply_rule(store, *rule) {
            // Literals cannot be entities (only reachable through ObjectOf)
            if candidate.id().is_none() {
                continue;
            }
            if seen.insert(candidate) {
                ids.push(candidate.clone());
            }
        }
    }

    debug!(kind = %kind, count = ids.len(), "Discovered entities");
    ids
}

fn apply_rule(store: &dyn TripleStore, rule: Rule) -> Vec<&Term> {
    match rule {
        Rule::HasType(type_iri) => subjects_typed(store, type_iri),
        Rule::HasAnyType(type_iris) => type_iris
            .iter()
            .flat_map(|type_iri| subjects_typed(store, type_iri))
            .collect(),
        Rule::SubjectOf(predicate) => store
            .matching(&TriplePattern::any().predicate(predicate))
            .into_iter()
            .map(|t| &t.subject)
            .collect(),
        Rule::ObjectOf(predicate) => store
            .matching(&TriplePattern::any().predicate(predicate))
            .into_iter()
            .map(|t| &t.object)
            .collect(),
    }
}

fn subjects_typed<'s>(store: &'s dyn TripleStore, type_iri: &str) -> Vec<&'s Term> {
    let type_term = Term::iri(type_iri);
    store
        .matching(&TriplePattern::any().predicate(RDF_TYPE).object(&type_term))
        .into_iter()
        .map(|t| &t.subject)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::TripleIndex;
    use crate::term::{Literal, Triple};

    fn iri(s: &str) -> Term {
        Term::iri(format!("http://example.org/{}", s))
    }

    fn index(triples: Vec<Triple>) -> TripleIndex {
        triples.into_iter().collect()
    }

    #[test]
    fn test_nothing_qualifies() {
        let store = index(vec![Triple::new(iri("a"), "http://example.org/p", iri("b"))]);
        assert!(discover(&store).is_empty());
    }

    #[test]
    fn test_collection_rules_dedup() {
        let store = index(vec![
            Triple::new(iri("c"), RDF_TYPE, Term::iri(TREE_COLLECTION)),
            Triple::new(iri("c"), TREE_VIEW, iri("n1")),
            Triple::new(iri("c"), TREE_MEMBER, iri("m1")),
            Triple::new(iri("h"), HYDRA_MEMBER, iri("m2")),
        ]);

        let found = discover(&store);
        assert_eq!(found.collections, vec![iri("c"), iri("h")]);
        assert!(found.nodes.is_empty());
        assert!(found.relations.is_empty());
    }

    #[test]
    fn test_is_part_of_points_at_collection() {
        let store = index(vec![
            Triple::new(iri("page"), DCT_IS_PART_OF, iri("c")),
            Triple::new(
                iri("page2"),
                DCT_IS_PART_OF,
                Term::Literal(Literal::plain("not an entity")),
            ),
        ]);

        assert_eq!(discover(&store).collections, vec![iri("c")]);
    }

    #[test]
    fn test_node_rules() {
        let store = index(vec![
            Triple::new(iri("p1"), RDF_TYPE, Term::iri(HYDRA_PARTIAL_COLLECTION_VIEW)),
            Triple::new(iri("p2"), TREE_SEARCH, Term::blank("s")),
            Triple::new(iri("p1"), TREE_RELATION, Term::blank("r")),
        ]);

        assert_eq!(discover(&store).nodes, vec![iri("p1"), iri("p2")]);
    }

    #[test]
    fn test_relation_types_including_blank_subjects() {
        let store = index(vec![
            Triple::new(
                Term::blank("r1"),
                RDF_TYPE,
                Term::iri("https://w3id.org/tree#GreaterThanRelation"),
            ),
            Triple::new(iri("r2"), RDF_TYPE, Term::iri("https://w3id.org/tree#Relation")),
            Triple::new(iri("x"), RDF_TYPE, Term::iri("https://w3id.org/tree#Unknown")),
        ]);

        let relations = discover(&store).relations;
        assert_eq!(relations.len(), 2);
        assert!(relations.contains(&Term::blank("r1")));
        assert!(relations.contains(&iri("r2")));
    }

    #[test]
    fn test_id_in_several_kinds() {
        let store = index(vec![
            Triple::new(iri("x"), TREE_VIEW, iri("v")),
            Triple::new(iri("x"), TREE_RELATION, iri("r")),
        ]);

        let found = discover(&store);
        assert_eq!(found.collections, vec![iri("x")]);
        assert_eq!(found.nodes, vec![iri("x")]);
    }

    fn only_collection(triple: Triple) -> Vec<Term> {
        let found = discover(&index(vec![triple]));
        assert!(found.nodes.is_empty() && found.relations.is_empty());
        found.collections
    }

    fn only_node(triple: Triple) -> Vec<Term> {
        let found = discover(&index(vec![triple]));
        assert!(found.collections.is_empty() && found.relations.is_empty());
        found.nodes
    }

    #[test]
    fn test_each_collection_rule_alone() {
        let typed = |type_iri: &str| Triple::new(iri("c"), RDF_TYPE, Term::iri(type_iri));
        assert_eq!(only_collection(typed(TREE_COLLECTION)), vec![iri("c")]);
        assert_eq!(only_collection(typed(HYDRA_COLLECTION)), vec![iri("c")]);

        for predicate in [TREE_VIEW, HYDRA_VIEW, VOID_SUBSET, TREE_MEMBER, HYDRA_MEMBER] {
            let triple = Triple::new(iri("c"), predicate, iri("o"));
            assert_eq!(only_collection(triple), vec![iri("c")], "{}", predicate);
        }
    }

    #[test]
    fn test_each_node_rule_alone() {
        let typed = |type_iri: &str| Triple::new(iri("n"), RDF_TYPE, Term::iri(type_iri));
        assert_eq!(only_node(typed(TREE_NODE)), vec![iri("n")]);
        assert_eq!(only_node(typed(HYDRA_PARTIAL_COLLECTION_VIEW)), vec![iri("n")]);

        let search = Triple::new(iri("n"), TREE_SEARCH, Term::blank("s"));
        assert_eq!(only_node(search), vec![iri("n")]);
        let relation = Triple::new(iri("n"), TREE_RELATION, Term::blank("r"));
        assert_eq!(only_node(relation), vec![iri("n")]);
    }

    #[test]
    fn test_every_relation_type_alone() {
        for type_iri in RELATION_TYPES {
            let store = index(vec![Triple::new(iri("r"), RDF_TYPE, Term::iri(*type_iri))]);
            let found = discover(&store);
            assert_eq!(found.relations, vec![iri("r")], "{}", type_iri);
            assert!(found.collections.is_empty() && found.nodes.is_empty());
        }
    }
}
