//! In-memory triple index
//!
//! Extraction only ever asks one question of its store: which triples match a
//! `(subject?, predicate?, object?)` pattern. [`TripleStore`] is that seam;
//! [`TripleIndex`] is the implementation the loader fills.

use std::collections::{HashMap, HashSet};

use crate::term::{Term, Triple};

/// A triple pattern; `None` positions match anything
#[derive(Debug, Clone, Copy, Default)]
pub struct TriplePattern<'a> {
    pub subject: Option<&'a Term>,
    pub predicate: Option<&'a str>,
    pub object: Option<&'a Term>,
}

impl<'a> TriplePattern<'a> {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn subject(mut self, subject: &'a Term) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn predicate(mut self, predicate: &'a str) -> Self {
        self.predicate = Some(predicate);
        self
    }

    pub fn object(mut self, object: &'a Term) -> Self {
        self.object = Some(object);
        self
    }

    pub fn matches(&self, triple: &Triple) -> bool {
        self.subject.map_or(true, |s| &triple.subject == s)
            && self.predicate.map_or(true, |p| triple.predicate == p)
            && self.object.map_or(true, |o| &triple.object == o)
    }
}

/// Trait for anything extraction can run against
pub trait TripleStore {
    /// All triples matching the pattern, in insertion order
    fn matching(&self, pattern: &TriplePattern<'_>) -> Vec<&Triple>;

    /// Number of triples held
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Set of triples indexed by subject, predicate and object
///
/// Duplicate triples are collapsed on insert. Lookups return triples in the
/// order they were first inserted.
#[derive(Debug, Default, Clone)]
pub struct TripleIndex {
    triples: Vec<Triple>,
    seen: HashSet<Triple>,
    by_subject: HashMap<Term, Vec<usize>>,
    by_predicate: HashMap<String, Vec<usize>>,
    by_object: HashMap<Term, Vec<usize>>,
}

impl TripleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a triple, returning false if it was already present
    pub fn insert(&mut self, triple: Triple) -> bool {
        if self.seen.contains(&triple) {
            return false;
        }

        let pos = self.triples.len();
        self.by_subject
            .entry(triple.subject.clone())
            .or_default()
            .push(pos);
        self.by_predicate
            .entry(triple.predicate.clone())
            .or_default()
            .push(pos);
        self.by_object
            .entry(triple.object.clone())
            .or_default()
            .push(pos);
        self.seen.insert(triple.clone());
        self.triples.push(triple);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Pick the narrowest posting list among the bound positions
    fn candidates(&self, pattern: &TriplePattern<'_>) -> Option<&[usize]> {
        let lists = [
            pattern.subject.map(|s| self.by_subject.get(s)),
            pattern.predicate.map(|p| self.by_predicate.get(p)),
            pattern.object.map(|o| self.by_object.get(o)),
        ];

        let mut best: Option<&[usize]> = None;
        for list in lists.into_iter().flatten() {
            // A bound position with no postings means nothing can match
            let list = list.map(Vec::as_slice).unwrap_or(&[]);
            if best.map_or(true, |b| list.len() < b.len()) {
                best = Some(list);
            }
        }
        best
    }
}

impl TripleStore for TripleIndex {
    fn matching(&self, pattern: &TriplePattern<'_>) -> Vec<&Triple> {
        match self.candidates(pattern) {
            Some(positions) => positions
                .iter()
                .map(|&pos| &self.triples[pos])
                .filter(|t| pattern.matches(t))
                .collect(),
            None => self.triples.iter().collect(),
        }
    }

    fn len(&self) -> usize {
        self.triples.len()
    }
}

impl FromIterator<Triple> for TripleIndex {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut index = TripleIndex::new();
        index.extend(iter);
        index
    }
}

impl Extend<Triple> for TripleIndex {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        for triple in iter {
            self.insert(triple);
        }
    }
}
