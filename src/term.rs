//! RDF terms and triples
//!
//! Terms are a closed set: IRI, blank node, literal, plus the query variable
//! an upstream source may leak through. Everything downstream dispatches on
//! [`Term`] with exhaustive matches.

use std::fmt;

/// A literal value with its datatype or language tag
///
/// At most one of `datatype` / `language` is set: a language-tagged literal
/// carries no datatype here even though RDF gives it `rdf:langString`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    pub value: String,
    pub datatype: Option<String>,
    pub language: Option<String>,
}

impl Literal {
    /// Plain literal with no datatype and no language
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: None,
            language: None,
        }
    }

    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }

    pub fn lang(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: None,
            language: Some(language.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Iri(String),
    /// Blank node, held in `_:label` form
    BlankNode(String),
    Literal(Literal),
    /// Query variable; never produced by the loader
    Variable(String),
}

impl Term {
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    /// Blank node from a label, with or without the `_:` prefix
    pub fn blank(label: impl AsRef<str>) -> Self {
        let label = label.as_ref();
        let label = label.strip_prefix("_:").unwrap_or(label);
        Term::BlankNode(format!("_:{}", label))
    }

    /// Identifier of an IRI or blank node; `None` for literals and variables
    pub fn id(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            Term::BlankNode(id) => Some(id),
            Term::Literal(_) | Term::Variable(_) => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{}>", iri),
            Term::BlankNode(id) => write!(f, "{}", id),
            Term::Literal(lit) => match (&lit.datatype, &lit.language) {
                (_, Some(lang)) => write!(f, "\"{}\"@{}", lit.value, lang),
                (Some(dt), None) => write!(f, "\"{}\"^^<{}>", lit.value, dt),
                (None, None) => write!(f, "\"{}\"", lit.value),
            },
            Term::Variable(name) => write!(f, "?{}", name),
        }
    }
}

/// A single RDF statement
///
/// The subject is expected to be an IRI or a blank node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: Term,
    pub predicate: String,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: Term, predicate: impl Into<String>, object: Term) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
        }
    }
}

impl From<oxrdf::Term> for Term {
    fn from(term: oxrdf::Term) -> Self {
        match term {
            oxrdf::Term::NamedNode(node) => Term::Iri(node.into_string()),
            oxrdf::Term::BlankNode(node) => Term::blank(node.as_str()),
            oxrdf::Term::Literal(lit) => Term::Literal(lit.into()),
        }
    }
}

impl From<oxrdf::Subject> for Term {
    fn from(subject: oxrdf::Subject) -> Self {
        match subject {
            oxrdf::Subject::NamedNode(node) => Term::Iri(node.into_string()),
            oxrdf::Subject::BlankNode(node) => Term::blank(node.as_str()),
        }
    }
}

impl From<oxrdf::Literal> for Literal {
    fn from(lit: oxrdf::Literal) -> Self {
        match lit.language() {
            Some(lang) => Literal::lang(lit.value(), lang),
            None => Literal::typed(lit.value(), lit.datatype().as_str()),
        }
    }
}

impl From<oxrdf::Triple> for Triple {
    fn from(triple: oxrdf::Triple) -> Self {
        Triple {
            subject: triple.subject.into(),
            predicate: triple.predicate.into_string(),
            object: triple.object.into(),
        }
    }
}

impl From<oxrdf::Quad> for Triple {
    fn from(quad: oxrdf::Quad) -> Self {
        Triple {
            subject: quad.subject.into(),
            predicate: quad.predicate.into_string(),
            object: quad.object.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::XSD_STRING;

    #[test]
    fn test_blank_prefix_normalized() {
        assert_eq!(Term::blank("b0"), Term::BlankNode("_:b0".to_string()));
        assert_eq!(Term::blank("_:b0"), Term::blank("b0"));
    }

    #[test]
    fn test_id() {
        assert_eq!(Term::iri("http://ex.org/a").id(), Some("http://ex.org/a"));
        assert_eq!(Term::blank("x").id(), Some("_:x"));
        assert_eq!(Term::Literal(Literal::plain("x")).id(), None);
        assert_eq!(Term::Variable("v".to_string()).id(), None);
    }

    #[test]
    fn test_from_oxrdf_literals() {
        let simple: Term = oxrdf::Term::from(oxrdf::Literal::new_simple_literal("test")).into();
        assert_eq!(simple, Term::Literal(Literal::typed("test", XSD_STRING)));

        let tagged = oxrdf::Literal::new_language_tagged_literal("hallo", "nl").unwrap();
        let tagged: Term = oxrdf::Term::from(tagged).into();
        assert_eq!(tagged, Term::Literal(Literal::lang("hallo", "nl")));
    }

    #[test]
    fn test_display() {
        assert_eq!(Term::iri("http://ex.org/a").to_string(), "<http://ex.org/a>");
        assert_eq!(
            Term::Literal(Literal::lang("hallo", "nl")).to_string(),
            "\"hallo\"@nl"
        );
    }
}
