//! Loading RDF into a triple index
//!
//! Reads Turtle, N-Triples, N-Quads or TriG from a file, stdin or a URL and
//! collects every statement into a [`TripleIndex`]. Graph names of quads are
//! dropped: extraction works over one merged graph.

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use oxttl::{NQuadsParser, NTriplesParser, TriGParser, TurtleParser};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::{debug, info};
use url::Url;

use crate::error::ExtractError;
use crate::index::{TripleIndex, TripleStore};
use crate::term::Triple;

/// Accept header sent when fetching over HTTP
const RDF_ACCEPT: &str =
    "text/turtle, application/n-triples;q=0.9, application/trig;q=0.8, application/n-quads;q=0.8";

/// Supported RDF serializations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    Turtle,
    NTriples,
    NQuads,
    TriG,
}

impl RdfFormat {
    /// Guess the format from a file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "ttl" | "turtle" => Some(RdfFormat::Turtle),
            "nt" => Some(RdfFormat::NTriples),
            "nq" => Some(RdfFormat::NQuads),
            "trig" => Some(RdfFormat::TriG),
            _ => None,
        }
    }

    /// Guess the format from an HTTP `Content-Type`
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let essence = media_type.split(';').next()?.trim().to_ascii_lowercase();
        match essence.as_str() {
            "text/turtle" | "application/x-turtle" => Some(RdfFormat::Turtle),
            "application/n-triples" => Some(RdfFormat::NTriples),
            "application/n-quads" => Some(RdfFormat::NQuads),
            "application/trig" => Some(RdfFormat::TriG),
            _ => None,
        }
    }
}

impl FromStr for RdfFormat {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "turtle" | "ttl" => Ok(RdfFormat::Turtle),
            "ntriples" | "n-triples" | "nt" => Ok(RdfFormat::NTriples),
            "nquads" | "n-quads" | "nq" => Ok(RdfFormat::NQuads),
            "trig" => Ok(RdfFormat::TriG),
            _ => Err(ExtractError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for RdfFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RdfFormat::Turtle => "turtle",
            RdfFormat::NTriples => "n-triples",
            RdfFormat::NQuads => "n-quads",
            RdfFormat::TriG => "trig",
        };
        f.write_str(name)
    }
}

/// Source from which to load RDF
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Url(String),
    Stdin,
}

impl Source {
    /// Interpret a command-line argument: `-`, an http(s) URL, or a path
    pub fn parse(arg: &str) -> Self {
        if arg == "-" {
            Source::Stdin
        } else if is_url(arg) {
            Source::Url(arg.to_string())
        } else {
            Source::File(PathBuf::from(arg))
        }
    }

    /// Human-readable name for messages
    pub fn name(&self) -> String {
        match self {
            Source::File(path) => path.display().to_string(),
            Source::Url(url) => url.clone(),
            Source::Stdin => "<stdin>".to_string(),
        }
    }
}

/// Options for loading
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Format to parse with; detected from the source when unset
    pub format: Option<RdfFormat>,
    /// Base IRI for relative references; defaults to the source location
    pub base_iri: Option<String>,
}

/// Check if a source string is a URL
pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Load a source into a triple index
pub fn load(source: &Source, options: &LoadOptions) -> Result<TripleIndex, ExtractError> {
    let name = source.name();
    let (content, detected, default_base) = match source {
        Source::File(path) => {
            let content = read_file(path)?;
            let base = std::fs::canonicalize(path)
                .ok()
                .and_then(|abs| Url::from_file_path(abs).ok())
                .map(String::from);
            (content, RdfFormat::from_extension(path), base)
        }
        Source::Url(url) => {
            let fetched = fetch_url(url)?;
            let format = fetched
                .content_type
                .as_deref()
                .and_then(RdfFormat::from_media_type);
            (fetched.body, format, Some(fetched.final_url))
        }
        Source::Stdin => {
            let mut content = String::new();
            std::io::stdin().read_to_string(&mut content)?;
            (content, None, None)
        }
    };

    let format = options.format.or(detected).unwrap_or(RdfFormat::Turtle);
    let base = options.base_iri.clone().or(default_base);
    info!(source = %name, %format, "Loading RDF");

    parse_named(&content, format, base.as_deref(), &name)
}

/// Parse RDF text into a triple index
pub fn parse_str(
    content: &str,
    format: RdfFormat,
    base_iri: Option<&str>,
) -> Result<TripleIndex, ExtractError> {
    parse_named(content, format, base_iri, "<string>")
}

fn parse_named(
    content: &str,
    format: RdfFormat,
    base_iri: Option<&str>,
    source_name: &str,
) -> Result<TripleIndex, ExtractError> {
    let parse_error = |reason: String| ExtractError::ParseError {
        source_name: source_name.to_string(),
        reason,
    };
    let bytes = content.as_bytes();
    let mut index = TripleIndex::new();

    match format {
        RdfFormat::Turtle => {
            let mut parser = TurtleParser::new();
            if let Some(base) = base_iri {
                parser = parser
                    .with_base_iri(base)
                    .map_err(|_| ExtractError::InvalidBaseIri(base.to_string()))?;
            }
            for triple in parser.for_slice(bytes) {
                let triple = triple.map_err(|e| parse_error(e.to_string()))?;
                index.insert(Triple::from(triple));
            }
        }
        RdfFormat::NTriples => {
            for triple in NTriplesParser::new().for_slice(bytes) {
                let triple = triple.map_err(|e| parse_error(e.to_string()))?;
                index.insert(Triple::from(triple));
            }
        }
        RdfFormat::NQuads => {
            for quad in NQuadsParser::new().for_slice(bytes) {
                let quad = quad.map_err(|e| parse_error(e.to_string()))?;
                index.insert(Triple::from(quad));
            }
        }
        RdfFormat::TriG => {
            let mut parser = TriGParser::new();
            if let Some(base) = base_iri {
                parser = parser
                    .with_base_iri(base)
                    .map_err(|_| ExtractError::InvalidBaseIri(base.to_string()))?;
            }
            for quad in parser.for_slice(bytes) {
                let quad = quad.map_err(|e| parse_error(e.to_string()))?;
                index.insert(Triple::from(quad));
            }
        }
    }

    debug!(source = source_name, triples = index.len(), "Parsed RDF");
    Ok(index)
}

fn read_file(path: &Path) -> Result<String, ExtractError> {
    if !path.is_file() {
        return Err(ExtractError::InvalidPath(path.to_path_buf()));
    }
    std::fs::read_to_string(path).map_err(|e| ExtractError::LoadError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// A fetched HTTP body with the metadata parsing needs
#[derive(Debug)]
struct Fetched {
    final_url: String,
    content_type: Option<String>,
    body: String,
}

/// Simple URL fetch
fn fetch_url(url: &str) -> Result<Fetched, ExtractError> {
    let parsed = Url::parse(url).map_err(|e| ExtractError::LoadError {
        path: url.to_string(),
        reason: format!("Invalid URL: {}", e),
    })?;

    let response = reqwest::blocking::Client::new()
        .get(parsed)
        .header(ACCEPT, RDF_ACCEPT)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(|e| ExtractError::LoadError {
            path: url.to_string(),
            reason: format!("HTTP request failed: {}", e),
        })?;

    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let body = response.text().map_err(|e| ExtractError::LoadError {
        path: url.to_string(),
        reason: format!("Failed to read response: {}", e),
    })?;

    Ok(Fetched {
        final_url,
        content_type,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::TriplePattern;
    use crate::term::{Literal, Term};

    #[test]
    fn test_source_parse() {
        assert_eq!(Source::parse("-"), Source::Stdin);
        assert_eq!(
            Source::parse("https://example.org/page"),
            Source::Url("https://example.org/page".to_string())
        );
        assert_eq!(
            Source::parse("data/page.ttl"),
            Source::File(PathBuf::from("data/page.ttl"))
        );
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            RdfFormat::from_extension(Path::new("a/page.TTL")),
            Some(RdfFormat::Turtle)
        );
        assert_eq!(
            RdfFormat::from_extension(Path::new("dump.nq")),
            Some(RdfFormat::NQuads)
        );
        assert_eq!(RdfFormat::from_extension(Path::new("dump.json")), None);
        assert_eq!(
            RdfFormat::from_media_type("text/turtle; charset=utf-8"),
            Some(RdfFormat::Turtle)
        );
        assert_eq!(
            RdfFormat::from_media_type("application/n-triples"),
            Some(RdfFormat::NTriples)
        );
        assert_eq!(RdfFormat::from_media_type("text/html"), None);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("TriG".parse::<RdfFormat>().unwrap(), RdfFormat::TriG);
        assert_eq!("nt".parse::<RdfFormat>().unwrap(), RdfFormat::NTriples);
        assert!(matches!(
            "rdfxml".parse::<RdfFormat>(),
            Err(ExtractError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_parse_turtle_with_base() {
        let index = parse_str(
            "<page> <https://w3id.org/tree#value> \"hallo\"@nl .",
            RdfFormat::Turtle,
            Some("http://example.org/"),
        )
        .unwrap();

        let subject = Term::iri("http://example.org/page");
        let found = index.matching(&TriplePattern::any().subject(&subject));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].object, Term::Literal(Literal::lang("hallo", "nl")));
    }

    #[test]
    fn test_parse_ntriples_dedup() {
        let nt = "<http://ex.org/a> <http://ex.org/p> _:b0 .\n\
                  <http://ex.org/a> <http://ex.org/p> _:b0 .\n";
        let index = parse_str(nt, RdfFormat::NTriples, None).unwrap();
        assert_eq!(index.len(), 1);
        let triple = index.iter().next().unwrap();
        assert!(matches!(&triple.object, Term::BlankNode(id) if id.starts_with("_:")));
    }

    #[test]
    fn test_parse_nquads_drops_graph() {
        let nq = "<http://ex.org/a> <http://ex.org/p> <http://ex.org/b> <http://ex.org/g1> .\n\
                  <http://ex.org/a> <http://ex.org/p> <http://ex.org/b> <http://ex.org/g2> .\n";
        let index = parse_str(nq, RdfFormat::NQuads, None).unwrap();
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_parse_error() {
        let result = parse_str("this is not turtle", RdfFormat::Turtle, None);
        assert!(matches!(result, Err(ExtractError::ParseError { .. })));
    }

    #[test]
    fn test_invalid_base_iri() {
        let result = parse_str("", RdfFormat::Turtle, Some("not an iri"));
        assert!(matches!(result, Err(ExtractError::InvalidBaseIri(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load(
            &Source::File(PathBuf::from("/definitely/not/here.ttl")),
            &LoadOptions::default(),
        );
        assert!(matches!(result, Err(ExtractError::InvalidPath(_))));
    }
}
