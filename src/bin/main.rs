//! TREE Metadata CLI
//!
//! Command-line tool for extracting collection, node and relation metadata
//! from TREE/Hydra RDF pages.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tree_metadata::{
    discovered_ids_json, extract, load, to_json_string, ExtractError, ExtractOptions,
    LoadOptions, RdfFormat, Source, DEFAULT_MAX_DEPTH, TREE_NS,
};

#[derive(Parser)]
#[command(name = "tree-metadata")]
#[command(about = "Extract TREE collection, node and relation metadata from RDF")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract metadata documents for every collection, node and relation
    Extract(ExtractArgs),
    /// List the ids discovered per kind
    Discover(SourceArgs),
}

#[derive(Args)]
struct SourceArgs {
    /// Path to an RDF file, URL, or '-' for stdin
    source: String,

    /// RDF format: turtle, n-triples, n-quads, trig (default: detected)
    #[arg(short, long)]
    format: Option<String>,

    /// Base IRI for relative references (default: source location)
    #[arg(long)]
    base: Option<String>,
}

#[derive(Args)]
struct ExtractArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Keep full IRIs instead of shortening against the TREE vocabulary
    #[arg(long)]
    no_compact: bool,

    /// Namespace to compact against
    #[arg(long, default_value = TREE_NS)]
    vocab: String,

    /// Add an @context to every document
    #[arg(long)]
    embed_context: bool,

    /// Stop expanding nested objects below this many levels
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Append diagnostics and run statistics to the output
    #[arg(long)]
    report: bool,
}

fn init_logging(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_options(args: &SourceArgs) -> Result<LoadOptions, ExtractError> {
    let format = args
        .format
        .as_deref()
        .map(str::parse::<RdfFormat>)
        .transpose()?;

    Ok(LoadOptions {
        format,
        base_iri: args.base.clone(),
    })
}

/// Write output to file or stdout
fn write_output(content: &str, output: Option<&PathBuf>) -> Result<(), ExtractError> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            info!("Wrote metadata to {}", path.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}

fn run_extract(args: ExtractArgs) -> Result<(), ExtractError> {
    if args.max_depth == 0 {
        return Err(ExtractError::InvalidArgument(
            "--max-depth must be at least 1".to_string(),
        ));
    }

    let index = load(&Source::parse(&args.source.source), &load_options(&args.source)?)?;

    let options = ExtractOptions {
        compact: !args.no_compact,
        vocab: args.vocab,
        embed_context: args.embed_context,
        max_depth: args.max_depth,
    };

    let result = extract(&index, &options);

    info!(
        collections = result.stats.collections,
        nodes = result.stats.nodes,
        relations = result.stats.relations,
        triples = result.stats.triples,
        cycles = result.stats.cycles_truncated,
        depth_cutoffs = result.stats.depth_truncated,
        "Extraction complete"
    );

    let output = to_json_string(&result, args.pretty, args.report)?;
    write_output(&output, args.output.as_ref())
}

fn run_discover(args: SourceArgs) -> Result<(), ExtractError> {
    let index = load(&Source::parse(&args.source), &load_options(&args)?)?;
    let ids = discovered_ids_json(&index);
    println!("{}", serde_json::to_string_pretty(&ids)?);
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Extract(args) => run_extract(args),
        Commands::Discover(args) => run_discover(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
