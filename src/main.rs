//! wordgraph CLI - build and inspect DAWG artifacts
//!
//! `build` reads a word list (one word per line), minimizes it and writes the
//! encoded array. `inspect` decodes an existing artifact.

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wordgraph::{export_graph, read_artifact, BuildConfig, GraphStats, WordGraph};

#[derive(Parser)]
#[command(name = "wordgraph")]
#[command(about = "Build a minimal acyclic word graph and encode it as a flat array")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.config/wordgraph/config.json if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format (json or text)
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an artifact from a word list
    Build {
        /// Word list, one word per line
        wordlist: PathBuf,
        /// Artifact destination
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write a DOT rendering of the minimized graph
        #[arg(long)]
        tree_dot: Option<PathBuf>,
        /// Write a DOT rendering of the flat array
        #[arg(long)]
        array_dot: Option<PathBuf>,
        /// Fail on malformed lines instead of skipping them
        #[arg(long)]
        strict: bool,
    },

    /// Decode an artifact and show its records
    Inspect {
        /// The artifact to read
        artifact: PathBuf,
        /// Maximum number of records to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Write a DOT rendering of the decoded array
        #[arg(long)]
        dot: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Build {
            wordlist,
            output,
            tree_dot,
            array_dot,
            strict,
        } => {
            let mut config = BuildConfig::resolve(cli.config.as_deref())?;
            if let Some(output) = output {
                config.output = output;
            }
            if tree_dot.is_some() {
                config.tree_dot = tree_dot;
            }
            if array_dot.is_some() {
                config.array_dot = array_dot;
            }
            if strict {
                config.skip_malformed = false;
            }

            let stats = build(&wordlist, &config)?;
            output_json(
                cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "output": config.output.display().to_string(),
                    "stats": stats
                }),
            )?;
        }

        Commands::Inspect {
            artifact,
            limit,
            dot,
        } => {
            let array = read_artifact(&artifact)?;
            if let Some(path) = &dot {
                export_graph(&array, path)?;
            }
            let items: Vec<_> = array
                .iter()
                .take(limit)
                .enumerate()
                .map(|(slot, r)| {
                    serde_json::json!({
                        "slot": slot,
                        "value": r.as_char().map(String::from),
                        "children": r.children_index,
                        "end_of_list": r.end_of_list
                    })
                })
                .collect();
            output_json(
                cli.format,
                &serde_json::json!({
                    "artifact": artifact.display().to_string(),
                    "count": array.len(),
                    "records": items
                }),
            )?;
        }
    }

    Ok(())
}

fn build(wordlist: &Path, config: &BuildConfig) -> anyhow::Result<GraphStats> {
    info!(wordlist = %wordlist.display(), "building graph");
    let reader = BufReader::new(File::open(wordlist)?);

    let mut graph = WordGraph::new();
    let vocabulary = graph.insert_lines(reader, config.skip_malformed)?;
    let minimize = graph.optimize()?;

    if let Some(path) = &config.tree_dot {
        export_graph(&graph, path)?;
    }
    let array = graph.flatten_and_encode(&config.output)?;
    if let Some(path) = &config.array_dot {
        export_graph(&array, path)?;
    }

    Ok(GraphStats::collect(&graph, &vocabulary, &minimize, &array))
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn output_json(format: OutputFormat, value: &serde_json::Value) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(value)?),
        OutputFormat::Text => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}
