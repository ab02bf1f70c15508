/*
 * Commit graph CLI
 *
 * Loads a repository's history, builds the commit graph and prints its rows.
 *
 * Usage:
 *   commitgraph-cli --repo .
 *   commitgraph-cli --repo . --hide-all --details
 *   commitgraph-cli --repo . --config commitgraph.yaml --format json
 *
 * Logging goes to stderr and follows RUST_LOG (default: info).
 */

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use rustc_hash::FxHashMap;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use commitgraph_core::config::Validatable;
use commitgraph_core::{
    BranchIdAllocator, CommitData, CommitGraphConfig, CommitHash, EdgeKind, GitProcessRunner,
    GraphModel, HistoryLoader, NodeKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "commitgraph-cli", about = "Print the commit graph of a git repository")]
struct Args {
    /// Repository path
    #[arg(short, long, default_value = ".")]
    repo: PathBuf,

    /// YAML config file (`version: 1`)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Commits per reader block
    #[arg(long)]
    block_size: Option<usize>,

    /// Collapse every straight stretch of history
    #[arg(long)]
    hide_all: bool,

    /// Print author and subject next to each commit
    #[arg(long)]
    details: bool,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> anyhow::Result<CommitGraphConfig> {
    let mut config = match &args.config {
        Some(path) => CommitGraphConfig::from_yaml(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => CommitGraphConfig::default(),
    }
    .apply_env()?;

    if let Some(block_size) = args.block_size {
        config.reader.block_size = block_size;
    }
    if args.hide_all {
        config.graph.collapse_on_load = true;
    }
    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = load_config(args)?;
    let runner = GitProcessRunner::open(&args.repo, &config.reader)?;
    let loader = HistoryLoader::new(runner, config.reader.clone());

    let history = loader.load_history(&mut |message: &str| info!("{}", message))?;

    let mut allocator = BranchIdAllocator::new();
    let mut model = GraphModel::build(&history, &mut allocator);
    if config.graph.collapse_on_load {
        model.hide_all()?;
    }
    info!(
        "graph: {} rows, {} branches",
        model.graph().row_count(),
        allocator.allocated()
    );

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&model.graph().snapshot())?);
        }
        OutputFormat::Text => {
            let details = if args.details {
                let hashes: Vec<CommitHash> = model
                    .graph()
                    .visible_nodes()
                    .filter_map(|id| match model.graph().node(id).kind() {
                        NodeKind::Commit(hash) => Some(hash.clone()),
                        _ => None,
                    })
                    .collect();
                loader
                    .load_commit_details(&hashes)?
                    .into_iter()
                    .map(|data| (data.hash.clone(), data))
                    .collect()
            } else {
                FxHashMap::default()
            };
            print_rows(&model, &details);
        }
    }
    Ok(())
}

fn print_rows(model: &GraphModel, details: &FxHashMap<CommitHash, CommitData>) {
    let graph = model.graph();
    for row in graph.rows() {
        let mut lanes = String::new();
        let mut label = String::new();
        for &id in row.nodes() {
            let node = graph.node(id);
            let collapsed = node
                .down_edges()
                .iter()
                .any(|&e| graph.edge(e).kind() == EdgeKind::HideBranch);
            match node.kind() {
                NodeKind::Commit(hash) => {
                    lanes.push(if collapsed { '+' } else { '*' });
                    label = match details.get(hash) {
                        Some(data) => format!("{} {} {}", hash.short(), data.author, data.subject),
                        None => hash.short().to_string(),
                    };
                }
                NodeKind::EdgeJunction(_) => lanes.push('|'),
                NodeKind::TruncatedParent(hash) => {
                    lanes.push('~');
                    if label.is_empty() {
                        label = format!("({} not loaded)", hash.short());
                    }
                }
            }
            lanes.push(' ');
        }
        println!("{:>6}  {:<12}{}", row.log_index(), lanes, label);
    }
}
