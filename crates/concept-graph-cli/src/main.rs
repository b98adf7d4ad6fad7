//! Concept Graph demonstration CLI.
//!
//! Seeds a small programming-knowledge hypergraph and answers a free-text
//! query against it, optionally writing the snapshot artifacts.
//!
//! # Usage
//!
//! ```bash
//! # Query the seeded knowledge with defaults
//! concept-graph
//!
//! # Custom query and search width
//! concept-graph "dynamic typing" --top-k 6
//!
//! # Also write incidence matrix + node/edge dumps
//! concept-graph --snapshot-dir ./snapshot
//!
//! # Debug logging
//! RUST_LOG=debug concept-graph
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use concept_graph_core::{GraphConfig, GraphResult, Hypergraph, RagSystem};

#[derive(Debug, Parser)]
#[command(name = "concept-graph", about = "Query a seeded concept hypergraph")]
struct Cli {
    /// Free-text query to answer from the knowledge graph
    #[arg(default_value = "Web framework")]
    query: String,

    /// Number of index hits to retrieve (search width)
    #[arg(long)]
    top_k: Option<usize>,

    /// Write snapshot artifacts (incidence matrix, nodes, edges) here
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Populate the graph with the programming-knowledge demo set.
async fn seed_knowledge(rag: &mut RagSystem) -> GraphResult<()> {
    let entries: &[(&[&str], &[&str], &str)] = &[
        (
            &["Python"],
            &["OOP", "Interpreted", "DynamicTyping"],
            "language_features",
        ),
        (
            &["List Comprehension"],
            &["Python", "Functional Programming"],
            "programming_technique",
        ),
        (
            &["Django", "Pyramid"],
            &["Python", "Web Framework", "ORM"],
            "framework",
        ),
        (&["Java", "C"], &["Compiled", "Typed"], "language_features"),
    ];

    for (concepts, related, relation) in entries {
        let concepts: Vec<String> = concepts.iter().map(|s| s.to_string()).collect();
        let related: Vec<String> = related.iter().map(|s| s.to_string()).collect();
        rag.add_knowledge(&concepts, &related, relation).await?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GraphConfig::from_file(path)?,
        None => GraphConfig::load()?,
    };
    let top_k = cli.top_k.unwrap_or(config.index.default_top_k);

    let mut rag = RagSystem::new(Hypergraph::new(config));
    seed_knowledge(&mut rag).await?;
    info!(
        nodes = rag.graph().node_count(),
        edges = rag.graph().edge_count(),
        "seeded knowledge graph"
    );

    let knowledge = rag.retrieve(&cli.query, top_k).await?;
    print!("{knowledge}");

    if let Some(dir) = &cli.snapshot_dir {
        std::fs::create_dir_all(dir)?;
        rag.graph()
            .save(
                dir.join("incidence_matrix.json"),
                dir.join("nodes.json"),
                dir.join("edges.json"),
            )
            .await?;
        info!(dir = %dir.display(), "wrote snapshot artifacts");
    }

    Ok(())
}
