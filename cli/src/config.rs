use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use graph_paths_core::VertexId;

#[derive(Debug, Parser)]
#[command(name = "graph-paths")]
#[command(about = "Depth-first traversal and all-pairs shortest paths over small labelled graphs")]
#[command(version)]
pub struct Cli {
    /// Report format written to stdout.
    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    pub format: Format,

    /// Diagnostics filter for stderr, e.g. "warn" or "graph_paths=debug".
    /// RUST_LOG takes precedence when set.
    #[arg(long, env = "GRAPH_PATHS_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List each adjacency-list graph in FILE and its depth-first ordering
    Dfs {
        /// Graph descriptions with `source dest` edge records
        file: PathBuf,
    },
    /// Show all-pairs shortest paths for each adjacency-matrix graph in FILE
    Dijkstra {
        /// Graph descriptions with `source dest cost` edge records
        file: PathBuf,

        /// Also show the detailed path for SOURCE:DEST (repeatable)
        #[arg(long = "pair", value_name = "SOURCE:DEST", value_parser = parse_pair)]
        pairs: Vec<(VertexId, VertexId)>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    /// One JSON document per graph, newline-delimited
    Json,
}

fn parse_pair(s: &str) -> Result<(VertexId, VertexId), String> {
    let (source, dest) = s
        .split_once(':')
        .ok_or_else(|| format!("expected SOURCE:DEST, got '{}'", s))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<VertexId>()
            .map_err(|e| format!("invalid vertex '{}': {}", v, e))
    };
    Ok((parse(source)?, parse(dest)?))
}
