//! graph-paths: reads graph descriptions from a file, builds them with
//! graph-paths-core, and prints traversal or shortest-path reports.
//!
//! Reports go to stdout; diagnostics (rejected edges, skipped graphs) go to
//! stderr through `tracing`.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use graph_paths_core::{ListGraph, MatrixGraph, VertexId};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod load;
mod report;

use config::{Cli, Command, Format};
use load::GraphReader;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match &cli.command {
        Command::Dfs { file } => run_dfs(file, cli.format, &mut out)?,
        Command::Dijkstra { file, pairs } => run_dijkstra(file, pairs, cli.format, &mut out)?,
    }

    out.flush().context("failed to flush report")?;
    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log filter '{}'", level))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

fn open(path: &Path) -> Result<GraphReader<BufReader<File>>> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(GraphReader::new(BufReader::new(file)))
}

fn run_dfs<W: Write>(path: &Path, format: Format, out: &mut W) -> Result<()> {
    let mut reader = open(path)?;
    let mut count = 0usize;

    while let Some(loaded) = reader
        .next_graph::<ListGraph>()
        .with_context(|| format!("failed to read {}", path.display()))?
    {
        count += 1;
        if loaded.report.skipped {
            continue;
        }
        match format {
            Format::Text => report::write_list_graph(out, &loaded.graph)?,
            Format::Json => report::write_list_graph_json(out, &loaded.graph)?,
        }
    }

    info!(graphs = count, file = %path.display(), "depth-first traversal done");
    Ok(())
}

fn run_dijkstra<W: Write>(
    path: &Path,
    pairs: &[(VertexId, VertexId)],
    format: Format,
    out: &mut W,
) -> Result<()> {
    let mut reader = open(path)?;
    let mut count = 0usize;

    while let Some(loaded) = reader
        .next_graph::<MatrixGraph>()
        .with_context(|| format!("failed to read {}", path.display()))?
    {
        count += 1;
        if loaded.report.skipped {
            continue;
        }
        let mut graph = loaded.graph;
        let reports = graph.report_all();

        let mut requested = Vec::with_capacity(pairs.len());
        for &(source, dest) in pairs {
            match graph.report(source, dest) {
                Ok(path) => requested.push((source, dest, path)),
                Err(e) => warn!(line = loaded.line, source, dest, "skipping pair: {}", e),
            }
        }

        match format {
            Format::Text => {
                report::write_all_paths(out, &reports)?;
                for (source, dest, path) in &requested {
                    report::write_pair(out, *source, *dest, path.as_ref())?;
                }
            }
            Format::Json => report::write_paths_json(out, &reports, &requested)?,
        }
    }

    info!(graphs = count, file = %path.display(), "shortest paths done");
    Ok(())
}
