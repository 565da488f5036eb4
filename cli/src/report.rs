use std::io::{self, Write};

use graph_paths_core::{Cost, ListGraph, ShortestPath, SourceReport, VertexId};
use serde::Serialize;

fn join(vertices: impl Iterator<Item = VertexId>) -> String {
    vertices
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// Vertices with their outgoing edges, then the depth-first ordering.
pub fn write_list_graph<W: Write>(out: &mut W, graph: &ListGraph) -> io::Result<()> {
    writeln!(out, "Graph:")?;
    for (v, label) in graph.vertices() {
        writeln!(out, "Node {:>4}        {}", v, label)?;
        for dest in graph.edges(v) {
            writeln!(out, "  edge {} {}", v, dest)?;
        }
    }
    writeln!(out)?;
    writeln!(
        out,
        "Depth-first ordering: {}",
        join(graph.depth_first_search().into_iter())
    )?;
    writeln!(out)
}

/// All-pairs table: one block per source, one row per other vertex.
pub fn write_all_paths<W: Write>(out: &mut W, reports: &[SourceReport]) -> io::Result<()> {
    writeln!(
        out,
        "{:<26}{:<11}{:<9}{:<12}Path",
        "Description", "From node", "To node", "Dijkstra's"
    )?;
    for source in reports {
        writeln!(out, "{}", source.label)?;
        for pair in &source.destinations {
            match &pair.path {
                Some(path) => writeln!(
                    out,
                    "{:>35}{:>5}{:>14}    {}",
                    pair.source,
                    pair.dest,
                    path.distance,
                    join(path.vertices())
                )?,
                None => writeln!(out, "{:>35}{:>5}{:>14}", pair.source, pair.dest, "----")?,
            }
        }
    }
    writeln!(out)
}

/// One pair in detail: distance, vertex path, then each label along it.
pub fn write_pair<W: Write>(
    out: &mut W,
    source: VertexId,
    dest: VertexId,
    path: Option<&ShortestPath>,
) -> io::Result<()> {
    match path {
        Some(path) => {
            writeln!(
                out,
                "{:>4}{:>8}{:>8}        {}",
                source,
                dest,
                path.distance,
                join(path.vertices())
            )?;
            for step in &path.steps {
                writeln!(out, "{}", step.label)?;
            }
        }
        None => writeln!(out, "No path from {} to {}.", source, dest)?,
    }
    writeln!(out)
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct VertexJson<'a> {
    id: VertexId,
    label: &'a str,
    edges: Vec<VertexId>,
}

#[derive(Debug, Serialize)]
struct ListGraphJson<'a> {
    vertices: Vec<VertexJson<'a>>,
    depth_first: Vec<VertexId>,
}

#[derive(Debug, Serialize)]
struct RouteJson {
    source: VertexId,
    dest: VertexId,
    /// Null when unreachable.
    distance: Option<Cost>,
    path: Option<Vec<VertexId>>,
}

impl RouteJson {
    fn new(source: VertexId, dest: VertexId, path: Option<&ShortestPath>) -> Self {
        Self {
            source,
            dest,
            distance: path.map(|p| p.distance),
            path: path.map(|p| p.vertices().collect()),
        }
    }
}

#[derive(Debug, Serialize)]
struct LabelJson<'a> {
    id: VertexId,
    label: &'a str,
}

#[derive(Debug, Serialize)]
struct MatrixGraphJson<'a> {
    vertices: Vec<LabelJson<'a>>,
    routes: Vec<RouteJson>,
    pairs: Vec<RouteJson>,
}

pub fn write_list_graph_json<W: Write>(out: &mut W, graph: &ListGraph) -> io::Result<()> {
    let doc = ListGraphJson {
        vertices: graph
            .vertices()
            .map(|(id, label)| VertexJson {
                id,
                label,
                edges: graph.edges(id).collect(),
            })
            .collect(),
        depth_first: graph.depth_first_search(),
    };
    serde_json::to_writer(&mut *out, &doc)?;
    writeln!(out)
}

/// `pairs` are the individually requested routes, in request order.
pub fn write_paths_json<W: Write>(
    out: &mut W,
    reports: &[SourceReport],
    pairs: &[(VertexId, VertexId, Option<ShortestPath>)],
) -> io::Result<()> {
    let doc = MatrixGraphJson {
        vertices: reports
            .iter()
            .map(|r| LabelJson {
                id: r.source,
                label: &r.label,
            })
            .collect(),
        routes: reports
            .iter()
            .flat_map(|r| &r.destinations)
            .map(|p| RouteJson::new(p.source, p.dest, p.path.as_ref()))
            .collect(),
        pairs: pairs
            .iter()
            .map(|(s, d, path)| RouteJson::new(*s, *d, path.as_ref()))
            .collect(),
    };
    serde_json::to_writer(&mut *out, &doc)?;
    writeln!(out)
}
