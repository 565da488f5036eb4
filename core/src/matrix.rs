use tracing::debug;

use crate::dijkstra::PathTable;
use crate::error::GraphError;
use crate::vertex::{
    raw_index, BuildReport, Cost, RejectedEdge, VertexId, Vertices, WeightedEdgeRecord,
};

/// Dense `(size + 1) x (size + 1)` cost matrix. `None` means no edge.
///
/// Row and column 0 are reserved. The diagonal is `Some(0)` and is never
/// treated as an edge.
#[derive(Debug, Clone, Default)]
pub(crate) struct CostMatrix {
    size: usize,
    cells: Vec<Option<Cost>>,
}

impl CostMatrix {
    pub(crate) fn new(size: usize) -> Self {
        let dim = size + 1;
        let mut cells = vec![None; dim * dim];
        for v in 1..=size {
            cells[v * dim + v] = Some(0);
        }
        Self { size, cells }
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn get(&self, source: VertexId, dest: VertexId) -> Option<Cost> {
        self.cells[source * (self.size + 1) + dest]
    }

    pub(crate) fn set(&mut self, source: VertexId, dest: VertexId, cost: Option<Cost>) {
        self.cells[source * (self.size + 1) + dest] = cost;
    }
}

/// Whether the shortest-path table reflects the current edges.
#[derive(Debug, Clone, Default)]
enum PathCache {
    #[default]
    Stale,
    Current(PathTable),
}

/// One vertex along a shortest path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep {
    pub vertex: VertexId,
    pub label: String,
}

/// A reconstructed shortest path between two vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPath {
    pub source: VertexId,
    pub dest: VertexId,
    pub distance: Cost,
    /// From `source` to `dest` inclusive.
    pub steps: Vec<PathStep>,
}

impl ShortestPath {
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.steps.iter().map(|s| s.vertex)
    }
}

/// Shortest-path outcome for one ordered pair. `path` is `None` when
/// `dest` is unreachable from `source`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairReport {
    pub source: VertexId,
    pub dest: VertexId,
    pub path: Option<ShortestPath>,
}

impl PairReport {
    pub fn distance(&self) -> Option<Cost> {
        self.path.as_ref().map(|p| p.distance)
    }
}

/// Every destination other than `source`, in index order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub source: VertexId,
    pub label: String,
    pub destinations: Vec<PairReport>,
}

/// Directed graph with positive integer edge costs stored as an adjacency
/// matrix, with a lazily rebuilt all-pairs shortest-path table.
#[derive(Debug, Clone, Default)]
pub struct MatrixGraph {
    vertices: Vertices,
    costs: CostMatrix,
    paths: PathCache,
}

impl MatrixGraph {
    /// An empty graph with no vertices. Every edge mutation fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// A graph with one vertex per label and no edges.
    ///
    /// Returns `None` when the label count is outside 1..=MAX_VERTICES.
    pub fn with_vertices<I, S>(labels: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let vertices = Vertices::from_labels(labels)?;
        let costs = CostMatrix::new(vertices.len());
        Some(Self {
            vertices,
            costs,
            paths: PathCache::Stale,
        })
    }

    /// Bulk build from vertex labels and weighted edge records.
    ///
    /// Edge records are consumed up to the first terminator (source 0).
    /// Later records for the same pair overwrite earlier ones.
    pub fn build<L, S, E>(labels: L, edges: E) -> (Self, BuildReport)
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
        E: IntoIterator<Item = WeightedEdgeRecord>,
    {
        let mut report = BuildReport::default();
        let Some(mut graph) = Self::with_vertices(labels) else {
            report.skipped = true;
            return (Self::new(), report);
        };

        for record in edges.into_iter().take_while(|r| !r.is_terminator()) {
            match graph.insert_raw(record.source, record.dest, record.cost) {
                Ok(()) => report.inserted += 1,
                Err(error) => report.rejected.push(RejectedEdge {
                    source: record.source,
                    dest: record.dest,
                    cost: Some(record.cost),
                    error,
                }),
            }
        }

        (graph, report)
    }

    /// Set `cost[source][dest]`, replacing any earlier cost.
    pub fn insert_edge(
        &mut self,
        source: VertexId,
        dest: VertexId,
        cost: Cost,
    ) -> Result<(), GraphError> {
        self.insert_raw(raw_index(source), raw_index(dest), cost)
    }

    fn insert_raw(&mut self, source: i64, dest: i64, cost: Cost) -> Result<(), GraphError> {
        let (s, d) = self.vertices.check_edge(source, dest)?;
        if cost <= 0 {
            return Err(GraphError::NonPositiveCost { cost });
        }
        self.costs.set(s, d, Some(cost));
        self.paths = PathCache::Stale;
        Ok(())
    }

    /// Reset `cost[source][dest]` to "no edge". Succeeds whether or not an
    /// edge was present.
    pub fn remove_edge(&mut self, source: VertexId, dest: VertexId) -> Result<(), GraphError> {
        let (s, d) = self
            .vertices
            .check_edge(raw_index(source), raw_index(dest))?;
        self.costs.set(s, d, None);
        self.paths = PathCache::Stale;
        Ok(())
    }

    /// Cost of the edge `source -> dest`, if one exists.
    pub fn edge_cost(&self, source: VertexId, dest: VertexId) -> Option<Cost> {
        let size = self.vertex_count();
        let in_range = |v: VertexId| (1..=size).contains(&v);
        if source == dest || !in_range(source) || !in_range(dest) {
            return None;
        }
        self.costs.get(source, dest)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        let size = self.vertex_count();
        (1..=size)
            .flat_map(|s| (1..=size).map(move |d| (s, d)))
            .filter(|&(s, d)| s != d && self.costs.get(s, d).is_some())
            .count()
    }

    pub fn label(&self, v: VertexId) -> Option<&str> {
        self.vertices.label(v)
    }

    /// True while the shortest-path table reflects the current edges.
    pub fn paths_current(&self) -> bool {
        matches!(self.paths, PathCache::Current(_))
    }

    /// Run Dijkstra's algorithm from every vertex. No-op when the table is current.
    pub fn find_shortest_path(&mut self) {
        if self.paths_current() {
            return;
        }
        debug!(vertices = self.vertex_count(), "recomputing shortest-path table");
        self.paths = PathCache::Current(PathTable::compute(&self.costs));
    }

    fn current_paths(&mut self) -> &PathTable {
        self.find_shortest_path();
        match &self.paths {
            PathCache::Current(table) => table,
            PathCache::Stale => unreachable!("shortest-path table was just computed"),
        }
    }

    fn check_pair(&self, source: VertexId, dest: VertexId) -> Result<(), GraphError> {
        self.vertices.check_vertex(raw_index(source))?;
        self.vertices.check_vertex(raw_index(dest))?;
        Ok(())
    }

    /// Shortest distance from `source` to `dest`; `Ok(None)` when unreachable.
    pub fn distance(&mut self, source: VertexId, dest: VertexId) -> Result<Option<Cost>, GraphError> {
        self.check_pair(source, dest)?;
        Ok(self.current_paths().distance(source, dest))
    }

    /// Vertex sequence of the shortest path; `Ok(None)` when unreachable.
    /// `path_to(v, v)` is `[v]`.
    pub fn path_to(
        &mut self,
        source: VertexId,
        dest: VertexId,
    ) -> Result<Option<Vec<VertexId>>, GraphError> {
        self.check_pair(source, dest)?;
        Ok(self.current_paths().route(source, dest))
    }

    /// Distance and labelled path for one ordered pair.
    pub fn report(
        &mut self,
        source: VertexId,
        dest: VertexId,
    ) -> Result<Option<ShortestPath>, GraphError> {
        self.check_pair(source, dest)?;
        self.find_shortest_path();
        Ok(self.shortest_path(source, dest))
    }

    /// Reports for every source and every destination other than the source.
    pub fn report_all(&mut self) -> Vec<SourceReport> {
        self.find_shortest_path();
        self.vertices
            .iter()
            .map(|(source, label)| SourceReport {
                source,
                label: label.to_string(),
                destinations: (1..=self.vertex_count())
                    .filter(|&dest| dest != source)
                    .map(|dest| PairReport {
                        source,
                        dest,
                        path: self.shortest_path(source, dest),
                    })
                    .collect(),
            })
            .collect()
    }

    /// Assemble a labelled path from a current table. Indices are already checked.
    fn shortest_path(&self, source: VertexId, dest: VertexId) -> Option<ShortestPath> {
        let PathCache::Current(table) = &self.paths else {
            return None;
        };
        let distance = table.distance(source, dest)?;
        let steps = table
            .route(source, dest)?
            .into_iter()
            .map(|vertex| PathStep {
                vertex,
                label: self.vertices.label(vertex).unwrap_or_default().to_string(),
            })
            .collect();
        Some(ShortestPath {
            source,
            dest,
            distance,
            steps,
        })
    }
}
