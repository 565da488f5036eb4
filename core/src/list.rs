use crate::error::GraphError;
use crate::vertex::{raw_index, BuildReport, EdgeRecord, RejectedEdge, VertexId, Vertices};

/// Directed, unweighted graph stored as per-vertex adjacency lists.
///
/// Each vertex owns its outgoing edges. Insertion prepends, so edges are
/// walked most-recently-inserted first. Duplicate edges are kept.
#[derive(Debug, Clone, Default)]
pub struct ListGraph {
    vertices: Vertices,
    /// `adjacency[v - 1]` holds v's destinations in insertion order;
    /// traversal reads it back to front.
    adjacency: Vec<Vec<VertexId>>,
}

impl ListGraph {
    /// An empty graph with no vertices. Every edge insertion fails.
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
        let adjacency = vec![Vec::new(); vertices.len()];
        Some(Self {
            vertices,
            adjacency,
        })
    }

    /// Bulk build from vertex labels and edge records.
    ///
    /// Edge records are consumed up to the first terminator (source 0).
    /// Bad records are skipped and listed in the report. An out-of-range
    /// vertex count yields an empty graph with `skipped` set.
    pub fn build<L, S, E>(labels: L, edges: E) -> (Self, BuildReport)
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
        E: IntoIterator<Item = EdgeRecord>,
    {
        let mut report = BuildReport::default();
        let Some(mut graph) = Self::with_vertices(labels) else {
            report.skipped = true;
            return (Self::new(), report);
        };

        for record in edges.into_iter().take_while(|r| !r.is_terminator()) {
            match graph.insert_raw(record.source, record.dest) {
                Ok(()) => report.inserted += 1,
                Err(error) => report.rejected.push(RejectedEdge {
                    source: record.source,
                    dest: record.dest,
                    cost: None,
                    error,
                }),
            }
        }

        (graph, report)
    }

    /// Insert a directed edge `source -> dest` at the head of source's list.
    pub fn insert_edge(&mut self, source: VertexId, dest: VertexId) -> Result<(), GraphError> {
        self.insert_raw(raw_index(source), raw_index(dest))
    }

    fn insert_raw(&mut self, source: i64, dest: i64) -> Result<(), GraphError> {
        let (s, d) = self.vertices.check_edge(source, dest)?;
        self.adjacency[s - 1].push(d);
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    pub fn label(&self, v: VertexId) -> Option<&str> {
        self.vertices.label(v)
    }

    /// Vertices in index order with their labels.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &str)> {
        self.vertices.iter()
    }

    /// Outgoing edges of `v`, most recently inserted first.
    /// Empty for an out-of-range vertex.
    pub fn edges(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        v.checked_sub(1)
            .and_then(|i| self.adjacency.get(i))
            .map(|out| out.as_slice())
            .unwrap_or(&[])
            .iter()
            .rev()
            .copied()
    }

    pub fn has_edge(&self, source: VertexId, dest: VertexId) -> bool {
        self.edges(source).any(|d| d == dest)
    }

    /// Depth-first ordering of every vertex.
    ///
    /// Roots are tried in increasing index order, so disconnected parts each
    /// start a new branch at their lowest unvisited index. Within a vertex,
    /// edges are followed most-recent-first. The order matches the recursive
    /// formulation exactly; an explicit stack keeps it independent of call depth.
    pub fn depth_first_search(&self) -> Vec<VertexId> {
        let size = self.vertex_count();
        let mut visited = vec![false; size + 1];
        let mut order = Vec::with_capacity(size);
        // (vertex, number of its edges already examined)
        let mut stack: Vec<(VertexId, usize)> = Vec::new();

        for root in 1..=size {
            if visited[root] {
                continue;
            }
            visited[root] = true;
            order.push(root);
            stack.push((root, 0));

            while let Some(top) = stack.last_mut() {
                let (v, examined) = *top;
                let out = &self.adjacency[v - 1];
                if examined == out.len() {
                    stack.pop();
                    continue;
                }
                top.1 += 1;

                let w = out[out.len() - 1 - examined];
                if !visited[w] {
                    visited[w] = true;
                    order.push(w);
                    stack.push((w, 0));
                }
            }
        }

        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("v{}", i)).collect()
    }

    fn edge(source: i64, dest: i64) -> EdgeRecord {
        EdgeRecord { source, dest }
    }

    fn make_chain(n: usize) -> ListGraph {
        let mut g = ListGraph::with_vertices(labels(n)).unwrap();
        for i in 1..n {
            g.insert_edge(i, i + 1).unwrap();
        }
        g
    }

    #[test]
    fn test_no_edges_visits_in_index_order() {
        let g = ListGraph::with_vertices(labels(5)).unwrap();
        assert_eq!(g.depth_first_search(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_chain() {
        let g = make_chain(4);
        assert_eq!(g.depth_first_search(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_reverse_chain_restarts_per_root() {
        let mut g = ListGraph::with_vertices(labels(3)).unwrap();
        g.insert_edge(3, 2).unwrap();
        g.insert_edge(2, 1).unwrap();
        // 1 has no out-edges, so 2 and then 3 start their own branches.
        assert_eq!(g.depth_first_search(), vec![1, 2, 3]);
    }

    #[test]
    fn test_most_recent_edge_first() {
        let mut g = ListGraph::with_vertices(labels(4)).unwrap();
        g.insert_edge(1, 2).unwrap();
        g.insert_edge(1, 3).unwrap();
        g.insert_edge(1, 4).unwrap();
        assert_eq!(g.edges(1).collect::<Vec<_>>(), vec![4, 3, 2]);
        assert_eq!(g.depth_first_search(), vec![1, 4, 3, 2]);
    }

    #[test]
    fn test_backtracks_to_unfinished_vertex() {
        // 1 -> 2 -> 4, 1 -> 3 (inserted first, so visited last)
        let mut g = ListGraph::with_vertices(labels(5)).unwrap();
        g.insert_edge(1, 3).unwrap();
        g.insert_edge(1, 2).unwrap();
        g.insert_edge(2, 4).unwrap();
        assert_eq!(g.depth_first_search(), vec![1, 2, 4, 3, 5]);
    }

    #[test]
    fn test_cycle_no_infinite_loop() {
        let mut g = ListGraph::with_vertices(labels(3)).unwrap();
        g.insert_edge(1, 2).unwrap();
        g.insert_edge(2, 3).unwrap();
        g.insert_edge(3, 1).unwrap();
        assert_eq!(g.depth_first_search(), vec![1, 2, 3]);
    }

    #[test]
    fn test_disconnected_components() {
        let mut g = ListGraph::with_vertices(labels(6)).unwrap();
        g.insert_edge(1, 2).unwrap();
        g.insert_edge(4, 6).unwrap();
        g.insert_edge(6, 5).unwrap();
        assert_eq!(g.depth_first_search(), vec![1, 2, 3, 4, 6, 5]);
    }

    #[test]
    fn test_duplicate_edges_kept() {
        let mut g = ListGraph::with_vertices(labels(2)).unwrap();
        g.insert_edge(1, 2).unwrap();
        g.insert_edge(1, 2).unwrap();
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.depth_first_search(), vec![1, 2]);
    }

    #[test]
    fn test_insert_rejects_bad_edges_without_mutation() {
        let mut g = ListGraph::with_vertices(labels(3)).unwrap();
        assert_eq!(
            g.insert_edge(0, 1),
            Err(GraphError::VertexOutOfRange { vertex: 0, size: 3 })
        );
        assert_eq!(
            g.insert_edge(1, 4),
            Err(GraphError::VertexOutOfRange { vertex: 4, size: 3 })
        );
        assert_eq!(g.insert_edge(2, 2), Err(GraphError::SelfLoop { vertex: 2 }));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_insert_then_query() {
        let mut g = ListGraph::with_vertices(labels(3)).unwrap();
        assert!(!g.has_edge(1, 3));
        g.insert_edge(1, 3).unwrap();
        assert!(g.has_edge(1, 3));
        assert!(!g.has_edge(3, 1));
    }

    #[test]
    fn test_empty_graph() {
        let mut g = ListGraph::new();
        assert!(g.depth_first_search().is_empty());
        assert!(g.insert_edge(1, 2).is_err());
        assert_eq!(g.edges(1).count(), 0);
    }

    #[test]
    fn test_build_stops_at_terminator() {
        let (g, report) = ListGraph::build(
            ["A", "B", "C"],
            vec![edge(1, 2), edge(2, 3), edge(0, 0), edge(3, 1)],
        );
        assert!(!report.skipped);
        assert_eq!(report.inserted, 2);
        assert!(report.rejected.is_empty());
        assert!(!g.has_edge(3, 1));
        assert_eq!(g.label(2), Some("B"));
    }

    #[test]
    fn test_build_collects_rejected_edges() {
        let (g, report) = ListGraph::build(
            ["A", "B"],
            vec![edge(1, 1), edge(-1, 2), edge(1, 2), edge(0, 5)],
        );
        assert_eq!(report.inserted, 1);
        assert_eq!(report.rejected.len(), 2);
        assert_eq!(report.rejected[0].error, GraphError::SelfLoop { vertex: 1 });
        assert_eq!(
            report.rejected[1].error,
            GraphError::VertexOutOfRange { vertex: -1, size: 2 }
        );
        assert_eq!(report.rejected[1].cost, None);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_build_skips_bad_vertex_count() {
        let (g, report) = ListGraph::build(Vec::<String>::new(), vec![edge(1, 2)]);
        assert!(report.skipped);
        assert_eq!(g.vertex_count(), 0);
        assert_eq!(report.inserted, 0);

        let (g, report) = ListGraph::build(labels(101), vec![edge(1, 2)]);
        assert!(report.skipped);
        assert_eq!(g.vertex_count(), 0);
    }
}
