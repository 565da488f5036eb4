use crate::matrix::CostMatrix;
use crate::vertex::{Cost, VertexId};

/// Per (source, dest) bookkeeping for Dijkstra's algorithm.
#[derive(Debug, Clone, Copy, Default)]
struct PathCell {
    visited: bool,
    /// `None` is infinite.
    distance: Option<Cost>,
    /// Vertex preceding `dest` on the shortest known path from `source`.
    predecessor: Option<VertexId>,
}

/// All-pairs shortest-path table: one Dijkstra run per source vertex.
///
/// Indexed `[source][dest]` over 1..=size; row and column 0 are unused.
#[derive(Debug, Clone)]
pub(crate) struct PathTable {
    dim: usize,
    cells: Vec<PathCell>,
}

impl PathTable {
    pub(crate) fn compute(costs: &CostMatrix) -> Self {
        let size = costs.size();
        let dim = size + 1;
        let mut table = Self {
            dim,
            cells: vec![PathCell::default(); dim * dim],
        };
        for source in 1..=size {
            table.solve_from(costs, source);
        }
        table
    }

    fn cell(&self, source: VertexId, dest: VertexId) -> &PathCell {
        &self.cells[source * self.dim + dest]
    }

    fn cell_mut(&mut self, source: VertexId, dest: VertexId) -> &mut PathCell {
        &mut self.cells[source * self.dim + dest]
    }

    fn solve_from(&mut self, costs: &CostMatrix, source: VertexId) {
        self.cell_mut(source, source).distance = Some(0);

        for _ in 0..costs.size() {
            // Nothing reachable is left unvisited; the remaining row stays infinite.
            let Some(v) = self.nearest_unvisited(source) else {
                break;
            };
            self.cell_mut(source, v).visited = true;
            self.relax_from(costs, source, v);
        }
    }

    /// Unvisited vertex with the smallest finite distance from `source`.
    /// Ties go to the lowest index.
    fn nearest_unvisited(&self, source: VertexId) -> Option<VertexId> {
        let mut best: Option<(VertexId, Cost)> = None;
        for v in 1..self.dim {
            let cell = self.cell(source, v);
            if cell.visited {
                continue;
            }
            if let Some(d) = cell.distance {
                if best.map_or(true, |(_, bd)| d < bd) {
                    best = Some((v, d));
                }
            }
        }
        best.map(|(v, _)| v)
    }

    /// Relax every unvisited neighbour `w` of `v` that has a finite edge.
    fn relax_from(&mut self, costs: &CostMatrix, source: VertexId, v: VertexId) {
        let Some(base) = self.cell(source, v).distance else {
            return;
        };

        for w in 1..self.dim {
            if self.cell(source, w).visited {
                continue;
            }
            let Some(edge) = costs.get(v, w) else {
                continue;
            };
            // An overflowing sum can never be an improvement.
            let Some(candidate) = base.checked_add(edge) else {
                continue;
            };

            let cell = self.cell_mut(source, w);
            if cell.distance.map_or(true, |d| candidate < d) {
                cell.distance = Some(candidate);
                cell.predecessor = Some(v);
            }
        }
    }

    pub(crate) fn distance(&self, source: VertexId, dest: VertexId) -> Option<Cost> {
        self.cell(source, dest).distance
    }

    /// Forward vertex sequence from `source` to `dest`, or `None` if unreachable.
    pub(crate) fn route(&self, source: VertexId, dest: VertexId) -> Option<Vec<VertexId>> {
        self.distance(source, dest)?;

        let mut route = vec![dest];
        let mut current = dest;
        while current != source {
            current = self.cell(source, current).predecessor?;
            route.push(current);
        }
        route.reverse();
        Some(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn costs(size: usize, edges: &[(VertexId, VertexId, Cost)]) -> CostMatrix {
        let mut m = CostMatrix::new(size);
        for &(s, d, c) in edges {
            m.set(s, d, Some(c));
        }
        m
    }

    #[test]
    fn test_prefers_cheaper_two_hop_route() {
        let t = PathTable::compute(&costs(3, &[(1, 2, 5), (2, 3, 3), (1, 3, 20)]));
        assert_eq!(t.distance(1, 3), Some(8));
        assert_eq!(t.route(1, 3), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_self_distance_zero() {
        let t = PathTable::compute(&costs(3, &[(1, 2, 5)]));
        for v in 1..=3 {
            assert_eq!(t.distance(v, v), Some(0));
            assert_eq!(t.route(v, v), Some(vec![v]));
        }
    }

    #[test]
    fn test_unreachable_stays_infinite() {
        let t = PathTable::compute(&costs(4, &[(1, 2, 1), (3, 4, 1)]));
        assert_eq!(t.distance(1, 3), None);
        assert_eq!(t.route(1, 4), None);
        assert_eq!(t.distance(2, 1), None);
        assert_eq!(t.distance(3, 4), Some(1));
    }

    #[test]
    fn test_tie_keeps_first_found_predecessor() {
        // 1->2->4 and 1->3->4 both cost 2; 2 is settled first.
        let t = PathTable::compute(&costs(4, &[(1, 2, 1), (1, 3, 1), (2, 4, 1), (3, 4, 1)]));
        assert_eq!(t.distance(1, 4), Some(2));
        assert_eq!(t.route(1, 4), Some(vec![1, 2, 4]));
    }

    #[test]
    fn test_near_maximal_costs_do_not_overflow() {
        let big = Cost::MAX - 1;
        let t = PathTable::compute(&costs(3, &[(1, 2, big), (2, 3, big)]));
        assert_eq!(t.distance(1, 2), Some(big));
        assert_eq!(t.distance(1, 3), None);
    }

    #[test]
    fn test_longer_chain_of_relaxations() {
        let t = PathTable::compute(&costs(
            5,
            &[(1, 2, 10), (1, 3, 3), (3, 2, 4), (2, 4, 2), (3, 4, 8), (4, 5, 1)],
        ));
        assert_eq!(t.distance(1, 2), Some(7));
        assert_eq!(t.distance(1, 4), Some(9));
        assert_eq!(t.route(1, 5), Some(vec![1, 3, 2, 4, 5]));
    }
}
