use graph_paths_core::{Cost, ListGraph, MatrixGraph, VertexId};
use proptest::prelude::*;

fn labels(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("v{}", i)).collect()
}

/// Cheapest simple path by exhaustive enumeration.
fn brute_force_distance(g: &MatrixGraph, source: VertexId, dest: VertexId) -> Option<Cost> {
    fn walk(
        g: &MatrixGraph,
        at: VertexId,
        dest: VertexId,
        so_far: Cost,
        on_path: &mut Vec<bool>,
        best: &mut Option<Cost>,
    ) {
        if at == dest {
            if best.map_or(true, |b| so_far < b) {
                *best = Some(so_far);
            }
            return;
        }
        for next in 1..=g.vertex_count() {
            if on_path[next] {
                continue;
            }
            if let Some(c) = g.edge_cost(at, next) {
                on_path[next] = true;
                walk(g, next, dest, so_far + c, on_path, best);
                on_path[next] = false;
            }
        }
    }

    let mut on_path = vec![false; g.vertex_count() + 1];
    on_path[source] = true;
    let mut best = None;
    walk(g, source, dest, 0, &mut on_path, &mut best);
    best
}

fn weighted_graph() -> impl Strategy<Value = MatrixGraph> {
    (2usize..=6).prop_flat_map(|n| {
        proptest::collection::vec((1..=n, 1..=n, 1i64..20), 0..16).prop_map(move |edges| {
            let mut g = MatrixGraph::with_vertices(labels(n)).unwrap();
            for (s, d, c) in edges {
                // Self-loops are refused; that is fine here.
                let _ = g.insert_edge(s, d, c);
            }
            g
        })
    })
}

fn list_graph() -> impl Strategy<Value = ListGraph> {
    (1usize..=12).prop_flat_map(|n| {
        proptest::collection::vec((1..=n, 1..=n), 0..30).prop_map(move |edges| {
            let mut g = ListGraph::with_vertices(labels(n)).unwrap();
            for (s, d) in edges {
                let _ = g.insert_edge(s, d);
            }
            g
        })
    })
}

proptest! {
    #[test]
    fn test_dijkstra_matches_brute_force(mut g in weighted_graph()) {
        let n = g.vertex_count();
        for s in 1..=n {
            for d in 1..=n {
                let expected = brute_force_distance(&g, s, d);
                prop_assert_eq!(g.distance(s, d).unwrap(), expected);

                match g.report(s, d).unwrap() {
                    Some(path) => {
                        let vs: Vec<VertexId> = path.vertices().collect();
                        prop_assert_eq!(vs.first().copied(), Some(s));
                        prop_assert_eq!(vs.last().copied(), Some(d));
                        let total: Cost = vs
                            .windows(2)
                            .map(|w| g.edge_cost(w[0], w[1]).unwrap())
                            .sum();
                        prop_assert_eq!(Some(total), expected);
                        prop_assert_eq!(path.distance, total);
                    }
                    None => prop_assert_eq!(expected, None),
                }
            }
        }
    }

    #[test]
    fn test_removing_edge_is_reflected(mut g in weighted_graph(), s in 1usize..=6, d in 1usize..=6) {
        let n = g.vertex_count();
        prop_assume!(s <= n && d <= n && s != d);
        g.find_shortest_path();
        g.remove_edge(s, d).unwrap();
        prop_assert_eq!(g.edge_cost(s, d), None);
        prop_assert!(!g.paths_current());
        let expected = brute_force_distance(&g, s, d);
        prop_assert_eq!(g.distance(s, d).unwrap(), expected);
    }

    #[test]
    fn test_dfs_visits_every_vertex_once(g in list_graph()) {
        let mut order = g.depth_first_search();
        prop_assert_eq!(order.len(), g.vertex_count());
        prop_assert_eq!(order.first().copied(), Some(1));
        order.sort_unstable();
        let all: Vec<VertexId> = (1..=g.vertex_count()).collect();
        prop_assert_eq!(order, all);
    }
}
