use graph_paths_core::{ListGraph, MatrixGraph, MAX_VERTICES};
use std::time::Instant;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let vertex_count: usize = args
        .get(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(MAX_VERTICES)
        .clamp(1, MAX_VERTICES);
    let rounds: u32 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(1_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: graph-paths-bench [mode] [vertex_count] [rounds]");
        println!();
        println!("Modes:");
        println!("  all       Run every generator (default)");
        println!("  chain     Single path 1 -> 2 -> ... -> n (deepest DFS)");
        println!("  star      Hub with an edge to and from every other vertex");
        println!("  random    Uniform random edges, ~4 per vertex");
        println!("  complete  Every ordered pair connected");
        println!();
        println!("vertex_count is clamped to 1..={}; default rounds: 1000", MAX_VERTICES);
        return;
    }

    println!("graph-paths-bench");
    println!("=================");
    println!();

    let generators: Vec<(&str, fn(usize) -> Vec<(usize, usize, i64)>)> = match mode {
        "chain" => vec![("Chain", gen_chain)],
        "star" => vec![("Star", gen_star)],
        "random" => vec![("Random", gen_random)],
        "complete" => vec![("Complete", gen_complete)],
        "all" => vec![
            ("Chain", gen_chain as fn(usize) -> Vec<(usize, usize, i64)>),
            ("Star", gen_star),
            ("Random", gen_random),
            ("Complete", gen_complete),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator(vertex_count), vertex_count, rounds.max(1));
    }
}

fn run_benchmark(name: &str, edges: Vec<(usize, usize, i64)>, vertex_count: usize, rounds: u32) {
    println!("--- {} ---", name);

    let labels: Vec<String> = (1..=vertex_count).map(|i| format!("v{}", i)).collect();
    let (Some(mut list), Some(mut matrix)) = (
        ListGraph::with_vertices(labels.iter().cloned()),
        MatrixGraph::with_vertices(labels.iter().cloned()),
    ) else {
        eprintln!("vertex count {} out of range", vertex_count);
        return;
    };

    for &(s, d, c) in &edges {
        // Generators never produce self-loops or non-positive costs.
        let _ = list.insert_edge(s, d);
        let _ = matrix.insert_edge(s, d, c);
    }
    println!(
        "{} vertices, {} list edges, {} matrix edges",
        vertex_count,
        list.edge_count(),
        matrix.edge_count()
    );

    let t = Instant::now();
    let mut visited = 0;
    for _ in 0..rounds {
        visited = list.depth_first_search().len();
    }
    let dfs = t.elapsed();

    // Every round invalidates the table so each one pays for a full recompute.
    let (s, d, c) = edges.first().copied().unwrap_or((1, 1, 1));
    let t = Instant::now();
    for _ in 0..rounds {
        let _ = matrix.insert_edge(s, d, c);
        matrix.find_shortest_path();
    }
    let dijkstra = t.elapsed();

    let reports = matrix.report_all();
    let reachable = reports
        .iter()
        .flat_map(|r| &r.destinations)
        .filter(|p| p.path.is_some())
        .count();
    let longest = reports
        .iter()
        .flat_map(|r| &r.destinations)
        .filter_map(|p| p.path.as_ref())
        .map(|p| p.steps.len() - 1)
        .max()
        .unwrap_or(0);

    println!();
    println!("{:>12} {:>10} {:>12}", "operation", "result", "per round");
    println!("{:->12} {:->10} {:->12}", "", "", "");
    println!(
        "{:>12} {:>10} {:>10.1}us",
        "dfs",
        visited,
        dfs.as_secs_f64() * 1e6 / rounds as f64
    );
    println!(
        "{:>12} {:>10} {:>10.1}us",
        "dijkstra",
        reachable,
        dijkstra.as_secs_f64() * 1e6 / rounds as f64
    );
    println!("Reachable ordered pairs: {}, longest path: {} hops", reachable, longest);
    println!();
}

// ---------------------------------------------------------------------------
// Generators: deterministic edge lists of (source, dest, cost), 1-based
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
}

fn gen_chain(n: usize) -> Vec<(usize, usize, i64)> {
    let mut rng = FastRng::new(42);
    (1..n).map(|v| (v, v + 1, 1 + rng.next(9) as i64)).collect()
}

/// Hub 1 with an edge to and from every other vertex. All paths go through it.
fn gen_star(n: usize) -> Vec<(usize, usize, i64)> {
    let mut rng = FastRng::new(12345);
    let mut edges = Vec::with_capacity(2 * n);
    for v in 2..=n {
        edges.push((1, v, 1 + rng.next(20) as i64));
        edges.push((v, 1, 1 + rng.next(20) as i64));
    }
    edges
}

fn gen_random(n: usize) -> Vec<(usize, usize, i64)> {
    let mut rng = FastRng::new(54321);
    let mut edges = Vec::with_capacity(4 * n);
    for _ in 0..4 * n {
        let s = 1 + rng.next(n as u64) as usize;
        let d = 1 + rng.next(n as u64) as usize;
        if s != d {
            edges.push((s, d, 1 + rng.next(100) as i64));
        }
    }
    edges
}

/// Densest input: every ordered pair, so each relaxation pass touches every cell.
fn gen_complete(n: usize) -> Vec<(usize, usize, i64)> {
    let mut rng = FastRng::new(99999);
    let mut edges = Vec::with_capacity(n * n);
    for s in 1..=n {
        for d in 1..=n {
            if s != d {
                edges.push((s, d, 1 + rng.next(50) as i64));
            }
        }
    }
    edges
}
