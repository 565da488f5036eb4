//! graph-paths-core: bounded in-memory graph engine.
//!
//! Two independent graph models over at most [`MAX_VERTICES`] labelled
//! vertices, addressed by 1-based index:
//!
//! - [`ListGraph`]: directed adjacency lists with depth-first traversal.
//! - [`MatrixGraph`]: directed, positively weighted adjacency matrix with
//!   all-pairs shortest paths (Dijkstra per source) and path reconstruction.
//!
//! No I/O happens here. Parsing build input and formatting reports belong to
//! the caller; bad edges come back as [`GraphError`] values so a build can
//! keep going.

mod dijkstra;
mod error;
mod list;
mod matrix;
mod vertex;

pub use error::GraphError;
pub use list::ListGraph;
pub use matrix::{MatrixGraph, PairReport, PathStep, ShortestPath, SourceReport};
pub use vertex::{
    BuildReport, Cost, EdgeRecord, RejectedEdge, VertexId, WeightedEdgeRecord, MAX_VERTICES,
};
