use std::io::{BufRead, Lines};

use graph_paths_core::{
    BuildReport, EdgeRecord, ListGraph, MatrixGraph, WeightedEdgeRecord, MAX_VERTICES,
};
use thiserror::Error;
use tracing::{debug, warn};

/// Input that cannot be read as a graph description.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("line {line}: expected a vertex count, found '{text}'")]
    BadVertexCount { line: usize, text: String },

    #[error("line {line}: expected {expected} integers in an edge record, found '{text}'")]
    MalformedEdge {
        line: usize,
        expected: usize,
        text: String,
    },

    #[error("input ended after {found} of {declared} vertex labels")]
    MissingLabels { declared: usize, found: usize },

    #[error("input ended before the edge list terminator (a record starting with 0)")]
    MissingTerminator,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A graph model the loader can populate from text.
pub trait GraphModel: Sized {
    type Record;

    /// Integers per edge record: `source dest` or `source dest cost`.
    const FIELDS: usize;

    fn record(fields: &[i64]) -> Self::Record;

    fn build(labels: Vec<String>, records: Vec<Self::Record>) -> (Self, BuildReport);

    fn edge_count(&self) -> usize;
}

impl GraphModel for ListGraph {
    type Record = EdgeRecord;
    const FIELDS: usize = 2;

    fn record(fields: &[i64]) -> EdgeRecord {
        EdgeRecord {
            source: fields[0],
            dest: fields[1],
        }
    }

    fn build(labels: Vec<String>, records: Vec<EdgeRecord>) -> (Self, BuildReport) {
        ListGraph::build(labels, records)
    }

    fn edge_count(&self) -> usize {
        ListGraph::edge_count(self)
    }
}

impl GraphModel for MatrixGraph {
    type Record = WeightedEdgeRecord;
    const FIELDS: usize = 3;

    fn record(fields: &[i64]) -> WeightedEdgeRecord {
        WeightedEdgeRecord {
            source: fields[0],
            dest: fields[1],
            cost: fields[2],
        }
    }

    fn build(labels: Vec<String>, records: Vec<WeightedEdgeRecord>) -> (Self, BuildReport) {
        MatrixGraph::build(labels, records)
    }

    fn edge_count(&self) -> usize {
        MatrixGraph::edge_count(self)
    }
}

/// A graph built from one description in the input.
#[derive(Debug)]
pub struct Loaded<G> {
    pub graph: G,
    pub report: BuildReport,
    /// Line holding the vertex count.
    pub line: usize,
}

/// Reads graph descriptions back to back:
///
/// ```text
/// 3                 vertex count, 1..=100
/// Aurora and 85th   one label per line
/// Green Lake Starbucks
/// Woodland Park Zoo
/// 1 2 50            edge records, one per line
/// 2 3 20
/// 0 0 0             terminator: source 0
/// ```
///
/// Blank lines between records and between graphs are ignored.
pub struct GraphReader<R> {
    lines: Lines<R>,
    line: usize,
}

impl<R: BufRead> GraphReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }

    fn next_line(&mut self) -> Result<Option<String>, LoadError> {
        match self.lines.next() {
            Some(line) => {
                self.line += 1;
                Ok(Some(line?))
            }
            None => Ok(None),
        }
    }

    fn next_non_blank(&mut self) -> Result<Option<String>, LoadError> {
        while let Some(text) = self.next_line()? {
            if !text.trim().is_empty() {
                return Ok(Some(text));
            }
        }
        Ok(None)
    }

    /// Read the next graph, or `None` at end of input.
    ///
    /// Rejected edges are logged and skipped. A vertex count outside
    /// 1..=MAX_VERTICES yields an empty graph whose report is `skipped`;
    /// its remaining lines up to the terminator are discarded.
    pub fn next_graph<G: GraphModel>(&mut self) -> Result<Option<Loaded<G>>, LoadError> {
        let Some(count_text) = self.next_non_blank()? else {
            return Ok(None);
        };
        let start = self.line;
        let declared: i64 = count_text
            .split_whitespace()
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| LoadError::BadVertexCount {
                line: start,
                text: count_text.clone(),
            })?;

        let mut labels = Vec::new();
        let mut records = Vec::new();
        match usize::try_from(declared) {
            Ok(count) if (1..=MAX_VERTICES).contains(&count) => {
                for found in 0..count {
                    let label = self.next_line()?.ok_or(LoadError::MissingLabels {
                        declared: count,
                        found,
                    })?;
                    labels.push(label);
                }
                records = self.read_edges::<G>()?;
            }
            _ => {
                warn!(
                    line = start,
                    declared,
                    "vertex count outside 1..={}; graph left empty",
                    MAX_VERTICES
                );
                self.skip_to_terminator()?;
            }
        }

        let (graph, report) = G::build(labels, records);
        for rejected in &report.rejected {
            match rejected.cost {
                Some(cost) => warn!(
                    source = rejected.source,
                    dest = rejected.dest,
                    cost,
                    "could not insert edge: {}",
                    rejected.error
                ),
                None => warn!(
                    source = rejected.source,
                    dest = rejected.dest,
                    "could not insert edge: {}",
                    rejected.error
                ),
            }
        }
        debug!(
            line = start,
            edges = graph.edge_count(),
            inserted = report.inserted,
            rejected = report.rejected.len(),
            "graph loaded"
        );

        Ok(Some(Loaded {
            graph,
            report,
            line: start,
        }))
    }

    /// Edge records up to, not including, the terminator.
    fn read_edges<G: GraphModel>(&mut self) -> Result<Vec<G::Record>, LoadError> {
        let mut records = Vec::new();
        loop {
            let text = self
                .next_non_blank()?
                .ok_or(LoadError::MissingTerminator)?;
            let malformed = || LoadError::MalformedEdge {
                line: self.line,
                expected: G::FIELDS,
                text: text.clone(),
            };

            let fields: Vec<i64> = text
                .split_whitespace()
                .map(str::parse::<i64>)
                .collect::<Result<_, _>>()
                .map_err(|_| malformed())?;

            // Anything after a leading 0 belongs to the terminator.
            if fields.first() == Some(&0) {
                return Ok(records);
            }
            if fields.len() != G::FIELDS {
                return Err(malformed());
            }
            records.push(G::record(&fields));
        }
    }

    fn skip_to_terminator(&mut self) -> Result<(), LoadError> {
        while let Some(text) = self.next_non_blank()? {
            let mut tokens = text.split_whitespace();
            if tokens.next().and_then(|t| t.parse::<i64>().ok()) == Some(0) {
                return Ok(());
            }
        }
        Err(LoadError::MissingTerminator)
    }
}
