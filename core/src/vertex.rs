use crate::error::GraphError;

/// 1-based vertex index. Index 0 is reserved and never addresses a vertex.
pub type VertexId = usize;

/// Integer edge cost. Distances use the same type; "infinite" is `None`.
pub type Cost = i64;

/// Upper bound on the number of vertices a graph may declare.
pub const MAX_VERTICES: usize = 100;

/// An unweighted edge as read from build input, before validation.
///
/// Fields are signed because input may carry negative or zero indices;
/// a record whose `source` is 0 terminates the edge list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRecord {
    pub source: i64,
    pub dest: i64,
}

/// A weighted edge as read from build input, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedEdgeRecord {
    pub source: i64,
    pub dest: i64,
    pub cost: Cost,
}

impl EdgeRecord {
    pub fn is_terminator(&self) -> bool {
        self.source == 0
    }
}

impl WeightedEdgeRecord {
    pub fn is_terminator(&self) -> bool {
        self.source == 0
    }
}

/// An edge record the build step refused, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEdge {
    pub source: i64,
    pub dest: i64,
    /// `None` for unweighted (adjacency-list) records.
    pub cost: Option<Cost>,
    pub error: GraphError,
}

/// Outcome of a bulk build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// True when the vertex count was outside 1..=MAX_VERTICES and nothing was populated.
    pub skipped: bool,
    pub inserted: usize,
    pub rejected: Vec<RejectedEdge>,
}

/// Vertex labels for indices 1..=len, fixed once the graph is built.
#[derive(Debug, Clone, Default)]
pub(crate) struct Vertices {
    labels: Vec<String>,
}

impl Vertices {
    /// Returns `None` when the label count is outside 1..=MAX_VERTICES.
    pub(crate) fn from_labels<I, S>(labels: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() || labels.len() > MAX_VERTICES {
            return None;
        }
        Some(Self { labels })
    }

    pub(crate) fn len(&self) -> usize {
        self.labels.len()
    }

    pub(crate) fn label(&self, v: VertexId) -> Option<&str> {
        v.checked_sub(1)
            .and_then(|i| self.labels.get(i))
            .map(String::as_str)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (VertexId, &str)> {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, label)| (i + 1, label.as_str()))
    }

    /// Validate a raw index against 1..=len.
    pub(crate) fn check_vertex(&self, raw: i64) -> Result<VertexId, GraphError> {
        match usize::try_from(raw) {
            Ok(v) if v >= 1 && v <= self.len() => Ok(v),
            _ => Err(GraphError::VertexOutOfRange {
                vertex: raw,
                size: self.len(),
            }),
        }
    }

    /// Validate both endpoints of an edge: range first (source, then dest),
    /// then the self-loop rule.
    pub(crate) fn check_edge(
        &self,
        source: i64,
        dest: i64,
    ) -> Result<(VertexId, VertexId), GraphError> {
        let s = self.check_vertex(source)?;
        let d = self.check_vertex(dest)?;
        if s == d {
            return Err(GraphError::SelfLoop { vertex: s });
        }
        Ok((s, d))
    }
}

/// Widen a caller-supplied index for validation. Values that do not fit are
/// necessarily out of range, so saturating keeps them rejected.
pub(crate) fn raw_index(v: VertexId) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Vertices {
        Vertices::from_labels(["A", "B", "C"]).unwrap()
    }

    #[test]
    fn test_from_labels_bounds() {
        assert!(Vertices::from_labels(Vec::<String>::new()).is_none());
        assert!(Vertices::from_labels((0..MAX_VERTICES).map(|i| i.to_string())).is_some());
        assert!(Vertices::from_labels((0..=MAX_VERTICES).map(|i| i.to_string())).is_none());
    }

    #[test]
    fn test_labels_are_one_based() {
        let v = abc();
        assert_eq!(v.label(0), None);
        assert_eq!(v.label(1), Some("A"));
        assert_eq!(v.label(3), Some("C"));
        assert_eq!(v.label(4), None);
        assert_eq!(v.iter().map(|(i, _)| i).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_check_vertex_range() {
        let v = abc();
        assert_eq!(v.check_vertex(1), Ok(1));
        assert_eq!(v.check_vertex(3), Ok(3));
        for bad in [0, -1, 4, i64::MAX] {
            assert_eq!(
                v.check_vertex(bad),
                Err(GraphError::VertexOutOfRange { vertex: bad, size: 3 })
            );
        }
    }

    #[test]
    fn test_check_edge_order_of_checks() {
        let v = abc();
        assert_eq!(v.check_edge(1, 2), Ok((1, 2)));
        assert_eq!(v.check_edge(2, 2), Err(GraphError::SelfLoop { vertex: 2 }));
        // Range is reported before the self-loop rule.
        assert_eq!(
            v.check_edge(9, 9),
            Err(GraphError::VertexOutOfRange { vertex: 9, size: 3 })
        );
        assert_eq!(
            v.check_edge(1, 0),
            Err(GraphError::VertexOutOfRange { vertex: 0, size: 3 })
        );
    }
}
