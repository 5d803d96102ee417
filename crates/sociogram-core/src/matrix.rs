use std::fmt;

use sociogram_error::{Error, Result};

/// Identifier of a network member, as printed in the worksheet headers.
///
/// Ids are 1-based; position `i` in every internal array belongs to
/// `NodeId(i + 1)`. Use [`NodeId::from_index`] and [`NodeId::index`] to cross
/// between the two so the offset lives in exactly one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl NodeId {
    /// Returns `None` for 0, which is not a valid label.
    pub fn new(id: u32) -> Option<Self> {
        (id > 0).then_some(Self(id))
    }

    pub fn from_index(index: usize) -> Self {
        Self(index as u32 + 1)
    }

    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// Square 0/1 matrix; entry `(i, j) == 1` is a directed link `i -> j`.
///
/// Self-loops are kept as ordinary links. The matrix is validated once on
/// construction and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    size: usize,
    cells: Vec<u8>,
}

impl AdjacencyMatrix {
    /// Build a matrix from rows of 0/1 values.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(Error::invalid_matrix("matrix has no rows")
                .with_operation("matrix::from_rows"));
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(Error::invalid_matrix(format!(
                    "matrix is not square: row {} has {} columns, expected {}",
                    NodeId::from_index(row_idx),
                    row.len(),
                    size
                ))
                .with_operation("matrix::from_rows")
                .with_context("row", NodeId::from_index(row_idx).to_string()));
            }
            for (col_idx, value) in row.iter().enumerate() {
                if *value > 1 {
                    return Err(Error::invalid_matrix(format!(
                        "value {} is neither 0 nor 1",
                        value
                    ))
                    .with_operation("matrix::from_rows")
                    .with_context("row", NodeId::from_index(row_idx).to_string())
                    .with_context("column", NodeId::from_index(col_idx).to_string()));
                }
            }
            cells.extend(row);
        }

        Ok(Self { size, cells })
    }

    /// Number of nodes (rows = columns).
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.size).map(NodeId::from_index)
    }

    /// Whether `from -> to` is a link. Ids outside the matrix are never linked.
    pub fn has_link(&self, from: NodeId, to: NodeId) -> bool {
        let (row, col) = (from.index(), to.index());
        row < self.size && col < self.size && self.cells[row * self.size + col] == 1
    }

    /// The row for `node` as raw 0/1 values.
    pub fn row(&self, node: NodeId) -> &[u8] {
        let start = node.index() * self.size;
        &self.cells[start..start + self.size]
    }

    /// Out-degree of `node`.
    pub fn row_sum(&self, node: NodeId) -> usize {
        self.row(node).iter().map(|&v| v as usize).sum()
    }

    /// In-degree of `node`.
    pub fn col_sum(&self, node: NodeId) -> usize {
        let col = node.index();
        (0..self.size)
            .map(|row| self.cells[row * self.size + col] as usize)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sociogram_error::ErrorKind;

    fn node(id: u32) -> NodeId {
        NodeId::new(id).unwrap()
    }

    #[test]
    fn node_id_maps_to_zero_based_index() {
        assert_eq!(NodeId::from_index(0), node(1));
        assert_eq!(node(7).index(), 6);
        assert_eq!(NodeId::new(0), None);
    }

    #[test]
    fn sums_follow_rows_and_columns() {
        let m = AdjacencyMatrix::from_rows(vec![vec![0, 1, 1], vec![0, 0, 1], vec![1, 0, 0]])
            .unwrap();
        assert_eq!(m.size(), 3);
        assert_eq!(m.row_sum(node(1)), 2);
        assert_eq!(m.col_sum(node(3)), 2);
        assert_eq!(m.col_sum(node(1)), 1);
        assert!(m.has_link(node(3), node(1)));
        assert!(!m.has_link(node(1), node(1)));
        assert!(!m.has_link(node(1), node(4)));
    }

    #[test]
    fn self_loops_count_as_links() {
        let m = AdjacencyMatrix::from_rows(vec![vec![1, 0], vec![0, 0]]).unwrap();
        assert_eq!(m.row_sum(node(1)), 1);
        assert_eq!(m.col_sum(node(1)), 1);
    }

    #[test]
    fn rejects_non_square() {
        let err = AdjacencyMatrix::from_rows(vec![vec![0, 1, 0], vec![1, 0]]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidMatrix);
        assert_eq!(err.context_value("row"), Some("1"));
    }

    #[test]
    fn rejects_values_other_than_zero_and_one() {
        let err = AdjacencyMatrix::from_rows(vec![vec![0, 2], vec![1, 0]]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidMatrix);
        assert_eq!(err.context_value("column"), Some("2"));
    }

    #[test]
    fn rejects_empty() {
        let err = AdjacencyMatrix::from_rows(Vec::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidMatrix);
    }
}
