//! Group-level and per-node link statistics of one adjacency matrix.
//!
//! Notation follows the report columns:
//!
//! - `V_n_plus`: number of directed links
//! - `V_vz_plus`: number of mutually linked node pairs
//! - `S_group`: share of mutual pairs among all links, in percent
//! - `Э_group`: average number of outgoing links per node
//! - `BB_group`: mutual pairs relative to all possible pairs, in percent
//! - `C_plus` / `Э_plus`: in-degree / out-degree normalized by `N - 1`
//! - `КУО`: control coefficient, in-degree over out-degree

use std::fmt;

use sociogram_error::{Error, Result};
use tracing::debug;

use crate::matrix::{AdjacencyMatrix, NodeId};

const GROUP_DECIMALS: usize = 2;
const NODE_DECIMALS: usize = 3;

/// Round half to even at `decimals` places, on the exact binary value.
///
/// Formatting with a fixed precision rounds the exact value of the float, so
/// `2.675` (stored just below) rounds down and `0.125` (stored exactly) goes
/// to the even neighbour.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

/// Control coefficient of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlRatio {
    /// Rounded `in_degree / out_degree`.
    Finite(f64),
    /// The node has no outgoing links.
    Unbounded,
}

impl ControlRatio {
    pub fn from_degrees(in_degree: usize, out_degree: usize) -> Self {
        if out_degree == 0 {
            ControlRatio::Unbounded
        } else {
            ControlRatio::Finite(round_to(
                in_degree as f64 / out_degree as f64,
                NODE_DECIMALS,
            ))
        }
    }

    pub fn as_finite(&self) -> Option<f64> {
        match self {
            ControlRatio::Finite(value) => Some(*value),
            ControlRatio::Unbounded => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, ControlRatio::Unbounded)
    }
}

impl fmt::Display for ControlRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlRatio::Finite(value) => write!(f, "{}", value),
            ControlRatio::Unbounded => write!(f, "inf"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupStatistics {
    /// `V_n_plus`
    pub link_count: usize,
    /// `V_vz_plus`
    pub mutual_pairs: usize,
    /// `S_group`
    pub s_group: f64,
    /// `Э_group`
    pub e_group: f64,
    /// `BB_group`
    pub bb_group: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStatistics {
    pub node: NodeId,
    pub in_degree: usize,
    pub out_degree: usize,
    /// `C_plus`
    pub c_plus: f64,
    /// `Э_plus`
    pub e_plus: f64,
    /// `КУО`
    pub kuo: ControlRatio,
}

/// Statistics for one worksheet; `nodes` is ordered by ascending id.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetStatistics {
    pub group: GroupStatistics,
    pub nodes: Vec<NodeStatistics>,
}

impl SheetStatistics {
    pub fn node(&self, id: NodeId) -> Option<&NodeStatistics> {
        self.nodes.get(id.index()).filter(|stat| stat.node == id)
    }
}

/// Total number of directed links (`V_n_plus`).
pub fn count_links(matrix: &AdjacencyMatrix) -> usize {
    matrix.node_ids().map(|node| matrix.row_sum(node)).sum()
}

/// Number of unordered node pairs linked in both directions (`V_vz_plus`).
///
/// Every ordered hit `(i, j)` with a matching `(j, i)` is counted and the
/// total halved, so a self-loop adds half a pair and is truncated away unless
/// another one pairs with it.
pub fn count_mutual_pairs(matrix: &AdjacencyMatrix) -> usize {
    let mut hits = 0usize;
    for from in matrix.node_ids() {
        for to in matrix.node_ids() {
            if matrix.has_link(from, to) && matrix.has_link(to, from) {
                hits += 1;
            }
        }
    }
    hits / 2
}

/// Compute every group and node statistic for `matrix`.
///
/// Fails with `InvalidMatrix` for fewer than two nodes and with `EmptyGraph`
/// when the matrix holds no link at all.
pub fn compute_statistics(matrix: &AdjacencyMatrix) -> Result<SheetStatistics> {
    let n = matrix.size();
    if n < 2 {
        return Err(Error::invalid_matrix(format!(
            "statistics need at least 2 nodes, got {}",
            n
        ))
        .with_operation("stats::compute_statistics")
        .with_context("nodes", n.to_string()));
    }

    let link_count = count_links(matrix);
    if link_count == 0 {
        return Err(Error::empty_graph(n).with_operation("stats::compute_statistics"));
    }
    let mutual_pairs = count_mutual_pairs(matrix);

    let nf = n as f64;
    let group = GroupStatistics {
        link_count,
        mutual_pairs,
        s_group: round_to(mutual_pairs as f64 / link_count as f64, GROUP_DECIMALS) * 100.0,
        e_group: round_to(link_count as f64 / nf, GROUP_DECIMALS),
        bb_group: round_to(
            (100.0 * mutual_pairs as f64) / (0.5 * nf * (nf - 1.0)),
            GROUP_DECIMALS,
        ),
    };
    debug!(
        nodes = n,
        link_count,
        mutual_pairs,
        s_group = group.s_group,
        e_group = group.e_group,
        bb_group = group.bb_group,
        "group statistics"
    );

    let peers = (n - 1) as f64;
    let nodes = matrix
        .node_ids()
        .map(|node| {
            let in_degree = matrix.col_sum(node);
            let out_degree = matrix.row_sum(node);
            NodeStatistics {
                node,
                in_degree,
                out_degree,
                c_plus: round_to(in_degree as f64 / peers, NODE_DECIMALS),
                e_plus: round_to(out_degree as f64 / peers, NODE_DECIMALS),
                kuo: ControlRatio::from_degrees(in_degree, out_degree),
            }
        })
        .collect();

    Ok(SheetStatistics { group, nodes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sociogram_error::ErrorKind;

    fn matrix(rows: &[&[u8]]) -> AdjacencyMatrix {
        AdjacencyMatrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    fn node(id: u32) -> NodeId {
        NodeId::new(id).unwrap()
    }

    #[test]
    fn rounding_is_half_even_on_exact_value() {
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(2.675, 2), 2.67);
        assert_eq!(round_to(1.0 / 3.0, 3), 0.333);
        assert_eq!(round_to(2.0 / 3.0, 3), 0.667);
        assert_eq!(round_to(4.0, 2), 4.0);
    }

    #[test]
    fn directed_three_cycle() {
        let m = matrix(&[&[0, 1, 0], &[0, 0, 1], &[1, 0, 0]]);
        let stats = compute_statistics(&m).unwrap();

        assert_eq!(
            stats.group,
            GroupStatistics {
                link_count: 3,
                mutual_pairs: 0,
                s_group: 0.0,
                e_group: 1.0,
                bb_group: 0.0,
            }
        );
        for stat in &stats.nodes {
            assert_eq!(stat.c_plus, 0.5);
            assert_eq!(stat.e_plus, 0.5);
            assert_eq!(stat.kuo, ControlRatio::Finite(1.0));
        }
    }

    #[test]
    fn one_mutual_pair_in_three_nodes() {
        // 1 <-> 2, 2 -> 3, 3 -> 1
        let m = matrix(&[&[0, 1, 0], &[1, 0, 1], &[1, 0, 0]]);
        assert_eq!(count_mutual_pairs(&m), 1);

        let stats = compute_statistics(&m).unwrap();
        assert_eq!(stats.group.link_count, 4);
        assert_eq!(stats.group.mutual_pairs, 1);
        // round(1/4, 2) * 100
        assert_eq!(stats.group.s_group, 25.0);
        // round(4/3, 2)
        assert_eq!(stats.group.e_group, 1.33);
        // round(100 / 3, 2)
        assert_eq!(stats.group.bb_group, 33.33);

        let first = stats.node(node(1)).unwrap();
        assert_eq!((first.in_degree, first.out_degree), (2, 1));
        assert_eq!(first.c_plus, 1.0);
        assert_eq!(first.e_plus, 0.5);
        assert_eq!(first.kuo, ControlRatio::Finite(2.0));

        let second = stats.node(node(2)).unwrap();
        assert_eq!(second.kuo, ControlRatio::Finite(0.5));
    }

    #[test]
    fn percentage_is_scaled_after_rounding() {
        // 2 mutual pairs out of 7 links: round(2/7, 2) = 0.29, then * 100.
        let m = matrix(&[
            &[0, 1, 1, 1],
            &[1, 0, 1, 0],
            &[1, 0, 0, 1],
            &[0, 0, 0, 0],
        ]);
        let stats = compute_statistics(&m).unwrap();
        assert_eq!(stats.group.link_count, 7);
        assert_eq!(stats.group.mutual_pairs, 2);
        assert_eq!(stats.group.s_group, 0.29 * 100.0);
        assert_ne!(stats.group.s_group, 29.0);
    }

    #[test]
    fn sink_node_has_unbounded_control_ratio() {
        let m = matrix(&[&[0, 1], &[0, 0]]);
        let stats = compute_statistics(&m).unwrap();

        let sink = stats.node(node(2)).unwrap();
        assert_eq!(sink.out_degree, 0);
        assert!(sink.kuo.is_unbounded());
        assert_eq!(sink.kuo.as_finite(), None);
        assert_eq!(sink.kuo.to_string(), "inf");

        let source = stats.node(node(1)).unwrap();
        assert_eq!(source.kuo, ControlRatio::Finite(0.0));
    }

    #[test]
    fn control_ratio_is_unbounded_exactly_for_zero_out_degree() {
        let m = matrix(&[
            &[0, 1, 1, 0],
            &[0, 0, 0, 0],
            &[1, 1, 0, 0],
            &[0, 0, 0, 0],
        ]);
        let stats = compute_statistics(&m).unwrap();
        for stat in &stats.nodes {
            assert_eq!(stat.kuo.is_unbounded(), stat.out_degree == 0, "node {}", stat.node);
        }
    }

    #[test]
    fn empty_graph_is_a_distinct_error() {
        let m = matrix(&[&[0, 0, 0], &[0, 0, 0], &[0, 0, 0]]);
        let err = compute_statistics(&m).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyGraph);
        assert_eq!(err.context_value("nodes"), Some("3"));
    }

    #[test]
    fn single_node_is_rejected() {
        let m = matrix(&[&[1]]);
        let err = compute_statistics(&m).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidMatrix);
    }

    #[test]
    fn self_loop_alone_is_not_a_mutual_pair() {
        let m = matrix(&[&[1, 1], &[0, 0]]);
        assert_eq!(count_links(&m), 2);
        assert_eq!(count_mutual_pairs(&m), 0);

        let m = matrix(&[&[1, 0], &[0, 1]]);
        assert_eq!(count_mutual_pairs(&m), 1);
    }

    #[test]
    fn statistics_are_deterministic() {
        let m = matrix(&[
            &[0, 1, 1, 0, 1],
            &[1, 0, 0, 1, 0],
            &[0, 1, 0, 1, 1],
            &[1, 1, 0, 0, 0],
            &[0, 0, 1, 1, 0],
        ]);
        let a = compute_statistics(&m).unwrap();
        let b = compute_statistics(&m).unwrap();
        assert_eq!(a, b);
        for (x, y) in a.nodes.iter().zip(&b.nodes) {
            assert_eq!(x.c_plus.to_bits(), y.c_plus.to_bits());
            assert_eq!(x.e_plus.to_bits(), y.e_plus.to_bits());
        }
    }
}
