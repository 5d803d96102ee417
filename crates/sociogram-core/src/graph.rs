use crate::matrix::{AdjacencyMatrix, NodeId};

/// A directed link `from -> to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
}

/// Directed graph view of an adjacency matrix.
///
/// Nodes are `1..=N` in ascending order, isolated nodes included. Edges are
/// stored in row-major order (by source, then by target), so iteration order
/// only depends on the matrix contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectedGraph {
    nodes: Vec<NodeId>,
    edges: Vec<Edge>,
    in_degree: Vec<usize>,
    out_degree: Vec<usize>,
}

impl DirectedGraph {
    pub fn from_matrix(matrix: &AdjacencyMatrix) -> Self {
        let n = matrix.size();
        let nodes: Vec<NodeId> = matrix.node_ids().collect();
        let mut edges = Vec::new();
        let mut in_degree = vec![0; n];
        let mut out_degree = vec![0; n];

        for &from in &nodes {
            for &to in &nodes {
                if matrix.has_link(from, to) {
                    edges.push(Edge { from, to });
                    out_degree[from.index()] += 1;
                    in_degree[to.index()] += 1;
                }
            }
        }

        Self {
            nodes,
            edges,
            in_degree,
            out_degree,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.nodes.len()
    }

    /// Number of incoming links; 0 for ids outside the graph.
    pub fn in_degree(&self, node: NodeId) -> usize {
        self.in_degree.get(node.index()).copied().unwrap_or(0)
    }

    /// Number of outgoing links; 0 for ids outside the graph.
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.out_degree.get(node.index()).copied().unwrap_or(0)
    }

    /// `(node, in_degree)` for every node, in ascending id order.
    pub fn in_degrees(&self) -> impl Iterator<Item = (NodeId, usize)> + '_ {
        self.nodes
            .iter()
            .map(|&node| (node, self.in_degree[node.index()]))
    }

    /// Targets of links leaving `node`, ascending.
    pub fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.edges
            .iter()
            .filter(move |edge| edge.from == node)
            .map(|edge| edge.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn node(id: u32) -> NodeId {
        NodeId::new(id).unwrap()
    }

    fn edge(from: u32, to: u32) -> Edge {
        Edge {
            from: node(from),
            to: node(to),
        }
    }

    #[test]
    fn edges_follow_matrix_in_row_major_order() {
        let m = AdjacencyMatrix::from_rows(vec![
            vec![0, 0, 1],
            vec![1, 0, 1],
            vec![0, 1, 0],
        ])
        .unwrap();
        let g = DirectedGraph::from_matrix(&m);

        assert_eq!(g.nodes(), &[node(1), node(2), node(3)]);
        assert_eq!(
            g.edges(),
            &[edge(1, 3), edge(2, 1), edge(2, 3), edge(3, 2)]
        );
        assert_eq!(g.in_degree(node(3)), 2);
        assert_eq!(g.out_degree(node(2)), 2);
        assert_eq!(g.successors(node(2)).collect::<Vec<_>>(), vec![node(1), node(3)]);
    }

    #[test]
    fn isolated_nodes_and_self_loops_are_kept() {
        let m = AdjacencyMatrix::from_rows(vec![
            vec![1, 0, 0],
            vec![0, 0, 0],
            vec![0, 0, 0],
        ])
        .unwrap();
        let g = DirectedGraph::from_matrix(&m);

        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edges(), &[edge(1, 1)]);
        assert_eq!(g.in_degree(node(1)), 1);
        assert_eq!(g.out_degree(node(1)), 1);
        assert!(g.contains(node(2)));
        assert!(!g.contains(node(4)));
        assert_eq!(g.in_degree(node(4)), 0);
    }

    #[test]
    fn degrees_agree_with_matrix_sums() {
        let m = AdjacencyMatrix::from_rows(vec![
            vec![0, 1, 1, 0],
            vec![1, 0, 0, 0],
            vec![1, 1, 0, 1],
            vec![0, 0, 1, 0],
        ])
        .unwrap();
        let g = DirectedGraph::from_matrix(&m);
        for id in m.node_ids() {
            assert_eq!(g.in_degree(id), m.col_sum(id));
            assert_eq!(g.out_degree(id), m.row_sum(id));
        }
        assert_eq!(g.edge_count(), 7);
    }
}
