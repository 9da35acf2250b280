//! Read-only bipartite Tanner graph view over qubit and check vertices.

use petgraph::graph::{NodeIndex, UnGraph};

/// What a Tanner vertex represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexKind {
    Qubit,
    Check,
}

/// Adjacency and handle-resolution queries the decoder core needs from a Tanner
/// graph. The core depends only on this trait, never on `petgraph` directly.
pub trait TannerView {
    /// Number of qubit (data) vertices. Qubit ids occupy `[0, n())`.
    fn n(&self) -> usize;
    /// Number of check vertices. Check ids occupy `[n(), n() + m())`.
    fn m(&self) -> usize;
    /// Total vertex count, `n() + m()`.
    fn vertex_count(&self) -> usize {
        self.n() + self.m()
    }
    /// Whether `id` names a check vertex.
    fn is_check(&self, id: usize) -> bool {
        id >= self.n()
    }
    /// Neighbor ids of `id` in the bipartite graph.
    fn neighbors(&self, id: usize) -> Vec<usize>;
    /// Resolves a vertex id to its persistent cluster-node handle. For this
    /// crate's arena-indexed cluster nodes the handle is the vertex id itself.
    fn node_of(&self, id: usize) -> usize {
        id
    }
}

/// Concrete Tanner graph built from a GF(2) parity-check matrix `H` (`m` rows,
/// `n` columns). Row `i` of `H` is the check vertex `n + i`; column `j` is
/// qubit vertex `j`. `H[i][j]` set means an edge between them.
pub struct TannerGraph {
    n: usize,
    m: usize,
    graph: UnGraph<VertexKind, ()>,
}

impl TannerGraph {
    pub fn from_parity_check(h: &[Vec<bool>]) -> Self {
        let m = h.len();
        let n = h.first().map_or(0, |row| row.len());
        let mut graph = UnGraph::<VertexKind, ()>::with_capacity(n + m, 0);
        for _ in 0..n {
            graph.add_node(VertexKind::Qubit);
        }
        for _ in 0..m {
            graph.add_node(VertexKind::Check);
        }
        for (i, row) in h.iter().enumerate() {
            for (j, &bit) in row.iter().enumerate() {
                if bit {
                    graph.add_edge(NodeIndex::new(j), NodeIndex::new(n + i), ());
                }
            }
        }
        Self { n, m, graph }
    }
}

impl TannerView for TannerGraph {
    fn n(&self) -> usize {
        self.n
    }

    fn m(&self) -> usize {
        self.m
    }

    fn neighbors(&self, id: usize) -> Vec<usize> {
        self.graph
            .neighbors(NodeIndex::new(id))
            .map(|idx| idx.index())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hamming_h() -> Vec<Vec<bool>> {
        // classical [7,4,3] Hamming parity-check matrix
        vec![
            vec![false, false, false, true, true, true, true],
            vec![false, true, true, false, false, true, true],
            vec![true, false, true, false, true, false, true],
        ]
    }

    #[test]
    fn bipartite_neighbor_counts() {
        let h = hamming_h();
        let g = TannerGraph::from_parity_check(&h);
        assert_eq!(g.n(), 7);
        assert_eq!(g.m(), 3);
        // qubit 6 (all-ones column) touches all 3 checks
        assert_eq!(g.neighbors(6).len(), 3);
        // check 0 (row weight 4) touches 4 qubits
        assert_eq!(g.neighbors(g.n()).len(), 4);
        assert!(g.is_check(g.n()));
        assert!(!g.is_check(0));
    }

    #[test]
    fn neighbors_are_symmetric() {
        let h = hamming_h();
        let g = TannerGraph::from_parity_check(&h);
        for q in 0..g.n() {
            for &c in &g.neighbors(q) {
                assert!(g.neighbors(c).contains(&q));
            }
        }
    }
}
