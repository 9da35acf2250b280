//! Arena-indexed disjoint-set cluster nodes.
//!
//! Every Tanner vertex gets one `ClusterNode`, allocated once per decode and
//! indexed by `vertex_idx`. All cross-references (`parent`, set members) are
//! plain `usize` indices into the arena rather than shared pointers.

use std::collections::BTreeSet;

#[derive(Clone, Debug)]
pub struct ClusterNode {
    pub vertex_idx: usize,
    pub parent: Option<usize>,
    pub cluster_size: usize,
    pub children: BTreeSet<usize>,
    pub is_check: bool,
    pub check_vertices: BTreeSet<usize>,
    pub boundary_vertices: BTreeSet<usize>,
    pub marked: bool,
    pub marked_neighbours: BTreeSet<usize>,
}

impl ClusterNode {
    fn new(vertex_idx: usize, is_check: bool) -> Self {
        Self {
            vertex_idx,
            parent: None,
            cluster_size: 1,
            children: BTreeSet::new(),
            is_check,
            check_vertices: BTreeSet::new(),
            boundary_vertices: BTreeSet::new(),
            marked: false,
            marked_neighbours: BTreeSet::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// The disjoint-set arena for a single decode invocation.
pub struct ClusterForest {
    nodes: Vec<ClusterNode>,
}

impl ClusterForest {
    /// Builds a fresh arena with one node per vertex, `n` qubits followed by
    /// `m` checks, all singleton clusters.
    pub fn new(n: usize, m: usize) -> Self {
        let mut nodes = Vec::with_capacity(n + m);
        for i in 0..n {
            nodes.push(ClusterNode::new(i, false));
        }
        for i in n..n + m {
            nodes.push(ClusterNode::new(i, true));
        }
        Self { nodes }
    }

    pub fn node(&self, idx: usize) -> &ClusterNode {
        &self.nodes[idx]
    }

    pub fn node_mut(&mut self, idx: usize) -> &mut ClusterNode {
        &mut self.nodes[idx]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the root index of `idx`'s tree, compressing the path traversed.
    pub fn find(&mut self, idx: usize) -> usize {
        let mut root = idx;
        while let Some(p) = self.nodes[root].parent {
            root = p;
        }
        // path compression
        let mut cur = idx;
        while let Some(p) = self.nodes[cur].parent {
            if p == root {
                break;
            }
            self.nodes[cur].parent = Some(root);
            cur = p;
        }
        root
    }

    /// Unions the clusters rooted at `a` and `b` (both must already be roots).
    /// Attaches the lighter cluster under the heavier one, breaking ties by
    /// lower `vertex_idx` becoming the parent. Merges `check_vertices` into
    /// the winning root and clears the loser's. Returns `(winner, loser)`.
    pub fn union(&mut self, a: usize, b: usize) -> (usize, usize) {
        debug_assert!(self.nodes[a].is_root());
        debug_assert!(self.nodes[b].is_root());
        let (winner, loser) = if self.nodes[a].cluster_size > self.nodes[b].cluster_size {
            (a, b)
        } else if self.nodes[b].cluster_size > self.nodes[a].cluster_size {
            (b, a)
        } else if a <= b {
            (a, b)
        } else {
            (b, a)
        };
        self.nodes[loser].parent = Some(winner);
        self.nodes[winner].children.insert(loser);
        self.nodes[winner].cluster_size += self.nodes[loser].cluster_size;
        let absorbed: Vec<usize> = self.nodes[loser].check_vertices.drain().collect();
        self.nodes[winner].check_vertices.extend(absorbed);
        (winner, loser)
    }

    /// Moves every boundary vertex id from `loser` into `winner`, clearing
    /// `loser`'s set. Must be called after every successful `union`.
    pub fn merge_boundaries(&mut self, winner: usize, loser: usize) {
        let moved: Vec<usize> = self.nodes[loser].boundary_vertices.drain().collect();
        self.nodes[winner].boundary_vertices.extend(moved);
    }
}
