//! Cluster growth strategies, modeled as a tagged enum rather than trait
//! polymorphism (see DESIGN.md).

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::cluster::ClusterForest;
use crate::tanner::TannerView;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthStrategy {
    #[default]
    Standard,
    SmallestFirst,
    RandomFirst,
}

impl GrowthStrategy {
    /// Chooses which cluster roots grow this step, out of the current
    /// `tracked` roots.
    pub fn choose_roots_to_grow(
        &self,
        forest: &ClusterForest,
        tracked: &[usize],
        rng: Option<&mut dyn RngCore>,
    ) -> Vec<usize> {
        match self {
            GrowthStrategy::Standard => tracked.to_vec(),
            GrowthStrategy::SmallestFirst => {
                let mut best = tracked[0];
                for &r in &tracked[1..] {
                    let size = forest.node(r).cluster_size;
                    let best_size = forest.node(best).cluster_size;
                    if size < best_size || (size == best_size && r < best) {
                        best = r;
                    }
                }
                vec![best]
            }
            GrowthStrategy::RandomFirst => {
                let rng = rng.expect("random_first requires an RNG");
                // corrected off-by-one: exclusive upper bound over tracked.len()
                let idx = (rng.next_u64() as usize) % tracked.len();
                vec![tracked[idx]]
            }
        }
    }
}

/// Enumerates candidate fusion edges `(u, v)` for the chosen roots: `u` ranges
/// over each root's boundary vertices, `v` over `u`'s Tanner neighbors.
/// Duplicates and self-pairs are left for fusion to filter.
pub fn enumerate_fusion_edges(
    forest: &ClusterForest,
    graph: &dyn TannerView,
    roots: &[usize],
) -> Vec<(usize, usize)> {
    let mut edges = Vec::new();
    for &root in roots {
        for &u in &forest.node(root).boundary_vertices {
            for v in graph.neighbors(u) {
                edges.push((u, v));
            }
        }
    }
    edges
}
