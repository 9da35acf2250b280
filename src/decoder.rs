//! Outer cluster-growth loop, validity predicate, and the two inner
//! (erasure) decoders, wired together behind the `Decoder` external contract.

use std::collections::{BTreeSet, VecDeque};
use std::time::{Duration, Instant};

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::cluster::ClusterForest;
use crate::codes::Code;
use crate::error::DecodingError;
use crate::growth::{enumerate_fusion_edges, GrowthStrategy};
use crate::random::Seed;
use crate::tanner::TannerView;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InnerDecoder {
    #[default]
    Peeling,
    Interior,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DecodingResult {
    pub estimate: Vec<bool>,
    pub estimate_indices: Vec<usize>,
    pub decoding_time: Duration,
}

/// The Union-Find decoder. Owns no shared state beyond the code it was last
/// given a `set_code` for; a single instance is not safe to `decode` with
/// concurrently (per-vertex scratch state is rebuilt fresh each call, but the
/// call itself takes `&mut self`).
pub struct Decoder {
    code: Option<Code>,
    growth: GrowthStrategy,
    inner: InnerDecoder,
    rng: rand_xoshiro::Xoshiro256PlusPlus,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self::with_seed(Seed::from_entropy())
    }

    pub fn with_seed(seed: Seed) -> Self {
        Self {
            code: None,
            growth: GrowthStrategy::default(),
            inner: InnerDecoder::default(),
            rng: seed.stream(),
        }
    }

    pub fn set_code(&mut self, code: Code) {
        self.code = Some(code);
    }

    pub fn set_growth(&mut self, strategy: GrowthStrategy) {
        self.growth = strategy;
    }

    pub fn set_inner_decoder(&mut self, inner: InnerDecoder) {
        self.inner = inner;
    }

    pub fn growth(&self) -> GrowthStrategy {
        self.growth
    }

    /// Decodes `syndrome` using this decoder's own injected RNG stream (only
    /// consulted by `GrowthStrategy::RandomFirst`).
    pub fn decode(&mut self, syndrome: &[bool]) -> Result<DecodingResult, DecodingError> {
        let code = self.code.clone();
        let code = code.as_ref().ok_or(DecodingError::NoCodeSet)?;
        decode_with(code, self.growth, self.inner, syndrome, &mut self.rng)
    }

    /// Decodes `syndrome` using an explicitly supplied RNG, for callers that
    /// want the `random_first` strategy to draw from their own stream rather
    /// than this decoder's.
    pub fn decode_with_rng(
        &mut self,
        syndrome: &[bool],
        rng: &mut dyn RngCore,
    ) -> Result<DecodingResult, DecodingError> {
        let code = self.code.clone();
        let code = code.as_ref().ok_or(DecodingError::NoCodeSet)?;
        decode_with(code, self.growth, self.inner, syndrome, rng)
    }
}

fn decode_with(
    code: &Code,
    growth: GrowthStrategy,
    inner: InnerDecoder,
    syndrome: &[bool],
    rng: &mut dyn RngCore,
) -> Result<DecodingResult, DecodingError> {
    let m = code.m();
    if syndrome.len() != m {
        return Err(DecodingError::SyndromeShapeMismatch {
            expected: m,
            actual: syndrome.len(),
        });
    }

    let start = Instant::now();
    let n = code.n;

    if syndrome.iter().all(|&bit| !bit) {
        return Ok(DecodingResult {
            estimate: vec![false; n],
            estimate_indices: Vec::new(),
            decoding_time: start.elapsed(),
        });
    }

    let graph = code.tanner_graph();
    let mut forest = ClusterForest::new(n, m);

    let mut tracked: BTreeSet<usize> = BTreeSet::new();
    let mut initial_checks: BTreeSet<usize> = BTreeSet::new();
    for (i, &bit) in syndrome.iter().enumerate() {
        if bit {
            let v = n + i;
            forest.node_mut(v).check_vertices.insert(v);
            forest.node_mut(v).boundary_vertices.insert(v);
            tracked.insert(v);
            initial_checks.insert(v);
        }
    }

    let mut erasure: Vec<usize> = Vec::new();
    let max_rounds = n + m;
    let mut rounds = 0;
    while !tracked.is_empty() {
        rounds += 1;
        debug_assert!(
            rounds <= max_rounds + 1,
            "outer loop exceeded the N+M termination bound"
        );

        let tracked_vec: Vec<usize> = tracked.iter().copied().collect();
        let roots_to_grow = growth.choose_roots_to_grow(&forest, &tracked_vec, Some(rng));
        let edges = enumerate_fusion_edges(&forest, &graph, &roots_to_grow);

        fuse(&mut forest, &edges);
        tracked = refresh_tracked_set(&mut forest, &tracked);
        refresh_boundaries(&mut forest, &graph, &tracked);
        tracked = extract_valid(&forest, &graph, tracked, &mut erasure);
    }

    let estimate_indices = match inner {
        InnerDecoder::Peeling => peeling_decoder(&mut forest, &graph, &erasure, &initial_checks)?,
        InnerDecoder::Interior => erasure_decoder(&mut forest, &graph, &erasure, &initial_checks)?,
    };

    let mut estimate = vec![false; n];
    for &idx in &estimate_indices {
        estimate[idx] = true;
    }
    let mut estimate_indices: Vec<usize> = estimate_indices.into_iter().collect();
    estimate_indices.sort_unstable();

    Ok(DecodingResult {
        estimate,
        estimate_indices,
        decoding_time: start.elapsed(),
    })
}

fn fuse(forest: &mut ClusterForest, edges: &[(usize, usize)]) {
    for &(u, v) in edges {
        let ru = forest.find(u);
        let rv = forest.find(v);
        if ru == rv {
            continue;
        }
        let (winner, loser) = forest.union(ru, rv);
        forest.merge_boundaries(winner, loser);
    }
}

fn refresh_tracked_set(forest: &mut ClusterForest, tracked: &BTreeSet<usize>) -> BTreeSet<usize> {
    tracked.iter().map(|&r| forest.find(r)).collect()
}

fn refresh_boundaries(forest: &mut ClusterForest, graph: &dyn TannerView, tracked: &BTreeSet<usize>) {
    for &root in tracked {
        let snapshot: Vec<usize> = forest.node(root).boundary_vertices.iter().copied().collect();
        let mut kept = BTreeSet::new();
        for v in snapshot {
            let still_on_boundary = graph.neighbors(v).iter().any(|&w| forest.find(w) != root);
            if still_on_boundary {
                kept.insert(v);
            }
        }
        forest.node_mut(root).boundary_vertices = kept;
    }
}

/// A cluster root is valid iff every check vertex it has absorbed has at
/// least one Tanner neighbor strictly interior to the cluster.
fn is_valid(forest: &ClusterForest, graph: &dyn TannerView, root: usize) -> bool {
    let node = forest.node(root);
    if node.check_vertices.is_empty() {
        return true;
    }
    node.check_vertices.iter().all(|&check| {
        graph
            .neighbors(check)
            .iter()
            .any(|nbr| !node.boundary_vertices.contains(nbr))
    })
}

fn extract_valid(
    forest: &ClusterForest,
    graph: &dyn TannerView,
    tracked: BTreeSet<usize>,
    erasure: &mut Vec<usize>,
) -> BTreeSet<usize> {
    let mut remaining = BTreeSet::new();
    for root in tracked {
        if is_valid(forest, graph, root) {
            erasure.push(root);
        } else {
            remaining.insert(root);
        }
    }
    remaining
}

/// Spanning-forest peeling inner decoder (preferred, the library default).
/// Builds a BFS spanning forest of each extracted cluster restricted to
/// Tanner edges within that cluster, then repeatedly peels pendant edges,
/// assigning a violated check's responsibility to its surviving tree
/// neighbor.
fn peeling_decoder(
    forest: &mut ClusterForest,
    graph: &dyn TannerView,
    erasure: &[usize],
    initial_checks: &BTreeSet<usize>,
) -> Result<BTreeSet<usize>, DecodingError> {
    let mut residual_syndrome = initial_checks.clone();
    let mut estimate = BTreeSet::new();

    for &root in erasure {
        let cluster_checks = forest.node(root).check_vertices.clone();

        let mut visited = BTreeSet::from([root]);
        let mut live_vertices = BTreeSet::from([root]);
        let mut edges: Vec<(usize, usize)> = Vec::new();
        let mut queue = VecDeque::from([root]);
        while let Some(current) = queue.pop_front() {
            for nbr in graph.neighbors(current) {
                if !visited.contains(&nbr) && forest.find(nbr) == root {
                    visited.insert(nbr);
                    live_vertices.insert(nbr);
                    queue.push_back(nbr);
                    edges.push((current, nbr));
                }
            }
        }

        let mut marked: BTreeSet<usize> = BTreeSet::new();
        let pendants_of = |live: &BTreeSet<usize>, marked: &BTreeSet<usize>| -> BTreeSet<usize> {
            live.iter()
                .copied()
                .filter(|v| {
                    graph
                        .neighbors(*v)
                        .iter()
                        .any(|w| !live.contains(w) && !marked.contains(w))
                })
                .collect()
        };
        let mut pendants = pendants_of(&live_vertices, &marked);

        loop {
            let cluster_has_residual = cluster_checks.iter().any(|c| residual_syndrome.contains(c));
            if !cluster_has_residual {
                break;
            }
            let mut idx = 0;
            let mut progressed = false;
            while idx < edges.len() {
                let (u, v) = edges[idx];
                if marked.contains(&u) || marked.contains(&v) {
                    edges.remove(idx);
                    continue;
                }
                if pendants.contains(&u) {
                    marked.insert(u);
                    live_vertices.remove(&u);
                    edges.remove(idx);
                    progressed = true;
                    pendants = pendants_of(&live_vertices, &marked);
                    continue;
                }
                if pendants.contains(&v) {
                    marked.insert(v);
                    live_vertices.remove(&v);
                    edges.remove(idx);
                    progressed = true;
                    pendants = pendants_of(&live_vertices, &marked);
                    continue;
                }
                let u_lit = residual_syndrome.contains(&u);
                let v_lit = residual_syndrome.contains(&v);
                let (check, data) = if u_lit && v_lit {
                    if u < v { (u, v) } else { (v, u) }
                } else if u_lit {
                    (u, v)
                } else if v_lit {
                    (v, u)
                } else {
                    idx += 1;
                    continue;
                };
                estimate.insert(data);
                marked.insert(data);
                marked.insert(check);
                live_vertices.remove(&data);
                live_vertices.remove(&check);
                residual_syndrome.remove(&check);
                edges.remove(idx);
                progressed = true;
                pendants = pendants_of(&live_vertices, &marked);
            }
            if !progressed {
                break;
            }
        }
    }

    if residual_syndrome.is_empty() {
        Ok(estimate)
    } else {
        Err(DecodingError::InfeasibleEstimate)
    }
}

/// Interior-peeling inner decoder. Computes each cluster's interior by BFS
/// over the union-find's `children` edges, then peels marked data vertices
/// against their marked check neighbors. Unlike the original source (see
/// DESIGN.md), each peel pass scans a fixed snapshot and advances
/// unconditionally; a pass that clears nothing while checks remain yields
/// `InfeasibleEstimate` rather than looping forever.
fn erasure_decoder(
    forest: &mut ClusterForest,
    graph: &dyn TannerView,
    erasure: &[usize],
    initial_checks: &BTreeSet<usize>,
) -> Result<BTreeSet<usize>, DecodingError> {
    let mut residual_syndrome = initial_checks.clone();
    let mut estimate = BTreeSet::new();

    for &root in erasure {
        let boundary = forest.node(root).boundary_vertices.clone();
        let cluster_checks = forest.node(root).check_vertices.clone();
        let mut interior: BTreeSet<usize> = BTreeSet::new();
        let mut queue = VecDeque::new();

        if !boundary.contains(&root) {
            forest.node_mut(root).marked = true;
            interior.insert(root);
        }
        queue.push_back(root);

        while let Some(current) = queue.pop_front() {
            let children: Vec<usize> = forest.node(current).children.iter().copied().collect();
            for child in children {
                if !forest.node(child).marked && !boundary.contains(&child) {
                    if graph.neighbors(current).contains(&child) {
                        forest.node_mut(current).marked_neighbours.insert(child);
                    }
                    forest.node_mut(child).marked = true;
                    interior.insert(child);
                    queue.push_back(child);
                }
            }
        }

        loop {
            let cluster_has_residual = cluster_checks.iter().any(|c| residual_syndrome.contains(c));
            if !cluster_has_residual {
                break;
            }
            let snapshot: Vec<usize> = interior.iter().copied().collect();
            let mut progressed = false;
            for v in snapshot {
                if !interior.contains(&v) || graph.is_check(v) {
                    continue;
                }
                let marked_neighbours = forest.node(v).marked_neighbours.clone();
                if marked_neighbours.is_empty() {
                    continue;
                }
                estimate.insert(v);
                for &check in &marked_neighbours {
                    for w in graph.neighbors(check) {
                        interior.remove(&w);
                    }
                    interior.remove(&check);
                    residual_syndrome.remove(&check);
                }
                forest.node_mut(v).marked_neighbours.clear();
                progressed = true;
            }
            if !progressed {
                break;
            }
        }
    }

    if residual_syndrome.is_empty() {
        Ok(estimate)
    } else {
        Err(DecodingError::InfeasibleEstimate)
    }
}
