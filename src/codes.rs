//! A small catalog of ready-made codes, grounding the testable scenarios of
//! this crate and giving the CLI binary something to decode without external
//! input. Not an exhaustive code database (see Non-goals).

use serde::{Deserialize, Serialize};

use crate::tanner::TannerGraph;

/// A code, bundling the qubit count and a GF(2) parity-check matrix for one
/// Pauli sector. The Tanner graph is rebuilt from `h` on demand rather than
/// stored, keeping `Code` plain data and serializable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Code {
    pub n: usize,
    pub h: Vec<Vec<bool>>,
}

impl Code {
    pub fn new(n: usize, h: Vec<Vec<bool>>) -> Self {
        debug_assert!(h.iter().all(|row| row.len() == n));
        Self { n, h }
    }

    pub fn m(&self) -> usize {
        self.h.len()
    }

    pub fn tanner_graph(&self) -> TannerGraph {
        TannerGraph::from_parity_check(&self.h)
    }
}

/// The distance-3 `[[7,1,3]]` Steane code's single-sector check matrix: the
/// classical `[7,4,3]` Hamming parity-check matrix (X and Z checks coincide
/// for Steane, so one matrix serves both sectors).
pub fn steane() -> Code {
    let h = vec![
        vec![false, false, false, true, true, true, true],
        vec![false, true, true, false, false, true, true],
        vec![true, false, true, false, true, false, true],
    ];
    Code::new(7, h)
}

/// A distance-3 rotated surface code patch: 9 data qubits in a 3x3 grid, one
/// sector's 4 stabilizers (2 weight-2 boundary checks, 2 weight-4 bulk
/// checks), derived from the standard checkerboard plaquette construction.
/// Qubits are indexed row-major, `id = 3*row + col`.
pub fn surface_distance_3() -> Code {
    let mut h = vec![vec![false; 9]; 4];
    for &q in &[1, 2] {
        h[0][q] = true;
    }
    for &q in &[0, 1, 3, 4] {
        h[1][q] = true;
    }
    for &q in &[3, 6] {
        h[2][q] = true;
    }
    for &q in &[4, 5, 7, 8] {
        h[3][q] = true;
    }
    Code::new(9, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steane_shape() {
        let code = steane();
        assert_eq!(code.n, 7);
        assert_eq!(code.m(), 3);
    }

    #[test]
    fn surface_shape_and_weights() {
        let code = surface_distance_3();
        assert_eq!(code.n, 9);
        assert_eq!(code.m(), 4);
        let weights: Vec<usize> = code.h.iter().map(|row| row.iter().filter(|&&b| b).count()).collect();
        assert_eq!(weights, vec![2, 4, 2, 4]);
    }
}
