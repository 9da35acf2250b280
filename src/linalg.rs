//! GF(2) linear algebra primitives used to verify decoding results and, in
//! tests, to sample errors. A pure-Rust `Vec<Vec<bool>>` reimplementation of
//! the original FLINT-backed `nmod_mat` routines: same semantics (arbitrary
//! valid solution on under-determined systems, explicit infeasibility), no
//! FFI.

pub type Matrix = Vec<Vec<bool>>;
pub type Vector = Vec<bool>;

/// Transpose of a 0/1 matrix. Transpose of an empty matrix is empty.
pub fn transpose(m: &Matrix) -> Matrix {
    if m.is_empty() {
        return Vec::new();
    }
    let rows = m.len();
    let cols = m[0].len();
    let mut t = vec![vec![false; rows]; cols];
    for i in 0..rows {
        for j in 0..cols {
            t[j][i] = m[i][j];
        }
    }
    t
}

/// Swaps two rows of a matrix in place.
pub fn swap_rows(m: &mut Matrix, row1: usize, row2: usize) {
    m.swap(row1, row2);
}

/// Reduced row echelon form over GF(2).
pub fn rref(m: &Matrix) -> Matrix {
    let mut r = m.clone();
    if r.is_empty() {
        return r;
    }
    let rows = r.len();
    let cols = r[0].len();
    let mut pivot_row = 0;
    for col in 0..cols {
        if pivot_row >= rows {
            break;
        }
        let Some(found) = (pivot_row..rows).find(|&i| r[i][col]) else {
            continue;
        };
        if found != pivot_row {
            swap_rows(&mut r, found, pivot_row);
        }
        for i in 0..rows {
            if i != pivot_row && r[i][col] {
                xor_accumulate_row(&mut r, i, pivot_row);
            }
        }
        pivot_row += 1;
    }
    r
}

fn xor_accumulate_row(m: &mut Matrix, target: usize, source: usize) {
    let cols = m[target].len();
    for j in 0..cols {
        m[target][j] ^= m[source][j];
    }
}

/// Residual-accumulate: `residual ^= error`, in place.
pub fn xor_accumulate(residual: &mut Vector, error: &Vector) {
    for (r, e) in residual.iter_mut().zip(error.iter()) {
        *r ^= *e;
    }
}

/// Standard rectangular GF(2) matrix multiply, `m1 (rows x k) * m2 (k x cols)`.
pub fn rect_matrix_multiply(m1: &Matrix, m2: &Matrix) -> Matrix {
    if m1.is_empty() || m2.is_empty() {
        return Vec::new();
    }
    let rows = m1.len();
    let k = m2.len();
    let cols = m2[0].len();
    let mut result = vec![vec![false; cols]; rows];
    for i in 0..rows {
        for (t, m2_row) in m2.iter().enumerate().take(k) {
            if !m1[i][t] {
                continue;
            }
            for j in 0..cols {
                result[i][j] ^= m2_row[j];
            }
        }
    }
    result
}

/// Solves `Mx = b` over GF(2) via Gauss-Jordan elimination on the augmented
/// matrix `[M | b]`. Returns some valid `x` if a solution exists (not
/// necessarily unique), or `None` if the system is infeasible.
pub fn solve(m: &Matrix, b: &Vector) -> Option<Vector> {
    if m.is_empty() {
        // zero-row system: any (here, empty) vector satisfies it vacuously
        return Some(Vec::new());
    }
    let rows = m.len();
    let cols = m[0].len();
    assert_eq!(rows, b.len(), "solve: row count must match syndrome length");

    let mut aug: Matrix = m
        .iter()
        .zip(b.iter())
        .map(|(row, &bit)| {
            let mut r = row.clone();
            r.push(bit);
            r
        })
        .collect();

    let mut pivot_cols = Vec::new();
    let mut pivot_row = 0;
    for col in 0..cols {
        if pivot_row >= rows {
            break;
        }
        let Some(found) = (pivot_row..rows).find(|&i| aug[i][col]) else {
            continue;
        };
        if found != pivot_row {
            swap_rows(&mut aug, found, pivot_row);
        }
        for i in 0..rows {
            if i != pivot_row && aug[i][col] {
                xor_accumulate_row(&mut aug, i, pivot_row);
            }
        }
        pivot_cols.push(col);
        pivot_row += 1;
    }

    // Any remaining row with all-zero coefficients but a set constant bit
    // means the system is infeasible.
    for row in aug.iter().take(rows).skip(pivot_row) {
        if row[cols] {
            return None;
        }
    }

    let mut x = vec![false; cols];
    for (i, &col) in pivot_cols.iter().enumerate() {
        x[col] = aug[i][cols];
    }
    Some(x)
}

/// `b` is in the row space of `M` iff `Mᵀ x = b` is solvable.
pub fn row_space_contains(m: &Matrix, b: &Vector) -> bool {
    solve(&transpose(m), b).is_some()
}
