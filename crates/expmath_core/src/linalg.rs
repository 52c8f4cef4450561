//! Eigen decomposition of small dense matrices.

use anyhow::{anyhow, Result};
use nalgebra::linalg::SVD;
use nalgebra::{Complex, DMatrix};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexNumber {
    pub re: f64,
    pub im: f64,
}

impl From<Complex<f64>> for ComplexNumber {
    fn from(value: Complex<f64>) -> Self {
        Self {
            re: value.re,
            im: value.im,
        }
    }
}

impl ComplexNumber {
    pub fn is_real(&self) -> bool {
        self.im.abs() < 1e-12
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EigenPair {
    pub value: ComplexNumber,
    pub vector: Vec<ComplexNumber>,
}

impl EigenPair {
    /// Real part of the eigenvector when the eigenvalue is real.
    pub fn real_vector(&self) -> Option<Vec<f64>> {
        self.value
            .is_real()
            .then(|| self.vector.iter().map(|c| c.re).collect())
    }
}

/// Eigenpairs of the `dim x dim` row-major matrix `entries`.
///
/// Each eigenvector spans the null space of `A - lambda I`, taken from the
/// last right singular vector. Real eigenvalues yield real unit vectors.
pub fn compute_eigenpairs(dim: usize, entries: &[f64]) -> Result<Vec<EigenPair>> {
    if entries.len() != dim * dim {
        return Err(anyhow!(
            "Matrix entry count mismatch. Expected {}, got {}.",
            dim * dim,
            entries.len()
        ));
    }
    let matrix = DMatrix::from_row_slice(dim, dim, entries);
    let eigenvalues = matrix.complex_eigenvalues();

    let mut pairs = Vec::with_capacity(dim);
    for idx in 0..dim {
        let lambda = eigenvalues[idx];
        let vector = if lambda.im.abs() < 1e-12 {
            real_null_vector(&matrix, lambda.re)
                .ok_or_else(|| anyhow!("Failed to compute eigenvector for eigenvalue index {}", idx))?
                .into_iter()
                .map(|re| ComplexNumber { re, im: 0.0 })
                .collect()
        } else {
            complex_null_vector(&matrix, lambda)
                .ok_or_else(|| anyhow!("Failed to compute eigenvector for eigenvalue index {}", idx))?
        };
        pairs.push(EigenPair {
            value: ComplexNumber::from(lambda),
            vector,
        });
    }
    Ok(pairs)
}

fn real_null_vector(matrix: &DMatrix<f64>, lambda: f64) -> Option<Vec<f64>> {
    let mut shifted = matrix.clone();
    for i in 0..shifted.nrows() {
        shifted[(i, i)] -= lambda;
    }
    let svd = SVD::new(shifted, true, true);
    let v_t = svd.v_t?;
    let row = v_t.row(v_t.nrows().saturating_sub(1));
    let mut vector: Vec<f64> = row.iter().copied().collect();
    let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        vector.iter_mut().for_each(|v| *v /= norm);
    }
    Some(vector)
}

fn complex_null_vector(matrix: &DMatrix<f64>, lambda: Complex<f64>) -> Option<Vec<ComplexNumber>> {
    let mut shifted = matrix.map(|v| Complex::new(v, 0.0));
    for i in 0..shifted.nrows() {
        shifted[(i, i)] -= lambda;
    }
    let svd = SVD::new(shifted, true, true);
    let v_t = svd.v_t?;
    let row = v_t.row(v_t.nrows().saturating_sub(1));
    let mut vector: Vec<Complex<f64>> = row.iter().map(|c| c.conj()).collect();
    let norm = vector.iter().map(|c| c.norm_sqr()).sum::<f64>().sqrt();
    if norm > 0.0 {
        for entry in &mut vector {
            *entry /= norm;
        }
    }
    Some(vector.into_iter().map(ComplexNumber::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_matrix_has_axis_eigenvectors() {
        let pairs = compute_eigenpairs(2, &[2.0, 0.0, 0.0, 3.0]).unwrap();
        assert_eq!(pairs.len(), 2);
        for pair in &pairs {
            let v = pair.real_vector().expect("real eigenvector");
            let lambda = pair.value.re;
            let image = if (lambda - 2.0).abs() < 1e-9 {
                [2.0 * v[0], 2.0 * v[1]]
            } else {
                [2.0 * v[0], 3.0 * v[1]]
            };
            assert!((image[0] - lambda * v[0]).abs() < 1e-9);
            assert!((image[1] - lambda * v[1]).abs() < 1e-9);
        }
    }

    #[test]
    fn rotation_has_complex_eigenvalues() {
        let pairs = compute_eigenpairs(2, &[0.0, -1.0, 1.0, 0.0]).unwrap();
        for pair in &pairs {
            assert!((pair.value.im.abs() - 1.0).abs() < 1e-9);
            assert!(pair.real_vector().is_none());
        }
    }

    #[test]
    fn rejects_wrong_entry_count() {
        assert!(compute_eigenpairs(2, &[1.0, 2.0, 3.0]).is_err());
    }
}
