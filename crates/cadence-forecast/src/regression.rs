//! Deterministic ordinary least squares via the normal equations.
//!
//! A tiny ridge term on the diagonal keeps collinear feature sets
//! solvable (a five-day Monday-to-Friday window makes the weekday column
//! track the index column exactly), at a bias far below the rounding
//! applied to every forecast value.

/// Diagonal regularization added to X'X before solving.
const RIDGE_LAMBDA: f64 = 1e-6;

/// A fitted linear model: intercept followed by one coefficient per
/// feature, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    coefficients: Vec<f64>,
}

impl LinearModel {
    /// Fit `y ≈ b0 + b1·x1 + … + bk·xk`.
    ///
    /// Returns `None` for empty or ragged input, or when elimination
    /// still degenerates. Identical input always yields the identical
    /// model; there is no randomness anywhere in the fit.
    pub fn fit(features: &[Vec<f64>], targets: &[f64]) -> Option<Self> {
        if features.is_empty() || features.len() != targets.len() {
            return None;
        }
        let k = features[0].len() + 1;
        if features.iter().any(|row| row.len() + 1 != k) {
            return None;
        }

        // Accumulate X'X and X'y with an implicit leading 1 column.
        let mut xtx = vec![vec![0.0; k]; k];
        let mut xty = vec![0.0; k];
        let mut x = vec![0.0; k];
        for (row, &y) in features.iter().zip(targets) {
            x[0] = 1.0;
            x[1..k].copy_from_slice(row);
            for i in 0..k {
                xty[i] += x[i] * y;
                for j in 0..k {
                    xtx[i][j] += x[i] * x[j];
                }
            }
        }
        for (i, row) in xtx.iter_mut().enumerate() {
            row[i] += RIDGE_LAMBDA;
        }

        solve(xtx, xty).map(|coefficients| Self { coefficients })
    }

    /// Predicted target for one feature row.
    pub fn predict(&self, features: &[f64]) -> f64 {
        self.coefficients[0]
            + self.coefficients[1..]
                .iter()
                .zip(features)
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}

/// Gaussian elimination with partial pivoting.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Option<Vec<f64>> {
    let n = b.len();

    for col in 0..n {
        let pivot = (col..n).max_by(|&i, &j| {
            a[i][col]
                .abs()
                .partial_cmp(&a[j][col].abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;
        if a[pivot][col].abs() < f64::EPSILON {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in (col + 1)..n {
            let factor = a[row][col] / a[col][col];
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let mut acc = b[row];
        for col in (row + 1)..n {
            acc -= a[row][col] * x[col];
        }
        x[row] = acc / a[row][row];
    }
    Some(x)
}
