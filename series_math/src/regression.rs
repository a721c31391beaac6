//! Least squares regression
//!
//! Solves `(XᵀX + diag(λ)) β = Xᵀy` by Gauss-Jordan elimination with partial
//! pivoting. The per-column penalty lets callers leave trend columns
//! unregularised while damping seasonal columns.

use crate::{MathError, Result};

/// Smallest pivot accepted before the system is treated as singular
const PIVOT_EPSILON: f64 = 1e-12;

/// Fit coefficients for the design matrix `x` (one row per observation)
///
/// `penalties` holds one ridge term per column; pass zeros for plain OLS.
pub fn ridge_least_squares(x: &[Vec<f64>], y: &[f64], penalties: &[f64]) -> Result<Vec<f64>> {
    if x.is_empty() {
        return Err(MathError::InsufficientData(
            "Design matrix has no rows".to_string(),
        ));
    }
    if x.len() != y.len() {
        return Err(MathError::InvalidInput(format!(
            "Design matrix has {} rows but target has {} values",
            x.len(),
            y.len()
        )));
    }

    let p = x[0].len();
    if p == 0 {
        return Err(MathError::InvalidInput(
            "Design matrix has no columns".to_string(),
        ));
    }
    if penalties.len() != p {
        return Err(MathError::InvalidInput(format!(
            "Expected {} penalties, got {}",
            p,
            penalties.len()
        )));
    }
    if let Some(row) = x.iter().position(|row| row.len() != p) {
        return Err(MathError::InvalidInput(format!(
            "Row {} has {} columns, expected {}",
            row,
            x[row].len(),
            p
        )));
    }

    // Normal equations
    let mut a = vec![vec![0.0; p]; p];
    let mut b = vec![0.0; p];
    for (row, &target) in x.iter().zip(y) {
        for i in 0..p {
            b[i] += row[i] * target;
            for j in i..p {
                a[i][j] += row[i] * row[j];
            }
        }
    }
    for i in 0..p {
        for j in 0..i {
            a[i][j] = a[j][i];
        }
        a[i][i] += penalties[i];
    }

    for col in 0..p {
        let pivot_row = (col..p)
            .max_by(|&r1, &r2| a[r1][col].abs().total_cmp(&a[r2][col].abs()))
            .unwrap_or(col);
        if a[pivot_row][col].abs() < PIVOT_EPSILON {
            return Err(MathError::CalculationError(format!(
                "Normal equations are singular at column {}",
                col
            )));
        }
        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        let inv = 1.0 / a[col][col];
        for j in col..p {
            a[col][j] *= inv;
        }
        b[col] *= inv;

        for r in 0..p {
            if r == col {
                continue;
            }
            let factor = a[r][col];
            if factor == 0.0 {
                continue;
            }
            for j in col..p {
                a[r][j] -= factor * a[col][j];
            }
            b[r] -= factor * b[col];
        }
    }

    Ok(b)
}

/// Dot product of a design row with fitted coefficients
pub fn predict_row(row: &[f64], coefficients: &[f64]) -> f64 {
    row.iter().zip(coefficients).map(|(x, c)| x * c).sum()
}
