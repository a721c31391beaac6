//! Fourier features for periodic components

use crate::{MathError, Result};
use std::f64::consts::PI;

/// A periodic component expressed as a truncated Fourier series
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FourierBasis {
    /// Period length in days
    pub period: f64,
    /// Number of sine/cosine pairs
    pub order: usize,
}

impl FourierBasis {
    /// Create a new basis, rejecting non-positive periods and zero order
    pub fn new(period: f64, order: usize) -> Result<Self> {
        if !(period.is_finite() && period > 0.0) {
            return Err(MathError::InvalidInput(format!(
                "Fourier period must be positive, got {}",
                period
            )));
        }
        if order == 0 {
            return Err(MathError::InvalidInput(
                "Fourier order must be at least 1".to_string(),
            ));
        }

        Ok(Self { period, order })
    }

    /// Number of design columns this basis contributes
    pub fn width(&self) -> usize {
        2 * self.order
    }

    /// Features at time `t` (in days): `[sin(2πkt/P), cos(2πkt/P)]` for k = 1..=order
    pub fn features(&self, t: f64) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.width());
        for k in 1..=self.order {
            let angle = 2.0 * PI * k as f64 * t / self.period;
            out.push(angle.sin());
            out.push(angle.cos());
        }
        out
    }
}
