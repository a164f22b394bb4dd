//! Ordinary least squares for the lag-window model.
//!
//! Fits `y = intercept + Σ βᵢ·xᵢ` by centering the design matrix and target,
//! solving the centered system with an SVD, and recovering the intercept
//! from the column means. Rank-deficient designs get the minimum-norm
//! solution, so short or flat histories still produce a usable model.

use nalgebra::{DMatrix, DVector};

use crate::error::ForecastError;

/// A fitted autoregressive linear model over a fixed lag window.
#[derive(Debug, Clone, PartialEq)]
pub struct LagModel {
    intercept: f64,
    /// One weight per lag position, oldest first.
    coefficients: Vec<f64>,
}

impl LagModel {
    /// Fit the model on sliding windows of `lag_window` prices.
    ///
    /// Each training example is `prices[i..i + lag_window]` labelled with
    /// `prices[i + lag_window]`, giving `prices.len() - lag_window` rows.
    ///
    /// # Errors
    ///
    /// - [`ForecastError::InvalidParameter`] if `lag_window` is 0
    /// - [`ForecastError::InsufficientData`] if `prices.len() <= lag_window`
    /// - [`ForecastError::NumericInstability`] if the fit is not finite
    pub fn fit(prices: &[f64], lag_window: usize) -> Result<Self, ForecastError> {
        if lag_window == 0 {
            return Err(ForecastError::InvalidParameter {
                field: "lag_window",
                reason: "must be at least 1".to_string(),
            });
        }
        if prices.len() <= lag_window {
            return Err(ForecastError::InsufficientData {
                len: prices.len(),
                lag_window,
            });
        }

        let rows = prices.len() - lag_window;
        let x = DMatrix::from_fn(rows, lag_window, |r, c| prices[r + c]);
        let y = DVector::from_iterator(rows, prices[lag_window..].iter().copied());

        let col_means: Vec<f64> = (0..lag_window).map(|c| x.column(c).mean()).collect();
        let y_mean = y.mean();

        let x_centered = DMatrix::from_fn(rows, lag_window, |r, c| x[(r, c)] - col_means[c]);
        let y_centered = y.add_scalar(-y_mean);
        let x_mean = DVector::from_vec(col_means);

        let svd = x_centered.svd(true, true);
        let max_singular = svd.singular_values.max();
        // Same cutoff LAPACK's gelsd uses by default.
        let eps = f64::EPSILON * rows.max(lag_window) as f64 * max_singular;
        let beta = svd
            .solve(&y_centered, eps)
            .map_err(|e| ForecastError::NumericInstability(e.to_string()))?;

        let intercept = y_mean - x_mean.dot(&beta);
        let coefficients: Vec<f64> = beta.iter().copied().collect();

        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ForecastError::NumericInstability(
                "least squares fit produced non-finite coefficients".to_string(),
            ));
        }

        Ok(Self {
            intercept,
            coefficients,
        })
    }

    #[must_use]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    #[must_use]
    pub fn lag_window(&self) -> usize {
        self.coefficients.len()
    }

    /// Predict the value following `window`, which must hold exactly
    /// `lag_window` values, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InvalidParameter`] on a length mismatch and
    /// [`ForecastError::NumericInstability`] if the prediction is not finite.
    pub fn predict_next(&self, window: &[f64]) -> Result<f64, ForecastError> {
        if window.len() != self.coefficients.len() {
            return Err(ForecastError::InvalidParameter {
                field: "window",
                reason: format!(
                    "expected {} values, got {}",
                    self.coefficients.len(),
                    window.len()
                ),
            });
        }

        let value = self.intercept
            + self
                .coefficients
                .iter()
                .zip(window)
                .map(|(b, x)| b * x)
                .sum::<f64>();

        if value.is_finite() {
            Ok(value)
        } else {
            Err(ForecastError::NumericInstability(
                "prediction is not finite".to_string(),
            ))
        }
    }
}
