//! Return-series container for GARCH models.
//!
//! Purpose
//! -------
//! Provide a small, validated container for the zero-mean return series that
//! GARCH estimation, forecasting, and simulation operate on.
//!
//! Invariants & assumptions
//! ------------------------
//! - The series is non-empty and every value is finite.
//! - Returns are treated as zero-mean innovations: no demeaning is applied,
//!   and the "sample variance" used for start values is `mean(x²)`.
//!
//! Downstream usage
//! ----------------
//! - Construct [`ReturnSeries`] where raw returns enter the crate; recursions
//!   and likelihoods then rely on its invariants.
//! - [`ReturnSeries::prefix`] produces the owned training windows used by the
//!   rolling forecast engine.
use crate::garch::errors::{GarchError, GarchResult};
use ndarray::{s, Array1, ArrayView1};

/// Validated return series `x_0, …, x_{n-1}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries {
    pub data: Array1<f64>,
}

impl ReturnSeries {
    /// Construct a validated series.
    ///
    /// # Errors
    /// - [`GarchError::EmptySeries`] if `data` is empty.
    /// - [`GarchError::NonFiniteData`] for the first NaN/±∞ entry.
    pub fn new(data: Array1<f64>) -> GarchResult<Self> {
        if data.is_empty() {
            return Err(GarchError::EmptySeries);
        }
        if let Some((index, &value)) = data.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(GarchError::NonFiniteData { index, value });
        }
        Ok(ReturnSeries { data })
    }

    /// Convenience constructor from a `Vec<f64>`.
    pub fn from_vec(data: Vec<f64>) -> GarchResult<Self> {
        Self::new(Array1::from(data))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn view(&self) -> ArrayView1<'_, f64> {
        self.data.view()
    }

    /// Owned copy of the first `len` observations.
    ///
    /// # Errors
    /// - [`GarchError::EmptySeries`] if `len == 0`.
    /// - [`GarchError::InsufficientHistory`] if `len > self.len()`.
    pub fn prefix(&self, len: usize) -> GarchResult<ReturnSeries> {
        if len > self.len() {
            return Err(GarchError::InsufficientHistory { required: len, available: self.len() });
        }
        ReturnSeries::new(self.data.slice(s![..len]).to_owned())
    }

    /// The last `k` observations, oldest first.
    ///
    /// # Errors
    /// - [`GarchError::InsufficientHistory`] if `k > self.len()`.
    pub fn tail(&self, k: usize) -> GarchResult<ArrayView1<'_, f64>> {
        let n = self.len();
        if k > n {
            return Err(GarchError::InsufficientHistory { required: k, available: n });
        }
        Ok(self.data.slice(s![n - k..]))
    }

    /// Zero-mean sample variance `mean(x²)`.
    pub fn sample_variance(&self) -> f64 {
        self.data.iter().map(|x| x * x).sum::<f64>() / self.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Construction rejects empty and non-finite input.
    //
    // Given
    // -----
    // - An empty array and `[0.1, NaN]`.
    //
    // Expect
    // ------
    // - `EmptySeries` and `NonFiniteData { index: 1, .. }`.
    fn new_rejects_empty_and_non_finite() {
        assert_eq!(ReturnSeries::new(Array1::zeros(0)), Err(GarchError::EmptySeries));
        assert!(matches!(
            ReturnSeries::new(array![0.1, f64::NAN]),
            Err(GarchError::NonFiniteData { index: 1, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Prefix/tail windows and the zero-mean variance behave as documented.
    //
    // Given
    // -----
    // - x = [1, -2, 3, -4].
    //
    // Expect
    // ------
    // - prefix(2) = [1, -2]; tail(2) = [3, -4]; mean(x²) = 7.5;
    //   prefix(5) is `InsufficientHistory`.
    fn windows_and_sample_variance() {
        let series = ReturnSeries::new(array![1.0, -2.0, 3.0, -4.0]).expect("valid series");

        assert_eq!(series.prefix(2).expect("prefix").data, array![1.0, -2.0]);
        assert_eq!(series.tail(2).expect("tail"), array![3.0, -4.0].view());
        assert_eq!(series.sample_variance(), 7.5);
        assert!(matches!(series.prefix(5), Err(GarchError::InsufficientHistory { .. })));
    }
}
