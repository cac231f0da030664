//! Conditional-variance recursions for GARCH(p, q): levels and derivatives.
//!
//! ## Model convention
//! `σ²_t = ω + Σ_{i=1..p} α_i x²_{t−i} + Σ_{j=1..q} β_j σ²_{t−j}`
//!
//! ## Buffer layout
//! Variance buffers have length `n + m` with `m = max(p, q)`:
//! - entries `0..m` are pre-sample slots, all set to the unconditional
//!   variance `σ²∞ = ω / (1 − Σα − Σβ)`;
//! - entry `m + t` is the conditional variance of `x_t`.
//!
//! Squared-return lags before the start of the sample (`t − i < 0`) are also
//! replaced by `σ²∞`, the expected value of `x²` under stationarity.
//!
//! ## Ordering
//! Lag windows are taken as **reversed** slices (newest → oldest) so they
//! align with `[α₁, …, α_p]` / `[β₁, …, β_q]`.
//!
//! ## Failure
//! A step that is non-positive or non-finite stops the recursion with
//! [`GarchError::NumericalDomain`]; nothing is clamped.
use crate::garch::{
    core::{
        data::ReturnSeries, params::GarchParams, shape::GarchOrder, validation::validate_history,
    },
    errors::{GarchError, GarchResult},
};
use ndarray::{s, Array1, ArrayView1, ArrayViewMut1, ArrayViewMut2, Axis};

/// Conditional volatilities (standard-deviation scale) with their pre-sample
/// slots.
///
/// `sigma[m + t]` is the volatility governing `x_t`; `sigma[..m]` holds the
/// pre-sample values the recursion was seeded with.
#[derive(Debug, Clone, PartialEq)]
pub struct VarianceSeries {
    pub sigma: Array1<f64>,
    pub lag_order: usize,
}

impl VarianceSeries {
    /// Total length including pre-sample slots.
    pub fn len(&self) -> usize {
        self.sigma.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sigma.is_empty()
    }

    /// Volatilities aligned one-to-one with the return series.
    pub fn in_sample(&self) -> ArrayView1<'_, f64> {
        self.sigma.slice(s![self.lag_order..])
    }

    /// Pre-sample seed values.
    pub fn presample(&self) -> ArrayView1<'_, f64> {
        self.sigma.slice(s![..self.lag_order])
    }

    /// The last `k` volatilities (oldest first), pre-sample slots included.
    ///
    /// # Errors
    /// - [`GarchError::InsufficientHistory`] if fewer than `k` are stored.
    pub fn tail(&self, k: usize) -> GarchResult<ArrayView1<'_, f64>> {
        let len = self.len();
        validate_history(len, k)?;
        Ok(self.sigma.slice(s![len - k..]))
    }
}

/// Run the variance recursion for `params` over `returns`.
///
/// # Errors
/// - `GarchError::Param` if the α/β lengths disagree with `order`.
/// - [`GarchError::NonStationaryParameters`] if `Σα + Σβ >= 1` (the
///   pre-sample seed is undefined).
/// - [`GarchError::NumericalDomain`] from the recursion itself.
pub fn recurse(
    order: &GarchOrder, params: &GarchParams, returns: &ReturnSeries,
) -> GarchResult<VarianceSeries> {
    params.check_order(order)?;
    let uncond = params.uncond_variance()?;
    let m = order.lag_order();
    let mut sigma2 = Array1::zeros(returns.len() + m);
    variance_recursion(
        params.omega,
        params.alpha.view(),
        params.beta.view(),
        uncond,
        returns.view(),
        sigma2.view_mut(),
    )?;
    sigma2.mapv_inplace(f64::sqrt);
    Ok(VarianceSeries { sigma: sigma2, lag_order: m })
}

/// In-place variance recursion on the **variance** scale.
///
/// Writes `σ²∞` into `sigma2[..m]` and `σ²_t` into `sigma2[m + t]` for
/// `t = 0..n`. Requires `sigma2.len() == returns.len() + max(p, q)`.
///
/// Squared-return lags are split per step into
/// - `k_data = min(p, t)` lags read from `returns` (reversed), and
/// - `p − k_data` lags still in the pre-sample, each worth `uncond`.
///
/// # Errors
/// - [`GarchError::NumericalDomain`] at the first step that is `<= 0` or
///   non-finite.
pub fn variance_recursion(
    omega: f64, alpha: ArrayView1<f64>, beta: ArrayView1<f64>, uncond: f64,
    returns: ArrayView1<f64>, mut sigma2: ArrayViewMut1<f64>,
) -> GarchResult<()> {
    let p = alpha.len();
    let q = beta.len();
    let m = p.max(q);
    sigma2.slice_mut(s![..m]).fill(uncond);

    for t in 0..returns.len() {
        let k_data = p.min(t);
        let arch_data: f64 = alpha
            .slice(s![..k_data])
            .iter()
            .zip(returns.slice(s![t - k_data..t; -1]).iter())
            .map(|(a, x)| a * x * x)
            .sum();
        let arch_init = alpha.slice(s![k_data..]).sum() * uncond;
        let garch = beta.dot(&sigma2.slice(s![m + t - q..m + t; -1]));

        let value = omega + arch_data + arch_init + garch;
        if !(value > 0.0 && value.is_finite()) {
            return Err(GarchError::NumericalDomain { t, value });
        }
        sigma2[m + t] = value;
    }
    Ok(())
}

/// Sensitivities `∂σ²/∂(ω, α₁..α_p, β₁..β_q)` for every entry of a variance
/// buffer filled by [`variance_recursion`].
///
/// `deriv` has shape `(n + m, 1 + p + q)`, one row per entry of `sigma2`.
///
/// 1. Pre-sample rows hold the derivatives of `σ²∞ = ω / D`,
///    `D = 1 − Σα − Σβ`: `1 / D` for ω and `σ²∞ / D` for every α and β.
/// 2. Row `m + t` differentiates the recursion step:
///    - direct terms: `1` for ω, the lagged `x²` (or `σ²∞`) for αᵢ, the
///      lagged `σ²` for βⱼ;
///    - pre-sample feedback: `Σ_{i > t} αᵢ · ∂σ²∞/∂θ`;
///    - variance feedback: `Σⱼ βⱼ · ∂σ²_{t−j}/∂θ`.
///
/// No allocations: rows are updated through split views.
pub fn derivative_recursion(
    alpha: ArrayView1<f64>, beta: ArrayView1<f64>, uncond: f64, returns: ArrayView1<f64>,
    sigma2: ArrayView1<f64>, mut deriv: ArrayViewMut2<f64>,
) {
    let p = alpha.len();
    let q = beta.len();
    let m = p.max(q);
    let denom = 1.0 - alpha.sum() - beta.sum();

    {
        let mut init_rows = deriv.slice_mut(s![..m, ..]);
        init_rows.column_mut(0).fill(1.0 / denom);
        init_rows.slice_mut(s![.., 1..]).fill(uncond / denom);
    }

    for t in 0..returns.len() {
        let k_data = p.min(t);
        let (prev, mut rest) = deriv.view_mut().split_at(Axis(0), m + t);
        let mut row = rest.row_mut(0);

        row[0] = 1.0;
        for i in 0..p {
            row[1 + i] = if i < k_data {
                let x = returns[t - 1 - i];
                x * x
            } else {
                uncond
            };
        }
        for j in 0..q {
            row[1 + p + j] = sigma2[m + t - 1 - j];
        }

        let presample_weight = alpha.slice(s![k_data..]).sum();
        if presample_weight > 0.0 {
            row.scaled_add(presample_weight, &prev.row(0));
        }
        for j in 0..q {
            row.scaled_add(beta[j], &prev.row(m + t - 1 - j));
        }
    }
}
