//! Multi-step variance forecasting for GARCH(p, q).
//!
//! Starting from the last `p` observed returns and the last `q` conditional
//! variances, the recursion is rolled forward `h` steps. For steps beyond the
//! observed sample the unknown `x²_{T+k}` is replaced by its conditional
//! expectation, which is the forecast variance `σ²_{T+k}` itself. Forecasts
//! therefore revert geometrically towards `σ²∞ = ω / (1 − Σα − Σβ)` when the
//! process is stationary.
//!
//! Lag buffers are passed **oldest first** (newest at the end) and read as
//! reversed tails, the same convention as the in-sample recursion.
use crate::garch::{
    core::{
        params::GarchParams,
        validation::{validate_history, validate_horizon},
    },
    errors::{GarchError, GarchResult},
};
use ndarray::{s, Array1, ArrayView1};

/// Volatility forecasts `σ̂_{T+1}, …, σ̂_{T+h}` (standard-deviation scale).
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    pub sigma: Array1<f64>,
}

impl ForecastResult {
    /// Build from forecasts on the variance scale.
    pub fn from_variances(variances: Array1<f64>) -> Self {
        ForecastResult { sigma: variances.mapv(f64::sqrt) }
    }

    pub fn horizon(&self) -> usize {
        self.sigma.len()
    }

    pub fn view(&self) -> ArrayView1<'_, f64> {
        self.sigma.view()
    }

    /// Forecast at the furthest step.
    pub fn terminal(&self) -> Option<f64> {
        self.sigma.last().copied()
    }
}

/// Roll the variance recursion `horizon` steps forward.
///
/// - `return_lags`: at least `p` past returns, newest last.
/// - `variance_lags`: at least `q` past conditional **variances**, newest last.
///
/// Returns the `horizon` forecast variances.
///
/// Per step `i` the α-lags split into `min(i, p)` lags served by earlier
/// forecasts and the rest served by observed squared returns; β-lags split the
/// same way against `variance_lags`.
///
/// # Errors
/// - [`GarchError::InvalidHorizon`] if `horizon == 0`.
/// - [`GarchError::InsufficientHistory`] if either lag buffer is too short.
/// - [`GarchError::NumericalDomain`] with `t` = forecast step (0-based).
pub fn forecast_recursion(
    params: &GarchParams, return_lags: ArrayView1<f64>, variance_lags: ArrayView1<f64>,
    horizon: usize,
) -> GarchResult<Array1<f64>> {
    validate_horizon(horizon)?;
    let alpha = params.alpha.view();
    let beta = params.beta.view();
    let p = alpha.len();
    let q = beta.len();
    validate_history(return_lags.len(), p)?;
    validate_history(variance_lags.len(), q)?;
    let x_tail = return_lags.slice(s![return_lags.len() - p..]);
    let v_tail = variance_lags.slice(s![variance_lags.len() - q..]);

    let mut out = Array1::zeros(horizon);
    for i in 0..horizon {
        let kx = i.min(p);
        let arch_fc = alpha.slice(s![..kx]).dot(&out.slice(s![i - kx..i; -1]));
        let arch_obs: f64 = alpha
            .slice(s![kx..])
            .iter()
            .zip(x_tail.slice(s![kx..p; -1]).iter())
            .map(|(a, x)| a * x * x)
            .sum();

        let kv = i.min(q);
        let garch_fc = beta.slice(s![..kv]).dot(&out.slice(s![i - kv..i; -1]));
        let garch_obs = beta.slice(s![kv..]).dot(&v_tail.slice(s![kv..q; -1]));

        let value = params.omega + arch_fc + arch_obs + garch_fc + garch_obs;
        if !(value > 0.0 && value.is_finite()) {
            return Err(GarchError::NumericalDomain { t: i, value });
        }
        out[i] = value;
    }
    Ok(out)
}

/// Volatility forecasts from observed state given on the stdev scale.
///
/// Thin wrapper over [`forecast_recursion`] that squares `sigma_lags` and
/// takes square roots of the output.
pub fn forecast_volatility(
    params: &GarchParams, return_lags: ArrayView1<f64>, sigma_lags: ArrayView1<f64>,
    horizon: usize,
) -> GarchResult<ForecastResult> {
    let variance_lags = sigma_lags.mapv(|s| s * s);
    let variances = forecast_recursion(params, return_lags, variance_lags.view(), horizon)?;
    Ok(ForecastResult::from_variances(variances))
}
