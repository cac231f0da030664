//! ProcessSimulator — synthetic GARCH(p, q) returns with their true
//! volatility path.
//!
//! The simulator is a pure function of the Gaussian source it is handed:
//! - `m = max(p, q)` lagged returns are seeded with standard normal draws and
//!   `m` lagged volatilities with `1.0`;
//! - for `t = 0..n`: `v²_t = ω + Σ αᵢ x²_{t−i} + Σ βⱼ v²_{t−j}` and
//!   `x_t = z_t · v_t` with a fresh draw `z_t`.
//!
//! Lags live in two arrays of length `n + m` and are read by position as
//! reversed windows, so no state survives between calls.
//!
//! Stationarity is not required here: an integrated process
//! (`Σα + Σβ = 1`) is a legitimate simulation target.
use crate::garch::{
    core::{
        data::ReturnSeries, options::SimOpts, params::GarchParams, variance::VarianceSeries,
    },
    errors::{GarchError, GarchResult},
};
use ndarray::{s, Array1};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};
use tracing::debug;

/// Source of independent standard normal draws.
///
/// Every [`rand::Rng`] is a source through [`StandardNormal`]; tests can
/// supply scripted draws.
pub trait GaussianSource {
    fn gaussian(&mut self) -> f64;
}

impl<R: Rng + ?Sized> GaussianSource for R {
    fn gaussian(&mut self) -> f64 {
        StandardNormal.sample(self)
    }
}

/// Simulate `n` returns from a GARCH(p, q) with parameters `params`.
///
/// Returns the series `x_0..x_{n−1}` and the volatility path with its `m`
/// pre-sample slots (length `n + m`, `sigma[..m] = 1.0`).
///
/// # Errors
/// - [`GarchError::InvalidSimulationLength`] if `n == 0`.
/// - [`GarchError::NumericalDomain`] if a variance step is non-positive or
///   non-finite (`t` is the in-sample index).
pub fn simulate<G>(
    params: &GarchParams, n: usize, gaussian: &mut G,
) -> GarchResult<(ReturnSeries, VarianceSeries)>
where
    G: GaussianSource + ?Sized,
{
    if n == 0 {
        return Err(GarchError::InvalidSimulationLength { n });
    }
    let p = params.alpha.len();
    let q = params.beta.len();
    let m = p.max(q);

    let mut x = Array1::<f64>::zeros(n + m);
    let mut v2 = Array1::<f64>::ones(n + m);
    for slot in x.slice_mut(s![..m]).iter_mut() {
        *slot = gaussian.gaussian();
    }

    for t in m..n + m {
        let arch: f64 = params
            .alpha
            .iter()
            .zip(x.slice(s![t - p..t; -1]).iter())
            .map(|(a, xi)| a * xi * xi)
            .sum();
        let garch: f64 =
            params.beta.iter().zip(v2.slice(s![t - q..t; -1]).iter()).map(|(b, h)| b * h).sum();
        let radicand = params.omega + arch + garch;
        if !radicand.is_finite() || radicand <= 0.0 {
            return Err(GarchError::NumericalDomain { t: t - m, value: radicand });
        }
        v2[t] = radicand;
        x[t] = gaussian.gaussian() * radicand.sqrt();
    }

    let returns = ReturnSeries::new(x.slice(s![m..]).to_owned())?;
    let variance = VarianceSeries { sigma: v2.mapv(f64::sqrt), lag_order: m };
    Ok((returns, variance))
}

/// [`simulate`] with a `StdRng` built from `opts.seed` (OS entropy when
/// `None`).
pub fn simulate_with_opts(
    params: &GarchParams, n: usize, opts: &SimOpts,
) -> GarchResult<(ReturnSeries, VarianceSeries)> {
    let mut rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    debug!(n, seed = ?opts.seed, persistence = params.persistence(), "simulating GARCH path");
    simulate(params, n, &mut rng)
}
