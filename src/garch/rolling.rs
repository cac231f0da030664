//! RollingForecastEngine — one-step-ahead forecasts with re-estimation after
//! every new observation.
//!
//! For a series of length `N` and a test window of length `k`, iteration `i`
//! fits on the prefix `x_0..x_{N−k+i−1}` and forecasts one step, which is the
//! forecast for `x_{N−k+i}`. Iterations share nothing, so they run as a rayon
//! parallel map by default; results are collected in index order.
use crate::garch::{
    core::{
        data::ReturnSeries, forecasts::ForecastResult, options::GarchOptions, shape::GarchOrder,
    },
    errors::{GarchError, GarchResult},
    models::garch::fit_with_options,
};
use ndarray::Array1;
use rayon::prelude::*;
use tracing::{debug, info};

/// Rolling-run configuration.
///
/// Default: parallel execution with [`GarchOptions::default`] for every fit.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingOptions {
    /// Run the iterations on the rayon pool instead of sequentially.
    pub parallel: bool,
    /// Options handed to each fit.
    pub estimation: GarchOptions,
}

impl RollingOptions {
    pub fn new(parallel: bool, estimation: GarchOptions) -> Self {
        RollingOptions { parallel, estimation }
    }
}

impl Default for RollingOptions {
    fn default() -> Self {
        RollingOptions { parallel: true, estimation: GarchOptions::default() }
    }
}

/// Rolling one-step forecasts over the last `test_length` observations with
/// default options.
pub fn rolling_forecast(
    order: &GarchOrder, full_returns: &ReturnSeries, test_length: usize,
) -> GarchResult<ForecastResult> {
    rolling_forecast_with_options(order, full_returns, test_length, &RollingOptions::default())
}

/// Rolling one-step forecasts with explicit options.
///
/// Output slot `i` is the volatility forecast for `x_{N−k+i}` made from a
/// model fitted on everything before it.
///
/// # Errors
/// - [`GarchError::InvalidTestLength`] if `test_length == 0` or
///   `test_length >= N`.
/// - The error of the failing iteration with the lowest index, if any fails;
///   no partial output is returned.
pub fn rolling_forecast_with_options(
    order: &GarchOrder, full_returns: &ReturnSeries, test_length: usize, opts: &RollingOptions,
) -> GarchResult<ForecastResult> {
    let n = full_returns.len();
    if test_length == 0 || test_length >= n {
        return Err(GarchError::InvalidTestLength { test_length, len: n });
    }
    let first_train = n - test_length;
    info!(
        p = order.p,
        q = order.q,
        n,
        test_length,
        parallel = opts.parallel,
        "starting rolling forecast"
    );

    let step = |i: usize| -> GarchResult<f64> {
        let train = full_returns.prefix(first_train + i)?;
        let fitted = fit_with_options(order, &train, &opts.estimation)?;
        let next = fitted.forecast(1)?;
        debug!(step = i, train_len = train.len(), sigma = next.sigma[0], "rolling step");
        Ok(next.sigma[0])
    };

    let results: Vec<GarchResult<f64>> = if opts.parallel {
        (0..test_length).into_par_iter().map(step).collect()
    } else {
        (0..test_length).map(step).collect()
    };

    let sigma = results.into_iter().collect::<GarchResult<Vec<f64>>>()?;
    info!(test_length, "rolling forecast complete");
    Ok(ForecastResult { sigma: Array1::from(sigma) })
}
