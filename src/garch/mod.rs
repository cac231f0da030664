//! garch — GARCH(p, q) stack: core numerics, estimation, forecasting,
//! simulation, and the rolling engine.
//!
//! Purpose
//! -------
//! Bundle everything needed to simulate a GARCH(p, q) process, fit it by
//! Gaussian maximum likelihood, and forecast its conditional volatility,
//! either once over many steps or one step at a time with re-estimation.
//!
//! Key behaviors
//! -------------
//! - [`core`]: return containers, parameters, the variance and forecast
//!   recursions, start-value policies, validation, and workspaces.
//! - [`models`]: [`GarchModel`] (the `LogLikelihood` implementation), [`fit`],
//!   [`fit_with_options`], and [`forecast`].
//! - [`simulation`]: [`simulate`] against any [`GaussianSource`].
//! - [`rolling`]: [`rolling_forecast`], parallel over iterations with rayon.
//! - [`study`]: the end-to-end experiment feeding a [`ChartSink`].
//! - [`errors`]: [`GarchError`] / [`ParamError`] and their result aliases.
//!
//! Invariants & assumptions
//! ------------------------
//! - `p >= 1`; `q = 0` gives ARCH(p).
//! - Estimation and forecasting require `Σα + Σβ < 1`; simulation does not.
//! - Every variance step is finite and strictly positive, or the operation
//!   fails with [`GarchError::NumericalDomain`].
//!
//! Conventions
//! -----------
//! - Series store the oldest value at index 0. Variance buffers carry
//!   `max(p, q)` pre-sample slots before the in-sample values.
//! - Public volatility outputs are on the standard-deviation scale.
//! - Fits log through `tracing` at `debug`, rolling runs at `info`; no
//!   subscriber is installed here.

pub mod core;
pub mod errors;
pub mod models;
pub mod rolling;
pub mod simulation;
pub mod study;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    ForecastResult, GarchOptions, GarchOrder, GarchParams, Init, ReturnSeries, SimOpts,
    VarianceSeries,
};
pub use self::errors::{GarchError, GarchResult, ParamError, ParamResult};
pub use self::models::{fit, fit_with_options, forecast, FitResult, GarchModel};
pub use self::rolling::{rolling_forecast, rolling_forecast_with_options, RollingOptions};
pub use self::simulation::{simulate, simulate_with_opts, GaussianSource};
pub use self::study::{run_study, ChartSink, StudyConfig, StudySeries};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use garch_volatility::garch::prelude::*;
//
// to import the main GARCH surface in a single line.

pub mod prelude {
    pub use super::{
        fit, fit_with_options, forecast, rolling_forecast, simulate, simulate_with_opts,
        FitResult, ForecastResult, GarchError, GarchModel, GarchOptions, GarchOrder,
        GarchParams, GarchResult, GaussianSource, Init, ReturnSeries, RollingOptions, SimOpts,
        VarianceSeries,
    };
}
