//! core — shared GARCH(p, q) data, parameters, and variance recursions.
//!
//! Purpose
//! -------
//! Collect the building blocks of GARCH(p, q) volatility models: the return
//! container, model order, parameter containers, the in-sample variance
//! recursion with its analytic derivatives, multi-step forecasting, start-value
//! policies, and validation helpers. The estimator, simulator, and rolling
//! engine build on top of these primitives.
//!
//! Invariants & assumptions
//! ------------------------
//! - Returns stored in [`ReturnSeries`] are finite and treated as zero-mean.
//! - Order convention: `p` counts α-lags on squared returns, `q` counts β-lags
//!   on conditional variances; `p >= 1`.
//! - Recursions are seeded with the unconditional variance and therefore need
//!   `Σα + Σβ < 1`; non-positive or non-finite steps are errors, never clamped.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based. Lag buffers store the newest value at the end;
//!   recursions read them as reversed tails.
//! - Variance buffers carry `m = max(p, q)` pre-sample slots before the
//!   in-sample values.
//! - Volatilities handed to callers ([`VarianceSeries`], [`ForecastResult`])
//!   are on the standard-deviation scale; internal buffers hold variances.
//! - No I/O and no logging at this layer.

pub mod data;
pub mod forecasts;
pub mod init;
pub mod options;
pub mod params;
pub mod shape;
pub mod validation;
pub mod variance;
pub mod workspace;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::ReturnSeries;
pub use self::forecasts::{forecast_recursion, forecast_volatility, ForecastResult};
pub use self::init::Init;
pub use self::options::{GarchOptions, SimOpts, DEFAULT_SEED};
pub use self::params::{GarchParams, GarchScratch};
pub use self::shape::GarchOrder;
pub use self::variance::{derivative_recursion, recurse, variance_recursion, VarianceSeries};
pub use self::workspace::WorkSpace;

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::data::ReturnSeries;
    pub use super::forecasts::ForecastResult;
    pub use super::init::Init;
    pub use super::options::{GarchOptions, SimOpts};
    pub use super::params::GarchParams;
    pub use super::shape::GarchOrder;
    pub use super::variance::{recurse, VarianceSeries};
}
