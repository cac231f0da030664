//! models — user-facing GARCH(p, q) estimation and forecasting.
//!
//! Purpose
//! -------
//! Wire the numerics in `garch::core` to the generic log-likelihood
//! optimizer: [`GarchModel`] implements [`LogLikelihood`], [`fit`] /
//! [`fit_with_options`] run the estimator, and [`forecast`] issues
//! multi-step volatility forecasts from a [`FitResult`].
//!
//! Invariants & assumptions
//! ------------------------
//! - θ always has length `1 + p + q` with finite entries; this is enforced
//!   by `LogLikelihood::check` via `garch::core::validation::validate_theta`.
//! - Every θ maps to a strictly stationary `(ω, α, β)`; the likelihood is
//!   never evaluated outside the stationary region.
//! - Scratch buffers are single-owner and not thread-safe; concurrent use of
//!   one [`GarchModel`] is not supported.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`garch`] cover the analytic gradient, parameter recovery,
//!   start-value policies, convergence classification, and forecasts.
//! - Unit tests in [`model_internals`] cover the Gaussian log-likelihood and
//!   the model-space gradient used for standard errors.
//!
//! [`LogLikelihood`]: crate::optimization::loglik_optimizer::LogLikelihood

pub mod garch;
pub mod model_internals;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::garch::{fit, fit_with_options, forecast, FitResult, GarchModel};
pub use self::model_internals::{gaussian_loglik, model_space_gradient};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::garch::{fit, fit_with_options, forecast, FitResult, GarchModel};
}
