//! loglik_optimizer — argmin-powered log-likelihood maximizer.
//!
//! Purpose
//! -------
//! Maximize a model's log-likelihood `ℓ(θ)` over an unconstrained parameter
//! vector with L-BFGS. Models implement [`LogLikelihood`] and call
//! [`maximize`]; everything argmin-specific stays inside this module.
//!
//! Key behaviors
//! -------------
//! - [`adapter::ArgMinAdapter`] turns `ℓ(θ)` into the argmin cost
//!   `c(θ) = -ℓ(θ)`, negating analytic gradients or finite-differencing the
//!   cost when a model provides none.
//! - [`maximize`] validates the start with [`LogLikelihood::check`], picks
//!   the solver from [`traits::LineSearcher`] via [`builders`], runs it with
//!   [`run::run_lbfgs`], and normalizes the result into an [`OptimOutcome`].
//! - [`finite_diff`] supplies validated finite-difference gradients and
//!   Hessians (the latter also used by `inference`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Models implement `ℓ(θ)` and `∇ℓ(θ)`, never the cost.
//! - `value` / `grad` report invalid inputs as [`OptError`] values; errors
//!   raised mid-run travel through argmin and are recovered by
//!   `From<argmin::core::Error> for OptError`.
//! - [`OptimOutcome::converged`] is `true` only when a tolerance stopped the
//!   run; exhausting `max_iter` is reported, not hidden.
//!
//! Conventions
//! -----------
//! - θ lives in unconstrained optimizer space; the model layer owns the
//!   mapping to constrained parameters.
//! - Reported values ([`OptimOutcome::value`]) are log-likelihoods, not costs.
//!
//! Testing notes
//! -------------
//! - Unit tests cover sign handling in [`adapter`], solver construction in
//!   [`builders`], finite differences, validation, and outcome
//!   classification; [`api`] tests run full solves on a concave quadratic.
//! - The GARCH estimator exercises the whole stack on simulated data.
//!
//! [`OptError`]: crate::optimization::errors::OptError

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::maximize;
pub use self::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, FnEvalMap, Grad, Theta, DEFAULT_LBFGS_MEM};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use garch_volatility::optimization::loglik_optimizer::prelude::*;
//
// to import the main optimizer surface in a single line.

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
