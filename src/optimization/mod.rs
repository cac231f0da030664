//! optimization — MLE stack, numerical helpers, and the optimizer error surface.
//!
//! Purpose
//! -------
//! Fit models by maximizing a log-likelihood without the model layer touching
//! solver details: an argmin-backed L-BFGS maximizer (`loglik_optimizer`),
//! stable reparametrization transforms (`numerical_stability`), and one error
//! enum (`errors::OptError`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Solvers run in an unconstrained θ-space; positivity and stationarity of
//!   model parameters are guaranteed by the θ → model mapping, not by solver
//!   bounds.
//! - Domain failures met during a run (non-positive variances, non-finite
//!   likelihoods) are errors, never silently repaired.
//!
//! Conventions
//! -----------
//! - Solvers maximize `ℓ(θ)` by minimizing `c(θ) = -ℓ(θ)`; every reported
//!   value is a log-likelihood.
//! - Progress is reported through `tracing` events (`debug`/`trace`) and,
//!   with the `obs_slog` feature, an argmin slog observer.
//!
//! Downstream usage
//! ----------------
//! - `garch::models` implements `LogLikelihood` for `GarchModel` and calls
//!   `maximize`.
//! - `inference` reuses `loglik_optimizer::finite_diff::compute_hessian`.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use garch_volatility::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
