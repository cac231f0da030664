//! numerical_stability — numerically robust parameter transformations.
//!
//! Purpose
//! -------
//! Collect numerically stable scalar and vector transforms used to map the
//! unconstrained optimizer vector θ onto GARCH model-space parameters
//! `(ω, α, β)`. This module centralizes small numerical tolerances and
//! transform logic so the rest of the optimization and GARCH layers can
//! assume well-conditioned `f64` arithmetic.
//!
//! Key behaviors
//! -------------
//! - Provide stable scalar transforms (`safe_softplus`, its inverse, and
//!   `safe_logistic`) for mapping unconstrained reals into strictly
//!   positive parameters without overflow/underflow.
//! - Implement a stationarity-aware softmax mapping from logits to
//!   `(α, β)` plus slack (`safe_softmax`) together with a Jacobian–vector
//!   product helper (`safe_softmax_deriv`) for gradient propagation.
//! - Centralize small numeric tolerances (`STATIONARITY_MARGIN`,
//!   `LOGIT_EPS`, `EIGEN_EPS`) so downstream modules share consistent
//!   guards.
//!
//! Invariants & assumptions
//! ------------------------
//! - All public transforms assume finite `f64` inputs; domain and shape
//!   validation is enforced in the GARCH and optimizer layers, not here.
//! - Softmax helpers assume `alpha.len() + beta.len() == logits.len()`.
//! - `STATIONARITY_MARGIN` is a fixed global slack enforcing
//!   `sum(α) + sum(β) + slack = 1 − STATIONARITY_MARGIN`.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] cover round trips, mass
//!   conservation, and the softmax Jacobian against finite differences.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    safe_logistic, safe_softmax, safe_softmax_deriv, safe_softplus, safe_softplus_inv, EIGEN_EPS,
    LOGIT_EPS, STATIONARITY_MARGIN,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use garch_volatility::optimization::numerical_stability::prelude::*;
//
// to import the main numerical-stability surface in a single line.

pub mod prelude {
    pub use super::transformations::{
        safe_logistic, safe_softmax, safe_softplus, safe_softplus_inv, STATIONARITY_MARGIN,
    };
}
