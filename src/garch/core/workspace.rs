//! GARCH parameter workspace — zero-copy buffer for ω, α, β, and slack.
//!
//! Purpose
//! -------
//! Provide a mutable workspace for GARCH(p, q) parameters during
//! optimization. The workspace borrows caller-owned α/β buffers (normally the
//! ones in [`GarchScratch`](super::params::GarchScratch)) and maps the
//! unconstrained vector θ onto `(ω, α, β, slack)` without allocating.
//!
//! Invariants & assumptions
//! ------------------------
//! - After a successful [`WorkSpace::update`]:
//!   - `alpha.len() == p`, `beta.len() == q`,
//!   - all α/β coordinates are finite and non-negative,
//!   - `ω` is finite and strictly positive, and
//!   - `sum(α) + sum(β) + slack ≈ 1 − STATIONARITY_MARGIN`.
//! - θ must have length `1 + p + q`.
//!
//! Conventions
//! -----------
//! - Validation is delegated to `garch::core::validation`; nothing here
//!   panics on invalid inputs and nothing logs.
use crate::{
    garch::{
        core::{
            shape::GarchOrder,
            validation::{
                validate_alpha, validate_alpha_beta_lengths, validate_beta, validate_omega,
                validate_stationarity_and_slack, validate_theta,
            },
        },
        errors::ParamResult,
    },
    optimization::numerical_stability::transformations::{safe_softmax, safe_softplus},
};
use ndarray::{s, ArrayView1, ArrayViewMut1};

/// Zero-copy view of GARCH(p, q) parameters for one optimizer step.
///
/// The lifetime `'a` ties the workspace to the caller-owned α/β buffers.
#[derive(Debug)]
pub struct WorkSpace<'a> {
    pub alpha: ArrayViewMut1<'a, f64>,
    pub beta: ArrayViewMut1<'a, f64>,
    pub omega: f64,
    pub slack: f64,
    order: GarchOrder,
}

impl<'a> WorkSpace<'a> {
    /// Wrap caller-owned buffers. Only lengths are validated; `omega` and
    /// `slack` start at `0.0` until [`WorkSpace::update`] runs.
    ///
    /// # Errors
    /// - `ParamError::AlphaLengthMismatch` / `ParamError::BetaLengthMismatch`.
    pub fn new(
        alpha: ArrayViewMut1<'a, f64>, beta: ArrayViewMut1<'a, f64>, order: &GarchOrder,
    ) -> ParamResult<Self> {
        validate_alpha_beta_lengths(alpha.view(), beta.view(), order)?;
        Ok(WorkSpace { alpha, beta, omega: 0.0, slack: 0.0, order: *order })
    }

    /// Overwrite the workspace from θ.
    ///
    /// - `omega = safe_softplus(θ₀)`
    /// - `(alpha, beta, slack) = safe_softmax(θ[1..])`
    ///
    /// # Errors
    /// - `ParamError::ThetaLengthMismatch` / `ParamError::InvalidThetaInput`
    ///   for malformed θ.
    /// - Domain or mass-identity violations after mapping (numerically
    ///   unexpected, but surfaced rather than ignored).
    pub fn update(&mut self, theta: ArrayView1<f64>) -> ParamResult<()> {
        validate_theta(theta, &self.order)?;
        let omega = safe_softplus(theta[0]);
        validate_omega(omega)?;
        self.omega = omega;
        self.slack =
            safe_softmax(self.alpha.view_mut(), self.beta.view_mut(), &theta.slice(s![1..]));
        validate_alpha(self.alpha.view(), self.order.p)?;
        validate_beta(self.beta.view(), self.order.q)?;
        validate_stationarity_and_slack(self.alpha.view(), self.beta.view(), self.slack)?;
        Ok(())
    }

    /// Unconditional variance `ω / (1 − Σα − Σβ)` of the current parameters.
    ///
    /// The denominator equals `slack + STATIONARITY_MARGIN > 0` after a
    /// successful update.
    pub fn uncond_variance(&self) -> f64 {
        self.omega / (1.0 - self.alpha.sum() - self.beta.sum())
    }
}
