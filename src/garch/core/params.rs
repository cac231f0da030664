//! GARCH(p, q) parameterization and scratch workspace.
//!
//! This module provides the **model-space** parameter container
//! [`GarchParams`] and the reusable buffers [`GarchScratch`] used by the
//! likelihood and gradient routines. It also implements the numerically
//! stable mapping between model space and the **optimizer-space** vector θ.
//!
//! ## Mapping conventions
//! - Layout: `θ = [θ₀ | α(1..p) | β(1..q)]`.
//! - `θ₀ = softplus⁻¹(ω)` ensures `ω > 0`.
//! - `(α, β, slack)` live on a scaled simplex of total mass `1 − margin`;
//!   the α/β slots store log-odds relative to slack (the softmax baseline).
//!   Every finite θ therefore maps to a strictly stationary parameter set.
//!
//! ## What is validated where
//! - [`GarchParams::new`] checks coordinate domains only (`ω > 0`, `α, β ≥ 0`).
//!   Stationarity is a property checked by the operations that need it
//!   (estimation start values, recursions, forecasts), because simulation is
//!   allowed to run a unit-persistence process.
//! - [`GarchParams::to_theta`] requires `Σα + Σβ < 1`.
//!
//! ## Scratch buffers (sizes, with `m = max(p, q)`)
//! - `alpha_buf`: length `p`
//! - `beta_buf`: length `q`
//! - `sigma2_buf`: length `n + m` (first `m` entries are pre-sample)
//! - `deriv_buf`: shape `(n + m, 1 + p + q)`
use crate::{
    garch::{
        core::{
            shape::GarchOrder,
            validation::{
                validate_alpha, validate_alpha_beta_lengths, validate_beta, validate_omega,
                validate_stationarity, validate_stationarity_and_slack, validate_theta,
            },
        },
        errors::{GarchResult, ParamResult},
    },
    optimization::numerical_stability::transformations::{
        safe_softmax, safe_softplus, safe_softplus_inv, LOGIT_EPS, STATIONARITY_MARGIN,
    },
};
use ndarray::{s, Array1, Array2, ArrayView1, Zip};
use std::cell::RefCell;

/// Reusable buffers for GARCH likelihood and gradient evaluation.
///
/// Sized once from the sample length and model order so inner loops of the
/// optimizer run allocation-free. Zero-initialized at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct GarchScratch {
    /// Scratch buffer for α.
    pub alpha_buf: RefCell<Array1<f64>>,
    /// Scratch buffer for β.
    pub beta_buf: RefCell<Array1<f64>>,
    /// Conditional variances, pre-sample slots first.
    pub sigma2_buf: RefCell<Array1<f64>>,
    /// ∂σ²/∂(ω, α, β), one row per entry of `sigma2_buf`.
    pub deriv_buf: RefCell<Array2<f64>>,
}

impl GarchScratch {
    pub fn new(n: usize, order: &GarchOrder) -> GarchScratch {
        let m = order.lag_order();
        let alpha_buf = RefCell::new(Array1::zeros(order.p));
        let beta_buf = RefCell::new(Array1::zeros(order.q));
        let sigma2_buf = RefCell::new(Array1::zeros(n + m));
        let deriv_buf = RefCell::new(Array2::zeros((n + m, order.n_params())));
        GarchScratch { alpha_buf, beta_buf, sigma2_buf, deriv_buf }
    }

    /// Re-size the series-length buffers for a sample of length `n`.
    /// No-op when the sizes already match.
    pub fn ensure_len(&self, n: usize, order: &GarchOrder) {
        let m = order.lag_order();
        if self.sigma2_buf.borrow().len() != n + m {
            *self.sigma2_buf.borrow_mut() = Array1::zeros(n + m);
            *self.deriv_buf.borrow_mut() = Array2::zeros((n + m, order.n_params()));
        }
    }

    /// `true` iff the buffers fit a sample of length `n`.
    pub fn fits(&self, n: usize, order: &GarchOrder) -> bool {
        let m = order.lag_order();
        self.sigma2_buf.borrow().len() == n + m && self.deriv_buf.borrow().nrows() == n + m
    }
}

/// Model-space parameters `(ω, α₁..α_p, β₁..β_q)` of a GARCH(p, q) process.
///
/// `alpha[i]` multiplies the squared return at lag `i + 1`; `beta[j]`
/// multiplies the conditional variance at lag `j + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct GarchParams {
    /// ω > 0
    pub omega: f64,
    /// αᵢ ≥ 0
    pub alpha: Array1<f64>,
    /// βⱼ ≥ 0
    pub beta: Array1<f64>,
}

impl GarchParams {
    /// Create parameters with validated coordinate domains.
    ///
    /// Stationarity is **not** required here; see the module docs.
    pub fn new(omega: f64, alpha: Array1<f64>, beta: Array1<f64>) -> ParamResult<Self> {
        validate_omega(omega)?;
        validate_alpha(alpha.view(), alpha.len())?;
        validate_beta(beta.view(), beta.len())?;
        Ok(GarchParams { omega, alpha, beta })
    }

    /// Model order implied by the coefficient vectors.
    pub fn order(&self) -> GarchResult<GarchOrder> {
        GarchOrder::new(self.alpha.len(), self.beta.len())
    }

    /// Check that the coefficient lengths match `order`.
    pub fn check_order(&self, order: &GarchOrder) -> ParamResult<()> {
        validate_alpha_beta_lengths(self.alpha.view(), self.beta.view(), order)
    }

    /// Persistence `Σα + Σβ`.
    pub fn persistence(&self) -> f64 {
        self.alpha.sum() + self.beta.sum()
    }

    /// `true` iff `Σα + Σβ < 1`.
    pub fn is_stationary(&self) -> bool {
        validate_stationarity(self.alpha.view(), self.beta.view()).is_ok()
    }

    /// Unconditional variance `ω / (1 − Σα − Σβ)`.
    ///
    /// # Errors
    /// - `GarchError::NonStationaryParameters` if `Σα + Σβ >= 1`.
    pub fn uncond_variance(&self) -> GarchResult<f64> {
        validate_stationarity(self.alpha.view(), self.beta.view())?;
        Ok(self.omega / (1.0 - self.persistence()))
    }

    /// Unconditional volatility `sqrt(ω / (1 − Σα − Σβ))`, the level
    /// long-horizon forecasts revert to.
    pub fn uncond_stdev(&self) -> GarchResult<f64> {
        Ok(self.uncond_variance()?.sqrt())
    }

    /// Build validated parameters from an optimizer-space vector θ.
    ///
    /// 1. `ω = softplus(θ₀)`.
    /// 2. Max-shift softmax on `θ[1..]` yields `(α, β, slack)` on the scaled
    ///    simplex.
    /// 3. Domains and the mass identity are re-validated.
    pub fn from_theta(theta: ArrayView1<f64>, order: &GarchOrder) -> ParamResult<Self> {
        validate_theta(theta, order)?;
        let mut alpha = Array1::zeros(order.p);
        let mut beta = Array1::zeros(order.q);
        let omega = safe_softplus(theta[0]);
        validate_omega(omega)?;
        let slack = safe_softmax(alpha.view_mut(), beta.view_mut(), &theta.slice(s![1..]));
        validate_alpha(alpha.view(), order.p)?;
        validate_beta(beta.view(), order.q)?;
        validate_stationarity_and_slack(alpha.view(), beta.view(), slack)?;
        Ok(GarchParams { omega, alpha, beta })
    }

    /// Map to optimizer space.
    ///
    /// Normalized weights `π = w / (1 − margin)` are clamped below at
    /// `LOGIT_EPS` before taking logs, so zero coefficients and a persistence
    /// within the margin of one still map to finite θ.
    ///
    /// # Errors
    /// - `ParamError::StationarityViolated` if `Σα + Σβ >= 1`.
    pub fn to_theta(&self) -> ParamResult<Array1<f64>> {
        validate_stationarity(self.alpha.view(), self.beta.view())?;
        let p = self.alpha.len();
        let q = self.beta.len();
        let scale_inv = 1.0 / (1.0 - STATIONARITY_MARGIN);
        let slack = 1.0 - STATIONARITY_MARGIN - self.persistence();
        let log_slack = (slack * scale_inv).max(LOGIT_EPS).ln();

        let mut theta = Array1::zeros(1 + p + q);
        theta[0] = safe_softplus_inv(self.omega);
        Zip::from(theta.slice_mut(s![1..1 + p]))
            .and(&self.alpha)
            .for_each(|t, &a| *t = (a * scale_inv).max(LOGIT_EPS).ln() - log_slack);
        Zip::from(theta.slice_mut(s![1 + p..]))
            .and(&self.beta)
            .for_each(|t, &b| *t = (b * scale_inv).max(LOGIT_EPS).ln() - log_slack);
        Ok(theta)
    }
}
