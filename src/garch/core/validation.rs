//! GARCH validation helpers — reusable checks for parameters, data, and lags.
//!
//! Purpose
//! -------
//! Centralize small validation routines used across the GARCH stack so that
//! constructors, recursions, and the optimizer adapter fail fast with
//! structured errors instead of producing NaN downstream.
//!
//! Invariants & assumptions
//! ------------------------
//! - ω must be finite and strictly positive; α and β coordinates must be
//!   finite and non-negative.
//! - Covariance stationarity means `sum(α) + sum(β) < 1`. Inside the optimizer
//!   the stronger identity `sum(α) + sum(β) + slack = 1 − STATIONARITY_MARGIN`
//!   holds by construction and is re-checked here within `SUM_TOL`.
//! - Order convention: `p` = number of α terms (squared-return lags), `q` =
//!   number of β terms (variance lags).
//!
//! Conventions
//! -----------
//! - Functions return [`ParamResult`] or [`GarchResult`] and never panic on
//!   invalid inputs.
//! - No I/O and no logging.
use crate::{
    garch::{
        core::shape::GarchOrder,
        errors::{GarchError, GarchResult, ParamError, ParamResult},
    },
    optimization::numerical_stability::transformations::STATIONARITY_MARGIN,
};
use ndarray::ArrayView1;

/// Tolerance for the softmax mass identity checked by
/// [`validate_stationarity_and_slack`].
const SUM_TOL: f64 = 1e-10;

/// Validate ω (finite, strictly positive).
///
/// # Errors
/// - [`ParamError::InvalidOmega`] otherwise.
pub fn validate_omega(omega: f64) -> ParamResult<()> {
    if omega <= 0.0 || !omega.is_finite() {
        return Err(ParamError::InvalidOmega { value: omega });
    }
    Ok(())
}

/// Validate the α vector (squared-return lags, length `p`).
///
/// # Errors
/// - [`ParamError::AlphaLengthMismatch`] if `alpha.len() != p`.
/// - [`ParamError::InvalidAlpha`] for the first entry that is NaN, ±∞, or < 0.
pub fn validate_alpha(alpha: ArrayView1<f64>, p: usize) -> ParamResult<()> {
    if alpha.len() != p {
        return Err(ParamError::AlphaLengthMismatch { expected: p, actual: alpha.len() });
    }
    if let Some((index, &value)) =
        alpha.iter().enumerate().find(|(_, v)| **v < 0.0 || !(**v).is_finite())
    {
        return Err(ParamError::InvalidAlpha { index, value });
    }
    Ok(())
}

/// Validate the β vector (variance lags, length `q`).
///
/// # Errors
/// - [`ParamError::BetaLengthMismatch`] if `beta.len() != q`.
/// - [`ParamError::InvalidBeta`] for the first entry that is NaN, ±∞, or < 0.
pub fn validate_beta(beta: ArrayView1<f64>, q: usize) -> ParamResult<()> {
    if beta.len() != q {
        return Err(ParamError::BetaLengthMismatch { expected: q, actual: beta.len() });
    }
    if let Some((index, &value)) =
        beta.iter().enumerate().find(|(_, v)| **v < 0.0 || !(**v).is_finite())
    {
        return Err(ParamError::InvalidBeta { index, value });
    }
    Ok(())
}

/// Validate that α/β buffers match a model order.
pub fn validate_alpha_beta_lengths(
    alpha: ArrayView1<f64>, beta: ArrayView1<f64>, order: &GarchOrder,
) -> ParamResult<()> {
    if alpha.len() != order.p {
        return Err(ParamError::AlphaLengthMismatch { expected: order.p, actual: alpha.len() });
    }
    if beta.len() != order.q {
        return Err(ParamError::BetaLengthMismatch { expected: order.q, actual: beta.len() });
    }
    Ok(())
}

/// Strict covariance stationarity: `sum(α) + sum(β) < 1`.
///
/// # Errors
/// - [`ParamError::StationarityViolated`] carrying the coefficient sum.
pub fn validate_stationarity(alpha: ArrayView1<f64>, beta: ArrayView1<f64>) -> ParamResult<()> {
    let coeff_sum = alpha.sum() + beta.sum();
    if !(coeff_sum < 1.0) {
        return Err(ParamError::StationarityViolated { coeff_sum });
    }
    Ok(())
}

/// Check the softmax mass identity
/// `sum(α) + sum(β) + slack = 1 − STATIONARITY_MARGIN` (within `SUM_TOL`).
///
/// # Errors
/// - [`ParamError::InvalidSlack`] if `slack` is negative or non-finite.
/// - [`ParamError::StationarityViolated`] if the identity fails.
pub fn validate_stationarity_and_slack(
    alpha: ArrayView1<f64>, beta: ArrayView1<f64>, slack: f64,
) -> ParamResult<()> {
    if !(slack >= 0.0 && slack.is_finite()) {
        return Err(ParamError::InvalidSlack { value: slack });
    }
    let coeff_sum = alpha.sum() + beta.sum();
    let target = 1.0 - STATIONARITY_MARGIN;
    if (coeff_sum + slack - target).abs() > SUM_TOL {
        return Err(ParamError::StationarityViolated { coeff_sum });
    }
    Ok(())
}

/// Validate unconstrained optimizer parameters θ: length `1 + p + q`, finite.
///
/// Only shape and finiteness are checked; any finite θ maps to a valid
/// stationary parameter set.
pub fn validate_theta(theta: ArrayView1<f64>, order: &GarchOrder) -> ParamResult<()> {
    let expected = order.n_params();
    if theta.len() != expected {
        return Err(ParamError::ThetaLengthMismatch { expected, actual: theta.len() });
    }
    for (index, &value) in theta.iter().enumerate() {
        if !value.is_finite() {
            return Err(ParamError::InvalidThetaInput { index, value });
        }
    }
    Ok(())
}

/// Validate a forecast horizon (`h >= 1`).
pub fn validate_horizon(horizon: usize) -> GarchResult<()> {
    if horizon == 0 {
        return Err(GarchError::InvalidHorizon { horizon });
    }
    Ok(())
}

/// Check that a lag buffer holds at least `required` values.
pub fn validate_history(available: usize, required: usize) -> GarchResult<()> {
    if available < required {
        return Err(GarchError::InsufficientHistory { required, available });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover domain checks for ω, α, β, θ, the stationarity
    // boundary, and the softmax mass identity. Recursion-level guards are
    // tested with the recursions themselves.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // ω must be strictly positive and finite.
    //
    // Given
    // -----
    // - ω ∈ {0.5, 0.0, NaN}.
    //
    // Expect
    // ------
    // - Ok for 0.5, `InvalidOmega` otherwise.
    fn validate_omega_rejects_zero_and_nan() {
        assert!(validate_omega(0.5).is_ok());
        assert!(matches!(validate_omega(0.0), Err(ParamError::InvalidOmega { .. })));
        assert!(matches!(validate_omega(f64::NAN), Err(ParamError::InvalidOmega { .. })));
    }

    #[test]
    // Purpose
    // -------
    // α/β validators report the offending index and length mismatches.
    //
    // Given
    // -----
    // - α = [0.1, -0.2] with p = 2, and β = [0.3] with q = 2.
    //
    // Expect
    // ------
    // - `InvalidAlpha { index: 1, .. }` and `BetaLengthMismatch { expected: 2, actual: 1 }`.
    fn coefficient_validators_locate_the_violation() {
        let alpha = array![0.1, -0.2];
        let beta = array![0.3];

        assert!(matches!(
            validate_alpha(alpha.view(), 2),
            Err(ParamError::InvalidAlpha { index: 1, .. })
        ));
        assert_eq!(
            validate_beta(beta.view(), 2),
            Err(ParamError::BetaLengthMismatch { expected: 2, actual: 1 })
        );
    }

    #[test]
    // Purpose
    // -------
    // The stationarity boundary itself (sum exactly one) is rejected.
    //
    // Given
    // -----
    // - α = [0.1, 0.2], β = [0.3, 0.4] (sum = 1.0) and β = [0.3, 0.3].
    //
    // Expect
    // ------
    // - `StationarityViolated { coeff_sum: 1.0 }` for the first; Ok for the second.
    fn validate_stationarity_rejects_unit_persistence() {
        let alpha = array![0.1, 0.2];
        let unit = array![0.3, 0.4];
        let fine = array![0.3, 0.3];

        assert!(matches!(
            validate_stationarity(alpha.view(), unit.view()),
            Err(ParamError::StationarityViolated { .. })
        ));
        assert!(validate_stationarity(alpha.view(), fine.view()).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // The softmax mass identity is enforced with a tight tolerance.
    //
    // Given
    // -----
    // - α = [0.2], β = [0.3], with the exact slack and a slack off by 1e-6.
    //
    // Expect
    // ------
    // - Ok for the exact slack, `StationarityViolated` for the perturbed one,
    //   and `InvalidSlack` for a negative slack.
    fn validate_stationarity_and_slack_checks_mass() {
        let alpha = array![0.2];
        let beta = array![0.3];
        let slack = 1.0 - STATIONARITY_MARGIN - 0.5;

        assert!(validate_stationarity_and_slack(alpha.view(), beta.view(), slack).is_ok());
        assert!(matches!(
            validate_stationarity_and_slack(alpha.view(), beta.view(), slack + 1e-6),
            Err(ParamError::StationarityViolated { .. })
        ));
        assert!(matches!(
            validate_stationarity_and_slack(alpha.view(), beta.view(), -0.1),
            Err(ParamError::InvalidSlack { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // θ must have length `1 + p + q` and finite entries.
    //
    // Given
    // -----
    // - GARCH(1, 1) with θ of length 2 and θ containing +∞.
    //
    // Expect
    // ------
    // - `ThetaLengthMismatch` and `InvalidThetaInput { index: 2, .. }`.
    fn validate_theta_checks_length_and_finiteness() {
        let order = GarchOrder::new(1, 1).expect("valid order");

        assert_eq!(
            validate_theta(array![0.0, 1.0].view(), &order),
            Err(ParamError::ThetaLengthMismatch { expected: 3, actual: 2 })
        );
        assert!(matches!(
            validate_theta(array![0.0, 1.0, f64::INFINITY].view(), &order),
            Err(ParamError::InvalidThetaInput { index: 2, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Horizon and history guards map to their dedicated errors.
    //
    // Given
    // -----
    // - Horizon 0; history of 1 value where 2 are required.
    //
    // Expect
    // ------
    // - `InvalidHorizon` and `InsufficientHistory`.
    fn horizon_and_history_guards() {
        assert_eq!(validate_horizon(0), Err(GarchError::InvalidHorizon { horizon: 0 }));
        assert!(validate_horizon(1).is_ok());
        assert_eq!(
            validate_history(1, 2),
            Err(GarchError::InsufficientHistory { required: 2, available: 1 })
        );
    }
}
