//! GARCH(p, q) model internals — workspace wiring and likelihood pieces.
//!
//! Purpose
//! -------
//! Keep the low-level plumbing of [`GarchModel`] out of the user-facing model
//! file: binding θ into a [`WorkSpace`] over the model's scratch buffers, the
//! Gaussian log-likelihood of a variance path, its score in model space, and
//! an allocating model-space gradient used for standard errors.
//!
//! Conventions
//! -----------
//! - Variance slices passed here are **in-sample** (pre-sample slots already
//!   skipped) and aligned one-to-one with the returns.
//! - Scores are on the **average** log-likelihood scale and ordered as
//!   `(ω, α₁..α_p, β₁..β_q)`.
use crate::garch::{
    core::{
        data::ReturnSeries,
        shape::GarchOrder,
        variance::{derivative_recursion, variance_recursion},
        workspace::WorkSpace,
    },
    errors::{GarchError, GarchResult},
    models::garch::GarchModel,
};
use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2};

/// `ln(2π)`.
pub const LN_2PI: f64 = 1.837_877_066_409_345_5;

/// Bind `theta` into a workspace over the model's α/β scratch buffers and run
/// `closure` with it.
///
/// The α/β cells stay mutably borrowed for the duration of the closure; the
/// closure may borrow the variance and derivative buffers.
pub fn with_workspace<T, F>(model: &GarchModel, theta: ArrayView1<f64>, closure: F) -> GarchResult<T>
where
    F: FnOnce(&WorkSpace) -> GarchResult<T>,
{
    let mut alpha_buf = model.scratch_bufs.alpha_buf.borrow_mut();
    let mut beta_buf = model.scratch_bufs.beta_buf.borrow_mut();
    let mut workspace = WorkSpace::new(alpha_buf.view_mut(), beta_buf.view_mut(), &model.order)?;
    workspace.update(theta)?;
    closure(&workspace)
}

/// Full-sample Gaussian log-likelihood
/// `-½ Σ [ln 2π + ln σ²_t + x²_t / σ²_t]`.
pub fn gaussian_loglik(returns: ArrayView1<f64>, sigma2: ArrayView1<f64>) -> f64 {
    -0.5 * returns
        .iter()
        .zip(sigma2.iter())
        .map(|(x, h)| LN_2PI + h.ln() + x * x / h)
        .sum::<f64>()
}

/// Gradient of the **average** log-likelihood w.r.t. `(ω, α, β)`:
/// `(1/n) Σ_t ½ (x²_t / σ²_t − 1) / σ²_t · ∂σ²_t/∂θ`.
pub fn mean_loglik_score(
    returns: ArrayView1<f64>, sigma2: ArrayView1<f64>, deriv: ArrayView2<f64>,
) -> Array1<f64> {
    let mut score = Array1::zeros(deriv.ncols());
    for ((x, h), row) in returns.iter().zip(sigma2.iter()).zip(deriv.rows()) {
        let weight = 0.5 * (x * x / h - 1.0) / h;
        score.scaled_add(weight, &row);
    }
    score / returns.len() as f64
}

/// Average-log-likelihood gradient at a model-space point
/// `point = (ω, α₁..α_p, β₁..β_q)`.
///
/// Allocates its own buffers, so it can be evaluated at perturbed points
/// (finite-difference Hessians) without touching a model's scratch state.
/// Coordinates are not re-validated beyond what the recursion needs.
///
/// # Errors
/// - [`GarchError::NonStationaryParameters`] if `Σα + Σβ >= 1`.
/// - [`GarchError::NumericalDomain`] from the recursion.
pub fn model_space_gradient(
    order: &GarchOrder, point: ArrayView1<f64>, returns: &ReturnSeries,
) -> GarchResult<Array1<f64>> {
    let p = order.p;
    let m = order.lag_order();
    let omega = point[0];
    let alpha = point.slice(s![1..1 + p]);
    let beta = point.slice(s![1 + p..]);
    let coeff_sum = alpha.sum() + beta.sum();
    if !(coeff_sum < 1.0) {
        return Err(GarchError::NonStationaryParameters { coeff_sum });
    }
    let uncond = omega / (1.0 - coeff_sum);

    let n = returns.len();
    let mut sigma2 = Array1::zeros(n + m);
    let mut deriv = Array2::zeros((n + m, order.n_params()));
    variance_recursion(omega, alpha, beta, uncond, returns.view(), sigma2.view_mut())?;
    derivative_recursion(alpha, beta, uncond, returns.view(), sigma2.view(), deriv.view_mut());
    Ok(mean_loglik_score(returns.view(), sigma2.slice(s![m..]), deriv.slice(s![m.., ..])))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::garch::core::params::GarchParams;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The Gaussian log-likelihood on a constant-variance path.
    // - `model_space_gradient` against central differences of the average
    //   log-likelihood.
    //
    // θ-space gradients are covered in the model tests.
    // -------------------------------------------------------------------------

    fn mean_loglik_at(order: &GarchOrder, point: &Array1<f64>, returns: &ReturnSeries) -> f64 {
        let m = order.lag_order();
        let alpha = point.slice(s![1..1 + order.p]);
        let beta = point.slice(s![1 + order.p..]);
        let uncond = point[0] / (1.0 - alpha.sum() - beta.sum());
        let mut sigma2 = Array1::zeros(returns.len() + m);
        variance_recursion(point[0], alpha, beta, uncond, returns.view(), sigma2.view_mut())
            .expect("recursion should succeed");
        gaussian_loglik(returns.view(), sigma2.slice(s![m..])) / returns.len() as f64
    }

    #[test]
    // Purpose
    // -------
    // The log-likelihood matches the closed form for unit variance.
    //
    // Given
    // -----
    // - x = [1, -1], σ² = [1, 1].
    //
    // Expect
    // ------
    // - ℓ = -½ · 2 · (ln 2π + 1).
    fn gaussian_loglik_unit_variance() {
        let ll = gaussian_loglik(array![1.0, -1.0].view(), array![1.0, 1.0].view());

        assert_relative_eq!(ll, -(LN_2PI + 1.0), epsilon = 1e-14);
    }

    #[test]
    // Purpose
    // -------
    // The model-space score is the derivative of the average
    // log-likelihood.
    //
    // Given
    // -----
    // - GARCH(2, 1) at ω = 0.2, α = [0.1, 0.05], β = [0.6] on a fixed path.
    //
    // Expect
    // ------
    // - Each coordinate within 1e-6 of a central difference.
    fn model_space_gradient_matches_finite_difference() {
        // Arrange
        let order = GarchOrder::new(2, 1).expect("valid order");
        let params = GarchParams::new(0.2, array![0.1, 0.05], array![0.6]).expect("valid");
        let point = array![params.omega, params.alpha[0], params.alpha[1], params.beta[0]];
        let returns =
            ReturnSeries::new(array![0.3, -0.9, 1.4, 0.2, -0.5, 0.8, -1.1, 0.05]).expect("valid");

        // Act
        let grad = model_space_gradient(&order, point.view(), &returns).expect("gradient");

        // Assert
        let h = 1e-6;
        for k in 0..point.len() {
            let mut up = point.clone();
            let mut dn = point.clone();
            up[k] += h;
            dn[k] -= h;
            let numeric = (mean_loglik_at(&order, &up, &returns)
                - mean_loglik_at(&order, &dn, &returns))
                / (2.0 * h);
            assert_relative_eq!(grad[k], numeric, epsilon = 1e-6);
        }
    }
}
