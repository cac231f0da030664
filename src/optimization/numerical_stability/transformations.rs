//! Numerical stability utilities.
//!
//! Provides safe implementations of common nonlinear transforms
//! that are prone to overflow/underflow in naïve form.
//! The functions here use explicit cutoffs (`x > 20.0`) to keep `f64`
//! arithmetic in a well-conditioned regime.
//!
//! # Provided items
//! - [`STATIONARITY_MARGIN`]: a small ε buffer (default 1e-6).
//!   Used to enforce the strict inequality ∑α + ∑β < 1 in GARCH models.
//! - [`safe_softplus(x)`]: stable version of `ln(1 + exp(x))`,
//!   mapping ℝ → (0, ∞) without overflow.
//! - [`safe_softplus_inv(x)`]: inverse of softplus, mapping
//!   (0, ∞) → ℝ without catastrophic cancellation.
//! - [`safe_logistic(x)`]: derivative of softplus, mapping ℝ → (0, 1).
//! - [`safe_softmax`] / [`safe_softmax_deriv`]: the scaled softmax that
//!   maps free logits onto `(α, β, slack)` and its Jacobian-vector product.
use ndarray::{s, ArrayView1, ArrayViewMut1, Zip};

/// Safety margin for strict stationarity in GARCH models.
///
/// In a GARCH(p, q), covariance stationarity requires
///   sum(alpha) + sum(beta) < 1.
/// This margin enforces the inequality *strictly* by reserving a small
/// buffer (default = 1e-6). The optimizer therefore only ever evaluates the
/// likelihood inside the stationary region.
pub const STATIONARITY_MARGIN: f64 = 1e-6;

/// Floor applied to softmax weights before taking logarithms in the inverse
/// mapping (`GarchParams::to_theta`).
pub const LOGIT_EPS: f64 = 1e-12;

/// Eigenvalues of an observed-information matrix at or below this value are
/// treated as numerically zero when forming pseudo-inverses.
pub const EIGEN_EPS: f64 = 1e-10;

/// Numerically stable softplus: `softplus(x) = ln(1 + exp(x))`.
///
/// - For sufficiently large `x`, `softplus(x) ≈ x`.
/// - Otherwise, it falls back to `ln1p(exp(x))`.
///
/// # Parameters
/// - `x`: real input
///
/// # Returns
/// - `softplus(x)` as `f64`.
pub fn safe_softplus(x: f64) -> f64 {
    if x > 20.0 {
        x
    } else {
        x.exp().ln_1p()
    }
}

/// Stable inverse of softplus on `(0, ∞)`: solves for `t` in
/// `softplus(t) = x`, returning `t = ln(exp(x) - 1)`.
///
/// # Parameters
/// - `x`: a positive real (the softplus output), must be finite and `> 0`.
///
/// # Returns
/// - `t` such that `softplus(t) = x`.
pub fn safe_softplus_inv(x: f64) -> f64 {
    if x > 20.0 {
        x
    } else {
        x.exp_m1().ln()
    }
}

/// Numerically stable logistic function `1 / (1 + exp(-x))`.
///
/// This is the derivative of [`safe_softplus`] and is used to push
/// `∂ℓ/∂ω` back onto the unconstrained coordinate `θ₀`.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Scaled softmax with an implicit zero-logit baseline.
///
/// Maps the free logits `logits = (θ_α₁..θ_α_p, θ_β₁..θ_β_q)` onto
///
/// ```text
/// w_k   = c · exp(θ_k) / (1 + Σ_j exp(θ_j))
/// slack = c · 1        / (1 + Σ_j exp(θ_j))
/// ```
///
/// with `c = 1 − STATIONARITY_MARGIN`, writing the first `alpha.len()`
/// weights into `alpha` and the rest into `beta`. The baseline logit for the
/// slack coordinate is fixed at zero, so the map is a bijection onto the open
/// simplex and `Σα + Σβ + slack = c` holds by construction.
///
/// # Returns
/// - The slack coordinate.
///
/// # Panics
/// - If `alpha.len() + beta.len() != logits.len()` (caller invariant).
pub fn safe_softmax(
    mut alpha: ArrayViewMut1<f64>, mut beta: ArrayViewMut1<f64>, logits: &ArrayView1<f64>,
) -> f64 {
    let p = alpha.len();
    let scale = 1.0 - STATIONARITY_MARGIN;
    let max_logit = logits.iter().fold(0.0_f64, |acc, &x| acc.max(x));
    let baseline = (-max_logit).exp();
    let denom = logits.iter().fold(baseline, |acc, &x| acc + (x - max_logit).exp());

    Zip::from(&mut alpha)
        .and(logits.slice(s![..p]))
        .for_each(|a, &x| *a = scale * (x - max_logit).exp() / denom);
    Zip::from(&mut beta)
        .and(logits.slice(s![p..]))
        .for_each(|b, &x| *b = scale * (x - max_logit).exp() / denom);

    scale * baseline / denom
}

/// Jacobian-vector product of [`safe_softmax`].
///
/// On entry `grad` holds `∂ℓ/∂w` for the concatenated weights `w = (α, β)`;
/// on exit it holds `∂ℓ/∂θ` for the corresponding logits:
///
/// ```text
/// ∂ℓ/∂θ_m = w_m · (g_m − Σ_k g_k w_k / c)
/// ```
pub fn safe_softmax_deriv(
    alpha: ArrayView1<f64>, beta: ArrayView1<f64>, grad: &mut ArrayViewMut1<f64>,
) {
    let scale = 1.0 - STATIONARITY_MARGIN;
    let weights = alpha.iter().chain(beta.iter());
    let weighted: f64 = weights.clone().zip(grad.iter()).map(|(w, g)| w * g).sum();
    let centre = weighted / scale;
    grad.iter_mut().zip(weights).for_each(|(g, &w)| *g = w * (*g - centre));
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array1};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - softplus / inverse-softplus round trips on both sides of the cutoff.
    // - logistic symmetry and range.
    // - softmax mass conservation and the slack baseline.
    // - agreement of `safe_softmax_deriv` with a finite-difference Jacobian.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // `safe_softplus_inv` must invert `safe_softplus` for small and large
    // positive outputs.
    //
    // Given
    // -----
    // - Inputs spanning the `x > 20.0` cutoff.
    //
    // Expect
    // ------
    // - `softplus(softplus_inv(x)) ≈ x` to 1e-12 relative precision.
    fn softplus_inverse_round_trips_across_cutoff() {
        for &x in &[1e-4, 0.3, 2.5, 19.9, 25.0] {
            let back = safe_softplus(safe_softplus_inv(x));
            assert_relative_eq!(back, x, max_relative = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Check that the logistic helper is bounded and symmetric.
    //
    // Given
    // -----
    // - Large positive and negative inputs.
    //
    // Expect
    // ------
    // - σ(x) + σ(−x) = 1 and no NaN for |x| = 800.
    fn logistic_is_symmetric_and_finite() {
        for &x in &[-800.0, -3.0, 0.0, 1.5, 800.0] {
            let s = safe_logistic(x);
            assert!(s.is_finite());
            assert_relative_eq!(s + safe_logistic(-x), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Softmax weights plus slack must sum to `1 − STATIONARITY_MARGIN`.
    //
    // Given
    // -----
    // - Two α and two β logits including a large value.
    //
    // Expect
    // ------
    // - All weights positive, total mass equals the scaled simplex.
    fn softmax_conserves_scaled_mass() {
        // Arrange
        let logits = array![0.5, -1.0, 40.0, 2.0];
        let mut alpha = Array1::zeros(2);
        let mut beta = Array1::zeros(2);

        // Act
        let slack = safe_softmax(alpha.view_mut(), beta.view_mut(), &logits.view());

        // Assert
        assert!(alpha.iter().chain(beta.iter()).all(|&w| w >= 0.0));
        assert_relative_eq!(
            alpha.sum() + beta.sum() + slack,
            1.0 - STATIONARITY_MARGIN,
            epsilon = 1e-12
        );
    }

    #[test]
    // Purpose
    // -------
    // Zero logits give equal weight to every coordinate, slack included.
    //
    // Given
    // -----
    // - One α and one β logit, both zero.
    //
    // Expect
    // ------
    // - α = β = slack = c / 3.
    fn softmax_zero_logits_split_mass_evenly() {
        let logits = array![0.0, 0.0];
        let mut alpha = Array1::zeros(1);
        let mut beta = Array1::zeros(1);

        let slack = safe_softmax(alpha.view_mut(), beta.view_mut(), &logits.view());

        let third = (1.0 - STATIONARITY_MARGIN) / 3.0;
        assert_relative_eq!(alpha[0], third, epsilon = 1e-14);
        assert_relative_eq!(beta[0], third, epsilon = 1e-14);
        assert_relative_eq!(slack, third, epsilon = 1e-14);
    }

    #[test]
    // Purpose
    // -------
    // The chain-rule helper must match a central-difference derivative of a
    // linear functional of the softmax weights.
    //
    // Given
    // -----
    // - ℓ(w) = Σ g_k w_k with fixed g, logits θ of length 3 (p = 2, q = 1).
    //
    // Expect
    // ------
    // - `safe_softmax_deriv` equals the numerical ∂ℓ/∂θ to 1e-7.
    fn softmax_deriv_matches_finite_difference() {
        // Arrange
        let g = array![0.7, -1.2, 2.0];
        let theta = array![0.3, -0.8, 1.1];
        let ell = |t: &Array1<f64>| {
            let mut a = Array1::zeros(2);
            let mut b = Array1::zeros(1);
            safe_softmax(a.view_mut(), b.view_mut(), &t.view());
            a[0] * g[0] + a[1] * g[1] + b[0] * g[2]
        };
        let h = 1e-6;
        let numeric: Vec<f64> = (0..3)
            .map(|i| {
                let mut up = theta.clone();
                let mut dn = theta.clone();
                up[i] += h;
                dn[i] -= h;
                (ell(&up) - ell(&dn)) / (2.0 * h)
            })
            .collect();

        // Act
        let mut alpha = Array1::zeros(2);
        let mut beta = Array1::zeros(1);
        safe_softmax(alpha.view_mut(), beta.view_mut(), &theta.view());
        let mut grad = g.clone();
        safe_softmax_deriv(alpha.view(), beta.view(), &mut grad.view_mut());

        // Assert
        for i in 0..3 {
            assert_relative_eq!(grad[i], numeric[i], epsilon = 1e-7);
        }
    }
}
