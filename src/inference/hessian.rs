//! inference::hessian — observed-information standard errors.
//!
//! Purpose
//! -------
//! Turn a finite-difference Hessian of an average log-likelihood into
//! classical standard errors. The Hessian is computed by
//! [`compute_hessian`], copied into a `nalgebra::DMatrix`, and inverted via a
//! symmetric eigendecomposition with eigenvalue truncation (a Moore–Penrose
//! pseudoinverse), so weakly identified directions inflate the SEs instead
//! of failing.
//!
//! Conventions
//! -----------
//! - `f` is the gradient of the **negative average** log-likelihood, so its
//!   Jacobian is the observed information `J(θ̂)` per observation.
//! - `Var(θ̂) = J⁺ / n`; the returned vector is `sqrt(diag(Var))`.
//! - Eigenvalues `λ ≤ EIGEN_EPS` are treated as zero.
//! - No explicit matrix inverse is formed.
use crate::optimization::{
    errors::OptResult, loglik_optimizer::finite_diff::compute_hessian,
    numerical_stability::transformations::EIGEN_EPS,
};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// Classical standard errors at `theta_hat` for a sample of `n_obs`
/// observations.
///
/// # Errors
/// - Any error from [`compute_hessian`] (non-finite or mis-shaped Hessian).
pub fn calc_standard_errors<F: Fn(&Array1<f64>) -> Array1<f64>>(
    f: &F, theta_hat: &Array1<f64>, n_obs: usize,
) -> OptResult<Array1<f64>> {
    let n = theta_hat.len();
    let obs_info = compute_hessian(f, theta_hat)?;
    let mut obs_info_nalg = DMatrix::<f64>::zeros(obs_info.nrows(), obs_info.ncols());
    fill_dmatrix(&obs_info, &mut obs_info_nalg);
    let scale = 1.0 / n_obs as f64;
    Ok(solve_for_se(obs_info_nalg, n).mapv(|se| (se * se * scale).sqrt()))
}

// ---- Helper methods ----

/// Copy a square `ndarray` matrix into a preallocated `DMatrix`, column by
/// column (nalgebra storage is column-major).
fn fill_dmatrix(obs_info: &Array2<f64>, obs_info_nalg: &mut DMatrix<f64>) {
    let n = obs_info.ncols();
    for j in 0..n {
        for i in 0..n {
            obs_info_nalg[(i, j)] = obs_info[[i, j]];
        }
    }
}

/// `sqrt(diag(J⁺))` via `J = Q Λ Qᵀ`:
/// `Var_i = Σ_{k: λ_k > EIGEN_EPS} Q[i,k]² / λ_k`.
fn solve_for_se(obs_info_nalg: DMatrix<f64>, n: usize) -> Array1<f64> {
    let eigen_decomp = obs_info_nalg.symmetric_eigen();
    let q = eigen_decomp.eigenvectors;
    let eigenvals = eigen_decomp.eigenvalues;
    Array1::from_shape_fn(n, |i| {
        eigenvals
            .iter()
            .enumerate()
            .filter(|(_, lambda)| **lambda > EIGEN_EPS)
            .map(|(k, &lambda)| q[(i, k)] * q[(i, k)] / lambda)
            .sum::<f64>()
            .sqrt()
    })
}
