//! loglik_optimizer::finite_diff — finite-difference gradient and Hessian helpers.
//!
//! Purpose
//! -------
//! Wrap the `finitediff` crate so the optimizer and the inference layer can
//! request derivatives with error capture, validation, and symmetry cleanup
//! already applied.
//!
//! Key behaviors
//! -------------
//! - [`run_fd_diff`]: forward-difference gradient of a scalar objective,
//!   surfacing any error the objective stashed in a shared cell.
//! - [`compute_hessian`]: Jacobian of a gradient function by central
//!   differences, falling back to forward differences when the central
//!   result is not finite, then symmetrized.
//!
//! Invariants & assumptions
//! ------------------------
//! - Objectives signal failure by writing into `closure_err` and returning
//!   `NaN`; an error found in the cell is a hard failure.
//! - Returned gradients/Hessians always pass [`validate_grad`] /
//!   [`validate_hessian`].
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        types::Hessian,
        validation::{validate_grad, validate_hessian},
        Grad, Theta,
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Forward-difference gradient with error capture and validation.
///
/// Errors
/// ------
/// - The error captured in `closure_err` (converted via `From<Error>`).
/// - `OptError::GradientDimMismatch` / `OptError::InvalidGradient` from
///   [`validate_grad`].
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

/// Finite-difference Hessian of the scalar function whose gradient is `f`.
///
/// Central differences are tried first; a non-finite or mis-shaped result
/// triggers a forward-difference retry. The returned matrix is symmetric.
///
/// Errors
/// ------
/// - `OptError::HessianDimMismatch` / `OptError::InvalidHessian` when the
///   forward-difference fallback also fails validation.
pub fn compute_hessian<F: Fn(&Theta) -> Grad>(f: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let mut hess = theta.central_hessian(f);
    if validate_hessian(&hess, dim).is_err() {
        hess = theta.forward_hessian(f);
        validate_hessian(&hess, dim)?;
    }
    symmetrize_hess(&mut hess);
    Ok(hess)
}

// ---- Helper methods ----

fn symmetrize_hess(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}
