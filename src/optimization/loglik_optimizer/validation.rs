//! Validation helpers for log-likelihood optimization.
//!
//! - [`verify_tol_grad`], [`verify_tol_cost`]: tolerances must be finite and
//!   strictly positive when provided.
//! - [`validate_grad`]: correct dimension and finite entries.
//! - [`validate_theta_hat`]: the solver produced a finite estimate.
//! - [`validate_value`]: the log-likelihood at the estimate is finite.
//! - [`validate_hessian`]: square, correctly sized, finite.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{types::Hessian, Grad, Theta},
};

fn verify_tol(tol: Option<f64>, make: fn(f64, &'static str) -> OptError) -> OptResult<()> {
    match tol {
        Some(tol) if !tol.is_finite() => Err(make(tol, "Tolerance must be finite.")),
        Some(tol) if tol <= 0.0 => Err(make(tol, "Tolerance must be positive.")),
        _ => Ok(()),
    }
}

pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    verify_tol(tol, |tol, reason| OptError::InvalidTolGrad { tol, reason })
}

pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    verify_tol(tol, |tol, reason| OptError::InvalidTolCost { tol, reason })
}

pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    if let Some((index, &value)) = grad.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(OptError::InvalidGradient {
            index,
            value,
            reason: "Gradient elements must be finite.",
        });
    }
    Ok(())
}

pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    let theta = theta_hat.ok_or(OptError::MissingThetaHat)?;
    if let Some((index, &value)) = theta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(OptError::InvalidThetaHat {
            index,
            value,
            reason: "Parameter estimates must be finite.",
        });
    }
    Ok(theta)
}

pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

pub fn validate_hessian(hessian: &Hessian, dim: usize) -> OptResult<()> {
    if hessian.nrows() != dim || hessian.ncols() != dim {
        return Err(OptError::HessianDimMismatch {
            expected: dim,
            found: (hessian.nrows(), hessian.ncols()),
        });
    }
    for ((i, j), &value) in hessian.indexed_iter() {
        if !value.is_finite() {
            return Err(OptError::InvalidHessian { row: i, col: j, value });
        }
    }
    Ok(())
}
