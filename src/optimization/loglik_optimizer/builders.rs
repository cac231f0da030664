//! loglik_optimizer::builders — L-BFGS solver construction helpers.
//!
//! Purpose
//! -------
//! Build L-BFGS solvers with the crate's line-search aliases and apply the
//! gradient / cost-change tolerances from [`MLEOptions`]. The starting point
//! and the iteration budget are runtime concerns handled by
//! [`run_lbfgs`](super::run::run_lbfgs), so these builders stay side-effect
//! free.
//!
//! Conventions
//! -----------
//! - The L-BFGS memory is `opts.lbfgs_mem` or [`DEFAULT_LBFGS_MEM`].
//! - Argmin rejects invalid tolerances inside `with_tolerance_grad` /
//!   `with_tolerance_cost`; those errors surface as [`OptError`] through
//!   `From<argmin::core::Error>`.
//!
//! [`OptError`]: crate::optimization::errors::OptError
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{
            Cost, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente, MoreThuenteLS, Theta,
            DEFAULT_LBFGS_MEM,
        },
    },
};

/// L-BFGS with Hager–Zhang line search and the tolerances from `opts`.
///
/// Errors
/// ------
/// - `OptError` (via `From<argmin::core::Error>`) when argmin rejects a
///   tolerance.
pub fn build_optimizer_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    let lbfgs = LbfgsHagerZhang::new(HagerZhangLS::new(), lbfgs_memory(opts));
    configure_lbfgs(lbfgs, opts)
}

/// L-BFGS with More–Thuente line search and the tolerances from `opts`.
pub fn build_optimizer_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    let lbfgs = LbfgsMoreThuente::new(MoreThuenteLS::new(), lbfgs_memory(opts));
    configure_lbfgs(lbfgs, opts)
}

/// Apply `tol_grad` / `tol_cost` to an L-BFGS solver of any line-search type.
///
/// A `None` tolerance leaves argmin's default in place.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &MLEOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

fn lbfgs_memory(opts: &MLEOptions) -> usize {
    opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM)
}
