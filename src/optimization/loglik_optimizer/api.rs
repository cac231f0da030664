//! High-level entry point for maximizing a user-provided `LogLikelihood`.
//!
//! Validates the starting point, selects an L-BFGS solver with either
//! More–Thuente or Hager–Zhang line search, wraps the model in an
//! `ArgMinAdapter` (which *minimizes* `-ℓ(θ)`), and delegates the run to
//! `run_lbfgs`.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        adapter::ArgMinAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{LineSearcher, LogLikelihood, MLEOptions},
        OptimOutcome, Theta,
    },
};

/// Maximize `f`'s log-likelihood starting from `theta0`.
///
/// Parameters
/// ----------
/// - `f`: model implementing [`LogLikelihood`].
/// - `theta0`: starting point in unconstrained optimizer space.
/// - `data`: model data, borrowed for the whole run.
/// - `opts`: tolerances, line search, and L-BFGS memory.
///
/// Returns
/// -------
/// `OptResult<OptimOutcome>` with the best θ found and the termination
/// diagnostics. A run that stops on its iteration budget still returns `Ok`
/// with `converged == false`; deciding whether that is acceptable is left to
/// the model layer.
///
/// Errors
/// ------
/// - Whatever [`LogLikelihood::check`] rejects at `theta0`.
/// - Solver construction errors (invalid tolerances).
/// - Any error raised by `value`/`grad` during the run, or by argmin itself.
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    }
}
