//! Execution helper that runs an `argmin` solver on a log-likelihood problem and
//! returns a crate-friendly [`OptimOutcome`].
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        adapter::ArgMinAdapter, Grad, LogLikelihood, MLEOptions, OptimOutcome, Theta,
    },
};
use argmin::core::{CostFunction, Executor, State};
use tracing::{debug, trace};

/// Run `solver` on `problem` from `theta0` and normalize the final state.
///
/// The iteration budget from `opts.tols.max_iter` is applied to the executor
/// state here rather than in the builders. With the `obs_slog` feature and
/// `opts.verbose`, a terminal slog observer reports every iteration.
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: argmin::core::Solver<
            ArgMinAdapter<'a, F>,
            argmin::core::IterState<Theta, Grad, (), (), (), f64>,
        > + Send
        + 'static,
{
    if tracing::enabled!(tracing::Level::TRACE) {
        if let Ok(c0) = problem.cost(&theta0) {
            trace!(loglik0 = -c0, dim = theta0.len(), "starting L-BFGS");
        }
    }
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(theta0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    debug!(iterations, status = ?termination, best_cost = result.get_best_cost(), "L-BFGS finished");
    let grad = result.take_gradient();
    OptimOutcome::new(
        result.take_best_param(),
        -result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        grad,
    )
}
