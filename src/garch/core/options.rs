//! GARCH options — configuration for estimation and simulation.
//!
//! - [`GarchOptions`]: start-value policy plus optimizer options for fitting.
//! - [`SimOpts`]: RNG seeding for the convenience simulation entry point.
//!
//! Both are plain data carriers; their components validate themselves
//! (`Init` builders, `MLEOptions::new`).
use crate::{garch::core::init::Init, optimization::loglik_optimizer::MLEOptions};

/// Seed used when none is requested explicitly.
pub const DEFAULT_SEED: u64 = 42;

/// Estimation-time configuration.
///
/// Default: [`Init::SampleVariance`] with [`MLEOptions::default`] (L-BFGS,
/// More–Thuente line search, `tol_grad = 1e-6`, `tol_cost = 1e-10`,
/// `max_iter = 500`).
#[derive(Debug, Clone, PartialEq)]
pub struct GarchOptions {
    /// Start-value policy.
    pub init: Init,
    /// Maximum-likelihood optimizer options (L-BFGS + line search).
    pub mle_opts: MLEOptions,
}

impl GarchOptions {
    pub fn new(init: Init, mle_opts: MLEOptions) -> Self {
        GarchOptions { init, mle_opts }
    }
}

impl Default for GarchOptions {
    fn default() -> Self {
        GarchOptions { init: Init::SampleVariance, mle_opts: MLEOptions::default() }
    }
}

/// Simulation-time configuration.
///
/// `seed = None` draws from OS entropy; `Some(s)` makes the path
/// reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimOpts {
    pub seed: Option<u64>,
}

impl SimOpts {
    pub fn new(seed: Option<u64>) -> Self {
        SimOpts { seed }
    }
}

impl Default for SimOpts {
    fn default() -> Self {
        SimOpts { seed: Some(DEFAULT_SEED) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Defaults are the documented ones.
    //
    // Given
    // -----
    // - `GarchOptions::default()` and `SimOpts::default()`.
    //
    // Expect
    // ------
    // - Sample-variance init, default optimizer, seed 42.
    fn defaults_are_documented_values() {
        let opts = GarchOptions::default();
        let sim = SimOpts::default();

        assert_eq!(opts.init, Init::SampleVariance);
        assert_eq!(opts.mle_opts, MLEOptions::default());
        assert_eq!(sim.seed, Some(DEFAULT_SEED));
    }
}
