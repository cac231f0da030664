//! Start-value policies for GARCH estimation.
//!
//! Purpose
//! -------
//! Decide where the optimizer starts. The policy is independent of the
//! pre-sample seeding of the recursion, which always uses the unconditional
//! variance of the current parameters.
//!
//! Policies
//! --------
//! - [`Init::SampleVariance`]: a moderate-persistence point scaled to the data,
//!   `α_i = 0.1 / p`, `β_j = 0.6 / q`, `ω = s² (1 − Σα − Σβ)` with
//!   `s² = mean(x²)`, so the implied unconditional variance equals `s²`.
//! - [`Init::Fixed`]: one caller-supplied parameter set.
//! - [`Init::MultiStart`]: several caller-supplied sets; the estimator keeps
//!   the converged fit with the highest log-likelihood.
//!
//! Stationarity of caller-supplied starts is checked by the estimator, which
//! reports `NonStationaryParameters` rather than silently projecting them.
use crate::garch::{
    core::{data::ReturnSeries, params::GarchParams, shape::GarchOrder},
    errors::{GarchError, GarchResult},
};
use ndarray::Array1;

/// Total α mass of the sample-variance start.
pub const SEED_ALPHA_MASS: f64 = 0.1;
/// Total β mass of the sample-variance start.
pub const SEED_BETA_MASS: f64 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub enum Init {
    SampleVariance,
    Fixed(GarchParams),
    MultiStart(Vec<GarchParams>),
}

impl Init {
    pub const fn sample_variance() -> Self {
        Init::SampleVariance
    }

    /// A single fixed start whose lengths must match `order`.
    pub fn fixed(params: GarchParams, order: &GarchOrder) -> GarchResult<Self> {
        params.check_order(order)?;
        Ok(Init::Fixed(params))
    }

    /// Several starts; each must match `order` and the list must be non-empty.
    pub fn multi_start(starts: Vec<GarchParams>, order: &GarchOrder) -> GarchResult<Self> {
        if starts.is_empty() {
            return Err(GarchError::InvalidInit { reason: "multi-start needs at least one start." });
        }
        for start in &starts {
            start.check_order(order)?;
        }
        Ok(Init::MultiStart(starts))
    }

    /// Materialize the starting points for a given order and sample.
    ///
    /// # Errors
    /// - Length mismatches between a supplied start and `order`.
    /// - [`GarchError::EstimationFailed`] for the sample-variance policy if
    ///   `mean(x²)` is zero or non-finite.
    pub fn starting_points(
        &self, order: &GarchOrder, returns: &ReturnSeries,
    ) -> GarchResult<Vec<GarchParams>> {
        match self {
            Init::SampleVariance => Ok(vec![sample_variance_start(order, returns)?]),
            Init::Fixed(params) => {
                params.check_order(order)?;
                Ok(vec![params.clone()])
            }
            Init::MultiStart(starts) => {
                if starts.is_empty() {
                    return Err(GarchError::InvalidInit {
                        reason: "multi-start needs at least one start.",
                    });
                }
                for start in starts {
                    start.check_order(order)?;
                }
                Ok(starts.clone())
            }
        }
    }
}

fn sample_variance_start(order: &GarchOrder, returns: &ReturnSeries) -> GarchResult<GarchParams> {
    let alpha = Array1::from_elem(order.p, SEED_ALPHA_MASS / order.p as f64);
    let beta = if order.q == 0 {
        Array1::zeros(0)
    } else {
        Array1::from_elem(order.q, SEED_BETA_MASS / order.q as f64)
    };
    let energy = returns.sample_variance();
    if !(energy.is_finite() && energy > 0.0) {
        return Err(GarchError::EstimationFailed {
            status: format!(
                "sample energy mean(x^2) = {energy} cannot seed a starting point; \
                 the returns are all zero or overflow"
            ),
        });
    }
    let omega = energy * (1.0 - alpha.sum() - beta.sum());
    Ok(GarchParams::new(omega, alpha, beta)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::garch::errors::ParamError;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // The sample-variance start spreads the α/β mass evenly and reproduces
    // the sample energy as its unconditional variance.
    //
    // Given
    // -----
    // - GARCH(2, 2), x = [1, -1, 2, -2] so mean(x²) = 2.5.
    //
    // Expect
    // ------
    // - α = [0.05, 0.05], β = [0.3, 0.3], σ²∞ = 2.5.
    fn sample_variance_start_matches_sample_energy() {
        let order = GarchOrder::new(2, 2).expect("valid order");
        let returns = ReturnSeries::new(array![1.0, -1.0, 2.0, -2.0]).expect("valid");

        let starts = Init::sample_variance().starting_points(&order, &returns).expect("start");

        assert_eq!(starts.len(), 1);
        assert_relative_eq!(starts[0].alpha[1], 0.05, epsilon = 1e-15);
        assert_relative_eq!(starts[0].beta[0], 0.3, epsilon = 1e-15);
        assert_relative_eq!(starts[0].uncond_variance().expect("stationary"), 2.5, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // ARCH(p) starts carry no β and keep only the α mass.
    //
    // Given
    // -----
    // - ARCH(1) and x = [1, 1].
    //
    // Expect
    // ------
    // - β empty, α = [0.1], ω = 0.9.
    fn arch_start_has_no_beta() {
        let order = GarchOrder::new(1, 0).expect("valid order");
        let returns = ReturnSeries::new(array![1.0, 1.0]).expect("valid");

        let start = &Init::sample_variance().starting_points(&order, &returns).expect("start")[0];

        assert!(start.beta.is_empty());
        assert_relative_eq!(start.omega, 0.9, epsilon = 1e-15);
    }

    #[test]
    // Purpose
    // -------
    // A sample-variance start needs finite, positive sample energy.
    //
    // Given
    // -----
    // - GARCH(1, 1) with all-zero returns, and with returns whose squares
    //   overflow.
    //
    // Expect
    // ------
    // - `EstimationFailed` for both.
    fn degenerate_sample_energy_is_rejected() {
        let order = GarchOrder::new(1, 1).expect("valid order");
        let zeros = ReturnSeries::new(array![0.0, 0.0, 0.0, 0.0]).expect("valid");
        let huge = ReturnSeries::new(array![1e200, -1e200, 1.0, 2.0]).expect("valid");

        for returns in [zeros, huge] {
            assert!(matches!(
                Init::sample_variance().starting_points(&order, &returns),
                Err(GarchError::EstimationFailed { .. })
            ));
        }
    }

    #[test]
    // Purpose
    // -------
    // Supplied starts must match the order and a multi-start list must not
    // be empty.
    //
    // Given
    // -----
    // - GARCH(1, 1) with a GARCH(2, 1) fixed start, and an empty list.
    //
    // Expect
    // ------
    // - `Param(AlphaLengthMismatch)` and `InvalidInit`.
    fn supplied_starts_are_validated() {
        let order = GarchOrder::new(1, 1).expect("valid order");
        let wrong = GarchParams::new(0.1, array![0.1, 0.1], array![0.5]).expect("valid");

        assert!(matches!(
            Init::fixed(wrong, &order),
            Err(GarchError::Param(ParamError::AlphaLengthMismatch { expected: 1, actual: 2 }))
        ));
        assert!(matches!(
            Init::multi_start(Vec::new(), &order),
            Err(GarchError::InvalidInit { .. })
        ));
    }
}
