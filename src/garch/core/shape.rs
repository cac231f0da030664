//! Model order (p, q) for GARCH models.
//!
//! Convention used throughout the crate:
//! - `p`: number of **squared-return lags** (coefficients α₁…α_p on past x²).
//! - `q`: number of **variance lags** (coefficients β₁…β_q on past σ²).
//!
//! `p` must be at least one; `q = 0` gives a pure ARCH(p) model.
use crate::garch::errors::{GarchError, GarchResult};

/// Order of the GARCH(p, q) model.
///
/// Invariant: `p >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GarchOrder {
    pub p: usize,
    pub q: usize,
}

impl GarchOrder {
    /// Construct a validated [`GarchOrder`].
    ///
    /// # Errors
    /// - [`GarchError::InvalidOrder`] if `p == 0`. Without an ARCH term the
    ///   variance path is deterministic and the β coefficients are not
    ///   identified from the returns.
    pub fn new(p: usize, q: usize) -> GarchResult<Self> {
        if p == 0 {
            return Err(GarchError::InvalidOrder {
                p,
                q,
                reason: "p must be at least one (an ARCH term is required).",
            });
        }
        Ok(GarchOrder { p, q })
    }

    /// Number of pre-sample slots the recursion needs: `m = max(p, q)`.
    pub fn lag_order(&self) -> usize {
        self.p.max(self.q)
    }

    /// Dimension of the parameter vector `(ω, α₁..α_p, β₁..β_q)`.
    pub fn n_params(&self) -> usize {
        1 + self.p + self.q
    }

    /// Check that a sample of length `n` carries more observations than free
    /// parameters, so the likelihood is not trivially degenerate.
    ///
    /// # Errors
    /// - [`GarchError::InsufficientHistory`] with `required = n_params() + 1`.
    pub fn check_sample(&self, n: usize) -> GarchResult<()> {
        let required = self.n_params() + 1;
        if n < required {
            return Err(GarchError::InsufficientHistory { required, available: n });
        }
        Ok(())
    }
}
