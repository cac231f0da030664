//! Errors raised by the log-likelihood optimizer layer.
//!
//! [`OptError`] covers optimizer configuration, derivative validation,
//! argmin backend failures, and the model-side failures that must travel
//! through argmin's type-erased `Error` while a solver is running (for
//! example a GARCH variance recursion hitting a non-positive value during a
//! line search). The GARCH layer converts these back into
//! [`GarchError`](crate::garch::errors::GarchError) once the solver returns.
use argmin::core::{ArgminError, Error};

use crate::garch::errors::{GarchError, ParamError};

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// Implies that FD should be used
    GradientNotImplemented,

    /// Gradient dimensions do not match parameter dimensions.
    GradientDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Gradient elements need to be finite
    InvalidGradient {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    // ---- MLEOptions ----
    /// Gradient tolerance needs to be positive and finite.
    InvalidTolGrad {
        tol: f64,
        reason: &'static str,
    },
    /// Cost change tolerance needs to be positive and finite.
    InvalidTolCost {
        tol: f64,
        reason: &'static str,
    },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },
    /// At least one tolerance must be provided.
    NoTolerancesProvided,

    /// Invalid line searcher name.
    InvalidLineSearch {
        name: String,
        reason: &'static str,
    },

    /// lbfgs_mem needs to be at least 1.
    InvalidLBFGSMem {
        mem: usize,
        reason: &'static str,
    },

    // ---- Cost function ----
    NonFiniteCost {
        value: f64,
    },

    // ---- Optimizer outcome ----
    InvalidThetaHat {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    MissingThetaHat,

    // ---- Argmin ---
    InvalidParameter {
        text: String,
    },
    NotImplemented {
        text: String,
    },
    NotInitialized {
        text: String,
    },
    ConditionViolated {
        text: String,
    },
    CheckPointNotFound {
        text: String,
    },
    PotentialBug {
        text: String,
    },
    ImpossibleError {
        text: String,
    },
    BackendError {
        text: String,
    },

    // ---- Finite Diffs ----
    HessianDimMismatch {
        expected: usize,
        found: (usize, usize),
    },

    InvalidHessian {
        row: usize,
        col: usize,
        value: f64,
    },

    // ---- GARCH recursion ----
    /// A conditional variance step was non-positive or non-finite.
    NumericalDomain {
        t: usize,
        value: f64,
    },

    /// Any other model-side failure, carried as text.
    ModelError {
        text: String,
    },

    // ---- Param Errors ----
    StationarityViolated {
        coeff_sum: f64,
    },

    ThetaLengthMismatch {
        expected: usize,
        actual: usize,
    },

    InvalidOmega {
        value: f64,
    },

    AlphaLengthMismatch {
        expected: usize,
        actual: usize,
    },

    InvalidAlpha {
        index: usize,
        value: f64,
    },

    BetaLengthMismatch {
        expected: usize,
        actual: usize,
    },

    InvalidBeta {
        index: usize,
        value: f64,
    },

    InvalidSlack {
        value: f64,
    },

    InvalidThetaInput {
        index: usize,
        value: f64,
    },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OptError::GradientNotImplemented => {
                write!(f, "Gradient optimization not implemented")
            }
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }

            // ---- MLEOptions ----
            OptError::InvalidTolGrad { tol, reason } => {
                write!(f, "Invalid gradient tolerance {tol}: {reason}")
            }
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "Invalid cost function change tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::NoTolerancesProvided => {
                write!(f, "No tolerances provided")
            }
            OptError::InvalidLineSearch { name, reason } => {
                write!(f, "Invalid line searcher '{name}': {reason}")
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }

            // ---- Cost function ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite cost value: {value}")
            }

            // ---- Optimizer outcome ----
            OptError::InvalidThetaHat { index, value, reason } => {
                write!(f, "Invalid estimated parameter at index {index}: {value}: {reason}")
            }
            OptError::MissingThetaHat => {
                write!(f, "Missing estimated parameters (theta hat)")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Finite Diffs ----
            OptError::HessianDimMismatch { expected, found } => {
                write!(
                    f,
                    "Hessian dimension mismatch: expected ({expected}, {expected}), found {found:?}"
                )
            }
            OptError::InvalidHessian { row, col, value } => {
                write!(f, "Invalid Hessian at ({row}, {col}): {value}, must be finite")
            }

            // ---- GARCH recursion ----
            OptError::NumericalDomain { t, value } => {
                write!(f, "Variance recursion left the positive domain at t = {t}: {value}")
            }
            OptError::ModelError { text } => {
                write!(f, "Model error: {text}")
            }

            // ---- Param Errors ----
            OptError::StationarityViolated { coeff_sum } => {
                write!(
                    f,
                    "Model not stationary: sum of alpha and beta is {coeff_sum}, which is >= 1"
                )
            }
            OptError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            OptError::InvalidOmega { value } => {
                write!(f, "Invalid omega parameter: {value}, must be finite and > 0")
            }
            OptError::AlphaLengthMismatch { expected, actual } => {
                write!(f, "Alpha length mismatch: expected {expected}, actual {actual}")
            }
            OptError::InvalidAlpha { index, value } => {
                write!(f, "Invalid alpha at index {index}: {value}, must be non-negative")
            }
            OptError::BetaLengthMismatch { expected, actual } => {
                write!(f, "Beta length mismatch: expected {expected}, actual {actual}")
            }
            OptError::InvalidBeta { index, value } => {
                write!(f, "Invalid beta at index {index}: {value}, must be non-negative")
            }
            OptError::InvalidSlack { value } => {
                write!(f, "Invalid slack value: {value}, must be non-negative")
            }
            OptError::InvalidThetaInput { index, value } => {
                write!(f, "Invalid theta input at index {index}: {value}, must be finite")
            }

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast() {
            Ok(opt_err) => match opt_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

impl From<GarchError> for OptError {
    fn from(err: GarchError) -> Self {
        match err {
            GarchError::NumericalDomain { t, value } => OptError::NumericalDomain { t, value },
            GarchError::NonStationaryParameters { coeff_sum } => {
                OptError::StationarityViolated { coeff_sum }
            }
            GarchError::Param(param_err) => param_err.into(),
            other => OptError::ModelError { text: other.to_string() },
        }
    }
}

impl From<ParamError> for OptError {
    fn from(err: ParamError) -> Self {
        match err {
            ParamError::StationarityViolated { coeff_sum } => {
                OptError::StationarityViolated { coeff_sum }
            }
            ParamError::ThetaLengthMismatch { expected, actual } => {
                OptError::ThetaLengthMismatch { expected, actual }
            }
            ParamError::InvalidOmega { value } => OptError::InvalidOmega { value },
            ParamError::AlphaLengthMismatch { expected, actual } => {
                OptError::AlphaLengthMismatch { expected, actual }
            }
            ParamError::InvalidAlpha { index, value } => OptError::InvalidAlpha { index, value },
            ParamError::BetaLengthMismatch { expected, actual } => {
                OptError::BetaLengthMismatch { expected, actual }
            }
            ParamError::InvalidBeta { index, value } => OptError::InvalidBeta { index, value },
            ParamError::InvalidSlack { value } => OptError::InvalidSlack { value },
            ParamError::InvalidThetaInput { index, value } => {
                OptError::InvalidThetaInput { index, value }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Round-tripping an `OptError` through argmin's type-erased `Error`.
    // - Mapping of GARCH model errors into optimizer errors.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // A model error raised inside a cost evaluation must come back out of
    // argmin with its identity intact.
    //
    // Given
    // -----
    // - `OptError::NumericalDomain` boxed into `argmin::core::Error`.
    //
    // Expect
    // ------
    // - `OptError::from` recovers the same variant.
    fn opt_error_survives_argmin_boxing() {
        // Arrange
        let original = OptError::NumericalDomain { t: 4, value: -1.0 };
        let boxed: Error = original.clone().into();

        // Act
        let recovered = OptError::from(boxed);

        // Assert
        assert_eq!(recovered, original);
    }

    #[test]
    // Purpose
    // -------
    // Stationarity failures keep their meaning across the layer boundary.
    //
    // Given
    // -----
    // - `GarchError::NonStationaryParameters { coeff_sum: 1.2 }`.
    //
    // Expect
    // ------
    // - Converts to `OptError::StationarityViolated { coeff_sum: 1.2 }`.
    fn garch_stationarity_error_maps_to_stationarity_violated() {
        let err = GarchError::NonStationaryParameters { coeff_sum: 1.2 };

        let mapped: OptError = err.into();

        assert_eq!(mapped, OptError::StationarityViolated { coeff_sum: 1.2 });
    }
}
