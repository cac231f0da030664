//! Errors for GARCH(p, q) simulation, estimation, and forecasting.
//!
//! This module defines the model error type, [`GarchError`], and the
//! parameter error type, [`ParamError`], used by every public entry point of
//! the `garch` module. Both implement `Display`/`Error`.
//!
//! ## Conventions
//! - **Indices are 0-based**. For recursion failures `t` is the position in
//!   the return series (or forecast step) whose variance left the domain.
//! - Failures are surfaced, never converted into NaN or default values.
//! - Optimizer/backend errors are normalized to
//!   [`GarchError::EstimationFailed`] with a human-readable status, except for
//!   stationarity and numerical-domain failures, which keep their identity.
use crate::optimization::errors::OptError;

/// Result alias for GARCH operations that may produce [`GarchError`].
pub type GarchResult<T> = Result<T, GarchError>;

/// Result alias for parameter-construction/validation paths that may produce
/// [`ParamError`].
pub type ParamResult<T> = Result<T, ParamError>;

/// Unified error type for GARCH modeling.
#[derive(Debug, Clone, PartialEq)]
pub enum GarchError {
    // ---- Input/data validation ----
    /// Return series has no observations.
    EmptySeries,

    /// A return is NaN or infinite.
    NonFiniteData { index: usize, value: f64 },

    /// Model order is unusable (e.g. no ARCH term).
    InvalidOrder { p: usize, q: usize, reason: &'static str },

    /// Forecast horizon must be at least one step.
    InvalidHorizon { horizon: usize },

    /// Rolling test length must lie in `1..len`.
    InvalidTestLength { test_length: usize, len: usize },

    /// Simulation length must be positive.
    InvalidSimulationLength { n: usize },

    /// Study configuration is inconsistent.
    InvalidStudyConfig { reason: &'static str },

    /// Start-value policy cannot produce a starting point.
    InvalidInit { reason: &'static str },

    // ---- Model/recursion invariants ----
    /// A conditional variance step was non-positive or non-finite.
    NumericalDomain { t: usize, value: f64 },

    /// `sum(alpha) + sum(beta) >= 1`.
    NonStationaryParameters { coeff_sum: f64 },

    /// Fewer lags/observations than the model order requires.
    InsufficientHistory { required: usize, available: usize },

    // ---- Estimation / inference ----
    /// Optimizer stopped without meeting its convergence tolerance.
    EstimationFailed { status: String },

    /// Observed information could not be formed at the estimate.
    StandardErrorsUnavailable { reason: String },

    // ---- Parameters ----
    Param(ParamError),
}

impl std::error::Error for GarchError {}

impl std::fmt::Display for GarchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            GarchError::EmptySeries => {
                write!(f, "Input series is empty.")
            }
            GarchError::NonFiniteData { index, value } => {
                write!(f, "Return at index {index} is non-finite: {value}")
            }
            GarchError::InvalidOrder { p, q, reason } => {
                write!(f, "Invalid GARCH order ({p}, {q}): {reason}")
            }
            GarchError::InvalidHorizon { horizon } => {
                write!(f, "Forecast horizon must be >= 1; got {horizon}")
            }
            GarchError::InvalidTestLength { test_length, len } => {
                write!(
                    f,
                    "Rolling test length must satisfy 0 < test_length < {len}; got {test_length}"
                )
            }
            GarchError::InvalidSimulationLength { n } => {
                write!(f, "Simulation length must be > 0; got {n}")
            }
            GarchError::InvalidStudyConfig { reason } => {
                write!(f, "Invalid study configuration: {reason}")
            }
            GarchError::InvalidInit { reason } => {
                write!(f, "Invalid start-value policy: {reason}")
            }
            // ---- Model/recursion invariants ----
            GarchError::NumericalDomain { t, value } => {
                write!(f, "Conditional variance at t = {t} is non-positive or non-finite: {value}")
            }
            GarchError::NonStationaryParameters { coeff_sum } => {
                write!(
                    f,
                    "Parameters are not covariance-stationary: sum(alpha) + sum(beta) = {coeff_sum} >= 1"
                )
            }
            GarchError::InsufficientHistory { required, available } => {
                write!(f, "Insufficient history: need {required} values, have {available}")
            }
            // ---- Estimation / inference ----
            GarchError::EstimationFailed { status } => {
                write!(f, "Estimation failed: {status}")
            }
            GarchError::StandardErrorsUnavailable { reason } => {
                write!(f, "Standard errors unavailable: {reason}")
            }
            GarchError::Param(err) => write!(f, "{err}"),
        }
    }
}

impl From<ParamError> for GarchError {
    fn from(err: ParamError) -> GarchError {
        match err {
            ParamError::StationarityViolated { coeff_sum } => {
                GarchError::NonStationaryParameters { coeff_sum }
            }
            other => GarchError::Param(other),
        }
    }
}

impl From<OptError> for GarchError {
    fn from(err: OptError) -> GarchError {
        match err {
            OptError::StationarityViolated { coeff_sum } => {
                GarchError::NonStationaryParameters { coeff_sum }
            }
            OptError::NumericalDomain { t, value } => GarchError::NumericalDomain { t, value },
            OptError::ModelError { text } => GarchError::EstimationFailed { status: text },
            other => GarchError::EstimationFailed { status: other.to_string() },
        }
    }
}

/// Errors raised while constructing or mapping GARCH parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// `sum(alpha) + sum(beta)` is not below one (or the softmax mass is off).
    StationarityViolated { coeff_sum: f64 },

    /// θ has the wrong number of coordinates for the model order.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// ω must be finite and > 0.
    InvalidOmega { value: f64 },

    /// α vector length does not match `p`.
    AlphaLengthMismatch { expected: usize, actual: usize },

    /// α entries must be finite and >= 0.
    InvalidAlpha { index: usize, value: f64 },

    /// β vector length does not match `q`.
    BetaLengthMismatch { expected: usize, actual: usize },

    /// β entries must be finite and >= 0.
    InvalidBeta { index: usize, value: f64 },

    /// Slack must be finite and >= 0.
    InvalidSlack { value: f64 },

    /// θ entries must be finite.
    InvalidThetaInput { index: usize, value: f64 },
}

impl std::error::Error for ParamError {}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::StationarityViolated { coeff_sum } => {
                write!(
                    f,
                    "Model not stationary: sum of alpha and beta is {coeff_sum} (>= 1 is not allowed)",
                )
            }
            ParamError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, got {actual}")
            }
            ParamError::InvalidOmega { value } => {
                write!(f, "Omega must be finite and > 0, got {value}")
            }
            ParamError::AlphaLengthMismatch { expected, actual } => {
                write!(f, "Alpha length mismatch: expected {expected}, got {actual}")
            }
            ParamError::InvalidAlpha { index, value } => {
                write!(
                    f,
                    "Alpha coordinate at index {index} must be non-negative and finite, got {value}"
                )
            }
            ParamError::BetaLengthMismatch { expected, actual } => {
                write!(f, "Beta length mismatch: expected {expected}, got {actual}")
            }
            ParamError::InvalidBeta { index, value } => {
                write!(
                    f,
                    "Beta coordinate at index {index} must be non-negative and finite, got {value}",
                )
            }
            ParamError::InvalidSlack { value } => {
                write!(f, "Slack value must be non-negative and finite, got {value}")
            }
            ParamError::InvalidThetaInput { index, value } => {
                write!(f, "Theta input at index {index} must be finite, got {value}")
            }
        }
    }
}
