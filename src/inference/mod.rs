//! inference — post-estimation uncertainty for fitted models.
//!
//! Purpose
//! -------
//! Provide classical (observed-information) standard errors on top of a
//! fitted model. The model layer supplies the gradient of its negative
//! average log-likelihood in whatever parameter space it reports; this
//! module differentiates it once more and inverts the result.
//!
//! Conventions
//! -----------
//! - Hessians are on the **average** log-likelihood scale; the `1/n` factor
//!   is applied when forming variances.
//! - Errors are reported as `OptResult`; the model layer maps them into its
//!   own error type.

pub mod hessian;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::hessian::calc_standard_errors;
