//! garch_volatility — GARCH(p, q) simulation, maximum-likelihood estimation,
//! and volatility forecasting.
//!
//! Purpose
//! -------
//! Serve as the crate root. The numerical work lives in three modules:
//!
//! - [`garch`]: the GARCH(p, q) model stack (simulation, variance recursion,
//!   estimation, direct and rolling forecasts, and the end-to-end study).
//! - [`optimization`]: a generic L-BFGS log-likelihood maximizer on argmin
//!   plus the numerically stable reparametrization helpers.
//! - [`inference`]: finite-difference Hessians and pseudo-inverse standard
//!   errors.
//!
//! Conventions
//! -----------
//! - Arrays are `ndarray` throughout; indexing is 0-based.
//! - Errors are rich enums ([`garch::GarchError`],
//!   [`optimization::errors::OptError`]); panics indicate programming errors,
//!   not bad data.
//! - The crate emits `tracing` events but never installs a subscriber.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to the code they cover.
//! - `tests/integration_garch_pipeline.rs` runs the full pipeline
//!   (simulate → fit → forecast → rolling) and checks its properties.

pub mod garch;
pub mod inference;
pub mod optimization;
