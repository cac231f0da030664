//! loglik_optimizer::types — shared numeric aliases and solver wiring.
//!
//! Canonical aliases for parameter vectors, gradients, Hessians and scalar
//! costs, the argmin function-evaluation counter map, and the two pre-wired
//! L-BFGS solver types. Other optimizer modules import these instead of
//! spelling out `ndarray` / argmin generics.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Unconstrained optimizer-space parameter vector.
pub type Theta = Array1<f64>;

pub type Grad = Array1<f64>;

pub type Hessian = Array2<f64>;

pub type Cost = f64;

/// argmin function-evaluation counters keyed by counter name.
pub type FnEvalMap = HashMap<String, u64>;

/// L-BFGS history size used when `MLEOptions::lbfgs_mem` is `None`.
pub const DEFAULT_LBFGS_MEM: usize = 7;

pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
