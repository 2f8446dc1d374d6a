//! argmin_strategy::types — solver wiring for the argmin-backed strategy.
//!
//! Purpose
//! -------
//! Pin the concrete argmin generics used by [`super::ArgminStrategy`] in one
//! place, so the builders, runner and observer agree on a single
//! `(Theta, Grad, Cost)` shape.
//!
//! Conventions
//! -----------
//! - Parameters handed to argmin are always in *scaled* space; see
//!   [`super::adapter`].
//! - `DEFAULT_LBFGS_MEM` is the history size used when the options do not
//!   override it.
use argmin::{
    core::IterState,
    solver::{
        linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
        quasinewton::LBFGS,
    },
};

use crate::optimization::types::{Cost, Grad, Theta};

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Iteration state shared by every solver, observer and runner here.
pub type LbfgsState = IterState<Theta, Grad, (), (), (), Cost>;

/// Hager–Zhang line search specialized to the crate's numeric types.
pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

/// More–Thuente line search specialized to the crate's numeric types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

/// L-BFGS solver wired to the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

/// L-BFGS solver wired to the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
