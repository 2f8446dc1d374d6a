//! argmin_strategy::builders — L-BFGS solver construction helpers.
//!
//! Purpose
//! -------
//! Build L-BFGS solvers for one resolution level from [`StrategyOptions`],
//! hiding argmin's generic wiring from the strategy.
//!
//! Key behaviors
//! -------------
//! - Construct L-BFGS with either Hager–Zhang or More–Thuente line search.
//! - Apply optional gradient and cost-change tolerances via
//!   [`configure_lbfgs`].
//!
//! Conventions
//! -----------
//! - The builders do **not** set the initial parameters or `max_iters`;
//!   those are applied by the runner ([`super::run::run_lbfgs`]).
//! - Tolerances argmin rejects surface as [`OptError`](crate::optimization::errors::OptError)
//!   through the crate's `From<argmin::core::Error>` conversion.
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    argmin_strategy::{
        options::StrategyOptions,
        types::{HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente, MoreThuenteLS},
    },
    errors::OptResult,
    types::{Cost, Grad, Theta},
};

/// L-BFGS with Hager–Zhang line search and the configured tolerances.
///
/// # Errors
/// Returns an error if argmin rejects a tolerance.
pub fn build_optimizer_hager_zhang(opts: &StrategyOptions) -> OptResult<LbfgsHagerZhang> {
    let lbfgs = LbfgsHagerZhang::new(HagerZhangLS::new(), opts.lbfgs_mem());
    configure_lbfgs(lbfgs, opts)
}

/// L-BFGS with More–Thuente line search and the configured tolerances.
///
/// # Errors
/// Returns an error if argmin rejects a tolerance.
pub fn build_optimizer_more_thuente(opts: &StrategyOptions) -> OptResult<LbfgsMoreThuente> {
    let lbfgs = LbfgsMoreThuente::new(MoreThuenteLS::new(), opts.lbfgs_mem());
    configure_lbfgs(lbfgs, opts)
}

/// Apply optional tolerances to an L-BFGS solver of any line-search type.
///
/// When a tolerance is `None` argmin's default stays in effect.
///
/// # Errors
/// Returns an error if `with_tolerance_grad` or `with_tolerance_cost`
/// rejects the value.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &StrategyOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}
