//! argmin_strategy::finite_diff — finite-difference gradients with error capture.
//!
//! Purpose
//! -------
//! Approximate the gradient of a fallible scalar objective when a metric does
//! not provide an analytic gradient, without losing the objective's errors
//! inside the `finitediff` closures (which must return plain `f64`).
//!
//! Key behaviors
//! -------------
//! - [`fd_gradient`] tries central differences first and falls back to
//!   forward differences if an evaluation failed or the central result is not
//!   finite.
//! - [`run_fd_diff`] is the forward-difference path on its own.
//!
//! Invariants & assumptions
//! ------------------------
//! - The first error raised by the objective is stored in the shared
//!   `closure_err` cell and the closure returns `NaN`; the error is surfaced
//!   after the finite-difference call returns.
//! - Returned gradients satisfy [`validate_grad`].
use std::cell::RefCell;

use argmin::core::Error;
use finitediff::FiniteDiff;

use crate::optimization::{
    argmin_strategy::validation::validate_grad,
    errors::OptResult,
    types::{Grad, Theta},
};

/// Forward-difference gradient of `func` at `theta` with error capture.
///
/// # Errors
/// - Any error captured in `closure_err` while evaluating `func`.
/// - Validation errors for the resulting gradient.
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

/// Finite-difference gradient of a fallible objective.
///
/// Central differences are used when every evaluation succeeds and the result
/// is finite; otherwise the gradient is recomputed with forward differences.
///
/// # Errors
/// Propagates the objective's error or the validation failure from the
/// forward-difference retry.
pub fn fd_gradient<F>(theta: &Theta, objective: F) -> OptResult<Grad>
where
    F: Fn(&Theta) -> OptResult<f64>,
{
    let closure_err: RefCell<Option<Error>> = RefCell::new(None);
    let func = |x: &Theta| -> f64 {
        match objective(x) {
            Ok(val) => val,
            Err(e) => {
                let mut slot = closure_err.borrow_mut();
                if slot.is_none() {
                    *slot = Some(e.into());
                }
                f64::NAN
            }
        }
    };

    let central = theta.central_diff(&func);
    if closure_err.borrow().is_none() && validate_grad(&central, theta.len()).is_ok() {
        return Ok(central);
    }
    run_fd_diff(theta, &func, &closure_err)
}
