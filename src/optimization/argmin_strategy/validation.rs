//! Validation helpers for the argmin-backed strategy.
//!
//! - **Tolerance checks**: [`verify_tol_grad`], [`verify_tol_cost`] ensure
//!   numeric tolerances are finite and strictly positive when provided.
//! - **Gradient validation**: [`validate_grad`] enforces correct dimension
//!   and finite entries.
//! - **Solver output**: [`validate_best_param`] and [`validate_cost`] check
//!   what argmin hands back before it becomes the strategy's position.
//! - **Positions**: [`validate_position`] checks externally supplied
//!   positions against the strategy's dimension.
use crate::optimization::{
    errors::{OptError, OptResult},
    types::{Cost, Grad, Theta},
};

/// Validate the optional gradient-norm tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidTolGrad`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate the optional cost-change tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidTolCost`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] if length does not match `dim`.
/// - [`OptError::InvalidGradient`] with the index/value/reason of the first
///   offending element.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate and unwrap the best parameter vector reported by the solver.
///
/// # Errors
/// - [`OptError::MissingBestParam`] if the solver produced none.
/// - [`OptError::InvalidBestParam`] if any element is non-finite.
pub fn validate_best_param(best: Option<Theta>) -> OptResult<Theta> {
    let best = best.ok_or(OptError::MissingBestParam)?;
    for (index, &value) in best.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidBestParam {
                index,
                value,
                reason: "Optimized parameters must be finite.",
            });
        }
    }
    Ok(best)
}

/// Validate that a scalar cost is finite.
///
/// # Errors
/// Returns [`OptError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_cost(value: Cost) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

/// Validate a position supplied from outside the strategy.
///
/// # Errors
/// - [`OptError::PositionDimMismatch`] if the length differs from `dim`.
/// - [`OptError::InvalidBestParam`] if any element is non-finite.
pub fn validate_position(position: &Theta, dim: usize) -> OptResult<()> {
    if position.len() != dim {
        return Err(OptError::PositionDimMismatch { expected: dim, found: position.len() });
    }
    if let Some((index, &value)) = position.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(OptError::InvalidBestParam {
            index,
            value,
            reason: "Positions must be finite.",
        });
    }
    Ok(())
}
