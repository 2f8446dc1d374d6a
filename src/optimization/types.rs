//! optimization::types — shared numeric aliases.
//!
//! Purpose
//! -------
//! Centralize the value types passed between the coordinator, the optimizer
//! strategies and the metrics, so the rest of the crate can stay agnostic to
//! `ndarray` generics.
//!
//! Conventions
//! -----------
//! - Parameter vectors, gradients and scale vectors are `ndarray::Array1<f64>`
//!   and always have one entry per transform parameter.
//! - Resolution levels count from `0` (coarsest) upwards.
//! - This module defines no runtime behavior.
use ndarray::Array1;
use std::collections::HashMap;

/// Registration transform parameters (the optimizer's current position).
pub type Theta = Array1<f64>;

/// Gradient of the cost with respect to [`Theta`].
pub type Grad = Array1<f64>;

/// Per-parameter scale weights; every entry is finite and `> 0`.
pub type Scales = Array1<f64>;

/// Scalar cost minimized by the optimizer strategy.
pub type Cost = f64;

/// Index of a stage in the coarse-to-fine schedule.
pub type ResolutionLevel = usize;

/// CRC-32 fingerprint of a final parameter vector.
pub type Checksum = u32;

/// Function-evaluation counters as reported by the solver.
///
/// Maps counter names (e.g., `"cost_count"`) to counts.
pub type FnEvalMap = HashMap<String, u64>;
