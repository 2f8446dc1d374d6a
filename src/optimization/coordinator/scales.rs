//! coordinator::scales — sinus-shaped parameter scale schedules.
//!
//! Purpose
//! -------
//! Produce a per-parameter scale vector that varies smoothly and periodically
//! over the parameter index. Strategies use it to equalize, or deliberately
//! bias, step sizes when no better-informed scale estimate is available.
//!
//! Key behaviors
//! -------------
//! - For `i in [0, n)`: `x = (i / n) · 2π · frequency`,
//!   `scale[i] = amplitude^sin(x)`.
//! - `scale[0] = 1`; where `sin(x) = ±1` the scale is `amplitude^±1`.
//! - The schedule is periodic in `i` with period `n / frequency`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `amplitude` and `frequency` are finite and `> 0`; every entry of the
//!   result is therefore finite and `> 0`.
//! - `n = 0` yields an empty vector; `amplitude = 1` yields all ones.
//!
//! Conventions
//! -----------
//! - This module only computes the vector. Installing it is the caller's job
//!   (`OptimizerStrategy::set_scales`), and nothing here is persisted.
use std::f64::consts::PI;

use ndarray::Array1;

use crate::optimization::{
    errors::{OptError, OptResult},
    types::Scales,
};

/// Sinus scale schedule `amplitude^sin(2π · frequency · i / n)`.
///
/// # Errors
/// - [`OptError::InvalidScaleAmplitude`] for non-finite or non-positive
///   `amplitude`.
/// - [`OptError::InvalidScaleFrequency`] for non-finite or non-positive
///   `frequency`.
pub fn sinus_scales(amplitude: f64, frequency: f64, n_params: usize) -> OptResult<Scales> {
    if !amplitude.is_finite() {
        return Err(OptError::InvalidScaleAmplitude {
            value: amplitude,
            reason: "Amplitude must be finite.",
        });
    }
    if amplitude <= 0.0 {
        return Err(OptError::InvalidScaleAmplitude {
            value: amplitude,
            reason: "Amplitude must be positive.",
        });
    }
    if !frequency.is_finite() {
        return Err(OptError::InvalidScaleFrequency {
            value: frequency,
            reason: "Frequency must be finite.",
        });
    }
    if frequency <= 0.0 {
        return Err(OptError::InvalidScaleFrequency {
            value: frequency,
            reason: "Frequency must be positive.",
        });
    }

    let n = n_params as f64;
    Ok(Array1::from_shape_fn(n_params, |i| {
        let x = i as f64 / n * 2.0 * PI * frequency;
        amplitude.powf(x.sin())
    }))
}

/// Check a scale vector against the parameter count.
///
/// # Errors
/// - [`OptError::ScalesDimMismatch`] if the length differs from `n_params`.
/// - [`OptError::InvalidScale`] for the first non-finite or non-positive
///   entry.
pub fn validate_scales(scales: &Scales, n_params: usize) -> OptResult<()> {
    if scales.len() != n_params {
        return Err(OptError::ScalesDimMismatch { expected: n_params, found: scales.len() });
    }
    for (index, &value) in scales.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidScale {
                index,
                value,
                reason: "Scales must be finite.",
            });
        }
        if value <= 0.0 {
            return Err(OptError::InvalidScale {
                index,
                value,
                reason: "Scales must be positive.",
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The reference schedule amplitude=2, frequency=1, n=4.
    // - Positivity, length and `scale[0] = 1` over a small parameter grid.
    // - Degenerate inputs (n = 0, amplitude = 1) and rejected inputs.
    // - `validate_scales` length and entry checks.
    //
    // They intentionally DO NOT cover:
    // - How strategies apply the scales (see `argmin_strategy`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Check the reference schedule against closed-form values.
    //
    // Given
    // -----
    // - amplitude = 2.0, frequency = 1.0, n = 4.
    //
    // Expect
    // ------
    // - scales ≈ [1.0, 2.0, 1.0, 0.5].
    fn reference_schedule_matches_closed_form() {
        // Arrange
        let expected = [1.0, 2.0, 1.0, 0.5];

        // Act
        let scales = sinus_scales(2.0, 1.0, 4).expect("valid inputs");

        // Assert
        assert_eq!(scales.len(), 4);
        for (got, want) in scales.iter().zip(expected) {
            assert_relative_eq!(*got, want, epsilon = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify length, strict positivity and the unit first entry over a
    // spread of admissible inputs.
    //
    // Given
    // -----
    // - amplitudes {0.1, 0.5, 3.0, 100.0}, frequencies {0.25, 1.0, 2.5},
    //   parameter counts {1, 7, 64}.
    //
    // Expect
    // ------
    // - `len == n`, every entry finite and > 0, and `scales[0] == 1`.
    fn schedules_are_positive_with_unit_first_entry() {
        for &amplitude in &[0.1, 0.5, 3.0, 100.0] {
            for &frequency in &[0.25, 1.0, 2.5] {
                for &n in &[1usize, 7, 64] {
                    // Act
                    let scales = sinus_scales(amplitude, frequency, n).expect("valid inputs");

                    // Assert
                    assert_eq!(scales.len(), n);
                    assert!(scales.iter().all(|s| s.is_finite() && *s > 0.0));
                    assert_eq!(scales[0], 1.0);
                }
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Confirm the periodicity of the schedule in the parameter index.
    //
    // Given
    // -----
    // - amplitude = 3.0, frequency = 2.0, n = 12 (period 6).
    //
    // Expect
    // ------
    // - scales[i] ≈ scales[i + 6] for all i < 6.
    fn schedule_is_periodic_in_index() {
        // Act
        let scales = sinus_scales(3.0, 2.0, 12).expect("valid inputs");

        // Assert
        for i in 0..6 {
            assert_relative_eq!(scales[i], scales[i + 6], epsilon = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Cover the degenerate but valid inputs.
    //
    // Given
    // -----
    // - n = 0 with amplitude 2.
    // - amplitude = 1 with frequency 3.7 and n = 9.
    //
    // Expect
    // ------
    // - An empty vector for n = 0.
    // - All ones for amplitude = 1.
    fn degenerate_inputs_yield_defined_outputs() {
        // Act
        let empty = sinus_scales(2.0, 1.0, 0).expect("n = 0 is valid");
        let ones = sinus_scales(1.0, 3.7, 9).expect("amplitude = 1 is valid");

        // Assert
        assert!(empty.is_empty());
        assert!(ones.iter().all(|&s| s == 1.0));
    }

    #[test]
    // Purpose
    // -------
    // Ensure that invalid amplitude and frequency inputs are rejected with
    // the matching error variant.
    //
    // Given
    // -----
    // - amplitude ∈ {0, -1, NaN}; frequency ∈ {0, ∞}.
    //
    // Expect
    // ------
    // - `InvalidScaleAmplitude` and `InvalidScaleFrequency` respectively.
    fn invalid_inputs_are_rejected() {
        for amplitude in [0.0, -1.0, f64::NAN] {
            let err = sinus_scales(amplitude, 1.0, 4).unwrap_err();
            assert!(
                matches!(err, OptError::InvalidScaleAmplitude { .. }),
                "unexpected error for amplitude {amplitude}: {err:?}"
            );
        }
        for frequency in [0.0, f64::INFINITY] {
            let err = sinus_scales(2.0, frequency, 4).unwrap_err();
            assert!(
                matches!(err, OptError::InvalidScaleFrequency { .. }),
                "unexpected error for frequency {frequency}: {err:?}"
            );
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify `validate_scales` for length mismatches and bad entries.
    //
    // Given
    // -----
    // - A length-2 vector checked against 3 parameters.
    // - A vector with a zero entry at index 1.
    //
    // Expect
    // ------
    // - `ScalesDimMismatch { expected: 3, found: 2 }`.
    // - `InvalidScale { index: 1, .. }`.
    fn validate_scales_rejects_bad_vectors() {
        // Arrange
        let short = array![1.0, 2.0];
        let zero = array![1.0, 0.0, 2.0];

        // Act
        let len_err = validate_scales(&short, 3).unwrap_err();
        let zero_err = validate_scales(&zero, 3).unwrap_err();

        // Assert
        assert_eq!(len_err, OptError::ScalesDimMismatch { expected: 3, found: 2 });
        assert!(matches!(zero_err, OptError::InvalidScale { index: 1, .. }));
        assert!(validate_scales(&array![0.5, 1.0, 2.0], 3).is_ok());
    }
}
