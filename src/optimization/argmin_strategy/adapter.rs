//! Adapter that exposes a [`MetricSet`] as an `argmin` problem in scaled space.
//!
//! The registration cost is the sum of all metric values `f(θ) = Σ mₖ(θ)`.
//! argmin works on scaled parameters `θₛ = θ ⊙ s`, so the adapter evaluates
//! `c(θₛ) = f(θₛ ⊘ s)` and returns `∇c(θₛ) = ∇f(θₛ ⊘ s) ⊘ s`. When a metric
//! has no analytic gradient we finite-difference the scaled cost directly, so
//! no division is needed in that branch.
use std::{cell::RefCell, rc::Rc};

use argmin::core::{CostFunction, Error, Gradient};

use crate::optimization::{
    argmin_strategy::{finite_diff::fd_gradient, validation::validate_grad},
    coordinator::traits::MetricSet,
    errors::{OptError, OptResult},
    types::{Cost, Grad, Scales, Theta},
};

/// Bridges a shared [`MetricSet`] to `argmin`'s `CostFunction` and `Gradient`.
///
/// The metric set is shared with the sample-refresh observer for the
/// duration of one level; see [`super::observer`].
#[derive(Debug, Clone)]
pub struct ScaledCostAdapter {
    metrics: Rc<RefCell<MetricSet>>,
    scales: Scales,
}

impl ScaledCostAdapter {
    pub fn new(metrics: Rc<RefCell<MetricSet>>, scales: Scales) -> Self {
        Self { metrics, scales }
    }

    pub fn scales(&self) -> &Scales {
        &self.scales
    }

    /// `θ ⊙ s`
    pub fn to_scaled(&self, theta: &Theta) -> Theta {
        theta * &self.scales
    }

    /// `θₛ ⊘ s`
    pub fn to_unscaled(&self, scaled: &Theta) -> Theta {
        scaled / &self.scales
    }

    /// Unscaled cost `f(θ) = Σ mₖ(θ)`.
    ///
    /// # Errors
    /// - Any metric error.
    /// - [`OptError::NonFiniteCost`] if the sum is not finite.
    pub fn total_value(&self, theta: &Theta) -> OptResult<Cost> {
        let metrics = self.metrics.try_borrow().map_err(|_| OptError::MetricSetStillShared)?;
        let mut total = 0.0;
        for metric in metrics.iter() {
            total += metric.value(theta)?;
        }
        if !total.is_finite() {
            return Err(OptError::NonFiniteCost { value: total });
        }
        Ok(total)
    }

    /// Unscaled analytic gradient `∇f(θ) = Σ ∇mₖ(θ)`.
    ///
    /// # Errors
    /// - [`OptError::GradientNotImplemented`] as soon as one metric lacks an
    ///   analytic gradient.
    /// - Validation errors for any metric gradient.
    pub fn total_gradient(&self, theta: &Theta) -> OptResult<Grad> {
        let metrics = self.metrics.try_borrow().map_err(|_| OptError::MetricSetStillShared)?;
        let mut total = Grad::zeros(theta.len());
        for metric in metrics.iter() {
            let g = metric.gradient(theta)?;
            validate_grad(&g, theta.len())?;
            total += &g;
        }
        Ok(total)
    }

    fn scaled_cost(&self, scaled: &Theta) -> OptResult<Cost> {
        self.total_value(&self.to_unscaled(scaled))
    }
}

impl CostFunction for ScaledCostAdapter {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate `c(θₛ) = f(θₛ ⊘ s)`.
    fn cost(&self, scaled: &Self::Param) -> Result<Self::Output, Error> {
        Ok(self.scaled_cost(scaled)?)
    }
}

impl Gradient for ScaledCostAdapter {
    type Param = Theta;
    type Gradient = Grad;

    /// Evaluate `∇c(θₛ)`.
    ///
    /// Analytic metric gradients are validated and divided by the scales.
    /// On `GradientNotImplemented` the scaled cost is finite-differenced.
    fn gradient(&self, scaled: &Self::Param) -> Result<Self::Gradient, Error> {
        let theta = self.to_unscaled(scaled);
        match self.total_gradient(&theta) {
            Ok(g) => Ok(g / &self.scales),
            Err(OptError::GradientNotImplemented) => {
                Ok(fd_gradient(scaled, |x| self.scaled_cost(x))?)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::coordinator::traits::Metric;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Cost summation over several metrics in scaled space.
    // - Chain-rule scaling of analytic gradients.
    // - Finite-difference fallback when a metric has no gradient.
    // - Non-finite cost rejection.
    //
    // They intentionally DO NOT cover:
    // - Solver behavior (see `run` and `strategy`).
    // -------------------------------------------------------------------------

    /// f(θ) = Σ wᵢ (θᵢ - cᵢ)², with an optional analytic gradient.
    struct Quadratic {
        center: Theta,
        weight: f64,
        analytic: bool,
    }

    impl Metric for Quadratic {
        fn name(&self) -> &str {
            "quadratic"
        }

        fn value(&self, params: &Theta) -> OptResult<Cost> {
            let d = params - &self.center;
            Ok(self.weight * d.dot(&d))
        }

        fn gradient(&self, params: &Theta) -> OptResult<Grad> {
            if !self.analytic {
                return Err(OptError::GradientNotImplemented);
            }
            Ok((params - &self.center) * (2.0 * self.weight))
        }
    }

    struct Exploding;

    impl Metric for Exploding {
        fn name(&self) -> &str {
            "exploding"
        }

        fn value(&self, _params: &Theta) -> OptResult<Cost> {
            Ok(f64::INFINITY)
        }
    }

    fn shared(metrics: MetricSet) -> Rc<RefCell<MetricSet>> {
        Rc::new(RefCell::new(metrics))
    }

    #[test]
    // Purpose
    // -------
    // Verify that the cost sums every metric at the unscaled position.
    //
    // Given
    // -----
    // - Two quadratics centered at [1, 2] (w = 1) and [0, 0] (w = 0.5).
    // - scales = [2, 4]; scaled point θₛ = [2, 8] (θ = [1, 2]).
    //
    // Expect
    // ------
    // - cost = 0 + 0.5 · (1 + 4) = 2.5.
    fn cost_sums_metrics_at_unscaled_point() {
        // Arrange
        let metrics = MetricSet::new()
            .with(Quadratic { center: array![1.0, 2.0], weight: 1.0, analytic: true })
            .with(Quadratic { center: array![0.0, 0.0], weight: 0.5, analytic: true });
        let adapter = ScaledCostAdapter::new(shared(metrics), array![2.0, 4.0]);

        // Act
        let cost = adapter.cost(&array![2.0, 8.0]).expect("finite cost");

        // Assert
        assert_relative_eq!(cost, 2.5, epsilon = 1e-12);
        assert_eq!(adapter.to_scaled(&array![1.0, 2.0]), array![2.0, 8.0]);
    }

    #[test]
    // Purpose
    // -------
    // Check the chain rule on analytic gradients and agreement with the
    // finite-difference fallback.
    //
    // Given
    // -----
    // - One quadratic centered at [0, 0] (w = 1), scales = [2, 0.5].
    // - θₛ = [2, 1] so θ = [1, 2] and ∇f = [2, 4].
    //
    // Expect
    // ------
    // - Analytic ∇c = [1, 8].
    // - The same metric without an analytic gradient gives ≈ [1, 8].
    fn gradient_applies_chain_rule_and_matches_fallback() {
        // Arrange
        let scales = array![2.0, 0.5];
        let point = array![2.0, 1.0];
        let analytic = ScaledCostAdapter::new(
            shared(MetricSet::new().with(Quadratic {
                center: array![0.0, 0.0],
                weight: 1.0,
                analytic: true,
            })),
            scales.clone(),
        );
        let numeric = ScaledCostAdapter::new(
            shared(MetricSet::new().with(Quadratic {
                center: array![0.0, 0.0],
                weight: 1.0,
                analytic: false,
            })),
            scales,
        );

        // Act
        let g_analytic = analytic.gradient(&point).expect("analytic gradient");
        let g_numeric = numeric.gradient(&point).expect("numeric gradient");

        // Assert
        assert_relative_eq!(g_analytic[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(g_analytic[1], 8.0, epsilon = 1e-12);
        assert_relative_eq!(g_numeric[0], 1.0, epsilon = 1e-5);
        assert_relative_eq!(g_numeric[1], 8.0, epsilon = 1e-5);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a non-finite total cost is reported as `NonFiniteCost`.
    //
    // Given
    // -----
    // - A metric returning +∞.
    //
    // Expect
    // ------
    // - `total_value` fails with `NonFiniteCost`.
    fn non_finite_cost_is_rejected() {
        // Arrange
        let adapter = ScaledCostAdapter::new(shared(MetricSet::new().with(Exploding)), array![1.0]);

        // Act
        let err = adapter.total_value(&array![0.0]).unwrap_err();

        // Assert
        assert!(matches!(err, OptError::NonFiniteCost { .. }));
    }
}
