//! Per-iteration sample refresh as an argmin observer.
//!
//! When a level runs with `NewSamplesEveryIteration = true` the runner
//! attaches a [`SampleRefreshObserver`] with `ObserverMode::Always`. After
//! every solver iteration it asks each stochastic metric for a new sample
//! subset and bumps a shared refresh counter the strategy reports back in
//! its `LevelOutcome`.
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use argmin::core::{observers::Observe, Error, KV};

use crate::optimization::{
    argmin_strategy::types::LbfgsState,
    coordinator::{sampling::refresh_samples, traits::MetricSet},
    errors::OptError,
};

/// Refreshes the shared metric set once per solver iteration.
#[derive(Debug, Clone)]
pub struct SampleRefreshObserver {
    metrics: Rc<RefCell<MetricSet>>,
    refreshes: Rc<Cell<usize>>,
}

impl SampleRefreshObserver {
    pub fn new(metrics: Rc<RefCell<MetricSet>>, refreshes: Rc<Cell<usize>>) -> Self {
        Self { metrics, refreshes }
    }
}

impl Observe<LbfgsState> for SampleRefreshObserver {
    fn observe_iter(&mut self, _state: &LbfgsState, _kv: &KV) -> Result<(), Error> {
        let mut metrics =
            self.metrics.try_borrow_mut().map_err(|_| OptError::MetricSetStillShared)?;
        refresh_samples(&mut metrics);
        self.refreshes.set(self.refreshes.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{
        coordinator::traits::Metric,
        errors::OptResult,
        types::{Cost, Theta},
    };
    use argmin::core::State;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - One refresh round per `observe_iter` call.
    // - Failure while the metric set is borrowed elsewhere.
    // -------------------------------------------------------------------------

    struct Stochastic {
        draws: Rc<Cell<usize>>,
    }

    impl Metric for Stochastic {
        fn name(&self) -> &str {
            "stochastic"
        }

        fn value(&self, _params: &Theta) -> OptResult<Cost> {
            Ok(0.0)
        }

        fn supports_resampling(&self) -> bool {
            true
        }

        fn select_new_samples(&mut self) {
            self.draws.set(self.draws.get() + 1);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that each observed iteration triggers exactly one refresh round.
    //
    // Given
    // -----
    // - Two stochastic metrics and a default iteration state.
    //
    // Expect
    // ------
    // - After three iterations: 3 refresh rounds and 6 metric draws.
    fn each_iteration_refreshes_once() {
        // Arrange
        let draws = Rc::new(Cell::new(0));
        let metrics = Rc::new(RefCell::new(
            MetricSet::new()
                .with(Stochastic { draws: Rc::clone(&draws) })
                .with(Stochastic { draws: Rc::clone(&draws) }),
        ));
        let refreshes = Rc::new(Cell::new(0));
        let mut observer = SampleRefreshObserver::new(Rc::clone(&metrics), Rc::clone(&refreshes));
        let state = LbfgsState::new();

        // Act
        for _ in 0..3 {
            observer.observe_iter(&state, &KV::new()).expect("metric set available");
        }

        // Assert
        assert_eq!(refreshes.get(), 3);
        assert_eq!(draws.get(), 6);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a concurrent borrow surfaces as `MetricSetStillShared`.
    //
    // Given
    // -----
    // - The metric set immutably borrowed while observing.
    //
    // Expect
    // ------
    // - `observe_iter` fails and the counter stays at 0.
    fn borrowed_metric_set_is_reported() {
        // Arrange
        let metrics = Rc::new(RefCell::new(MetricSet::new()));
        let refreshes = Rc::new(Cell::new(0));
        let mut observer = SampleRefreshObserver::new(Rc::clone(&metrics), Rc::clone(&refreshes));
        let _guard = metrics.borrow();

        // Act
        let err = observer.observe_iter(&LbfgsState::new(), &KV::new()).unwrap_err();

        // Assert
        assert_eq!(OptError::from(err), OptError::MetricSetStillShared);
        assert_eq!(refreshes.get(), 0);
    }
}
