//! coordinator::sampling — synchronized sample refresh across metrics.
//!
//! Purpose
//! -------
//! When stochastic (sampled) metrics are combined in one cost function, all of
//! them must draw a new random sample subset at the same moment so the
//! per-iteration noise stays in step. [`refresh_samples`] is that single
//! synchronization point.
//!
//! Key behaviors
//! -------------
//! - Walks the metric set in order and calls `select_new_samples` on every
//!   metric that reports `supports_resampling()`.
//! - Deterministic metrics are skipped silently; a heterogeneous metric set
//!   is the normal case. A metric that overrides `select_new_samples` but not
//!   `supports_resampling` counts as deterministic.
//! - An empty set is a no-op.
//!
//! Downstream usage
//! ----------------
//! - Optimizer strategies call this once per iteration when the level's
//!   `NewSamplesEveryIteration` flag is set, either directly or through
//!   `OptimizerCoordinator::refresh_samples_if_enabled`.
use log::debug;

use crate::optimization::coordinator::traits::MetricSet;

/// Ask every resampling-capable metric to draw a new sample subset.
///
/// Returns the number of metrics that actually resampled.
pub fn refresh_samples(metrics: &mut MetricSet) -> usize {
    let mut refreshed = 0usize;
    for metric in metrics.iter_mut() {
        if metric.supports_resampling() {
            metric.select_new_samples();
            refreshed += 1;
        }
    }
    debug!("refresh_samples: {refreshed}/{} metrics drew new samples", metrics.len());
    refreshed
}
