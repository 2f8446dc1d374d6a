//! Collaborator interfaces consumed by the coordinator.
//!
//! - [`Metric`] / [`MetricSet`]: similarity metrics exposed by the
//!   registration context. Only stochastic metrics implement
//!   `select_new_samples`; for every other metric it is a no-op.
//! - [`OptimizerStrategy`]: a pluggable optimizer family (gradient descent,
//!   quasi-Newton, evolutionary, ...). The coordinator reads its current
//!   position, hands it scale vectors and asks it to run one resolution
//!   level.
//! - [`Capability`]: the capabilities a strategy may or may not offer. Calls
//!   into an absent capability are checked by the caller and fail fast with
//!   `OptError::UnsupportedOperation` instead of relying on a default
//!   implementation that crashes.
//! - [`LevelSchedule`] / [`LevelOutcome`]: what a strategy is told at level
//!   start and what it reports back.
use crate::optimization::{
    errors::{OptError, OptResult},
    types::{Cost, FnEvalMap, Grad, ResolutionLevel, Scales, Theta},
};

/// Optional capabilities of metrics and optimizer strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Metric draws a fresh random subset of image samples.
    SelectNewSamples,
    /// Strategy exposes its current position.
    GetCurrentPosition,
    /// Strategy accepts a per-parameter scale vector.
    SetScales,
    /// Strategy lets other components overwrite its current position.
    SetCurrentPositionPublic,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Capability::SelectNewSamples => "select new samples",
            Capability::GetCurrentPosition => "get current position",
            Capability::SetScales => "set scales",
            Capability::SetCurrentPositionPublic => "set current position publicly",
        };
        f.write_str(label)
    }
}

/// Similarity metric handle.
///
/// Required:
/// - `name()`: label used in diagnostics.
/// - `value(&Theta)`: cost contribution at the given parameters.
///
/// Optional:
/// - `gradient(&Theta)`: analytic gradient; strategies fall back to finite
///   differences on `GradientNotImplemented`.
/// - `supports_resampling()` / `select_new_samples()`: stochastic metrics
///   override both. The default is a deterministic metric for which
///   resampling is a silent no-op.
pub trait Metric {
    fn name(&self) -> &str;
    fn value(&self, params: &Theta) -> OptResult<Cost>;

    fn gradient(&self, _params: &Theta) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }

    fn supports_resampling(&self) -> bool {
        false
    }

    /// Draw a new random sample subset.
    ///
    /// Only called when `supports_resampling()` returns `true`; overriding
    /// this method alone leaves the metric deterministic.
    fn select_new_samples(&mut self) {}
}

/// Ordered collection of metric handles.
///
/// The set is borrowed by the coordinator and the strategies; ordering is the
/// insertion order and is the order in which samples are refreshed.
#[derive(Default)]
pub struct MetricSet {
    metrics: Vec<Box<dyn Metric>>,
}

impl MetricSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<M: Metric + 'static>(&mut self, metric: M) {
        self.metrics.push(Box::new(metric));
    }

    pub fn with<M: Metric + 'static>(mut self, metric: M) -> Self {
        self.push(metric);
        self
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&dyn Metric> {
        self.metrics.get(index).map(|m| m.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Metric> + '_ {
        self.metrics.iter().map(|m| m.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Metric>> + '_ {
        self.metrics.iter_mut()
    }
}

impl From<Vec<Box<dyn Metric>>> for MetricSet {
    fn from(metrics: Vec<Box<dyn Metric>>) -> Self {
        Self { metrics }
    }
}

impl std::fmt::Debug for MetricSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.metrics.iter().map(|m| m.name())).finish()
    }
}

/// What a strategy is told when a resolution level starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSchedule {
    pub level: ResolutionLevel,
    /// Refresh metric samples once per iteration during this level.
    pub new_samples_every_iteration: bool,
}

/// Normalized result of one resolution level.
///
/// - `best_cost`: lowest cost reached.
/// - `converged`: `true` if the solver reported a terminating status.
/// - `status`: human-readable termination status.
/// - `fn_evals`: evaluation counters as reported by the backend.
/// - `grad_norm`: norm of the last available gradient, if any.
/// - `sample_refreshes`: number of per-iteration sample refreshes.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelOutcome {
    pub level: ResolutionLevel,
    pub best_cost: Cost,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
    pub sample_refreshes: usize,
}

/// Pluggable optimizer family.
///
/// Required methods cover what every strategy must offer; the
/// position-publishing capability is optional and advertised through
/// [`OptimizerStrategy::supports`].
pub trait OptimizerStrategy {
    fn name(&self) -> &str;

    /// Current parameters. Owned by the strategy; callers only read.
    fn current_position(&self) -> &Theta;

    /// Install a per-parameter scale vector.
    ///
    /// # Errors
    /// Implementations reject length mismatches and non-positive entries.
    fn set_scales(&mut self, scales: Scales) -> OptResult<()>;

    /// Run the strategy on one resolution level.
    ///
    /// When `schedule.new_samples_every_iteration` is set, the strategy must
    /// refresh the metric samples once per iteration.
    fn run_level(
        &mut self, metrics: &mut MetricSet, schedule: &LevelSchedule,
    ) -> OptResult<LevelOutcome>;

    fn supports(&self, capability: Capability) -> bool {
        matches!(capability, Capability::GetCurrentPosition | Capability::SetScales)
    }

    fn set_current_position_public(&mut self, _position: &Theta) -> OptResult<()> {
        Err(OptError::UnsupportedOperation {
            strategy: self.name().to_string(),
            capability: Capability::SetCurrentPositionPublic,
        })
    }
}
