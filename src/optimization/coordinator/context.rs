//! Explicit registration context handed to every lifecycle hook.
//!
//! Instead of reaching into shared global state for "the current resolution
//! level" or "the registration's metrics", hooks receive a
//! [`RegistrationContext`] that borrows exactly the collaborators they may
//! touch for the duration of one call.
use crate::{
    configuration::ParameterMap,
    optimization::{
        coordinator::{
            report::ReportSink,
            traits::{MetricSet, OptimizerStrategy},
        },
        types::ResolutionLevel,
    },
};

/// Borrowed view of the registration run for one hook invocation.
pub struct RegistrationContext<'a> {
    /// Level supplied by the multi-resolution controller.
    pub level: ResolutionLevel,
    /// Read-only configuration.
    pub config: &'a ParameterMap,
    /// Metrics of the registration; owned by the host.
    pub metrics: &'a mut MetricSet,
    /// Active optimizer strategy.
    pub optimizer: &'a mut dyn OptimizerStrategy,
    /// Destination for reported lines.
    pub sink: &'a mut dyn ReportSink,
}

impl<'a> RegistrationContext<'a> {
    pub fn new(
        level: ResolutionLevel, config: &'a ParameterMap, metrics: &'a mut MetricSet,
        optimizer: &'a mut dyn OptimizerStrategy, sink: &'a mut dyn ReportSink,
    ) -> Self {
        Self { level, config, metrics, optimizer, sink }
    }
}
