//! registration — reference multi-resolution driver.
//!
//! Purpose
//! -------
//! Stand in for the external multi-resolution controller: advance through
//! the coarse-to-fine levels, call the coordinator's lifecycle hooks in the
//! documented order, and let the optimizer strategy run each level.
//!
//! Key behaviors
//! -------------
//! - Reads `NumberOfResolutions` (default `1`, must be `≥ 1`).
//! - Per level `0..n`: `before_each_resolution` → `run_level` →
//!   `after_each_resolution`.
//! - After the last level: `after_registration`, which emits the checksum
//!   line through the sink.
//!
//! Invariants & assumptions
//! ------------------------
//! - Any error aborts the run immediately; no checksum is emitted for an
//!   aborted run.
//! - Every run starts from a fresh coordinator state with the same
//!   component label, so one driver can run several registrations.
//! - The metric set and strategy stay owned by the caller; the driver only
//!   borrows them.
use log::debug;

use crate::{
    configuration::{ConfigError, ParameterMap},
    optimization::{
        coordinator::{
            context::RegistrationContext,
            hooks::OptimizerCoordinator,
            report::ReportSink,
            traits::{LevelOutcome, MetricSet, OptimizerStrategy},
        },
        errors::OptResult,
        types::{Checksum, Theta},
    },
};

/// Number of resolution levels to run.
pub const NUMBER_OF_RESOLUTIONS: &str = "NumberOfResolutions";

/// Result of a completed multi-resolution run.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationOutcome {
    /// Strategy position after the last level.
    pub final_position: Theta,
    /// Fingerprint of `final_position`.
    pub checksum: Checksum,
    /// One entry per level, in order.
    pub levels: Vec<LevelOutcome>,
}

/// Coarse-to-fine driver around an [`OptimizerCoordinator`].
#[derive(Debug, Clone, Default)]
pub struct MultiResolutionRegistration {
    coordinator: OptimizerCoordinator,
}

impl MultiResolutionRegistration {
    pub fn new(coordinator: OptimizerCoordinator) -> Self {
        Self { coordinator }
    }

    pub fn coordinator(&self) -> &OptimizerCoordinator {
        &self.coordinator
    }

    /// Read and validate `NumberOfResolutions`.
    ///
    /// # Errors
    /// - [`ConfigError::Malformed`] if the value is not an unsigned integer.
    /// - [`ConfigError::OutOfRange`] if it is `0`.
    pub fn number_of_resolutions(config: &ParameterMap) -> OptResult<usize> {
        let levels: usize = config.read_or(NUMBER_OF_RESOLUTIONS, "", 0, 0, 1)?;
        if levels == 0 {
            return Err(ConfigError::OutOfRange {
                key: NUMBER_OF_RESOLUTIONS.to_string(),
                value: levels.to_string(),
                reason: "at least one resolution level is required",
            }
            .into());
        }
        Ok(levels)
    }

    /// Run every resolution level and fingerprint the result.
    ///
    /// # Errors
    /// Propagates the first configuration, hook-order, capability or
    /// optimizer error.
    pub fn run<S, R>(
        &mut self, config: &ParameterMap, strategy: &mut S, metrics: &mut MetricSet, sink: &mut R,
    ) -> OptResult<RegistrationOutcome>
    where
        S: OptimizerStrategy,
        R: ReportSink,
    {
        self.coordinator = OptimizerCoordinator::new(self.coordinator.component_label());
        let n_levels = Self::number_of_resolutions(config)?;
        debug!("registration: running {n_levels} resolution levels with '{}'", strategy.name());

        let mut levels = Vec::with_capacity(n_levels);
        for level in 0..n_levels {
            let schedule = {
                let mut ctx =
                    RegistrationContext::new(level, config, &mut *metrics, &mut *strategy, &mut *sink);
                self.coordinator.before_each_resolution(&mut ctx)?
            };
            let outcome = strategy.run_level(metrics, &schedule)?;
            self.coordinator.after_each_resolution()?;
            levels.push(outcome);
        }

        let checksum = {
            let mut ctx = RegistrationContext::new(
                n_levels - 1,
                config,
                &mut *metrics,
                &mut *strategy,
                &mut *sink,
            );
            self.coordinator.after_registration(&mut ctx)?
        };
        Ok(RegistrationOutcome {
            final_position: strategy.current_position().clone(),
            checksum,
            levels,
        })
    }
}
