//! coordinator::hooks — resolution lifecycle hooks.
//!
//! Purpose
//! -------
//! Provide the entry points a multi-resolution controller calls around each
//! resolution level and at the end of the run, and keep the per-level state
//! those calls imply.
//!
//! Key behaviors
//! -------------
//! - [`OptimizerCoordinator::before_each_resolution`] resets and then reads
//!   the level's `NewSamplesEveryIteration` flag, scoped to
//!   (component label, level, entry 0), defaulting to `false`.
//! - [`OptimizerCoordinator::after_each_resolution`] closes the level.
//! - [`OptimizerCoordinator::after_registration`] fingerprints the strategy's
//!   final position and emits `Registration result checksum: <N>`.
//! - [`OptimizerCoordinator::refresh_samples_if_enabled`] is the
//!   per-iteration entry point for strategies.
//! - [`OptimizerCoordinator::publish_position`] performs the capability
//!   check before letting a component overwrite the strategy's position.
//!
//! Invariants & assumptions
//! ------------------------
//! - State machine: `Idle → LevelActive → Idle` per level, and
//!   `Idle | LevelActive | Finished → Finished` on `after_registration`.
//! - Once a level is active its flag never changes until the next
//!   `before_each_resolution`.
//! - Starting a level after `Finished`, closing a level that is not active,
//!   or refreshing samples outside a level is a hook-order violation.
//! - `after_registration` never mutates registration state and is
//!   idempotent on an unchanged final position.
//!
//! Conventions
//! -----------
//! - Configuration errors abort the run; the coordinator does not retry or
//!   fall back.
//! - Hooks log at `debug`; the checksum line goes to the context's sink.
use log::{debug, error};

use crate::optimization::{
    coordinator::{
        context::RegistrationContext,
        fingerprint::{checksum_line, fingerprint},
        sampling::refresh_samples,
        traits::{Capability, LevelSchedule, MetricSet},
    },
    errors::{OptError, OptResult},
    types::{Checksum, ResolutionLevel, Theta},
};

/// Per-level option: draw new metric samples every iteration.
pub const NEW_SAMPLES_EVERY_ITERATION: &str = "NewSamplesEveryIteration";

/// Component label used when none is supplied.
pub const DEFAULT_COMPONENT_LABEL: &str = "Optimizer";

/// Lifecycle state of the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Idle,
    LevelActive { level: ResolutionLevel, new_samples_every_iteration: bool },
    Finished { checksum: Checksum },
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleState::Idle => write!(f, "idle"),
            LifecycleState::LevelActive { level, new_samples_every_iteration } => write!(
                f,
                "level {level} active (new samples every iteration: {new_samples_every_iteration})"
            ),
            LifecycleState::Finished { checksum } => write!(f, "finished (checksum {checksum})"),
        }
    }
}

/// Optimizer-side coordinator driven by the multi-resolution controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizerCoordinator {
    component_label: String,
    state: LifecycleState,
}

impl Default for OptimizerCoordinator {
    fn default() -> Self {
        Self::new(DEFAULT_COMPONENT_LABEL)
    }
}

impl OptimizerCoordinator {
    /// Create a coordinator whose configuration reads are scoped to `label`.
    pub fn new(component_label: impl Into<String>) -> Self {
        Self { component_label: component_label.into(), state: LifecycleState::Idle }
    }

    pub fn component_label(&self) -> &str {
        &self.component_label
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Flag of the active level; `false` outside a level.
    pub fn new_samples_every_iteration(&self) -> bool {
        matches!(self.state, LifecycleState::LevelActive { new_samples_every_iteration: true, .. })
    }

    /// Schedule of the active level, if any.
    pub fn level_schedule(&self) -> Option<LevelSchedule> {
        match self.state {
            LifecycleState::LevelActive { level, new_samples_every_iteration } => {
                Some(LevelSchedule { level, new_samples_every_iteration })
            }
            _ => None,
        }
    }

    /// Start-of-level hook.
    ///
    /// Resets the flag, reads `NewSamplesEveryIteration` for `ctx.level` and
    /// activates the level. An already active level is closed implicitly.
    ///
    /// # Errors
    /// - [`OptError::HookOrderViolation`] after `after_registration`.
    /// - [`OptError::Config`] when the stored flag is malformed; the
    ///   coordinator is left `Idle`.
    pub fn before_each_resolution(
        &mut self, ctx: &mut RegistrationContext<'_>,
    ) -> OptResult<LevelSchedule> {
        if let LifecycleState::Finished { .. } = self.state {
            return Err(self.order_violation("before_each_resolution"));
        }
        if let LifecycleState::LevelActive { level, .. } = self.state {
            debug!("{}: level {level} closed implicitly by next level start", self.component_label);
        }

        self.state = LifecycleState::Idle;
        let new_samples_every_iteration = ctx.config.read_or(
            NEW_SAMPLES_EVERY_ITERATION,
            &self.component_label,
            ctx.level,
            0,
            false,
        )?;
        self.state =
            LifecycleState::LevelActive { level: ctx.level, new_samples_every_iteration };

        debug!(
            "{}: level {} started (new samples every iteration: {new_samples_every_iteration})",
            self.component_label, ctx.level
        );
        Ok(LevelSchedule { level: ctx.level, new_samples_every_iteration })
    }

    /// End-of-level hook.
    ///
    /// # Errors
    /// [`OptError::HookOrderViolation`] when no level is active.
    pub fn after_each_resolution(&mut self) -> OptResult<()> {
        match self.state {
            LifecycleState::LevelActive { level, .. } => {
                debug!("{}: level {level} finished", self.component_label);
                self.state = LifecycleState::Idle;
                Ok(())
            }
            _ => Err(self.order_violation("after_each_resolution")),
        }
    }

    /// End-of-run hook: fingerprint the final position and report it.
    ///
    /// Emits exactly one `Registration result checksum: <N>` line per call.
    /// Calling it again on an unchanged position emits the same line.
    ///
    /// # Errors
    /// [`OptError::UnsupportedOperation`] when the strategy does not expose
    /// its current position.
    pub fn after_registration(&mut self, ctx: &mut RegistrationContext<'_>) -> OptResult<Checksum> {
        require_capability(ctx, Capability::GetCurrentPosition)?;

        let position = ctx.optimizer.current_position();
        let checksum = fingerprint(position);
        debug!(
            "{}: fingerprinted {} final parameters from '{}'",
            self.component_label,
            position.len(),
            ctx.optimizer.name()
        );
        ctx.sink.emit(&checksum_line(checksum));

        self.state = LifecycleState::Finished { checksum };
        Ok(checksum)
    }

    /// Per-iteration refresh honoring the active level's flag.
    ///
    /// Returns the number of metrics that drew new samples (`0` when the flag
    /// is off).
    ///
    /// # Errors
    /// [`OptError::HookOrderViolation`] when no level is active.
    pub fn refresh_samples_if_enabled(&self, metrics: &mut MetricSet) -> OptResult<usize> {
        match self.state {
            LifecycleState::LevelActive { new_samples_every_iteration: true, .. } => {
                Ok(refresh_samples(metrics))
            }
            LifecycleState::LevelActive { new_samples_every_iteration: false, .. } => Ok(0),
            _ => Err(self.order_violation("refresh_samples")),
        }
    }

    /// Overwrite the strategy's current position on behalf of another
    /// component.
    ///
    /// # Errors
    /// - [`OptError::UnsupportedOperation`] when the strategy does not
    ///   advertise [`Capability::SetCurrentPositionPublic`].
    /// - Whatever the strategy returns from `set_current_position_public`.
    pub fn publish_position(
        &self, ctx: &mut RegistrationContext<'_>, position: &Theta,
    ) -> OptResult<()> {
        require_capability(ctx, Capability::SetCurrentPositionPublic)?;
        ctx.optimizer.set_current_position_public(position)
    }

    fn order_violation(&self, hook: &'static str) -> OptError {
        OptError::HookOrderViolation { hook, state: self.state.to_string() }
    }
}

fn require_capability(ctx: &RegistrationContext<'_>, capability: Capability) -> OptResult<()> {
    if ctx.optimizer.supports(capability) {
        return Ok(());
    }
    let strategy = ctx.optimizer.name().to_string();
    error!("optimizer strategy '{strategy}' does not implement '{capability}'");
    Err(OptError::UnsupportedOperation { strategy, capability })
}
