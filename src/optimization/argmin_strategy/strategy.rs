//! [`ArgminStrategy`] — L-BFGS optimizer strategy backed by argmin.
//!
//! Purpose
//! -------
//! Provide a ready-to-use [`OptimizerStrategy`] so the coordinator can be
//! driven end to end without an external optimizer. Each resolution level
//! minimizes the sum of the registration's metric values, starting from the
//! position the previous level ended at.
//!
//! Key behaviors
//! -------------
//! - Optimizes in scaled space `θₛ = θ ⊙ s`; see [`super::adapter`].
//! - Scales come from `set_scales`, else from the configured sinus schedule
//!   (installed on first use), else all ones.
//! - When the level's schedule asks for new samples every iteration, a
//!   [`SampleRefreshObserver`] is attached for that level.
//! - Advertises every optimizer capability, including
//!   [`Capability::SetCurrentPositionPublic`].
//!
//! Invariants & assumptions
//! ------------------------
//! - The metric set is moved into an `Rc<RefCell<_>>` for one level and is
//!   always handed back to the caller before `run_level` returns, on success
//!   and on error.
//! - The position only changes on a successful level or through
//!   `set_current_position_public`; its length never changes.
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use log::debug;
use ndarray::Array1;

use crate::optimization::{
    argmin_strategy::{
        adapter::ScaledCostAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        observer::SampleRefreshObserver,
        options::{LineSearcher, StrategyOptions},
        run::{run_lbfgs, SolverOutcome},
        validation::validate_position,
    },
    coordinator::{
        scales::{sinus_scales, validate_scales},
        traits::{Capability, LevelOutcome, LevelSchedule, MetricSet, OptimizerStrategy},
    },
    errors::{OptError, OptResult},
    types::{Scales, Theta},
};

/// Name reported by [`ArgminStrategy::name`].
pub const ARGMIN_STRATEGY_NAME: &str = "argmin-lbfgs";

/// L-BFGS optimizer strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgminStrategy {
    position: Theta,
    scales: Option<Scales>,
    options: StrategyOptions,
}

impl ArgminStrategy {
    /// Create a strategy at `initial_position`.
    ///
    /// # Errors
    /// - [`OptError::InvalidBestParam`] for non-finite initial entries.
    /// - Scale-schedule errors when `options.sinus_scales` is invalid.
    pub fn new(initial_position: Theta, options: StrategyOptions) -> OptResult<Self> {
        validate_position(&initial_position, initial_position.len())?;
        if let Some(schedule) = options.sinus_scales {
            sinus_scales(schedule.amplitude, schedule.frequency, initial_position.len())?;
        }
        Ok(Self { position: initial_position, scales: None, options })
    }

    pub fn options(&self) -> &StrategyOptions {
        &self.options
    }

    /// Installed scales, if any.
    pub fn scales(&self) -> Option<&Scales> {
        self.scales.as_ref()
    }

    fn level_scales(&mut self) -> OptResult<Scales> {
        if let Some(scales) = &self.scales {
            return Ok(scales.clone());
        }
        match self.options.sinus_scales {
            Some(schedule) => {
                let scales =
                    sinus_scales(schedule.amplitude, schedule.frequency, self.position.len())?;
                debug!(
                    "{ARGMIN_STRATEGY_NAME}: installed sinus scales (amplitude {}, frequency {})",
                    schedule.amplitude, schedule.frequency
                );
                self.scales = Some(scales.clone());
                Ok(scales)
            }
            None => Ok(Array1::ones(self.position.len())),
        }
    }

    fn solve(
        &self, metrics: Rc<RefCell<MetricSet>>, scales: &Scales, schedule: &LevelSchedule,
        refreshes: Rc<Cell<usize>>,
    ) -> OptResult<SolverOutcome> {
        let adapter = ScaledCostAdapter::new(Rc::clone(&metrics), scales.clone());
        let theta0 = adapter.to_scaled(&self.position);
        let observer = schedule
            .new_samples_every_iteration
            .then(|| SampleRefreshObserver::new(metrics, refreshes));

        match self.options.line_searcher {
            LineSearcher::MoreThuente => {
                let solver = build_optimizer_more_thuente(&self.options)?;
                run_lbfgs(theta0, &self.options, adapter, solver, observer)
            }
            LineSearcher::HagerZhang => {
                let solver = build_optimizer_hager_zhang(&self.options)?;
                run_lbfgs(theta0, &self.options, adapter, solver, observer)
            }
        }
    }
}

impl OptimizerStrategy for ArgminStrategy {
    fn name(&self) -> &str {
        ARGMIN_STRATEGY_NAME
    }

    fn current_position(&self) -> &Theta {
        &self.position
    }

    fn set_scales(&mut self, scales: Scales) -> OptResult<()> {
        validate_scales(&scales, self.position.len())?;
        self.scales = Some(scales);
        Ok(())
    }

    /// Minimize `Σ metric.value(θ)` for one level.
    ///
    /// `LevelOutcome::grad_norm` is measured in scaled space.
    ///
    /// # Errors
    /// - [`OptError::EmptyMetricSet`] when there is nothing to minimize.
    /// - Metric, validation and argmin errors from the solve.
    fn run_level(
        &mut self, metrics: &mut MetricSet, schedule: &LevelSchedule,
    ) -> OptResult<LevelOutcome> {
        if metrics.is_empty() {
            return Err(OptError::EmptyMetricSet);
        }
        let scales = self.level_scales()?;
        debug!(
            "{ARGMIN_STRATEGY_NAME}: level {} starting with {} metrics ({:?})",
            schedule.level,
            metrics.len(),
            self.options.line_searcher
        );

        let shared = Rc::new(RefCell::new(std::mem::take(metrics)));
        let refreshes = Rc::new(Cell::new(0));
        let solved = self.solve(Rc::clone(&shared), &scales, schedule, Rc::clone(&refreshes));
        *metrics = Rc::try_unwrap(shared).map_err(|_| OptError::MetricSetStillShared)?.into_inner();
        let solved = solved?;

        self.position = &solved.best_param / &scales;
        debug!(
            "{ARGMIN_STRATEGY_NAME}: level {} finished after {} iterations ({}), cost {}",
            schedule.level, solved.iterations, solved.status, solved.best_cost
        );
        Ok(LevelOutcome {
            level: schedule.level,
            best_cost: solved.best_cost,
            converged: solved.converged,
            status: solved.status,
            iterations: solved.iterations,
            fn_evals: solved.fn_evals,
            grad_norm: solved.grad_norm,
            sample_refreshes: refreshes.get(),
        })
    }

    fn supports(&self, capability: Capability) -> bool {
        matches!(
            capability,
            Capability::GetCurrentPosition
                | Capability::SetScales
                | Capability::SetCurrentPositionPublic
        )
    }

    fn set_current_position_public(&mut self, position: &Theta) -> OptResult<()> {
        validate_position(position, self.position.len())?;
        self.position = position.clone();
        Ok(())
    }
}
