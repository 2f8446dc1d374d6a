//! Execution helper that runs an `argmin` L-BFGS solver for one resolution
//! level and returns a validated [`SolverOutcome`].
use argmin::core::{observers::ObserverMode, Executor, Solver, State, TerminationStatus};
use argmin_math::ArgminL2Norm;
#[cfg(feature = "obs_slog")]
use argmin::core::{CostFunction, Gradient};

use crate::optimization::{
    argmin_strategy::{
        adapter::ScaledCostAdapter,
        observer::SampleRefreshObserver,
        options::StrategyOptions,
        types::LbfgsState,
        validation::{validate_best_param, validate_cost},
    },
    errors::OptResult,
    types::{Cost, FnEvalMap, Grad, Theta},
};

/// Normalized result of one solver run, still in scaled space.
///
/// - `best_param`: best scaled parameter vector found.
/// - `best_cost`: cost at `best_param`.
/// - `converged`: `true` if the solver reported a terminating status other
///   than `NotTerminated`.
/// - `status`: human-readable termination status.
/// - `fn_evals`: argmin's counters, e.g. `cost_count`, `gradient_count`.
/// - `grad_norm`: norm of the last available gradient, if present.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOutcome {
    pub best_param: Theta,
    pub best_cost: Cost,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl SolverOutcome {
    /// Build a validated outcome from raw solver state.
    ///
    /// # Errors
    /// Propagates validation errors for `best_param` or `best_cost`.
    pub fn new(
        best_param: Option<Theta>, best_cost: Cost, termination: &TerminationStatus,
        iterations: u64, fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let best_param = validate_best_param(best_param)?;
        validate_cost(best_cost)?;
        let (converged, status) = match termination {
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            other => (true, format!("{other:?}")),
        };
        Ok(Self {
            best_param,
            best_cost,
            converged,
            status,
            iterations: iterations as usize,
            fn_evals,
            grad_norm: grad.map(|g| g.l2_norm()),
        })
    }
}

/// Run an L-BFGS solver on a scaled metric problem.
///
/// Wires the problem and solver into an argmin `Executor`, sets the initial
/// scaled parameters and `max_iters`, attaches the sample-refresh observer
/// when one is given, and (behind `obs_slog`, when `opts.verbose`) a terminal
/// slog observer.
///
/// # Errors
/// - Any argmin runtime error, mapped through `From<argmin::core::Error>`.
/// - Validation errors when building the [`SolverOutcome`].
pub fn run_lbfgs<S>(
    theta0: Theta, opts: &StrategyOptions, problem: ScaledCostAdapter, solver: S,
    refresh: Option<SampleRefreshObserver>,
) -> OptResult<SolverOutcome>
where
    S: Solver<ScaledCostAdapter, LbfgsState> + Send + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&theta0, &problem)?;
    }
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(theta0));
    if let Some(observer) = refresh {
        optimizer = optimizer.add_observer(observer, ObserverMode::Always);
    }
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    SolverOutcome::new(
        result.take_best_param(),
        result.get_best_cost(),
        &termination,
        iterations,
        function_counts,
        grad,
    )
}

#[cfg(feature = "obs_slog")]
fn log_initial_state(theta0: &Theta, problem: &ScaledCostAdapter) -> OptResult<()> {
    let c0 = problem.cost(theta0)?;
    let g0n = problem.gradient(theta0).ok().map(|g| g.l2_norm());
    log::info!(
        "init: cost(theta0) = {:.6}{}",
        c0,
        g0n.map(|n| format!(", ||grad|| = {:.6}", n)).unwrap_or_default()
    );
    Ok(())
}
