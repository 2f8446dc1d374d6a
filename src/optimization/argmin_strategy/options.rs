//! Configuration surface of the argmin-backed strategy.
//!
//! - [`StrategyOptions`]: tolerances, line search, L-BFGS memory, verbosity
//!   and an optional sinus scale schedule.
//! - [`Tolerances`]: stopping rules; at least one must be set.
//! - [`LineSearcher`]: line search used by L-BFGS, parsed
//!   case-insensitively.
//! - [`SinusScales`]: amplitude/frequency pair fed to
//!   [`sinus_scales`](crate::optimization::coordinator::scales::sinus_scales).
use std::str::FromStr;

use crate::optimization::{
    argmin_strategy::{
        types::DEFAULT_LBFGS_MEM,
        validation::{verify_tol_cost, verify_tol_grad},
    },
    errors::{OptError, OptResult},
};

/// Choice of line search used inside the L-BFGS solver.
///
/// Parsing accepts `"MoreThuente"` and `"HagerZhang"` in any case. Unknown
/// names return `OptError::InvalidLineSearch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Numerical tolerances and iteration limits.
///
/// - `tol_grad`: terminate when the gradient norm falls below this threshold.
/// - `tol_cost`: terminate when the change in cost falls below this threshold.
/// - `max_iter`: hard cap on the number of iterations per level.
///
/// Any field can be `None` but **at least one** of the three must be provided
/// (see [`Tolerances::new`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for
    ///   non-finite or non-positive tolerances.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        verify_tol_grad(tol_grad)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self { tol_grad: Some(1e-6), tol_cost: None, max_iter: Some(300) }
    }
}

/// Parameters of a sinus scale schedule installed at level start when no
/// explicit scales were set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinusScales {
    pub amplitude: f64,
    pub frequency: f64,
}

/// Strategy-level configuration.
///
/// Default:
/// - `tols`: `tol_grad = 1e-6`, `tol_cost = None`, `max_iter = 300`
/// - `line_searcher`: `MoreThuente`
/// - `lbfgs_mem`: `None` (uses [`DEFAULT_LBFGS_MEM`])
/// - `verbose`: `false`
/// - `sinus_scales`: `None`
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub lbfgs_mem: Option<usize>,
    pub verbose: bool,
    pub sinus_scales: Option<SinusScales>,
}

impl StrategyOptions {
    /// Create validated strategy options.
    ///
    /// # Errors
    /// [`OptError::InvalidLBFGSMem`] when `lbfgs_mem == Some(0)`.
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(OptError::InvalidLBFGSMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { tols, line_searcher, lbfgs_mem, verbose: false, sinus_scales: None })
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_sinus_scales(mut self, amplitude: f64, frequency: f64) -> Self {
        self.sinus_scales = Some(SinusScales { amplitude, frequency });
        self
    }

    /// History size handed to L-BFGS.
    pub fn lbfgs_mem(&self) -> usize {
        self.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM)
    }
}

impl Default for StrategyOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances::default(),
            line_searcher: LineSearcher::MoreThuente,
            lbfgs_mem: None,
            verbose: false,
            sinus_scales: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Line-search parsing.
    // - Tolerance and L-BFGS memory validation.
    // - Defaults and builder-style setters.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure line-search names parse case-insensitively.
    //
    // Given
    // -----
    // - "morethuente", "HAGERZHANG", "Brent".
    //
    // Expect
    // ------
    // - The two known names parse; "Brent" yields `InvalidLineSearch`.
    fn line_searcher_parses_case_insensitively() {
        assert_eq!("morethuente".parse::<LineSearcher>().unwrap(), LineSearcher::MoreThuente);
        assert_eq!("HAGERZHANG".parse::<LineSearcher>().unwrap(), LineSearcher::HagerZhang);
        assert!(matches!(
            "Brent".parse::<LineSearcher>(),
            Err(OptError::InvalidLineSearch { ref name, .. }) if name == "Brent"
        ));
    }

    #[test]
    // Purpose
    // -------
    // Verify tolerance validation rules.
    //
    // Given
    // -----
    // - All `None`; `max_iter = 0`; a negative gradient tolerance.
    //
    // Expect
    // ------
    // - `NoTolerancesProvided`, `InvalidMaxIter`, `InvalidTolGrad`.
    fn tolerances_enforce_rules() {
        assert_eq!(Tolerances::new(None, None, None).unwrap_err(), OptError::NoTolerancesProvided);
        assert!(matches!(
            Tolerances::new(None, None, Some(0)),
            Err(OptError::InvalidMaxIter { max_iter: 0, .. })
        ));
        assert!(matches!(
            Tolerances::new(Some(-1.0), None, Some(10)),
            Err(OptError::InvalidTolGrad { .. })
        ));
        assert!(Tolerances::new(None, None, Some(10)).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Check L-BFGS memory validation, defaults and setters.
    //
    // Given
    // -----
    // - `lbfgs_mem = Some(0)`; default options; options with setters applied.
    //
    // Expect
    // ------
    // - `InvalidLBFGSMem` for zero.
    // - The default uses `DEFAULT_LBFGS_MEM`, More–Thuente, no scales.
    // - Setters store verbosity and the sinus schedule.
    fn strategy_options_validate_memory_and_apply_setters() {
        let tols = Tolerances::default();
        assert!(matches!(
            StrategyOptions::new(tols, LineSearcher::HagerZhang, Some(0)),
            Err(OptError::InvalidLBFGSMem { mem: 0, .. })
        ));

        let defaults = StrategyOptions::default();
        assert_eq!(defaults.lbfgs_mem(), DEFAULT_LBFGS_MEM);
        assert_eq!(defaults.line_searcher, LineSearcher::MoreThuente);
        assert!(defaults.sinus_scales.is_none());

        let opts = StrategyOptions::new(tols, LineSearcher::HagerZhang, Some(11))
            .expect("valid options")
            .with_verbose(true)
            .with_sinus_scales(2.0, 1.0);
        assert_eq!(opts.lbfgs_mem(), 11);
        assert!(opts.verbose);
        assert_eq!(opts.sinus_scales, Some(SinusScales { amplitude: 2.0, frequency: 1.0 }));
    }
}
