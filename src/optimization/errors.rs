use argmin::core::{ArgminError, Error};

use crate::{configuration::ConfigError, optimization::coordinator::traits::Capability};

/// Crate-wide result alias for coordinator and strategy operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Configuration ----
    /// A configuration read failed; fatal to the run.
    Config(ConfigError),

    // ---- Lifecycle ----
    /// A hook was invoked in a lifecycle state that does not allow it.
    HookOrderViolation {
        hook: &'static str,
        state: String,
    },

    /// The optimizer strategy does not offer the requested capability.
    UnsupportedOperation {
        strategy: String,
        capability: Capability,
    },

    // ---- Scale schedule ----
    /// Sinus-schedule amplitude must be finite and strictly positive.
    InvalidScaleAmplitude {
        value: f64,
        reason: &'static str,
    },
    /// Sinus-schedule frequency must be finite and strictly positive.
    InvalidScaleFrequency {
        value: f64,
        reason: &'static str,
    },
    /// Scale vector length does not match the number of parameters.
    ScalesDimMismatch {
        expected: usize,
        found: usize,
    },
    /// Scale entries must be finite and strictly positive.
    InvalidScale {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    // ---- Positions ----
    /// A published position has the wrong number of parameters.
    PositionDimMismatch {
        expected: usize,
        found: usize,
    },

    // ---- Metrics ----
    /// The cost function needs at least one metric.
    EmptyMetricSet,
    /// The metric set could not be handed back after a level.
    MetricSetStillShared,

    // ---- Gradient ----
    /// Implies that FD should be used
    GradientNotImplemented,

    /// Gradient dimensions do not match parameter dimensions.
    GradientDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Gradient elements need to be finite
    InvalidGradient {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    // ---- StrategyOptions ----
    /// Gradient tolerance needs to be positive and finite.
    InvalidTolGrad {
        tol: f64,
        reason: &'static str,
    },
    /// Cost change tolerance needs to be positive and finite.
    InvalidTolCost {
        tol: f64,
        reason: &'static str,
    },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },
    /// At least one tolerance must be provided.
    NoTolerancesProvided,

    /// Invalid line searcher name.
    InvalidLineSearch {
        name: String,
        reason: &'static str,
    },

    /// lbfgs_mem needs to be at least 1.
    InvalidLBFGSMem {
        mem: usize,
        reason: &'static str,
    },

    // ---- Cost function ----
    /// Cost function returned a non-finite value.
    NonFiniteCost {
        value: f64,
    },

    // ---- Optimizer outcome ----
    /// Best parameters must be finite.
    InvalidBestParam {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// Solver finished without a best parameter vector.
    MissingBestParam,

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter {
        text: String,
    },
    /// Wrapper for argmin::NotImplemented
    NotImplemented {
        text: String,
    },
    /// Wrapper for argmin::NotInitialized
    NotInitialized {
        text: String,
    },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated {
        text: String,
    },
    /// Wrapper for argmin::CheckPointNotFound
    CheckPointNotFound {
        text: String,
    },
    /// Wrapper for argmin::PotentialBug
    PotentialBug {
        text: String,
    },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError {
        text: String,
    },
    /// Wrapper for other argmin::Error types
    BackendError {
        text: String,
    },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Configuration ----
            OptError::Config(err) => write!(f, "Configuration error: {err}"),

            // ---- Lifecycle ----
            OptError::HookOrderViolation { hook, state } => {
                write!(f, "Hook '{hook}' called out of order (coordinator state: {state})")
            }
            OptError::UnsupportedOperation { strategy, capability } => {
                write!(
                    f,
                    "Optimizer strategy '{strategy}' does not implement '{capability}'; \
                     use a strategy that supports it or drop the component that needs it"
                )
            }

            // ---- Scale schedule ----
            OptError::InvalidScaleAmplitude { value, reason } => {
                write!(f, "Invalid scale amplitude {value}: {reason}")
            }
            OptError::InvalidScaleFrequency { value, reason } => {
                write!(f, "Invalid scale frequency {value}: {reason}")
            }
            OptError::ScalesDimMismatch { expected, found } => {
                write!(f, "Scale vector length mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidScale { index, value, reason } => {
                write!(f, "Invalid scale at index {index}: {value}: {reason}")
            }

            // ---- Positions ----
            OptError::PositionDimMismatch { expected, found } => {
                write!(f, "Position length mismatch: expected {expected}, found {found}")
            }

            // ---- Metrics ----
            OptError::EmptyMetricSet => {
                write!(f, "Metric set is empty; at least one metric is required")
            }
            OptError::MetricSetStillShared => {
                write!(f, "Metric set is still shared after the level finished")
            }

            // ---- Gradient ----
            OptError::GradientNotImplemented => {
                write!(f, "Gradient optimization not implemented")
            }
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }

            // ---- StrategyOptions ----
            OptError::InvalidTolGrad { tol, reason } => {
                write!(f, "Invalid gradient tolerance {tol}: {reason}")
            }
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "Invalid cost function change tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::NoTolerancesProvided => {
                write!(f, "No tolerances provided")
            }
            OptError::InvalidLineSearch { name, reason } => {
                write!(f, "Invalid line searcher '{name}': {reason}")
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }

            // ---- Cost function ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite cost value: {value}")
            }

            // ---- Optimizer outcome ----
            OptError::InvalidBestParam { index, value, reason } => {
                write!(f, "Invalid best parameter at index {index}: {value}: {reason}")
            }
            OptError::MissingBestParam => {
                write!(f, "Missing best parameter vector")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<ConfigError> for OptError {
    fn from(err: ConfigError) -> Self {
        OptError::Config(err)
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        // Our own errors cross the argmin boundary inside its `Error`.
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast() {
            Ok(opt_err) => match opt_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}
