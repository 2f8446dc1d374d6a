//! coordinator — optimizer-side coordination for multi-resolution registration.
//!
//! Purpose
//! -------
//! Sit between a multi-resolution controller, a pluggable optimizer strategy
//! and the registration's similarity metrics. The coordinator reads per-level
//! configuration, keeps stochastic metrics' sample draws in step, produces
//! smooth scale schedules on demand and fingerprints the final result.
//!
//! Key behaviors
//! -------------
//! - [`hooks`]: lifecycle entry points ([`OptimizerCoordinator`]) called at
//!   level start/end and at the end of the run.
//! - [`sampling`]: [`refresh_samples`] asks every resampling-capable metric
//!   for a new sample subset.
//! - [`scales`]: [`sinus_scales`] builds `amplitude^sin(2π·f·i/n)` schedules.
//! - [`fingerprint`]: [`fingerprint`](fingerprint::fingerprint) produces the
//!   reproducible `u32` checksum of a parameter vector.
//! - [`traits`], [`context`], [`report`]: collaborator interfaces, the
//!   explicit per-call context, and output sinks.
//!
//! Invariants & assumptions
//! ------------------------
//! - Single-threaded and synchronous. Hooks are called by one controller in
//!   order; nothing here spawns work or blocks.
//! - The coordinator never owns metrics or the parameter vector. It borrows
//!   them through [`RegistrationContext`] for the duration of one call.
//! - Missing capabilities fail fast with `OptError::UnsupportedOperation`.
//!
//! Conventions
//! -----------
//! - Configuration is read through
//!   [`ParameterMap`](crate::configuration::ParameterMap) and scoped by the
//!   coordinator's component label.
//! - All fallible entry points return `OptResult<T>`.
//! - Diagnostics go through the `log` facade; the only user-facing output
//!   (the checksum line) goes through a [`ReportSink`].

pub mod context;
pub mod fingerprint;
pub mod hooks;
pub mod report;
pub mod sampling;
pub mod scales;
pub mod traits;

pub use self::context::RegistrationContext;
pub use self::fingerprint::{
    checksum_line, encode_quantized, quantize, CHECKSUM_LINE_PREFIX, FINGERPRINT_FORMAT_VERSION,
    QUANTIZATION_SCALE,
};
pub use self::hooks::{
    LifecycleState, OptimizerCoordinator, DEFAULT_COMPONENT_LABEL, NEW_SAMPLES_EVERY_ITERATION,
};
pub use self::report::{LogSink, MemorySink, ReportSink};
pub use self::sampling::refresh_samples;
pub use self::scales::{sinus_scales, validate_scales};
pub use self::traits::{
    Capability, LevelOutcome, LevelSchedule, Metric, MetricSet, OptimizerStrategy,
};
