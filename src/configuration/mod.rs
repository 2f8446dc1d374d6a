//! configuration — read-only parameter access for registration components.
//!
//! Purpose
//! -------
//! Give every component a single, typed way to read its per-level options
//! from the host's already-parsed configuration. The crate does not define a
//! file format; hosts populate a [`ParameterMap`] and hand it to the driver.
//!
//! Key behaviors
//! -------------
//! - [`ParameterMap`] stores per-level values and resolves reads scoped to a
//!   component label and resolution level.
//! - [`ConfigError`] reports malformed and out-of-range values; absent keys
//!   are not errors.
//!
//! Downstream usage
//! ----------------
//! - The lifecycle hooks read `NewSamplesEveryIteration` through
//!   [`ParameterMap::read_or`].
//! - The reference driver reads `NumberOfResolutions`.
//! - Configuration errors are lifted into `OptError::Config` and abort the
//!   run.

pub mod errors;
pub mod parameter_map;

pub use self::errors::{ConfigError, ConfigResult};
pub use self::parameter_map::ParameterMap;
