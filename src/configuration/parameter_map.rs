//! configuration::parameter_map — typed, level-aware parameter lookups.
//!
//! Purpose
//! -------
//! Hold the already-parsed key/value configuration of a registration run and
//! answer typed reads scoped to a component label and a resolution level.
//! Values are kept as text exactly as the host handed them over; parsing into
//! the requested type happens at read time so that a malformed entry is only
//! fatal for the component that actually reads it.
//!
//! Key behaviors
//! -------------
//! - Every key maps to an ordered list of values, one per resolution level.
//!   A key with a single value applies to every level.
//! - [`ParameterMap::read`] resolves a key through the chain
//!   `prefix+key @ entry`, `prefix+key @ default_entry`, `key @ entry`,
//!   `key @ default_entry`; the first hit wins.
//! - A missing key is `Ok(None)`; [`ParameterMap::read_or`] turns that into
//!   a caller-supplied default.
//! - Parsing uses the target type's `FromStr`. For `bool` this accepts
//!   exactly `"true"` and `"false"`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Keys are case-sensitive.
//! - A value that exists but fails to parse is reported as
//!   [`ConfigError::Malformed`]; the lookup chain does not continue past it.
//!
//! Conventions
//! -----------
//! - `entry` is normally the resolution level and `default_entry` is `0`.
//! - The map is read-only during a run; hosts build it once up front.
//!
//! Testing notes
//! -------------
//! - Unit tests below cover lookup precedence, per-level values, defaults and
//!   malformed values.
use std::{collections::HashMap, str::FromStr};

use crate::configuration::errors::{ConfigError, ConfigResult};

/// In-memory parameter map with per-level values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterMap {
    entries: HashMap<String, Vec<String>>,
}

impl ParameterMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; replaces any previous values for `key`.
    pub fn with<I, S>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(key, values);
        self
    }

    /// Insert or replace the values stored for `key`.
    pub fn insert<I, S>(&mut self, key: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.insert(key.to_string(), values.into_iter().map(Into::into).collect());
    }

    /// Raw values stored for `key`, if any.
    pub fn values(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Typed read of `key` scoped to `prefix` and `entry`.
    ///
    /// Parameters
    /// ----------
    /// - `key`: parameter name, e.g. `"NewSamplesEveryIteration"`.
    /// - `prefix`: component label; an empty prefix skips the prefixed
    ///   lookups.
    /// - `entry`: preferred value index (usually the resolution level).
    /// - `default_entry`: fallback index when `entry` is not present.
    ///
    /// Returns
    /// -------
    /// - `Ok(Some(value))` for the first hit in the lookup chain.
    /// - `Ok(None)` when no candidate exists.
    ///
    /// Errors
    /// ------
    /// - [`ConfigError::Malformed`] when the hit does not parse as `T`.
    pub fn read<T: FromStr>(
        &self, key: &str, prefix: &str, entry: usize, default_entry: usize,
    ) -> ConfigResult<Option<T>> {
        let prefixed = format!("{prefix}{key}");
        let mut candidates: Vec<&str> = Vec::with_capacity(2);
        if !prefix.is_empty() {
            candidates.push(prefixed.as_str());
        }
        candidates.push(key);

        for name in candidates {
            let Some(values) = self.entries.get(name) else {
                continue;
            };
            for index in [entry, default_entry] {
                if let Some(raw) = values.get(index) {
                    return parse_value(name, index, raw).map(Some);
                }
            }
        }
        Ok(None)
    }

    /// Typed read that falls back to `default` when the key is absent.
    ///
    /// # Errors
    /// Propagates [`ConfigError::Malformed`] from [`ParameterMap::read`].
    pub fn read_or<T: FromStr>(
        &self, key: &str, prefix: &str, entry: usize, default_entry: usize, default: T,
    ) -> ConfigResult<T> {
        Ok(self.read(key, prefix, entry, default_entry)?.unwrap_or(default))
    }
}

fn parse_value<T: FromStr>(key: &str, entry: usize, raw: &str) -> ConfigResult<T> {
    raw.trim().parse::<T>().map_err(|_| ConfigError::Malformed {
        key: key.to_string(),
        entry,
        value: raw.to_string(),
        expected: std::any::type_name::<T>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Lookup precedence between prefixed and plain keys.
    // - Per-level entries and the fallback to the default entry.
    // - Absent keys, defaults and malformed values.
    //
    // They intentionally DO NOT cover:
    // - Any file format; the map is built programmatically.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure that an absent key yields `Ok(None)` and `read_or` applies the
    // default.
    //
    // Given
    // -----
    // - An empty `ParameterMap`.
    //
    // Expect
    // ------
    // - `read::<bool>` returns `Ok(None)`.
    // - `read_or` returns the supplied default.
    fn absent_key_reads_none_and_default() {
        // Arrange
        let map = ParameterMap::new();

        // Act
        let raw = map.read::<bool>("NewSamplesEveryIteration", "Optimizer", 3, 0);
        let with_default = map.read_or("NewSamplesEveryIteration", "Optimizer", 3, 0, false);

        // Assert
        assert_eq!(raw, Ok(None));
        assert_eq!(with_default, Ok(false));
    }

    #[test]
    // Purpose
    // -------
    // Verify that per-level values are selected by `entry` and that a single
    // value applies to every level through `default_entry`.
    //
    // Given
    // -----
    // - "A" with three per-level values, "B" with a single value.
    //
    // Expect
    // ------
    // - "A" at entry 1 is the second value.
    // - "B" at entry 2 falls back to entry 0.
    fn per_level_entries_and_default_entry_fallback() {
        // Arrange
        let map = ParameterMap::new().with("A", ["1", "2", "3"]).with("B", ["7"]);

        // Act
        let a1: Option<u32> = map.read("A", "", 1, 0).expect("A should parse");
        let b2: Option<u32> = map.read("B", "", 2, 0).expect("B should parse");

        // Assert
        assert_eq!(a1, Some(2));
        assert_eq!(b2, Some(7));
    }

    #[test]
    // Purpose
    // -------
    // Ensure that a prefixed key takes precedence over the plain key.
    //
    // Given
    // -----
    // - "OptimizerNewSamplesEveryIteration" = "true".
    // - "NewSamplesEveryIteration" = "false".
    //
    // Expect
    // ------
    // - A read with prefix "Optimizer" returns `true`.
    // - A read with another prefix returns the plain value `false`.
    fn prefixed_key_wins_over_plain_key() {
        // Arrange
        let map = ParameterMap::new()
            .with("OptimizerNewSamplesEveryIteration", ["true"])
            .with("NewSamplesEveryIteration", ["false"]);

        // Act
        let prefixed = map.read_or("NewSamplesEveryIteration", "Optimizer", 0, 0, false);
        let other = map.read_or("NewSamplesEveryIteration", "Metric", 0, 0, true);

        // Assert
        assert_eq!(prefixed, Ok(true));
        assert_eq!(other, Ok(false));
    }

    #[test]
    // Purpose
    // -------
    // Ensure that a boolean value outside {"true", "false"} is rejected with
    // a `Malformed` error that names the resolved key and entry.
    //
    // Given
    // -----
    // - "NewSamplesEveryIteration" = ["false", "yes"].
    //
    // Expect
    // ------
    // - Reading entry 1 as `bool` returns `ConfigError::Malformed` with
    //   `value = "yes"` and `entry = 1`.
    fn malformed_boolean_is_rejected() {
        // Arrange
        let map = ParameterMap::new().with("NewSamplesEveryIteration", ["false", "yes"]);

        // Act
        let err = map.read::<bool>("NewSamplesEveryIteration", "", 1, 0).unwrap_err();

        // Assert
        match err {
            ConfigError::Malformed { key, entry, value, expected } => {
                assert_eq!(key, "NewSamplesEveryIteration");
                assert_eq!(entry, 1);
                assert_eq!(value, "yes");
                assert_eq!(expected, "bool");
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that surrounding whitespace does not make a value malformed.
    //
    // Given
    // -----
    // - "NumberOfResolutions" = " 4 ".
    //
    // Expect
    // ------
    // - Reads as `4usize`.
    fn values_are_trimmed_before_parsing() {
        // Arrange
        let map = ParameterMap::new().with("NumberOfResolutions", [" 4 "]);

        // Act
        let levels = map.read_or("NumberOfResolutions", "", 0, 0, 1usize);

        // Assert
        assert_eq!(levels, Ok(4));
    }
}
