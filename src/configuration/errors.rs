//! Error surface for configuration reads.
//!
//! `ConfigError` covers the two ways a parameter read can go wrong once a key
//! has been located: the stored text does not parse into the requested type,
//! or it parses but lies outside the range a caller accepts. A missing key is
//! not an error here; callers decide whether to apply a default.

/// Result alias for configuration reads.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration read failures.
///
/// All variants carry the fully resolved key (including any component
/// prefix) so diagnostics point at the exact entry that has to be fixed.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Stored value could not be parsed into the requested type.
    Malformed {
        key: String,
        entry: usize,
        value: String,
        expected: &'static str,
    },

    /// Value parsed but is outside the accepted range.
    OutOfRange {
        key: String,
        value: String,
        reason: &'static str,
    },
}

impl std::error::Error for ConfigError {}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Malformed { key, entry, value, expected } => {
                write!(
                    f,
                    "Malformed value '{value}' for parameter '{key}' (entry {entry}): expected {expected}"
                )
            }
            ConfigError::OutOfRange { key, value, reason } => {
                write!(f, "Value '{value}' for parameter '{key}' is out of range: {reason}")
            }
        }
    }
}
