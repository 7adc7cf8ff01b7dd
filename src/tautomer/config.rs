use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Default bound, matching the reference enumerator's standard setting.
pub const DEFAULT_MAX_TAUTOMERS: usize = 32;
/// Bound used by the high-complexity battery.
pub const STRESS_MAX_TAUTOMERS: usize = 100;

/// Settings for a [`TautomerEnumerator`](super::TautomerEnumerator).
///
/// Deserializing a zero bound fails, as does [`EnumeratorConfig::with_max`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumeratorConfig {
    pub max_tautomers: NonZeroUsize,
}

impl EnumeratorConfig {
    pub fn with_max(max_tautomers: usize) -> Result<Self, ConfigError> {
        NonZeroUsize::new(max_tautomers)
            .map(|max_tautomers| Self { max_tautomers })
            .ok_or(ConfigError::ZeroMaxTautomers)
    }

    pub fn stress() -> Self {
        Self {
            max_tautomers: NonZeroUsize::new(STRESS_MAX_TAUTOMERS).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl Default for EnumeratorConfig {
    fn default() -> Self {
        Self {
            max_tautomers: NonZeroUsize::new(DEFAULT_MAX_TAUTOMERS).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(EnumeratorConfig::default().max_tautomers.get(), 32);
        assert_eq!(EnumeratorConfig::stress().max_tautomers.get(), 100);
    }

    #[test]
    fn zero_bound_rejected() {
        assert_eq!(EnumeratorConfig::with_max(0), Err(ConfigError::ZeroMaxTautomers));
        assert_eq!(EnumeratorConfig::with_max(5).unwrap().max_tautomers.get(), 5);
    }

    #[test]
    fn serde_round_trip() {
        let json = serde_json::to_string(&EnumeratorConfig::default()).unwrap();
        assert_eq!(json, r#"{"max_tautomers":32}"#);
        let back: EnumeratorConfig = serde_json::from_str(r#"{"max_tautomers":7}"#).unwrap();
        assert_eq!(back.max_tautomers.get(), 7);
        assert!(serde_json::from_str::<EnumeratorConfig>(r#"{"max_tautomers":0}"#).is_err());
    }
}
