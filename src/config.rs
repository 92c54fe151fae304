// In: src/config.rs

//! The single source of truth for rowperm ingestion settings.
//!
//! `RowpermConfig` is created once at the application boundary (e.g., from a
//! JSON settings blob or Python keyword arguments) and then passed by reference
//! to the places that accept permutations from the outside world.

use serde::{Deserialize, Serialize};

use crate::error::Result;

//==================================================================================
// I. Core Configuration Enums
//==================================================================================

/// Decides when an incoming permutation is checked for the bijection invariant.
///
/// Validation is O(n), so hot paths that repeatedly pull the permutation from
/// the storage engine usually skip it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPolicy {
    /// Validate every permutation, including those from trusted sources.
    Always,

    /// **Default:** Validate only permutations that come from untrusted sources
    /// (saved files, foreign buffers).
    #[default]
    UntrustedOnly,

    /// Never validate. Malformed input produces silently corrupted output.
    Never,
}

impl ValidationPolicy {
    /// Returns `true` if a permutation with the given provenance must be validated.
    pub fn requires_validation(&self, trusted: bool) -> bool {
        match self {
            ValidationPolicy::Always => true,
            ValidationPolicy::UntrustedOnly => !trusted,
            ValidationPolicy::Never => false,
        }
    }
}

//==================================================================================
// II. The Unified RowpermConfig
//==================================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct RowpermConfig {
    /// When to validate permutations on ingestion.
    #[serde(default)]
    pub validation: ValidationPolicy,

    /// If true, permutations pulled from a `PermutationSource` (the storage
    /// engine) count as trusted.
    #[serde(default = "default_true")]
    pub trust_sources: bool,
}

impl Default for RowpermConfig {
    fn default() -> Self {
        Self {
            validation: ValidationPolicy::default(),
            trust_sources: true,
        }
    }
}

impl RowpermConfig {
    /// Parses a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether a permutation obtained from a `PermutationSource` must be validated.
    pub fn validate_sources(&self) -> bool {
        self.validation.requires_validation(self.trust_sources)
    }
}

/// Helper for `serde` to default a boolean field to true.
fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = RowpermConfig::from_json("{}").unwrap();
        assert_eq!(config, RowpermConfig::default());
        assert_eq!(config.validation, ValidationPolicy::UntrustedOnly);
        assert!(config.trust_sources);
        assert!(!config.validate_sources());
    }

    #[test]
    fn test_parse_snake_case_policy() {
        let config =
            RowpermConfig::from_json(r#"{"validation": "always", "trust_sources": true}"#).unwrap();
        assert_eq!(config.validation, ValidationPolicy::Always);
        assert!(config.validate_sources());

        let config = RowpermConfig::from_json(r#"{"trust_sources": false}"#).unwrap();
        assert!(config.validate_sources());

        let config = RowpermConfig::from_json(r#"{"validation": "never", "trust_sources": false}"#)
            .unwrap();
        assert!(!config.validate_sources());
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        assert!(RowpermConfig::from_json(r#"{"validation": "sometimes"}"#).is_err());
    }
}
