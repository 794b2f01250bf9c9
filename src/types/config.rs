//! Configuration structures.
//!
//! Configuration is loaded from environment variables and JSON config documents.

use serde::{Deserialize, Serialize};

/// Environment variable overriding [`DeserializerConfig::max_depth`].
pub const ENV_MAX_DEPTH: &str = "STRUCTMAP_MAX_DEPTH";

/// Environment variable overriding [`DeserializerConfig::deny_unknown_fields`].
pub const ENV_DENY_UNKNOWN_FIELDS: &str = "STRUCTMAP_DENY_UNKNOWN_FIELDS";

/// Structural deserializer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeserializerConfig {
    /// Maximum nesting depth of structured values. The root instance is
    /// depth 1, so the limit must be at least 1.
    pub max_depth: usize,

    /// Fail on mapping keys with no matching field. When disabled, such keys
    /// are skipped.
    pub deny_unknown_fields: bool,
}

impl Default for DeserializerConfig {
    fn default() -> Self {
        Self {
            max_depth: 128,
            deny_unknown_fields: true,
        }
    }
}

impl DeserializerConfig {
    /// Parse a JSON config document; missing keys take their defaults.
    pub fn from_json_str(s: &str) -> crate::types::Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> crate::types::Result<()> {
        if self.max_depth == 0 {
            return Err(crate::types::Error::validation(
                "max_depth must be at least 1 (the root instance is depth 1)",
            ));
        }
        Ok(())
    }

    /// Defaults overlaid with `STRUCTMAP_*` environment variables.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup(ENV_MAX_DEPTH) {
            match raw.trim().parse::<usize>() {
                Ok(0) => tracing::warn!("invalid_config_override: key={}, value=0", ENV_MAX_DEPTH),
                Ok(depth) => self.max_depth = depth,
                Err(e) => tracing::warn!("invalid_config_override: key={}, error={}", ENV_MAX_DEPTH, e),
            }
        }
        if let Some(raw) = lookup(ENV_DENY_UNKNOWN_FIELDS) {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => self.deny_unknown_fields = true,
                "0" | "false" | "no" => self.deny_unknown_fields = false,
                other => tracing::warn!(
                    "invalid_config_override: key={}, value={}",
                    ENV_DENY_UNKNOWN_FIELDS,
                    other
                ),
            }
        }
        self
    }

    /// Set the depth limit. The root instance counts as depth 1, so a
    /// limit of 0 rejects every non-empty mapping.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_deny_unknown_fields(mut self, deny: bool) -> Self {
        self.deny_unknown_fields = deny;
        self
    }
}
