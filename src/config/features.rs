//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
///
/// These are deployment-wide switches; per-commerce toggles such as the
/// booking confirmation flow live on the commerce record itself.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FeatureFlags {
    /// Show detailed error messages (disable in production!)
    #[serde(default)]
    pub verbose_errors: bool,

    /// Enable request tracing middleware
    #[serde(default = "default_enable_tracing")]
    pub enable_tracing: bool,
}

fn default_enable_tracing() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_flags() {
        let json = r#"{ "verbose_errors": true, "enable_tracing": false }"#;
        let flags: FeatureFlags = serde_json::from_str(json).unwrap();
        assert!(flags.verbose_errors);
        assert!(!flags.enable_tracing);
    }
}
