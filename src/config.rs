use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Settings for the import pipeline
#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// User agent sent with every page request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Hosts recipes may be imported from; empty accepts any host
    #[serde(default)]
    pub allowed_hosts: Vec<String>,
    /// Whether the generic HTML scraper runs when no JSON-LD recipe is found
    #[serde(default = "default_fallback_enabled")]
    pub fallback_enabled: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            user_agent: default_user_agent(),
            allowed_hosts: Vec::new(),
            fallback_enabled: default_fallback_enabled(),
        }
    }
}

fn default_timeout() -> u64 {
    5
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_fallback_enabled() -> bool {
    true
}

impl ImportConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_IMPORT__ prefix
    /// 2. recipe_import.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_IMPORT__TIMEOUT=10
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("recipe_import").required(false))
            .add_source(
                Environment::with_prefix("RECIPE_IMPORT")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("allowed_hosts")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Whether `host` may be imported from. Subdomains of an allowed host match.
    pub fn allows_host(&self, host: &str) -> bool {
        if self.allowed_hosts.is_empty() {
            return true;
        }
        let host = host.to_ascii_lowercase();
        self.allowed_hosts.iter().any(|allowed| {
            let allowed = allowed.trim().to_ascii_lowercase();
            host == allowed || host.ends_with(&format!(".{allowed}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = ImportConfig::default();
        assert_eq!(config.timeout, 5);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!(config.allowed_hosts.is_empty());
        assert!(config.fallback_enabled);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_empty_allow_list_accepts_everything() {
        let config = ImportConfig::default();
        assert!(config.allows_host("www.jamieoliver.com"));
        assert!(config.allows_host("example.org"));
    }

    #[test]
    fn test_allow_list_matches_subdomains() {
        let config = ImportConfig {
            allowed_hosts: vec!["jamieoliver.com".to_string()],
            ..Default::default()
        };
        assert!(config.allows_host("jamieoliver.com"));
        assert!(config.allows_host("www.JamieOliver.com"));
        assert!(!config.allows_host("notjamieoliver.com"));
        assert!(!config.allows_host("bbcgoodfood.com"));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: ImportConfig = Config::builder()
            .set_override("timeout", 12)
            .and_then(|b| b.set_override("allowed_hosts", vec!["example.com"]))
            .and_then(|b| b.build())
            .and_then(|c| c.try_deserialize())
            .unwrap();

        assert_eq!(config.timeout, 12);
        assert_eq!(config.allowed_hosts, vec!["example.com"]);
        assert!(config.fallback_enabled);
    }

    #[test]
    fn test_load_config_without_file() {
        // Without a file and without env overrides every field has a default
        let result = ImportConfig::load();
        assert!(result.is_ok());
    }
}
