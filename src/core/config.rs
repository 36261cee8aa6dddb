use crate::core::forms::DEFAULT_RETENTION_DAYS;
use crate::core::i18n::Language;
use crate::core::interstitial::DEFAULT_THRESHOLD;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_AWESOMEAPI_URL: &str = "https://economia.awesomeapi.com.br";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AwesomeApiProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub awesomeapi: Option<AwesomeApiProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            awesomeapi: Some(AwesomeApiProviderConfig {
                base_url: DEFAULT_AWESOMEAPI_URL.to_string(),
            }),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct InterstitialConfig {
    pub threshold: u32,
}

impl Default for InterstitialConfig {
    fn default() -> Self {
        InterstitialConfig {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

fn default_retention_days() -> u64 {
    DEFAULT_RETENTION_DAYS
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub interstitial: InterstitialConfig,
    #[serde(default = "default_retention_days")]
    pub form_retention_days: u64,
    pub data_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            language: Language::default(),
            providers: ProvidersConfig::default(),
            interstitial: InterstitialConfig::default(),
            form_retention_days: DEFAULT_RETENTION_DAYS,
            data_path: None,
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location. A missing file is not an
    /// error: every setting has a default.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "convkit", "convkit")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("dev", "convkit", "convkit")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn awesomeapi_base_url(&self) -> &str {
        self.providers
            .awesomeapi
            .as_ref()
            .map_or(DEFAULT_AWESOMEAPI_URL, |p| &p.base_url)
    }

    /// Retention for remembered form values. A period too long to represent
    /// means the values never expire.
    pub fn form_retention(&self) -> Option<Duration> {
        self.form_retention_days
            .checked_mul(24 * 60 * 60)
            .map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
language: en
providers:
  awesomeapi:
    base_url: "http://example.com/rates"
interstitial:
  threshold: 5
form_retention_days: 30
data_path: "/tmp/convkit"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.language, Language::En);
        assert_eq!(config.awesomeapi_base_url(), "http://example.com/rates");
        assert_eq!(config.interstitial.threshold, 5);
        assert_eq!(config.form_retention_days, 30);
        assert_eq!(
            config.form_retention(),
            Some(Duration::from_secs(30 * 86_400))
        );
        assert_eq!(
            config.default_data_path().unwrap(),
            PathBuf::from("/tmp/convkit")
        );
    }

    #[test]
    fn test_config_defaults() {
        let config: AppConfig = serde_yaml::from_str("data_path: ~").unwrap();
        assert_eq!(config.language, Language::Pt);
        assert_eq!(config.awesomeapi_base_url(), DEFAULT_AWESOMEAPI_URL);
        assert_eq!(config.interstitial.threshold, 2);
        assert_eq!(config.form_retention_days, 365);
        assert!(config.data_path.is_none());
    }

    #[test]
    fn test_providers_without_awesomeapi_use_default_url() {
        let config: AppConfig = serde_yaml::from_str("providers: {}").unwrap();
        assert!(config.providers.awesomeapi.is_none());
        assert_eq!(config.awesomeapi_base_url(), DEFAULT_AWESOMEAPI_URL);
    }

    #[test]
    fn test_huge_retention_never_expires() {
        let config: AppConfig =
            serde_yaml::from_str("form_retention_days: 18446744073709551615").unwrap();
        assert_eq!(config.form_retention(), None);

        let config: AppConfig = serde_yaml::from_str("form_retention_days: 0").unwrap();
        assert_eq!(config.form_retention(), Some(Duration::ZERO));
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let result = AppConfig::load_from_path("/nonexistent/convkit/config.yaml");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
