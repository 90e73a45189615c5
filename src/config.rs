use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::models::ScoringWeights;

const ENV_PREFIX: &str = "FIT_FINDER";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub storefront: StorefrontSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub rate_limit: RateLimitSettings,
    #[serde(default)]
    pub security: SecuritySettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSettings {
    /// Alternate pattern file; the built-in table is used when unset
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            weights: WeightsConfig::default(),
            result_limit: default_result_limit(),
        }
    }
}

fn default_result_limit() -> usize { 3 }

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_dimension_weight")]
    pub neck: f64,
    #[serde(default = "default_dimension_weight")]
    pub chest: f64,
    #[serde(default = "default_dimension_weight")]
    pub length: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            neck: default_dimension_weight(),
            chest: default_dimension_weight(),
            length: default_dimension_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            neck: config.neck,
            chest: config.chest,
            length: config.length,
        }
    }
}

fn default_dimension_weight() -> f64 { 1.0 / 3.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct StorefrontSettings {
    pub store_domain: Option<String>,
    pub access_token: Option<String>,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StorefrontSettings {
    fn default() -> Self {
        Self {
            store_domain: None,
            access_token: None,
            api_version: default_api_version(),
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_version() -> String { "2024-04".to_string() }
fn default_page_size() -> u32 { 250 }
fn default_timeout_secs() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_cache_capacity")]
    pub capacity: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl(),
            capacity: default_cache_capacity(),
        }
    }
}

fn default_cache_ttl() -> u64 { 300 }
fn default_cache_capacity() -> u64 { 16 }

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitSettings {
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
        }
    }
}

fn default_max_requests() -> u32 { 10 }
fn default_window_secs() -> u64 { 60 }

#[derive(Debug, Clone, Deserialize)]
pub struct SecuritySettings {
    /// Origins allowed to embed the widget in a frame
    #[serde(default = "default_frame_ancestors")]
    pub frame_ancestors: Vec<String>,
    /// CORS origins; any origin when empty
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            frame_ancestors: default_frame_ancestors(),
            allowed_origins: Vec::new(),
        }
    }
}

impl SecuritySettings {
    /// `Content-Security-Policy` header value
    pub fn content_security_policy(&self) -> String {
        format!("frame-ancestors {}", self.frame_ancestors.join(" "))
    }
}

fn default_frame_ancestors() -> Vec<String> { vec!["'self'".to_string()] }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

fn environment() -> Environment {
    // e.g., FIT_FINDER__SERVER__PORT -> server.port
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("security.frame_ancestors")
        .with_list_parse_key("security.allowed_origins")
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration files (config/default.toml, then config/local.toml)
    /// 3. Environment variables (prefixed with FIT_FINDER__)
    /// 4. Storefront credentials from SHOPIFY_* variables
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(environment())
            .build()?;

        Self::from_config(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        Self::from_config(settings)
    }

    fn from_config(settings: Config) -> Result<Self, ConfigError> {
        let settings: Settings = substitute_env_vars(settings)?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the selector cannot rank with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = &self.scoring.weights;
        for (name, value) in [
            ("neck", weights.neck),
            ("chest", weights.chest),
            ("length", weights.length),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Message(format!(
                    "scoring.weights.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if weights.neck + weights.chest + weights.length <= 0.0 {
            return Err(ConfigError::Message(
                "scoring.weights must not all be zero".to_string(),
            ));
        }

        if self.scoring.result_limit == 0 {
            return Err(ConfigError::Message(
                "scoring.result_limit must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }
}

/// Pick up storefront credentials from the variables the storefront
/// tooling already exports
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let store_url = env::var("SHOPIFY_STORE_URL").ok();
    let access_token = env::var("SHOPIFY_STOREFRONT_ACCESS_TOKEN").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(store_url) = store_url {
        builder = builder.set_override("storefront.store_domain", store_url)?;
    }
    if let Some(token) = access_token {
        builder = builder.set_override("storefront.access_token", token)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = Settings::default().scoring_weights();
        assert_eq!(weights.neck, 1.0 / 3.0);
        assert_eq!(weights.chest, weights.neck);
        assert_eq!(weights.length, weights.neck);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "compact");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: Settings = Config::builder()
            .add_source(config::File::from_str(
                r#"
                [scoring.weights]
                neck = 0.35
                chest = 0.40
                length = 0.25

                [rate_limit]
                max_requests = 5
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.scoring_weights(), ScoringWeights::chest_weighted());
        assert_eq!(settings.scoring.result_limit, 3);
        assert_eq!(settings.rate_limit.max_requests, 5);
        assert_eq!(settings.rate_limit.window_secs, 60);
        assert_eq!(settings.server.port, 8080);
        assert!(settings.storefront.store_domain.is_none());
    }

    #[test]
    fn test_defaults_pass_validation() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_negative_weight() {
        let mut settings = Settings::default();
        settings.scoring.weights = WeightsConfig {
            neck: 1.0,
            chest: 1.0,
            length: -0.5,
        };

        match settings.validate() {
            Err(ConfigError::Message(message)) => assert!(message.contains("length")),
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_all_zero_weights() {
        let mut settings = Settings::default();
        settings.scoring.weights = WeightsConfig {
            neck: 0.0,
            chest: 0.0,
            length: 0.0,
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_result_limit() {
        let config = Config::builder()
            .add_source(config::File::from_str(
                "[scoring]\nresult_limit = 0\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        assert!(matches!(
            Settings::from_config(config),
            Err(ConfigError::Message(_))
        ));
    }

    #[test]
    fn test_content_security_policy() {
        let security = SecuritySettings {
            frame_ancestors: vec!["'self'".to_string(), "https://shop.example.com".to_string()],
            allowed_origins: Vec::new(),
        };
        assert_eq!(
            security.content_security_policy(),
            "frame-ancestors 'self' https://shop.example.com"
        );
    }
}
