//! Application configuration

use std::time::Duration;

use config::{Config, Environment};

use crate::application::ports::outbound::CacheMode;
use crate::domain::value_objects::DurationUnit;

/// Startup configuration is missing or unusable
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),
    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
    #[error("failed to read configuration: {0}")]
    Source(#[from] config::ConfigError),
}

/// Connection settings for the content store
#[derive(Debug, Clone)]
pub struct ContentConfig {
    pub project_id: Option<String>,
    pub dataset: Option<String>,
    pub api_version: Option<String>,
    /// Replaces both Sanity hosts, e.g. a proxy in front of the API
    pub api_host: Option<String>,
    /// Cache policy used when a query does not choose one
    pub cache_mode: CacheMode,
    pub request_timeout: Duration,
}

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub content: ContentConfig,

    /// Unit the CMS stores visit durations in
    pub duration_unit: DurationUnit,

    /// Mapbox access token for map previews
    pub mapbox_token: String,

    /// Public origin of the site, without trailing slash
    pub site_url: String,

    /// `production` enables CDN-cached content
    pub app_env: String,

    /// HTTP server port
    pub server_port: u16,
}

impl AppConfig {
    /// Load configuration from `.env` and the process environment
    pub fn from_env() -> Result<Self, ConfigurationError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "Could not read .env file");
            }
        }

        let source = Config::builder()
            .add_source(Environment::default().try_parsing(false))
            .build()?;
        Self::from_source(&source)
    }

    /// Build from an already-assembled source; keys are lower-cased env names
    pub fn from_source(source: &Config) -> Result<Self, ConfigurationError> {
        let project_id = required(source, "SANITY_PROJECT_ID")?;
        let dataset = required(source, "SANITY_DATASET")?;
        let api_version = required(source, "SANITY_API_VERSION")?;
        let mapbox_token = required(source, "MAPBOX_TOKEN")?;
        let site_url = required(source, "SITE_URL")?.trim_end_matches('/').to_string();

        let app_env = optional(source, "APP_ENV").unwrap_or_else(|| "development".to_string());
        let cache_mode = if app_env.eq_ignore_ascii_case("production") {
            CacheMode::Cdn
        } else {
            CacheMode::NoStore
        };

        let duration_unit = match optional(source, "VISIT_DURATION_UNIT") {
            Some(raw) => raw.parse().map_err(|e: anyhow::Error| ConfigurationError::Invalid {
                key: "VISIT_DURATION_UNIT",
                reason: e.to_string(),
            })?,
            None => DurationUnit::default(),
        };

        let timeout_secs = parse_or(source, "CONTENT_REQUEST_TIMEOUT_SECS", 10u64)?;
        if timeout_secs == 0 {
            return Err(ConfigurationError::Invalid {
                key: "CONTENT_REQUEST_TIMEOUT_SECS",
                reason: "must be at least 1 second".to_string(),
            });
        }

        let server_port = parse_or(source, "SERVER_PORT", 3000u16)?;

        Ok(Self {
            content: ContentConfig {
                project_id: Some(project_id),
                dataset: Some(dataset),
                api_version: Some(api_version),
                api_host: optional(source, "SANITY_API_HOST")
                    .map(|host| host.trim_end_matches('/').to_string()),
                cache_mode,
                request_timeout: Duration::from_secs(timeout_secs),
            },
            duration_unit,
            mapbox_token,
            site_url,
            app_env,
            server_port,
        })
    }
}

fn optional(source: &Config, key: &'static str) -> Option<String> {
    source
        .get_string(&key.to_ascii_lowercase())
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(source: &Config, key: &'static str) -> Result<String, ConfigurationError> {
    optional(source, key).ok_or(ConfigurationError::Missing(key))
}

fn parse_or<T>(source: &Config, key: &'static str, default: T) -> Result<T, ConfigurationError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match optional(source, key) {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigurationError::Invalid {
            key,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [(&str, &str); 5] = [
        ("sanity_project_id", "oa7cdunj"),
        ("sanity_dataset", "production"),
        ("sanity_api_version", "2025-01-01"),
        ("mapbox_token", "pk.test"),
        ("site_url", "https://travelknowledge.example/"),
    ];

    fn source(pairs: &[(&str, &str)]) -> Config {
        pairs
            .iter()
            .fold(Config::builder(), |builder, (key, value)| {
                builder.set_override(*key, *value).unwrap()
            })
            .build()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_source(&source(&REQUIRED)).unwrap();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.duration_unit, DurationUnit::Hours);
        assert_eq!(config.content.cache_mode, CacheMode::NoStore);
        assert_eq!(config.content.request_timeout, Duration::from_secs(10));
        assert_eq!(config.site_url, "https://travelknowledge.example");
        assert_eq!(config.app_env, "development");
    }

    #[test]
    fn test_each_required_key_fails_fast() {
        for (index, (missing, _)) in REQUIRED.iter().enumerate() {
            let pairs: Vec<_> = REQUIRED
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, pair)| *pair)
                .collect();
            match AppConfig::from_source(&source(&pairs)) {
                Err(ConfigurationError::Missing(key)) => {
                    assert_eq!(key.to_ascii_lowercase(), *missing)
                }
                other => panic!("expected {missing} to be required, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_blank_required_value_is_missing() {
        let mut pairs = REQUIRED.to_vec();
        pairs[1] = ("sanity_dataset", "   ");
        assert!(matches!(
            AppConfig::from_source(&source(&pairs)),
            Err(ConfigurationError::Missing("SANITY_DATASET"))
        ));
    }

    #[test]
    fn test_production_uses_cdn() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("app_env", "production"));
        pairs.push(("visit_duration_unit", "minutes"));
        pairs.push(("server_port", "8080"));
        let config = AppConfig::from_source(&source(&pairs)).unwrap();
        assert_eq!(config.content.cache_mode, CacheMode::Cdn);
        assert_eq!(config.duration_unit, DurationUnit::Minutes);
        assert_eq!(config.server_port, 8080);
        assert!(config.content.api_host.is_none());
    }

    #[test]
    fn test_api_host_override_trims_slash() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("sanity_api_host", "http://localhost:3333/"));
        let config = AppConfig::from_source(&source(&pairs)).unwrap();
        assert_eq!(config.content.api_host.as_deref(), Some("http://localhost:3333"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        for (key, value) in [
            ("server_port", "not-a-port"),
            ("visit_duration_unit", "fortnights"),
            ("content_request_timeout_secs", "0"),
        ] {
            let mut pairs = REQUIRED.to_vec();
            pairs.push((key, value));
            assert!(
                matches!(
                    AppConfig::from_source(&source(&pairs)),
                    Err(ConfigurationError::Invalid { .. })
                ),
                "{key}={value} should be rejected"
            );
        }
    }
}
