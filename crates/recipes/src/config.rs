//! Application configuration loaded from environment variables.

use std::path::PathBuf;
use std::str::FromStr;
use std::{env, time::Duration};

use thiserror::Error;

/// Errors raised while reading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?} (expected one of: {expected})")]
    InvalidValue {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Which store holds the recipes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RepoType {
    /// Concurrent in-process store written through to a JSON file.
    #[default]
    Memory,
    /// Remote DynamoDB table.
    DynamoDb,
}

impl FromStr for RepoType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(RepoType::Memory),
            "dynamodb" => Ok(RepoType::DynamoDb),
            _ => Err(ConfigError::InvalidValue {
                name: "REPO_TYPE",
                value: s.to_string(),
                expected: "memory, dynamodb",
            }),
        }
    }
}

/// Which cache, if any, sits in front of the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CacheBackend {
    #[default]
    None,
    Memory,
    Redis,
}

impl FromStr for CacheBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(CacheBackend::None),
            "memory" => Ok(CacheBackend::Memory),
            "redis" => Ok(CacheBackend::Redis),
            _ => Err(ConfigError::InvalidValue {
                name: "CACHE_BACKEND",
                value: s.to_string(),
                expected: "none, memory, redis",
            }),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Store backend (default: memory)
    pub repo_type: RepoType,
    /// Path to the JSON store file (default: "data/recipe.json")
    pub data_path: PathBuf,
    /// Cache in front of the store (default: none)
    pub cache_backend: CacheBackend,
    /// Cache TTL in seconds (default: 1800)
    pub cache_ttl_seconds: u64,
    /// Redis connection URL (default: "redis://localhost:6379")
    pub redis_url: String,
    /// DynamoDB table name (default: "recipes")
    pub dynamodb_table_name: String,
    /// DynamoDB endpoint override, e.g. DynamoDB Local (default: none)
    pub dynamodb_endpoint: Option<String>,
    /// Deadline for a single command in seconds (default: 5)
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `REPO_TYPE` - `memory` or `dynamodb` (default: memory)
    /// - `DATA_PATH` - JSON store file (default: "data/recipe.json")
    /// - `CACHE_BACKEND` - `none`, `memory` or `redis` (default: none)
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 1800)
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    /// - `DYNAMODB_TABLE_NAME` - DynamoDB table (default: "recipes")
    /// - `DYNAMODB_ENDPOINT` - DynamoDB endpoint override (default: unset)
    /// - `REQUEST_TIMEOUT_SECONDS` - Per-command deadline (default: 5)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unknown backend names are errors. Numbers that fail to parse fall back
    /// to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            repo_type: lookup("REPO_TYPE")
                .map(|v| v.parse::<RepoType>())
                .transpose()?
                .unwrap_or_default(),
            data_path: lookup("DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/recipe.json")),
            cache_backend: lookup("CACHE_BACKEND")
                .map(|v| v.parse::<CacheBackend>())
                .transpose()?
                .unwrap_or_default(),
            cache_ttl_seconds: lookup("CACHE_TTL_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(1800),
            redis_url: lookup("REDIS_URL")
                .unwrap_or_else(|| "redis://localhost:6379".to_string()),
            dynamodb_table_name: lookup("DYNAMODB_TABLE_NAME")
                .unwrap_or_else(|| "recipes".to_string()),
            dynamodb_endpoint: lookup("DYNAMODB_ENDPOINT").filter(|v| !v.is_empty()),
            request_timeout_seconds: lookup("REQUEST_TIMEOUT_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        })
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    /// Get the per-command deadline as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = Config::from_lookup(|_| None).unwrap();

        assert_eq!(config.repo_type, RepoType::Memory);
        assert_eq!(config.data_path, PathBuf::from("data/recipe.json"));
        assert_eq!(config.cache_backend, CacheBackend::None);
        assert_eq!(config.cache_ttl(), Duration::from_secs(1800));
        assert_eq!(config.redis_url, "redis://localhost:6379");
        assert_eq!(config.dynamodb_table_name, "recipes");
        assert_eq!(config.dynamodb_endpoint, None);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_values_from_lookup() {
        let config = Config::from_lookup(lookup_from(&[
            ("REPO_TYPE", "DynamoDB"),
            ("DATA_PATH", "/tmp/r.json"),
            ("CACHE_BACKEND", "redis"),
            ("CACHE_TTL_SECONDS", "60"),
            ("REDIS_URL", "redis://cache:6379"),
            ("DYNAMODB_TABLE_NAME", "recipes-prod"),
            ("DYNAMODB_ENDPOINT", "http://localhost:8000"),
            ("REQUEST_TIMEOUT_SECONDS", "30"),
        ]))
        .unwrap();

        assert_eq!(config.repo_type, RepoType::DynamoDb);
        assert_eq!(config.data_path, PathBuf::from("/tmp/r.json"));
        assert_eq!(config.cache_backend, CacheBackend::Redis);
        assert_eq!(config.cache_ttl(), Duration::from_secs(60));
        assert_eq!(config.redis_url, "redis://cache:6379");
        assert_eq!(config.dynamodb_table_name, "recipes-prod");
        assert_eq!(
            config.dynamodb_endpoint.as_deref(),
            Some("http://localhost:8000")
        );
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_unknown_repo_type_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[("REPO_TYPE", "postgres")])).unwrap_err();

        assert_eq!(
            err,
            ConfigError::InvalidValue {
                name: "REPO_TYPE",
                value: "postgres".to_string(),
                expected: "memory, dynamodb",
            }
        );
    }

    #[test]
    fn test_unknown_cache_backend_is_an_error() {
        let result = Config::from_lookup(lookup_from(&[("CACHE_BACKEND", "memcached")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_unparsable_numbers_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("CACHE_TTL_SECONDS", "thirty minutes"),
            ("REQUEST_TIMEOUT_SECONDS", "-1"),
        ]))
        .unwrap();

        assert_eq!(config.cache_ttl_seconds, 1800);
        assert_eq!(config.request_timeout_seconds, 5);
    }
}
