//! Process configuration read from the environment.

use std::time::Duration;

use crate::domain::{ConfigError, Credential};
use crate::infra::{DEFAULT_ENDPOINT, LogFormat, RpcClientConfig};

pub const API_KEY_VAR: &str = "BLOCKPI_API_KEY";
pub const LISTEN_PORT_VAR: &str = "BLOCKPI_LISTEN_PORT";
pub const ENDPOINT_VAR: &str = "BLOCKPI_API_ENDPOINT";
pub const TIMEOUT_VAR: &str = "BLOCKPI_TIMEOUT_SECS";
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub credential: Credential,
    pub port: u16,
    pub endpoint: String,
    pub timeout: Option<Duration>,
    pub log_format: LogFormat,
}

impl Config {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset. The API key is passed through
    /// untrimmed; only the upstream decides whether it is valid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let credential = lookup(API_KEY_VAR)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(API_KEY_VAR.to_string()))
            .and_then(Credential::new)?;

        let port = match get(LISTEN_PORT_VAR) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                key: LISTEN_PORT_VAR.to_string(),
                message: format!("{}", e),
            })?,
            None => DEFAULT_PORT,
        };

        let endpoint = get(ENDPOINT_VAR).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let timeout = match get(TIMEOUT_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: TIMEOUT_VAR.to_string(),
                        message: "must be a positive number of seconds".to_string(),
                    });
                }
            },
            None => None,
        };

        let log_format = get(LOG_FORMAT_VAR)
            .map(|raw| raw.parse::<LogFormat>())
            .transpose()
            .map_err(|message| ConfigError::InvalidValue {
                key: LOG_FORMAT_VAR.to_string(),
                message,
            })?
            .unwrap_or_default();

        Ok(Self {
            credential,
            port,
            endpoint,
            timeout,
            log_format,
        })
    }

    #[must_use]
    pub fn client_config(&self) -> RpcClientConfig {
        RpcClientConfig {
            endpoint: self.endpoint.clone(),
            timeout: self.timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    // std::env::set_var is unsafe in Rust 2024, so tests go through from_lookup
    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[(API_KEY_VAR, "abc")])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(config.timeout.is_none());
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_missing_credential() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingEnvVar(API_KEY_VAR.to_string()));
    }

    #[test]
    fn test_empty_credential_is_missing() {
        let err = Config::from_lookup(lookup(&[(API_KEY_VAR, "")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
    }

    #[test]
    fn test_whitespace_credential_is_not_rejected_locally() {
        let config = Config::from_lookup(lookup(&[(API_KEY_VAR, "  ")])).unwrap();
        assert_eq!(config.credential.expose(), "  ");
    }

    #[test]
    fn test_invalid_log_format() {
        let err = Config::from_lookup(lookup(&[(API_KEY_VAR, "abc"), (LOG_FORMAT_VAR, "xml")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == LOG_FORMAT_VAR));
    }

    #[test]
    fn test_custom_values() {
        let config = Config::from_lookup(lookup(&[
            (API_KEY_VAR, "abc"),
            (LISTEN_PORT_VAR, "9100"),
            (ENDPOINT_VAR, "http://localhost:1234/rpc"),
            (TIMEOUT_VAR, "10"),
            (LOG_FORMAT_VAR, "json"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.endpoint, "http://localhost:1234/rpc");
        assert_eq!(config.timeout, Some(Duration::from_secs(10)));
        assert_eq!(config.log_format, LogFormat::Json);

        let client_config = config.client_config();
        assert_eq!(client_config.endpoint, "http://localhost:1234/rpc");
        assert_eq!(client_config.timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_lookup(lookup(&[(API_KEY_VAR, "abc"), (LISTEN_PORT_VAR, "http")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == LISTEN_PORT_VAR));

        let err = Config::from_lookup(lookup(&[(API_KEY_VAR, "abc"), (LISTEN_PORT_VAR, "70000")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_invalid_timeout() {
        let err = Config::from_lookup(lookup(&[(API_KEY_VAR, "abc"), (TIMEOUT_VAR, "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == TIMEOUT_VAR));
    }

    #[test]
    fn test_debug_does_not_leak_credential() {
        let config = Config::from_lookup(lookup(&[(API_KEY_VAR, "super-secret")])).unwrap();
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
