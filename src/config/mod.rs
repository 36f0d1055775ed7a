//! Backend endpoint configuration.
//!
//! | Env Var                | Default                 |
//! |------------------------|-------------------------|
//! | `ATV_API_BASE_URL`     | `http://localhost:5000` |
//! | `ATV_API_PATH`         | `/api`                  |
//! | `ATV_STATIC_PREFIX`    | `/public`               |
//! | `ATV_API_TIMEOUT_SECS` | `15`                    |
//! | `ATV_DATA_DIR`         | `.atv-admin`            |

use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_API_PATH: &str = "/api";
const DEFAULT_STATIC_PREFIX: &str = "/public";
const DEFAULT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_DATA_DIR: &str = ".atv-admin";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid {var} `{value}`: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_path: String,
    pub static_prefix: String,
    pub timeout: Duration,
    pub data_dir: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_path: DEFAULT_API_PATH.to_string(),
            static_prefix: DEFAULT_STATIC_PREFIX.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup, falling back to defaults
    /// for unset or blank keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let base_url = read("ATV_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        reqwest::Url::parse(&base_url).map_err(|err| ConfigError::Invalid {
            var: "ATV_API_BASE_URL",
            value: base_url.clone(),
            reason: err.to_string(),
        })?;

        let timeout_secs = match read("ATV_API_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(0) => {
                    return Err(ConfigError::Invalid {
                        var: "ATV_API_TIMEOUT_SECS",
                        value: raw,
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Ok(secs) => secs,
                Err(err) => {
                    return Err(ConfigError::Invalid {
                        var: "ATV_API_TIMEOUT_SECS",
                        value: raw,
                        reason: err.to_string(),
                    });
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_path: normalize_prefix(read("ATV_API_PATH").as_deref().unwrap_or(DEFAULT_API_PATH)),
            static_prefix: normalize_prefix(
                read("ATV_STATIC_PREFIX").as_deref().unwrap_or(DEFAULT_STATIC_PREFIX),
            ),
            timeout: Duration::from_secs(timeout_secs),
            data_dir: PathBuf::from(read("ATV_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())),
        })
    }

    /// Full REST URL for an endpoint path such as `/atvs`.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.api_path, path)
    }

    /// Public URL of a stored image path, or `None` when the listing has no image.
    pub fn image_url(&self, image_path: &str) -> Option<String> {
        let image_path = image_path.trim();
        if image_path.is_empty() {
            return None;
        }
        Some(format!("{}{}{}", self.base_url, self.static_prefix, image_path))
    }
}

fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
