//! Server configuration read from `TIMELOG_*` environment variables.
//!
//! # Invariants
//! - Every setting has a default; only malformed values are errors.
//! - `log_dir`, when set, is an absolute path.

use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;
use timelog_core::parse_work_date;

pub const ENV_DB: &str = "TIMELOG_DB";
pub const ENV_ADDR: &str = "TIMELOG_ADDR";
pub const ENV_STATIC_DIR: &str = "TIMELOG_STATIC_DIR";
pub const ENV_LOG_SINCE: &str = "TIMELOG_LOG_SINCE";
pub const ENV_LOG_LEVEL: &str = "TIMELOG_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "TIMELOG_LOG_DIR";

const DEFAULT_DB: &str = "./timelog.db";
const DEFAULT_ADDR: &str = "0.0.0.0:8222";
const DEFAULT_STATIC_DIR: &str = "./static";
const DEFAULT_LOG_SINCE: &str = "2025-01-01";

/// Bulma stylesheet that every page links to, relative to the static dir.
pub const BULMA_CSS: &str = "bulma/css/bulma.css";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidAddr { value: String },
    InvalidDate { key: &'static str, value: String },
    RelativeLogDir { value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAddr { value } => {
                write!(f, "{ENV_ADDR} `{value}` is not a socket address")
            }
            Self::InvalidDate { key, value } => {
                write!(f, "{key} `{value}` is not a YYYY-MM-DD date")
            }
            Self::RelativeLogDir { value } => {
                write!(f, "{ENV_LOG_DIR} `{value}` must be an absolute path")
            }
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub db_path: PathBuf,
    pub addr: SocketAddr,
    pub static_dir: PathBuf,
    /// Oldest work date shown on the activity log.
    pub log_since: NaiveDate,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let addr_text = read(ENV_ADDR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = addr_text
            .parse()
            .map_err(|_| ConfigError::InvalidAddr { value: addr_text })?;

        let since_text = read(ENV_LOG_SINCE).unwrap_or_else(|| DEFAULT_LOG_SINCE.to_string());
        let log_since = parse_work_date(&since_text).ok_or(ConfigError::InvalidDate {
            key: ENV_LOG_SINCE,
            value: since_text,
        })?;

        let log_dir = match read(ENV_LOG_DIR) {
            Some(value) => {
                let path = PathBuf::from(&value);
                if !path.is_absolute() {
                    return Err(ConfigError::RelativeLogDir { value });
                }
                Some(path)
            }
            None => None,
        };

        Ok(Self {
            db_path: PathBuf::from(read(ENV_DB).unwrap_or_else(|| DEFAULT_DB.to_string())),
            addr,
            static_dir: PathBuf::from(
                read(ENV_STATIC_DIR).unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
            ),
            log_since,
            log_level: read(ENV_LOG_LEVEL),
            log_dir,
        })
    }

    pub fn bulma_css_path(&self) -> PathBuf {
        self.static_dir.join(BULMA_CSS)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ServerConfig, ENV_ADDR, ENV_LOG_DIR, ENV_LOG_SINCE};
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.db_path, PathBuf::from("./timelog.db"));
        assert_eq!(config.addr.port(), 8222);
        assert_eq!(config.static_dir, PathBuf::from("./static"));
        assert_eq!(
            config.log_since,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
        assert_eq!(config.log_level, None);
        assert_eq!(config.log_dir, None);
        assert_eq!(
            config.bulma_css_path(),
            PathBuf::from("./static/bulma/css/bulma.css")
        );
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config_from(&[(ENV_ADDR, "   "), (ENV_LOG_SINCE, "")]).unwrap();
        assert_eq!(config.addr.port(), 8222);
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert_eq!(
            config_from(&[(ENV_ADDR, "localhost")]),
            Err(ConfigError::InvalidAddr {
                value: "localhost".to_string()
            })
        );
        assert_eq!(
            config_from(&[(ENV_LOG_SINCE, "2025/01/01")]),
            Err(ConfigError::InvalidDate {
                key: ENV_LOG_SINCE,
                value: "2025/01/01".to_string()
            })
        );
        assert_eq!(
            config_from(&[(ENV_LOG_DIR, "logs")]),
            Err(ConfigError::RelativeLogDir {
                value: "logs".to_string()
            })
        );
    }

    #[test]
    fn overrides_are_read() {
        let config = config_from(&[
            ("TIMELOG_DB", "/tmp/other.db"),
            (ENV_ADDR, "127.0.0.1:9000"),
            (ENV_LOG_SINCE, "2024-06-01"),
            ("TIMELOG_LOG_LEVEL", "trace"),
        ])
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/other.db"));
        assert_eq!(config.addr.to_string(), "127.0.0.1:9000");
        assert_eq!(
            config.log_since,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
        assert_eq!(config.log_level.as_deref(), Some("trace"));
    }
}
