use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

/// Longest accepted drift period: one day.
pub const MAX_DRIFT_INTERVAL_SECS: u64 = 86_400;

/// Raised when an environment variable is present but cannot be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("{name} must be at most {max}, got {value}")]
    TooLarge {
        name: &'static str,
        max: u64,
        value: u64,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults matching the reference deployment: port 3000,
/// any CORS origin, a 30 second drift period.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: IpAddr,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins from comma-separated `CORS_ORIGINS`. `*` allows any.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Seconds between drift ticks (default: `30`).
    pub drift_interval_secs: u64,
    /// Fixed seed for drift and random picks. `None` uses OS entropy.
    pub drift_seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            cors_origins: vec!["*".into()],
            request_timeout_secs: 30,
            drift_interval_secs: 30,
            drift_seed: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default    |
    /// |------------------------|------------|
    /// | `HOST`                 | `0.0.0.0`  |
    /// | `PORT`                 | `3000`     |
    /// | `CORS_ORIGINS`         | `*`        |
    /// | `REQUEST_TIMEOUT_SECS` | `30`       |
    /// | `DRIFT_INTERVAL_SECS`  | `30`       |
    /// | `DRIFT_SEED`           | unset      |
    ///
    /// `DRIFT_INTERVAL_SECS` must lie in `1..=MAX_DRIFT_INTERVAL_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = parse_var(&lookup, "HOST", "IP address")?.unwrap_or(defaults.host);
        let port = parse_var(&lookup, "PORT", "u16")?.unwrap_or(defaults.port);

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.cors_origins);

        let request_timeout_secs = parse_var(&lookup, "REQUEST_TIMEOUT_SECS", "u64")?
            .unwrap_or(defaults.request_timeout_secs);

        let drift_interval_secs = parse_var(&lookup, "DRIFT_INTERVAL_SECS", "u64")?
            .unwrap_or(defaults.drift_interval_secs);
        if drift_interval_secs == 0 {
            return Err(ConfigError::Zero("DRIFT_INTERVAL_SECS"));
        }
        if drift_interval_secs > MAX_DRIFT_INTERVAL_SECS {
            return Err(ConfigError::TooLarge {
                name: "DRIFT_INTERVAL_SECS",
                max: MAX_DRIFT_INTERVAL_SECS,
                value: drift_interval_secs,
            });
        }

        let drift_seed = parse_var(&lookup, "DRIFT_SEED", "u64")?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            drift_interval_secs,
            drift_seed,
        })
    }

    /// True when `CORS_ORIGINS` is empty or contains `*`.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}

fn parse_var<T, F>(
    lookup: &F,
    name: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => match value.trim().parse() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(ConfigError::Invalid {
                name,
                expected,
                value,
            }),
        },
    }
}
