use std::{env, fmt, net::SocketAddr, time::Duration};

use sqlx::postgres::PgConnectOptions;
use thiserror::Error;

pub const DEFAULT_MAILGUN_API_BASE: &str = "https://api.mailgun.net";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_LOOKUP_TIMEOUT_SECONDS: u64 = 10;
const DEFAULT_POSTGRES_PORT: u16 = 5432;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(&self.user)
            .password(&self.password)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct MailgunConfig {
    pub api_key: String,
    pub domain: String,
    pub api_base: String,
}

const REDACTED: &str = "<redacted>";

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &REDACTED)
            .finish()
    }
}

impl fmt::Debug for MailgunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailgunConfig")
            .field("api_key", &REDACTED)
            .field("domain", &self.domain)
            .field("api_base", &self.api_base)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database: DatabaseConfig,
    pub mailgun: MailgunConfig,
    /// Prefix of the confirmation link; the token is appended verbatim.
    pub verify_url: String,
    pub bind_addr: SocketAddr,
    pub lookup_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok(); // Load .env file

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key source so tests don't touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let database = DatabaseConfig {
            host: required("POSTGRESQL_HOST")?,
            port: parse_or("POSTGRESQL_PORT", lookup("POSTGRESQL_PORT"), DEFAULT_POSTGRES_PORT)?,
            name: required("POSTGRESQL_DB")?,
            user: required("POSTGRESQL_USER")?,
            password: required("POSTGRESQL_PASSWORD")?,
        };

        let mailgun = MailgunConfig {
            api_key: required("API_KEY")?,
            domain: required("DOMAIN")?,
            api_base: lookup("MAILGUN_API_BASE")
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_MAILGUN_API_BASE.to_string()),
        };

        let verify_url = required("VERIFY_URL")?;

        // Cloud runtimes hand us PORT; BIND_ADDR wins when both are present.
        let bind_addr = match (lookup("BIND_ADDR"), lookup("PORT")) {
            (Some(addr), _) => parse_value("BIND_ADDR", addr)?,
            (None, Some(port)) => {
                let port: u16 = parse_value("PORT", port)?;
                SocketAddr::from(([0, 0, 0, 0], port))
            }
            (None, None) => parse_value("BIND_ADDR", DEFAULT_BIND_ADDR.to_string())?,
        };

        let lookup_timeout_seconds: u64 = parse_or(
            "LOOKUP_TIMEOUT_SECONDS",
            lookup("LOOKUP_TIMEOUT_SECONDS"),
            DEFAULT_LOOKUP_TIMEOUT_SECONDS,
        )?;
        // Zero would time out every lookup.
        if lookup_timeout_seconds == 0 {
            return Err(ConfigError::Invalid {
                key: "LOOKUP_TIMEOUT_SECONDS",
                value: lookup_timeout_seconds.to_string(),
            });
        }
        let lookup_timeout = Duration::from_secs(lookup_timeout_seconds);

        Ok(Config {
            database,
            mailgun,
            verify_url,
            bind_addr,
            lookup_timeout,
        })
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    match value.trim().parse::<T>() {
        Ok(parsed) => Ok(parsed),
        Err(_) => Err(ConfigError::Invalid { key, value }),
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => parse_value(key, v),
        _ => Ok(default),
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        database: DatabaseConfig {
            host: "localhost".into(),
            port: DEFAULT_POSTGRES_PORT,
            name: "users".into(),
            user: "postgres".into(),
            password: "pg-secret".into(),
        },
        mailgun: MailgunConfig {
            api_key: "key-test".into(),
            domain: "mg.example.com".into(),
            api_base: DEFAULT_MAILGUN_API_BASE.into(),
        },
        verify_url: "https://app.example.com/verify?token=".into(),
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
        lookup_timeout: Duration::from_secs(1),
    }
}
