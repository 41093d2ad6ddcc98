//! Environment-driven settings for the server and the admin CLI.
//!
//! Everything is read once at startup by [`load_from_env`], which also runs
//! [`Config::validate`]. Unset or unparsable optional values fall back to
//! their defaults.
//!
//! ## Storage
//!
//! Either a single connection string:
//!
//! ```bash
//! export DATABASE_URL="postgres://snaplink:secret@db:5432/snaplink"
//! ```
//!
//! or its parts, which are assembled (and percent-encoded) into one:
//!
//! ```bash
//! export DB_HOST="db"          # default: localhost
//! export DB_PORT="5432"        # default: 5432
//! export DB_USER="snaplink"
//! export DB_PASSWORD="secret"
//! export DB_NAME="snaplink"
//! ```
//!
//! With neither, links live in process memory and vanish on restart.
//!
//! ## Other Variables
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `LISTEN` | `0.0.0.0:3000` | Socket address to bind |
//! | `PUBLIC_BASE_URL` | from request | Prefix for returned short URLs |
//! | `RUST_LOG` | `info` | Log filter |
//! | `LOG_FORMAT` | `text` | `text` or `json` |
//! | `CODE_LENGTH` | 6 | Length of generated codes |
//! | `ALIAS_MIN_LENGTH` / `ALIAS_MAX_LENGTH` | 4 / 10 | Custom alias bounds |
//! | `CODE_GENERATION_ATTEMPTS` | 10 | Rounds before creation gives up |
//! | `RATE_LIMIT_ENABLED` | `true` | Per-IP limit on `/api` |
//! | `RATE_LIMIT_PERIOD_SECS` / `RATE_LIMIT_BURST` | 2 / 100 | Seconds per token, bucket size |
//! | `DB_MAX_CONNECTIONS` | 10 | Pool size |
//! | `DB_CONNECT_TIMEOUT` | 30 | Pool acquire timeout, seconds |
//! | `DB_IDLE_TIMEOUT` / `DB_MAX_LIFETIME` | 600 / 1800 | Connection recycling, seconds |

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use url::Url;

/// Upper bound for `CODE_LENGTH`; longer codes defeat the purpose.
const MAX_CODE_LENGTH: usize = 64;

/// Policy constants for short codes and custom aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkPolicy {
    /// Length of generated codes.
    pub code_length: usize,
    /// Shortest accepted custom alias.
    pub alias_min_length: usize,
    /// Longest accepted custom alias.
    pub alias_max_length: usize,
    /// Upper bound on generate/check/insert rounds for one creation.
    pub max_generation_attempts: usize,
}

impl Default for LinkPolicy {
    fn default() -> Self {
        Self {
            code_length: 6,
            alias_min_length: 4,
            alias_max_length: 10,
            max_generation_attempts: 10,
        }
    }
}

impl LinkPolicy {
    /// Shortest code accepted in a request path.
    pub fn min_code_length(&self) -> usize {
        self.alias_min_length.min(self.code_length)
    }

    /// Longest code accepted in a request path.
    pub fn max_code_length(&self) -> usize {
        self.alias_max_length.max(self.code_length)
    }

    fn check(&self) -> Result<()> {
        if !(1..=MAX_CODE_LENGTH).contains(&self.code_length) {
            anyhow::bail!(
                "CODE_LENGTH must be between 1 and {}, got {}",
                MAX_CODE_LENGTH,
                self.code_length
            );
        }
        if self.alias_min_length == 0 || self.alias_min_length > self.alias_max_length {
            anyhow::bail!(
                "ALIAS_MIN_LENGTH must be at least 1 and not exceed ALIAS_MAX_LENGTH, got {}..{}",
                self.alias_min_length,
                self.alias_max_length
            );
        }
        if self.max_generation_attempts == 0 {
            anyhow::bail!("CODE_GENERATION_ATTEMPTS must be at least 1");
        }
        Ok(())
    }
}

/// Settings shared by the server and the admin CLI.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string. `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub listen_addr: String,
    /// Fixed scheme and host for short URLs, e.g. `https://sl.example.com`.
    pub public_base_url: Option<String>,
    pub log_level: String,
    pub log_format: String,
    pub link_policy: LinkPolicy,
    pub rate_limit_enabled: bool,
    pub rate_limit_period_secs: u64,
    pub rate_limit_burst: u32,
    pub db_max_connections: u32,
    /// Seconds to wait for a pooled connection.
    pub db_connect_timeout: u64,
    /// Seconds an idle connection is kept.
    pub db_idle_timeout: u64,
    /// Seconds before any connection is recycled.
    pub db_max_lifetime: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            listen_addr: "0.0.0.0:3000".to_string(),
            public_base_url: None,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            link_policy: LinkPolicy::default(),
            rate_limit_enabled: true,
            rate_limit_period_secs: 2,
            rate_limit_burst: 100,
            db_max_connections: 10,
            db_connect_timeout: 30,
            db_idle_timeout: 600,
            db_max_lifetime: 1800,
        }
    }
}

/// Reads and parses an optional variable, falling back to `default` when it is
/// unset or unparsable.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_flag(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(v) => matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}

impl Config {
    /// Reads every setting from the environment without validating it.
    ///
    /// # Errors
    ///
    /// Fails only when the database is configured by parts and a required
    /// part is missing.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let policy = defaults.link_policy;

        Ok(Self {
            database_url: Self::load_database_url()
                .context("Failed to load database configuration")?,
            listen_addr: env::var("LISTEN").unwrap_or(defaults.listen_addr),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .ok()
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty()),
            log_level: env::var("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: env::var("LOG_FORMAT").unwrap_or(defaults.log_format),
            link_policy: LinkPolicy {
                code_length: env_or("CODE_LENGTH", policy.code_length),
                alias_min_length: env_or("ALIAS_MIN_LENGTH", policy.alias_min_length),
                alias_max_length: env_or("ALIAS_MAX_LENGTH", policy.alias_max_length),
                max_generation_attempts: env_or(
                    "CODE_GENERATION_ATTEMPTS",
                    policy.max_generation_attempts,
                ),
            },
            rate_limit_enabled: env_flag("RATE_LIMIT_ENABLED", defaults.rate_limit_enabled),
            rate_limit_period_secs: env_or(
                "RATE_LIMIT_PERIOD_SECS",
                defaults.rate_limit_period_secs,
            ),
            rate_limit_burst: env_or("RATE_LIMIT_BURST", defaults.rate_limit_burst),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", defaults.db_max_connections),
            db_connect_timeout: env_or("DB_CONNECT_TIMEOUT", defaults.db_connect_timeout),
            db_idle_timeout: env_or("DB_IDLE_TIMEOUT", defaults.db_idle_timeout),
            db_max_lifetime: env_or("DB_MAX_LIFETIME", defaults.db_max_lifetime),
        })
    }

    /// Picks `DATABASE_URL`, or assembles one from `DB_*` parts when `DB_HOST`
    /// or `DB_NAME` is present. Returns `Ok(None)` when neither is configured.
    fn load_database_url() -> Result<Option<String>> {
        if let Ok(url) = env::var("DATABASE_URL") {
            return Ok(Some(url));
        }

        if env::var("DB_HOST").is_err() && env::var("DB_NAME").is_err() {
            return Ok(None);
        }

        let required = |key: &str| {
            env::var(key).with_context(|| format!("{key} is required when DATABASE_URL is unset"))
        };

        let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port: u16 = env_or("DB_PORT", 5432);
        let user = required("DB_USER")?;
        let password = required("DB_PASSWORD")?;
        let name = required("DB_NAME")?;

        let mut url = Url::parse(&format!("postgres://{host}:{port}"))
            .with_context(|| format!("DB_HOST '{host}' is not a valid host"))?;
        url.set_path(&name);
        url.set_username(&user)
            .map_err(|_| anyhow::anyhow!("DB_USER cannot be used in a connection string"))?;
        url.set_password(Some(&password))
            .map_err(|_| anyhow::anyhow!("DB_PASSWORD cannot be used in a connection string"))?;

        Ok(Some(url.to_string()))
    }

    /// Rejects settings the server could not run with.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: unknown log format, a listen address
    /// that is not `ip:port`, a non-Postgres database URL, a non-HTTP public
    /// base URL, inconsistent link policy, or zero rate limit or pool values.
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.log_format.as_str(), "text" | "json") {
            anyhow::bail!("LOG_FORMAT must be 'text' or 'json', got '{}'", self.log_format);
        }

        self.listen_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("LISTEN must be an ip:port pair, got '{}'", self.listen_addr))?;

        if let Some(ref database_url) = self.database_url {
            let scheme = Url::parse(database_url).map(|u| u.scheme().to_string());
            if !matches!(scheme.as_deref(), Ok("postgres" | "postgresql")) {
                anyhow::bail!(
                    "DATABASE_URL must be a postgres:// or postgresql:// URL, got '{}'",
                    mask_connection_string(database_url)
                );
            }
        }

        if let Some(ref base_url) = self.public_base_url {
            let parsed = Url::parse(base_url)
                .with_context(|| format!("PUBLIC_BASE_URL '{}' is not a URL", base_url))?;
            if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
                anyhow::bail!("PUBLIC_BASE_URL must be an http(s) URL, got '{}'", base_url);
            }
        }

        self.link_policy.check()?;

        if self.rate_limit_enabled && (self.rate_limit_period_secs == 0 || self.rate_limit_burst == 0)
        {
            anyhow::bail!("RATE_LIMIT_PERIOD_SECS and RATE_LIMIT_BURST must be greater than 0");
        }

        if self.db_max_connections == 0 || self.db_connect_timeout == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS and DB_CONNECT_TIMEOUT must be greater than 0");
        }

        Ok(())
    }

    /// Logs the effective settings. Credentials are masked.
    pub fn print_summary(&self) {
        let storage = self
            .database_url
            .as_deref()
            .map(mask_connection_string)
            .unwrap_or_else(|| "in-memory".to_string());
        let base_url = self
            .public_base_url
            .as_deref()
            .unwrap_or("derived from Host header");

        tracing::info!(
            listen = %self.listen_addr,
            storage = %storage,
            public_base_url = %base_url,
            log_format = %self.log_format,
            "Configuration loaded"
        );
        tracing::info!(
            code_length = self.link_policy.code_length,
            alias_min = self.link_policy.alias_min_length,
            alias_max = self.link_policy.alias_max_length,
            attempts = self.link_policy.max_generation_attempts,
            "Link policy"
        );

        if self.rate_limit_enabled {
            tracing::info!(
                period_secs = self.rate_limit_period_secs,
                burst = self.rate_limit_burst,
                "Rate limiting enabled"
            );
        } else {
            tracing::warn!("Rate limiting disabled");
        }
    }
}

/// Replaces the password of a connection string with `***`.
///
/// Strings that do not parse as URLs are hidden entirely.
fn mask_connection_string(raw: &str) -> String {
    let Ok(mut url) = Url::parse(raw) else {
        return "<unparseable>".to_string();
    };

    if url.password().is_some() && url.set_password(Some("***")).is_err() {
        return "<unparseable>".to_string();
    }

    url.to_string()
}

/// Reads and validates the configuration.
///
/// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
///
/// # Errors
///
/// See [`Config::from_env`] and [`Config::validate`].
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
