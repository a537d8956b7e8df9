use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_UPSTREAM_URL: &str = "https://jotihunt.nl/api/2.0/subscriptions";
pub const DEFAULT_ARCHIVE_BASE_URL: &str = "https://web.archive.org";
pub const DEFAULT_ARCHIVE_TIMESTAMP: &str = "20231005142154";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can use a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("JOTIMAP_ENV", "development"))?;

    let bind_addr = parse_addr("JOTIMAP_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("JOTIMAP_LOG_LEVEL", "info");
    let tags_path = lookup("JOTIMAP_TAGS_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let upstream_url = or_default("JOTIMAP_UPSTREAM_URL", DEFAULT_UPSTREAM_URL);
    let archive_base_url = or_default("JOTIMAP_ARCHIVE_BASE_URL", DEFAULT_ARCHIVE_BASE_URL);
    let archive_timestamp = or_default("JOTIMAP_ARCHIVE_TIMESTAMP", DEFAULT_ARCHIVE_TIMESTAMP);
    if !is_wayback_timestamp(&archive_timestamp) {
        return Err(ConfigError::InvalidEnvVar {
            var: "JOTIMAP_ARCHIVE_TIMESTAMP".to_string(),
            reason: format!("'{archive_timestamp}' is not a 1-14 digit wayback timestamp"),
        });
    }

    let request_timeout_secs = parse_u64("JOTIMAP_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("JOTIMAP_USER_AGENT", "jotimap/0.1 (jotihunt-map)");
    let max_retries = parse_u32("JOTIMAP_MAX_RETRIES", "2")?;
    let retry_backoff_base_secs = parse_u64("JOTIMAP_RETRY_BACKOFF_BASE_SECS", "1")?;
    let rate_limit_per_minute = parse_usize("JOTIMAP_RATE_LIMIT_PER_MINUTE", "120")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        tags_path,
        upstream_url,
        archive_base_url,
        archive_timestamp,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_secs,
        rate_limit_per_minute,
    })
}

/// Wayback Machine timestamps are `YYYYMMDDhhmmss`, truncatable from the right.
#[must_use]
pub fn is_wayback_timestamp(ts: &str) -> bool {
    (1..=14).contains(&ts.len()) && ts.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "JOTIMAP_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
