use crate::app_config::RunConfig;
use crate::ConfigError;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (GitHubActions; MarketDigestBot/1.0)";

/// Load run configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_run_config() -> Result<RunConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_run_config_from_env()
}

/// Load run configuration from environment variables already in the process.
///
/// Unlike [`load_run_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_run_config_from_env() -> Result<RunConfig, ConfigError> {
    build_run_config(|key| std::env::var(key))
}

/// Build run configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it from a `HashMap`.
fn build_run_config<F>(lookup: F) -> Result<RunConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
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

    let sources_path = PathBuf::from(or_default(
        "MDIGEST_SOURCES_PATH",
        "./app/data/sources_events.json",
    ));
    let events_dir = PathBuf::from(or_default("MDIGEST_EVENTS_DIR", "./app/data/events"));
    let log_level = or_default("MDIGEST_LOG_LEVEL", "info");
    let user_agent = or_default("MDIGEST_USER_AGENT", DEFAULT_USER_AGENT);

    let fetch_timeout_secs = parse_u64("MDIGEST_FETCH_TIMEOUT_SECS", "20")?;
    if fetch_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "MDIGEST_FETCH_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let max_concurrent_feeds = parse_usize("MDIGEST_MAX_CONCURRENT_FEEDS", "4")?;

    Ok(RunConfig {
        sources_path,
        events_dir,
        log_level,
        user_agent,
        fetch_timeout_secs,
        max_concurrent_feeds,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
