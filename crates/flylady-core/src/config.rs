use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files. Useful for tests or callers that
/// manage env setup themselves.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

const DEFAULT_FEED_URL: &str = "https://alis.zazitky.cz/data/exports/zazitky-pap-all.xml";

/// Build application configuration using the provided env-var lookup.
///
/// The parsing/validation logic is decoupled from the real environment so it
/// can be tested with a pure `HashMap` lookup, no `set_var`/`remove_var`.
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

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("FLYLADY_ENV", "development"));
    let bind_addr = parse_addr("FLYLADY_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("FLYLADY_LOG_LEVEL", "info");
    let site_base_url = or_default("FLYLADY_SITE_BASE_URL", "https://flylady.cz");
    let feed_url = or_default("FLYLADY_FEED_URL", DEFAULT_FEED_URL);
    let feed_revalidate_secs = parse_u64("FLYLADY_FEED_REVALIDATE_SECS", "3600")?;
    let feed_timeout_secs = parse_u64("FLYLADY_FEED_TIMEOUT_SECS", "30")?;
    let feed_user_agent = or_default("FLYLADY_FEED_USER_AGENT", "flylady/0.1 (affiliate-catalog)");
    let blog_dir = PathBuf::from(or_default("FLYLADY_BLOG_DIR", "./content/blog"));

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        site_base_url,
        feed_url,
        feed_revalidate_secs,
        feed_timeout_secs,
        feed_user_agent,
        blog_dir,
    })
}

fn parse_environment(raw: &str) -> Environment {
    match raw.to_lowercase().as_str() {
        "production" | "prod" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
