use std::str::FromStr;

use crate::app_config::{AppConfig, Environment};
use crate::pagination::{PageSize, TotalPolicy};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

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

    let api_url = require("SHOPFRONT_API_URL")?;
    if api_url.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPFRONT_API_URL".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    let api_key = lookup("SHOPFRONT_API_KEY")
        .ok()
        .filter(|key| !key.is_empty());

    let env = parse_environment(&or_default("SHOPFRONT_ENV", "development"))?;
    let log_level = or_default("SHOPFRONT_LOG_LEVEL", "info");
    let cart_path = PathBuf::from(or_default("SHOPFRONT_CART_PATH", "./.shopfront/cart.json"));

    let request_timeout_secs = parse_u64("SHOPFRONT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SHOPFRONT_USER_AGENT", "shopfront/0.1");
    let debounce_ms = parse_u64("SHOPFRONT_DEBOUNCE_MS", "500")?;

    let page_size: PageSize = parse_var(
        &or_default("SHOPFRONT_PAGE_SIZE", "12"),
        "SHOPFRONT_PAGE_SIZE",
        PageSize::from_str,
    )?;
    let total_policy: TotalPolicy = parse_var(
        &or_default("SHOPFRONT_TOTAL_POLICY", "optimistic"),
        "SHOPFRONT_TOTAL_POLICY",
        TotalPolicy::from_str,
    )?;
    let forward_search = parse_var(
        &or_default("SHOPFRONT_FORWARD_SEARCH", "true"),
        "SHOPFRONT_FORWARD_SEARCH",
        parse_bool,
    )?;

    Ok(AppConfig {
        env,
        api_url,
        api_key,
        log_level,
        cart_path,
        request_timeout_secs,
        user_agent,
        page_size,
        debounce_ms,
        total_policy,
        forward_search,
    })
}

/// Runs a string-error parser over a raw env value, tagging failures with
/// the variable name.
fn parse_var<T>(
    raw: &str,
    var: &str,
    parse: fn(&str) -> Result<T, String>,
) -> Result<T, ConfigError> {
    parse(raw).map_err(|reason| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHOPFRONT_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("expected a boolean, got \"{other}\"")),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
