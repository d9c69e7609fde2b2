// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{env, fmt, num::NonZeroU32, path::PathBuf, str::FromStr};

use anyhow::Error;
use tracing::{Subscriber, subscriber::set_global_default};
use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::config::Config;

pub(crate) fn init_environment() {
    if let Ok(path) = dotenvy::dotenv() {
        // Print to stderr because logging has not been initialized yet
        eprintln!("Loaded environment from dotenv file {}", path.display());
    }
}

const TRACING_SUBSCRIBER_ENV_FILTER_DEFAULT: &str = "info";

fn create_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|err| {
        let rust_log_from_env = env::var("RUST_LOG").ok();
        if let Some(rust_log_from_env) = rust_log_from_env {
            if !rust_log_from_env.is_empty() {
                eprintln!("Failed to parse RUST_LOG environment variable '{rust_log_from_env}': {err}");
            }
        }
        EnvFilter::new(TRACING_SUBSCRIBER_ENV_FILTER_DEFAULT)
    })
}

fn create_tracing_subscriber() -> impl Subscriber {
    tracing_subscriber::fmt()
        .with_env_filter(create_env_filter())
        .with_writer(std::io::stderr)
        .finish()
}

pub(crate) fn init_tracing_and_logging() -> anyhow::Result<()> {
    // Capture and redirect all log messages as tracing events
    LogTracer::init()?;

    set_global_default(create_tracing_subscriber())?;

    Ok(())
}

fn parse_bool_var(var: &str) -> anyhow::Result<bool> {
    match var.trim().to_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => anyhow::bail!("neither true/false nor 1/0"),
    }
}

/// Read and parse an environment variable.
///
/// Returns `None` if the variable is missing, empty, or malformed.
/// Malformed values are logged.
fn parse_var<T>(name: &str) -> Option<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    parse_var_with(name, |var| var.parse().map_err(|err| anyhow::anyhow!("{err}")))
}

fn parse_var_with<T>(name: &str, parse: impl FnOnce(&str) -> anyhow::Result<T>) -> Option<T> {
    env::var(name)
        .map_err(Error::from)
        .and_then(|var| {
            tracing::debug!("{name} = {var}");
            parse(var.trim()).inspect_err(|err| {
                tracing::warn!("Failed to parse {name} = {var}: {err}");
            })
        })
        .ok()
}

fn is_var_present(name: &str) -> bool {
    env::var(name).is_ok_and(|var| !var.trim().is_empty())
}

const LAUNCH_DEFAULT_CONFIG_ENV: &str = "LAUNCH_DEFAULT_CONFIG";

/// Ignore the configuration file and start with defaults.
pub(crate) fn parse_launch_default_config() -> Option<bool> {
    parse_var_with(LAUNCH_DEFAULT_CONFIG_ENV, parse_bool_var)
}

const ENDPOINT_IP_ENV: &str = "ENDPOINT_IP";

const ENDPOINT_PORT_ENV: &str = "ENDPOINT_PORT";

const ADMIN_ROUTES_ENV: &str = "ADMIN_ROUTES";

const STORE_URL_ENV: &str = "STORE_URL";

/// Selects the in-memory store explicitly.
const STORE_URL_MEMORY: &str = "memory:";

const STORE_SEED_FILE_ENV: &str = "STORE_SEED_FILE";

const STORE_POOL_MAX_SIZE_ENV: &str = "STORE_POOL_MAX_SIZE";

const TRACKS_CACHE_MAX_CAPACITY_ENV: &str = "TRACKS_CACHE_MAX_CAPACITY";

const TRACKS_CACHE_TIME_TO_LIVE_SECS_ENV: &str = "TRACKS_CACHE_TIME_TO_LIVE_SECS";

fn parse_store_url(var: &str) -> anyhow::Result<Option<Url>> {
    if var == STORE_URL_MEMORY {
        return Ok(None);
    }
    let url = Url::parse(var)?;
    match url.scheme() {
        "redis" | "rediss" => Ok(Some(url)),
        scheme => anyhow::bail!("unsupported scheme {scheme}"),
    }
}

/// Patch the configuration from environment variables.
///
/// Variables that are missing or malformed leave the corresponding
/// values untouched.
pub(crate) fn parse_config_into(config: &mut Config) {
    if let Some(ip_addr) = parse_var(ENDPOINT_IP_ENV) {
        config.network.endpoint.ip_addr = ip_addr;
    }
    if let Some(port) = parse_var(ENDPOINT_PORT_ENV) {
        config.network.endpoint.port = port;
    }
    if let Some(admin_routes) = parse_var_with(ADMIN_ROUTES_ENV, parse_bool_var) {
        config.network.admin_routes = admin_routes;
    }
    if is_var_present(STORE_URL_ENV) {
        if let Some(url) = parse_var_with(STORE_URL_ENV, parse_store_url) {
            config.store.url = url;
        }
    }
    if let Some(seed_file) = parse_var::<PathBuf>(STORE_SEED_FILE_ENV) {
        if !seed_file.as_os_str().is_empty() {
            config.store.seed_file = Some(seed_file);
        }
    }
    if let Some(pool_max_size) = parse_var::<NonZeroU32>(STORE_POOL_MAX_SIZE_ENV) {
        config.store.pool_max_size = pool_max_size;
    }
    if let Some(max_capacity) = parse_var(TRACKS_CACHE_MAX_CAPACITY_ENV) {
        config.cache.max_capacity = max_capacity;
    }
    if let Some(time_to_live_secs) = parse_var(TRACKS_CACHE_TIME_TO_LIVE_SECS_ENV) {
        config.cache.time_to_live_secs = time_to_live_secs;
    }
}
