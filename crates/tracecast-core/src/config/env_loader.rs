//! Environment variable-based configuration loading

use super::settings::{AppConfig, StoreBackend, StoreSettings, WeatherMode};
use crate::error::{TracecastError, TracecastResult};
use crate::llm::OpenAiConfig;
use crate::llm::openai::{DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL};
use std::env;
use std::path::PathBuf;

/// Environment variable names
pub mod keys {
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    pub const OPENAI_MODEL: &str = "OPENAI_MODEL";
    pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
    pub const OPENAI_ORGANIZATION: &str = "OPENAI_ORGANIZATION";
    pub const WEATHER_API_KEY: &str = "WEATHER_API_KEY";
    pub const WEATHER_BACKEND: &str = "WEATHER_BACKEND";
    pub const STORE_BACKEND: &str = "TRACE_STORE_BACKEND";
    pub const STORE_USERNAME: &str = "TRACE_STORE_USERNAME";
    pub const STORE_PASSWORD: &str = "TRACE_STORE_PASSWORD";
    pub const STORE_DATABASE: &str = "TRACE_STORE_DATABASE";
    pub const STORE_COLLECTION: &str = "TRACE_STORE_COLLECTION";
    pub const STORE_URL: &str = "TRACE_STORE_URL";
    pub const STORE_DATA_SOURCE: &str = "TRACE_STORE_DATA_SOURCE";
    pub const STORE_DIR: &str = "TRACE_STORE_DIR";
}

const DEFAULT_DATA_SOURCE: &str = "Cluster0";
const DEFAULT_TRACE_DIR: &str = "traces";

/// Values given on the command line, which win over the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub model: Option<String>,
    pub weather_mode: Option<WeatherMode>,
    pub store_backend: Option<StoreBackend>,
    pub trace_dir: Option<PathBuf>,
}

/// Load `.env` (if present) and then the process environment
pub fn load_from_env(overrides: &ConfigOverrides) -> TracecastResult<AppConfig> {
    match dotenv::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => {
            return Err(TracecastError::config_with_context(
                format!("Failed to read .env file: {}", e),
                "Fix or remove the .env file",
            ));
        }
    }
    load_from_lookup(|key| env::var(key).ok(), overrides)
}

/// Build the configuration from any key lookup
///
/// Blank values count as missing. Every missing required key is listed in
/// the returned error.
pub fn load_from_lookup<F>(lookup: F, overrides: &ConfigOverrides) -> TracecastResult<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| {
        lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };
    let mut missing: Vec<&str> = Vec::new();
    let mut require = |key: &'static str| {
        let value = get(key);
        if value.is_none() {
            missing.push(key);
        }
        value
    };

    let openai_api_key = require(keys::OPENAI_API_KEY);
    let weather_api_key = require(keys::WEATHER_API_KEY);

    let store_backend = match overrides.store_backend {
        Some(backend) => backend,
        None => get(keys::STORE_BACKEND)
            .map(|v| v.parse())
            .transpose()?
            .unwrap_or_default(),
    };

    let database = require(keys::STORE_DATABASE);
    let collection = require(keys::STORE_COLLECTION);
    let (username, password, url) = match store_backend {
        StoreBackend::Http => (
            require(keys::STORE_USERNAME),
            require(keys::STORE_PASSWORD),
            require(keys::STORE_URL),
        ),
        StoreBackend::File => (
            get(keys::STORE_USERNAME),
            get(keys::STORE_PASSWORD),
            get(keys::STORE_URL),
        ),
    };

    if !missing.is_empty() {
        return Err(TracecastError::config_with_context(
            format!("Missing required settings: {}", missing.join(", ")),
            "Set them in the environment or in a .env file",
        ));
    }

    let weather_mode = match overrides.weather_mode {
        Some(mode) => mode,
        None => get(keys::WEATHER_BACKEND)
            .map(|v| v.parse())
            .transpose()?
            .unwrap_or_default(),
    };

    let model = overrides
        .model
        .clone()
        .or_else(|| get(keys::OPENAI_MODEL))
        .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string());
    let base_url =
        get(keys::OPENAI_BASE_URL).unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());

    let data_dir = overrides
        .trace_dir
        .clone()
        .or_else(|| get(keys::STORE_DIR).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TRACE_DIR));

    // `missing` is empty, so every required value is present.
    let (Some(openai_api_key), Some(weather_api_key), Some(database), Some(collection)) =
        (openai_api_key, weather_api_key, database, collection)
    else {
        return Err(TracecastError::config("Missing required settings"));
    };

    Ok(AppConfig {
        openai: OpenAiConfig::new(openai_api_key)
            .with_model(model)
            .with_base_url(base_url)
            .with_organization(get(keys::OPENAI_ORGANIZATION)),
        weather_api_key,
        weather_mode,
        store: StoreSettings {
            backend: store_backend,
            database,
            collection,
            username,
            password,
            url,
            data_source: get(keys::STORE_DATA_SOURCE)
                .unwrap_or_else(|| DEFAULT_DATA_SOURCE.to_string()),
            data_dir,
        },
    })
}
