//! Configuration model

use crate::error::{TracecastError, TracecastResult};
use crate::llm::OpenAiConfig;
use crate::storage::{FileTraceStore, HttpStoreConfig, HttpTraceStore, TraceStore};
use crate::tools::{OpenWeatherClient, WeatherLookup};
use reqwest::Client;
use std::path::PathBuf;
use std::str::FromStr;

/// Which weather backend the tool uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeatherMode {
    #[default]
    Stub,
    Live,
}

impl FromStr for WeatherMode {
    type Err = TracecastError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "stub" => Ok(Self::Stub),
            "live" => Ok(Self::Live),
            other => Err(TracecastError::config(format!(
                "Unknown weather backend '{}' (expected stub or live)",
                other
            ))),
        }
    }
}

/// Which trace store backend to open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Http,
    File,
}

impl FromStr for StoreBackend {
    type Err = TracecastError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "file" => Ok(Self::File),
            other => Err(TracecastError::config(format!(
                "Unknown trace store backend '{}' (expected http or file)",
                other
            ))),
        }
    }
}

/// Trace store settings
#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub backend: StoreBackend,
    pub database: String,
    pub collection: String,
    /// Required for the http backend
    pub username: Option<String>,
    /// Required for the http backend
    pub password: Option<String>,
    /// Required for the http backend
    pub url: Option<String>,
    pub data_source: String,
    /// Root directory of the file backend
    pub data_dir: PathBuf,
}

impl StoreSettings {
    /// Open the configured store
    pub async fn open(&self, http_client: Client) -> TracecastResult<Box<dyn TraceStore>> {
        match self.backend {
            StoreBackend::File => {
                let store =
                    FileTraceStore::open(&self.data_dir, &self.database, &self.collection).await?;
                Ok(Box::new(store))
            }
            StoreBackend::Http => {
                let required = |value: &Option<String>, name: &str| {
                    value.clone().ok_or_else(|| {
                        TracecastError::config(format!("http trace store needs {}", name))
                    })
                };
                let config = HttpStoreConfig {
                    base_url: required(&self.url, "a url")?,
                    data_source: self.data_source.clone(),
                    database: self.database.clone(),
                    collection: self.collection.clone(),
                    username: required(&self.username, "a username")?,
                    password: required(&self.password, "a password")?,
                };
                Ok(Box::new(HttpTraceStore::new(config, http_client)))
            }
        }
    }
}

/// Everything needed to start a session
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai: OpenAiConfig,
    pub weather_api_key: String,
    pub weather_mode: WeatherMode,
    pub store: StoreSettings,
}

impl AppConfig {
    /// Weather tool for the configured backend
    pub fn weather_tool(&self, http_client: Client) -> WeatherLookup {
        match self.weather_mode {
            WeatherMode::Stub => WeatherLookup::stub(),
            WeatherMode::Live => {
                WeatherLookup::live(OpenWeatherClient::new(http_client, &self.weather_api_key))
            }
        }
    }
}
