//! Weather lookup tool
//!
//! The default backend is a deterministic stub. The live backend geocodes the
//! location through Nominatim and reads current conditions from the
//! OpenWeather One Call API.

use super::tool::Tool;
use super::types::ToolError;
use crate::trace::ToolParams;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, instrument};

/// Name of the weather tool, in the model schema and in the trace
pub const WEATHER_TOOL_NAME: &str = "weather_lookup";

/// Default geocoding endpoint
pub const DEFAULT_GEOCODE_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Default current-weather endpoint
pub const DEFAULT_ONECALL_URL: &str = "https://api.openweathermap.org/data/3.0/onecall";

/// Where weather reports come from
pub enum WeatherBackend {
    /// Always reports `Sunny, 72°F in <location>`
    Stub,
    /// Geocode + OpenWeather
    Live(OpenWeatherClient),
}

/// The `weather_lookup` tool
pub struct WeatherLookup {
    backend: WeatherBackend,
}

impl WeatherLookup {
    pub fn new(backend: WeatherBackend) -> Self {
        Self { backend }
    }

    pub fn stub() -> Self {
        Self::new(WeatherBackend::Stub)
    }

    pub fn live(client: OpenWeatherClient) -> Self {
        Self::new(WeatherBackend::Live(client))
    }

    /// Report for the stub backend
    pub fn stub_report(location: &str) -> String {
        format!("Sunny, 72°F in {}", location)
    }
}

#[async_trait]
impl Tool for WeatherLookup {
    fn name(&self) -> &str {
        WEATHER_TOOL_NAME
    }

    fn description(&self) -> &str {
        "Get the current weather for a location"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "The city and state, e.g. San Francisco, CA"
                }
            },
            "required": ["location"]
        })
    }

    async fn execute(&self, params: &ToolParams) -> Result<String, ToolError> {
        let location = params
            .get("location")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                ToolError::invalid_arguments(
                    WEATHER_TOOL_NAME,
                    "missing required string parameter 'location'",
                )
            })?;

        match &self.backend {
            WeatherBackend::Stub => Ok(Self::stub_report(location)),
            WeatherBackend::Live(client) => client.current_conditions(location).await,
        }
    }

    fn summarize(&self, output: &str) -> String {
        format!("I looked up the weather: {}", output)
    }
}

/// Client for the live weather backend
pub struct OpenWeatherClient {
    http_client: Client,
    api_key: String,
    geocode_url: String,
    onecall_url: String,
}

#[derive(Debug, Deserialize)]
struct GeocodeHit {
    lat: String,
    lon: String,
}

#[derive(Debug, Deserialize)]
struct OneCallResponse {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temp: f64,
    weather: Vec<WeatherCondition>,
}

#[derive(Debug, Deserialize)]
struct WeatherCondition {
    main: String,
}

impl OpenWeatherClient {
    pub fn new(http_client: Client, api_key: impl Into<String>) -> Self {
        Self {
            http_client,
            api_key: api_key.into(),
            geocode_url: DEFAULT_GEOCODE_URL.to_string(),
            onecall_url: DEFAULT_ONECALL_URL.to_string(),
        }
    }

    /// Point both lookups at other endpoints
    pub fn with_endpoints(
        mut self,
        geocode_url: impl Into<String>,
        onecall_url: impl Into<String>,
    ) -> Self {
        self.geocode_url = geocode_url.into();
        self.onecall_url = onecall_url.into();
        self
    }

    /// Current conditions as `<condition>, <temp>°F in <location>`
    #[instrument(skip(self))]
    pub async fn current_conditions(&self, location: &str) -> Result<String, ToolError> {
        let Some((lat, lon)) = self
            .geocode(location)
            .await
            .map_err(|e| fetch_failed(&e))?
        else {
            return Err(ToolError::ExecutionFailed(format!(
                "Could not find coordinates for location: {}",
                location
            )));
        };
        debug!(lat, lon, "geocoded location");

        let report = self
            .http_client
            .get(&self.onecall_url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "imperial".to_string()),
                ("exclude", "minutely,hourly,daily,alerts".to_string()),
            ])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| fetch_failed(&e))?
            .json::<OneCallResponse>()
            .await
            .map_err(|e| fetch_failed(&e))?;

        let condition = report
            .current
            .weather
            .first()
            .map(|w| w.main.as_str())
            .ok_or_else(|| fetch_failed(&"response has no weather conditions"))?;

        // Debug keeps the decimal point on whole temperatures ("72.0").
        Ok(format!("{}, {:?}°F in {}", condition, report.current.temp, location))
    }

    async fn geocode(&self, location: &str) -> Result<Option<(f64, f64)>, String> {
        let hits = self
            .http_client
            .get(&self.geocode_url)
            .header(reqwest::header::USER_AGENT, "tracecast")
            .query(&[("q", location), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| e.to_string())?
            .json::<Vec<GeocodeHit>>()
            .await
            .map_err(|e| e.to_string())?;

        let Some(hit) = hits.into_iter().next() else {
            return Ok(None);
        };
        let lat = hit.lat.parse::<f64>().map_err(|e| e.to_string())?;
        let lon = hit.lon.parse::<f64>().map_err(|e| e.to_string())?;
        Ok(Some((lat, lon)))
    }
}

fn fetch_failed(reason: &dyn std::fmt::Display) -> ToolError {
    ToolError::ExecutionFailed(format!("Error fetching weather data: {}", reason))
}
