//! Tools the model may invoke
//!
//! The [`ToolRegistry`] is the trust boundary for model-generated arguments:
//! payloads are parsed as strict JSON objects and every failure becomes an
//! error-shaped output instead of an `Err`.

pub mod arguments;
pub mod registry;
pub mod tool;
pub mod types;
pub mod weather;

pub use arguments::parse_arguments;
pub use registry::{ToolOutcome, ToolRegistry};
pub use tool::Tool;
pub use types::{ToolError, ToolSchema};
pub use weather::{OpenWeatherClient, WEATHER_TOOL_NAME, WeatherBackend, WeatherLookup};
