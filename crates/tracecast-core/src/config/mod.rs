//! Startup configuration
//!
//! Settings come from a `.env` file and the process environment. Missing
//! required values are reported together, before any session starts.

mod env_loader;
mod settings;

pub use env_loader::{ConfigOverrides, keys, load_from_env, load_from_lookup};
pub use settings::{AppConfig, StoreBackend, StoreSettings, WeatherMode};
