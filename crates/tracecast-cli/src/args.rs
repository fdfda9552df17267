//! CLI argument definitions using clap
//!
//! - tracecast                  # Interactive weather session (default)
//! - tracecast traces list      # List stored conversation ids
//! - tracecast traces show <id> # Print one stored trace

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracecast_core::{ConfigOverrides, StoreBackend, WeatherMode};

#[derive(Parser)]
#[command(name = "tracecast")]
#[command(about = "Tracecast - weather agent that records and stores its conversation traces")]
#[command(version)]
pub struct Cli {
    /// Model to request completions from (overrides OPENAI_MODEL)
    #[arg(long)]
    pub model: Option<String>,

    /// Weather backend (overrides WEATHER_BACKEND)
    #[arg(long, value_enum)]
    pub weather: Option<WeatherArg>,

    /// Trace store backend (overrides TRACE_STORE_BACKEND)
    #[arg(long, value_enum)]
    pub store: Option<StoreArg>,

    /// Root directory of the file trace store (overrides TRACE_STORE_DIR)
    #[arg(long)]
    pub trace_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Flags that take precedence over the environment
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            model: self.model.clone(),
            weather_mode: self.weather.map(Into::into),
            store_backend: self.store.map(Into::into),
            trace_dir: self.trace_dir.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect stored traces
    Traces {
        #[command(subcommand)]
        action: TracesAction,
    },
}

#[derive(Subcommand, Clone)]
pub enum TracesAction {
    /// List stored conversation ids
    List,

    /// Print one stored trace as JSON
    Show {
        /// Conversation id
        id: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WeatherArg {
    Stub,
    Live,
}

impl From<WeatherArg> for WeatherMode {
    fn from(arg: WeatherArg) -> Self {
        match arg {
            WeatherArg::Stub => WeatherMode::Stub,
            WeatherArg::Live => WeatherMode::Live,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreArg {
    Http,
    File,
}

impl From<StoreArg> for StoreBackend {
    fn from(arg: StoreArg) -> Self {
        match arg {
            StoreArg::Http => StoreBackend::Http,
            StoreArg::File => StoreBackend::File,
        }
    }
}
