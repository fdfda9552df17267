//! Core error type for Tracecast

use thiserror::Error;

/// Result type alias for Tracecast operations
pub type TracecastResult<T> = Result<T, TracecastError>;

/// Main error type for Tracecast
#[derive(Error, Debug, Clone)]
pub enum TracecastError {
    /// Missing or malformed startup configuration
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// Completion service errors
    #[error("LLM error: {message}")]
    Llm {
        message: String,
        provider: Option<String>,
        status_code: Option<u16>,
    },

    /// Tool errors that escape the registry (registration problems only)
    #[error("Tool error: {tool_name}: {message}")]
    Tool { tool_name: String, message: String },

    /// Trace store errors
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        context: Option<String>,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json { message: String },

    /// HTTP transport errors
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        url: Option<String>,
        status_code: Option<u16>,
    },

    /// Invalid input errors
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl TracecastError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            TracecastError::Config { .. } => "CONFIG_ERROR",
            TracecastError::Llm { .. } => "LLM_ERROR",
            TracecastError::Tool { .. } => "TOOL_ERROR",
            TracecastError::Storage { .. } => "STORAGE_ERROR",
            TracecastError::Io { .. } => "IO_ERROR",
            TracecastError::Json { .. } => "JSON_ERROR",
            TracecastError::Http { .. } => "HTTP_ERROR",
            TracecastError::InvalidInput { .. } => "INVALID_INPUT",
        }
    }

    /// Whether the error comes from an unreachable or failing remote service
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            TracecastError::Http { .. } | TracecastError::Llm { .. } | TracecastError::Storage { .. }
        )
    }

    /// Suggestion to show next to the message, if any
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            TracecastError::Config { context, .. } => context.as_deref(),
            _ if self.is_connectivity() => {
                Some("Check network access and the service credentials")
            }
            _ => None,
        }
    }
}
