//! Constructor methods for TracecastError

use super::types::TracecastError;

impl TracecastError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: None,
        }
    }

    /// Create a configuration error with context
    pub fn config_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// Create a new LLM error
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
            provider: None,
            status_code: None,
        }
    }

    /// Create an LLM error carrying the provider and HTTP status
    pub fn llm_with_status(
        message: impl Into<String>,
        provider: impl Into<String>,
        status_code: u16,
    ) -> Self {
        Self::Llm {
            message: message.into(),
            provider: Some(provider.into()),
            status_code: Some(status_code),
        }
    }

    /// Create a new tool error
    pub fn tool(tool_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Tool {
            tool_name: tool_name.into(),
            message: message.into(),
        }
    }

    /// Create a new storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            context: None,
        }
    }

    /// Create a storage error with context
    pub fn storage_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// Create a new IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
        }
    }

    /// Create an IO error with the offending path
    pub fn io_with_path(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Create a new JSON error
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json {
            message: message.into(),
        }
    }

    /// Create a new HTTP error
    pub fn http(message: impl Into<String>) -> Self {
        Self::Http {
            message: message.into(),
            url: None,
            status_code: None,
        }
    }

    /// Create a new invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
