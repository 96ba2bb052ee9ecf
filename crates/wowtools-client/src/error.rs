//! Client error types.

use std::fmt;

use wowtools_core::{IcalError, TracingError};
use wowtools_providers::ProviderError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// Data source error (fetching, XML validation, calendar parsing).
    Provider(ProviderError),
    /// A local calendar file could not be parsed.
    Calendar(IcalError),
    /// IO error.
    Io(std::io::Error),
    /// Output could not be serialized.
    Output(serde_json::Error),
    /// Logging could not be initialized.
    Tracing(TracingError),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Provider(err) => write!(f, "{}", err),
            Self::Calendar(err) => write!(f, "calendar error: {}", err),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::Output(err) => write!(f, "output error: {}", err),
            Self::Tracing(err) => write!(f, "logging error: {}", err),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Provider(err) => Some(err),
            Self::Calendar(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Output(err) => Some(err),
            Self::Tracing(err) => Some(err),
            Self::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ProviderError> for ClientError {
    fn from(err: ProviderError) -> Self {
        Self::Provider(err)
    }
}

impl From<IcalError> for ClientError {
    fn from(err: IcalError) -> Self {
        Self::Calendar(err)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Output(err)
    }
}

impl From<TracingError> for ClientError {
    fn from(err: TracingError) -> Self {
        Self::Tracing(err)
    }
}
