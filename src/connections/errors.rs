use std::fmt::{self, Display};

/// A central error enum for connection-level errors.
///
/// These come from the client library itself and are handed to consumers
/// unchanged; account resolution never produces them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    InvalidEndpoint(String),
    MissingCredential(String),
}

/// Convert from url::ParseError.
/// Without this, `map_err(ConnectionError::from)` won't work when parsing endpoints.
impl From<url::ParseError> for ConnectionError {
    fn from(err: url::ParseError) -> Self {
        ConnectionError::InvalidEndpoint(err.to_string())
    }
}

impl Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::InvalidEndpoint(msg) => write!(f, "Invalid endpoint: {}", msg),
            ConnectionError::MissingCredential(endpoint) => {
                write!(f, "Missing credential for endpoint '{}'", endpoint)
            }
        }
    }
}

impl std::error::Error for ConnectionError {}
