// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Config(String),
    Http(HttpError),
}

/// Specific error types for presigned-URL fetches.
/// Used to surface actionable messages to the review operator.
#[derive(Debug, Clone)]
pub enum HttpError {
    /// The backend answered with a non-success status code.
    Status(u16),

    /// The request could not be sent or the connection dropped.
    Transport(String),

    /// The response body was not the expected JSON shape.
    MalformedResponse(String),
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::Status(code) => write!(f, "HTTP status: {}", code),
            HttpError::Transport(msg) => write!(f, "Transport failure: {}", msg),
            HttpError::MalformedResponse(msg) => write!(f, "Malformed response: {}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Http(e) => write!(f, "HTTP Error: {}", e),
        }
    }
}

impl From<HttpError> for Error {
    fn from(err: HttpError) -> Self {
        Error::Http(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Error::Http(HttpError::Status(status.as_u16()))
        } else if err.is_decode() {
            Error::Http(HttpError::MalformedResponse(err.to_string()))
        } else {
            Error::Http(HttpError::Transport(err.to_string()))
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_config_error() {
        let err = Error::Config("bad field".to_string());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn from_io_error_produces_config_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Config(message) => assert!(message.contains("boom")),
            _ => panic!("expected Config variant"),
        }
    }

    #[test]
    fn http_status_formats_code() {
        let err = Error::from(HttpError::Status(503));
        assert_eq!(format!("{}", err), "HTTP Error: HTTP status: 503");
    }

    #[test]
    fn http_transport_carries_message() {
        let err = HttpError::Transport("connection reset".into());
        assert!(format!("{}", err).contains("connection reset"));
    }
}
