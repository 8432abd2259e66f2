use std::fmt;

use http::StatusCode;
use thiserror::Error;

/// The error type for restsign operations.
///
/// Every failure of a request is reported through this type, carrying an
/// [`ErrorKind`] that callers match on to decide what to do next.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    status: Option<StatusCode>,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred.
///
/// This is a closed set: status based kinds map one-to-one from the HTTP
/// status code of the response, transport kinds come from the transport,
/// and the remaining kinds are raised before or after the round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The base URL is missing or the endpoint does not form a valid URI.
    InvalidUrl,
    /// The server could not be reached (connection refused, DNS failure, ...).
    NoResponse,
    /// The server returned 400, carrying the raw response body.
    BadRequest(String),
    /// The server returned 401.
    Unauthorized,
    /// The server returned 403.
    Forbidden,
    /// The server returned 404.
    NotFound,
    /// The server returned 500.
    InternalServerError,
    /// The server returned 502.
    BadGateway,
    /// The server returned 503.
    ServiceUnavailable,
    /// The server returned 504, or the transport gave up waiting.
    Timeout,
    /// The server returned any other non-2xx status.
    Unknown {
        /// The HTTP status code.
        code: u16,
        /// The raw response body.
        message: String,
    },
    /// A 2xx response whose body could not be decoded into the expected type.
    Decode,
    /// The request could not be assembled (body encoding, header values, ...).
    RequestInvalid,
    /// Configuration error (missing fields, invalid values).
    ConfigInvalid,
}

impl ErrorKind {
    /// Classify a response status.
    ///
    /// Returns `None` for every 2xx status, and the matching kind otherwise.
    /// `body` is only kept for [`ErrorKind::BadRequest`] and
    /// [`ErrorKind::Unknown`].
    pub fn from_status(code: u16, body: impl Into<String>) -> Option<Self> {
        let kind = match code {
            200..=299 => return None,
            400 => ErrorKind::BadRequest(body.into()),
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            500 => ErrorKind::InternalServerError,
            502 => ErrorKind::BadGateway,
            503 => ErrorKind::ServiceUnavailable,
            504 => ErrorKind::Timeout,
            code => ErrorKind::Unknown {
                code,
                message: body.into(),
            },
        };
        Some(kind)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidUrl => write!(f, "Invalid URL"),
            ErrorKind::NoResponse => write!(f, "No response from server"),
            ErrorKind::BadRequest(body) => write!(f, "Bad request: {body}"),
            ErrorKind::Unauthorized => write!(f, "Unauthorized access"),
            ErrorKind::Forbidden => write!(f, "Forbidden access"),
            ErrorKind::NotFound => write!(f, "Resource not found"),
            ErrorKind::InternalServerError => write!(f, "Internal server error"),
            ErrorKind::BadGateway => write!(f, "Bad gateway"),
            ErrorKind::ServiceUnavailable => write!(f, "Service unavailable"),
            ErrorKind::Timeout => write!(f, "Request timed out"),
            ErrorKind::Unknown { code, message } => {
                write!(f, "Unknown error: Code {code}, Message: {message}")
            }
            ErrorKind::Decode => write!(f, "Response decoding failed"),
            ErrorKind::RequestInvalid => write!(f, "Invalid request"),
            ErrorKind::ConfigInvalid => write!(f, "Invalid configuration"),
        }
    }
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Consume the error and return its kind.
    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }

    /// The HTTP status this error was classified from, if any.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Check if this error was raised by the transport before any response.
    ///
    /// `Timeout` counts as a transport error unless it came from a 504.
    pub fn is_transport_error(&self) -> bool {
        matches!(self.kind, ErrorKind::NoResponse | ErrorKind::Timeout) && self.status.is_none()
    }

    /// Check if this error was classified from a non-2xx response status.
    pub fn is_status_error(&self) -> bool {
        self.status.is_some()
    }

    /// Build the error for a non-2xx response, or `None` for a 2xx one.
    pub fn from_status(status: StatusCode, body: &[u8]) -> Option<Self> {
        let text = String::from_utf8_lossy(body);
        let kind = ErrorKind::from_status(status.as_u16(), text)?;
        let message = kind.to_string();
        let mut err = Self::new(kind, message);
        err.status = Some(status);
        Some(err)
    }
}

// Convenience constructors
impl Error {
    /// Create an invalid url error
    pub fn invalid_url(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidUrl, message)
    }

    /// Create a no response error
    pub fn no_response(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoResponse, message)
    }

    /// Create a transport timeout error
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, message)
    }

    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::invalid_url(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderName> for Error {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(400 => ErrorKind::BadRequest("oops".to_string()))]
    #[test_case(401 => ErrorKind::Unauthorized)]
    #[test_case(403 => ErrorKind::Forbidden)]
    #[test_case(404 => ErrorKind::NotFound)]
    #[test_case(500 => ErrorKind::InternalServerError)]
    #[test_case(502 => ErrorKind::BadGateway)]
    #[test_case(503 => ErrorKind::ServiceUnavailable)]
    #[test_case(504 => ErrorKind::Timeout)]
    #[test_case(418 => ErrorKind::Unknown { code: 418, message: "oops".to_string() })]
    #[test_case(301 => ErrorKind::Unknown { code: 301, message: "oops".to_string() })]
    fn test_from_status(code: u16) -> ErrorKind {
        ErrorKind::from_status(code, "oops").expect("must be a failure")
    }

    #[test_case(200)]
    #[test_case(201)]
    #[test_case(204)]
    #[test_case(299)]
    fn test_from_status_success(code: u16) {
        assert_eq!(ErrorKind::from_status(code, "body"), None);
    }

    #[test]
    fn test_status_round_trip() {
        let err = Error::from_status(StatusCode::IM_A_TEAPOT, b"short and stout").unwrap();
        assert_eq!(err.status(), Some(StatusCode::IM_A_TEAPOT));
        assert!(err.is_status_error());
        assert!(!err.is_transport_error());
        assert_eq!(
            err.to_string(),
            "Unknown error: Code 418, Message: short and stout"
        );
    }

    #[test]
    fn test_timeout_origin() {
        let gateway = Error::from_status(StatusCode::GATEWAY_TIMEOUT, b"").unwrap();
        assert_eq!(gateway.kind(), &ErrorKind::Timeout);
        assert!(!gateway.is_transport_error());

        let transport = Error::timeout("deadline elapsed");
        assert!(transport.is_transport_error());
        assert_eq!(transport.status(), None);
    }
}
