use std::fmt;
use std::time::Duration;

use http::header::HeaderName;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;

use crate::Result;

/// HttpMethod is the set of verbs a [`Client`](crate::Client) can send.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// The verb as it appears on the wire and in request signatures.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// GET and DELETE never carry a body.
    pub fn allows_body(&self) -> bool {
        !matches!(self, HttpMethod::Get | HttpMethod::Delete)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

/// Per-request overrides for [`Client::send`](crate::Client::send).
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra headers. They are applied last and replace any signed or
    /// default header with the same name.
    pub headers: HeaderMap,
    /// Give up on the round-trip after this long.
    ///
    /// Transports that honour [`RequestTimeout`] report the expiry as
    /// [`ErrorKind::Timeout`](crate::ErrorKind::Timeout).
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Create empty request options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an extra header.
    ///
    /// Fails with [`ErrorKind::RequestInvalid`](crate::ErrorKind::RequestInvalid)
    /// if the name or value is not a valid header.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::try_from(name)?;
        let value = HeaderValue::try_from(value)?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Merge a set of extra headers.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        // `None` names continue the values of the previous name.
        let mut last: Option<HeaderName> = None;
        for (name, value) in headers {
            match name {
                Some(name) => {
                    self.headers.insert(name.clone(), value);
                    last = Some(name);
                }
                None => {
                    if let Some(name) = &last {
                        self.headers.append(name.clone(), value);
                    }
                }
            }
        }
        self
    }

    /// Set the timeout of the round-trip.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// RequestTimeout is attached to the outgoing `http::Request` as an
/// extension when [`RequestOptions::timeout`] is set.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RequestTimeout(pub Duration);
