//! [`HttpSend`] implementation backed by [`reqwest`].

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use reqwest::{Client, Request};
use restsign_core::{Error, HttpSend, RequestTimeout, Result};

/// ReqwestHttpSend sends requests with a [`reqwest::Client`].
///
/// A [`RequestTimeout`] extension on the request bounds the whole round-trip,
/// body included. Failures are mapped as:
///
/// - a timeout to [`ErrorKind::Timeout`](restsign_core::ErrorKind::Timeout)
/// - any other failure to [`ErrorKind::NoResponse`](restsign_core::ErrorKind::NoResponse)
#[derive(Debug, Default)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let timeout = req.extensions().get::<RequestTimeout>().map(|t| t.0);
        let mut req = Request::try_from(req)
            .map_err(|e| Error::no_response("failed to convert request").with_source(e))?;
        if let Some(timeout) = timeout {
            *req.timeout_mut() = Some(timeout);
        }

        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(from_reqwest_error)?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(from_reqwest_error)?;
        Ok(http::Response::from_parts(parts, bs))
    }
}

fn from_reqwest_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::timeout("request timed out").with_source(err)
    } else {
        Error::no_response("request failed before a response was read").with_source(err)
    }
}
