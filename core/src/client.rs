// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt;
use std::fmt::{Debug, Formatter};
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};

use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method, Uri};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::utils::{bearer_header, Redact};
use crate::{
    Config, Context, Endpoint, Error, ErrorKind, HttpMethod, RequestOptions, RequestTimeout,
    Result, SignRequest,
};

/// Client sends one request per call and turns the response into a typed result.
///
/// A client is cheap to clone. Clones share the signer and the JWT cell, so
/// a token set through one clone is used by all of them.
///
/// ## JWT
///
/// The JWT is a shared cell with last-writer-wins semantics: every request
/// reads it once, before signing, and keeps that value for its whole
/// lifetime. Replacing the token while a request is in flight affects only
/// later requests.
#[derive(Clone)]
pub struct Client {
    ctx: Context,
    base_url: Option<String>,
    logging: bool,
    signer: Option<Arc<dyn SignRequest>>,
    jwt: Arc<RwLock<Option<String>>>,
}

impl Debug for Client {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let jwt = self.jwt();
        f.debug_struct("Client")
            .field("ctx", &self.ctx)
            .field("base_url", &self.base_url)
            .field("logging", &self.logging)
            .field("signer", &self.signer)
            .field("jwt", &Redact::from(&jwt))
            .finish()
    }
}

impl Client {
    /// Create a new client without base url, signer or JWT.
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            base_url: None,
            logging: false,
            signer: None,
            jwt: Arc::new(RwLock::new(None)),
        }
    }

    /// Apply a [`Config`].
    ///
    /// The JWT already set on the client is kept when the config carries none.
    pub fn with_config(mut self, config: Config) -> Self {
        self.base_url = config.base_url;
        self.logging = config.logging;
        if let Some(jwt) = config.jwt {
            self.set_jwt(Some(jwt));
        }
        self
    }

    /// Set the base url every endpoint is appended to.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Enable or disable request logging.
    ///
    /// When enabled, request URLs and full response bodies are logged at
    /// `debug` level. Bodies are not redacted.
    pub fn with_logging(mut self, logging: bool) -> Self {
        self.logging = logging;
        self
    }

    /// Sign every request with this signer.
    pub fn with_signer(mut self, signer: impl SignRequest) -> Self {
        self.signer = Some(Arc::new(signer));
        self
    }

    /// Get the base url.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Replace the JWT used by subsequent requests, `None` to stop sending one.
    pub fn set_jwt(&self, jwt: Option<String>) {
        *self.jwt.write().unwrap_or_else(PoisonError::into_inner) = jwt;
    }

    /// Get the current JWT.
    pub fn jwt(&self) -> Option<String> {
        self.jwt
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Send a `GET` request.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        options: &RequestOptions,
    ) -> Result<T> {
        self.send::<T, ()>(endpoint, HttpMethod::Get, None, options)
            .await
    }

    /// Send a `POST` request with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &Endpoint,
        body: &B,
        options: &RequestOptions,
    ) -> Result<T> {
        self.send(endpoint, HttpMethod::Post, Some(body), options)
            .await
    }

    /// Send a `PUT` request with a JSON body.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &Endpoint,
        body: &B,
        options: &RequestOptions,
    ) -> Result<T> {
        self.send(endpoint, HttpMethod::Put, Some(body), options)
            .await
    }

    /// Send a `PATCH` request with a JSON body.
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &Endpoint,
        body: &B,
        options: &RequestOptions,
    ) -> Result<T> {
        self.send(endpoint, HttpMethod::Patch, Some(body), options)
            .await
    }

    /// Send a `DELETE` request.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        options: &RequestOptions,
    ) -> Result<T> {
        self.send::<T, ()>(endpoint, HttpMethod::Delete, None, options)
            .await
    }

    /// Send one request and decode the response.
    ///
    /// No retry is ever performed. Failures are reported as:
    ///
    /// - `InvalidUrl` when no base url is set, or the endpoint or the
    ///   resulting absolute url is invalid. The transport is not called.
    /// - `NoResponse` / `Timeout` when the transport fails before a response.
    /// - the kind matching the status for every non-2xx response, see
    ///   [`ErrorKind::from_status`].
    /// - `Decode` when a 2xx body can't be decoded into `T`. An empty body is
    ///   read as JSON `null`, so `()` and `Option<_>` accept `204 No Content`.
    ///
    /// `body` is ignored for `GET` and `DELETE`.
    pub async fn send<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &Endpoint,
        method: HttpMethod,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<T> {
        let req = self.build_request(endpoint, method, body, options)?;
        let resp = self.send_request(req).await?;
        self.parse_response(resp)
    }

    fn build_request<B: Serialize + ?Sized>(
        &self,
        endpoint: &Endpoint,
        method: HttpMethod,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<http::Request<Bytes>> {
        let Some(base_url) = self.base_url.as_deref() else {
            self.trace(format_args!("[invalidURL] No base URL configured"));
            return Err(Error::invalid_url("no base url configured"));
        };

        let path = endpoint.build().inspect_err(|_| {
            self.trace(format_args!(
                "[invalidURL] Failed to build the URL: {endpoint}"
            ))
        })?;

        let url = format!("{base_url}{path}");
        let uri = match Uri::from_str(&url) {
            Ok(uri) if uri.scheme().is_some() && uri.authority().is_some() => uri,
            Ok(_) => {
                self.trace(format_args!("[invalidURL] Failed to build the URL: {url}"));
                return Err(Error::invalid_url(format!("url is not absolute: {url}")));
            }
            Err(e) => {
                self.trace(format_args!("[invalidURL] Failed to build the URL: {url}"));
                return Err(Error::invalid_url(format!("invalid url: {url}")).with_source(e));
            }
        };
        self.trace(format_args!("[requestURL] Request URL: {uri}"));

        let body = match body {
            Some(body) if method.allows_body() => Some(Bytes::from(serde_json::to_vec(body)?)),
            _ => None,
        };

        let jwt = self.jwt();
        let mut headers = match (&self.signer, jwt.as_deref()) {
            (Some(signer), jwt) => signer.sign_request(method, body.as_deref(), jwt)?,
            (None, Some(jwt)) => HeaderMap::from_iter([(AUTHORIZATION, bearer_header(jwt)?)]),
            (None, None) => HeaderMap::new(),
        };
        if body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        for name in options.headers.keys() {
            headers.remove(name);
        }
        for (name, value) in &options.headers {
            headers.append(name.clone(), value.clone());
        }

        let mut req = http::Request::builder()
            .method(Method::from(method))
            .uri(uri)
            .body(body.unwrap_or_default())?;
        *req.headers_mut() = headers;
        if let Some(timeout) = options.timeout {
            req.extensions_mut().insert(RequestTimeout(timeout));
        }

        Ok(req)
    }

    async fn send_request(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let uri = req.uri().clone();
        self.ctx.http_send(req).await.map_err(|err| {
            self.trace(format_args!(
                "[requestError] No response from the server: {err}"
            ));
            match err.kind() {
                ErrorKind::Timeout => err,
                _ => Error::no_response(format!("no response from {uri}")).with_source(err),
            }
        })
    }

    fn parse_response<T: DeserializeOwned>(&self, resp: http::Response<Bytes>) -> Result<T> {
        let status = resp.status();
        let body = resp.into_body();
        self.trace(format_args!(
            "[response] Server Response: {status} {}",
            String::from_utf8_lossy(&body)
        ));

        if let Some(err) = Error::from_status(status, &body) {
            return Err(err);
        }

        let content: &[u8] = if body.is_empty() { b"null" } else { &body };
        serde_json::from_slice(content).map_err(|e| {
            if self.logging {
                warn!("[decode] Failed to decode {status} response: {e}");
            }
            Error::decode(format!("failed to decode {status} response: {e}")).with_source(e)
        })
    }

    fn trace(&self, args: fmt::Arguments<'_>) {
        if self.logging {
            debug!("{args}");
        }
    }
}
