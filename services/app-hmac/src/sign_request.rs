use http::header::AUTHORIZATION;
use http::{HeaderMap, HeaderValue};
use log::debug;
use uuid::Uuid;

use restsign_core::hash::{hex_hmac_sha256, hex_sha256};
use restsign_core::time::{epoch_millis, now, DateTime};
use restsign_core::utils::bearer_header;
use restsign_core::{Error, HttpMethod, Result, SignRequest};

use crate::constants::*;
use crate::{Config, Credential};

/// RequestSigner that implements the app hmac scheme.
///
/// Every request carries the base headers computed once at construction,
/// plus a fresh nonce, a timestamp and an HMAC-SHA256 signature:
///
/// ```text
/// fingerprint = hex(sha256(device_id + " | " + user_agent))
///
/// x-app-id        = app_id
/// x-browser       = fingerprint
/// x-browser-sig   = hex(sha256(fingerprint))
/// x-client        = user_agent
/// x-req-nonce     = uuid v4
/// x-req-timestamp = epoch milliseconds
/// x-req-sig       = hex(hmac_sha256(app_key, string_to_sign))
/// ```
///
/// The signer holds no per-request state, so one instance can be shared by
/// any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credential: Credential,
    device_id: String,
    user_agent: String,
    fingerprint: String,
    base_headers: HeaderMap,
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a signer with the [`DEFAULT_USER_AGENT`] client label.
    pub fn new(
        device_id: impl Into<String>,
        app_id: impl Into<String>,
        app_key: impl Into<String>,
    ) -> Result<Self> {
        Self::build(
            device_id.into(),
            DEFAULT_USER_AGENT.to_string(),
            Credential::new(app_id, app_key),
        )
    }

    /// Create a signer from [`Config`].
    ///
    /// `device_id`, `app_id` and `app_key` are required.
    pub fn from_config(config: Config) -> Result<Self> {
        let device_id = config
            .device_id
            .ok_or_else(|| Error::config_invalid("missing device_id"))?;
        let app_id = config
            .app_id
            .ok_or_else(|| Error::config_invalid("missing app_id"))?;
        let app_key = config
            .app_key
            .ok_or_else(|| Error::config_invalid("missing app_key"))?;
        let user_agent = config
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        Self::build(device_id, user_agent, Credential::new(app_id, app_key))
    }

    /// Replace the client label, which also changes the fingerprint.
    pub fn with_user_agent(self, user_agent: impl Into<String>) -> Result<Self> {
        Self::build(self.device_id, user_agent.into(), self.credential)
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// The device fingerprint sent as `x-browser`.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// The application id sent as `x-app-id`.
    pub fn app_id(&self) -> &str {
        &self.credential.app_id
    }

    /// The client label sent as `x-client`.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// The headers shared by every request.
    pub fn base_headers(&self) -> &HeaderMap {
        &self.base_headers
    }

    fn build(device_id: String, user_agent: String, credential: Credential) -> Result<Self> {
        let fingerprint = hex_sha256(format!("{device_id} | {user_agent}").as_bytes());

        let mut base_headers = HeaderMap::new();
        base_headers.insert(X_APP_ID, config_header("app_id", &credential.app_id)?);
        base_headers.insert(X_BROWSER, HeaderValue::try_from(fingerprint.as_str())?);
        base_headers.insert(
            X_BROWSER_SIG,
            HeaderValue::try_from(hex_sha256(fingerprint.as_bytes()))?,
        );
        base_headers.insert(X_CLIENT, config_header("user_agent", &user_agent)?);

        Ok(Self {
            credential,
            device_id,
            user_agent,
            fingerprint,
            base_headers,
            time: None,
        })
    }
}

impl SignRequest for RequestSigner {
    fn sign_request(
        &self,
        method: HttpMethod,
        body: Option<&[u8]>,
        jwt: Option<&str>,
    ) -> Result<HeaderMap> {
        let now = self.time.unwrap_or_else(now);
        let timestamp = epoch_millis(now);
        let nonce = Uuid::new_v4().to_string();

        let string_to_sign =
            string_to_sign(&self.credential.app_id, method, &timestamp, &nonce, body);
        debug!("calculated string to sign: {string_to_sign}");
        let signature = hex_hmac_sha256(
            self.credential.app_key.as_bytes(),
            string_to_sign.as_bytes(),
        );

        let mut headers = self.base_headers.clone();
        headers.insert(X_REQ_SIG, HeaderValue::try_from(signature)?);
        headers.insert(X_REQ_NONCE, HeaderValue::try_from(nonce)?);
        headers.insert(X_REQ_TIMESTAMP, HeaderValue::try_from(timestamp)?);
        if let Some(jwt) = jwt {
            headers.insert(AUTHORIZATION, bearer_header(jwt)?);
        }

        Ok(headers)
    }
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// app_id + method + timestamp + nonce [+ hex(sha256(body))]
/// ```
///
/// No separators. The body hash is only present when the request has a body.
fn string_to_sign(
    app_id: &str,
    method: HttpMethod,
    timestamp: &str,
    nonce: &str,
    body: Option<&[u8]>,
) -> String {
    let mut s = String::with_capacity(app_id.len() + timestamp.len() + nonce.len() + 70);
    s.push_str(app_id);
    s.push_str(method.as_str());
    s.push_str(timestamp);
    s.push_str(nonce);
    if let Some(body) = body {
        s.push_str(&hex_sha256(body));
    }
    s
}

fn config_header(field: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::try_from(value).map_err(|e| {
        Error::config_invalid(format!("{field} is not a valid header value")).with_source(e)
    })
}
