use crate::{HttpMethod, Result};
use http::HeaderMap;
use std::fmt::Debug;

/// SignRequest produces the authentication headers of one request.
///
/// A [`Client`](crate::Client) calls it once per request, after the URL has
/// been validated and before the round-trip. Implementations must not keep
/// per-request state: concurrent requests share the same signer and each
/// call returns its own header map.
pub trait SignRequest: Debug + Send + Sync + 'static {
    /// Build the headers for this request.
    ///
    /// ## Body
    ///
    /// `body` is the exact JSON the client is about to send, or `None` when
    /// the request carries no body.
    ///
    /// ## JWT
    ///
    /// `jwt` is the bearer token currently set on the client, if any.
    fn sign_request(
        &self,
        method: HttpMethod,
        body: Option<&[u8]>,
        jwt: Option<&str>,
    ) -> Result<HeaderMap>;
}
