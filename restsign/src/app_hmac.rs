//! App hmac signing with convenience APIs
//!
//! This module re-exports the app hmac signer along with functions that
//! assemble a ready to use [`Client`].

pub use restsign_app_hmac::*;

use restsign_core::{Client, Context, Result};

/// Create a signed client from the environment of `ctx`.
///
/// The client is configured from `RESTSIGN_BASE_URL`, `RESTSIGN_LOGGING`
/// and `RESTSIGN_JWT`, the signer from `RESTSIGN_DEVICE_ID`,
/// `RESTSIGN_APP_ID`, `RESTSIGN_APP_KEY` and `RESTSIGN_USER_AGENT`.
///
/// Fails with `ConfigInvalid` if the device id, app id or app key is missing.
pub fn client_from_env(ctx: Context) -> Result<Client> {
    let config = restsign_core::Config::new().from_env(&ctx);
    let signer = RequestSigner::from_config(Config::new().from_env(&ctx))?;

    Ok(Client::new(ctx).with_config(config).with_signer(signer))
}

/// Create a signed client with the default context.
///
/// # Example
///
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> restsign::Result<()> {
/// let client = restsign::app_hmac::default_client()?;
/// let health: serde_json::Value = client
///     .get(
///         &restsign::Endpoint::new().with_path("health"),
///         &restsign::RequestOptions::new(),
///     )
///     .await?;
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "default-context")]
pub fn default_client() -> Result<Client> {
    client_from_env(crate::default_context())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use restsign_core::{ErrorKind, StaticEnv};

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> StaticEnv {
        StaticEnv {
            envs: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn test_client_from_env() {
        let ctx = Context::new().with_env(env(&[
            ("RESTSIGN_BASE_URL", "https://api.example.com"),
            ("RESTSIGN_JWT", "header.payload.sig"),
            (RESTSIGN_DEVICE_ID, "device-1"),
            (RESTSIGN_APP_ID, "app-1"),
            (RESTSIGN_APP_KEY, "app-key"),
        ]));

        let client = client_from_env(ctx).unwrap();
        assert_eq!(client.base_url(), Some("https://api.example.com"));
        assert_eq!(client.jwt().as_deref(), Some("header.payload.sig"));
    }

    #[test]
    fn test_client_from_env_requires_app_key() {
        let ctx = Context::new().with_env(env(&[
            ("RESTSIGN_BASE_URL", "https://api.example.com"),
            (RESTSIGN_DEVICE_ID, "device-1"),
            (RESTSIGN_APP_ID, "app-1"),
        ]));

        let err = client_from_env(ctx).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::ConfigInvalid);
    }
}
