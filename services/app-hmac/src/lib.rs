//! Signer for the app hmac scheme.
//!
//! Requests are authenticated by a device fingerprint plus a per-request
//! HMAC-SHA256 signature over the app id, method, timestamp, nonce and
//! body hash. See [`RequestSigner`] for the wire format.
//!
//! ## Example
//!
//! ```no_run
//! use restsign_app_hmac::{Config, RequestSigner};
//! use restsign_core::{Client, Context, OsEnv};
//!
//! # fn example() -> restsign_core::Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let signer = RequestSigner::from_config(Config::new().from_env(&ctx))?;
//! let client = Client::new(ctx)
//!     .with_base_url("https://api.example.com")
//!     .with_signer(signer);
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::*;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::RequestSigner;
