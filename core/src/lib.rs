//! Core components for signed REST requests.
//!
//! This crate provides the foundational types and traits of the restsign
//! ecosystem: the request pipeline, the error model and the hashing
//! primitives signers are built from.
//!
//! ## Overview
//!
//! - **Context**: holds the transport ([`HttpSend`]) and environment ([`Env`]) implementations
//! - **Endpoint**: an immutable builder for the path part of a request
//! - **SignRequest**: the trait that computes the authentication headers of a request
//! - **Client**: sends one request, signs it, and classifies the response into a typed result
//!
//! ## Example
//!
//! ```no_run
//! use restsign_core::{Client, Context, Endpoint, ErrorKind, RequestOptions};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct User {
//!     name: String,
//! }
//!
//! # async fn example() -> restsign_core::Result<()> {
//! // Bring your own transport with `Context::with_http_send`.
//! let client = Client::new(Context::new()).with_base_url("https://api.example.com");
//! client.set_jwt(Some("header.payload.signature".to_string()));
//!
//! let endpoint = Endpoint::new().with_path_params("v1/users/{id}", [("id", "42")]);
//! match client.get::<User>(&endpoint, &RequestOptions::new()).await {
//!     Ok(user) => println!("hello {}", user.name),
//!     Err(err) if err.kind() == &ErrorKind::NotFound => println!("no such user"),
//!     Err(err) => return Err(err),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time manipulation utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};

mod context;
pub use context::Context;
pub use context::Env;
pub use context::HttpSend;
pub use context::NoopEnv;
pub use context::NoopHttpSend;
pub use context::OsEnv;
pub use context::StaticEnv;

mod config;
pub use config::{Config, RESTSIGN_BASE_URL, RESTSIGN_JWT, RESTSIGN_LOGGING};

mod request;
pub use request::{HttpMethod, RequestOptions, RequestTimeout};
mod endpoint;
pub use endpoint::Endpoint;

mod api;
pub use api::SignRequest;
mod client;
pub use client::Client;
