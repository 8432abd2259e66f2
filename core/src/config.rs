use std::fmt::{Debug, Formatter};

use crate::{utils::Redact, Context};

/// Env value for [`Config::base_url`].
pub const RESTSIGN_BASE_URL: &str = "RESTSIGN_BASE_URL";
/// Env value for [`Config::logging`].
pub const RESTSIGN_LOGGING: &str = "RESTSIGN_LOGGING";
/// Env value for [`Config::jwt`].
pub const RESTSIGN_JWT: &str = "RESTSIGN_JWT";

/// Config carries the process level configuration of a [`Client`](crate::Client).
#[derive(Clone, Default)]
pub struct Config {
    /// `base_url` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`RESTSIGN_BASE_URL`]
    ///
    /// Requests fail with `InvalidUrl` while it is unset.
    pub base_url: Option<String>,
    /// `logging` enables diagnostic `debug!` lines for every request.
    ///
    /// Env value [`RESTSIGN_LOGGING`] set to `on`, `true` or `1` turns it on.
    pub logging: bool,
    /// `jwt` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`RESTSIGN_JWT`]
    pub jwt: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set base_url
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set logging
    pub fn with_logging(mut self, logging: bool) -> Self {
        self.logging = logging;
        self
    }

    /// Set jwt
    pub fn with_jwt(mut self, jwt: impl Into<String>) -> Self {
        self.jwt = Some(jwt.into());
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(RESTSIGN_BASE_URL) {
            self.base_url.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(RESTSIGN_LOGGING) {
            self.logging |= matches!(v.to_ascii_lowercase().as_str(), "on" | "true" | "1");
        }
        if let Some(v) = ctx.env_var(RESTSIGN_JWT) {
            self.jwt.get_or_insert(v);
        }

        self
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("logging", &self.logging)
            .field("jwt", &Redact::from(&self.jwt))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticEnv;
    use std::collections::HashMap;

    fn ctx(envs: &[(&str, &str)]) -> Context {
        Context::new().with_env(StaticEnv {
            envs: envs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        })
    }

    #[test]
    fn test_from_env() {
        let ctx = ctx(&[
            (RESTSIGN_BASE_URL, "https://api.example.com"),
            (RESTSIGN_LOGGING, "ON"),
            (RESTSIGN_JWT, "header.payload.signature"),
        ]);

        let config = Config::new().from_env(&ctx);
        assert_eq!(config.base_url.as_deref(), Some("https://api.example.com"));
        assert!(config.logging);
        assert_eq!(config.jwt.as_deref(), Some("header.payload.signature"));
    }

    #[test]
    fn test_explicit_value_wins_over_env() {
        let ctx = ctx(&[
            (RESTSIGN_BASE_URL, "https://env.example.com"),
            (RESTSIGN_LOGGING, "off"),
        ]);

        let config = Config::new()
            .with_base_url("https://api.example.com")
            .from_env(&ctx);
        assert_eq!(config.base_url.as_deref(), Some("https://api.example.com"));
        assert!(!config.logging);
        assert_eq!(config.jwt, None);
    }

    #[test]
    fn test_debug_redacts_jwt() {
        let config = Config::new().with_jwt("eyJhbGciOiJIUzI1NiJ9.e30.signature");
        let output = format!("{config:?}");
        assert!(!output.contains("eyJhbGciOiJIUzI1NiJ9"));
        assert!(output.contains("eyJ***ure"));
    }
}
