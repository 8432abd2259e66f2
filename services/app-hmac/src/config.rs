use std::fmt::{Debug, Formatter};

use restsign_core::{utils::Redact, Context};

use crate::constants::*;

/// Config carries all the configuration for app hmac signing.
#[derive(Clone, Default)]
pub struct Config {
    /// `device_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`RESTSIGN_DEVICE_ID`]
    pub device_id: Option<String>,
    /// `app_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`RESTSIGN_APP_ID`]
    pub app_id: Option<String>,
    /// `app_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`RESTSIGN_APP_KEY`]
    pub app_key: Option<String>,
    /// `user_agent` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`RESTSIGN_USER_AGENT`]
    ///
    /// Falls back to [`DEFAULT_USER_AGENT`] when unset.
    pub user_agent: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set device_id
    pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    /// Set app_id
    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    /// Set app_key
    pub fn with_app_key(mut self, app_key: impl Into<String>) -> Self {
        self.app_key = Some(app_key.into());
        self
    }

    /// Set user_agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(RESTSIGN_DEVICE_ID) {
            self.device_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(RESTSIGN_APP_ID) {
            self.app_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(RESTSIGN_APP_KEY) {
            self.app_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(RESTSIGN_USER_AGENT) {
            self.user_agent.get_or_insert(v);
        }

        self
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("device_id", &self.device_id)
            .field("app_id", &self.app_id)
            .field("app_key", &self.app_key.as_ref().map(Redact::from))
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use restsign_core::StaticEnv;

    use super::*;

    #[test]
    fn test_from_env_keeps_explicit_values() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                (RESTSIGN_DEVICE_ID.to_string(), "env-device".to_string()),
                (RESTSIGN_APP_ID.to_string(), "env-app".to_string()),
                (RESTSIGN_APP_KEY.to_string(), "env-key".to_string()),
            ]),
        });

        let config = Config::new().with_app_id("explicit-app").from_env(&ctx);
        assert_eq!(config.device_id.as_deref(), Some("env-device"));
        assert_eq!(config.app_id.as_deref(), Some("explicit-app"));
        assert_eq!(config.app_key.as_deref(), Some("env-key"));
        assert_eq!(config.user_agent, None);
    }

    #[test]
    fn test_debug_redacts_app_key() {
        let config = Config::new().with_app_key("super-secret-app-key");
        let output = format!("{config:?}");
        assert!(!output.contains("super-secret-app-key"));
    }
}
