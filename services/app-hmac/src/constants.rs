// Headers
pub const X_APP_ID: &str = "x-app-id";
pub const X_BROWSER: &str = "x-browser";
pub const X_BROWSER_SIG: &str = "x-browser-sig";
pub const X_CLIENT: &str = "x-client";
pub const X_REQ_SIG: &str = "x-req-sig";
pub const X_REQ_NONCE: &str = "x-req-nonce";
pub const X_REQ_TIMESTAMP: &str = "x-req-timestamp";

/// Client label used when no user agent is configured.
pub const DEFAULT_USER_AGENT: &str = "restsign";

// Env values used in app hmac signing.
pub const RESTSIGN_DEVICE_ID: &str = "RESTSIGN_DEVICE_ID";
pub const RESTSIGN_APP_ID: &str = "RESTSIGN_APP_ID";
pub const RESTSIGN_APP_KEY: &str = "RESTSIGN_APP_KEY";
pub const RESTSIGN_USER_AGENT: &str = "RESTSIGN_USER_AGENT";
