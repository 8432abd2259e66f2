use restsign_core::{Context, OsEnv};
use restsign_http_send_reqwest::ReqwestHttpSend;

/// Create a context with a reqwest transport and the OS environment.
///
/// Use [`Context::with_http_send`] on the result to tune the reqwest client.
pub fn default_context() -> Context {
    Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv)
}
