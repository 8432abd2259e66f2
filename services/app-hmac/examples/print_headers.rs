use std::collections::HashMap;

use restsign_app_hmac::{
    Config, RequestSigner, RESTSIGN_APP_ID, RESTSIGN_APP_KEY, RESTSIGN_DEVICE_ID,
};
use restsign_core::{Context, HttpMethod, Result, SignRequest, StaticEnv};

fn main() -> Result<()> {
    let _ = env_logger::builder().try_init();

    // Use OsEnv in real code, a static env keeps the example self-contained.
    let ctx = Context::new().with_env(StaticEnv {
        envs: HashMap::from([
            (RESTSIGN_DEVICE_ID.to_string(), "device-1".to_string()),
            (RESTSIGN_APP_ID.to_string(), "demo-app".to_string()),
            (RESTSIGN_APP_KEY.to_string(), "demo-app-key".to_string()),
        ]),
    });

    let config = Config::new().from_env(&ctx);
    println!("{config:?}");

    let signer = RequestSigner::from_config(config)?;
    let body = serde_json::to_vec(&serde_json::json!({ "name": "Ann" }))?;
    let headers = signer.sign_request(HttpMethod::Post, Some(&body), Some("header.payload.sig"))?;

    for (name, value) in &headers {
        println!("{name}: {value:?}");
    }

    Ok(())
}
