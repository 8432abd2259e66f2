use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use restsign_core::{Context, Endpoint, RequestOptions};
use restsign_http_send_reqwest::ReqwestHttpSend;

#[tokio::main]
async fn main() -> Result<()> {
    // Create a custom reqwest client with specific configuration
    let client = Client::builder()
        .connect_timeout(Duration::from_secs(5))
        .pool_max_idle_per_host(10)
        .user_agent("restsign-example/1.0")
        .build()?;

    println!("Created custom HTTP client with:");
    println!("  - 5 second connect timeout");
    println!("  - Max 10 idle connections per host");
    println!("  - Custom user agent");

    let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));
    let client = restsign_core::Client::new(ctx)
        .with_base_url("http://httpbin.org")
        .with_logging(true);

    // A per-request timeout overrides whatever the reqwest client sets.
    let options = RequestOptions::new()
        .with_header("x-test-header", "restsign-example")?
        .with_timeout(Duration::from_secs(10));

    match client
        .get::<serde_json::Value>(&Endpoint::new().with_path("get"), &options)
        .await
    {
        Ok(body) => println!("Response body:\n{body:#}"),
        Err(e) => eprintln!("Request failed: {e} ({:?})", e.kind()),
    }

    match client
        .get::<serde_json::Value>(
            &Endpoint::new().with_path("status/404"),
            &RequestOptions::new(),
        )
        .await
    {
        Ok(_) => println!("Unexpected success"),
        Err(e) => println!("Status 404 mapped to {:?}", e.kind()),
    }

    Ok(())
}
