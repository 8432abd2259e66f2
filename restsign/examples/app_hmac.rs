use restsign::app_hmac::{Config, RequestSigner};
use restsign::{default_context, Client, Endpoint, ErrorKind, RequestOptions, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize)]
struct User {
    name: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // Create a context with the reqwest transport and the OS environment
    let ctx = default_context();

    // Build the signer from RESTSIGN_APP_ID and RESTSIGN_APP_KEY, with an
    // explicit device id and client label
    let signer = RequestSigner::from_config(
        Config::new()
            .with_device_id("example-device")
            .with_user_agent("restsign-example/1.0")
            .from_env(&ctx),
    )?;
    println!("Device fingerprint: {}", signer.fingerprint());

    let client = Client::new(ctx)
        .with_base_url("https://api.example.com")
        .with_logging(true)
        .with_signer(signer);

    // Create a user
    let created: User = client
        .post(
            &Endpoint::new().with_version("v1").with_controller("users"),
            &User {
                name: "Ann".to_string(),
            },
            &RequestOptions::new().with_timeout(Duration::from_secs(10)),
        )
        .await?;
    println!("Created: {created:?}");

    // Fetch a user that may not exist
    let endpoint = Endpoint::new().with_path_params("v1/users/{id}", [("id", "42")]);
    match client.get::<User>(&endpoint, &RequestOptions::new()).await {
        Ok(user) => println!("Found: {user:?}"),
        Err(err) if err.kind() == &ErrorKind::NotFound => println!("User 42 not found"),
        Err(err) if err.is_transport_error() => println!("Server unreachable: {err}"),
        Err(err) => return Err(err),
    }

    Ok(())
}
