use async_trait::async_trait;
use bytes::Bytes;
use http::HeaderMap;
use restsign_core::hash::hex_hmac_sha256;
use restsign_core::{
    Client, Context, Endpoint, HttpMethod, HttpSend, RequestOptions, Result, SignRequest,
};
use serde::Deserialize;

// A signer that sends an api key and a signature over the method and body.
#[derive(Debug)]
struct ApiKeySigner {
    api_key: String,
    api_secret: String,
}

impl SignRequest for ApiKeySigner {
    fn sign_request(
        &self,
        method: HttpMethod,
        body: Option<&[u8]>,
        _jwt: Option<&str>,
    ) -> Result<HeaderMap> {
        let mut content = method.as_str().as_bytes().to_vec();
        content.extend_from_slice(body.unwrap_or_default());

        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", self.api_key.parse()?);
        headers.insert(
            "x-api-signature",
            hex_hmac_sha256(self.api_secret.as_bytes(), &content).parse()?,
        );
        Ok(headers)
    }
}

// A transport that answers every request locally with the headers it received.
#[derive(Debug)]
struct EchoHttpSend;

#[async_trait]
impl HttpSend for EchoHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let headers = req
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect::<std::collections::BTreeMap<_, _>>();
        let body = serde_json::to_vec(&serde_json::json!({ "headers": headers }))?;
        Ok(http::Response::new(Bytes::from(body)))
    }
}

#[derive(Debug, Deserialize)]
struct Echo {
    headers: std::collections::BTreeMap<String, String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let ctx = Context::new().with_http_send(EchoHttpSend);
    let client = Client::new(ctx)
        .with_base_url("https://api.example.com")
        .with_signer(ApiKeySigner {
            api_key: "demo-api-key".to_string(),
            api_secret: "demo-api-secret".to_string(),
        });

    let echo: Echo = client
        .post(
            &Endpoint::new().with_path("echo"),
            &serde_json::json!({ "hello": "world" }),
            &RequestOptions::new(),
        )
        .await?;

    for (name, value) in echo.headers {
        println!("{name}: {value}");
    }

    Ok(())
}
