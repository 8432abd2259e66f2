use std::time::Duration;

use bytes::Bytes;
use pretty_assertions::assert_eq;
use restsign_core::{
    Client, Context, Endpoint, ErrorKind, HttpSend, RequestOptions, RequestTimeout,
};
use restsign_http_send_reqwest::ReqwestHttpSend;
use serde::Deserialize;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Bind a listener and drop it, leaving a port nobody listens on.
async fn closed_port() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Accept connections and answer each with the given raw HTTP/1.1 response.
async fn canned_server(response: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(async move {
                let mut buf = vec![0; 4096];
                let _ = stream.read(&mut buf).await;
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });
    format!("http://{addr}")
}

/// Accept connections and never answer.
async fn silent_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut streams = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            streams.push(stream);
        }
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_closed_port_is_no_response() {
    init_logger();
    let url = closed_port().await;

    let req = http::Request::get(url).body(Bytes::new()).unwrap();
    let err = ReqwestHttpSend::default().http_send(req).await.unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::NoResponse);
}

#[tokio::test]
async fn test_silent_server_is_timeout() {
    init_logger();
    let url = silent_server().await;

    let mut req = http::Request::get(url).body(Bytes::new()).unwrap();
    req.extensions_mut()
        .insert(RequestTimeout(Duration::from_millis(200)));
    let err = ReqwestHttpSend::default().http_send(req).await.unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Timeout);
    assert!(err.is_transport_error());
}

#[tokio::test]
async fn test_response_is_collected() {
    init_logger();
    let url = canned_server(
        "HTTP/1.1 418 I'm a teapot\r\ncontent-length: 5\r\nconnection: close\r\n\r\nshort",
    )
    .await;

    let req = http::Request::get(url).body(Bytes::new()).unwrap();
    let resp = ReqwestHttpSend::default().http_send(req).await.unwrap();
    assert_eq!(resp.status(), http::StatusCode::IM_A_TEAPOT);
    assert_eq!(resp.body().as_ref(), b"short");
}

#[derive(Debug, PartialEq, Deserialize)]
struct User {
    name: String,
}

#[tokio::test]
async fn test_client_round_trip() {
    init_logger();
    let url = canned_server(
        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 14\r\nconnection: close\r\n\r\n{\"name\":\"Ann\"}",
    )
    .await;

    let client = Client::new(Context::new().with_http_send(ReqwestHttpSend::default()))
        .with_base_url(url)
        .with_logging(true);
    let user: User = client
        .get(
            &Endpoint::new().with_path("v1/users/42"),
            &RequestOptions::new().with_timeout(Duration::from_secs(5)),
        )
        .await
        .unwrap();
    assert_eq!(
        user,
        User {
            name: "Ann".to_string()
        }
    );
}

#[tokio::test]
async fn test_client_maps_timeout() {
    init_logger();
    let url = silent_server().await;

    let client = Client::new(Context::new().with_http_send(ReqwestHttpSend::default()))
        .with_base_url(url);
    let err = client
        .get::<User>(
            &Endpoint::new().with_path("slow"),
            &RequestOptions::new().with_timeout(Duration::from_millis(200)),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Timeout);
}
