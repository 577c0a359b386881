//! Pass-through tests against a mock frontend origin over real sockets.

use std::sync::atomic::Ordering;
use std::time::Duration;

use axum::http::{header, StatusCode};

use diviswap_edge::http::HttpServer;
use diviswap_edge::lifecycle::Shutdown;

mod common;

/// Start the edge service on an ephemeral port and return its base URL.
async fn start_edge(config: diviswap_edge::EdgeConfig, shutdown: &Shutdown) -> String {
    let server = HttpServer::new(config).expect("valid config");
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });
    format!("http://{}", addr)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_unmatched_paths_reach_origin_unchanged() {
    let (origin, hits) = common::start_mock_origin().await;
    let shutdown = Shutdown::new();
    let base = start_edge(common::config_with_origin(origin), &shutdown).await;
    let client = client();

    let res = client
        .get(format!("{}/swap?input=CHZ", base))
        .header("x-request-id", "req-1")
        .send()
        .await
        .expect("edge reachable");
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "GET /swap?input=CHZ req-1");

    let res = client
        .get(format!("{}/academydemo", base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert!(res.text().await.unwrap().starts_with("GET /academydemo "));

    assert_eq!(hits.load(Ordering::SeqCst), 2);
    shutdown.trigger();
}

#[tokio::test]
async fn test_redirects_never_reach_origin() {
    let (origin, hits) = common::start_mock_origin().await;
    let shutdown = Shutdown::new();
    let base = start_edge(common::config_with_origin(origin), &shutdown).await;
    let client = client();

    for path in ["/academy", "/academy/", "/academy/courses/3"] {
        let res = client.get(format!("{}{}", base, path)).send().await.unwrap();
        assert_eq!(res.status(), 307, "{}", path);
        let location = res.headers()[header::LOCATION].to_str().unwrap().to_string();
        assert!(location.starts_with("https://academy.diviswap.io/"), "{}", location);
    }

    assert_eq!(hits.load(Ordering::SeqCst), 0);
    shutdown.trigger();
}

#[tokio::test]
async fn test_origin_down_yields_error_page() {
    let origin = common::unused_addr().await;
    let shutdown = Shutdown::new();
    let base = start_edge(common::config_with_origin(origin), &shutdown).await;

    let res = client().get(format!("{}/pool", base)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY.as_u16());
    assert!(res.text().await.unwrap().contains("Try again"));
    shutdown.trigger();
}

#[tokio::test]
async fn test_graceful_shutdown() {
    let shutdown = Shutdown::new();
    let server = HttpServer::new(diviswap_edge::EdgeConfig::default()).unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server stops")
        .expect("task joins");
    assert!(result.is_ok());
}
