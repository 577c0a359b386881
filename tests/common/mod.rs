//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{body::Body, extract::State, http::Request, Router};
use tokio::net::TcpListener;

use diviswap_edge::config::EdgeConfig;
use diviswap_edge::http::X_REQUEST_ID;

/// Start a mock frontend origin on an ephemeral port.
///
/// Every request is answered with `"<METHOD> <path?query> <request-id>"`.
/// Returns the origin address and a hit counter.
#[allow(dead_code)]
pub async fn start_mock_origin() -> (SocketAddr, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .fallback(|State(hits): State<Arc<AtomicUsize>>, req: Request<Body>| async move {
            hits.fetch_add(1, Ordering::SeqCst);
            let id = req
                .headers()
                .get(X_REQUEST_ID)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-")
                .to_string();
            let target = req
                .uri()
                .path_and_query()
                .map(|p| p.as_str().to_string())
                .unwrap_or_default();
            format!("{} {} {}", req.method(), target, id)
        })
        .with_state(hits.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (addr, hits)
}

/// An address nothing listens on.
#[allow(dead_code)]
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Default configuration pointing at `origin`.
#[allow(dead_code)]
pub fn config_with_origin(origin: SocketAddr) -> EdgeConfig {
    let mut config = EdgeConfig::default();
    config.frontend.origin = Some(format!("http://{}", origin));
    config
}
