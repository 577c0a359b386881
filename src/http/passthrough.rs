//! Pass-through to the frontend origin.
//!
//! # Responsibilities
//! - Forward every request the redirector let through to the frontend origin
//! - Stream the origin's response back unchanged
//! - Serve the static not-found page when no origin is configured
//!
//! # Design Decisions
//! - Method, headers, body, path and query are forwarded untouched
//! - No retries: a failed origin request becomes a 502 error page
//! - Plain HTTP only; TLS to the origin is expected to terminate elsewhere

use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{
        uri::{Authority, InvalidUriParts, Parts, PathAndQuery, Scheme},
        Request, StatusCode, Uri, Version,
    },
    response::Response,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;

use crate::http::request::request_id;
use crate::http::response::{error_page, not_found_page};
use crate::http::server::AppState;

/// Errors raised by the origin connection.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("invalid origin '{0}': expected http://host[:port]")]
    InvalidOrigin(String),

    #[error("origin '{0}' must use plain http")]
    UnsupportedScheme(String),

    #[error("invalid upstream URI: {0}")]
    Uri(#[from] InvalidUriParts),

    #[error("upstream request failed: {0}")]
    Request(#[from] hyper_util::client::legacy::Error),
}

/// HTTP client bound to the frontend origin.
#[derive(Clone)]
pub struct Upstream {
    authority: Authority,
    client: Client<HttpConnector, Body>,
}

impl std::fmt::Debug for Upstream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Upstream")
            .field("authority", &self.authority)
            .finish()
    }
}

impl Upstream {
    /// Parse `origin` (`http://host[:port]`) and build the client.
    pub fn new(origin: &str, connect_timeout: Duration) -> Result<Self, UpstreamError> {
        let authority = parse_origin(origin)?;

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(connect_timeout));
        let client = Client::builder(TokioExecutor::new()).build(connector);

        Ok(Self { authority, client })
    }

    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    /// Send `request` to the origin, keeping its path and query.
    pub async fn forward(&self, request: Request<Body>) -> Result<Response, UpstreamError> {
        let (mut parts, body) = request.into_parts();

        let mut uri = Parts::default();
        uri.scheme = Some(Scheme::HTTP);
        uri.authority = Some(self.authority.clone());
        uri.path_and_query = Some(
            parts
                .uri
                .path_and_query()
                .cloned()
                .unwrap_or_else(|| PathAndQuery::from_static("/")),
        );
        parts.uri = Uri::from_parts(uri)?;
        parts.version = Version::HTTP_11;

        let response = self
            .client
            .request(Request::from_parts(parts, body))
            .await?;
        let (parts, body) = response.into_parts();
        Ok(Response::from_parts(parts, Body::new(body)))
    }
}

/// Validate an origin string, returning its authority.
pub fn parse_origin(origin: &str) -> Result<Authority, UpstreamError> {
    let uri: Uri = origin
        .parse()
        .map_err(|_| UpstreamError::InvalidOrigin(origin.to_string()))?;

    if uri.scheme() != Some(&Scheme::HTTP) {
        return Err(UpstreamError::UnsupportedScheme(origin.to_string()));
    }
    let has_path = uri.path_and_query().is_some_and(|p| p.as_str() != "/");
    match uri.authority() {
        Some(authority) if !has_path => Ok(authority.clone()),
        _ => Err(UpstreamError::InvalidOrigin(origin.to_string())),
    }
}

/// Fallback handler: everything not redirected and not served locally.
pub async fn passthrough_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    match &state.upstream {
        Some(upstream) => {
            let id = request_id(&request).to_string();
            let path = request.uri().path().to_string();
            match upstream.forward(request).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!(request_id = %id, path = %path, error = %e, "Upstream request failed");
                    error_page(StatusCode::BAD_GATEWAY)
                }
            }
        }
        None => not_found_page(),
    }
}
