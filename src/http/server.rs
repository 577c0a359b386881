//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, metrics, redirects)
//! - Bind server to listener
//! - Drain in-flight requests on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::Request,
    middleware,
    routing::get,
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::chain::ActiveChain;
use crate::config::{ConfigError, EdgeConfig, IdenticonConfig, ValidationError};
use crate::http::handlers::{get_chain, get_health, get_identicon};
use crate::http::passthrough::{passthrough_handler, Upstream};
use crate::http::redirect::redirect_middleware;
use crate::http::request::{request_id, MakeRequestUuidV4};
use crate::observability::metrics::track_requests;
use crate::routing::Redirector;

/// Errors raised while assembling the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn invalid<E: Into<ValidationError>>(errors: Vec<E>) -> ServerError {
    ConfigError::Validation(errors.into_iter().map(Into::into).collect()).into()
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub redirector: Arc<Redirector>,
    pub chain: Arc<ActiveChain>,
    pub upstream: Option<Upstream>,
    pub identicon: IdenticonConfig,
}

impl AppState {
    /// Compile every subsystem the handlers need from `config`.
    pub fn from_config(config: &EdgeConfig) -> Result<Self, ServerError> {
        let redirector = Redirector::from_config(&config.redirects).map_err(invalid)?;
        let chain = ActiveChain::from_config(&config.chain).map_err(invalid)?;
        let upstream = config
            .frontend
            .origin
            .as_deref()
            .map(|origin| {
                Upstream::new(
                    origin,
                    Duration::from_secs(config.timeouts.upstream_connect_secs),
                )
            })
            .transpose()
            .map_err(|e| invalid(vec![e]))?;

        Ok(Self {
            redirector: Arc::new(redirector),
            chain: Arc::new(chain),
            upstream,
            identicon: config.identicon.clone(),
        })
    }
}

/// HTTP server for the edge service.
pub struct HttpServer {
    router: Router,
    config: EdgeConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: EdgeConfig) -> Result<Self, ServerError> {
        let state = AppState::from_config(&config)?;

        tracing::info!(
            rules = state.redirector.rules().len(),
            chain_id = state.chain.chain().id.0,
            upstream = ?state.upstream.as_ref().map(|u| u.authority().to_string()),
            "Subsystems initialized"
        );
        if state.chain.factory().is_none() {
            tracing::warn!(
                network = state.chain.chain().network,
                "No factory address configured"
            );
        }

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &EdgeConfig, state: AppState) -> Router {
        Router::new()
            .route("/healthz", get(get_health))
            .route("/api/chain", get(get_chain))
            .route("/identicon/{address}", get(get_identicon))
            .fallback(passthrough_handler)
            .layer(middleware::from_fn_with_state(
                state.redirector.clone(),
                redirect_middleware,
            ))
            .layer(middleware::from_fn(track_requests))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
                    .layer(
                        TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                            tracing::info_span!(
                                "request",
                                request_id = %request_id(request),
                                method = %request.method(),
                                path = %request.uri().path(),
                            )
                        }),
                    )
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// The assembled router, for in-process serving.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &EdgeConfig {
        &self.config
    }
}
