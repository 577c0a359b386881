//! Redirect middleware.
//!
//! Runs in front of every route. Paths outside the redirector's declared
//! scope skip rule evaluation entirely; matching paths are answered with a
//! bodiless 3xx and never reach the rest of the stack.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::request::request_id;
use crate::http::response::error_page;
use crate::observability::metrics;
use crate::routing::{Redirector, RouteDecision};

pub async fn redirect_middleware(
    State(redirector): State<Arc<Redirector>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !redirector.is_candidate(request.uri().path()) {
        return next.run(request).await;
    }

    let decision = redirector.decide(request.uri().path(), request.uri().query());
    match decision {
        RouteDecision::Redirect {
            rule,
            location,
            status,
        } => {
            tracing::debug!(
                request_id = %request_id(&request),
                rule,
                path = %request.uri().path(),
                location = %location,
                "Redirecting"
            );
            metrics::record_redirect(rule, status.as_u16());
            redirect_response(status, &location)
        }
        RouteDecision::Continue => next.run(request).await,
    }
}

/// A bodiless redirect to `location`.
pub fn redirect_response(status: StatusCode, location: &str) -> Response {
    match HeaderValue::try_from(location) {
        Ok(value) => (status, [(header::LOCATION, value)], Body::empty()).into_response(),
        Err(e) => {
            tracing::error!(location, error = %e, "Redirect target is not a valid header value");
            error_page(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
