//! Locally served endpoints.

use alloy::primitives::Address;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::chain::ChainInfo;
use crate::http::server::AppState;
use crate::identicon::{Identicon, MAX_SIZE, MIN_SIZE};

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

pub async fn get_health() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

pub async fn get_chain(State(state): State<AppState>) -> Json<ChainInfo> {
    Json(state.chain.info())
}

#[derive(Debug, Deserialize)]
pub struct IdenticonQuery {
    pub size: Option<u32>,
}

/// `GET /identicon/{address}?size=N` as SVG.
pub async fn get_identicon(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Query(query): Query<IdenticonQuery>,
) -> Response {
    let address: Address = match address.parse() {
        Ok(a) => a,
        Err(_) => return (StatusCode::BAD_REQUEST, "Invalid address").into_response(),
    };

    let size = query.size.unwrap_or(state.identicon.default_size);
    if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
        return (
            StatusCode::BAD_REQUEST,
            format!("Size must be between {} and {}", MIN_SIZE, MAX_SIZE),
        )
            .into_response();
    }

    let svg = Identicon::for_address(&address, size).to_svg();
    (
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "public, max-age=31536000, immutable"),
        ],
        svg,
    )
        .into_response()
}
