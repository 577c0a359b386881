//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID)
//!     → redirect.rs (3xx for reserved prefixes)
//!     → handlers.rs (health, chain tables, identicons)
//!     → passthrough.rs (frontend origin or not-found page)
//!     → response.rs (static fallback pages)
//! ```

pub mod handlers;
pub mod passthrough;
pub mod redirect;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer, ServerError};
