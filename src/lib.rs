//! Diviswap edge service library.

pub mod chain;
pub mod config;
pub mod http;
pub mod identicon;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::EdgeConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Redirector, RouteDecision};
