//! In-memory product catalogue served over HTTP.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod products;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use products::{Product, ProductStore};
