//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → middleware/ (logging filter, authentication filter)
//!     → handlers.rs (dispatch to the product store)
//!     → error.rs (uniform JSON error bodies)
//!     → Send to client
//! ```

pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod server;

pub use error::{ApiError, ApiResult, ErrorBody};
pub use server::{build_router, AppState, HttpServer};
