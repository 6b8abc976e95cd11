//! Cross-cutting request filters.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → logging.rs (record time, method, path; never rejects)
//!     → auth.rs (check x-api-key; 401 on mismatch)
//!     → timeout.rs (408 once the request deadline passes)
//!     → Pass to routing
//! ```

pub mod auth;
pub mod logging;
pub mod timeout;

pub use auth::{require_api_key, API_KEY_HEADER};
pub use logging::log_requests;
pub use timeout::enforce_timeout;
