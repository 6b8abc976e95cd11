//! Product domain.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → model.rs (request payloads, validation)
//!     → store.rs (locked read/modify/write of the sequence)
//!     → query.rs (filter, paginate, aggregate)
//!     → Product / ProductPage / CategoryStats serialized back
//! ```

pub mod model;
pub mod query;
pub mod store;

pub use model::{NewProduct, Product, ProductFields, ProductPage, ProductQuery, ProductUpdate};
pub use query::CategoryStats;
pub use store::{ProductStore, StoreError, StoreResult};
