//! Async client for the Product API.

pub mod client;

pub use client::{Page, Product, ProductClient, ProductInput, SdkError};
