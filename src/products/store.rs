//! In-memory product store.
//!
//! # Responsibilities
//! - Own the ordered product sequence for the lifetime of the process
//! - Assign ids on create
//! - Run each operation atomically under a single lock
//!
//! # Design Decisions
//! - One `Mutex<Vec<Product>>`: lookups are linear scans, which is fine at
//!   this scale and keeps insertion order for list/filter/stats
//! - The lock is never held across an `.await`
//! - A poisoned lock surfaces as an error instead of a panic

use std::sync::{Mutex, MutexGuard};

use thiserror::Error;
use uuid::Uuid;

use crate::products::model::{NewProduct, Product, ProductPage, ProductQuery, ProductUpdate};
use crate::products::query::{filter_products, CategoryStats};

/// Errors returned by [`ProductStore`] operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("product {0} not found")]
    NotFound(String),

    #[error("product store lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Thread-safe owner of the product collection.
#[derive(Debug, Default)]
pub struct ProductStore {
    products: Mutex<Vec<Product>>,
}

impl ProductStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the sample products.
    pub fn seeded() -> Self {
        Self::with_products(Product::samples())
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(products),
        }
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Vec<Product>>> {
        self.products.lock().map_err(|_| StoreError::Poisoned)
    }

    /// All products in insertion order.
    pub fn list(&self) -> StoreResult<Vec<Product>> {
        Ok(self.lock()?.clone())
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    pub fn get(&self, id: &str) -> StoreResult<Product> {
        self.lock()?
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Append a product under a freshly generated id.
    pub fn create(&self, input: NewProduct) -> StoreResult<Product> {
        let mut products = self.lock()?;

        let mut id = Uuid::new_v4().to_string();
        while products.iter().any(|p| p.id == id) {
            id = Uuid::new_v4().to_string();
        }

        let product = input.into_product(id);
        products.push(product.clone());
        Ok(product)
    }

    /// Replace all five fields of an existing product, keeping its id.
    pub fn update(&self, id: &str, update: ProductUpdate) -> StoreResult<Product> {
        let mut products = self.lock()?;
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        product.replace_fields(update);
        Ok(product.clone())
    }

    /// Remove a product, preserving the order of the remaining ones.
    pub fn delete(&self, id: &str) -> StoreResult<Product> {
        let mut products = self.lock()?;
        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        Ok(products.remove(index))
    }

    pub fn filter(&self, query: &ProductQuery) -> StoreResult<ProductPage> {
        Ok(filter_products(&self.lock()?, query))
    }

    pub fn stats(&self) -> StoreResult<CategoryStats> {
        Ok(CategoryStats::collect(&self.lock()?))
    }
}
