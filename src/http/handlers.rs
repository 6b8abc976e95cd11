//! Route handlers for the product API.

use axum::{extract::State, http::StatusCode, Json};

use crate::http::error::{ApiError, ApiResult};
use crate::http::extract::{ApiJson, ApiPath, ApiQuery};
use crate::http::server::AppState;
use crate::products::{
    CategoryStats, NewProduct, Product, ProductFields, ProductPage, ProductQuery,
};

pub const WELCOME_MESSAGE: &str =
    "Welcome to the Product API! Go to /api/products to see all products.";

pub async fn welcome() -> &'static str {
    WELCOME_MESSAGE
}

pub async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(state.store.list()?))
}

pub async fn get_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Json<Product>> {
    Ok(Json(state.store.get(&id)?))
}

pub async fn create_product(
    State(state): State<AppState>,
    ApiJson(fields): ApiJson<ProductFields>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let input = NewProduct::from_fields(fields).ok_or_else(ApiError::missing_fields)?;
    let product = state.store.create(input)?;

    tracing::info!(id = %product.id, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace the five fields of a product. Fields left out of the body are
/// cleared on the stored record and presence is not validated on this path.
///
/// The body still has to decode into the product shape: a value of the wrong
/// JSON type (say a string `price`) is answered with 400 before the store is
/// touched.
pub async fn update_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(fields): ApiJson<ProductFields>,
) -> ApiResult<Json<Product>> {
    let product = state.store.update(&id, fields.into())?;

    tracing::info!(id = %product.id, "Product updated");
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Json<Product>> {
    let product = state.store.delete(&id)?;

    tracing::info!(id = %product.id, "Product deleted");
    Ok(Json(product))
}

pub async fn filter_products(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ProductQuery>,
) -> ApiResult<Json<ProductPage>> {
    Ok(Json(state.store.filter(&query)?))
}

pub async fn product_stats(State(state): State<AppState>) -> ApiResult<Json<CategoryStats>> {
    Ok(Json(state.store.stats()?))
}

pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}
