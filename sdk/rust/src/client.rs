use std::collections::BTreeMap;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<serde_json::Number>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
}

/// Body for create and update. `None` fields are left out of the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<serde_json::Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
}

impl ProductInput {
    /// A body with all five fields set.
    pub fn complete(
        name: &str,
        description: &str,
        price: u64,
        category: &str,
        in_stock: bool,
    ) -> Self {
        Self {
            name: Some(name.to_string()),
            description: Some(description.to_string()),
            price: Some(price.into()),
            category: Some(category.to_string()),
            in_stock: Some(in_stock),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page {
    pub total: usize,
    pub page: i64,
    pub limit: i64,
    pub data: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned {status}: {message}")]
    Api { status: StatusCode, message: String },
}

impl SdkError {
    /// HTTP status of an API error, if the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SdkError::Api { status, .. } => Some(*status),
            SdkError::Transport(e) => e.status(),
        }
    }
}

pub struct ProductClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ProductClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .header(API_KEY_HEADER, &self.api_key)
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, SdkError> {
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await?;
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|b| b.message)
                .unwrap_or(text);
            return Err(SdkError::Api { status, message });
        }
        Ok(resp.json().await?)
    }

    /// Fetch the plain-text welcome message.
    pub async fn welcome(&self) -> Result<String, SdkError> {
        let resp = self.request(Method::GET, "/").send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(SdkError::Api { status, message: text });
        }
        Ok(text)
    }

    pub async fn list(&self) -> Result<Vec<Product>, SdkError> {
        let resp = self.request(Method::GET, "/api/products").send().await?;
        Self::decode(resp).await
    }

    pub async fn get(&self, id: &str) -> Result<Product, SdkError> {
        let resp = self
            .request(Method::GET, &format!("/api/products/{id}"))
            .send()
            .await?;
        Self::decode(resp).await
    }

    pub async fn create(&self, input: &ProductInput) -> Result<Product, SdkError> {
        let resp = self
            .request(Method::POST, "/api/products")
            .json(input)
            .send()
            .await?;
        Self::decode(resp).await
    }

    pub async fn update(&self, id: &str, input: &ProductInput) -> Result<Product, SdkError> {
        let resp = self
            .request(Method::PUT, &format!("/api/products/{id}"))
            .json(input)
            .send()
            .await?;
        Self::decode(resp).await
    }

    pub async fn delete(&self, id: &str) -> Result<Product, SdkError> {
        let resp = self
            .request(Method::DELETE, &format!("/api/products/{id}"))
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// Filter, search and paginate. Pass `(name, value)` query pairs.
    pub async fn filter(&self, query: &[(&str, &str)]) -> Result<Page, SdkError> {
        let resp = self
            .request(Method::GET, "/api/products/filter")
            .query(query)
            .send()
            .await?;
        Self::decode(resp).await
    }

    pub async fn stats(&self) -> Result<BTreeMap<String, usize>, SdkError> {
        let resp = self.request(Method::GET, "/api/products/stats").send().await?;
        Self::decode(resp).await
    }
}
