//! Product record and request payload types.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;

/// A product held by the store.
///
/// Every field except `id` is optional because an update may omit fields,
/// and the stored record then simply lacks them. Absent fields are left out
/// of the serialized JSON.
///
/// `price` and `inStock` also remember an explicit `null`: `None` is an
/// absent key, `Some(None)` is a stored `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server-assigned identifier, immutable once stored.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Kept as the exact JSON number received so `1200` stays `1200`.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Option<Number>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub in_stock: Option<Option<bool>>,
}

/// Read a key that is present in the input, keeping `null` as `Some(None)`.
/// Absent keys never reach this and fall back to `None` through `default`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl Product {
    fn seed(
        id: &str,
        name: &str,
        description: &str,
        price: u64,
        category: &str,
        in_stock: bool,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: Some(name.to_string()),
            description: Some(description.to_string()),
            price: Some(Some(Number::from(price))),
            category: Some(category.to_string()),
            in_stock: Some(Some(in_stock)),
        }
    }

    /// The three sample products every process starts with.
    pub fn samples() -> Vec<Product> {
        vec![
            Self::seed(
                "1",
                "Laptop",
                "High-performance laptop with 16GB RAM",
                1200,
                "electronics",
                true,
            ),
            Self::seed(
                "2",
                "Smartphone",
                "Latest model with 128GB storage",
                800,
                "electronics",
                true,
            ),
            Self::seed(
                "3",
                "Coffee Maker",
                "Programmable coffee maker with timer",
                50,
                "kitchen",
                false,
            ),
        ]
    }

    /// Overwrite all five fields, keeping `id`.
    pub(crate) fn replace_fields(&mut self, update: ProductUpdate) {
        let ProductUpdate(fields) = update;
        self.name = fields.name;
        self.description = fields.description;
        self.price = fields.price;
        self.category = fields.category;
        self.in_stock = fields.in_stock;
    }
}

/// The five user-supplied fields, exactly as they arrived in a request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Option<Number>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub in_stock: Option<Option<bool>>,
}

/// Input for a create that passed field-presence validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Option<Number>,
    pub category: String,
    pub in_stock: Option<bool>,
}

impl NewProduct {
    /// Validate a create body.
    ///
    /// Text fields must be present, non-null and non-empty; `price` and
    /// `inStock` only need to be present, so `0`, `false` and `null` are
    /// accepted.
    pub fn from_fields(fields: ProductFields) -> Option<Self> {
        let ProductFields {
            name,
            description,
            price,
            category,
            in_stock,
        } = fields;

        Some(Self {
            name: name.filter(|s| !s.is_empty())?,
            description: description.filter(|s| !s.is_empty())?,
            price: price?,
            category: category.filter(|s| !s.is_empty())?,
            in_stock: in_stock?,
        })
    }

    pub(crate) fn into_product(self, id: String) -> Product {
        Product {
            id,
            name: Some(self.name),
            description: Some(self.description),
            price: Some(self.price),
            category: Some(self.category),
            in_stock: Some(self.in_stock),
        }
    }
}

/// Replacement values for an update. Omitted fields clear the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate(pub ProductFields);

impl From<ProductFields> for ProductUpdate {
    fn from(fields: ProductFields) -> Self {
        Self(fields)
    }
}

/// Raw query parameters of the filter endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// One page of filtered products.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPage {
    /// Number of products that matched before pagination.
    pub total: usize,
    pub page: i64,
    pub limit: i64,
    pub data: Vec<Product>,
}
