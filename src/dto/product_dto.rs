use chrono::{DateTime, Utc};
use serde::{
    de::{self, Unexpected},
    Deserialize, Deserializer, Serialize,
};
use utoipa::ToSchema;

use crate::dto::category_dto::CategoryResponse;
use crate::dto::pagination::Paginated;
use crate::models::product::ProductRow;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub brand: String,
    pub sku: String,
    pub available: bool,
    pub price: f64,
    pub category: Option<CategoryResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    pub items: Vec<ProductResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

/// `available` is an exact match (`true`/`false` or `1`/`0`); `category`
/// matches any category whose name contains it, ignoring case.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProductListQuery {
    pub page: Option<i64>,
    #[serde(deserialize_with = "query_flag")]
    pub available: Option<bool>,
    pub category: Option<String>,
}

fn query_flag<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some("true") | Some("1") => Ok(Some(true)),
        Some("false") | Some("0") => Ok(Some(false)),
        Some(other) => Err(de::Error::invalid_value(
            Unexpected::Str(other),
            &"true, false, 1 or 0",
        )),
    }
}

impl From<ProductRow> for ProductResponse {
    fn from(value: ProductRow) -> Self {
        let product = value.product;
        let category = match (product.category_id, value.category_name) {
            (Some(id), Some(name)) => Some(CategoryResponse { id, name }),
            _ => None,
        };

        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            brand: product.brand,
            sku: product.sku,
            available: product.available,
            price: product.price,
            category,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

impl From<Paginated<ProductRow>> for ProductListResponse {
    fn from(value: Paginated<ProductRow>) -> Self {
        Self {
            items: value.items.into_iter().map(Into::into).collect(),
            total: value.total,
            page: value.page,
            per_page: value.per_page,
            total_pages: value.total_pages,
        }
    }
}
