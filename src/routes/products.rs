use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::{IntoResponse, Json},
};

use crate::{
    dto::product_dto::{ProductListQuery, ProductListResponse, ProductResponse},
    error::{Error, Result},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/products",
    params(
        ("page" = Option<i64>, Query, description = "Page number (10 items per page)"),
        ("available" = Option<bool>, Query, description = "Exact match on availability (true/false or 1/0)"),
        ("category" = Option<String>, Query, description = "Case-insensitive partial match on the category name")
    ),
    responses(
        (status = 200, description = "A page of products", body = ProductListResponse),
        (status = 400, description = "Invalid query string")
    )
)]
#[axum::debug_handler]
pub async fn list_products(
    State(state): State<AppState>,
    query: std::result::Result<Query<ProductListQuery>, QueryRejection>,
) -> Result<impl IntoResponse> {
    let Query(query) = query.map_err(|rejection| Error::BadRequest(rejection.body_text()))?;
    let result = state.product_service.list(query).await?;
    Ok(Json(ProductListResponse::from(result)))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found")
    )
)]
#[axum::debug_handler]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let product = state.product_service.get_by_id(id).await?;
    Ok(Json(ProductResponse::from(product)))
}
