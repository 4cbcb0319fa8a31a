use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
};

use crate::{
    dto::{
        category_dto::{CategoryListResponse, CategoryResponse},
        pagination::{PageQuery, PageRequest},
    },
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/categories",
    params(
        ("page" = Option<i64>, Query, description = "Page number (10 items per page)")
    ),
    responses(
        (status = 200, description = "A page of categories", body = CategoryListResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse> {
    let result = state
        .category_service
        .list(PageRequest::new(query.page))
        .await?;
    Ok(Json(CategoryListResponse::from(result)))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 404, description = "Category not found")
    )
)]
#[axum::debug_handler]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let category = state.category_service.get_by_id(id).await?;
    Ok(Json(CategoryResponse::from(category)))
}
