use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;

use crate::dto::{
    auth_dto::{LoginPayload, LoginResponse},
    category_dto::{CategoryListResponse, CategoryResponse},
    product_dto::{ProductListResponse, ProductResponse},
    user_dto::{CreateUserPayload, UserListResponse, UserResponse},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::auth::login,
        crate::routes::products::list_products,
        crate::routes::products::get_product,
        crate::routes::categories::list_categories,
        crate::routes::categories::get_category,
        crate::routes::users::list_users,
        crate::routes::users::get_user,
        crate::routes::users::create_user,
        crate::routes::users::delete_user,
    ),
    components(schemas(
        LoginPayload,
        LoginResponse,
        CategoryResponse,
        CategoryListResponse,
        ProductResponse,
        ProductListResponse,
        CreateUserPayload,
        UserResponse,
        UserListResponse,
    )),
    info(title = "Catalog API")
)]
pub struct ApiDoc;

pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
