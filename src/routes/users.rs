use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use serde_json::Value as JsonValue;
use validator::Validate;

use crate::{
    dto::{
        pagination::{PageQuery, PageRequest},
        user_dto::{CreateUserPayload, UserListResponse, UserResponse},
    },
    error::{Error, Result},
    middleware::policy::{self, Action, Caller},
    models::user::ROLE_ADMIN,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/users",
    params(
        ("page" = Option<i64>, Query, description = "Page number (10 items per page)")
    ),
    responses(
        (status = 200, description = "A page of users", body = UserListResponse),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
#[axum::debug_handler]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse> {
    let result = state.user_service.list(PageRequest::new(query.page)).await?;
    Ok(Json(UserListResponse::from(result)))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let user = state.user_service.get_by_id(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Authorization runs on the raw body before typed decoding and
/// validation, so a forbidden request is reported as such even when its
/// payload is also invalid.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Target account is not the caller's")
    )
)]
#[axum::debug_handler]
pub async fn create_user(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    body: Bytes,
) -> Result<impl IntoResponse> {
    let raw: JsonValue = serde_json::from_slice(&body)?;
    if !raw.is_object() {
        return Err(Error::BadRequest(
            "Request body must be a JSON object".to_string(),
        ));
    }

    if let Some(action) = creation_target(&raw) {
        policy::authorize(&caller, action)?;
    }

    let payload: CreateUserPayload = serde_json::from_value(raw)?;
    payload.validate()?;

    let user = state.user_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Caller may only delete themselves"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    policy::authorize(&caller, Action::DeleteUser { user_id: id })?;

    if !state.user_service.delete(id).await? {
        return Err(Error::NotFound("User not found".to_string()));
    }
    tracing::info!(user_id = id, deleted_by = caller.user_id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// The creation the raw body asks for, when it names an account id.
fn creation_target(raw: &JsonValue) -> Option<Action> {
    let account_id = raw.get("account")?.as_i64()?;
    let grants_admin = raw
        .get("roles")
        .and_then(JsonValue::as_array)
        .is_some_and(|roles| {
            roles
                .iter()
                .any(|r| r.as_str().map(str::trim) == Some(ROLE_ADMIN))
        });
    Some(Action::CreateUser {
        account_id,
        grants_admin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn target_is_read_from_account_and_roles() {
        assert_eq!(
            creation_target(&json!({ "account": 4, "roles": ["ROLE_ADMIN"] })),
            Some(Action::CreateUser {
                account_id: 4,
                grants_admin: true
            })
        );
        assert_eq!(
            creation_target(&json!({ "account": 4, "last_name": 99999 })),
            Some(Action::CreateUser {
                account_id: 4,
                grants_admin: false
            })
        );
    }

    #[test]
    fn no_target_without_an_integer_account() {
        assert_eq!(creation_target(&json!({ "email": "a@b.c" })), None);
        assert_eq!(creation_target(&json!({ "account": "/api/accounts/4" })), None);
    }
}
