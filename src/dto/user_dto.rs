use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::dto::pagination::Paginated;
use crate::models::user::User;
use crate::utils::validation::not_blank;

/// Write model for `POST /api/users`. Missing strings decode as empty so
/// they surface as field violations rather than decoding errors.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserPayload {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank"),
        email(message = "This value is not a valid email address.")
    )]
    pub email: String,
    /// Write-only; hashed on receipt and never echoed back.
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub password: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub last_name: String,
    /// Id of the owning account.
    #[validate(required(message = "This value should not be null."))]
    pub account: Option<i64>,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Read model; the password hash is never part of it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub roles: Vec<String>,
    pub account: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserListResponse {
    pub items: Vec<UserResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        let roles = value.effective_roles();
        Self {
            id: value.id,
            email: value.email,
            first_name: value.first_name,
            last_name: value.last_name,
            roles,
            account: value.account_id,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<Paginated<User>> for UserListResponse {
    fn from(value: Paginated<User>) -> Self {
        Self {
            items: value.items.into_iter().map(Into::into).collect(),
            total: value.total,
            page: value.page,
            per_page: value.per_page,
            total_pages: value.total_pages,
        }
    }
}
