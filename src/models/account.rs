use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Tenant boundary owning a set of users.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: i64,
    pub primary_email: String,
}
