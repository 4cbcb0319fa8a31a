use crate::dto::pagination::{PageRequest, Paginated};
use crate::dto::user_dto::CreateUserPayload;
use crate::error::{Error, Result};
use crate::models::user::{normalize_roles, User, UserChanges};
use crate::utils::{crypto::hash_password_blocking, time::now};
use sqlx::PgPool;

const USER_COLUMNS: &str =
    "id, email, password, first_name, last_name, roles, account_id, created_at, updated_at";

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, request: PageRequest) -> Result<Paginated<User>> {
        let items = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(request.per_page)
        .bind(request.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(Paginated::new(items, total, request))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Persists a validated payload. The password is hashed here; the
    /// account reference and email uniqueness are enforced by the store's
    /// constraints and surface as field violations.
    pub async fn create(&self, payload: CreateUserPayload) -> Result<User> {
        let account_id = payload
            .account
            .ok_or_else(|| Error::field("account", "required", "This value should not be null."))?;
        let password_hash = hash_password_blocking(payload.password).await?;
        let created_at = now();

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, password, first_name, last_name, roles, account_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&payload.email)
        .bind(&password_hash)
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(normalize_roles(&payload.roles))
        .bind(account_id)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(user_id = user.id, account_id, "user created");
        Ok(user)
    }

    /// Applies `changes` (with an already-hashed password) to `user`,
    /// writing only when a tracked field changed.
    pub async fn update(&self, mut user: User, changes: UserChanges) -> Result<User> {
        if !user.apply_changes(changes, now()) {
            return Ok(user);
        }

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET
                email = $2,
                password = $3,
                first_name = $4,
                last_name = $5,
                roles = $6,
                account_id = $7,
                updated_at = $8
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.roles)
        .bind(user.account_id)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Returns whether a row was removed.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
