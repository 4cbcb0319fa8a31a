use crate::error::Result;
use crate::models::account::Account;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AccountService {
    pool: PgPool,
}

impl AccountService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the account with `primary_email`, creating it if needed.
    pub async fn ensure(&self, primary_email: &str) -> Result<Account> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (primary_email)
            VALUES ($1)
            ON CONFLICT (primary_email) DO UPDATE SET primary_email = EXCLUDED.primary_email
            RETURNING id, primary_email
            "#,
        )
        .bind(primary_email)
        .fetch_one(&self.pool)
        .await?;
        Ok(account)
    }
}
