use crate::dto::pagination::{PageRequest, Paginated};
use crate::error::Result;
use crate::models::category::Category;
use sqlx::PgPool;

#[derive(Clone)]
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, request: PageRequest) -> Result<Paginated<Category>> {
        let items = sqlx::query_as::<_, Category>(
            "SELECT id, name FROM categories ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(request.per_page)
        .bind(request.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;

        Ok(Paginated::new(items, total, request))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Category> {
        let category =
            sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(category)
    }

    /// Returns the category named `name`, creating it if needed.
    pub async fn ensure(&self, name: &str) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name)
            VALUES ($1)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id, name
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(category)
    }
}
