use crate::dto::pagination::{PageRequest, Paginated};
use crate::dto::product_dto::ProductListQuery;
use crate::error::Result;
use crate::models::product::{NewProduct, Product, ProductChanges, ProductRow};
use crate::utils::{time::now, validation::contains_pattern};
use sqlx::PgPool;
use validator::Validate;

const PRODUCT_COLUMNS: &str = "p.id, p.name, p.description, p.brand, p.sku, p.available, \
     p.price, p.category_id, p.created_at, p.updated_at, c.name AS category_name";

// $1 filters on availability, $2 on the category name pattern; NULL disables either.
const PRODUCT_FILTER: &str = "($1::boolean IS NULL OR p.available = $1) \
     AND ($2::text IS NULL OR c.name ILIKE $2 ESCAPE '\\')";

#[derive(Clone)]
pub struct ProductService {
    pool: PgPool,
}

impl ProductService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, query: ProductListQuery) -> Result<Paginated<ProductRow>> {
        let request = PageRequest::new(query.page);
        let category_pattern = query
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(contains_pattern);

        let items_query = format!(
            "SELECT {PRODUCT_COLUMNS}
             FROM products p
             LEFT JOIN categories c ON c.id = p.category_id
             WHERE {PRODUCT_FILTER}
             ORDER BY p.id
             LIMIT $3 OFFSET $4"
        );
        let items = sqlx::query_as::<_, ProductRow>(&items_query)
            .bind(query.available)
            .bind(category_pattern.as_deref())
            .bind(request.per_page)
            .bind(request.offset())
            .fetch_all(&self.pool)
            .await?;

        let total_query = format!(
            "SELECT COUNT(*)
             FROM products p
             LEFT JOIN categories c ON c.id = p.category_id
             WHERE {PRODUCT_FILTER}"
        );
        let total = sqlx::query_scalar::<_, i64>(&total_query)
            .bind(query.available)
            .bind(category_pattern.as_deref())
            .fetch_one(&self.pool)
            .await?;

        Ok(Paginated::new(items, total, request))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<ProductRow> {
        let query = format!(
            "SELECT {PRODUCT_COLUMNS}
             FROM products p
             LEFT JOIN categories c ON c.id = p.category_id
             WHERE p.id = $1"
        );
        let row = sqlx::query_as::<_, ProductRow>(&query)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn find_by_sku(&self, sku: &str) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, brand, sku, available, price, category_id, created_at, updated_at
            FROM products
            WHERE sku = $1
            "#,
        )
        .bind(sku)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    /// Internal writer; products are read-only over HTTP.
    pub async fn create(&self, payload: NewProduct) -> Result<Product> {
        payload.validate()?;
        let created_at = now();

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (
                name, description, brand, sku, available, price, category_id, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING id, name, description, brand, sku, available, price, category_id, created_at, updated_at
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(&payload.brand)
        .bind(&payload.sku)
        .bind(payload.available)
        .bind(payload.price)
        .bind(payload.category_id)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    /// Applies `changes` to the stored product. Nothing is written when no
    /// tracked field changes, so `updated_at` only moves on real edits.
    pub async fn update(&self, mut product: Product, changes: ProductChanges) -> Result<Product> {
        changes.validate()?;
        if !product.apply_changes(changes, now()) {
            return Ok(product);
        }

        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET
                name = $2,
                description = $3,
                brand = $4,
                sku = $5,
                available = $6,
                price = $7,
                category_id = $8,
                updated_at = $9
            WHERE id = $1
            RETURNING id, name, description, brand, sku, available, price, category_id, created_at, updated_at
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.brand)
        .bind(&product.sku)
        .bind(product.available)
        .bind(product.price)
        .bind(product.category_id)
        .bind(product.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }
}
