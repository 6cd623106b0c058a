//! Products repository for database operations

use sqlx::{types::Json, Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::product::{NewProduct, Product, ProductChanges, ProductRow},
};

#[derive(Clone)]
pub struct ProductsRepository {
    pool: Pool<Postgres>,
}

fn not_found() -> AppError {
    AppError::NotFound("Product not found".to_string())
}

impl ProductsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List products newest first, optionally restricted to active ones and/or a category
    pub async fn list(&self, active_only: bool, category: Option<&str>) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT * FROM products
            WHERE ($1 = FALSE OR is_active = TRUE)
              AND ($2::text IS NULL OR category = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(active_only)
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Get product by ID regardless of its active flag
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Product> {
        sqlx::query_as::<_, ProductRow>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Product::from)
            .ok_or_else(not_found)
    }

    /// Insert a product
    pub async fn create(&self, data: &NewProduct) -> AppResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (id, name, description, category, features, specifications, images, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.category)
        .bind(&data.features)
        .bind(Json(&data.specifications))
        .bind(&data.images)
        .bind(data.is_active)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    /// Apply a partial update, `None` fields keep their stored value
    pub async fn update(&self, id: Uuid, changes: &ProductChanges) -> AppResult<Product> {
        sqlx::query_as::<_, ProductRow>(
            r#"
            UPDATE products SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                features = COALESCE($5, features),
                specifications = COALESCE($6, specifications),
                images = COALESCE($7, images),
                is_active = COALESCE($8, is_active)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.category)
        .bind(&changes.features)
        .bind(changes.specifications.as_ref().map(Json))
        .bind(&changes.images)
        .bind(changes.is_active)
        .fetch_optional(&self.pool)
        .await?
        .map(Product::from)
        .ok_or_else(not_found)
    }

    /// Flip the active flag in a single statement
    pub async fn toggle_status(&self, id: Uuid) -> AppResult<Product> {
        sqlx::query_as::<_, ProductRow>(
            "UPDATE products SET is_active = NOT is_active WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Product::from)
        .ok_or_else(not_found)
    }

    /// Hard delete. Inquiries referencing the product are kept.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found());
        }
        Ok(())
    }
}
