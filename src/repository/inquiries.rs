//! Inquiries repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::inquiry::{
        Inquiry, InquiryJoinRow, InquiryStats, InquiryStatus, InquiryWithProduct, NewInquiry,
    },
};

/// Product columns joined onto inquiry rows, without description
const PRODUCT_SUMMARY_COLUMNS: &str = r#"
    p.id AS p_id, p.name AS p_name, p.category AS p_category,
    p.images AS p_images, NULL::text AS p_description
"#;

#[derive(Clone)]
pub struct InquiriesRepository {
    pool: Pool<Postgres>,
}

fn not_found() -> AppError {
    AppError::NotFound("Inquiry not found".to_string())
}

impl InquiriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert an inquiry with status `new`
    pub async fn create(&self, data: &NewInquiry) -> AppResult<Inquiry> {
        let row = sqlx::query_as::<_, Inquiry>(
            r#"
            INSERT INTO inquiries (
                id, customer_name, email, phone, whatsapp_number,
                product_id, product_name, message, rental_duration, location, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.customer_name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.whatsapp_number)
        .bind(data.product_id)
        .bind(&data.product_name)
        .bind(&data.message)
        .bind(&data.rental_duration)
        .bind(&data.location)
        .bind(InquiryStatus::New)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Page through inquiries newest first, joined with a product summary
    pub async fn list(
        &self,
        status: Option<InquiryStatus>,
        limit: i64,
        offset: i64,
    ) -> AppResult<(Vec<InquiryWithProduct>, i64)> {
        let query = format!(
            r#"
            SELECT i.*, {}
            FROM inquiries i
            LEFT JOIN products p ON p.id = i.product_id
            WHERE ($1::text IS NULL OR i.status = $1)
            ORDER BY i.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
            PRODUCT_SUMMARY_COLUMNS
        );

        let rows = sqlx::query_as::<_, InquiryJoinRow>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM inquiries WHERE ($1::text IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok((rows.into_iter().map(InquiryWithProduct::from).collect(), total))
    }

    /// Get one inquiry joined with the product including its description
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<InquiryWithProduct> {
        sqlx::query_as::<_, InquiryJoinRow>(
            r#"
            SELECT i.*,
                   p.id AS p_id, p.name AS p_name, p.category AS p_category,
                   p.images AS p_images, p.description AS p_description
            FROM inquiries i
            LEFT JOIN products p ON p.id = i.product_id
            WHERE i.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(InquiryWithProduct::from)
        .ok_or_else(not_found)
    }

    /// Set the status and return the inquiry with its product summary
    pub async fn update_status(&self, id: Uuid, status: InquiryStatus) -> AppResult<InquiryWithProduct> {
        let query = format!(
            r#"
            WITH updated AS (
                UPDATE inquiries SET status = $2 WHERE id = $1 RETURNING *
            )
            SELECT i.*, {}
            FROM updated i
            LEFT JOIN products p ON p.id = i.product_id
            "#,
            PRODUCT_SUMMARY_COLUMNS
        );

        sqlx::query_as::<_, InquiryJoinRow>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?
            .map(InquiryWithProduct::from)
            .ok_or_else(not_found)
    }

    /// Count inquiries per status plus those created since `recent_since`
    pub async fn stats(&self, recent_since: DateTime<Utc>) -> AppResult<InquiryStats> {
        let stats = sqlx::query_as::<_, InquiryStats>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'new') AS "new",
                COUNT(*) FILTER (WHERE status = 'contacted') AS contacted,
                COUNT(*) FILTER (WHERE status = 'converted') AS converted,
                COUNT(*) FILTER (WHERE status = 'closed') AS closed,
                COUNT(*) FILTER (WHERE created_at >= $1) AS recent_inquiries
            FROM inquiries
            "#,
        )
        .bind(recent_since)
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }

    /// Hard delete
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM inquiries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found());
        }
        Ok(())
    }
}
