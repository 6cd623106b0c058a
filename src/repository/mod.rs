//! Repository layer for database operations

pub mod admins;
pub mod inquiries;
pub mod products;

use sqlx::{Pool, Postgres};

use crate::error::AppResult;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub admins: admins::AdminsRepository,
    pub products: products::ProductsRepository,
    pub inquiries: inquiries::InquiriesRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            admins: admins::AdminsRepository::new(pool.clone()),
            products: products::ProductsRepository::new(pool.clone()),
            inquiries: inquiries::InquiriesRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip a trivial query to check connectivity
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
