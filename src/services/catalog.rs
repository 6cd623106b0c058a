//! Product catalog service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        admin::AuthContext,
        product::{Product, ProductForm, ProductQuery},
    },
    repository::Repository,
};

use super::uploads::{PendingImage, UploadStore};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    uploads: UploadStore,
}

impl CatalogService {
    pub fn new(repository: Repository, uploads: UploadStore) -> Self {
        Self { repository, uploads }
    }

    /// Active products, newest first, optionally for one category
    pub async fn list_public(&self, query: &ProductQuery) -> AppResult<Vec<Product>> {
        let category = query.category.as_deref().map(str::trim).filter(|c| !c.is_empty());
        self.repository.products.list(true, category).await
    }

    /// Every product regardless of its active flag
    pub async fn list_all(&self, auth: &AuthContext) -> AppResult<Vec<Product>> {
        tracing::debug!(admin = %auth.username, "Listing all products");
        self.repository.products.list(false, None).await
    }

    /// One product, active or not
    pub async fn get(&self, id: Uuid) -> AppResult<Product> {
        self.repository.products.get_by_id(id).await
    }

    /// Create a product; at least one image is required.
    ///
    /// The form and every image are validated before any file is written.
    pub async fn create(
        &self,
        auth: &AuthContext,
        form: ProductForm,
        images: Vec<PendingImage>,
    ) -> AppResult<Product> {
        if images.is_empty() {
            return Err(AppError::BadRequest("At least one image is required".to_string()));
        }
        self.uploads.check(&images)?;
        let mut product = form.into_new_product(Vec::new())?;

        product.images = self.uploads.store(images).await?;
        let created = self.repository.products.create(&product).await?;

        tracing::info!(admin = %auth.username, product_id = %created.id, "Product created");
        Ok(created)
    }

    /// Partial update; supplied images replace the whole image list
    pub async fn update(
        &self,
        auth: &AuthContext,
        id: Uuid,
        form: ProductForm,
        images: Vec<PendingImage>,
    ) -> AppResult<Product> {
        self.uploads.check(&images)?;
        let mut changes = form.into_changes(None)?;

        // Existence check before writing new files
        self.repository.products.get_by_id(id).await?;
        if !images.is_empty() {
            changes.images = Some(self.uploads.store(images).await?);
        }

        let updated = self.repository.products.update(id, &changes).await?;
        tracing::info!(admin = %auth.username, product_id = %id, "Product updated");
        Ok(updated)
    }

    /// Flip the active flag
    pub async fn toggle_status(&self, auth: &AuthContext, id: Uuid) -> AppResult<Product> {
        let product = self.repository.products.toggle_status(id).await?;
        tracing::info!(
            admin = %auth.username,
            product_id = %id,
            is_active = product.is_active,
            "Product status toggled"
        );
        Ok(product)
    }

    /// Hard delete; image files and inquiries are left in place
    pub async fn delete(&self, auth: &AuthContext, id: Uuid) -> AppResult<()> {
        self.repository.products.delete(id).await?;
        tracing::info!(admin = %auth.username, product_id = %id, "Product deleted");
        Ok(())
    }
}
