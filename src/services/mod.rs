//! Business logic services

pub mod auth;
pub mod catalog;
pub mod inquiries;
pub mod uploads;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub inquiries: inquiries::InquiriesService,
    pub uploads: uploads::UploadStore,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig, uploads: uploads::UploadStore) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            catalog: catalog::CatalogService::new(repository.clone(), uploads.clone()),
            inquiries: inquiries::InquiriesService::new(repository.clone()),
            uploads,
            repository,
        }
    }

    /// Whether the database answers a trivial query
    pub async fn database_ready(&self) -> bool {
        match self.repository.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Database ping failed: {}", e);
                false
            }
        }
    }
}
