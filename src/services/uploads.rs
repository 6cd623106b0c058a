//! Product image storage on local disk

use std::path::{Path, PathBuf};

use axum::body::Bytes;
use chrono::Utc;
use rand::Rng;

use crate::{
    config::UploadsConfig,
    error::{AppError, AppResult},
};

/// Accepted image extensions. The MIME subtype must be one of these too.
const IMAGE_TYPES: [&str; 5] = ["jpeg", "jpg", "png", "gif", "webp"];

/// Image received in a multipart form, not yet written to disk
#[derive(Debug, Clone)]
pub struct PendingImage {
    pub original_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Flat directory of product images with server generated names
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    max_file_size: usize,
    max_files: usize,
}

impl UploadStore {
    pub fn new(config: &UploadsConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            max_file_size: config.max_file_size,
            max_files: config.max_files,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if missing
    pub async fn ensure_dir(&self) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::Internal(format!("Cannot create upload directory {:?}: {}", self.dir, e)))
    }

    /// Validate a batch before anything is written
    pub fn check(&self, images: &[PendingImage]) -> AppResult<()> {
        if images.len() > self.max_files {
            return Err(AppError::BadRequest(format!(
                "At most {} images can be uploaded",
                self.max_files
            )));
        }
        for image in images {
            self.check_one(image)?;
        }
        Ok(())
    }

    fn check_one(&self, image: &PendingImage) -> AppResult<String> {
        if image.bytes.len() > self.max_file_size {
            return Err(AppError::PayloadTooLarge(format!(
                "Image '{}' exceeds the {} MB limit",
                image.original_name,
                self.max_file_size / (1024 * 1024)
            )));
        }

        let extension = image_extension(&image.original_name);
        let mime_ok = image
            .content_type
            .as_deref()
            .and_then(|ct| ct.strip_prefix("image/"))
            .is_some_and(|subtype| IMAGE_TYPES.contains(&subtype.to_ascii_lowercase().as_str()));

        match extension {
            Some(ext) if mime_ok => Ok(ext),
            _ => Err(AppError::BadRequest("Only image files are allowed".to_string())),
        }
    }

    /// Write every image to disk and return the generated filenames in order.
    ///
    /// A failure part way through leaves the already written files behind.
    pub async fn store(&self, images: Vec<PendingImage>) -> AppResult<Vec<String>> {
        self.check(&images)?;

        let mut names = Vec::with_capacity(images.len());
        for image in images {
            let ext = self.check_one(&image)?;
            let name = generate_filename(&ext);
            tokio::fs::write(self.dir.join(&name), &image.bytes)
                .await
                .map_err(|e| AppError::Internal(format!("Failed to store image {}: {}", name, e)))?;
            tracing::debug!(file = %name, size = image.bytes.len(), "Stored product image");
            names.push(name);
        }
        Ok(names)
    }
}

/// Lowercased extension of an accepted image filename
fn image_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .filter(|ext| IMAGE_TYPES.contains(&ext.as_str()))
}

/// `<unix millis>-<random>.<ext>`, never derived from client input beyond the extension
fn generate_filename(ext: &str) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!("{}-{}.{}", Utc::now().timestamp_millis(), suffix, ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: PathBuf) -> UploadStore {
        UploadStore::new(&UploadsConfig {
            dir,
            max_file_size: 1024,
            max_files: 2,
        })
    }

    fn image(name: &str, content_type: &str, size: usize) -> PendingImage {
        PendingImage {
            original_name: name.to_string(),
            content_type: Some(content_type.to_string()),
            bytes: Bytes::from(vec![0u8; size]),
        }
    }

    #[test]
    fn accepts_known_image_types() {
        let store = store_in(PathBuf::from("unused"));
        assert!(store.check(&[image("gate.PNG", "image/png", 10)]).is_ok());
        assert!(store.check(&[image("treadmill.jpg", "image/jpeg", 10)]).is_ok());
    }

    #[test]
    fn rejects_non_images() {
        let store = store_in(PathBuf::from("unused"));
        assert!(matches!(
            store.check(&[image("notes.txt", "text/plain", 10)]),
            Err(AppError::BadRequest(_))
        ));
        // Extension and MIME type must both agree
        assert!(store.check(&[image("script.js", "image/png", 10)]).is_err());
        assert!(store.check(&[image("photo.png", "application/octet-stream", 10)]).is_err());
        assert!(store.check(&[image("photo", "image/png", 10)]).is_err());
    }

    #[test]
    fn enforces_size_and_count_limits() {
        let store = store_in(PathBuf::from("unused"));
        assert!(matches!(
            store.check(&[image("big.png", "image/png", 2048)]),
            Err(AppError::PayloadTooLarge(_))
        ));
        let three = vec![image("a.png", "image/png", 1); 3];
        assert!(matches!(store.check(&three), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn generated_names_keep_extension_and_differ() {
        let a = generate_filename("webp");
        let b = generate_filename("webp");
        assert!(a.ends_with(".webp"));
        assert!(!a.contains('/'));
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn store_writes_files_under_generated_names() {
        let dir = std::env::temp_dir().join(format!("rentalhub-uploads-{}", uuid::Uuid::new_v4()));
        let store = store_in(dir.clone());
        store.ensure_dir().await.unwrap();

        let names = store
            .store(vec![image("../../etc/passwd.png", "image/png", 4), image("b.gif", "image/gif", 8)])
            .await
            .unwrap();

        assert_eq!(names.len(), 2);
        assert!(names[0].ends_with(".png") && names[1].ends_with(".gif"));
        assert!(!names[0].contains("passwd"));
        assert_eq!(tokio::fs::read(dir.join(&names[1])).await.unwrap().len(), 8);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
