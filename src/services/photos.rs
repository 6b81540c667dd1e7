use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, Set,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::entities::{photo, Collection, Item, Photo, PhotoModel};
use crate::errors::ServiceError;

const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg"];

/// Metadata for a freshly uploaded image.
#[derive(Clone, Debug)]
pub struct UploadInput {
    pub file_name: String,
    pub content_type: Option<String>,
    pub collection_id: Option<Uuid>,
    pub item_id: Option<Uuid>,
    pub sort_order: i32,
}

/// Stores uploaded images on disk and records them in the database.
#[derive(Clone)]
pub struct PhotoService {
    db: Arc<DatabaseConnection>,
    upload_dir: PathBuf,
}

impl PhotoService {
    pub fn new(db: Arc<DatabaseConnection>, upload_dir: String) -> Self {
        Self {
            db,
            upload_dir: PathBuf::from(upload_dir),
        }
    }

    /// Persists the image bytes under a generated name and inserts the photo
    /// row. The original file name is kept only as metadata.
    #[instrument(skip(self, bytes, input))]
    pub async fn save_upload(
        &self,
        input: UploadInput,
        bytes: Vec<u8>,
    ) -> Result<PhotoModel, ServiceError> {
        if bytes.is_empty() {
            return Err(ServiceError::InvalidInput("Uploaded file is empty".into()));
        }

        let extension = extension_of(&input.file_name).ok_or_else(|| {
            ServiceError::InvalidInput(format!(
                "Unsupported file type: {}. Allowed: {}",
                input.file_name,
                ALLOWED_EXTENSIONS.join(", ")
            ))
        })?;

        if let Some(collection_id) = input.collection_id {
            if Collection::find_by_id(collection_id)
                .one(&*self.db)
                .await?
                .is_none()
            {
                return Err(ServiceError::InvalidInput(format!(
                    "Unknown collection id: {}",
                    collection_id
                )));
            }
        }
        if let Some(item_id) = input.item_id {
            if Item::find_by_id(item_id).one(&*self.db).await?.is_none() {
                return Err(ServiceError::InvalidInput(format!(
                    "Unknown item id: {}",
                    item_id
                )));
            }
        }

        let photo_id = Uuid::new_v4();
        let stored_name = format!("{}.{}", photo_id, extension);
        let stored_path = self.upload_dir.join(&stored_name);

        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| {
                ServiceError::InternalError(format!("Failed to create upload directory: {}", e))
            })?;
        tokio::fs::write(&stored_path, &bytes).await.map_err(|e| {
            ServiceError::InternalError(format!("Failed to store uploaded file: {}", e))
        })?;

        let model = photo::ActiveModel {
            id: Set(photo_id),
            url: Set(format!("/uploads/{}", stored_name)),
            file_name: Set(input.file_name),
            content_type: Set(input.content_type),
            size_bytes: Set(Some(bytes.len() as i64)),
            collection_id: Set(input.collection_id),
            item_id: Set(input.item_id),
            sort_order: Set(input.sort_order),
            created_at: Set(Utc::now()),
        };

        match model.insert(&*self.db).await {
            Ok(created) => {
                info!("Stored photo: {} ({} bytes)", created.id, bytes.len());
                Ok(created)
            }
            Err(e) => {
                // Row insert failed; don't leave the orphan file behind.
                if let Err(rm) = tokio::fs::remove_file(&stored_path).await {
                    warn!("Failed to remove orphan upload {:?}: {}", stored_path, rm);
                }
                Err(e.into())
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<PhotoModel, ServiceError> {
        Photo::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Photo {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<PhotoModel>, ServiceError> {
        Ok(Photo::find()
            .order_by_asc(photo::Column::SortOrder)
            .all(&*self.db)
            .await?)
    }

    /// Deletes the photo row and best-effort removes the stored file.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let existing = self.get(id).await?;
        let stored_name = existing.url.trim_start_matches("/uploads/").to_string();
        existing.delete(&*self.db).await?;

        let stored_path = self.upload_dir.join(stored_name);
        if let Err(e) = tokio::fs::remove_file(&stored_path).await {
            warn!("Failed to remove stored file {:?}: {}", stored_path, e);
        }

        info!("Deleted photo: {}", id);
        Ok(())
    }
}

fn extension_of(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())?
        .to_ascii_lowercase();
    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        Some(ext)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_image_extensions() {
        assert_eq!(extension_of("photo.JPG").as_deref(), Some("jpg"));
        assert_eq!(extension_of("banner.webp").as_deref(), Some("webp"));
    }

    #[test]
    fn rejects_unknown_extensions() {
        assert!(extension_of("script.exe").is_none());
        assert!(extension_of("noextension").is_none());
    }
}
