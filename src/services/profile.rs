use std::sync::Arc;

use uuid::Uuid;

use crate::error::AppError;
use crate::models::User;
use crate::storage::{profile_image_key, ImageStore};
use crate::store::UserStore;

/// Largest accepted profile image: 5 MiB.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// An uploaded file as received from the client.
#[derive(Debug)]
pub struct ImageUpload {
    pub content_type: String,
    pub body: Vec<u8>,
}

/// Stores profile images and records their URL on the user.
pub struct ProfileService {
    users: Arc<dyn UserStore>,
    images: Arc<dyn ImageStore>,
}

impl ProfileService {
    pub fn new(users: Arc<dyn UserStore>, images: Arc<dyn ImageStore>) -> Self {
        Self { users, images }
    }

    pub async fn upload_image(&self, user_id: Uuid, upload: ImageUpload) -> Result<User, AppError> {
        validate_upload(&upload)?;

        let key = profile_image_key(user_id, &upload.content_type);
        let url = self
            .images
            .put(&key, upload.body, &upload.content_type)
            .await
            .map_err(|e| AppError::Internal(format!("storing profile image for {}: {:#}", user_id, e)))?;
        log::info!("stored profile image for user {} at {}", user_id, url);

        let error = match self.users.set_profile_image(user_id, &url).await {
            Ok(Some(user)) => return Ok(user),
            Ok(None) => {
                log::warn!("profile image stored but user {} no longer exists", user_id);
                AppError::NotFound("User not found".into())
            }
            Err(e) => e.into(),
        };
        self.discard(&key).await;
        Err(error)
    }

    /// Best-effort removal of an image no user points at.
    async fn discard(&self, key: &str) {
        match self.images.delete(key).await {
            Ok(()) => log::info!("removed orphaned profile image {}", key),
            Err(e) => log::error!("failed to remove orphaned profile image {}: {:#}", key, e),
        }
    }
}

pub fn validate_upload(upload: &ImageUpload) -> Result<(), AppError> {
    if upload.body.is_empty() {
        return Err(AppError::Validation("No image file provided".into()));
    }
    if !upload.content_type.starts_with("image/") {
        log::warn!("upload blocked: invalid file type {}", upload.content_type);
        return Err(AppError::Validation(
            "Invalid file type. Only images are allowed".into(),
        ));
    }
    if upload.body.len() > MAX_IMAGE_BYTES {
        return Err(AppError::Validation("Image exceeds the 5 MB limit".into()));
    }
    Ok(())
}
