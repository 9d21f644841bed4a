use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::UserProfile,
    services::{profile::MAX_IMAGE_BYTES, AccountService, ImageUpload, ProfileService},
};
use actix_multipart::Multipart;
use actix_web::{delete, get, patch, web, HttpResponse, Responder};
use futures::TryStreamExt;
use serde_json::json;

/// Multipart field carrying the profile image.
const IMAGE_FIELD: &str = "image";

/// Returns the authenticated user's profile.
#[get("/me")]
pub async fn get_me(
    accounts: web::Data<AccountService>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let user = accounts.current_user(user.id).await?;
    Ok(HttpResponse::Ok().json(UserProfile::from(user)))
}

/// Deletes the authenticated user's account together with all of their tasks.
#[delete("/me")]
pub async fn delete_me(
    accounts: web::Data<AccountService>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    accounts.delete_account(user.id).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Account deleted successfully" })))
}

/// Uploads a profile image
///
/// Expects `multipart/form-data` with the file in the `image` field.
///
/// ## Responses:
/// - `200 OK`: `{ "message", "user" }` with the updated profile.
/// - `400 Bad Request`: no file, a non-image file, or a file over 5 MB.
/// - `401 Unauthorized`: missing or invalid token.
#[patch("/me/upload-profile")]
pub async fn upload_profile_image(
    profiles: web::Data<ProfileService>,
    user: AuthenticatedUser,
    payload: Multipart,
) -> Result<impl Responder, AppError> {
    let upload = read_image_field(payload).await?;
    let user = profiles.upload_image(user.id, upload).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Profile image uploaded successfully",
        "user": UserProfile::from(user),
    })))
}

/// Pulls the `image` field out of the form, skipping any other fields.
///
/// Stops reading as soon as the file passes the size limit.
async fn read_image_field(mut payload: Multipart) -> Result<ImageUpload, AppError> {
    while let Some(mut field) = payload.try_next().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let content_type = field
            .content_type()
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_else(|| "application/octet-stream".into());

        let mut body = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            if body.len() + chunk.len() > MAX_IMAGE_BYTES {
                return Err(AppError::Validation("Image exceeds the 5 MB limit".into()));
            }
            body.extend_from_slice(&chunk);
        }

        return Ok(ImageUpload { content_type, body });
    }

    Err(AppError::Validation("No image file provided".into()))
}
