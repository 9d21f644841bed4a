use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use uuid::Uuid;

/// Path under which `LocalImageStore` files are served.
pub const UPLOADS_PATH: &str = "/uploads";

/// Where uploaded images end up.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Stores `body` under `key` and returns the public URL of the object.
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> anyhow::Result<String>;

    /// Removes the object under `key`. Removing a missing object is not an error.
    async fn delete(&self, key: &str) -> anyhow::Result<()>;
}

/// Writes images below a local directory and links them as
/// `{base_url}/uploads/{key}`.
///
/// The binary serves that directory itself (see `routes::uploads`).
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
    base_url: String,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>, base_url: &str) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn put(&self, key: &str, body: Vec<u8>, _content_type: &str) -> anyhow::Result<String> {
        let path = self.root.join(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("create upload directory {}", parent.display()))?;
        }
        tokio::fs::write(&path, body)
            .await
            .with_context(|| format!("write image {}", path.display()))?;

        Ok(format!("{}{}/{}", self.base_url, UPLOADS_PATH, key))
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        let path = self.root.join(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("remove image {}", path.display())),
        }
    }
}

/// Object key for a user's profile image.
pub fn profile_image_key(user_id: Uuid, content_type: &str) -> String {
    let ext = ext_from_mime(content_type).unwrap_or("bin");
    format!("profiles/{}/{}.{}", user_id, Uuid::new_v4(), ext)
}

fn ext_from_mime(ct: &str) -> Option<&'static str> {
    match ct {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/heic" => Some("heic"),
        _ => None,
    }
}
