//! Uploaded media storage
//!
//! Files live under a single root directory. Callers only ever hold paths
//! relative to that root (`uploads/recipe/<uuid>.png`), which is what the
//! database stores and what `/media/...` URLs are built from.

use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use uuid::Uuid;

/// Directory for recipe images, relative to the media root
pub const RECIPE_IMAGE_DIR: &str = "uploads/recipe";

/// URL prefix media files are served under
pub const MEDIA_URL: &str = "/media";

#[derive(Clone, Debug)]
pub struct MediaStorage {
    root: Arc<PathBuf>,
}

impl MediaStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(root.into()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Fresh unique relative path for a recipe image with extension `ext`
    pub fn recipe_image_file_path(ext: &str) -> String {
        format!("{RECIPE_IMAGE_DIR}/{}.{}", Uuid::new_v4(), ext)
    }

    /// Public URL of a stored relative path
    pub fn url_for(relative: &str) -> String {
        format!("{MEDIA_URL}/{relative}")
    }

    /// Absolute path for `relative`, refusing anything that escapes the root
    pub fn resolve(&self, relative: &str) -> Option<PathBuf> {
        let rel = Path::new(relative);
        let safe = !relative.is_empty()
            && rel
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        safe.then(|| self.root.join(rel))
    }

    /// Write `data`, creating parent directories as needed
    pub async fn save(&self, relative: &str, data: &[u8]) -> io::Result<()> {
        let path = self
            .resolve(relative)
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid media path"))?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, data).await
    }

    pub async fn read(&self, relative: &str) -> io::Result<Vec<u8>> {
        let path = self
            .resolve(relative)
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid media path"))?;
        tokio::fs::read(path).await
    }

    /// Best-effort delete; a missing file is not an error
    pub async fn remove(&self, relative: &str) {
        let Some(path) = self.resolve(relative) else {
            tracing::warn!(path = %relative, "Refusing to remove media outside root");
            return;
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::debug!(path = %relative, "Removed media file"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %relative, error = %e, "Failed to remove media file"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_image_file_path() {
        let path = MediaStorage::recipe_image_file_path("png");
        let name = path.strip_prefix("uploads/recipe/").unwrap();
        let stem = name.strip_suffix(".png").unwrap();
        assert!(Uuid::parse_str(stem).is_ok());
        assert_ne!(path, MediaStorage::recipe_image_file_path("png"));
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let media = MediaStorage::new("/srv/media");
        assert_eq!(
            media.resolve("uploads/recipe/a.png"),
            Some(PathBuf::from("/srv/media/uploads/recipe/a.png"))
        );
        assert!(media.resolve("../etc/passwd").is_none());
        assert!(media.resolve("/etc/passwd").is_none());
        assert!(media.resolve("uploads/../../x").is_none());
        assert!(media.resolve("").is_none());
    }

    #[tokio::test]
    async fn test_save_read_remove() {
        let dir = tempfile::tempdir().unwrap();
        let media = MediaStorage::new(dir.path());
        let rel = MediaStorage::recipe_image_file_path("jpg");

        media.save(&rel, b"bytes").await.unwrap();
        assert_eq!(media.read(&rel).await.unwrap(), b"bytes");

        media.remove(&rel).await;
        assert!(media.read(&rel).await.is_err());
        // Second removal is a no-op
        media.remove(&rel).await;
    }

    #[test]
    fn test_url_for() {
        assert_eq!(
            MediaStorage::url_for("uploads/recipe/x.png"),
            "/media/uploads/recipe/x.png"
        );
    }
}
