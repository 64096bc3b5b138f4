use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs;

use crate::errors::Result;

/// Local-disk store for uploaded images. Files land flat in one directory
/// under a `<millis>-<original-name>` key and are served back from the same
/// directory over HTTP.
#[derive(Clone)]
pub struct FileStore {
    dir: PathBuf,
}

/// Public path prefix the stored files are served under.
pub const PUBLIC_PREFIX: &str = "uploads";

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    /// Idempotent; called once at startup.
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir).await
    }

    /// Write an uploaded file and return its relative public path
    /// (`uploads/<stored-name>`). Disk failures propagate to the caller.
    pub async fn save(&self, original_name: &str, data: &[u8]) -> Result<String> {
        let stored_name = storage_key(original_name, Utc::now().timestamp_millis());
        fs::write(self.dir.join(&stored_name), data).await?;
        tracing::info!("stored upload {} ({} bytes)", stored_name, data.len());
        Ok(format!("{}/{}", PUBLIC_PREFIX, stored_name))
    }

    /// Resolve a served filename to its on-disk path. Rejects anything that
    /// could escape the store directory.
    pub fn resolve(&self, file_name: &str) -> Option<PathBuf> {
        if file_name.contains("..") || file_name.contains('/') || file_name.contains('\\') {
            return None;
        }
        let path = self.dir.join(file_name);
        path.is_file().then_some(path)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// `<arrival-millis>-<sanitized-original-name>`. The timestamp keeps
/// concurrent uploads apart; sanitization keeps path separators out of the
/// stored name. Same-millisecond uploads of the same name can still collide
/// (accepted risk).
fn storage_key(original_name: &str, millis: i64) -> String {
    let name = sanitize_filename::sanitize(original_name);
    let name = if name.is_empty() || name.chars().all(|c| c == '.') {
        "upload".to_string()
    } else {
        name
    };
    format!("{}-{}", millis, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(tag: &str) -> FileStore {
        let dir = std::env::temp_dir().join(format!(
            "posts-api-test-{}-{}",
            tag,
            Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));
        FileStore::new(dir)
    }

    #[test]
    fn storage_key_is_timestamp_dash_original() {
        assert_eq!(storage_key("photo.png", 1712000000000), "1712000000000-photo.png");
    }

    #[test]
    fn storage_key_strips_path_separators() {
        let key = storage_key("../../etc/passwd", 42);
        assert!(!key.contains('/'));
        assert!(!key.contains('\\'));
        assert!(key.starts_with("42-"));
    }

    #[test]
    fn storage_key_never_degenerates_to_bare_timestamp() {
        assert_eq!(storage_key("..", 42), "42-upload");
    }

    #[tokio::test]
    async fn save_writes_bytes_and_returns_public_path() {
        let store = temp_store("save");
        store.ensure_dir().await.unwrap();

        let path = store.save("photo.png", b"fake image bytes").await.unwrap();
        assert!(path.starts_with("uploads/"));
        assert!(path.ends_with("-photo.png"));

        let file_name = path.strip_prefix("uploads/").unwrap();
        let on_disk = store.resolve(file_name).expect("stored file resolves");
        assert_eq!(std::fs::read(on_disk).unwrap(), b"fake image bytes");

        std::fs::remove_dir_all(store.dir()).ok();
    }

    #[tokio::test]
    async fn save_into_missing_dir_is_an_error() {
        let store = temp_store("missing");
        // ensure_dir deliberately not called
        assert!(store.save("photo.png", b"x").await.is_err());
    }

    #[test]
    fn resolve_rejects_traversal_and_unknown_files() {
        let store = temp_store("resolve");
        assert!(store.resolve("../secret").is_none());
        assert!(store.resolve("a/b.png").is_none());
        assert!(store.resolve("no-such-file.png").is_none());
    }
}
