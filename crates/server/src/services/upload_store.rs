//! Filesystem store for uploaded photos.
//!
//! Every upload gets a fresh storage key (UUID v4 hex plus an extension
//! inferred from the client file name or MIME type), so client-chosen names
//! never touch the filesystem. The sanitized original name is kept only as
//! display metadata.

use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Error writing an upload to disk.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("upload storage error: {0}")]
    Io(#[from] std::io::Error),
}

/// A fully written upload.
#[derive(Debug)]
pub struct StoredFile {
    /// Storage name inside the upload directory.
    pub file_key: String,
    /// Total bytes written.
    pub size_bytes: i64,
}

/// Filesystem-backed photo storage rooted at the configured upload directory.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    /// Create a store rooted at `root`. Call [`Self::ensure_dir`] before the
    /// first write.
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The upload directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the upload directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Io` if directory creation fails.
    pub async fn ensure_dir(&self) -> Result<(), UploadError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Strip any path components from a client-supplied file name.
    ///
    /// Handles both separator styles since phones and browsers disagree.
    /// Returns `"file"` for names that sanitize to nothing.
    #[must_use]
    pub fn sanitize_file_name(name: &str) -> String {
        let base = name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(name)
            .trim();

        if base.is_empty() || base == "." || base == ".." {
            "file".to_owned()
        } else {
            base.to_owned()
        }
    }

    /// Pick a storage extension (with leading dot) for an upload.
    ///
    /// Prefers the client file name's extension; falls back to the MIME type
    /// for camera uploads that arrive as bare blobs. Returns an empty string
    /// when neither helps.
    #[must_use]
    pub fn extension_for(file_name: &str, mime_type: &str) -> String {
        if let Some(ext) = Path::new(file_name).extension().and_then(|e| e.to_str()) {
            if !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric())
            {
                return format!(".{}", ext.to_ascii_lowercase());
            }
        }

        match mime_type {
            "image/jpeg" | "image/jpg" => ".jpg".to_owned(),
            "image/png" => ".png".to_owned(),
            "image/heic" => ".heic".to_owned(),
            "image/heif" => ".heif".to_owned(),
            "image/webp" => ".webp".to_owned(),
            "image/gif" => ".gif".to_owned(),
            _ => String::new(),
        }
    }

    /// Open a sink for a new upload with the given extension.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Io` if the file cannot be created.
    pub async fn create(&self, extension: &str) -> Result<UploadSink, UploadError> {
        let file_key = format!("{}{extension}", Uuid::new_v4().simple());
        let path = self.root.join(&file_key);
        let file = File::create(&path).await?;

        Ok(UploadSink {
            file,
            file_key,
            bytes_written: 0,
        })
    }
}

/// An in-progress upload being streamed to disk.
#[derive(Debug)]
pub struct UploadSink {
    file: File,
    file_key: String,
    bytes_written: u64,
}

impl UploadSink {
    /// Append a chunk to the file.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Io` if the write fails.
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), UploadError> {
        self.file.write_all(chunk).await?;
        self.bytes_written += chunk.len() as u64;
        Ok(())
    }

    /// Flush and close the file, returning its storage key and size.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Io` if the flush fails.
    pub async fn finish(mut self) -> Result<StoredFile, UploadError> {
        self.file.flush().await?;

        Ok(StoredFile {
            file_key: self.file_key,
            size_bytes: i64::try_from(self.bytes_written).unwrap_or(i64::MAX),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_paths() {
        assert_eq!(
            UploadStore::sanitize_file_name("../../etc/passwd"),
            "passwd"
        );
        assert_eq!(
            UploadStore::sanitize_file_name("C:\\Users\\me\\IMG_0001.jpg"),
            "IMG_0001.jpg"
        );
        assert_eq!(UploadStore::sanitize_file_name("photo.png"), "photo.png");
    }

    #[test]
    fn test_sanitize_degenerate_names() {
        assert_eq!(UploadStore::sanitize_file_name(""), "file");
        assert_eq!(UploadStore::sanitize_file_name(".."), "file");
        assert_eq!(UploadStore::sanitize_file_name("uploads/"), "file");
        assert_eq!(UploadStore::sanitize_file_name("   "), "file");
    }

    #[test]
    fn test_extension_prefers_file_name() {
        assert_eq!(
            UploadStore::extension_for("IMG_0001.JPG", "application/octet-stream"),
            ".jpg"
        );
        assert_eq!(UploadStore::extension_for("scan.png", "image/jpeg"), ".png");
    }

    #[test]
    fn test_extension_falls_back_to_mime() {
        assert_eq!(UploadStore::extension_for("photo", "image/jpeg"), ".jpg");
        assert_eq!(UploadStore::extension_for("photo", "image/heic"), ".heic");
        assert_eq!(
            UploadStore::extension_for("photo", "application/octet-stream"),
            ""
        );
    }

    #[test]
    fn test_extension_rejects_oddities() {
        // Overlong or non-alphanumeric "extensions" are ignored.
        assert_eq!(
            UploadStore::extension_for("archive.tar&gz", "image/png"),
            ".png"
        );
        assert_eq!(
            UploadStore::extension_for("weird.superlongextension", "image/gif"),
            ".gif"
        );
    }

    #[tokio::test]
    async fn test_sink_roundtrip() {
        let root = std::env::temp_dir().join(format!("kiosk-test-{}", Uuid::new_v4().simple()));
        let store = UploadStore::new(root.clone());
        store.ensure_dir().await.unwrap();

        let mut sink = store.create(".jpg").await.unwrap();
        sink.write_chunk(b"hello ").await.unwrap();
        sink.write_chunk(b"world").await.unwrap();
        let stored = sink.finish().await.unwrap();

        assert!(stored.file_key.ends_with(".jpg"));
        assert_eq!(stored.size_bytes, 11);

        let on_disk = tokio::fs::read(root.join(&stored.file_key)).await.unwrap();
        assert_eq!(on_disk, b"hello world");

        tokio::fs::remove_dir_all(&root).await.unwrap();
    }
}
