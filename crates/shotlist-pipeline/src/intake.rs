//! Product photo intake.
//!
//! Photos are validated, base64-encoded on the blocking pool and appended in
//! the order they were selected. The list lives until it is cleared or an
//! entry is removed.

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine};
use futures_util::future::join_all;
use serde::Serialize;
use shotlist_models::{MediaType, UploadedImage};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::{IntakeError, IntakeResult};

/// A file offered for intake, before validation.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub file_name: String,
    /// Media type as declared by the sender; may be empty
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl IncomingFile {
    pub fn new(file_name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, inferring the media type from its extension.
    pub async fn from_path(path: impl AsRef<Path>) -> IntakeResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|source| IntakeError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            media_type: extension_media_type(path).unwrap_or_default(),
            file_name,
            bytes,
        })
    }

    fn resolve_media_type(&self) -> IntakeResult<MediaType> {
        // Browsers send `application/octet-stream` or nothing for some pickers.
        self.media_type
            .trim()
            .parse::<MediaType>()
            .ok()
            .or_else(|| {
                extension_media_type(Path::new(&self.file_name))
                    .and_then(|m| m.parse::<MediaType>().ok())
            })
            .ok_or_else(|| IntakeError::UnsupportedMediaType {
                file_name: self.file_name.clone(),
                media_type: self.media_type.clone(),
            })
    }
}

fn extension_media_type(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?;
    MediaType::from_extension(ext)
        .ok()
        .map(|m| m.as_str().to_string())
}

/// A file that was not added, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedFile {
    pub file_name: String,
    pub reason: String,
}

/// Outcome of one `add_files` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntakeReport {
    pub accepted: usize,
    pub rejected: Vec<RejectedFile>,
}

impl IntakeReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Ordered list of uploaded product photos.
#[derive(Debug, Default)]
pub struct ImageIntake {
    images: RwLock<Vec<UploadedImage>>,
}

impl ImageIntake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate, encode and append the given files.
    ///
    /// Files are encoded concurrently but appended in selection order.
    /// Rejected files are reported and logged; the others are still added.
    pub async fn add_files(&self, files: Vec<IncomingFile>) -> IntakeReport {
        let results = join_all(files.into_iter().map(|file| async move {
            let file_name = file.file_name.clone();
            (file_name, encode_file(file).await)
        }))
        .await;

        let mut report = IntakeReport::default();
        let mut encoded = Vec::with_capacity(results.len());

        for (file_name, result) in results {
            match result {
                Ok(image) => encoded.push(image),
                Err(e) => {
                    warn!(file_name = %file_name, error = %e, "Rejected image");
                    report.rejected.push(RejectedFile {
                        file_name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        report.accepted = encoded.len();

        let mut images = self.images.write().await;
        images.extend(encoded);

        info!(
            accepted = report.accepted,
            rejected = report.rejected.len(),
            total = images.len(),
            "Images added"
        );

        report
    }

    /// Read and add files from disk. Unreadable paths are reported as rejected.
    pub async fn add_paths(&self, paths: &[PathBuf]) -> IntakeReport {
        let mut files = Vec::with_capacity(paths.len());
        let mut unreadable = Vec::new();

        for path in paths {
            match IncomingFile::from_path(path).await {
                Ok(file) => files.push(file),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to read image");
                    unreadable.push(RejectedFile {
                        file_name: path.display().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let mut report = self.add_files(files).await;
        report.rejected.extend(unreadable);
        report
    }

    /// Remove the image at `index`; later images shift left.
    pub async fn remove_image(&self, index: usize) -> IntakeResult<UploadedImage> {
        let mut images = self.images.write().await;
        if index >= images.len() {
            return Err(IntakeError::IndexOutOfRange {
                index,
                len: images.len(),
            });
        }

        let removed = images.remove(index);
        debug!(index, remaining = images.len(), "Image removed");
        Ok(removed)
    }

    /// Snapshot of the current list, in order.
    pub async fn images(&self) -> Vec<UploadedImage> {
        self.images.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.images.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.images.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.images.write().await.clear();
    }
}

async fn encode_file(file: IncomingFile) -> IntakeResult<UploadedImage> {
    let media_type = file.resolve_media_type()?;
    if file.bytes.is_empty() {
        return Err(IntakeError::EmptyFile(file.file_name));
    }

    let IncomingFile { file_name, bytes, .. } = file;
    let encoded = tokio::task::spawn_blocking(move || STANDARD.encode(&bytes))
        .await
        .map_err(|e| IntakeError::Encode {
            file_name,
            message: e.to_string(),
        })?;

    Ok(UploadedImage::new(encoded, media_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(name: &str, bytes: &[u8]) -> IncomingFile {
        IncomingFile::new(name, "image/png", bytes.to_vec())
    }

    #[tokio::test]
    async fn test_add_files_keeps_selection_order() {
        let intake = ImageIntake::new();
        let files = vec![
            png("a.png", b"first"),
            IncomingFile::new("b.jpg", "image/jpeg", b"second".to_vec()),
            png("c.png", b"third"),
        ];

        let report = intake.add_files(files).await;
        assert_eq!(report.accepted, 3);
        assert!(report.is_clean());

        let images = intake.images().await;
        assert_eq!(images[0].encoded_bytes, STANDARD.encode(b"first"));
        assert_eq!(images[1].encoded_bytes, STANDARD.encode(b"second"));
        assert_eq!(images[1].media_type, MediaType::Jpeg);
        assert_eq!(images[2].encoded_bytes, STANDARD.encode(b"third"));
    }

    #[tokio::test]
    async fn test_generic_media_type_falls_back_to_extension() {
        let intake = ImageIntake::new();
        let files = vec![
            IncomingFile::new("photo.png", "application/octet-stream", b"png".to_vec()),
            IncomingFile::new("notes.txt", "application/octet-stream", b"txt".to_vec()),
        ];

        let report = intake.add_files(files).await;
        assert_eq!(report.accepted, 1);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].file_name, "notes.txt");

        let images = intake.images().await;
        assert_eq!(images[0].media_type, MediaType::Png);
    }

    #[tokio::test]
    async fn test_add_files_appends_to_existing() {
        let intake = ImageIntake::new();
        intake.add_files(vec![png("a.png", b"a")]).await;
        intake.add_files(vec![png("b.png", b"b")]).await;

        let images = intake.images().await;
        assert_eq!(images.len(), 2);
        assert_eq!(images[1].encoded_bytes, STANDARD.encode(b"b"));
    }

    #[tokio::test]
    async fn test_rejects_unsupported_and_empty() {
        let intake = ImageIntake::new();
        let report = intake
            .add_files(vec![
                IncomingFile::new("door.gif", "image/gif", b"GIF89a".to_vec()),
                png("ok.png", b"ok"),
                png("empty.png", b""),
            ])
            .await;

        assert_eq!(report.accepted, 1);
        assert_eq!(report.rejected.len(), 2);
        assert_eq!(report.rejected[0].file_name, "door.gif");
        assert_eq!(report.rejected[1].file_name, "empty.png");
        assert!(report.rejected[1].reason.contains("empty"));
        assert_eq!(intake.len().await, 1);
    }

    #[tokio::test]
    async fn test_missing_media_type_falls_back_to_extension() {
        let intake = ImageIntake::new();
        let report = intake
            .add_files(vec![IncomingFile::new("photo.JPG", "", b"jpeg".to_vec())])
            .await;

        assert_eq!(report.accepted, 1);
        assert_eq!(intake.images().await[0].media_type, MediaType::Jpeg);
    }

    #[tokio::test]
    async fn test_remove_image_shifts_left() {
        let intake = ImageIntake::new();
        intake
            .add_files(vec![png("a.png", b"a"), png("b.png", b"b"), png("c.png", b"c")])
            .await;

        let removed = intake.remove_image(1).await.unwrap();
        assert_eq!(removed.encoded_bytes, STANDARD.encode(b"b"));

        let images = intake.images().await;
        assert_eq!(images.len(), 2);
        assert_eq!(images[1].encoded_bytes, STANDARD.encode(b"c"));
    }

    #[tokio::test]
    async fn test_remove_out_of_range() {
        let intake = ImageIntake::new();
        intake.add_files(vec![png("a.png", b"a")]).await;

        let err = intake.remove_image(1).await.unwrap_err();
        assert!(matches!(err, IntakeError::IndexOutOfRange { index: 1, len: 1 }));
        assert_eq!(intake.len().await, 1);
    }

    #[tokio::test]
    async fn test_clear() {
        let intake = ImageIntake::new();
        intake.add_files(vec![png("a.png", b"a")]).await;
        intake.clear().await;
        assert!(intake.is_empty().await);
    }

    #[tokio::test]
    async fn test_from_path_and_add_paths() {
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("vanity.png");
        tokio::fs::write(&photo, b"\x89PNG").await.unwrap();

        let file = IncomingFile::from_path(&photo).await.unwrap();
        assert_eq!(file.file_name, "vanity.png");
        assert_eq!(file.media_type, "image/png");

        let intake = ImageIntake::new();
        let missing = dir.path().join("missing.jpg");
        let report = intake.add_paths(&[photo, missing]).await;

        assert_eq!(report.accepted, 1);
        assert_eq!(report.rejected.len(), 1);
        assert!(report.rejected[0].file_name.ends_with("missing.jpg"));
    }
}
