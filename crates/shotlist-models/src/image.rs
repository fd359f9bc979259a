//! Image payloads: uploaded product photos and rendered shots.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// Image media types accepted for upload and produced by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum MediaType {
    #[serde(rename = "image/png")]
    Png,
    #[serde(rename = "image/jpeg")]
    Jpeg,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Png => "image/png",
            MediaType::Jpeg => "image/jpeg",
        }
    }

    /// Infer the media type from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Result<Self, MediaTypeParseError> {
        match ext.to_lowercase().as_str() {
            "png" => Ok(MediaType::Png),
            "jpg" | "jpeg" => Ok(MediaType::Jpeg),
            _ => Err(MediaTypeParseError(ext.to_string())),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = MediaTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Browsers sometimes append parameters, e.g. "image/jpeg; charset=binary"
        let essence = s.split(';').next().unwrap_or_default().trim().to_lowercase();
        match essence.as_str() {
            "image/png" => Ok(MediaType::Png),
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Ok(MediaType::Jpeg),
            _ => Err(MediaTypeParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unsupported media type: {0}")]
pub struct MediaTypeParseError(String);

/// A product photo, base64-encoded for transport to the planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    /// Standard base64 of the raw file bytes
    pub encoded_bytes: String,
    pub media_type: MediaType,
}

impl UploadedImage {
    pub fn new(encoded_bytes: impl Into<String>, media_type: MediaType) -> Self {
        Self {
            encoded_bytes: encoded_bytes.into(),
            media_type,
        }
    }

    /// Browser-style data URL, handy for previews.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.encoded_bytes)
    }
}

/// A rendered shot image held in memory.
///
/// Cloning shares the underlying buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct RenderedImage {
    bytes: Arc<[u8]>,
    media_type: MediaType,
}

impl RenderedImage {
    pub fn new(bytes: impl Into<Arc<[u8]>>, media_type: MediaType) -> Self {
        Self {
            bytes: bytes.into(),
            media_type,
        }
    }

    pub fn jpeg(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::new(bytes, MediaType::Jpeg)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for RenderedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderedImage")
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_parsing() {
        assert_eq!("image/png".parse::<MediaType>().unwrap(), MediaType::Png);
        assert_eq!("IMAGE/JPEG".parse::<MediaType>().unwrap(), MediaType::Jpeg);
        assert_eq!(
            "image/jpeg; charset=binary".parse::<MediaType>().unwrap(),
            MediaType::Jpeg
        );
        assert!("image/gif".parse::<MediaType>().is_err());
        assert!("".parse::<MediaType>().is_err());
    }

    #[test]
    fn test_media_type_from_extension() {
        assert_eq!(MediaType::from_extension("JPG").unwrap(), MediaType::Jpeg);
        assert_eq!(MediaType::from_extension("png").unwrap(), MediaType::Png);
        assert!(MediaType::from_extension("webp").is_err());
    }

    #[test]
    fn test_data_url() {
        let image = UploadedImage::new("aGVsbG8=", MediaType::Png);
        assert_eq!(image.data_url(), "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn test_rendered_image_clone_shares_buffer() {
        let image = RenderedImage::jpeg(vec![1u8, 2, 3]);
        let copy = image.clone();
        assert_eq!(copy.bytes(), &[1, 2, 3]);
        assert_eq!(copy.media_type(), MediaType::Jpeg);
        assert_eq!(format!("{:?}", copy), "RenderedImage { media_type: Jpeg, len: 3 }");
    }
}
