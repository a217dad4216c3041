//! # File Type Detection
//!
//! Content-based classification of image files. Only the leading magic bytes
//! are read, nothing is decoded, and the file extension is ignored.

use crate::error::OptimizeError;
use std::fmt;
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Enough bytes for every signature `image::guess_format` knows about
const SNIFF_LEN: usize = 32;

/// Image types this crate can optimize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Gif,
    Jpeg,
    Png,
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileType::Gif => "gif",
            FileType::Jpeg => "jpeg",
            FileType::Png => "png",
        })
    }
}

impl FileType {
    /// Classify a byte prefix.
    ///
    /// Returns `UnsupportedType` for anything that is not GIF, JPEG or PNG,
    /// including recognised image formats such as WebP.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, OptimizeError> {
        match image::guess_format(bytes) {
            Ok(image::ImageFormat::Gif) => Ok(FileType::Gif),
            Ok(image::ImageFormat::Jpeg) => Ok(FileType::Jpeg),
            Ok(image::ImageFormat::Png) => Ok(FileType::Png),
            Ok(other) => Err(OptimizeError::UnsupportedType(
            format!("{:?}", other).to_lowercase(),
        )),
            Err(_) => Err(OptimizeError::UnsupportedType("unknown".to_string())),
        }
    }

    /// Read the head of `path` and classify it
    pub async fn sniff(path: &Path) -> Result<Self, OptimizeError> {
        let mut file = tokio::fs::File::open(path).await?;
        let mut head = Vec::with_capacity(SNIFF_LEN);
        (&mut file).take(SNIFF_LEN as u64).read_to_end(&mut head).await?;
        Self::from_bytes(&head)
    }
}
