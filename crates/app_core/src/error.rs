//! Application error types

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum GalleryError {
    // ===== Recoverable Errors (log, skip, continue) =====
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Image decode error: {0}")]
    ImageDecode(String),

    #[error("Asset scan error: {0}")]
    AssetScan(String),

    #[error("Font load error: {0}")]
    Font(String),

    // ===== Recoverable (internal recovery attempt) =====
    #[error("GPU device lost")]
    GpuLost,

    // ===== Fatal Errors (application termination) =====
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Initialization failed: {0}")]
    Init(String),
}

impl GalleryError {
    /// Is this error recoverable?
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GalleryError::Io(_)
                | GalleryError::UnsupportedFormat(_)
                | GalleryError::ImageDecode(_)
                | GalleryError::AssetScan(_)
                | GalleryError::Font(_)
                | GalleryError::GpuLost
        )
    }

    /// Is this a fatal error?
    pub fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// Get a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            GalleryError::UnsupportedFormat(ext) => format!("Unsupported format: {}", ext),
            GalleryError::ImageDecode(msg) => format!("Cannot load image: {}", msg),
            GalleryError::AssetScan(msg) => format!("Cannot read gallery folder: {}", msg),
            GalleryError::Font(msg) => format!("Cannot load font: {}", msg),
            GalleryError::GpuLost => "Display device reset. Reloading...".to_string(),
            _ => self.to_string(),
        }
    }
}

impl From<image::ImageError> for GalleryError {
    fn from(e: image::ImageError) -> Self {
        GalleryError::ImageDecode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_split() {
        assert!(GalleryError::ImageDecode("bad jpeg".into()).is_recoverable());
        assert!(GalleryError::GpuLost.is_recoverable());
        assert!(GalleryError::Config("broken".into()).is_fatal());
        assert!(GalleryError::Init("no adapter".into()).is_fatal());
    }

    #[test]
    fn test_user_message() {
        let err = GalleryError::ImageDecode("truncated".into());
        assert_eq!(err.user_message(), "Cannot load image: truncated");
    }
}
