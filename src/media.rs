use std::path::{Path, PathBuf};

use mime_guess::{mime, Mime, MimeGuess};

use crate::error::Result;

/// A local file picked for upload.
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub path: PathBuf,
    pub name: String,
    pub mime: Mime,
    pub size: u64,
}

impl MediaFile {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime = MimeGuess::from_path(&path).first_or_octet_stream();
        Self {
            path,
            name,
            mime,
            size,
        }
    }

    pub async fn open(path: &Path) -> Result<Self> {
        let metadata = tokio::fs::metadata(path).await?;
        Ok(Self::new(path, metadata.len()))
    }

    pub async fn read(&self) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(&self.path).await?)
    }

    pub fn is_image(&self) -> bool {
        self.mime.type_() == mime::IMAGE
    }

    pub fn is_video(&self) -> bool {
        self.mime.type_() == mime::VIDEO
    }

    /// Only images and videos can be posted.
    pub fn is_accepted(&self) -> bool {
        self.is_image() || self.is_video()
    }

    pub fn size_kb(&self) -> u64 {
        (self.size + 512) / 1024
    }
}
