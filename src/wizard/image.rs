//! Profile photo upload.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::ImageError;

/// Largest accepted upload.
pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// A file picked by the user, before validation.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing its type from the extension.
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::new(guess_mime(path), bytes))
    }
}

/// An accepted image, ready to send as a data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedImage {
    pub mime: String,
    pub data_url: String,
}

/// Validate type then size, and encode as `data:<mime>;base64,...`.
pub fn accept_image(file: &ImageFile) -> Result<AcceptedImage, ImageError> {
    let mime = file.mime.trim().to_ascii_lowercase();
    if !mime.starts_with("image/") {
        return Err(ImageError::NotAnImage { mime });
    }
    if file.bytes.len() > MAX_IMAGE_BYTES {
        return Err(ImageError::TooLarge {
            size: file.bytes.len(),
            max: MAX_IMAGE_BYTES,
        });
    }
    let data_url = format!("data:{mime};base64,{}", STANDARD.encode(&file.bytes));
    Ok(AcceptedImage { mime, data_url })
}

/// MIME type from a file extension. Unknown extensions are not images.
pub fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_small_png() {
        let file = ImageFile::new("image/png", b"abc".to_vec());
        let image = accept_image(&file).unwrap();
        assert_eq!(image.mime, "image/png");
        assert_eq!(image.data_url, "data:image/png;base64,YWJj");
    }

    #[test]
    fn rejects_non_image() {
        let file = ImageFile::new("text/plain", b"hello".to_vec());
        assert!(matches!(
            accept_image(&file),
            Err(ImageError::NotAnImage { ref mime }) if mime == "text/plain"
        ));
    }

    #[test]
    fn rejects_oversized() {
        let file = ImageFile::new("image/jpeg", vec![0u8; 3 * 1024 * 1024]);
        assert!(matches!(
            accept_image(&file),
            Err(ImageError::TooLarge { size, max }) if size == 3 * 1024 * 1024 && max == MAX_IMAGE_BYTES
        ));
    }

    #[test]
    fn exactly_two_megabytes_is_fine() {
        let file = ImageFile::new("image/jpeg", vec![0u8; MAX_IMAGE_BYTES]);
        assert!(accept_image(&file).is_ok());
    }

    #[test]
    fn guesses_common_extensions() {
        assert_eq!(guess_mime(Path::new("me.PNG")), "image/png");
        assert_eq!(guess_mime(Path::new("me.jpeg")), "image/jpeg");
        assert_eq!(guess_mime(Path::new("notes.txt")), "text/plain");
        assert_eq!(guess_mime(Path::new("noext")), "application/octet-stream");
    }

    #[tokio::test]
    async fn from_path_reads_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("avatar.gif");
        tokio::fs::write(&path, b"GIF89a").await.unwrap();
        let file = ImageFile::from_path(&path).await.unwrap();
        assert_eq!(file.mime, "image/gif");
        assert_eq!(file.bytes, b"GIF89a");
    }
}
