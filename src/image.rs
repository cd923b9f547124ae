use base64::Engine;
use std::{fmt, path::Path};

use crate::{bail, Context, ErrorKind, Result};

/// An image picked from the local file system.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

pub fn mime_from_extension(ext: &str) -> Option<&'static str> {
    Some(match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        _ => return None,
    })
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Reads an image from disk. Only `image/*` files are accepted.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|it| it.to_str())
            .kind(ErrorKind::InvalidArgument)
            .with_context(|| format!("invalid image path: {}", path.display()))?;
        let Some(mime) = path
            .extension()
            .and_then(|it| it.to_str())
            .and_then(mime_from_extension)
        else {
            bail!(@InvalidArgument ("file" => file_name) "not an image");
        };
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("cannot open file: {}", path.display()))?;
        Ok(Self::new(file_name, mime, bytes))
    }

    /// Encodes the image as a `data:` URL for immediate preview.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}
