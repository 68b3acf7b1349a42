//! Source raster decoding and content-type validation.

use crate::error::{PackError, Result};
use image::RgbaImage;
use std::path::Path;

/// A decoded RGBA8 source image.
///
/// Immutable once decoded; width and height are always non-zero.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pixels: RgbaImage,
}

impl RasterImage {
    /// Wrap an already-decoded RGBA buffer.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::Decode`] if either dimension is zero.
    pub fn from_rgba(pixels: RgbaImage) -> Result<Self> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(PackError::Decode(format!(
                "image has no pixels ({}x{})",
                pixels.width(),
                pixels.height()
            )));
        }
        Ok(Self { pixels })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Borrow the pixel buffer.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// Decode encoded image bytes into a [`RasterImage`].
///
/// # Errors
///
/// Returns [`PackError::Decode`] if the bytes are not a supported image.
pub fn decode_image(bytes: &[u8]) -> Result<RasterImage> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| PackError::Decode(format!("failed to load image: {e}")))?;
    RasterImage::from_rgba(decoded.to_rgba8())
}

/// Guess a MIME content type from a file extension.
pub fn content_type_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "hdr" => "image/vnd.radiance",
        "tif" | "tiff" => "image/tiff",
        "json" => "application/json",
        "txt" => "text/plain",
        "zip" | "mcpack" => "application/zip",
        _ => return None,
    };
    Some(mime)
}

/// Reject content types that do not declare an image.
///
/// # Errors
///
/// Returns [`PackError::InvalidInput`] unless `content_type` starts with `image/`.
pub fn ensure_image_content_type(content_type: &str) -> Result<()> {
    if content_type.starts_with("image/") {
        Ok(())
    } else {
        Err(PackError::InvalidInput(format!(
            "expected an image file (JPG, PNG, etc.), got `{content_type}`"
        )))
    }
}

/// Validate that `path` names an image file by its extension.
///
/// # Errors
///
/// Returns [`PackError::InvalidInput`] when the extension is unknown or not an image type.
pub fn ensure_image_path(path: &Path) -> Result<()> {
    let content_type = content_type_for_path(path).unwrap_or("application/octet-stream");
    ensure_image_content_type(content_type)
}
