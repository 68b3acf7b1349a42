//! Face extraction: slice an equirectangular raster into six square faces.
//!
//! The source is cut into a 3-column by 2-row grid and each cell is stretched
//! into an `S x S` face, where `S = min(W / 4, H / 2)`. This is a direct
//! resize of grid cells; no spherical reprojection is performed, and the
//! face labels (see [`CubeFace`]) are assigned by grid position.
//!
//! ```text
//!  +--------+--------+--------+
//!  | 0 left | 1 front| 2 right|
//!  +--------+--------+--------+
//!  | 3 back | 4 top  |5 bottom|
//!  +--------+--------+--------+
//! ```

use crate::error::{PackError, Result};
use crate::face::{ConversionResult, CubeFace, FACE_COUNT, FaceImage};
use crate::progress::{ProgressCallback, ProgressEvent};
use crate::raster::RasterImage;
use image::ImageEncoder;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Progress increment reported per completed face.
const PERCENT_PER_FACE: f64 = 16.67;

/// Resampling filter used to stretch a grid cell into a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    /// Nearest neighbour.
    Nearest,
    /// Bilinear.
    Triangle,
    /// Cubic.
    CatmullRom,
    /// Gaussian.
    Gaussian,
    /// Lanczos with window 3.
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// A grid cell in source pixel coordinates (fractional).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceRegion {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width, always `W / 3`.
    pub width: f64,
    /// Height, always `H / 2`.
    pub height: f64,
}

/// Face side length before flooring: `min(W / 4, H / 2)`.
pub fn face_size(width: u32, height: u32) -> f64 {
    (f64::from(width) / 4.0).min(f64::from(height) / 2.0)
}

/// Face side length in whole pixels, never below one.
pub fn face_pixels(width: u32, height: u32) -> u32 {
    (face_size(width, height).floor() as u32).max(1)
}

/// Grid cell for face `index` of a `width x height` source.
pub fn source_region(index: usize, width: u32, height: u32) -> SourceRegion {
    let cell_w = f64::from(width) / 3.0;
    let cell_h = f64::from(height) / 2.0;
    SourceRegion {
        x: (index % 3) as f64 * cell_w,
        y: (index / 3) as f64 * cell_h,
        width: cell_w,
        height: cell_h,
    }
}

/// Progress percentage reported after face `index` completes.
///
/// Steps by 16.67 per face; the sixth step (100.02) is clamped to 100.
pub fn progress_percent(index: usize) -> f64 {
    ((index + 1) as f64 * PERCENT_PER_FACE).min(100.0)
}

/// Snap a fractional span to whole pixels inside `0..limit`.
///
/// The end is rounded from the fractional end, so the last cell reaches `limit`.
fn pixel_span(start: f64, len: f64, limit: u32) -> (u32, u32) {
    let first = (start.floor() as u32).min(limit.saturating_sub(1));
    let end = ((start + len).round() as u32).clamp(first + 1, limit.max(first + 1));
    (first, end - first)
}

/// Slices rasters into faces with a fixed resampling filter.
#[derive(Debug, Clone, Copy)]
pub struct FaceExtractor {
    filter: ResizeFilter,
}

impl Default for FaceExtractor {
    fn default() -> Self {
        Self::new(ResizeFilter::Triangle)
    }
}

impl FaceExtractor {
    /// Create an extractor using `filter` for resampling.
    pub fn new(filter: ResizeFilter) -> Self {
        Self { filter }
    }

    /// Create an extractor from configuration.
    pub fn from_config(config: &crate::config::ExtractConfig) -> Self {
        Self::new(config.filter)
    }

    /// Extract all six faces.
    ///
    /// `callback` receives one [`ProgressEvent::FaceExtracted`] per face, with
    /// strictly increasing percentages ending at exactly 100.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::Encoding`] if a face cannot be PNG encoded. No
    /// faces are returned in that case.
    pub fn extract(
        &self,
        image: &RasterImage,
        callback: Option<&ProgressCallback>,
    ) -> Result<ConversionResult> {
        let (w, h) = (image.width(), image.height());
        let size = face_pixels(w, h);
        info!(
            "extracting {FACE_COUNT} faces of {size}x{size} from {w}x{h} ({:?})",
            self.filter
        );

        let mut faces = Vec::with_capacity(FACE_COUNT);
        for face in CubeFace::ALL {
            let index = face.index();
            let region = source_region(index, w, h);
            let (x0, cw) = pixel_span(region.x, region.width, w);
            let (y0, ch) = pixel_span(region.y, region.height, h);

            let cell = image::imageops::crop_imm(image.pixels(), x0, y0, cw, ch).to_image();
            let resized = image::imageops::resize(&cell, size, size, self.filter.into());
            let png = encode_png(&resized)?;
            debug!(
                "  [{index}] {face} ({cw}x{ch} @ {x0},{y0}) -> {} bytes",
                png.len()
            );

            faces.push(FaceImage { face, size, png });

            if let Some(cb) = callback {
                cb(ProgressEvent::FaceExtracted {
                    face,
                    percent: progress_percent(index),
                });
            }
        }

        ConversionResult::from_faces(faces)
    }
}

/// Extract six faces with the default bilinear filter.
///
/// # Errors
///
/// See [`FaceExtractor::extract`].
pub fn extract_faces(
    image: &RasterImage,
    callback: Option<&ProgressCallback>,
) -> Result<ConversionResult> {
    FaceExtractor::default().extract(image, callback)
}

/// Encode an RGBA buffer to PNG bytes.
fn encode_png(img: &image::RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    image::codecs::png::PngEncoder::new(&mut buf)
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| PackError::Encoding(format!("PNG encode: {e}")))?;
    Ok(buf)
}
