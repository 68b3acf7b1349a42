//! End-to-end conversion: source file → faces → pack on disk.
//!
//! Each step is a one-shot future. There is no cancellation and no timeout;
//! once a conversion starts it runs to completion or fails outright.

use crate::config::SkypackConfig;
use crate::error::{PackError, Result};
use crate::extract::FaceExtractor;
use crate::face::ConversionResult;
use crate::package::{PackBuilder, PackMode, PackageOptions, PackageOutput};
use crate::progress::{ProgressCallback, ProgressEvent};
use crate::raster;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Drives decode, extraction, packaging and saving for one source image at a time.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    extractor: FaceExtractor,
    builder: PackBuilder,
}

impl Converter {
    /// Create a converter from configuration.
    pub fn new(config: &SkypackConfig) -> Self {
        Self {
            extractor: FaceExtractor::from_config(&config.extract),
            builder: PackBuilder::new(config.manifest.clone()),
        }
    }

    /// Decode `path` and extract its six faces.
    ///
    /// The file's content type is checked from its extension before anything
    /// is read.
    ///
    /// # Errors
    ///
    /// - [`PackError::InvalidInput`] if `path` does not name an image.
    /// - [`PackError::Io`] if the file cannot be read.
    /// - [`PackError::Decode`] if the bytes are not a decodable image.
    pub async fn convert_file(
        &self,
        path: &Path,
        callback: Option<ProgressCallback>,
    ) -> Result<ConversionResult> {
        raster::ensure_image_path(path)?;
        let bytes = tokio::fs::read(path).await?;
        info!("read {} ({} bytes)", path.display(), bytes.len());
        self.convert_bytes(bytes, callback).await
    }

    /// Decode already-read image bytes and extract their six faces.
    ///
    /// # Errors
    ///
    /// See [`Self::convert_file`].
    pub async fn convert_bytes(
        &self,
        bytes: Vec<u8>,
        callback: Option<ProgressCallback>,
    ) -> Result<ConversionResult> {
        let extractor = self.extractor;
        tokio::task::spawn_blocking(move || {
            let image = raster::decode_image(&bytes)?;
            if let Some(cb) = &callback {
                cb(ProgressEvent::Decoded {
                    width: image.width(),
                    height: image.height(),
                });
            }
            extractor.extract(&image, callback.as_ref())
        })
        .await
        .map_err(|e| PackError::Task(format!("conversion task failed: {e}")))?
    }

    /// Build a pack from extracted faces.
    ///
    /// # Errors
    ///
    /// See [`PackBuilder::build`].
    pub async fn package(
        &self,
        faces: ConversionResult,
        base_name: &str,
        mode: PackMode,
    ) -> Result<PackageOutput> {
        let builder = self.builder.clone();
        let options = PackageOptions {
            mode,
            base_name: base_name.to_owned(),
            faces,
        };
        tokio::task::spawn_blocking(move || builder.build(&options))
            .await
            .map_err(|e| PackError::Task(format!("packaging task failed: {e}")))?
    }

    /// Write a built pack into `dir` under its suggested filename.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::Io`] if the directory or file cannot be written.
    pub async fn save(&self, output: PackageOutput, dir: &Path) -> Result<PathBuf> {
        let dir = dir.to_path_buf();
        tokio::task::spawn_blocking(move || output.save_to(&dir))
            .await
            .map_err(|e| PackError::Task(format!("save task failed: {e}")))?
    }

    /// Convert `path` and write the resulting pack into `out_dir`.
    ///
    /// The pack is named after `path`'s file name unless `name` is given.
    ///
    /// # Errors
    ///
    /// Any error from [`Self::convert_file`], [`Self::package`] or [`Self::save`].
    pub async fn convert_and_package(
        &self,
        path: &Path,
        name: Option<&str>,
        mode: PackMode,
        out_dir: &Path,
        callback: Option<ProgressCallback>,
    ) -> Result<PathBuf> {
        let base_name = match name {
            Some(name) => name.to_owned(),
            None => path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| {
                    PackError::InvalidInput(format!("{} has no file name", path.display()))
                })?
                .to_owned(),
        };

        let (progress, archive_cb) = split_callback(callback);
        let faces = self.convert_file(path, progress).await?;
        let output = self.package(faces, &base_name, mode).await?;
        if let Some(cb) = archive_cb {
            (*cb)(ProgressEvent::ArchiveWritten {
                entries: crate::face::FACE_COUNT + 2,
                bytes: output.bytes.len(),
            });
        }
        self.save(output, out_dir).await
    }
}

/// Share one callback between the blocking conversion task and the caller.
fn split_callback(
    callback: Option<ProgressCallback>,
) -> (Option<ProgressCallback>, Option<Arc<ProgressCallback>>) {
    match callback {
        Some(cb) => {
            let shared = Arc::new(cb);
            let forward = Arc::clone(&shared);
            let inner: ProgressCallback = Box::new(move |event| (*forward)(event));
            (Some(inner), Some(shared))
        }
        None => (None, None),
    }
}
