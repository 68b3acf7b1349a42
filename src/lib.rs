//! skypack: turn an equirectangular HDRI into a skybox texture pack.
//!
//! The crate converts one panoramic image into six square faces and packages
//! them as a Minecraft Bedrock `.mcpack`:
//! Source image → decode → 3x2 grid slice → PNG faces → manifest + icon + faces → zip
//!
//! # Architecture
//!
//! - **raster**: Content-type checks and decoding via `image`
//! - **extract**: Slices the source into six `S x S` faces
//! - **manifest**: Builds `manifest.json` with fresh UUIDs
//! - **package**: Lays out and zips the pack for panorama or cubemap mode
//! - **pipeline**: Async driver that reads, converts, packages and saves

pub mod config;
pub mod error;
pub mod extract;
pub mod face;
pub mod manifest;
pub mod package;
pub mod pipeline;
pub mod progress;
pub mod raster;
pub mod skypack_dirs;

pub use config::SkypackConfig;
pub use error::{PackError, Result};
pub use extract::{FaceExtractor, extract_faces};
pub use face::{ConversionResult, CubeFace, FaceImage};
pub use manifest::{Manifest, generate_manifest};
pub use package::{PackMode, PackageOptions, PackageOutput, build_package};
pub use pipeline::Converter;
pub use progress::{ProgressCallback, ProgressEvent};
pub use raster::RasterImage;
