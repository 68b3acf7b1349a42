//! End-to-end checks: decode a panorama, slice six faces, and build `.mcpack` archives.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use image::{ImageEncoder, Rgba, RgbaImage};
use skypack::manifest::Manifest;
use skypack::package::{ICON_ENTRY, MANIFEST_ENTRY, inspect_package, read_entry};
use skypack::raster::RasterImage;
use skypack::{
    ConversionResult, Converter, CubeFace, PackError, PackMode, PackageOptions, SkypackConfig,
    build_package, extract_faces,
};
use std::path::{Path, PathBuf};

fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            ((x + y) % 256) as u8,
            255,
        ])
    })
}

fn write_png(dir: &Path, name: &str, img: &RgbaImage) -> PathBuf {
    let mut buf = Vec::new();
    image::codecs::png::PngEncoder::new(&mut buf)
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgba8,
        )
        .expect("encode png");
    let path = dir.join(name);
    std::fs::write(&path, buf).expect("write png");
    path
}

fn write_jpeg(dir: &Path, name: &str, img: &RgbaImage) -> PathBuf {
    let rgb = image::DynamicImage::ImageRgba8(img.clone()).to_rgb8();
    let mut buf = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, 90)
        .write_image(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            image::ExtendedColorType::Rgb8,
        )
        .expect("encode jpeg");
    let path = dir.join(name);
    std::fs::write(&path, buf).expect("write jpeg");
    path
}

#[test]
fn full_size_hdri_produces_eight_entry_pack() {
    let raster = RasterImage::from_rgba(gradient(3000, 1500)).expect("raster");
    let faces = extract_faces(&raster, None).expect("extract");

    assert_eq!(faces.len(), 6);
    for face in &faces {
        assert_eq!(face.size, 750);
        let decoded = image::load_from_memory(&face.png).expect("face png");
        assert_eq!((decoded.width(), decoded.height()), (750, 750));
    }

    for mode in [PackMode::Panorama, PackMode::Cubemap] {
        let output = build_package(&PackageOptions {
            mode,
            base_name: "sunset.jpg".to_owned(),
            faces: faces.clone(),
        })
        .expect("build");

        let summary = inspect_package(&output.bytes).expect("inspect");
        assert_eq!(summary.entries.len(), 8);
        assert!(summary.entries.contains(&MANIFEST_ENTRY.to_owned()));
        assert!(summary.entries.contains(&ICON_ENTRY.to_owned()));
        for face in CubeFace::ALL {
            assert!(summary.entries.contains(&mode.face_entry(face)));
        }
        assert_eq!(summary.mode, Some(mode));

        let icon = read_entry(&output.bytes, ICON_ENTRY).expect("icon");
        assert_eq!(icon, faces.faces()[0].png);
    }
}

#[test]
fn download_names_follow_mode() {
    let raster = RasterImage::from_rgba(gradient(40, 20)).expect("raster");
    let faces = extract_faces(&raster, None).expect("extract");

    let panorama = build_package(&PackageOptions {
        mode: PackMode::Panorama,
        base_name: "sunset.jpg".to_owned(),
        faces: faces.clone(),
    })
    .expect("panorama");
    let cubemap = build_package(&PackageOptions {
        mode: PackMode::Cubemap,
        base_name: "sunset.jpg".to_owned(),
        faces,
    })
    .expect("cubemap");

    assert_eq!(panorama.filename, "sunset_panorama_pack.mcpack");
    assert_eq!(cubemap.filename, "sunset_sky_pack.mcpack");

    let cube_summary = inspect_package(&cubemap.bytes).expect("inspect");
    assert!(
        cube_summary
            .entries
            .contains(&"textures/environment/overworld_cubemap/cubemap_3.png".to_owned())
    );
    let pano_summary = inspect_package(&panorama.bytes).expect("inspect");
    assert!(
        pano_summary
            .entries
            .contains(&"textures/ui/panorama_3.png".to_owned())
    );
}

#[test]
fn manifest_in_pack_parses_back_to_schema() {
    let raster = RasterImage::from_rgba(gradient(40, 20)).expect("raster");
    let faces = extract_faces(&raster, None).expect("extract");
    let output = build_package(&PackageOptions {
        mode: PackMode::Cubemap,
        base_name: "night.sky.png".to_owned(),
        faces,
    })
    .expect("build");

    let text = String::from_utf8(read_entry(&output.bytes, MANIFEST_ENTRY).expect("manifest"))
        .expect("utf8");
    let value: serde_json::Value = serde_json::from_str(&text).expect("json");
    assert_eq!(value["format_version"], 2);
    assert_eq!(value["header"]["name"], "night.sky");
    assert_eq!(value["header"]["version"], serde_json::json!([1, 0, 0]));
    assert_eq!(
        value["header"]["min_engine_version"],
        serde_json::json!([1, 16, 0])
    );
    assert_eq!(value["modules"][0]["type"], "resources");
    assert_ne!(value["header"]["uuid"], value["modules"][0]["uuid"]);

    let manifest = Manifest::from_json(&text).expect("manifest");
    manifest.validate().expect("valid manifest");
}

#[test]
fn packaging_without_faces_is_rejected() {
    let result = build_package(&PackageOptions {
        mode: PackMode::Panorama,
        base_name: "empty.png".to_owned(),
        faces: ConversionResult::empty(),
    });
    assert!(matches!(result, Err(PackError::EmptyInput(_))));
}

#[tokio::test]
async fn jpeg_source_converts_through_pipeline() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_jpeg(dir.path(), "beach.jpg", &gradient(200, 100));
    let out = dir.path().join("out");

    let saved = Converter::new(&SkypackConfig::default())
        .convert_and_package(&input, None, PackMode::Cubemap, &out, None)
        .await
        .expect("pipeline");

    assert_eq!(saved, out.join("beach_sky_pack.mcpack"));
    let summary = inspect_package(&std::fs::read(&saved).expect("read pack")).expect("inspect");
    assert_eq!(summary.entries.len(), 8);
    assert_eq!(summary.manifest.header.name, "beach");
}

#[tokio::test]
async fn config_constants_reach_the_manifest() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_png(dir.path(), "dusk.png", &gradient(80, 40));

    let mut config = SkypackConfig::default();
    config.manifest.header_description = "Dusk skies".to_owned();
    config.manifest.min_engine_version = [1, 20, 10];

    let saved = Converter::new(&config)
        .convert_and_package(&input, None, PackMode::Panorama, dir.path(), None)
        .await
        .expect("pipeline");

    let summary = inspect_package(&std::fs::read(&saved).expect("read pack")).expect("inspect");
    assert_eq!(summary.manifest.header.description, "Dusk skies");
    assert_eq!(summary.manifest.header.min_engine_version, [1, 20, 10]);
}

#[tokio::test]
async fn text_file_is_invalid_input() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("notes.txt");
    std::fs::write(&input, "hello").expect("write");

    let result = Converter::default()
        .convert_and_package(&input, None, PackMode::Cubemap, dir.path(), None)
        .await;
    assert!(matches!(result, Err(PackError::InvalidInput(_))));
    assert!(!dir.path().join("notes_sky_pack.mcpack").exists());
}
