//! Texture pack assembly.
//!
//! Builds an in-memory `.mcpack` (zip) from six extracted faces:
//!
//! ```text
//! manifest.json
//! pack_icon.png                                    (copy of face 0)
//! textures/ui/panorama_{0..5}.png                  (panorama mode)
//! textures/environment/overworld_cubemap/cubemap_{0..5}.png  (cubemap mode)
//! ```

use crate::config::ManifestConfig;
use crate::error::{PackError, Result};
use crate::face::{ConversionResult, CubeFace, FACE_COUNT};
use crate::manifest::{Manifest, generate_manifest_with};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Archive path of the manifest.
pub const MANIFEST_ENTRY: &str = "manifest.json";

/// Archive path of the pack icon.
pub const ICON_ENTRY: &str = "pack_icon.png";

/// File extension of built packs.
pub const PACK_EXTENSION: &str = "mcpack";

/// Where the faces land inside the pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackMode {
    /// Title-screen panorama (`textures/ui/panorama_N.png`).
    Panorama,
    /// In-world sky (`textures/environment/overworld_cubemap/cubemap_N.png`).
    Cubemap,
}

impl PackMode {
    /// Folder the faces are written to, with trailing slash.
    pub fn target_dir(self) -> &'static str {
        match self {
            Self::Panorama => "textures/ui/",
            Self::Cubemap => "textures/environment/overworld_cubemap/",
        }
    }

    /// Face filename prefix.
    pub fn file_prefix(self) -> &'static str {
        match self {
            Self::Panorama => "panorama",
            Self::Cubemap => "cubemap",
        }
    }

    /// Tag used in the suggested pack filename. Cubemap packs are `sky`.
    pub fn filename_tag(self) -> &'static str {
        match self {
            Self::Panorama => "panorama",
            Self::Cubemap => "sky",
        }
    }

    /// Face filename without folder, e.g. `cubemap_3.png`.
    pub fn face_filename(self, face: CubeFace) -> String {
        format!("{}_{}.png", self.file_prefix(), face.index())
    }

    /// Full archive path of a face.
    pub fn face_entry(self, face: CubeFace) -> String {
        format!("{}{}", self.target_dir(), self.face_filename(face))
    }

    /// Face filename with its label, e.g. `panorama_0.png (left (-x))`.
    pub fn display_filename(self, face: CubeFace) -> String {
        format!("{} ({})", self.face_filename(face), face.label())
    }
}

impl fmt::Display for PackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Panorama => write!(f, "panorama"),
            Self::Cubemap => write!(f, "cubemap"),
        }
    }
}

impl FromStr for PackMode {
    type Err = PackError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "panorama" => Ok(Self::Panorama),
            "cubemap" | "sky" => Ok(Self::Cubemap),
            other => Err(PackError::InvalidInput(format!(
                "unknown pack mode `{other}` (use panorama|cubemap)"
            ))),
        }
    }
}

/// Everything needed to build one pack.
#[derive(Debug, Clone)]
pub struct PackageOptions {
    /// Layout of the face files.
    pub mode: PackMode,
    /// Source file name; its extension is stripped.
    pub base_name: String,
    /// The six extracted faces.
    pub faces: ConversionResult,
}

/// A serialized pack ready to be saved.
#[derive(Debug, Clone)]
pub struct PackageOutput {
    /// Zip archive bytes.
    pub bytes: Vec<u8>,
    /// Suggested filename, `<name>_<panorama|sky>_pack.mcpack`.
    pub filename: String,
    /// The manifest written into the archive.
    pub manifest: Manifest,
}

impl PackageOutput {
    /// Write the archive into `dir` under [`Self::filename`], creating `dir` if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.bytes)?;
        info!("wrote {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

/// Strip a trailing extension: the final `.` and at least one following
/// character, provided none of them is a `/` or another `.`.
///
/// `"sunset.jpg"` becomes `"sunset"`; `"a.b/c"` and `"name."` are unchanged.
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if dot + 1 < name.len() && !name[dot + 1..].contains('/') => &name[..dot],
        _ => name,
    }
}

/// Check that a cleaned pack name is a plain file stem.
///
/// # Errors
///
/// Returns [`PackError::InvalidInput`] if the name contains a path separator,
/// is a `.`/`..` component, or is absolute.
pub fn ensure_plain_name(name: &str) -> Result<()> {
    if name.contains(['/', '\\'])
        || name == "."
        || name == ".."
        || Path::new(name).is_absolute()
    {
        return Err(PackError::InvalidInput(format!(
            "pack name `{name}` must not contain path components"
        )));
    }
    Ok(())
}

/// Suggested download filename for a pack.
pub fn pack_filename(clean_name: &str, mode: PackMode) -> String {
    format!(
        "{clean_name}_{}_pack.{PACK_EXTENSION}",
        mode.filename_tag()
    )
}

/// Builds packs with a fixed set of manifest constants.
#[derive(Debug, Clone, Default)]
pub struct PackBuilder {
    manifest: ManifestConfig,
}

impl PackBuilder {
    /// Create a builder that writes manifests from `manifest`.
    pub fn new(manifest: ManifestConfig) -> Self {
        Self { manifest }
    }

    /// Build and serialize a pack.
    ///
    /// # Errors
    ///
    /// - [`PackError::EmptyInput`] unless `options.faces` holds all six faces.
    /// - [`PackError::InvalidInput`] if the cleaned name is not a plain file stem.
    /// - [`PackError::Encoding`] if a face payload is empty or not an encoded image.
    /// - [`PackError::Archive`] if the zip cannot be written.
    pub fn build(&self, options: &PackageOptions) -> Result<PackageOutput> {
        let faces = &options.faces;
        if faces.len() != FACE_COUNT {
            return Err(PackError::EmptyInput(format!(
                "no cubemap faces available ({} of {FACE_COUNT})",
                faces.len()
            )));
        }
        for face in faces {
            check_payload(face.face, &face.png)?;
        }

        let clean_name = strip_extension(&options.base_name);
        ensure_plain_name(clean_name)?;
        let manifest = generate_manifest_with(clean_name, &self.manifest);
        let manifest_json = manifest.to_json_pretty()?;

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let file_options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        add_entry(&mut zip, MANIFEST_ENTRY, manifest_json.as_bytes(), file_options)?;
        add_entry(&mut zip, ICON_ENTRY, &faces.faces()[0].png, file_options)?;
        for face in faces {
            let entry = options.mode.face_entry(face.face);
            debug!("adding {entry} ({} bytes)", face.png.len());
            add_entry(&mut zip, &entry, &face.png, file_options)?;
        }

        let bytes = zip
            .finish()
            .map_err(|e| PackError::Archive(format!("zip finish error: {e}")))?
            .into_inner();

        let filename = pack_filename(clean_name, options.mode);
        info!(
            "built {filename}: {} entries, {} bytes ({} mode)",
            FACE_COUNT + 2,
            bytes.len(),
            options.mode
        );

        Ok(PackageOutput {
            bytes,
            filename,
            manifest,
        })
    }
}

/// Build a pack with default manifest constants.
///
/// # Errors
///
/// See [`PackBuilder::build`].
pub fn build_package(options: &PackageOptions) -> Result<PackageOutput> {
    PackBuilder::default().build(options)
}

fn check_payload(face: CubeFace, png: &[u8]) -> Result<()> {
    if png.is_empty() {
        return Err(PackError::Encoding(format!("face {face} has no image data")));
    }
    image::guess_format(png)
        .map_err(|e| PackError::Encoding(format!("face {face} is not an encoded image: {e}")))?;
    Ok(())
}

fn add_entry<W: Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    name: &str,
    data: &[u8],
    options: SimpleFileOptions,
) -> Result<()> {
    zip.start_file(name, options)
        .map_err(|e| PackError::Archive(format!("zip error: {e}")))?;
    zip.write_all(data)
        .map_err(|e| PackError::Archive(format!("zip write error for {name}: {e}")))?;
    Ok(())
}

/// Contents of a built pack, read back from its bytes.
#[derive(Debug, Clone)]
pub struct PackSummary {
    /// Entry names in archive order.
    pub entries: Vec<String>,
    /// Parsed `manifest.json`.
    pub manifest: Manifest,
    /// Layout detected from the face paths, if any faces are present.
    pub mode: Option<PackMode>,
}

/// Read a single entry out of pack bytes.
///
/// # Errors
///
/// Returns [`PackError::Archive`] if the bytes are not a zip or the entry is missing.
pub fn read_entry(pack: &[u8], name: &str) -> Result<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(pack))
        .map_err(|e| PackError::Archive(format!("not a pack archive: {e}")))?;
    let mut file = archive
        .by_name(name)
        .map_err(|e| PackError::Archive(format!("{name}: {e}")))?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)
        .map_err(|e| PackError::Archive(format!("{name}: {e}")))?;
    Ok(buf)
}

/// List entries and parse the manifest of pack bytes.
///
/// # Errors
///
/// Returns [`PackError::Archive`] if the archive or its manifest is unreadable.
pub fn inspect_package(pack: &[u8]) -> Result<PackSummary> {
    let mut archive = ZipArchive::new(Cursor::new(pack))
        .map_err(|e| PackError::Archive(format!("not a pack archive: {e}")))?;
    let mut entries = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let file = archive
            .by_index(i)
            .map_err(|e| PackError::Archive(format!("entry {i}: {e}")))?;
        entries.push(file.name().to_owned());
    }

    let manifest_bytes = read_entry(pack, MANIFEST_ENTRY)?;
    let manifest_text = String::from_utf8(manifest_bytes)
        .map_err(|e| PackError::Archive(format!("manifest is not UTF-8: {e}")))?;
    let manifest = Manifest::from_json(&manifest_text)?;

    let mode = [PackMode::Panorama, PackMode::Cubemap]
        .into_iter()
        .find(|mode| entries.iter().any(|e| e.starts_with(mode.target_dir())));

    Ok(PackSummary {
        entries,
        manifest,
        mode,
    })
}
