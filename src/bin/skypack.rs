//! CLI binary for skypack.

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use skypack::package::inspect_package;
use skypack::{Converter, CubeFace, PackMode, ProgressCallback, ProgressEvent, SkypackConfig};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// skypack: convert an equirectangular HDRI into a skybox texture pack.
#[derive(Parser)]
#[command(name = "skypack", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Convert an image into a `.mcpack` texture pack.
    Convert {
        /// Source equirectangular image.
        input: PathBuf,
        /// Pack layout: panorama or cubemap.
        #[arg(short, long)]
        mode: Option<PackMode>,
        /// Output directory (defaults to the configured output dir).
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Pack name (defaults to the input file name).
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Write the six faces as individual PNG files.
    Faces {
        /// Source equirectangular image.
        input: PathBuf,
        /// Naming scheme for the face files.
        #[arg(short, long)]
        mode: Option<PackMode>,
        /// Output directory.
        #[arg(short, long, default_value = "faces")]
        out: PathBuf,
    },

    /// List the contents of a built pack.
    Inspect {
        /// Path to a `.mcpack` file.
        pack: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("skypack=info")),
        )
        .init();

    let cli = Cli::parse();

    let config = if let Some(ref path) = cli.config {
        SkypackConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?
    } else {
        SkypackConfig::load_or_default()?
    };

    match cli.command {
        Command::Convert {
            input,
            mode,
            out,
            name,
        } => {
            let mode = mode.unwrap_or(config.pack.default_mode);
            let out = out.unwrap_or_else(|| config.pack.resolved_output_dir());
            run_convert(&config, &input, mode, &out, name.as_deref()).await
        }
        Command::Faces { input, mode, out } => {
            let mode = mode.unwrap_or(config.pack.default_mode);
            run_faces(&config, &input, mode, &out).await
        }
        Command::Inspect { pack } => run_inspect(&pack).await,
    }
}

async fn run_convert(
    config: &SkypackConfig,
    input: &Path,
    mode: PackMode,
    out: &Path,
    name: Option<&str>,
) -> anyhow::Result<()> {
    let pb = progress_bar();
    let converter = Converter::new(config);
    let saved = converter
        .convert_and_package(input, name, mode, out, Some(progress_callback(&pb)))
        .await;
    pb.finish_and_clear();

    let saved = saved.with_context(|| format!("failed to convert {}", input.display()))?;
    println!("Wrote {}", saved.display());
    Ok(())
}

async fn run_faces(
    config: &SkypackConfig,
    input: &Path,
    mode: PackMode,
    out: &Path,
) -> anyhow::Result<()> {
    let pb = progress_bar();
    let faces = Converter::new(config)
        .convert_file(input, Some(progress_callback(&pb)))
        .await;
    pb.finish_and_clear();
    let faces = faces.with_context(|| format!("failed to convert {}", input.display()))?;

    tokio::fs::create_dir_all(out).await?;
    for face in &faces {
        let path = out.join(mode.face_filename(face.face));
        tokio::fs::write(&path, &face.png)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!(
            "  {} {}x{}",
            mode.display_filename(face.face),
            face.size,
            face.size
        );
    }
    info!("wrote {} faces to {}", faces.len(), out.display());
    Ok(())
}

async fn run_inspect(pack: &Path) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(pack)
        .await
        .with_context(|| format!("failed to read {}", pack.display()))?;
    let summary = inspect_package(&bytes)?;

    match summary.mode {
        Some(mode) => println!("{} ({mode} pack)", pack.display()),
        None => println!("{} (no face textures)", pack.display()),
    }
    for entry in &summary.entries {
        println!("  {entry}");
    }
    if let Some(mode) = summary.mode {
        let missing: Vec<String> = CubeFace::ALL
            .iter()
            .map(|f| mode.face_entry(*f))
            .filter(|e| !summary.entries.contains(e))
            .collect();
        if !missing.is_empty() {
            println!("missing faces: {}", missing.join(", "));
        }
    }
    println!("\n{}", summary.manifest.to_json_pretty()?);
    Ok(())
}

fn progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(100);
    if let Ok(style) = ProgressStyle::with_template("  {msg:<14} [{bar:30}] {pos:>3}%") {
        pb.set_style(style);
    }
    pb.set_message("decoding");
    pb
}

fn progress_callback(pb: &ProgressBar) -> ProgressCallback {
    let pb = pb.clone();
    Box::new(move |event| match event {
        ProgressEvent::Decoded { width, height } => {
            pb.set_message(format!("{width}x{height}"));
        }
        ProgressEvent::FaceExtracted { face, percent } => {
            pb.set_message(face.to_string());
            pb.set_position(percent.round() as u64);
        }
        ProgressEvent::ArchiveWritten { bytes, .. } => {
            pb.set_message(format!("{bytes} bytes"));
        }
    })
}
