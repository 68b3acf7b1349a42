//! Centralized directory paths for skypack.
//!
//! Uses the [`dirs`] crate for platform-appropriate resolution.
//!
//! | Purpose | macOS | Linux |
//! |---------|-------|-------|
//! | Config | `~/Library/Application Support/skypack/` | `~/.config/skypack/` |
//! | Output | `~/Downloads/` | `~/Downloads/` (XDG download dir) |
//!
//! # Environment Overrides
//!
//! - `SKYPACK_CONFIG_DIR`: overrides [`config_dir`]
//! - `SKYPACK_OUTPUT_DIR`: overrides [`output_dir`]

use std::path::PathBuf;

/// Application config directory.
///
/// Resolves to `dirs::config_dir()/skypack/` by default. Override with
/// the `SKYPACK_CONFIG_DIR` environment variable.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("SKYPACK_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join("skypack"))
        .unwrap_or_else(|| PathBuf::from("/tmp/skypack-config"))
}

/// Default directory that finished packs are written to.
///
/// This is the browser-style "Downloads" folder, falling back to the current
/// directory when the platform has none. Override with `SKYPACK_OUTPUT_DIR`.
#[must_use]
pub fn output_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("SKYPACK_OUTPUT_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Config file path (`config_dir()/config.toml`).
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_lives_under_config_dir() {
        let file = config_file();
        assert!(file.starts_with(config_dir()));
        assert!(file.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn output_dir_is_not_empty() {
        assert!(!output_dir().as_os_str().is_empty());
    }
}
