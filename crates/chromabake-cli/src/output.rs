//! Output path layout and overwrite policy.
//!
//! Packed images go to `<out_root>/Packed/<name>.png`, unpacked channels to
//! `<out_root>/Unpacked/<name>_<channel>.png`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chromabake_spec::Channel;

/// Subdirectory of the output root for packed images.
pub const PACKED_DIR: &str = "Packed";
/// Subdirectory of the output root for unpacked channels.
pub const UNPACKED_DIR: &str = "Unpacked";

/// Where to write results and whether existing files may be replaced.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub out_root: PathBuf,
    pub overwrite: bool,
}

impl OutputOptions {
    pub fn new(out_root: impl Into<PathBuf>, overwrite: bool) -> Self {
        Self {
            out_root: out_root.into(),
            overwrite,
        }
    }

    /// Path of a packed image.
    pub fn packed_path(&self, name: &str) -> PathBuf {
        self.out_root.join(PACKED_DIR).join(format!("{}.png", name))
    }

    /// Path of one unpacked channel image.
    pub fn unpacked_path(&self, name: &str, channel: Channel) -> PathBuf {
        self.out_root
            .join(UNPACKED_DIR)
            .join(format!("{}_{}.png", name, channel.name()))
    }
}

/// First path of the form `<stem> <n>.<ext>` (n = 1, 2, ...) that does not exist.
///
/// Returns `path` unchanged if it is free.
pub fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path.extension().map(|e| e.to_string_lossy().into_owned());

    for n in 1u32.. {
        let file_name = match &ext {
            Some(ext) => format!("{} {}.{}", stem, n, ext),
            None => format!("{} {}", stem, n),
        };
        let candidate = path.with_file_name(file_name);
        if !candidate.exists() {
            return candidate;
        }
    }
    path.to_path_buf()
}

/// Create the parent directory of `path` and apply the overwrite policy.
pub fn prepare_output_path(path: &Path, overwrite: bool) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }

    Ok(if overwrite {
        path.to_path_buf()
    } else {
        unique_path(path)
    })
}
