//! JSON job files.
//!
//! A job file batches pack, unpack, and bake requests so they can be rerun
//! without retyping command lines:
//!
//! ```json
//! {
//!   "version": 1,
//!   "out_root": "_ChannelPacker",
//!   "jobs": [
//!     { "kind": "pack", "name": "body_mask", "size": "auto",
//!       "channels": { "r": "ao.png", "g": { "path": "gloss.png", "invert": true } } },
//!     { "kind": "unpack", "source": "packed.png", "size": 512 },
//!     { "kind": "bake", "mesh": "avatar.glb", "mode": "averaged_normals",
//!       "output": "avatar_colors.json" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CodecError, JobError};
use crate::mesh::{BakeMode, GroupingPolicy};
use crate::texture::{auto_select_size, PackedChannels, ResampleFilter, TargetSize};
use crate::validation::validate_job_file;

/// Current job file version.
pub const JOB_FILE_VERSION: u32 = 1;

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUT_ROOT: &str = "_ChannelPacker";

/// Default file stem for packed outputs.
pub const DEFAULT_PACKED_NAME: &str = "packed";

/// Default file stem for unpacked outputs.
pub const DEFAULT_UNPACKED_NAME: &str = "unpacked";

/// A batch of jobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobFile {
    /// Job file format version.
    pub version: u32,
    /// Output root directory for pack/unpack results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_root: Option<String>,
    /// Overwrite existing outputs (otherwise pick a free file name).
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
    /// Jobs, executed in order.
    pub jobs: Vec<Job>,
}

fn default_overwrite() -> bool {
    true
}

impl JobFile {
    /// Parse and validate a job file from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, JobError> {
        let file: JobFile = serde_json::from_str(json)?;
        let result = validate_job_file(&file);
        if !result.is_ok() {
            return Err(JobError::Invalid(result.errors));
        }
        Ok(file)
    }

    /// Read, parse and validate a job file from disk.
    pub fn from_path(path: &Path) -> Result<Self, JobError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Output root, falling back to the default.
    pub fn out_root(&self) -> &str {
        self.out_root.as_deref().unwrap_or(DEFAULT_OUT_ROOT)
    }
}

/// One job in a job file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Job {
    Pack(PackJob),
    Unpack(UnpackJob),
    Bake(BakeJob),
}

impl Job {
    /// Short label for reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Job::Pack(_) => "pack",
            Job::Unpack(_) => "unpack",
            Job::Bake(_) => "bake",
        }
    }
}

/// Pack up to four images into one RGBA image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackJob {
    /// Output file stem.
    #[serde(default = "default_packed_name")]
    pub name: String,
    /// Output size.
    #[serde(default)]
    pub size: SizeSetting,
    /// Resampling filter.
    #[serde(default)]
    pub filter: ResampleFilter,
    /// Channel sources.
    pub channels: PackedChannels,
}

fn default_packed_name() -> String {
    DEFAULT_PACKED_NAME.to_string()
}

/// Split one RGBA image into four greyscale images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnpackJob {
    /// Packed source image.
    pub source: String,
    /// Output file stem; outputs are `<name>_<channel>.png`.
    #[serde(default = "default_unpacked_name")]
    pub name: String,
    /// Output size.
    #[serde(default)]
    pub size: SizeSetting,
    /// Resampling filter.
    #[serde(default)]
    pub filter: ResampleFilter,
}

fn default_unpacked_name() -> String {
    DEFAULT_UNPACKED_NAME.to_string()
}

/// Bake vertex attributes of a mesh into vertex colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BakeJob {
    /// Mesh file (`.glb`, `.gltf`, or a JSON vertex stream).
    pub mesh: String,
    /// Encoding.
    pub mode: BakeMode,
    /// Output JSON path for the baked colors.
    pub output: String,
    /// Position comparison used for averaging.
    #[serde(default)]
    pub grouping: GroupingPolicy,
    /// Rescale averaged normals to unit length after baking.
    #[serde(default)]
    pub renormalize: bool,
}

/// Requested output size: automatic, a square edge, or explicit dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSize", into = "RawSize")]
pub enum SizeSetting {
    /// Smallest preset that fits every source.
    #[default]
    Auto,
    /// Square output with the given edge.
    Edge(u32),
    /// Explicit width and height.
    Exact(u32, u32),
}

impl SizeSetting {
    /// Resolve against the dimensions of the sources that will be read.
    pub fn resolve(
        &self,
        dimensions: impl IntoIterator<Item = (u32, u32)>,
    ) -> Result<TargetSize, CodecError> {
        match *self {
            SizeSetting::Auto => Ok(auto_select_size(dimensions)),
            SizeSetting::Edge(edge) => TargetSize::square(edge),
            SizeSetting::Exact(w, h) => TargetSize::new(w, h),
        }
    }

    /// The explicit dimensions, if not automatic.
    pub fn explicit(&self) -> Option<(u32, u32)> {
        match *self {
            SizeSetting::Auto => None,
            SizeSetting::Edge(edge) => Some((edge, edge)),
            SizeSetting::Exact(w, h) => Some((w, h)),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawSize {
    Keyword(String),
    Edge(u32),
    Exact([u32; 2]),
}

impl TryFrom<RawSize> for SizeSetting {
    type Error = String;

    fn try_from(raw: RawSize) -> Result<Self, Self::Error> {
        match raw {
            RawSize::Keyword(k) if k == "auto" => Ok(SizeSetting::Auto),
            RawSize::Keyword(k) => Err(format!(
                "size must be \"auto\", an edge length, or [width, height], got \"{}\"",
                k
            )),
            RawSize::Edge(edge) => Ok(SizeSetting::Edge(edge)),
            RawSize::Exact([w, h]) => Ok(SizeSetting::Exact(w, h)),
        }
    }
}

impl From<SizeSetting> for RawSize {
    fn from(size: SizeSetting) -> Self {
        match size {
            SizeSetting::Auto => RawSize::Keyword("auto".to_string()),
            SizeSetting::Edge(edge) => RawSize::Edge(edge),
            SizeSetting::Exact(w, h) => RawSize::Exact([w, h]),
        }
    }
}
