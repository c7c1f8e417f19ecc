//! Vertex stream and bake types shared by the mesh backend and the CLI.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CodecError;
use crate::math::Vec3;

/// One entry of the flattened per-corner vertex stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Local-space position.
    pub position: Vec3,
    /// Local-space normal.
    pub normal: Vec3,
    /// Slot in the output color array this vertex is written back to.
    pub original_index: u32,
}

/// Positions and (optionally) normals of one mesh, index-aligned.
///
/// Construction checks the alignment, so every `VertexStream` has
/// `normals.len() == positions.len()` whenever normals are present.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexStream {
    positions: Vec<Vec3>,
    normals: Option<Vec<Vec3>>,
}

impl VertexStream {
    /// Create a stream from index-aligned positions and normals.
    pub fn new(positions: Vec<Vec3>, normals: Vec<Vec3>) -> Result<Self, CodecError> {
        if positions.len() != normals.len() {
            return Err(CodecError::invalid(format!(
                "positions and normals must have the same length, got {} and {}",
                positions.len(),
                normals.len()
            )));
        }
        Ok(Self {
            positions,
            normals: Some(normals),
        })
    }

    /// Create a stream that carries positions only.
    ///
    /// Such a stream can be position-encoded but not normal-averaged.
    pub fn positions_only(positions: Vec<Vec3>) -> Self {
        Self {
            positions,
            normals: None,
        }
    }

    /// Number of vertices in the stream.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if the stream has no vertices.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Vertex positions.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Vertex normals, if the source supplied them.
    pub fn normals(&self) -> Option<&[Vec3]> {
        self.normals.as_deref()
    }

    /// Returns true if normals are present.
    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    /// Build the vertex array with `original_index[i] == i`.
    ///
    /// Streams without normals get zero normals.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.positions
            .iter()
            .enumerate()
            .map(|(i, &position)| Vertex {
                position,
                normal: self
                    .normals
                    .as_ref()
                    .map(|n| n[i])
                    .unwrap_or(Vec3::ZERO),
                original_index: i as u32,
            })
            .collect()
    }
}

/// How vertex attributes are encoded into colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BakeMode {
    /// Local-space position written directly into RGB.
    #[serde(rename = "positions")]
    PositionEncode,
    /// Per-position-group averaged normal written into RGB.
    #[serde(rename = "averaged_normals")]
    AveragedNormalEncode,
}

impl BakeMode {
    /// Stable identifier used in reports and job files.
    pub fn as_str(&self) -> &'static str {
        match self {
            BakeMode::PositionEncode => "positions",
            BakeMode::AveragedNormalEncode => "averaged_normals",
        }
    }

    /// Returns true if this mode reads vertex normals.
    pub fn requires_normals(&self) -> bool {
        matches!(self, BakeMode::AveragedNormalEncode)
    }
}

impl fmt::Display for BakeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BakeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positions" | "position" => Ok(BakeMode::PositionEncode),
            "averaged_normals" | "averaged-normals" | "normals" => {
                Ok(BakeMode::AveragedNormalEncode)
            }
            other => Err(format!(
                "unknown bake mode '{}': expected 'positions' or 'averaged-normals'",
                other
            )),
        }
    }
}

/// Color assigned to one vertex slot.
///
/// Serializes as `[r, g, b, a]`. Components are not clamped: position
/// encoding routinely produces values outside [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BakedColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl BakedColor {
    /// Opaque white, the host engine's "no vertex colors" value.
    pub const WHITE: BakedColor = BakedColor::rgba(1.0, 1.0, 1.0, 1.0);

    /// Create a color.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from a vector's components.
    pub const fn from_vec3(v: Vec3) -> Self {
        Self::rgba(v.x, v.y, v.z, 1.0)
    }

    /// RGB components as a vector.
    pub const fn rgb(&self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }
}

impl From<[f32; 4]> for BakedColor {
    fn from(c: [f32; 4]) -> Self {
        BakedColor::rgba(c[0], c[1], c[2], c[3])
    }
}

impl From<BakedColor> for [f32; 4] {
    fn from(c: BakedColor) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

/// How vertex positions are compared when forming groups.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum GroupingPolicy {
    /// Exact floating-point equality (`-0.0 == 0.0`, all NaNs equal).
    #[default]
    Exact,
    /// Positions snapped to a grid of `step` before comparing.
    Quantized {
        /// Grid spacing in local-space units.
        step: f32,
    },
}
