//! Baked color export.
//!
//! Colors are written as JSON, one `[r, g, b, a]` entry per vertex in stream
//! order, so they can be applied to the source mesh by any importer.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use chromabake_spec::{BakeMode, BakedColor};

use crate::error::MeshError;

/// Baked colors for one mesh primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BakedMesh {
    /// Primitive name, as reported by the mesh source.
    pub name: String,
    /// Encoding that produced the colors.
    pub mode: BakeMode,
    /// One color per vertex, indexed by original vertex index.
    pub colors: Vec<BakedColor>,
}

/// Baked colors for every primitive of a mesh file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BakedMeshSet {
    pub meshes: Vec<BakedMesh>,
}

impl BakedMeshSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mesh: BakedMesh) {
        self.meshes.push(mesh);
    }

    /// Total vertex count across all meshes.
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|m| m.colors.len()).sum()
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, MeshError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write pretty-printed JSON to a writer.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), MeshError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Write pretty-printed JSON to `path`, creating parent directories.
    pub fn write_to_file(&self, path: &Path) -> Result<(), MeshError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Parse a baked color document.
    pub fn from_json_slice(data: &[u8]) -> Result<Self, MeshError> {
        Ok(serde_json::from_slice(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_json_shape() {
        let set = BakedMeshSet {
            meshes: vec![BakedMesh {
                name: "cube#0".to_string(),
                mode: BakeMode::AveragedNormalEncode,
                colors: vec![BakedColor::rgba(0.5, 0.25, 0.0, 1.0)],
            }],
        };
        let value: serde_json::Value = serde_json::from_str(&set.to_json_pretty().unwrap()).unwrap();
        assert_eq!(value["meshes"][0]["mode"], "averaged_normals");
        assert_eq!(value["meshes"][0]["colors"][0][1], 0.25);
        assert_eq!(set.vertex_count(), 1);
    }

    #[test]
    fn test_write_to_file_creates_parent() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("out.json");
        let mut set = BakedMeshSet::new();
        set.push(BakedMesh {
            name: "m".to_string(),
            mode: BakeMode::PositionEncode,
            colors: vec![BakedColor::WHITE],
        });
        set.write_to_file(&path).unwrap();

        let read = BakedMeshSet::from_json_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(read, set);
    }
}
