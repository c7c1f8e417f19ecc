//! JSON vertex streams.
//!
//! A document is one mesh object or an array of them:
//!
//! ```json
//! { "name": "cube", "positions": [[0,0,0], [1,0,0]], "normals": [[0,1,0], [0,1,0]] }
//! ```
//!
//! `normals` may be omitted for position encoding.

use serde::{Deserialize, Serialize};

use chromabake_spec::{Vec3, VertexStream};

use super::MeshAttributes;
use crate::error::MeshError;

/// One mesh in a JSON vertex stream document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonMesh {
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Per-vertex positions.
    pub positions: Vec<Vec3>,
    /// Per-vertex normals, index-aligned with positions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normals: Option<Vec<Vec3>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonMeshDocument {
    Many(Vec<JsonMesh>),
    One(JsonMesh),
}

impl JsonMesh {
    fn into_attributes(self, index: usize) -> Result<MeshAttributes, MeshError> {
        let name = self.name.unwrap_or_else(|| format!("mesh_{}", index));
        let stream = match self.normals {
            Some(normals) => VertexStream::new(self.positions, normals)?,
            None => VertexStream::positions_only(self.positions),
        };
        Ok(MeshAttributes::single(name, stream, None))
    }
}

/// Parse a JSON vertex stream document.
pub fn read_json_slice(data: &[u8]) -> Result<Vec<MeshAttributes>, MeshError> {
    let meshes = match serde_json::from_slice::<JsonMeshDocument>(data)? {
        JsonMeshDocument::Many(meshes) => meshes,
        JsonMeshDocument::One(mesh) => vec![mesh],
    };

    if meshes.is_empty() {
        return Err(MeshError::EmptyMesh("JSON document lists no meshes".to_string()));
    }

    meshes
        .into_iter()
        .enumerate()
        .map(|(i, mesh)| mesh.into_attributes(i))
        .collect()
}
