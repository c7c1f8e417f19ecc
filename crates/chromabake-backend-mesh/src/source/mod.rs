//! Mesh sources: glTF/GLB documents and JSON vertex streams.
//!
//! Every source yields one [`MeshAttributes`] per mesh. The primitives of a
//! glTF mesh are joined into a single stream so that seams between them group
//! together; [`MeshAttributes::split`] hands the baked values back per
//! primitive. Positions and normals are returned exactly as stored (bind pose,
//! local space); no transform is applied.

mod gltf_reader;
mod json;

use std::path::Path;

use chromabake_spec::{BakedColor, VertexStream};

use crate::error::MeshError;

pub use gltf_reader::{read_gltf_file, read_gltf_slice};
pub use json::{read_json_slice, JsonMesh};

/// A contiguous run of vertices in a joined stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimitiveRange {
    /// Display name (`<mesh>#<primitive>` for glTF).
    pub name: String,
    /// First vertex of the run.
    pub start: usize,
    /// Number of vertices.
    pub len: usize,
}

/// Vertex attributes of one mesh, all primitives joined.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshAttributes {
    /// Mesh name.
    pub name: String,
    /// Positions and normals of every primitive, in primitive order.
    pub stream: VertexStream,
    /// Vertex colors already present on the mesh, if any.
    pub existing_colors: Option<Vec<BakedColor>>,
    /// Where each primitive sits in `stream`. Covers the stream without gaps.
    pub primitives: Vec<PrimitiveRange>,
}

impl MeshAttributes {
    /// A mesh made of a single primitive with the mesh's own name.
    pub fn single(
        name: impl Into<String>,
        stream: VertexStream,
        existing_colors: Option<Vec<BakedColor>>,
    ) -> Self {
        let name = name.into();
        let primitives = vec![PrimitiveRange {
            name: name.clone(),
            start: 0,
            len: stream.len(),
        }];
        Self {
            name,
            stream,
            existing_colors,
            primitives,
        }
    }

    /// Split per-vertex values of the joined stream back into primitives.
    ///
    /// `values` must be as long as the stream.
    pub fn split<'a, T>(&'a self, values: &'a [T]) -> impl Iterator<Item = (&'a str, &'a [T])> {
        self.primitives
            .iter()
            .map(move |p| (p.name.as_str(), &values[p.start..p.start + p.len]))
    }

    /// Returns true if the mesh already carries colors other than opaque white.
    pub fn has_vertex_colors(&self) -> bool {
        self.existing_colors
            .as_deref()
            .is_some_and(crate::bake::has_custom_colors)
    }
}

/// Load every mesh from a mesh file, picking the reader by extension.
///
/// `.glb` and `.gltf` are read as glTF 2.0; `.json` as a JSON vertex stream.
pub fn load_mesh_file(path: &Path) -> Result<Vec<MeshAttributes>, MeshError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "glb" | "gltf" => read_gltf_file(path),
        "json" => {
            let data = std::fs::read(path)?;
            read_json_slice(&data)
        }
        _ => Err(MeshError::UnsupportedFormat(format!(
            "{} (expected .glb, .gltf or .json)",
            path.display()
        ))),
    }
}
