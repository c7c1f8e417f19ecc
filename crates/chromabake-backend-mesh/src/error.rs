//! Mesh backend errors.

use chromabake_spec::{BackendError, CodecError};
use thiserror::Error;

/// Errors from reading meshes, baking, and writing baked colors.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("glTF error: {0}")]
    Gltf(#[from] gltf::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("Unsupported mesh format: {0}")]
    UnsupportedFormat(String),

    #[error("Mesh has no geometry: {0}")]
    EmptyMesh(String),
}

impl BackendError for MeshError {
    fn code(&self) -> &'static str {
        match self {
            MeshError::Io(_) => "MESH_001",
            MeshError::Gltf(_) => "MESH_002",
            MeshError::Json(_) => "MESH_003",
            MeshError::Codec(_) => "MESH_004",
            MeshError::UnsupportedFormat(_) => "MESH_005",
            MeshError::EmptyMesh(_) => "MESH_006",
        }
    }

    fn category(&self) -> &'static str {
        "mesh"
    }
}
