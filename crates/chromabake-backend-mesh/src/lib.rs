//! chromabake Mesh Backend
//!
//! Bakes per-vertex attributes into vertex colors. Two encodings are
//! supported:
//!
//! - **Positions**: each vertex's local-space position written into RGB,
//!   for shaders that scroll or animate emission across a mesh.
//! - **Averaged normals**: vertices that share a position (duplicated across
//!   UV or smoothing seams) all receive the mean of their normals, so toon
//!   outlines extruded along the baked color stay closed at hard edges.
//!
//! The bake itself is a pure function over a vertex stream. The [`source`]
//! module reads streams from glTF/GLB files and JSON, and [`export`] writes
//! the baked colors back out as JSON.
//!
//! # Example
//!
//! ```
//! use chromabake_backend_mesh::bake_stream;
//! use chromabake_spec::{BakeMode, GroupingPolicy, Vec3, VertexStream};
//!
//! // Two corners at the same position with different normals.
//! let stream = VertexStream::new(
//!     vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.0)],
//!     vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)],
//! )
//! .unwrap();
//!
//! let colors = bake_stream(BakeMode::AveragedNormalEncode, &stream, GroupingPolicy::Exact).unwrap();
//! assert_eq!(colors[0], colors[1]);
//! assert_eq!(colors[0].r, 0.5);
//! ```

pub mod bake;
pub mod error;
pub mod export;
pub mod group;
pub mod source;

pub use bake::{bake, bake_stream, bake_with_policy, has_custom_colors, renormalize_colors};
pub use error::MeshError;
pub use export::{BakedMesh, BakedMeshSet};
pub use group::{group_vertices, VertexGroups};
pub use source::{load_mesh_file, MeshAttributes, PrimitiveRange};
