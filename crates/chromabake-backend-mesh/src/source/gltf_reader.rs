//! glTF 2.0 / GLB mesh reading.
//!
//! The primitives of each glTF mesh are joined into one stream.

use std::path::Path;

use chromabake_spec::{BakedColor, Vec3, VertexStream};
use tracing::{debug, warn};

use super::{MeshAttributes, PrimitiveRange};
use crate::error::MeshError;

/// Read every mesh from a GLB (or a self-contained glTF) in memory.
///
/// Buffers must be embedded (GLB binary chunk or data URIs).
pub fn read_gltf_slice(data: &[u8]) -> Result<Vec<MeshAttributes>, MeshError> {
    let (document, buffers, _images) = gltf::import_slice(data)?;
    collect_meshes(&document, &buffers, "<memory>")
}

/// Read every mesh from a `.glb` or `.gltf` file.
///
/// External buffers are resolved relative to the file.
pub fn read_gltf_file(path: &Path) -> Result<Vec<MeshAttributes>, MeshError> {
    let (document, buffers, _images) = gltf::import(path)?;
    collect_meshes(&document, &buffers, &path.display().to_string())
}

/// Attributes of one primitive before joining.
struct PrimitiveData {
    name: String,
    positions: Vec<Vec3>,
    normals: Option<Vec<Vec3>>,
    colors: Option<Vec<BakedColor>>,
}

fn read_primitive(
    primitive: &gltf::Primitive<'_>,
    buffers: &[gltf::buffer::Data],
    name: String,
) -> Option<PrimitiveData> {
    let reader =
        primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));

    let Some(positions) = reader.read_positions() else {
        warn!(primitive = %name, "skipping primitive without POSITION attribute");
        return None;
    };
    let positions: Vec<Vec3> = positions.map(Vec3::from).collect();
    let normals = reader
        .read_normals()
        .map(|normals| normals.map(Vec3::from).collect());
    let colors = reader
        .read_colors(0)
        .map(|colors| colors.into_rgba_f32().map(BakedColor::from).collect());

    Some(PrimitiveData {
        name,
        positions,
        normals,
        colors,
    })
}

/// Join primitives into one stream.
///
/// Normals are kept only if every primitive has them. When any primitive has
/// colors, the rest are padded with opaque white to one color per vertex.
fn join_primitives(
    mesh_name: String,
    parts: Vec<PrimitiveData>,
) -> Result<MeshAttributes, MeshError> {
    let total: usize = parts.iter().map(|p| p.positions.len()).sum();
    let all_normals = parts.iter().all(|p| p.normals.is_some());
    let any_colors = parts.iter().any(|p| p.colors.is_some());

    for part in parts.iter().filter(|p| p.normals.is_none()) {
        warn!(primitive = %part.name, "primitive has no NORMAL attribute");
    }

    let mut positions = Vec::with_capacity(total);
    let mut normals = Vec::with_capacity(if all_normals { total } else { 0 });
    let mut colors = Vec::with_capacity(if any_colors { total } else { 0 });
    let mut primitives = Vec::with_capacity(parts.len());

    for part in parts {
        let len = part.positions.len();
        primitives.push(PrimitiveRange {
            name: part.name,
            start: positions.len(),
            len,
        });
        if all_normals {
            let part_stream =
                VertexStream::new(part.positions, part.normals.unwrap_or_default())?;
            positions.extend_from_slice(part_stream.positions());
            normals.extend_from_slice(part_stream.normals().unwrap_or_default());
        } else {
            positions.extend(part.positions);
        }
        if any_colors {
            let mut part_colors = part.colors.unwrap_or_default();
            part_colors.resize(len, BakedColor::WHITE);
            colors.extend(part_colors);
        }
    }

    let stream = if all_normals {
        VertexStream::new(positions, normals)?
    } else {
        VertexStream::positions_only(positions)
    };

    Ok(MeshAttributes {
        name: mesh_name,
        stream,
        existing_colors: any_colors.then_some(colors),
        primitives,
    })
}

fn collect_meshes(
    document: &gltf::Document,
    buffers: &[gltf::buffer::Data],
    origin: &str,
) -> Result<Vec<MeshAttributes>, MeshError> {
    let mut meshes = Vec::new();

    for mesh in document.meshes() {
        let mesh_name = mesh
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("mesh_{}", mesh.index()));

        let parts: Vec<PrimitiveData> = mesh
            .primitives()
            .filter_map(|primitive| {
                let name = format!("{}#{}", mesh_name, primitive.index());
                read_primitive(&primitive, buffers, name)
            })
            .collect();
        if parts.is_empty() {
            continue;
        }

        let joined = join_primitives(mesh_name, parts)?;
        debug!(
            mesh = %joined.name,
            primitives = joined.primitives.len(),
            vertices = joined.stream.len(),
            has_colors = joined.existing_colors.is_some(),
            "read glTF mesh"
        );
        meshes.push(joined);
    }

    if meshes.is_empty() {
        return Err(MeshError::EmptyMesh(format!(
            "{} contains no mesh primitives with positions",
            origin
        )));
    }

    Ok(meshes)
}
