//! Vertex attribute baking.

use chromabake_spec::{BakeMode, BakedColor, CodecError, GroupingPolicy, Vec3, Vertex, VertexStream};
use tracing::debug;

use crate::group::group_vertices;

/// Bake a caller-built vertex array with exact position grouping.
///
/// `vertices[i].original_index` must form a permutation of `0..n`; the
/// output color for each vertex is written at its original index.
///
/// With [`BakeMode::AveragedNormalEncode`] the averaged normal is the plain
/// mean of the group's normals and is **not** renormalized; a group whose
/// normals disagree yields a shorter-than-unit vector. Use
/// [`renormalize_colors`] if unit normals are needed downstream.
///
/// An empty input produces an empty output.
pub fn bake(mode: BakeMode, vertices: &[Vertex]) -> Result<Vec<BakedColor>, CodecError> {
    bake_with_policy(mode, vertices, GroupingPolicy::Exact)
}

/// Bake a vertex stream. Original indices are the stream positions.
pub fn bake_stream(
    mode: BakeMode,
    stream: &VertexStream,
    policy: GroupingPolicy,
) -> Result<Vec<BakedColor>, CodecError> {
    if mode.requires_normals() && !stream.has_normals() {
        return Err(CodecError::invalid(
            "averaged normal encoding requires vertex normals",
        ));
    }
    bake_with_policy(mode, &stream.vertices(), policy)
}

/// Bake with an explicit grouping policy.
pub fn bake_with_policy(
    mode: BakeMode,
    vertices: &[Vertex],
    policy: GroupingPolicy,
) -> Result<Vec<BakedColor>, CodecError> {
    validate_original_indices(vertices)?;
    if let GroupingPolicy::Quantized { step } = policy {
        if !step.is_finite() || step <= 0.0 {
            return Err(CodecError::invalid(format!(
                "grouping step must be positive and finite, got {}",
                step
            )));
        }
    }

    let colors = match mode {
        BakeMode::PositionEncode => encode_positions(vertices),
        BakeMode::AveragedNormalEncode => encode_averaged_normals(vertices, policy),
    };
    Ok(colors)
}

fn validate_original_indices(vertices: &[Vertex]) -> Result<(), CodecError> {
    let n = vertices.len();
    let mut seen = vec![false; n];
    for (i, vertex) in vertices.iter().enumerate() {
        let idx = vertex.original_index as usize;
        if idx >= n {
            return Err(CodecError::invalid(format!(
                "vertex {} has original index {} outside 0..{}",
                i, idx, n
            )));
        }
        if std::mem::replace(&mut seen[idx], true) {
            return Err(CodecError::invalid(format!(
                "original index {} is assigned to more than one vertex",
                idx
            )));
        }
    }
    Ok(())
}

fn encode_positions(vertices: &[Vertex]) -> Vec<BakedColor> {
    let mut colors = vec![BakedColor::WHITE; vertices.len()];
    for vertex in vertices {
        colors[vertex.original_index as usize] = BakedColor::from_vec3(vertex.position);
    }
    colors
}

fn encode_averaged_normals(vertices: &[Vertex], policy: GroupingPolicy) -> Vec<BakedColor> {
    let groups = group_vertices(vertices, policy);
    debug!(
        vertices = vertices.len(),
        groups = groups.len(),
        largest_group = groups.largest(),
        "grouped vertex positions"
    );

    let mut colors = vec![BakedColor::WHITE; vertices.len()];
    for group in groups.iter() {
        // Members are in original-index order, so the sum is order-independent.
        let mut sum = Vec3::ZERO;
        for &i in group {
            sum += vertices[i].normal;
        }
        let average = BakedColor::from_vec3(sum / group.len() as f32);
        for &i in group {
            colors[vertices[i].original_index as usize] = average;
        }
    }
    colors
}

/// Rescale each color's RGB to unit length, leaving alpha untouched.
///
/// Zero-length colors are left as they are.
pub fn renormalize_colors(colors: &mut [BakedColor]) {
    for color in colors {
        let n = color.rgb().normalized();
        color.r = n.x;
        color.g = n.y;
        color.b = n.z;
    }
}

/// Returns true if any color differs from opaque white.
///
/// Host engines report white for meshes without vertex colors, so anything
/// else means baking would overwrite authored data.
pub fn has_custom_colors(colors: &[BakedColor]) -> bool {
    colors.iter().any(|c| *c != BakedColor::WHITE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(p: [f32; 3], n: [f32; 3], index: u32) -> Vertex {
        Vertex {
            position: Vec3::from(p),
            normal: Vec3::from(n),
            original_index: index,
        }
    }

    #[test]
    fn test_empty_input_is_empty_output() {
        assert!(bake(BakeMode::AveragedNormalEncode, &[]).unwrap().is_empty());
        assert!(bake(BakeMode::PositionEncode, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_original_index_rejected() {
        let verts = vec![vertex([0.0; 3], [0.0; 3], 0), vertex([1.0; 3], [0.0; 3], 0)];
        let err = bake(BakeMode::PositionEncode, &verts).unwrap_err();
        assert!(err.to_string().contains("more than one vertex"));
    }

    #[test]
    fn test_out_of_range_original_index_rejected() {
        let verts = vec![vertex([0.0; 3], [0.0; 3], 1)];
        assert!(bake(BakeMode::PositionEncode, &verts).is_err());
    }

    #[test]
    fn test_position_encode_writes_at_original_index() {
        let verts = vec![
            vertex([1.0, 2.0, 3.0], [0.0; 3], 1),
            vertex([-4.0, 5.0, 6.5], [0.0; 3], 0),
        ];
        let colors = bake(BakeMode::PositionEncode, &verts).unwrap();
        assert_eq!(colors[1], BakedColor::rgba(1.0, 2.0, 3.0, 1.0));
        assert_eq!(colors[0], BakedColor::rgba(-4.0, 5.0, 6.5, 1.0));
    }

    #[test]
    fn test_stream_without_normals_cannot_average() {
        let stream = VertexStream::positions_only(vec![Vec3::ZERO]);
        assert!(bake_stream(BakeMode::AveragedNormalEncode, &stream, GroupingPolicy::Exact).is_err());
        assert!(bake_stream(BakeMode::PositionEncode, &stream, GroupingPolicy::Exact).is_ok());
    }

    #[test]
    fn test_invalid_quantization_step_rejected() {
        let verts = vec![vertex([0.0; 3], [0.0; 3], 0)];
        let result = bake_with_policy(
            BakeMode::AveragedNormalEncode,
            &verts,
            GroupingPolicy::Quantized { step: 0.0 },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_renormalize_colors() {
        let mut colors = vec![
            BakedColor::rgba(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0, 1.0),
            BakedColor::rgba(0.0, 0.0, 0.0, 0.5),
        ];
        renormalize_colors(&mut colors);
        assert!((colors[0].rgb().length() - 1.0).abs() < 1e-6);
        assert_eq!(colors[1], BakedColor::rgba(0.0, 0.0, 0.0, 0.5));
    }

    #[test]
    fn test_has_custom_colors() {
        assert!(!has_custom_colors(&[]));
        assert!(!has_custom_colors(&[BakedColor::WHITE, BakedColor::WHITE]));
        assert!(has_custom_colors(&[
            BakedColor::WHITE,
            BakedColor::rgba(1.0, 0.0, 0.0, 1.0)
        ]));
    }
}
