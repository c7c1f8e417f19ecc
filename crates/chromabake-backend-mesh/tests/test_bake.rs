//! Behavioral tests for vertex attribute baking.
//!
//! Covers position identity, group averaging, single-vertex groups and
//! independence from input order.

use chromabake_backend_mesh::{bake, bake_stream, group_vertices};
use chromabake_spec::{BakeMode, BakedColor, GroupingPolicy, Vec3, Vertex, VertexStream};

fn vertex(position: [f32; 3], normal: [f32; 3], original_index: u32) -> Vertex {
    Vertex {
        position: Vec3::from(position),
        normal: Vec3::from(normal),
        original_index,
    }
}

/// Six vertices: group A at the origin, group B at (1, 2, 3), interleaved.
fn two_group_mesh() -> Vec<Vertex> {
    vec![
        vertex([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], 0),
        vertex([1.0, 2.0, 3.0], [0.0, 0.0, 1.0], 1),
        vertex([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], 2),
        vertex([1.0, 2.0, 3.0], [0.0, 0.0, 1.0], 3),
        vertex([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], 4),
        vertex([1.0, 2.0, 3.0], [0.0, 0.0, 1.0], 5),
    ]
}

/// A mixed stream with seams, isolated vertices and awkward float values.
fn irregular_mesh() -> Vec<Vertex> {
    let positions = [
        [0.1, 0.2, 0.3],
        [0.1, 0.2, 0.3],
        [-0.0, 1.0, 0.5],
        [0.0, 1.0, 0.5],
        [1e-7, 0.0, 0.0],
        [0.1, 0.2, 0.3],
        [5.5, -2.25, 1.0],
        [0.0, 1.0, 0.5],
        [3.0, 3.0, 3.0],
        [0.1, 0.2, 0.3],
        [5.5, -2.25, 1.0],
    ];
    positions
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            let f = i as f32;
            let n = Vec3::new(f.sin(), f.cos(), (f * 0.37).sin()).normalized();
            vertex(p, n.to_array(), i as u32)
        })
        .collect()
}

/// Reorder the stream, keeping each vertex's original index.
fn permuted(vertices: &[Vertex], stride: usize) -> Vec<Vertex> {
    let n = vertices.len();
    (0..n).map(|i| vertices[(i * stride + 3) % n]).collect()
}

// ============================================================================
// Position encoding
// ============================================================================

#[test]
fn test_position_encode_is_identity() {
    let verts = irregular_mesh();
    let colors = bake(BakeMode::PositionEncode, &verts).unwrap();

    assert_eq!(colors.len(), verts.len());
    for v in &verts {
        let c = colors[v.original_index as usize];
        assert_eq!(c.rgb().to_bits(), v.position.to_bits());
        assert_eq!(c.a, 1.0);
    }
}

#[test]
fn test_position_encode_keeps_out_of_range_values() {
    let verts = vec![vertex([-12.5, 40.0, 0.001], [0.0; 3], 0)];
    let colors = bake(BakeMode::PositionEncode, &verts).unwrap();
    assert_eq!(colors[0], BakedColor::rgba(-12.5, 40.0, 0.001, 1.0));
}

#[test]
fn test_position_encode_does_not_group() {
    // Duplicated positions with different normals still encode their own position.
    let verts = two_group_mesh();
    let colors = bake(BakeMode::PositionEncode, &verts).unwrap();
    assert_eq!(colors[0], BakedColor::rgba(0.0, 0.0, 0.0, 1.0));
    assert_eq!(colors[1], BakedColor::rgba(1.0, 2.0, 3.0, 1.0));
}

// ============================================================================
// Averaged normal encoding
// ============================================================================

#[test]
fn test_two_groups_of_three() {
    let colors = bake(BakeMode::AveragedNormalEncode, &two_group_mesh()).unwrap();
    let third = 1.0f32 / 3.0;

    for i in [0, 2, 4] {
        let c = colors[i];
        assert!((c.r - third).abs() < 1e-6, "r at {}: {}", i, c.r);
        assert!((c.g - third).abs() < 1e-6, "g at {}: {}", i, c.g);
        assert!((c.b - third).abs() < 1e-6, "b at {}: {}", i, c.b);
        assert_eq!(c.a, 1.0);
    }
    for i in [1, 3, 5] {
        assert_eq!(colors[i], BakedColor::rgba(0.0, 0.0, 1.0, 1.0));
    }
}

#[test]
fn test_group_members_receive_identical_colors() {
    let verts = irregular_mesh();
    let colors = bake(BakeMode::AveragedNormalEncode, &verts).unwrap();
    let groups = group_vertices(&verts, GroupingPolicy::Exact);

    for group in groups.iter() {
        let first = colors[verts[group[0]].original_index as usize];
        for &i in group {
            assert_eq!(colors[verts[i].original_index as usize], first);
        }
    }
}

#[test]
fn test_group_sum_equals_count_times_average() {
    let verts = irregular_mesh();
    let colors = bake(BakeMode::AveragedNormalEncode, &verts).unwrap();
    let groups = group_vertices(&verts, GroupingPolicy::Exact);

    for group in groups.iter() {
        let mut normal_sum = Vec3::ZERO;
        let mut color_sum = Vec3::ZERO;
        for &i in group {
            normal_sum += verts[i].normal;
            color_sum += colors[verts[i].original_index as usize].rgb();
        }
        assert!((normal_sum.x - color_sum.x).abs() < 1e-5);
        assert!((normal_sum.y - color_sum.y).abs() < 1e-5);
        assert!((normal_sum.z - color_sum.z).abs() < 1e-5);
    }
}

#[test]
fn test_single_vertex_group_is_noop() {
    let verts = irregular_mesh();
    let colors = bake(BakeMode::AveragedNormalEncode, &verts).unwrap();

    // (3, 3, 3) and (1e-7, 0, 0) each appear once.
    for i in [4, 8] {
        assert_eq!(colors[i].rgb().to_bits(), verts[i].normal.to_bits());
    }
}

#[test]
fn test_average_is_not_renormalized() {
    let verts = vec![
        vertex([0.0; 3], [1.0, 0.0, 0.0], 0),
        vertex([0.0; 3], [-1.0, 0.0, 0.0], 1),
    ];
    let colors = bake(BakeMode::AveragedNormalEncode, &verts).unwrap();
    assert_eq!(colors[0], BakedColor::rgba(0.0, 0.0, 0.0, 1.0));
    assert_eq!(colors[1], colors[0]);
}

#[test]
fn test_signed_zero_positions_share_group() {
    let verts = irregular_mesh();
    let colors = bake(BakeMode::AveragedNormalEncode, &verts).unwrap();
    // -0.0 at index 2 equals 0.0 at indices 3 and 7.
    assert_eq!(colors[2], colors[3]);
    assert_eq!(colors[3], colors[7]);
}

// ============================================================================
// Order independence
// ============================================================================

#[test]
fn test_permutation_yields_same_per_index_output() {
    let verts = irregular_mesh();
    let baseline = bake(BakeMode::AveragedNormalEncode, &verts).unwrap();

    for stride in [2, 3, 5, 7] {
        let shuffled = permuted(&verts, stride);
        let colors = bake(BakeMode::AveragedNormalEncode, &shuffled).unwrap();
        for (a, b) in baseline.iter().zip(&colors) {
            assert_eq!(
                a.rgb().to_bits(),
                b.rgb().to_bits(),
                "stride {} changed the result",
                stride
            );
        }
    }
}

#[test]
fn test_permutation_position_encode() {
    let verts = irregular_mesh();
    let baseline = bake(BakeMode::PositionEncode, &verts).unwrap();
    let colors = bake(BakeMode::PositionEncode, &permuted(&verts, 4)).unwrap();
    assert_eq!(baseline, colors);
}

// ============================================================================
// Streams
// ============================================================================

#[test]
fn test_bake_stream_matches_bake() {
    let verts = two_group_mesh();
    let stream = VertexStream::new(
        verts.iter().map(|v| v.position).collect(),
        verts.iter().map(|v| v.normal).collect(),
    )
    .unwrap();

    let from_stream =
        bake_stream(BakeMode::AveragedNormalEncode, &stream, GroupingPolicy::Exact).unwrap();
    let from_vertices = bake(BakeMode::AveragedNormalEncode, &verts).unwrap();
    assert_eq!(from_stream, from_vertices);
}

#[test]
fn test_mismatched_stream_is_invalid_input() {
    let err = VertexStream::new(vec![Vec3::ZERO; 3], vec![Vec3::ZERO; 2]).unwrap_err();
    assert!(err.to_string().contains("got 3 and 2"));
}

#[test]
fn test_quantized_grouping_merges_near_duplicates() {
    let stream = VertexStream::new(
        vec![Vec3::new(0.5, 0.5, 0.5), Vec3::new(0.500001, 0.5, 0.5)],
        vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)],
    )
    .unwrap();

    let exact =
        bake_stream(BakeMode::AveragedNormalEncode, &stream, GroupingPolicy::Exact).unwrap();
    assert_ne!(exact[0], exact[1]);

    let merged = bake_stream(
        BakeMode::AveragedNormalEncode,
        &stream,
        GroupingPolicy::Quantized { step: 1e-3 },
    )
    .unwrap();
    assert_eq!(merged[0], BakedColor::rgba(0.5, 0.5, 0.0, 1.0));
    assert_eq!(merged[0], merged[1]);
}
