//! Partitioning a vertex stream into equal-position groups.

use std::collections::HashMap;

use chromabake_spec::{GroupingPolicy, Vec3, Vertex};

/// Hash key for a position under a grouping policy.
type PositionKey = [u64; 3];

/// Canonical NaN bit pattern so every NaN compares equal to every other.
const CANONICAL_NAN: u32 = 0x7fc0_0000;

/// Groups of vertex indices (into the input slice) sharing a position.
///
/// Members of each group are sorted by `original_index`, so the group
/// contents never depend on the order of the input array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexGroups {
    groups: Vec<Vec<usize>>,
}

impl VertexGroups {
    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if there are no groups (empty input).
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate the groups.
    pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
        self.groups.iter().map(Vec::as_slice)
    }

    /// Size of the largest group.
    pub fn largest(&self) -> usize {
        self.groups.iter().map(Vec::len).max().unwrap_or(0)
    }
}

fn exact_component(v: f32) -> u64 {
    // `-0.0 == 0.0`, so both map to the +0.0 pattern.
    if v == 0.0 {
        0
    } else if v.is_nan() {
        CANONICAL_NAN as u64
    } else {
        v.to_bits() as u64
    }
}

fn quantized_component(v: f32, step: f32) -> u64 {
    ((v as f64 / step as f64).round() as i64) as u64
}

fn position_key(p: Vec3, policy: GroupingPolicy) -> PositionKey {
    match policy {
        GroupingPolicy::Exact => [
            exact_component(p.x),
            exact_component(p.y),
            exact_component(p.z),
        ],
        GroupingPolicy::Quantized { step } => [
            quantized_component(p.x, step),
            quantized_component(p.y, step),
            quantized_component(p.z, step),
        ],
    }
}

/// Partition `vertices` into groups of equal position. O(n).
///
/// Every vertex lands in exactly one group.
pub fn group_vertices(vertices: &[Vertex], policy: GroupingPolicy) -> VertexGroups {
    let mut index_of: HashMap<PositionKey, usize> = HashMap::with_capacity(vertices.len());
    let mut groups: Vec<Vec<usize>> = Vec::new();

    for (i, vertex) in vertices.iter().enumerate() {
        let key = position_key(vertex.position, policy);
        let group = *index_of.entry(key).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[group].push(i);
    }

    for group in &mut groups {
        group.sort_by_key(|&i| vertices[i].original_index);
    }

    VertexGroups { groups }
}
