//! Mapping a fixed-size point cloud onto an arbitrary mesh's vertex array.
//!
//! The cloud almost never has the same number of points as the mesh has
//! vertices, so point `i` reads the flat position array at `(i * 3) % len`.
//! Large clouds wrap around and revisit vertices; small clouds only cover the
//! start of the array. Regions of the mesh are not preserved.

use glam::Vec3;

/// Default uniform scale applied to mesh-space positions.
pub const DEFAULT_MESH_SCALE: f32 = 3.0;

/// Target position of point `index` on a mesh whose vertices are stored flat as `[x, y, z, x, y, z, …]`.
///
/// `mesh_positions.len()` must be a non-zero multiple of 3.
pub fn mesh_target(mesh_positions: &[f32], index: usize, scale: f32) -> Vec3 {
    let i3 = (index * 3) % mesh_positions.len();
    Vec3::new(
        mesh_positions[i3],
        mesh_positions[i3 + 1],
        mesh_positions[i3 + 2],
    ) * scale
}

/// Targets for every point of a `count`-point cloud.
pub fn mesh_targets(mesh_positions: &[f32], count: usize, scale: f32) -> Vec<Vec3> {
    if mesh_positions.len() < 3 || mesh_positions.len() % 3 != 0 {
        log::warn!(
            "Mesh position array of length {} is not a whole number of vertices",
            mesh_positions.len()
        );
        return Vec::new();
    }
    (0..count)
        .map(|i| mesh_target(mesh_positions, i, scale))
        .collect()
}
