//! Preloaded mesh geometry and the in-memory asset bundle handed to the controller.

use crate::timeline::{MeshId, TimelineEntry};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("mesh has no vertices")]
    Empty,
    #[error("position array length {0} is not a multiple of 3")]
    Ragged(usize),
    #[error("position array contains non-finite values")]
    NonFinite,
}

/// Flat `[x, y, z, x, y, z, …]` vertex positions of one mesh, in model space.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshGeometry {
    positions: Vec<f32>,
}

impl MeshGeometry {
    pub fn new(positions: Vec<f32>) -> Result<Self, GeometryError> {
        if positions.is_empty() {
            return Err(GeometryError::Empty);
        }
        if positions.len() % 3 != 0 {
            return Err(GeometryError::Ragged(positions.len()));
        }
        if positions.iter().any(|v| !v.is_finite()) {
            return Err(GeometryError::NonFinite);
        }
        Ok(Self { positions })
    }

    pub fn from_vertices(vertices: &[[f32; 3]]) -> Result<Self, GeometryError> {
        Self::new(vertices.iter().flatten().copied().collect())
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// Lookup from mesh id to its geometry.
pub type MeshLibrary = HashMap<MeshId, MeshGeometry>;

/// Everything the controller needs from the loader, already decoded.
#[derive(Debug, Clone, Default)]
pub struct TimelineAssets {
    pub entries: Vec<TimelineEntry>,
    pub meshes: MeshLibrary,
}

impl TimelineAssets {
    pub fn new(entries: Vec<TimelineEntry>, meshes: MeshLibrary) -> Self {
        Self { entries, meshes }
    }

    /// Mesh ids referenced by the timeline but absent from the library, in timeline order.
    pub fn missing_meshes(&self) -> Vec<&MeshId> {
        let mut missing: Vec<&MeshId> = Vec::new();
        for entry in &self.entries {
            if !self.meshes.contains_key(&entry.mesh) && !missing.contains(&&entry.mesh) {
                missing.push(&entry.mesh);
            }
        }
        missing
    }
}
