use crate::AssetError;
use morph::{MeshGeometry, MeshId, MeshLibrary, TimelineAssets, TimelineEntry};
use std::path::{Path, PathBuf};

/// Source of the timeline and its meshes.
pub trait AssetLoader {
    fn load(&self) -> Result<TimelineAssets, AssetError>;
}

/// Preload counter. Failed meshes count as processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadProgress {
    pub loaded: usize,
    pub total: usize,
}

impl LoadProgress {
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        ((self.loaded as f64 / self.total as f64) * 100.0).round() as u32
    }
}

/// Decode the timeline JSON (an array of entries).
pub fn parse_timeline(json: &str) -> Result<Vec<TimelineEntry>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Mesh ids in first-reference order, without duplicates.
pub fn unique_meshes(entries: &[TimelineEntry]) -> Vec<MeshId> {
    let mut ids: Vec<MeshId> = Vec::new();
    for entry in entries {
        if !ids.contains(&entry.mesh) {
            ids.push(entry.mesh.clone());
        }
    }
    ids
}

/// Reads the timeline from disk and each mesh as `<models_dir>/<mesh id>` (glTF or GLB).
#[derive(Debug, Clone)]
pub struct FileAssetLoader {
    timeline_path: PathBuf,
    models_dir: PathBuf,
}

impl FileAssetLoader {
    pub fn new(timeline_path: impl Into<PathBuf>, models_dir: impl Into<PathBuf>) -> Self {
        Self {
            timeline_path: timeline_path.into(),
            models_dir: models_dir.into(),
        }
    }

    pub fn timeline_path(&self) -> &Path {
        &self.timeline_path
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    pub fn load_timeline(&self) -> Result<Vec<TimelineEntry>, AssetError> {
        let json = std::fs::read_to_string(&self.timeline_path).map_err(|source| AssetError::TimelineIo {
            path: self.timeline_path.clone(),
            source,
        })?;
        parse_timeline(&json).map_err(|source| AssetError::TimelineFormat {
            path: self.timeline_path.clone(),
            source,
        })
    }

    /// Vertex positions of the first primitive of the first mesh met walking the
    /// default scene depth-first. Files without a scene use the first listed mesh.
    pub fn load_mesh(&self, id: &MeshId) -> Result<MeshGeometry, AssetError> {
        let path = self.models_dir.join(id.as_str());
        let (document, buffers, _images) = gltf::import(&path).map_err(|source| AssetError::Import {
            path: path.clone(),
            source,
        })?;

        let scene = document.default_scene().or_else(|| document.scenes().next());
        let mesh = match scene {
            Some(scene) => scene.nodes().find_map(first_mesh_in),
            None => document.meshes().next(),
        };
        let primitive = mesh
            .and_then(|mesh| mesh.primitives().next())
            .ok_or_else(|| AssetError::NoPositions(path.clone()))?;
        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));
        let positions: Vec<[f32; 3]> = reader
            .read_positions()
            .ok_or_else(|| AssetError::NoPositions(path.clone()))?
            .collect();

        MeshGeometry::from_vertices(&positions).map_err(|source| AssetError::Geometry { path, source })
    }
}

/// Pre-order walk: the node itself, then its children in order.
fn first_mesh_in(node: gltf::Node<'_>) -> Option<gltf::Mesh<'_>> {
    node.mesh().or_else(|| node.children().find_map(first_mesh_in))
}

impl AssetLoader for FileAssetLoader {
    /// A missing or malformed timeline is fatal. A mesh that fails to load is
    /// logged and left out; the controller skips its morph.
    fn load(&self) -> Result<TimelineAssets, AssetError> {
        let entries = self.load_timeline()?;
        log::info!(
            "Timeline loaded: {} entries from {}",
            entries.len(),
            self.timeline_path.display()
        );

        let ids = unique_meshes(&entries);
        let mut progress = LoadProgress {
            loaded: 0,
            total: ids.len(),
        };
        let mut meshes = MeshLibrary::new();
        for id in ids {
            let result = self.load_mesh(&id);
            progress.loaded += 1;
            match result {
                Ok(geometry) => {
                    log::info!(
                        "Loaded {} ({}/{}, {}%)",
                        id,
                        progress.loaded,
                        progress.total,
                        progress.percent()
                    );
                    meshes.insert(id, geometry);
                }
                Err(e) => log::error!("Failed to load {}: {}", id, e),
            }
        }
        log::info!("All assets loaded ({} of {} meshes)", meshes.len(), progress.total);

        Ok(TimelineAssets::new(entries, meshes))
    }
}
