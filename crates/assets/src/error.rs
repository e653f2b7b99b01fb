use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("cannot read timeline {path}: {source}")]
    TimelineIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid timeline {path}: {source}")]
    TimelineFormat {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("cannot import mesh {path}: {source}")]
    Import { path: PathBuf, source: gltf::Error },

    #[error("mesh {0} has no primitive with vertex positions")]
    NoPositions(PathBuf),

    #[error("mesh {path}: {source}")]
    Geometry {
        path: PathBuf,
        source: morph::GeometryError,
    },
}
