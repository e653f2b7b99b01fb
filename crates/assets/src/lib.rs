//! Loads the timeline JSON and every mesh it references, once, before navigation starts.

mod error;
mod loader;

pub use error::AssetError;
pub use loader::{parse_timeline, unique_meshes, AssetLoader, FileAssetLoader, LoadProgress};
