//! Viewer configuration (window, graphics, asset paths, morph tuning). Loaded from plastikwelt.ron at startup.

use morph::MorphSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "plastikwelt.ron";

/// Startup settings. Loaded from `plastikwelt.ron` in the current directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Window width in logical pixels.
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Window height in logical pixels.
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    /// Enable vsync (recommended to avoid tearing).
    #[serde(default = "default_true")]
    pub vsync: bool,
    /// Point sprite size in world units.
    #[serde(default = "default_point_size")]
    pub point_size: f32,
    /// Timeline JSON (array of entries).
    #[serde(default = "default_timeline_path")]
    pub timeline_path: PathBuf,
    /// Directory holding the glTF/GLB files named in the timeline.
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,
    /// Fixed RNG seed for reproducible clouds and highlights. Random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub morph: MorphSettings,
}

fn default_window_width() -> u32 {
    1280
}
fn default_window_height() -> u32 {
    720
}
fn default_true() -> bool {
    true
}
fn default_point_size() -> f32 {
    0.035
}
fn default_timeline_path() -> PathBuf {
    PathBuf::from("assets/data/plastikwelt_timeline.json")
}
fn default_models_dir() -> PathBuf {
    PathBuf::from("assets/models")
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            vsync: default_true(),
            point_size: default_point_size(),
            timeline_path: default_timeline_path(),
            models_dir: default_models_dir(),
            seed: None,
            morph: MorphSettings::default(),
        }
    }
}

impl ViewerConfig {
    /// Load config from `plastikwelt.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use morph::{Easing, MorphTiming};

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: ViewerConfig = ron::from_str(
            "(window_width: 800, seed: Some(7), morph: (point_count: 500, timing: WallClock))",
        )
        .unwrap();
        assert_eq!(config.window_width, 800);
        assert_eq!(config.window_height, 720);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.morph.point_count, 500);
        assert_eq!(config.morph.timing, MorphTiming::WallClock);
        assert_eq!(config.morph.mesh_morph.easing, Easing::EaseInOut);
        assert_eq!(config.morph.post_mesh_unlock, 0.75);
    }

    #[test]
    fn easing_is_named_in_camel_case() {
        let config: ViewerConfig =
            ron::from_str("(morph: (cloud_morph: (duration: 2.0, easing: easeOutBack)))").unwrap();
        assert_eq!(config.morph.cloud_morph.easing, Easing::EaseOutBack);
        assert_eq!(config.morph.cloud_morph.duration, 2.0);
    }

    #[test]
    fn unknown_easing_becomes_ease_in_out_and_keeps_the_file() {
        let config: ViewerConfig = ron::from_str(
            "(window_width: 800, morph: (cloud_morph: (duration: 2.0, easing: bounce)))",
        )
        .unwrap();
        assert_eq!(config.window_width, 800);
        assert_eq!(config.morph.cloud_morph.easing, Easing::EaseInOut);
        assert_eq!(config.morph.cloud_morph.duration, 2.0);

        let path = std::env::temp_dir().join(format!("plastikwelt-easing-{}.ron", std::process::id()));
        std::fs::write(&path, "(window_width: 640, morph: (cloud_morph: (duration: 1.0, easing: wobble)))").unwrap();
        let loaded = ViewerConfig::load_from(&path);
        assert_eq!(loaded.window_width, 640);
        assert_eq!(loaded.morph.cloud_morph.easing, Easing::EaseInOut);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn invalid_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!("plastikwelt-config-{}.ron", std::process::id()));
        std::fs::write(&path, "(window_width: \"wide\")").unwrap();
        let config = ViewerConfig::load_from(&path);
        assert_eq!(config.window_width, 1280);
        assert_eq!(config.timeline_path, default_timeline_path());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = ViewerConfig::load_from(Path::new("/nonexistent/plastikwelt.ron"));
        assert!(config.vsync);
        assert_eq!(config.morph.point_count, 3000);
    }
}
