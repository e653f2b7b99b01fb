//! Tuning constants for morphs, transitions, and the contamination highlight.
//!
//! Every field has a default, so a partial config section only overrides what it names.

use engine_core::{Easing, DEFAULT_POINT_COUNT};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Duration and curve of one kind of morph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MorphCurve {
    /// Seconds (at the estimated frame rate when using frame-count timing).
    pub duration: f32,
    pub easing: Easing,
}

/// How a tween's progress advances each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MorphTiming {
    /// `t += 1 / (fps * duration)` per rendered frame, regardless of real frame time.
    FrameCount { fps: f32 },
    /// `t += dt / duration` using measured frame time.
    WallClock,
}

impl Default for MorphTiming {
    fn default() -> Self {
        MorphTiming::FrameCount { fps: 60.0 }
    }
}

impl MorphTiming {
    /// Progress increment for one frame of a tween lasting `duration` seconds.
    pub fn increment(&self, duration: f32, dt: f32) -> f32 {
        match *self {
            MorphTiming::FrameCount { fps } => 1.0 / (fps.max(1.0) * duration),
            MorphTiming::WallClock => dt.max(0.0) / duration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightSettings {
    /// Target RGB of contaminated points (#FF0138).
    pub color: [f32; 3],
    /// Upper bound (exclusive) of each point's random start delay, seconds.
    pub max_delay: f32,
    /// Fade length per point, seconds.
    pub fade_duration: f32,
}

impl Default for HighlightSettings {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0 / 255.0, 56.0 / 255.0],
            max_delay: 1.5,
            fade_duration: 0.7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphSettings {
    /// Particles in the cloud.
    pub point_count: usize,
    /// Uniform scale applied to mesh-space vertex positions.
    pub mesh_scale: f32,
    pub cloud_radius_min: f32,
    pub cloud_radius_max: f32,
    /// Cloud (or mesh) → mesh.
    pub mesh_morph: MorphCurve,
    /// Mesh → cloud.
    pub cloud_morph: MorphCurve,
    pub timing: MorphTiming,
    /// Lock held after returning to the opening cloud, seconds.
    pub return_settle: f32,
    /// Pause between arriving at a cloud and chaining into the next mesh, seconds.
    pub auto_advance_delay: f32,
    /// Lock held after a mesh morph completes, seconds.
    pub post_mesh_unlock: f32,
    /// Accumulated wheel delta per navigation step.
    pub wheel_threshold: f32,
    pub highlight: HighlightSettings,
}

impl Default for MorphSettings {
    fn default() -> Self {
        Self {
            point_count: DEFAULT_POINT_COUNT,
            mesh_scale: procgen::DEFAULT_MESH_SCALE,
            cloud_radius_min: procgen::DEFAULT_CLOUD_RADIUS.start,
            cloud_radius_max: procgen::DEFAULT_CLOUD_RADIUS.end,
            mesh_morph: MorphCurve {
                duration: 3.0,
                easing: Easing::EaseInOut,
            },
            cloud_morph: MorphCurve {
                duration: 1.0,
                easing: Easing::EaseOut,
            },
            timing: MorphTiming::default(),
            return_settle: 0.5,
            auto_advance_delay: 0.1,
            post_mesh_unlock: 0.75,
            wheel_threshold: input::DEFAULT_WHEEL_THRESHOLD,
            highlight: HighlightSettings::default(),
        }
    }
}

impl MorphSettings {
    pub fn cloud_radius(&self) -> Range<f32> {
        let min = self.cloud_radius_min.min(self.cloud_radius_max);
        let max = self.cloud_radius_min.max(self.cloud_radius_max);
        min..max
    }
}
