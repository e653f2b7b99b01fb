//! Contamination highlight: fades a random fraction of the points toward a warning color.
//!
//! Each effect carries the version it was started with. The controller bumps its
//! counter on every transition, and an effect whose version no longer matches
//! stops advancing on its next frame. Cancelling restores the full color snapshot
//! taken when the effect started.

use crate::settings::HighlightSettings;
use engine_core::PointBuffer;
use glam::{Vec3, Vec4};
use rand::Rng;

/// State of one started highlight.
#[derive(Debug, Clone)]
pub struct HighlightEffect {
    selected: Vec<usize>,
    delays: Vec<f32>,
    original_colors: Vec<Vec4>,
    version: u64,
    /// Seconds since the effect started.
    elapsed: f32,
    /// Cleared once every selected point has fully faded, or the version went stale.
    running: bool,
}

impl HighlightEffect {
    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    pub fn delays(&self) -> &[f32] {
        &self.delays
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn original_colors(&self) -> &[Vec4] {
        &self.original_colors
    }
}

#[derive(Debug, Default)]
pub struct Highlight {
    settings: HighlightSettings,
    effect: Option<HighlightEffect>,
}

impl Highlight {
    pub fn new(settings: HighlightSettings) -> Self {
        Self {
            settings,
            effect: None,
        }
    }

    pub fn effect(&self) -> Option<&HighlightEffect> {
        self.effect.as_ref()
    }

    /// True while the effect still has points mid-fade.
    pub fn is_running(&self) -> bool {
        self.effect.as_ref().is_some_and(|e| e.running)
    }

    /// Start a highlight of `rate` (fraction of points) tagged with `version`.
    ///
    /// Any previous effect is cancelled first. `rate <= 0` selects nothing.
    pub fn start<R: Rng + ?Sized>(&mut self, points: &mut PointBuffer, rate: f64, version: u64, rng: &mut R) {
        self.cancel(points);
        if !(rate > 0.0) || points.is_empty() {
            return;
        }
        let count = points.len();
        let quota = (count as f64 * rate.min(1.0)).floor() as usize;
        if quota == 0 {
            return;
        }

        let selected = procgen::shuffled_prefix(rng, count, quota);
        let delays = selected
            .iter()
            .map(|_| rng.gen::<f32>() * self.settings.max_delay)
            .collect();
        log::debug!("Highlighting {} of {} points (version {})", quota, count, version);
        self.effect = Some(HighlightEffect {
            selected,
            delays,
            original_colors: points.colors().to_vec(),
            version,
            elapsed: 0.0,
            running: true,
        });
    }

    /// Advance one frame. Returns whether the effect is still animating.
    pub fn step(&mut self, points: &mut PointBuffer, dt: f32, current_version: u64) -> bool {
        let Some(effect) = self.effect.as_mut() else {
            return false;
        };
        if !effect.running {
            return false;
        }
        if effect.version != current_version {
            log::debug!("Highlight version {} is stale (now {})", effect.version, current_version);
            effect.running = false;
            return false;
        }

        effect.elapsed += dt.max(0.0);
        let target = Vec3::from_array(self.settings.color);
        let fade = self.settings.fade_duration.max(f32::EPSILON);
        let mut any_active = false;
        for (&index, &delay) in effect.selected.iter().zip(&effect.delays) {
            let t = ((effect.elapsed - delay) / fade).clamp(0.0, 1.0);
            if t < 1.0 {
                any_active = true;
            }
            let original = effect.original_colors[index];
            let rgb = target * t + original.truncate() * (1.0 - t);
            if let Err(e) = points.set_color(index, rgb.extend(original.w)) {
                log::warn!("Highlight stopped: {}", e);
                effect.running = false;
                return false;
            }
        }
        effect.running = any_active;
        any_active
    }

    /// Restore every color to its pre-effect value and forget the effect.
    pub fn cancel(&mut self, points: &mut PointBuffer) {
        if let Some(effect) = self.effect.take() {
            if let Err(e) = points.write_colors(&effect.original_colors) {
                log::warn!("Could not restore highlight colors: {}", e);
            }
        }
    }

    /// Forget the effect without touching any buffer (the buffer it ran on is gone).
    pub fn discard(&mut self) {
        self.effect = None;
    }
}
