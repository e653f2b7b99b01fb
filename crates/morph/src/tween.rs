//! Interpolation engine: one position tween at a time over the shared point buffer.

use crate::settings::MorphTiming;
use engine_core::{Easing, PointBuffer};
use glam::Vec3;

/// Shortest accepted tween, seconds. Zero or negative durations finish on the next frame.
const MIN_DURATION: f32 = 1e-3;

/// Identifies one started tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MorphHandle(u64);

/// Outcome of [`MorphEngine::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphStart {
    /// The tween runs from the next [`MorphEngine::step`] until it reports this handle.
    InFlight(MorphHandle),
    /// Nothing to animate (no buffer, or arrays that don't fit it); already finished.
    Resolved,
}

/// Interpolation from `start` to `end` for every point.
#[derive(Debug, Clone)]
pub struct MorphTween {
    handle: MorphHandle,
    start: Vec<Vec3>,
    end: Vec<Vec3>,
    duration: f32,
    easing: Easing,
    /// Linear progress in `[0, 1]` before easing.
    elapsed_fraction: f32,
    /// Reused per-frame output, same length as the buffer.
    scratch: Vec<Vec3>,
}

impl MorphTween {
    pub fn handle(&self) -> MorphHandle {
        self.handle
    }

    pub fn elapsed_fraction(&self) -> f32 {
        self.elapsed_fraction
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn end(&self) -> &[Vec3] {
        &self.end
    }
}

#[derive(Debug, Default)]
pub struct MorphEngine {
    timing: MorphTiming,
    active: Option<MorphTween>,
    next_handle: u64,
}

impl MorphEngine {
    pub fn new(timing: MorphTiming) -> Self {
        Self {
            timing,
            active: None,
            next_handle: 0,
        }
    }

    pub fn timing(&self) -> MorphTiming {
        self.timing
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&MorphTween> {
        self.active.as_ref()
    }

    /// Begin tweening from `start` to `end`. Replaces any tween already in flight.
    ///
    /// Both arrays must have one entry per point; otherwise, or when the buffer
    /// does not exist yet, nothing is scheduled and `Resolved` is returned.
    pub fn start(
        &mut self,
        points: Option<&PointBuffer>,
        start: Vec<Vec3>,
        end: Vec<Vec3>,
        duration: f32,
        easing: Easing,
    ) -> MorphStart {
        let Some(points) = points else {
            log::debug!("No point buffer yet, morph resolves immediately");
            return MorphStart::Resolved;
        };
        if points.is_empty() || start.len() != points.len() || end.len() != points.len() {
            log::warn!(
                "Morph arrays ({} -> {}) do not match buffer of {} points",
                start.len(),
                end.len(),
                points.len()
            );
            return MorphStart::Resolved;
        }
        if let Some(previous) = self.active.take() {
            log::debug!("Morph {:?} superseded", previous.handle);
        }

        self.next_handle += 1;
        let handle = MorphHandle(self.next_handle);
        let scratch = start.clone();
        self.active = Some(MorphTween {
            handle,
            start,
            end,
            duration: duration.max(MIN_DURATION),
            easing,
            elapsed_fraction: 0.0,
            scratch,
        });
        MorphStart::InFlight(handle)
    }

    /// Drop the tween identified by `handle`, leaving the buffer where it is.
    pub fn cancel(&mut self, handle: MorphHandle) -> bool {
        if self.active.as_ref().is_some_and(|t| t.handle == handle) {
            self.active = None;
            true
        } else {
            false
        }
    }

    /// Drop whatever tween is in flight.
    pub fn cancel_all(&mut self) {
        self.active = None;
    }

    /// Advance one rendered frame and write the interpolated positions.
    ///
    /// Returns the handle of the tween that finished on this frame. The final
    /// frame writes `end` verbatim so the buffer lands exactly on the target.
    pub fn step(&mut self, points: &mut PointBuffer, dt: f32) -> Option<MorphHandle> {
        let tween = self.active.as_mut()?;
        let increment = self.timing.increment(tween.duration, dt);
        tween.elapsed_fraction = (tween.elapsed_fraction + increment).clamp(0.0, 1.0);

        let result = if tween.elapsed_fraction >= 1.0 {
            points.write_positions(&tween.end)
        } else {
            let progress = tween.easing.apply(tween.elapsed_fraction);
            for ((out, s), e) in tween.scratch.iter_mut().zip(&tween.start).zip(&tween.end) {
                *out = *s + (*e - *s) * progress;
            }
            points.write_positions(&tween.scratch)
        };

        if let Err(e) = result {
            log::warn!("Morph {:?} aborted: {}", tween.handle, e);
            return self.active.take().map(|t| t.handle);
        }
        if tween.elapsed_fraction >= 1.0 {
            self.active.take().map(|t| t.handle)
        } else {
            None
        }
    }
}
