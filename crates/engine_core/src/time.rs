//! Frame timing for the render loop.

use std::time::{Duration, Instant};

/// Longest frame delta handed to animations. Protects tweens and timers from
/// jumping to the end after the window was hidden or the process was suspended.
const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

/// Tracks per-frame delta time and frame count.
///
/// The live loop calls [`FrameClock::update`] once per rendered frame; tests and
/// headless runs drive it with [`FrameClock::advance`] instead.
#[derive(Debug)]
pub struct FrameClock {
    /// Time of the last frame.
    last_frame: Instant,
    /// Duration of the last frame (clamped to `MAX_FRAME_DELTA`).
    delta: Duration,
    /// Total elapsed time across all frames.
    elapsed: Duration,
    /// Frame count since start.
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Sample the wall clock at the start of a new frame.
    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now - self.last_frame;
        self.last_frame = now;
        self.advance(delta);
    }

    /// Step the clock by an explicit amount.
    pub fn advance(&mut self, delta: Duration) {
        self.delta = delta.min(MAX_FRAME_DELTA);
        self.elapsed += self.delta;
        self.frame_count += 1;
    }

    /// Delta time of the last frame in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    pub fn delta(&self) -> Duration {
        self.delta
    }

    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Instantaneous FPS from the last frame.
    pub fn fps(&self) -> f32 {
        if self.delta.as_secs_f32() > 0.0 {
            1.0 / self.delta.as_secs_f32()
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates_elapsed_and_frames() {
        let mut clock = FrameClock::new();
        clock.advance(Duration::from_millis(16));
        clock.advance(Duration::from_millis(16));
        assert_eq!(clock.frame_count(), 2);
        assert!((clock.elapsed_seconds() - 0.032).abs() < 1e-6);
    }

    #[test]
    fn long_frames_are_clamped() {
        let mut clock = FrameClock::new();
        clock.advance(Duration::from_secs(5));
        assert_eq!(clock.delta(), MAX_FRAME_DELTA);
        assert!((clock.fps() - 4.0).abs() < 1e-3);
    }
}
