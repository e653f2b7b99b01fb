//! Fixed-size particle storage shared by the morph and highlight effects.
//!
//! Positions and colors are separate attributes so that a position tween and a
//! color effect can write to the same buffer in one frame without stepping on
//! each other. The buffer never grows or shrinks after construction.

use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4};
use thiserror::Error;

/// Default particle count for the timeline cloud.
pub const DEFAULT_POINT_COUNT: usize = 3000;

/// Errors raised by [`PointBuffer`] mutators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PointBufferError {
    #[error("point index {index} out of range (buffer holds {len} points)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Which attributes changed since the render surface last looked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirtyFlags {
    pub positions: bool,
    pub colors: bool,
}

impl DirtyFlags {
    pub fn any(&self) -> bool {
        self.positions || self.colors
    }
}

/// GPU-facing layout of one point (position + RGBA color).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// Owned copy of every point at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSnapshot {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Vec4>,
}

/// N points, each with a position and an RGBA color in `[0, 1]`.
#[derive(Debug, Clone)]
pub struct PointBuffer {
    positions: Vec<Vec3>,
    colors: Vec<Vec4>,
    dirty: DirtyFlags,
}

impl PointBuffer {
    /// Create `count` points at the origin, all opaque white.
    pub fn new(count: usize) -> Self {
        Self::from_positions(vec![Vec3::ZERO; count], Vec4::ONE)
    }

    /// Create a buffer from explicit positions, every point sharing `color`.
    pub fn from_positions(positions: Vec<Vec3>, color: Vec4) -> Self {
        let colors = vec![color; positions.len()];
        Self {
            positions,
            colors,
            dirty: DirtyFlags { positions: true, colors: true },
        }
    }

    /// Number of points. Fixed at construction.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[Vec4] {
        &self.colors
    }

    pub fn position(&self, index: usize) -> Option<Vec3> {
        self.positions.get(index).copied()
    }

    pub fn color(&self, index: usize) -> Option<Vec4> {
        self.colors.get(index).copied()
    }

    /// Overwrite one point's position.
    pub fn set_position(&mut self, index: usize, position: Vec3) -> Result<(), PointBufferError> {
        let len = self.len();
        let slot = self
            .positions
            .get_mut(index)
            .ok_or(PointBufferError::IndexOutOfRange { index, len })?;
        *slot = position;
        self.dirty.positions = true;
        Ok(())
    }

    /// Overwrite one point's color.
    pub fn set_color(&mut self, index: usize, color: Vec4) -> Result<(), PointBufferError> {
        let len = self.len();
        let slot = self
            .colors
            .get_mut(index)
            .ok_or(PointBufferError::IndexOutOfRange { index, len })?;
        *slot = color;
        self.dirty.colors = true;
        Ok(())
    }

    /// Overwrite every position at once. `positions` must match the buffer length.
    pub fn write_positions(&mut self, positions: &[Vec3]) -> Result<(), PointBufferError> {
        if positions.len() != self.len() {
            return Err(PointBufferError::LengthMismatch {
                expected: self.len(),
                actual: positions.len(),
            });
        }
        self.positions.copy_from_slice(positions);
        self.dirty.positions = true;
        Ok(())
    }

    /// Overwrite every color at once. `colors` must match the buffer length.
    pub fn write_colors(&mut self, colors: &[Vec4]) -> Result<(), PointBufferError> {
        if colors.len() != self.len() {
            return Err(PointBufferError::LengthMismatch {
                expected: self.len(),
                actual: colors.len(),
            });
        }
        self.colors.copy_from_slice(colors);
        self.dirty.colors = true;
        Ok(())
    }

    /// Copy out the current positions and colors.
    pub fn snapshot(&self) -> PointSnapshot {
        PointSnapshot {
            positions: self.positions.clone(),
            colors: self.colors.clone(),
        }
    }

    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    /// Return and clear the dirty flags. Called by the render surface once per frame.
    pub fn take_dirty(&mut self) -> DirtyFlags {
        std::mem::take(&mut self.dirty)
    }

    /// Interleaved vertex data for upload.
    pub fn vertices(&self) -> Vec<PointVertex> {
        self.positions
            .iter()
            .zip(&self.colors)
            .map(|(p, c)| PointVertex {
                position: p.to_array(),
                color: c.to_array(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_white_and_dirty() {
        let buf = PointBuffer::new(4);
        assert_eq!(buf.len(), 4);
        assert!(buf.colors().iter().all(|c| *c == Vec4::ONE));
        assert!(buf.dirty().positions && buf.dirty().colors);
    }

    #[test]
    fn set_position_out_of_range_is_rejected() {
        let mut buf = PointBuffer::new(2);
        let err = buf.set_position(2, Vec3::X).unwrap_err();
        assert_eq!(err, PointBufferError::IndexOutOfRange { index: 2, len: 2 });
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn take_dirty_clears_flags_until_next_write() {
        let mut buf = PointBuffer::new(3);
        assert!(buf.take_dirty().any());
        assert!(!buf.dirty().any());

        buf.set_color(1, Vec4::new(1.0, 0.0, 0.0, 1.0)).unwrap();
        let dirty = buf.take_dirty();
        assert!(dirty.colors);
        assert!(!dirty.positions);
    }

    #[test]
    fn write_colors_requires_matching_length() {
        let mut buf = PointBuffer::new(3);
        let err = buf.write_colors(&[Vec4::ZERO; 2]).unwrap_err();
        assert_eq!(err, PointBufferError::LengthMismatch { expected: 3, actual: 2 });
    }

    #[test]
    fn snapshot_is_detached_from_later_writes() {
        let mut buf = PointBuffer::new(2);
        let snap = buf.snapshot();
        buf.set_position(0, Vec3::splat(5.0)).unwrap();
        assert_eq!(snap.positions[0], Vec3::ZERO);
        assert_eq!(buf.position(0), Some(Vec3::splat(5.0)));
    }

    #[test]
    fn vertices_interleave_position_and_color() {
        let buf = PointBuffer::from_positions(vec![Vec3::new(1.0, 2.0, 3.0)], Vec4::new(0.1, 0.2, 0.3, 0.4));
        let v = buf.vertices();
        assert_eq!(v[0].position, [1.0, 2.0, 3.0]);
        assert_eq!(v[0].color, [0.1, 0.2, 0.3, 0.4]);
        assert_eq!(std::mem::size_of::<PointVertex>(), 28);
    }
}
