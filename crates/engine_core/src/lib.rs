//! Core types shared by the Plastikwelt crates.
//!
//! This crate provides the foundational pieces every other crate builds on:
//! - The fixed-size point buffer the morph effects write into
//! - Easing curves
//! - Frame timing

pub mod easing;
pub mod point_buffer;
pub mod time;

pub use easing::*;
pub use point_buffer::*;
pub use time::*;

// Re-export commonly used types
pub use glam::{Mat4, Vec2, Vec3, Vec4};
