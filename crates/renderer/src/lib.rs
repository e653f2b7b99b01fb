//! Point-cloud rendering with wgpu.

pub mod camera;
pub mod pipeline;
pub mod renderer;
pub mod texture;

pub use camera::*;
pub use pipeline::*;
pub use renderer::*;
pub use texture::*;
