//! Procedural point placement: random clouds, mesh sampling, and random selections.

pub mod cloud;
pub mod mesh_sampling;
pub mod selection;

pub use cloud::*;
pub use mesh_sampling::*;
pub use selection::*;
