//! Diffuse spherical point clouds shown between mesh states.

use glam::Vec3;
use rand::Rng;
use std::ops::Range;

/// Default radial band of the cloud shell.
pub const DEFAULT_CLOUD_RADIUS: Range<f32> = 2.0..4.0;

/// One point uniformly distributed in direction, with radius drawn uniformly from `radius`.
pub fn random_cloud_point<R: Rng + ?Sized>(rng: &mut R, radius: &Range<f32>) -> Vec3 {
    let u: f32 = rng.gen();
    let v: f32 = rng.gen();
    let theta = std::f32::consts::TAU * u;
    let phi = (2.0 * v - 1.0).acos();
    let r = radius.start + rng.gen::<f32>() * (radius.end - radius.start);
    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

/// A fresh cloud of `count` points.
pub fn random_cloud<R: Rng + ?Sized>(rng: &mut R, count: usize, radius: &Range<f32>) -> Vec<Vec3> {
    (0..count).map(|_| random_cloud_point(rng, radius)).collect()
}
