//! Random sampling helpers.
//!
//! Every function takes the caller's generator so each render worker can
//! keep its own independent stream.

use crate::Vec3;
use rand::Rng;

/// Uniform sample in [-1, 1).
#[inline]
pub fn random_signed<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen::<f32>() * 2.0 - 1.0
}

/// Uniform point inside the unit ball, by rejection sampling.
///
/// Draws three independent components in [-1, 1) until the squared length
/// is at most 1.
pub fn random_in_unit_ball<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let p = Vec3::new(random_signed(rng), random_signed(rng), random_signed(rng));
        if p.length_squared() <= 1.0 {
            return p;
        }
    }
}

/// Sample a random point in the unit square [-0.5, 0.5) x [-0.5, 0.5).
///
/// The z component is always zero.
#[inline]
pub fn random_in_unit_square<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    Vec3::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5, 0.0)
}
