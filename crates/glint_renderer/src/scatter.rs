//! Surface scattering for each material.
//!
//! This is the only place that looks at the material variant; the
//! integrator only sees `Option<ScatterResult>`.

use glint_core::Material;
use glint_math::{random_in_unit_ball, Color, Ray, Vec3};
use rand::{Rng, RngCore};

use crate::HitRecord;

/// A scattered ray and the per-channel factor applied to its radiance.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    pub attenuation: Color,
    pub scattered: Ray,
}

/// Trait for surfaces that scatter incoming light.
pub trait Scatter {
    /// Scatter an incoming ray at `rec`.
    ///
    /// Returns `None` if the ray is absorbed.
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult>;
}

impl Scatter for Material {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match *self {
            Material::Lambertian { albedo } => {
                let mut direction = rec.normal + random_in_unit_ball(rng);

                // Catch degenerate scatter direction
                if direction.length_squared() < 1e-8 {
                    direction = rec.normal;
                }

                Some(ScatterResult {
                    attenuation: albedo,
                    scattered: Ray::new(rec.p, direction.normalize()),
                })
            }

            Material::Metal { albedo, fuzz } => {
                let reflected = reflect(ray_in.direction(), rec.normal);
                let direction = reflected + fuzz * random_in_unit_ball(rng);
                if direction.length_squared() < 1e-8 {
                    return None;
                }
                let direction = direction.normalize();

                // Fuzz pushed the ray below the surface: absorbed
                if direction.dot(rec.normal) > 0.0 {
                    Some(ScatterResult {
                        attenuation: albedo,
                        scattered: Ray::new(rec.p, direction),
                    })
                } else {
                    None
                }
            }

            Material::Dielectric { refractive_index } => {
                let direction = ray_in.direction();
                let d_dot_n = direction.dot(rec.normal);

                let (outward_normal, ratio, cosine) = if d_dot_n > 0.0 {
                    // Leaving the medium
                    (-rec.normal, refractive_index, refractive_index * d_dot_n)
                } else {
                    (rec.normal, 1.0 / refractive_index, -d_dot_n)
                };

                let reflectance = schlick(cosine.min(1.0), refractive_index);
                let scattered = match refract(direction, outward_normal, ratio) {
                    Some(refracted) if rng.gen::<f32>() >= reflectance => refracted,
                    // Total internal reflection, or the Fresnel draw chose reflection
                    _ => reflect(direction, rec.normal),
                };

                Some(ScatterResult {
                    attenuation: Color::ONE,
                    scattered: Ray::new(rec.p, scattered),
                })
            }
        }
    }
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract unit vector `uv` through a surface with unit normal `n` facing
/// the incoming side. Returns `None` on total internal reflection.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, ni_over_nt: f32) -> Option<Vec3> {
    let dt = uv.dot(n);
    let discriminant = 1.0 - ni_over_nt * ni_over_nt * (1.0 - dt * dt);
    if discriminant > 0.0 {
        Some((ni_over_nt * (uv - dt * n) - discriminant.sqrt() * n).normalize())
    } else {
        None
    }
}

/// Schlick's approximation for reflectance.
#[inline]
pub fn schlick(cosine: f32, refractive_index: f32) -> f32 {
    let r0 = ((1.0 - refractive_index) / (1.0 + refractive_index)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
