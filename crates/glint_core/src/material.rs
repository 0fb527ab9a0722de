//! Surface materials.
//!
//! The set of materials is closed: the renderer matches on the variant in a
//! single place, so adding a variant is a compile error until it is handled.

use glint_math::Color;
use serde::{Deserialize, Serialize};

/// How a surface responds to an incoming ray.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Material {
    /// Ideal diffuse surface.
    Lambertian { albedo: Color },

    /// Specular reflector. `fuzz` in [0, 1]: 0 is a perfect mirror.
    Metal { albedo: Color, fuzz: f32 },

    /// Transmissive surface such as glass or water.
    Dielectric { refractive_index: f32 },
}

impl Material {
    /// Diffuse material with the given albedo.
    pub fn lambertian(albedo: Color) -> Self {
        Self::Lambertian { albedo }
    }

    /// Metal material. Fuzz is clamped into [0, 1].
    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Self::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Dielectric material.
    ///
    /// - `refractive_index`: 1.0 = air, 1.5 = glass, 2.4 = diamond
    pub fn dielectric(refractive_index: f32) -> Self {
        Self::Dielectric { refractive_index }
    }

    /// Check the parameters are physically usable. Returns a reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        match *self {
            Material::Lambertian { albedo } => check_albedo(albedo),
            Material::Metal { albedo, fuzz } => {
                check_albedo(albedo)?;
                if !(0.0..=1.0).contains(&fuzz) {
                    return Err(format!("metal fuzz {} outside [0, 1]", fuzz));
                }
                Ok(())
            }
            Material::Dielectric { refractive_index } => {
                if !refractive_index.is_finite() || refractive_index <= 0.0 {
                    return Err(format!(
                        "refractive index must be positive, got {}",
                        refractive_index
                    ));
                }
                Ok(())
            }
        }
    }
}

fn check_albedo(albedo: Color) -> Result<(), String> {
    if !albedo.is_finite() || albedo.min_element() < 0.0 {
        return Err(format!("albedo must be finite and non-negative, got {}", albedo));
    }
    Ok(())
}
