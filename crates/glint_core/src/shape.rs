//! Geometric primitives.

use crate::Material;
use glint_math::Vec3;
use serde::{Deserialize, Serialize};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

/// An infinite plane: every point `p` with `dot(p, normal) == offset`.
///
/// The normal is one-sided. Hits always report it as-is, regardless of
/// which side the ray arrives from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub normal: Vec3,
    pub offset: f32,
    pub material: Material,
}

impl Plane {
    /// Create a new plane. `normal` is normalized here and must be non-zero.
    pub fn new(normal: Vec3, offset: f32, material: Material) -> Self {
        assert!(
            normal.is_finite() && normal.length_squared() > 1e-12,
            "plane normal must be finite and non-zero, got {}",
            normal
        );
        Self {
            normal: normal.normalize(),
            offset,
            material,
        }
    }
}

/// Any primitive that can appear in a scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
}

impl Shape {
    /// The material of this shape.
    pub fn material(&self) -> &Material {
        match self {
            Shape::Sphere(sphere) => &sphere.material,
            Shape::Plane(plane) => &plane.material,
        }
    }

    /// Check the geometry is well formed, normalizing plane normals that
    /// were given with a non-unit length (e.g. straight from a scene file).
    pub fn validate(&mut self) -> Result<(), String> {
        match self {
            Shape::Sphere(sphere) => {
                if !sphere.center.is_finite() {
                    return Err(format!("sphere center {} is not finite", sphere.center));
                }
                if !sphere.radius.is_finite() || sphere.radius <= 0.0 {
                    return Err(format!("sphere radius must be positive, got {}", sphere.radius));
                }
            }
            Shape::Plane(plane) => {
                if !plane.normal.is_finite() || plane.normal.length_squared() < 1e-12 {
                    return Err(format!("plane normal {} is degenerate", plane.normal));
                }
                if !plane.offset.is_finite() {
                    return Err(format!("plane offset {} is not finite", plane.offset));
                }
                plane.normal = plane.normal.normalize();
            }
        }
        Ok(())
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<Plane> for Shape {
    fn from(plane: Plane) -> Self {
        Shape::Plane(plane)
    }
}
