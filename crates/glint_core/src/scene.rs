//! The render scene: a flat, ordered list of shapes.
//!
//! There is no acceleration structure. Queries scan every shape, which is
//! fine for the handful of primitives these scenes contain.

use crate::Shape;

/// An immutable collection of shapes shared by all render workers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scene from a list of shapes, keeping their order.
    pub fn from_shapes(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }

    /// Add a shape.
    pub fn add(&mut self, shape: impl Into<Shape>) {
        self.shapes.push(shape.into());
    }

    /// All shapes, in insertion order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Plane, Sphere};
    use glint_math::{Color, Vec3};

    #[test]
    fn test_scene_keeps_order() {
        let mut scene = Scene::new();
        assert!(scene.is_empty());

        let mat = Material::lambertian(Color::ONE);
        scene.add(Sphere::new(Vec3::Z, 1.0, mat));
        scene.add(Plane::new(Vec3::Y, 0.0, mat));

        assert_eq!(scene.len(), 2);
        assert!(matches!(scene.shapes()[0], Shape::Sphere(_)));
        assert!(matches!(scene.shapes()[1], Shape::Plane(_)));
    }
}
