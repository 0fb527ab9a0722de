//! Hittable trait and HitRecord for ray-object intersection.

use glint_core::{Material, Plane, Scene, Shape, Sphere};
use glint_math::{Interval, Ray, Vec3};

/// Hits closer than this along the ray are discarded, so a ray leaving a
/// surface does not immediately re-hit it ("shadow acne").
pub const EPSILON: f32 = 1e-3;

/// Below this |n·d| a ray is treated as parallel to a plane.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    /// Outward unit surface normal (not flipped toward the ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a Material,
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Find the intersection with the smallest `t` strictly inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Nearest root, unless it lies behind the origin (ray starts inside)
        let mut root = (h - sqrtd) / a;
        if root < 0.0 {
            root = (h + sqrtd) / a;
        }
        if !ray_t.surrounds(root) {
            return None;
        }

        let p = ray.at(root);
        Some(HitRecord {
            t: root,
            p,
            normal: (p - self.center).normalize(),
            material: &self.material,
        })
    }
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let denom = self.normal.dot(ray.direction());
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (self.offset - self.normal.dot(ray.origin())) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }

        Some(HitRecord {
            t,
            p: ray.at(t),
            normal: self.normal,
            material: &self.material,
        })
    }
}

impl Hittable for Shape {
    #[inline]
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        match self {
            Shape::Sphere(sphere) => sphere.hit(ray, ray_t),
            Shape::Plane(plane) => plane.hit(ray, ray_t),
        }
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        for shape in self.shapes() {
            let interval = closest.map_or(ray_t, |rec| ray_t.with_max(rec.t));
            if let Some(rec) = shape.hit(ray, interval) {
                closest = Some(rec);
            }
        }

        closest
    }
}
