//! Camera for ray generation.

use glint_core::CameraSettings;
use glint_math::{Ray, Vec3};

use crate::{RenderError, RenderResult};

/// Pinhole camera mapping continuous pixel coordinates to world rays.
///
/// Pixel `(0, 0)` is the bottom-left corner of the image and `y` grows
/// upward. The mapping is affine, and the image center lies on the optical
/// axis.
#[derive(Debug, Clone)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,

    position: Vec3,
    /// Direction through pixel (0, 0), before normalization
    bottom_left: Vec3,
    /// Direction change per pixel along x
    step_x: Vec3,
    /// Direction change per pixel along y
    step_y: Vec3,
}

impl Camera {
    /// Build a camera for an image of `width` x `height` pixels.
    ///
    /// `settings.fov` is the horizontal field of view in degrees.
    pub fn new(settings: &CameraSettings, width: u32, height: u32) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        if !(settings.fov > 0.0 && settings.fov < 180.0) {
            return Err(RenderError::InvalidCamera(format!(
                "field of view must be in (0, 180) degrees, got {}",
                settings.fov
            )));
        }

        let view = settings.target - settings.position;
        if view.length_squared() < 1e-12 {
            return Err(RenderError::InvalidCamera(
                "camera target coincides with its position".to_string(),
            ));
        }
        if settings.up.length_squared() < 1e-12 {
            return Err(RenderError::InvalidCamera("up vector is zero".to_string()));
        }

        // Camera basis
        let forward = view.normalize();
        let horizontal = settings.up.normalize().cross(forward);
        if horizontal.length_squared() < 1e-12 {
            return Err(RenderError::InvalidCamera(
                "up vector is parallel to the view direction".to_string(),
            ));
        }
        let horizontal = horizontal.normalize();
        let vertical = forward.cross(horizontal);

        let half_width = (settings.fov.to_radians() / 2.0).tan();
        let half_height = half_width * (height as f32 / width as f32);

        // Pixel 0 and pixel (n - 1) sit at -half and +half of the extent
        let step_x = horizontal * pixel_step(half_width, width);
        let step_y = vertical * pixel_step(half_height, height);
        let center_x = (width - 1) as f32 / 2.0;
        let center_y = (height - 1) as f32 / 2.0;
        let bottom_left = forward - center_x * step_x - center_y * step_y;

        Ok(Self {
            image_width: width,
            image_height: height,
            position: settings.position,
            bottom_left,
            step_x,
            step_y,
        })
    }

    /// Ray through continuous pixel coordinate `(x, y)`.
    pub fn get_ray(&self, x: f32, y: f32) -> Ray {
        let direction = self.bottom_left + x * self.step_x + y * self.step_y;
        Ray::new(self.position, direction.normalize())
    }
}

/// Step that spans `2 * half_extent` across `pixels` pixel centers.
fn pixel_step(half_extent: f32, pixels: u32) -> f32 {
    if pixels > 1 {
        2.0 * half_extent / (pixels - 1) as f32
    } else {
        0.0
    }
}
