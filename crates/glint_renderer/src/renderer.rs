//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing bounded by a bounce budget
//! - Anti-aliasing via jittered multi-sampling
//! - Parallel tile rendering with one generator per tile
//! - Gamma correction at the 8-bit output boundary

use std::time::Instant;

use glint_core::{Background, CameraSettings, Scene};
use glint_math::{random_in_unit_square, DVec3, Interval, Ray};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

use crate::tile::{generate_tiles, render_tile, split_tiles, tile_seed};
use crate::{Camera, Color, Hittable, RenderConfig, RenderError, RenderResult, Scatter, EPSILON};

/// Compute the color seen by a ray.
///
/// `depth` is the number of bounces already taken. The path is followed
/// iteratively, multiplying up the attenuation of each bounce; once it
/// reaches `config.max_depth` bounces it is cut off and contributes no light.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut ray = *ray;
    let mut throughput = Color::ONE;

    for _ in depth..config.max_depth {
        let Some(rec) = world.hit(&ray, Interval::above(EPSILON)) else {
            return throughput * background_color(&ray, &config.background);
        };

        match rec.material.scatter(&ray, &rec, rng) {
            Some(result) => {
                throughput *= result.attenuation;
                ray = result.scattered;
            }
            // Absorbed
            None => return Color::ZERO,
        }
    }

    Color::ZERO
}

/// Radiance for a ray that left the scene.
pub fn background_color(ray: &Ray, background: &Background) -> Color {
    match *background {
        Background::Flat { color } => color,
        Background::Gradient { horizon, zenith } => {
            let unit_direction = ray.direction().normalize();
            let a = 0.5 * (unit_direction.y + 1.0);
            horizon * (1.0 - a) + zenith * a
        }
    }
}

/// Render a single pixel with multi-sampling.
///
/// `column` and `row` are image coordinates with row 0 at the top.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    column: u32,
    row: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    // Camera y grows upward
    let x = column as f32;
    let y = (camera.image_height - 1 - row) as f32;

    // Summed in f64 so identical samples average back to themselves
    let mut pixel_color = DVec3::ZERO;
    for _ in 0..config.samples_per_pixel {
        let offset = random_in_unit_square(rng);
        let ray = camera.get_ray(x + offset.x, y + offset.y);
        pixel_color += ray_color(&ray, world, 0, config, rng).as_dvec3();
    }

    (pixel_color / f64::from(config.samples_per_pixel)).as_vec3()
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit RGB, clamping each channel to [0, 1].
pub fn color_to_rgb(color: Color, gamma: bool) -> [u8; 3] {
    let unit = Interval::new(0.0, 1.0);
    let encode = |c: f32| {
        let c = if gamma { linear_to_gamma(c) } else { c };
        (255.0 * unit.clamp(c)) as u8
    };
    [encode(color.x), encode(color.y), encode(color.z)]
}

/// Linear color image, row-major with row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Convert to an `image` crate buffer, ready to be encoded.
    pub fn to_rgb_image(&self, gamma: bool) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            image::Rgb(color_to_rgb(self.get(x, y), gamma))
        })
    }
}

/// Check a render configuration before any work is scheduled.
pub fn validate_config(config: &RenderConfig) -> RenderResult<()> {
    if config.width == 0 || config.height == 0 {
        return Err(RenderError::InvalidDimensions {
            width: config.width,
            height: config.height,
        });
    }
    if config.samples_per_pixel == 0 {
        return Err(RenderError::NoSamples);
    }
    Ok(())
}

/// Render the entire scene to an image buffer.
///
/// Fans out one rayon task per tile and returns once every tile is done.
/// Each task owns a `StdRng` seeded from `config.seed` and its tile index,
/// so the result is reproducible for a given seed and layout.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
) -> RenderResult<ImageBuffer> {
    validate_config(config)?;
    if camera.image_width != config.width || camera.image_height != config.height {
        return Err(RenderError::DimensionMismatch {
            camera_width: camera.image_width,
            camera_height: camera.image_height,
            width: config.width,
            height: config.height,
        });
    }

    let tiles = generate_tiles(config.tiles, config.width, config.height)?;
    let mut image = ImageBuffer::new(config.width, config.height);
    let views = split_tiles(&mut image.pixels, config.width, &tiles)?;

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}, {} tiles",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth,
        views.len()
    );
    let start = Instant::now();

    views.into_par_iter().for_each(|mut view| {
        let tile_start = Instant::now();
        let mut rng = StdRng::seed_from_u64(tile_seed(config.seed, view.tile.index));
        render_tile(&mut view, camera, world, config, &mut rng);
        log::debug!(
            "Tile {} ({}x{} at {},{}) done in {:?}",
            view.tile.index,
            view.tile.width,
            view.tile.height,
            view.tile.x,
            view.tile.y,
            tile_start.elapsed()
        );
    });

    log::info!("Rendered in {:?}", start.elapsed());
    Ok(image)
}

/// Build the camera from its settings and render a scene.
pub fn render_scene(
    scene: &Scene,
    camera_settings: &CameraSettings,
    config: &RenderConfig,
) -> RenderResult<ImageBuffer> {
    validate_config(config)?;
    let camera = Camera::new(camera_settings, config.width, config.height)?;
    render(&camera, scene, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::{Material, Plane, Sphere, TileLayout};
    use glint_math::Vec3;

    const SKY: Color = Color::new(0.8, 0.8, 1.0);

    fn flat_config(width: u32, height: u32, samples_per_pixel: u32) -> RenderConfig {
        RenderConfig {
            width,
            height,
            samples_per_pixel,
            max_depth: 50,
            background: Background::Flat { color: SKY },
            tiles: TileLayout::Grid { count: 4 },
            seed: 7,
            gamma: true,
        }
    }

    fn facing_mirrors() -> Scene {
        let mirror = Material::metal(Color::ONE, 0.0);
        let mut scene = Scene::new();
        // z = 0 facing +z, and z = 5 facing -z
        scene.add(Plane::new(Vec3::Z, 0.0, mirror));
        scene.add(Plane::new(-Vec3::Z, -5.0, mirror));
        scene
    }

    #[test]
    fn test_ray_color_at_max_depth_is_black() {
        let config = flat_config(4, 4, 1);
        let mut rng = StdRng::seed_from_u64(1);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::Z);

        for scene in [facing_mirrors(), Scene::new()] {
            let color = ray_color(&ray, &scene, config.max_depth, &config, &mut rng);
            assert_eq!(color, Color::ZERO);
        }
    }

    #[test]
    fn test_ray_color_between_mirrors_terminates() {
        let mut config = flat_config(4, 4, 1);
        config.max_depth = 8;
        let mut rng = StdRng::seed_from_u64(1);

        // Bounces back and forth forever; only the budget stops it
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::Z);
        let color = ray_color(&ray, &facing_mirrors(), 0, &config, &mut rng);
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_large_bounce_budget_between_mirrors() {
        // Deep enough that a recursive integrator would exhaust a worker stack
        let mirror = Material::metal(Color::ONE, 0.0);
        let mut scene = Scene::new();
        scene.add(Plane::new(Vec3::Z, -5.0, mirror));
        scene.add(Plane::new(-Vec3::Z, -5.0, mirror));

        let mut config = flat_config(2, 2, 1);
        config.max_depth = 20_000;
        config.tiles = TileLayout::Grid { count: 2 };

        let image = render_scene(&scene, &CameraSettings::default(), &config).unwrap();
        assert!(image.pixels.iter().all(|&p| p == Color::ZERO));
    }

    #[test]
    fn test_ray_color_miss_returns_background() {
        let config = flat_config(4, 4, 1);
        let mut rng = StdRng::seed_from_u64(1);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.3, 0.4, 0.5).normalize());
        assert_eq!(ray_color(&ray, &Scene::new(), 0, &config, &mut rng), SKY);
    }

    #[test]
    fn test_ray_color_attenuates_by_albedo() {
        let config = flat_config(4, 4, 1);
        let mut rng = StdRng::seed_from_u64(1);
        let albedo = Color::new(0.5, 0.25, 1.0);
        let mut scene = Scene::new();
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, 3.0), 1.0, Material::metal(albedo, 0.0)));

        // Head-on mirror bounce straight back out of the scene
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let color = ray_color(&ray, &scene, 0, &config, &mut rng);
        assert!((color - albedo * SKY).length() < 1e-6);
    }

    #[test]
    fn test_sky_gradient() {
        let background = Background::Gradient {
            horizon: Color::ONE,
            zenith: Color::new(0.5, 0.7, 1.0),
        };

        let up = background_color(&Ray::new(Vec3::ZERO, Vec3::Y), &background);
        let down = background_color(&Ray::new(Vec3::ZERO, -Vec3::Y), &background);

        assert!((up - Color::new(0.5, 0.7, 1.0)).length() < 1e-6);
        assert!((down - Color::ONE).length() < 1e-6);
        assert!(up.x < down.x);
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_color_to_rgb_clamps_at_output() {
        assert_eq!(color_to_rgb(Color::new(2.0, -1.0, 0.5), false), [255, 0, 127]);
        assert_eq!(color_to_rgb(Color::new(2.0, -1.0, 0.25), true), [255, 0, 127]);
    }

    #[test]
    fn test_diffuse_sphere_center_darkened() {
        let albedo = Color::new(0.8, 0.8, 0.0);
        let mut scene = Scene::new();
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, 3.0), 1.0, Material::lambertian(albedo)));

        let camera_settings = CameraSettings {
            position: Vec3::ZERO,
            target: Vec3::new(0.0, 0.0, 3.0),
            up: Vec3::Y,
            fov: 90.0,
        };
        let config = flat_config(9, 9, 1);
        let image = render_scene(&scene, &camera_settings, &config).unwrap();

        let center = image.get(4, 4);
        let to_albedo = (center - albedo).length();
        let to_background = (center - SKY).length();
        assert!(
            to_albedo < to_background,
            "center {:?} is closer to the background",
            center
        );
    }

    #[test]
    fn test_empty_scene_renders_background() {
        let scene = Scene::new();
        let camera_settings = CameraSettings::default();

        let image = render_scene(&scene, &camera_settings, &flat_config(16, 8, 1)).unwrap();
        assert!(image.pixels.iter().all(|&p| p == SKY));

        // Averaging many identical samples must not drift off the background
        for samples in [2, 3, 7, 10, 100] {
            let config = flat_config(16, 8, samples);
            let many = render_scene(&scene, &camera_settings, &config).unwrap();
            assert!(many.pixels.iter().all(|&p| p == SKY), "{} samples", samples);
        }
    }

    #[test]
    fn test_rows_are_top_down() {
        // Black ground below the horizon, white sky above
        let mut scene = Scene::new();
        scene.add(Plane::new(Vec3::Y, -1.0, Material::lambertian(Color::ZERO)));
        let mut config = flat_config(8, 8, 2);
        config.background = Background::Flat { color: Color::ONE };

        let image = render_scene(&scene, &CameraSettings::default(), &config).unwrap();
        for x in 0..8 {
            assert_eq!(image.get(x, 0), Color::ONE);
            assert_eq!(image.get(x, 7), Color::ZERO);
        }
    }

    #[test]
    fn test_render_is_reproducible() {
        let (scene, camera_settings, _) = glint_core::SceneFile::demo().into_parts().unwrap();
        let config = flat_config(24, 16, 2);

        let a = render_scene(&scene, &camera_settings, &config).unwrap();
        let b = render_scene(&scene, &camera_settings, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_tiles_use_independent_generators() {
        // A diffuse wall under a gradient sky: every pixel's color depends
        // only on its random bounce, so equal seeds would give equal tiles.
        let mut scene = Scene::new();
        scene.add(Plane::new(-Vec3::Z, -5.0, Material::lambertian(Color::splat(0.5))));

        let mut config = flat_config(8, 4, 1);
        config.tiles = TileLayout::Grid { count: 2 };
        config.background = Background::Gradient {
            horizon: Color::ONE,
            zenith: Color::new(0.2, 0.4, 1.0),
        };

        let image = render_scene(&scene, &CameraSettings::default(), &config).unwrap();
        let tile_pixels = |x0: u32| {
            let mut pixels = Vec::new();
            for y in 0..4 {
                for x in x0..x0 + 4 {
                    pixels.push(image.get(x, y));
                }
            }
            pixels
        };
        assert_ne!(tile_pixels(0), tile_pixels(4));
    }

    #[test]
    fn test_bucket_layout_fills_every_pixel() {
        let scene = Scene::new();
        let mut config = flat_config(10, 7, 1);
        config.tiles = TileLayout::Buckets { size: 3 };

        let image = render_scene(&scene, &CameraSettings::default(), &config).unwrap();
        assert!(image.pixels.iter().all(|&p| p == SKY));
    }

    #[test]
    fn test_invalid_configs() {
        let scene = Scene::new();
        let camera_settings = CameraSettings::default();

        let mut config = flat_config(0, 8, 1);
        assert!(matches!(
            render_scene(&scene, &camera_settings, &config),
            Err(RenderError::InvalidDimensions { .. })
        ));

        config = flat_config(8, 8, 0);
        assert_eq!(render_scene(&scene, &camera_settings, &config), Err(RenderError::NoSamples));

        config = flat_config(8, 8, 1);
        let camera = Camera::new(&camera_settings, 4, 4).unwrap();
        assert!(matches!(
            render(&camera, &scene, &config),
            Err(RenderError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_to_rgb_image() {
        let mut image = ImageBuffer::new(2, 1);
        image.set(1, 0, Color::new(1.0, 0.25, 0.0));

        let rgb = image.to_rgb_image(true);
        assert_eq!(rgb.dimensions(), (2, 1));
        assert_eq!(rgb.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(rgb.get_pixel(1, 0).0, [255, 127, 0]);
    }
}
