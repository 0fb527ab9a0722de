//! Tile-based rendering for glint.
//!
//! Divides the image into disjoint rectangles that are rendered
//! independently and in parallel using rayon. Each tile gets a mutable view
//! of exactly its own pixels, carved out of the image buffer with
//! `split_at_mut`, so no locking is needed while workers write.

use glint_core::TileLayout;
use glint_math::Color;
use rand::RngCore;

use crate::renderer::render_pixel;
use crate::{Camera, Hittable, RenderConfig, RenderError, RenderResult};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// X coordinate of the tile's top-left corner
    pub x: u32,
    /// Y coordinate (image row) of the tile's top-left corner
    pub y: u32,
    /// Width of the tile in pixels
    pub width: u32,
    /// Height of the tile in pixels
    pub height: u32,
    /// Index of this tile in the render order
    pub index: usize,
}

impl Tile {
    /// Create a new tile.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { x, y, width, height, index }
    }

    /// Whether image row `row` passes through this tile.
    pub fn spans_row(&self, row: u32) -> bool {
        row >= self.y && row < self.y + self.height
    }
}

/// Partition a `width` x `height` image according to `layout`.
pub fn generate_tiles(layout: TileLayout, width: u32, height: u32) -> RenderResult<Vec<Tile>> {
    match layout {
        TileLayout::Grid { count } => generate_grid(width, height, count),
        TileLayout::Buckets { size } => {
            if size == 0 {
                return Err(RenderError::InvalidTileLayout(
                    "bucket size must be positive".to_string(),
                ));
            }
            Ok(generate_buckets(width, height, size))
        }
    }
}

/// Split the image into exactly `count` tiles arranged in a grid.
///
/// The grid uses the most square factorization of `count`, with the larger
/// factor along the longer image axis. Boundaries come from integer
/// division, so the tiles cover the image with no gaps or overlaps even when
/// the dimensions are not multiples of the grid.
pub fn generate_grid(width: u32, height: u32, count: u32) -> RenderResult<Vec<Tile>> {
    if count == 0 {
        return Err(RenderError::InvalidTileLayout("tile count must be positive".to_string()));
    }

    let small = (1..=count)
        .take_while(|d| d * d <= count)
        .filter(|d| count % d == 0)
        .last()
        .unwrap_or(1);
    let large = count / small;
    let (cols, rows) = if width >= height { (large, small) } else { (small, large) };

    if cols > width || rows > height {
        return Err(RenderError::InvalidTileLayout(format!(
            "{} tiles ({}x{}) do not fit a {}x{} image",
            count, cols, rows, width, height
        )));
    }

    let edge =
        |i: u32, n: u32, extent: u32| (u64::from(i) * u64::from(extent) / u64::from(n)) as u32;

    let mut tiles = Vec::with_capacity(count as usize);
    for row in 0..rows {
        let y0 = edge(row, rows, height);
        let y1 = edge(row + 1, rows, height);
        for col in 0..cols {
            let x0 = edge(col, cols, width);
            let x1 = edge(col + 1, cols, width);
            let index = tiles.len();
            tiles.push(Tile::new(x0, y0, x1 - x0, y1 - y0, index));
        }
    }

    Ok(tiles)
}

/// Generate fixed-size buckets for an image, sorted in spiral order from
/// the center.
///
/// Edge buckets are clipped to the image. Rendering from the center outward
/// mirrors production bucket renderers.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Tile> {
    let mut buckets = Vec::new();

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Tile::new(x, y, bw, bh, buckets.len()));
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);

    // Update indices after sorting
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort tiles by distance from the image center.
fn sort_spiral(tiles: &mut [Tile], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let distance = |t: &Tile| {
        let dx = t.x as f32 + t.width as f32 / 2.0 - center_x;
        let dy = t.y as f32 + t.height as f32 / 2.0 - center_y;
        dx * dx + dy * dy
    };

    tiles.sort_by(|a, b| {
        distance(a)
            .partial_cmp(&distance(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Exclusive mutable access to the pixels of one tile.
///
/// Holds one slice per image row spanned by the tile, top row first.
pub struct TileView<'a> {
    pub tile: Tile,
    rows: Vec<&'a mut [Color]>,
}

impl<'a> TileView<'a> {
    /// Write the pixel at tile-local `(local_x, local_y)`.
    pub fn set(&mut self, local_x: u32, local_y: u32, color: Color) {
        self.rows[local_y as usize][local_x as usize] = color;
    }
}

/// Carve a row-major pixel buffer into one view per tile.
///
/// Fails with `OverlappingTiles` if any two tiles share a pixel, and with
/// `InvalidTileLayout` if a tile reaches outside the image. Pixels not
/// covered by any tile are simply left out.
pub fn split_tiles<'a>(
    pixels: &'a mut [Color],
    width: u32,
    tiles: &[Tile],
) -> RenderResult<Vec<TileView<'a>>> {
    let width = width as usize;
    let height = if width == 0 { 0 } else { pixels.len() / width };

    for tile in tiles {
        if tile.x as usize + tile.width as usize > width
            || tile.y as usize + tile.height as usize > height
        {
            return Err(RenderError::InvalidTileLayout(format!(
                "tile {:?} exceeds the {}x{} image",
                tile, width, height
            )));
        }
    }

    let mut views: Vec<TileView<'a>> = tiles
        .iter()
        .map(|&tile| TileView {
            tile,
            rows: Vec::with_capacity(tile.height as usize),
        })
        .collect();

    // Left-to-right order lets each row be split in a single pass
    let mut order: Vec<usize> = (0..tiles.len()).collect();
    order.sort_by_key(|&i| tiles[i].x);

    for (row_index, row) in pixels.chunks_exact_mut(width.max(1)).enumerate() {
        let mut rest: &'a mut [Color] = row;
        let mut consumed = 0usize;

        for &i in &order {
            let tile = &tiles[i];
            if tile.width == 0 || !tile.spans_row(row_index as u32) {
                continue;
            }
            let start = tile.x as usize;
            if start < consumed {
                return Err(RenderError::OverlappingTiles {
                    tile: tile.index,
                    row: row_index as u32,
                });
            }

            let (_, tail) = std::mem::take(&mut rest).split_at_mut(start - consumed);
            let (segment, tail) = tail.split_at_mut(tile.width as usize);
            views[i].rows.push(segment);
            rest = tail;
            consumed = start + tile.width as usize;
        }
    }

    Ok(views)
}

/// Seed for the generator of tile `index`, derived from the master seed.
///
/// Distinct tiles get decorrelated streams; the same master seed always
/// reproduces the same image.
pub fn tile_seed(master: u64, index: usize) -> u64 {
    splitmix64(master ^ splitmix64(index as u64 + 1))
}

fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Render every pixel of one tile into its view.
pub fn render_tile(
    view: &mut TileView<'_>,
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) {
    let tile = view.tile;
    for local_y in 0..tile.height {
        for local_x in 0..tile.width {
            let (column, row) = (tile.x + local_x, tile.y + local_y);
            let color = render_pixel(camera, world, column, row, config, rng);
            view.set(local_x, local_y, color);
        }
    }
}
