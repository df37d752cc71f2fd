//! Tile grid partitioning, shuffling, and compositing
//!
//! A grid cuts one source image into `x_count * y_count` tiles in row-major
//! order. That order is the canonical index used by the cost matrix and the
//! assignment solver, so it must never be permuted; only tile positions
//! move. Residual pixels left over by integer division are absorbed by the
//! last column and row, or eliminated up front by a nearest-neighbour
//! resize.

use image::{
    RgbaImage,
    imageops::{self, FilterType},
};
use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::analysis::colorspace::{self, ColorSpace};
use crate::error::{Result, invalid_grid};
use crate::spatial::mask::TileShape;
use crate::spatial::tile::Tile;

/// Row-major collection of tiles cut from a single source image
///
/// The grid dimensions and canvas size are fixed for the grid's lifetime.
/// Tiles stay at their row-major index; the matching step only reassigns
/// their composite positions.
#[derive(Clone, Debug)]
pub struct TileGrid {
    tiles: Vec<Tile>,
    x_count: u32,
    y_count: u32,
    canvas_width: u32,
    canvas_height: u32,
}

impl TileGrid {
    /// Partition an image into `x_count * y_count` tiles
    ///
    /// With `resize_to_fit` unset, base tile dimensions come from integer
    /// floor division and the rightmost column and bottommost row absorb
    /// the remainder pixels, so no pixel is dropped at the cost of uneven
    /// edge tiles. With `resize_to_fit` set, the canvas is first resized
    /// (nearest neighbour) so both dimensions are exact multiples of the
    /// counts and every tile ends up the same size.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidGrid` error when either count is zero or the
    /// resulting tile dimension is zero in either axis.
    pub fn partition(
        image: RgbaImage,
        x_count: u32,
        y_count: u32,
        resize_to_fit: bool,
    ) -> Result<Self> {
        if x_count == 0 || y_count == 0 {
            return Err(invalid_grid(
                x_count,
                y_count,
                &"tile counts must be positive",
            ));
        }

        let image = if resize_to_fit {
            resize_to_multiple(image, x_count, y_count)?
        } else {
            image
        };

        let (width, height) = image.dimensions();
        let tile_width = width / x_count;
        let tile_height = height / y_count;
        if tile_width == 0 || tile_height == 0 {
            return Err(invalid_grid(
                x_count,
                y_count,
                &format!("a {width}x{height} canvas yields a zero-size tile"),
            ));
        }

        let residual_x = width % x_count;
        let residual_y = height % y_count;

        let mut tiles = Vec::with_capacity((x_count * y_count) as usize);
        for tile_y in 0..y_count {
            for tile_x in 0..x_count {
                let left = tile_x * tile_width;
                let top = tile_y * tile_height;
                let mut crop_width = tile_width;
                let mut crop_height = tile_height;
                if tile_x == x_count - 1 {
                    crop_width += residual_x;
                }
                if tile_y == y_count - 1 {
                    crop_height += residual_y;
                }

                let pixels = imageops::crop_imm(&image, left, top, crop_width, crop_height)
                    .to_image();
                tiles.push(Tile::new(left, top, pixels));
            }
        }

        debug!("partitioned {width}x{height} canvas into {x_count}x{y_count} tiles");

        Ok(Self {
            tiles,
            x_count,
            y_count,
            canvas_width: width,
            canvas_height: height,
        })
    }

    /// Horizontal tile count
    pub const fn x_count(&self) -> u32 {
        self.x_count
    }

    /// Vertical tile count
    pub const fn y_count(&self) -> u32 {
        self.y_count
    }

    /// Canvas dimensions the grid composites into
    pub const fn canvas_dimensions(&self) -> (u32, u32) {
        (self.canvas_width, self.canvas_height)
    }

    /// Tiles in canonical row-major order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Mutable access to the tiles, canonical order preserved
    pub fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    /// Install the mask for a tile shape on every tile
    pub fn apply_shape(&mut self, shape: TileShape) {
        for tile in &mut self.tiles {
            tile.apply_shape(shape);
        }
    }

    /// Per-tile comparison features in the chosen colour space
    ///
    /// Returned in canonical row-major order, ready for cost matrix
    /// construction. Missing averages are computed and cached here.
    pub fn feature_vectors(&mut self, space: ColorSpace) -> Vec<[f64; 3]> {
        self.tiles
            .iter_mut()
            .map(|tile| colorspace::feature_vector(tile.average_color(), space))
            .collect()
    }

    /// Permute the tiles' composite positions with a caller-supplied source
    /// of randomness
    ///
    /// Tile order (and therefore the canonical index) is unchanged; only
    /// the positions move. A seeded generator makes the permutation
    /// reproducible.
    pub fn shuffle_positions<R: Rng>(&mut self, rng: &mut R) {
        let mut positions: Vec<[i64; 2]> = self.tiles.iter().map(Tile::position).collect();
        positions.shuffle(rng);
        for (tile, position) in self.tiles.iter_mut().zip(positions) {
            tile.set_position(position);
        }
    }

    /// Repaint every tile with its own average colour
    pub fn flatten_tiles(&mut self) {
        for tile in &mut self.tiles {
            tile.flatten_to_average();
        }
    }

    /// Paint all tiles onto a fresh canvas at their current positions
    ///
    /// The canvas starts fully transparent and tiles are painted in
    /// canonical order, later tiles overwriting earlier ones where they
    /// overlap. Only active pixels are painted, and pixels falling outside
    /// the canvas are clipped; compositing never fails.
    pub fn composite(&self) -> RgbaImage {
        let mut canvas = RgbaImage::new(self.canvas_width, self.canvas_height);
        for tile in &self.tiles {
            paste_clipped(&mut canvas, tile);
        }
        canvas
    }
}

/// Paint one tile's active pixels onto the canvas, discarding any pixel
/// that would land outside it
fn paste_clipped(canvas: &mut RgbaImage, tile: &Tile) {
    let (canvas_width, canvas_height) = canvas.dimensions();
    let [position_x, position_y] = tile.position();

    for (x, y, pixel) in tile.pixels().enumerate_pixels() {
        if !tile.mask().is_active(x, y) {
            continue;
        }
        let dest_x = position_x + i64::from(x);
        let dest_y = position_y + i64::from(y);
        if dest_x < 0
            || dest_y < 0
            || dest_x >= i64::from(canvas_width)
            || dest_y >= i64::from(canvas_height)
        {
            continue;
        }
        canvas.put_pixel(dest_x as u32, dest_y as u32, *pixel);
    }
}

/// Resize a canvas so both dimensions are exact multiples of the counts
///
/// Uses nearest-integer multiples, so the canvas may grow or shrink
/// slightly. Nearest-neighbour filtering keeps flat colour regions exact.
fn resize_to_multiple(image: RgbaImage, x_count: u32, y_count: u32) -> Result<RgbaImage> {
    let (width, height) = image.dimensions();
    let new_width = (f64::from(width) / f64::from(x_count)).round() as u32 * x_count;
    let new_height = (f64::from(height) / f64::from(y_count)).round() as u32 * y_count;

    if new_width == 0 || new_height == 0 {
        return Err(invalid_grid(
            x_count,
            y_count,
            &format!("resizing a {width}x{height} canvas to fit collapses it"),
        ));
    }

    if (new_width, new_height) == (width, height) {
        return Ok(image);
    }

    debug!("resizing {width}x{height} canvas to {new_width}x{new_height} to fit grid");
    Ok(imageops::resize(
        &image,
        new_width,
        new_height,
        FilterType::Nearest,
    ))
}
