//! Atomic reassignable image sub-regions
//!
//! A tile owns its pixel data, an occupancy mask of identical dimensions,
//! and a mutable composite position. Its average colour is computed lazily
//! from the active pixels and cached until the mask or pixels change.

use image::{Rgba, RgbaImage};

use crate::analysis::features;
use crate::error::{Result, dimension_mismatch};
use crate::spatial::mask::{Mask, TileShape};

/// Integer rectangle locating a tile in its source image
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    /// Leftmost pixel column in the source image
    pub left: u32,
    /// Topmost pixel row in the source image
    pub top: u32,
    /// Region width in pixels
    pub width: u32,
    /// Region height in pixels
    pub height: u32,
}

/// A rectangular (or masked) image sub-region treated as an atomic unit
///
/// `bounds` is fixed at creation; `position` starts at the bounds origin
/// and is reassigned by the matching step. The position may point anywhere
/// in the destination canvas, including outside it; compositing clips.
#[derive(Clone, Debug)]
pub struct Tile {
    bounds: Bounds,
    pixels: RgbaImage,
    mask: Mask,
    position: [i64; 2],
    average: Option<Rgba<u8>>,
}

impl Tile {
    /// Create a tile from a cropped pixel buffer and its source origin
    ///
    /// The bounds dimensions are taken from the buffer itself, so pixels
    /// and bounds can never disagree. The mask defaults to fully active.
    pub fn new(left: u32, top: u32, pixels: RgbaImage) -> Self {
        let (width, height) = pixels.dimensions();
        Self {
            bounds: Bounds {
                left,
                top,
                width,
                height,
            },
            mask: Mask::full(width, height),
            position: [i64::from(left), i64::from(top)],
            pixels,
            average: None,
        }
    }

    /// Source-image rectangle this tile was cut from
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Tile pixel data
    pub const fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Occupancy mask, congruent with the pixel buffer
    pub const fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Composite-time placement of the tile's top-left corner
    pub const fn position(&self) -> [i64; 2] {
        self.position
    }

    /// Reassign the composite-time placement
    pub const fn set_position(&mut self, position: [i64; 2]) {
        self.position = position;
    }

    /// Install an occupancy mask, invalidating the cached average colour
    ///
    /// # Errors
    ///
    /// Returns a `DimensionMismatch` error when the mask dimensions differ
    /// from the tile's pixel dimensions.
    pub fn set_mask(&mut self, mask: Mask) -> Result<()> {
        let (width, height) = self.pixels.dimensions();
        if (mask.width(), mask.height()) != (width, height) {
            return Err(dimension_mismatch(
                &format!("{}x{}", mask.width(), mask.height()),
                &format!("{width}x{height}"),
                "mask installation",
            ));
        }
        self.mask = mask;
        self.average = None;
        Ok(())
    }

    /// Install the mask for a tile shape, sized to this tile
    pub fn apply_shape(&mut self, shape: TileShape) {
        let (width, height) = self.pixels.dimensions();
        self.mask = Mask::for_shape(shape, width, height);
        self.average = None;
    }

    /// Average colour over the active pixels
    ///
    /// Computed on first access and cached until the mask or pixels change.
    /// An all-inactive mask yields the documented sentinel
    /// [`NEUTRAL_GRAY`](crate::configuration::NEUTRAL_GRAY).
    pub fn average_color(&mut self) -> Rgba<u8> {
        if let Some(color) = self.average {
            return color;
        }
        let color = features::average_color(&self.pixels, &self.mask);
        self.average = Some(color);
        color
    }

    /// Repaint every pixel with the tile's average colour
    ///
    /// The mask is preserved, so a shaped tile stays shaped. The cached
    /// average remains valid: a uniform buffer averages to itself.
    pub fn flatten_to_average(&mut self) {
        let color = self.average_color();
        for pixel in self.pixels.pixels_mut() {
            *pixel = color;
        }
    }
}
