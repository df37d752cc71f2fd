//! Per-tile occupancy masks and tile shapes
//!
//! A mask marks which pixels of a tile are active. Active pixels contribute
//! to the tile's average colour and are painted at composite time; inactive
//! pixels are skipped by both, so shaped tiles neither bias their feature
//! nor occlude neighbouring tiles when pasted.

use bitvec::prelude::*;
use std::fmt;

/// Shape installed on every tile of a grid before matching
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileShape {
    /// Full-tile mask, every pixel active
    Rectangle,
    /// Inscribed disk, pixels outside the disk inactive
    Circle,
}

/// Single-bit occupancy grid congruent with a tile's pixel buffer
///
/// Bits are stored row-major. The bit length always equals
/// `width * height`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    bits: BitVec,
    width: u32,
    height: u32,
}

impl Mask {
    /// Create a mask with every pixel active
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            bits: bitvec![1; (width * height) as usize],
            width,
            height,
        }
    }

    /// Create a mask with no pixel active
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            bits: bitvec![0; (width * height) as usize],
            width,
            height,
        }
    }

    /// Create an inscribed disk mask
    ///
    /// The disk has radius `min(width, height) / 2` and is centred on the
    /// tile centre. A pixel is active when its centre lies within the
    /// radius.
    pub fn circle(width: u32, height: u32) -> Self {
        let radius = f64::from(width.min(height)) / 2.0;
        let center_x = f64::from(width) / 2.0;
        let center_y = f64::from(height) / 2.0;

        let mut bits = bitvec![0; (width * height) as usize];
        for y in 0..height {
            for x in 0..width {
                let dx = (f64::from(x) + 0.5) - center_x;
                let dy = (f64::from(y) + 0.5) - center_y;
                if dx.mul_add(dx, dy * dy) <= radius * radius {
                    if let Some(mut bit) = bits.get_mut((y * width + x) as usize) {
                        *bit = true;
                    }
                }
            }
        }

        Self {
            bits,
            width,
            height,
        }
    }

    /// Create the mask for a tile shape
    pub fn for_shape(shape: TileShape, width: u32, height: u32) -> Self {
        match shape {
            TileShape::Rectangle => Self::full(width, height),
            TileShape::Circle => Self::circle(width, height),
        }
    }

    /// Set the activity of the pixel at (x, y)
    ///
    /// Coordinates outside the mask are ignored.
    pub fn set(&mut self, x: u32, y: u32, active: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        if let Some(mut bit) = self.bits.get_mut((y * self.width + x) as usize) {
            *bit = active;
        }
    }

    /// Test whether the pixel at (x, y) is active
    ///
    /// Coordinates outside the mask are inactive.
    pub fn is_active(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.bits.get((y * self.width + x) as usize).as_deref() == Some(&true)
    }

    /// Count active pixels
    pub fn active_count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Test whether every pixel is active
    pub fn is_full(&self) -> bool {
        self.bits.all()
    }

    /// Mask width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Mask height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mask({}x{}, {} active)",
            self.width,
            self.height,
            self.active_count()
        )
    }
}
