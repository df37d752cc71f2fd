//! Tile swap pipeline orchestration for an image pair
//!
//! Runs the full pipeline for two images: partition both into congruent
//! grids, extract per-tile colour features, build the cost matrix, solve
//! the assignment problem, exchange tile positions along the optimal
//! matching, and recomposite both canvases. Every stage is a pure,
//! synchronous, CPU-bound computation; all failures are structural and
//! detected before any heavy work begins.

use image::{
    RgbaImage,
    imageops::{self, FilterType},
};
use log::{debug, info};

use crate::algorithm::{assignment, cost};
use crate::analysis::colorspace::ColorSpace;
use crate::error::{Result, dimension_mismatch};
use crate::spatial::grid::TileGrid;
use crate::spatial::mask::TileShape;

/// Configuration for one tile swap operation
///
/// Every field must be supplied explicitly; there is no default
/// configuration.
#[derive(Clone, Copy, Debug)]
pub struct SwapConfig {
    /// Number of tile columns in each grid
    pub x_tile_count: u32,
    /// Number of tile rows in each grid
    pub y_tile_count: u32,
    /// Resize each canvas to exact grid multiples instead of absorbing
    /// residual pixels into edge tiles
    pub resize_to_fit_grid: bool,
    /// Resize the second image to the first image's dimensions when they
    /// differ; when unset, unequal inputs are an error
    pub match_input_dimensions: bool,
    /// Shape mask installed on every tile before matching
    pub tile_shape: TileShape,
    /// Colour space in which tile features are compared
    pub color_space: ColorSpace,
}

/// Output of a tile swap operation
#[derive(Clone, Debug)]
pub struct SwapOutcome {
    /// First canvas rebuilt from its own tiles placed at the positions of
    /// their matched partners in the second grid
    pub image_a: RgbaImage,
    /// Second canvas rebuilt the same way in the opposite direction
    pub image_b: RgbaImage,
    /// Total cost of the optimal matching
    pub total_cost: f64,
}

/// Swap tiles between two images along the minimum-cost matching
///
/// Each output image has the dimensions of its (possibly grid-resized)
/// source canvas and shows that image's pixel blocks rearranged into the
/// other image's layout, ranked to resemble the other image as closely as
/// the matching allows.
///
/// # Errors
///
/// Returns an error when:
/// - the input dimensions differ and `match_input_dimensions` is unset
/// - either tile count is zero or a tile dimension degenerates to zero
/// - the two grids end up with unequal tile counts
pub fn swap_tiles(
    image_a: RgbaImage,
    image_b: RgbaImage,
    config: &SwapConfig,
) -> Result<SwapOutcome> {
    let image_b = match_dimensions(&image_a, image_b, config)?;

    let mut grid_a = TileGrid::partition(
        image_a,
        config.x_tile_count,
        config.y_tile_count,
        config.resize_to_fit_grid,
    )?;
    let mut grid_b = TileGrid::partition(
        image_b,
        config.x_tile_count,
        config.y_tile_count,
        config.resize_to_fit_grid,
    )?;

    if config.tile_shape != TileShape::Rectangle {
        grid_a.apply_shape(config.tile_shape);
        grid_b.apply_shape(config.tile_shape);
    }

    let features_a = grid_a.feature_vectors(config.color_space);
    let features_b = grid_b.feature_vectors(config.color_space);

    let matrix = cost::build_cost_matrix(&features_a, &features_b)?;
    let permutation = assignment::solve(&matrix)?;
    let total_cost = assignment::assignment_cost(&matrix, &permutation);
    info!(
        "matched {} tile pairs with total cost {total_cost:.3}",
        permutation.len()
    );

    exchange_positions(&mut grid_a, &mut grid_b, &permutation);

    Ok(SwapOutcome {
        image_a: grid_a.composite(),
        image_b: grid_b.composite(),
        total_cost,
    })
}

/// Bring the second image to the first image's dimensions, or reject the
/// pair when that is not allowed
fn match_dimensions(
    image_a: &RgbaImage,
    image_b: RgbaImage,
    config: &SwapConfig,
) -> Result<RgbaImage> {
    let (width_a, height_a) = image_a.dimensions();
    let (width_b, height_b) = image_b.dimensions();
    if (width_a, height_a) == (width_b, height_b) {
        return Ok(image_b);
    }
    if !config.match_input_dimensions {
        return Err(dimension_mismatch(
            &format!("{width_a}x{height_a}"),
            &format!("{width_b}x{height_b}"),
            "input image pairing",
        ));
    }
    debug!("resizing second image {width_b}x{height_b} -> {width_a}x{height_a}");
    Ok(imageops::resize(
        &image_b,
        width_a,
        height_a,
        FilterType::Nearest,
    ))
}

/// Exchange composite positions between matched tiles
///
/// Tile i of grid A trades places with tile `permutation[i]` of grid B, so
/// each grid's tiles end up arranged in the other grid's layout.
fn exchange_positions(grid_a: &mut TileGrid, grid_b: &mut TileGrid, permutation: &[usize]) {
    let tiles_a = grid_a.tiles_mut();
    let tiles_b = grid_b.tiles_mut();
    for (index, &matched) in permutation.iter().enumerate() {
        let Some(tile_a) = tiles_a.get_mut(index) else {
            continue;
        };
        let Some(tile_b) = tiles_b.get_mut(matched) else {
            continue;
        };
        let position_a = tile_a.position();
        tile_a.set_position(tile_b.position());
        tile_b.set_position(position_a);
    }
}
