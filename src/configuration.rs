//! Algorithm constants and documented defaults

use image::Rgba;

/// Colour reported for a tile whose mask leaves no pixel active
///
/// An all-inactive mask would otherwise divide by zero during averaging;
/// the pipeline substitutes this opaque mid-gray instead of failing.
pub const NEUTRAL_GRAY: Rgba<u8> = Rgba([128, 128, 128, 255]);

/// Fixed seed for reproducible shuffle operations in tests and benchmarks
pub const DEFAULT_SEED: u64 = 42;
