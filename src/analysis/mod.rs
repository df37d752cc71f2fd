//! Colour analysis for tile comparison features

/// Colour space selection, conversion, and distance metrics
pub mod colorspace;
/// Masked average colour extraction
pub mod features;
