//! Colour space selection, conversion, and distance metrics
//!
//! Tile distance is the Euclidean distance between feature vectors in a
//! single colour space chosen per matching operation. The same space is
//! applied to both tile sets; mixing spaces between the sets would make
//! the cost matrix meaningless.

use image::Rgba;
use palette::{FromColor, Lab, Srgb, white_point::D65};

/// Colour space in which tile features are compared
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorSpace {
    /// Raw sRGB channel values in 0..=255
    ///
    /// Cheap, but Euclidean distance in sRGB correlates poorly with
    /// perceived colour difference.
    Rgb,
    /// CIE L*a*b* under the D65 illuminant
    ///
    /// Perceptually uniform; equal distances correspond roughly to equal
    /// perceived differences. The preferred space for matching.
    Lab,
}

/// Map a colour to its comparison vector in the given space
///
/// The alpha channel never participates in comparison; visibility is the
/// mask's concern.
pub fn feature_vector(color: Rgba<u8>, space: ColorSpace) -> [f64; 3] {
    let [r, g, b, _] = color.0;
    match space {
        ColorSpace::Rgb => [f64::from(r), f64::from(g), f64::from(b)],
        ColorSpace::Lab => {
            let srgb = Srgb::new(
                f32::from(r) / 255.0,
                f32::from(g) / 255.0,
                f32::from(b) / 255.0,
            );
            let lab: Lab<D65, f32> = Lab::from_color(srgb);
            [f64::from(lab.l), f64::from(lab.a), f64::from(lab.b)]
        }
    }
}

/// Euclidean distance between two feature vectors
pub fn distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(lhs, rhs)| {
            let delta = lhs - rhs;
            delta * delta
        })
        .sum::<f64>()
        .sqrt()
}
