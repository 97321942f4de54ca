//! Heuristic color distance in HSV space.
//!
//! The score is the square root of a weighted, *signed* sum of component
//! differences. It ranks colors by similarity and is not a metric: the
//! order of the arguments matters (`d(a, b)` and `d(b, a)` usually differ),
//! any pair whose signed sum is not positive scores 0, and the triangle
//! inequality may fail.

use crate::color::Color;

/// Per-component weights for (hue, saturation, value).
///
/// Hue dominates perceived difference at fixed saturation and value.
pub const HSV_DISTANCE_WEIGHTS: [f64; 3] = [1.0, 0.5, 0.8];

/// Square root of the weighted signed sum `Σ w_k · (a_k - b_k)`.
///
/// Returns 0 when the sum is not strictly positive (this also covers NaN
/// input), so the square root never sees a negative operand.
pub fn weighted_rms(a: [f64; 3], b: [f64; 3], weights: [f64; 3]) -> f64 {
    let sum: f64 = a
        .iter()
        .zip(&b)
        .zip(&weights)
        .map(|((x, y), w)| (x - y) * w)
        .sum();
    if sum > 0.0 {
        sum.sqrt()
    } else {
        0.0
    }
}

/// Returns the similarity score of `a` relative to `b`. Smaller is closer.
pub fn color_distance(a: &Color, b: &Color) -> f64 {
    let (ha, hb) = (a.hsv(), b.hsv());
    weighted_rms([ha.h, ha.s, ha.v], [hb.h, hb.s, hb.v], HSV_DISTANCE_WEIGHTS)
}

/// Sorts `colors` by ascending `color_distance(color, reference)`.
///
/// The sort is stable, so equally scored colors keep their generation order.
pub fn sort_by_similarity(colors: &mut [Color], reference: &Color) {
    colors.sort_by(|a, b| {
        color_distance(a, reference).total_cmp(&color_distance(b, reference))
    });
}
