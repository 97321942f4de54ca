//! Stateless, non-repeating samplers over one- and two-dimensional spaces.
//!
//! [`explore_range`] walks a circular interval as a binary subdivision
//! sequence: 1/2, 1/4, 3/4, 1/8, 3/8, 5/8, 7/8, 1/16, ... of the range,
//! offset from a start value. Each level only emits odd numerators, so no
//! position is ever produced twice while coverage keeps getting finer.
//!
//! [`explore_2d`] extends this to two axes by walking the boundary of
//! growing squares on an integer grid ([`ring_cell`]) and feeding each grid
//! coordinate through `explore_range` on its own axis.
//!
//! The index is the entire state: every function here is O(1) and pure.

use crate::error::PaletteError;
use serde::{Deserialize, Serialize};

/// A validated `[min, max)` interval with finite ends and `min < max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBounds")]
pub struct Bounds {
    min: f64,
    max: f64,
}

#[derive(Deserialize)]
struct RawBounds {
    min: f64,
    max: f64,
}

impl TryFrom<RawBounds> for Bounds {
    type Error = PaletteError;

    fn try_from(raw: RawBounds) -> Result<Self, Self::Error> {
        Bounds::new(raw.min, raw.max)
    }
}

impl Bounds {
    /// Creates a bounds pair, rejecting non-finite ends and `min >= max`.
    pub fn new(min: f64, max: f64) -> Result<Self, PaletteError> {
        if min.is_finite() && max.is_finite() && min < max {
            Ok(Self { min, max })
        } else {
            Err(PaletteError::InvalidBounds { min, max })
        }
    }

    /// Builds bounds known to be valid at compile time.
    pub(crate) const fn new_unchecked(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub const fn min(&self) -> f64 {
        self.min
    }

    pub const fn max(&self) -> f64 {
        self.max
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Returns true if `x` lies in `[min, max)`.
    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x < self.max
    }
}

/// Returns the dyadic fraction `odd / 2^level` visited at step `i >= 1`.
///
/// Positions go 1/2, 1/4, 3/4, 1/8, 3/8, 5/8, 7/8, 1/16, ...
fn dyadic_position(i: u64) -> f64 {
    debug_assert!(i > 0);
    // ceil(log2(i + 1)) is the bit length of i.
    let level = u64::BITS - i.leading_zeros();
    let prev_denominator = 1u64 << (level - 1);
    let level_i = i - prev_denominator;
    // level_i < 2^63, so this cannot overflow.
    let odd_i = 1 + 2 * level_i;
    odd_i as f64 / 2f64.powi(level as i32)
}

/// Returns the `i`-th point of the binary subdivision walk over `bounds`,
/// relative to `start`.
///
/// Step 0 returns `start` unchanged (even if it lies outside `bounds`). Every
/// later step lies in `[min, max)`, wrapping around the interval.
///
/// Positions are exact up to `i < 2^53`. Past that the `f64` numerator
/// rounds, so distinct steps may coincide, and near `u64::MAX` the position
/// rounds up to a full turn and the point collapses onto `start` (wrapped
/// into `bounds`).
pub fn explore_range(bounds: Bounds, start: f64, i: u64) -> f64 {
    if i == 0 {
        return start;
    }
    let position = dyadic_position(i);
    let range = bounds.width();
    let offset = (start - bounds.min + position * range).rem_euclid(range);
    let x = offset + bounds.min;
    // Rounding can land exactly on `max`, which is the same point as `min`.
    if x < bounds.max {
        x
    } else {
        bounds.min
    }
}

/// Exact integer square root (floor).
fn isqrt(n: u64) -> u64 {
    let mut r = (n as f64).sqrt() as u64;
    while u128::from(r) * u128::from(r) > u128::from(n) {
        r -= 1;
    }
    while u128::from(r + 1) * u128::from(r + 1) <= u128::from(n) {
        r += 1;
    }
    r
}

/// Returns the integer grid cell visited at step `i` of the ring walk.
///
/// Each ring adds a row and a column to a square grid: first along the top
/// edge, then down the right edge.
///
/// ```text
/// (0,0)
/// (0,1) (1,1) (1,0)
/// (0,2) (1,2) (2,2) (2,1) (2,0)
/// ```
pub fn ring_cell(i: u64) -> (u64, u64) {
    let last_dimension = isqrt(i);
    let last_square = last_dimension * last_dimension;
    let i_level = i - last_square;
    if i_level < last_dimension {
        (i_level, last_dimension)
    } else {
        (last_dimension, 2 * last_dimension - i_level)
    }
}

/// Returns the `i`-th point of the two-dimensional walk, relative to `start`.
///
/// Both grid coordinates from [`ring_cell`] are mapped through
/// [`explore_range`] on their own axis.
pub fn explore_2d(x_bounds: Bounds, y_bounds: Bounds, start: (f64, f64), i: u64) -> (f64, f64) {
    let (x, y) = ring_cell(i);
    (
        explore_range(x_bounds, start.0, x),
        explore_range(y_bounds, start.1, y),
    )
}
