#![deny(unsafe_code)]
//! Harmonic palette generation from a single seed color.
//!
//! Provides the `Color` value type (RGB bytes, `Srgb` floats, `Hsv`, hex),
//! the stateless non-repeating samplers `explore_range` and `explore_2d`,
//! `PaletteGenerator` with its `PaletteConfig`, and a heuristic
//! `color_distance` for similarity ordering.

pub mod color;
pub mod distance;
pub mod error;
pub mod explore;
pub mod palette;

pub use color::{Color, Hsv, Srgb};
pub use distance::{color_distance, sort_by_similarity};
pub use error::PaletteError;
pub use explore::{explore_2d, explore_range, ring_cell, Bounds};
pub use palette::{get_color, get_palette, Colors, PaletteConfig, PaletteGenerator, PaletteIndex};
