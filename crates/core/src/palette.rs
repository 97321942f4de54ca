//! Palette generation from a single seed color.
//!
//! The `i`-th color splits `i` into a hue step (`i % hue_steps`) and a
//! refinement index (`i / hue_steps`). The first `hue_steps` colors sit evenly
//! around the hue wheel at the seed's own saturation and value. Each later
//! group reuses those hue offsets, nudges hue by a finer amount via
//! [`explore_range`] and jumps saturation/value to a new point via
//! [`explore_2d`]. Index 0 is always the seed itself.

use crate::color::{Color, Hsv};
use crate::error::PaletteError;
use crate::explore::{explore_2d, explore_range, Bounds};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Number of discernible hue steps around the wheel.
pub const DEFAULT_HUE_STEPS: u32 = 6;

/// Usable saturation range.
pub const DEFAULT_SATURATION: Bounds = Bounds::new_unchecked(0.2, 1.0);

/// Usable value range. Below 0.5 colors get murky.
pub const DEFAULT_VALUE: Bounds = Bounds::new_unchecked(0.5, 0.9);

/// Immutable parameters of a [`PaletteGenerator`].
///
/// Missing fields fall back to the defaults when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaletteConfig {
    pub hue_steps: u32,
    pub saturation: Bounds,
    pub value: Bounds,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            hue_steps: DEFAULT_HUE_STEPS,
            saturation: DEFAULT_SATURATION,
            value: DEFAULT_VALUE,
        }
    }
}

impl PaletteConfig {
    /// Checks that `hue_steps` is non-zero and both ranges lie within [0, 1].
    pub fn validate(&self) -> Result<(), PaletteError> {
        if self.hue_steps == 0 {
            return Err(PaletteError::InvalidConfig(
                "hue_steps must be non-zero".to_string(),
            ));
        }
        for (name, bounds) in [("saturation", self.saturation), ("value", self.value)] {
            if bounds.min() < 0.0 || bounds.max() > 1.0 {
                return Err(PaletteError::InvalidConfig(format!(
                    "{name} range [{}, {}] must lie within [0, 1]",
                    bounds.min(),
                    bounds.max()
                )));
            }
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, PaletteError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| PaletteError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn hue_step(&self) -> f64 {
        1.0 / f64::from(self.hue_steps)
    }
}

/// A non-negative palette index, checked at the boundary with signed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PaletteIndex(u64);

impl PaletteIndex {
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for PaletteIndex {
    fn from(i: u64) -> Self {
        Self(i)
    }
}

impl TryFrom<i64> for PaletteIndex {
    type Error = PaletteError;

    fn try_from(i: i64) -> Result<Self, Self::Error> {
        u64::try_from(i)
            .map(Self)
            .map_err(|_| PaletteError::InvalidIndex(i))
    }
}

/// Generates palette colors for a fixed [`PaletteConfig`].
///
/// Holds no state beyond its configuration; every method is a pure function
/// of its arguments, so one generator can be shared freely across threads.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PaletteGenerator {
    config: PaletteConfig,
}

impl PaletteGenerator {
    /// Creates a generator after validating `config`.
    pub fn new(config: PaletteConfig) -> Result<Self, PaletteError> {
        config.validate()?;
        debug!(
            hue_steps = config.hue_steps,
            saturation_min = config.saturation.min(),
            saturation_max = config.saturation.max(),
            value_min = config.value.min(),
            value_max = config.value.max(),
            "palette generator configured"
        );
        Ok(Self { config })
    }

    pub fn config(&self) -> &PaletteConfig {
        &self.config
    }

    /// Returns the `i`-th color of the palette seeded by `seed`.
    pub fn get_color(&self, seed: &Color, i: u64) -> Color {
        if i == 0 {
            return *seed;
        }
        let steps = u64::from(self.config.hue_steps);
        let hue_step_index = i % steps;
        let refinement_index = i / steps;

        let hue_step = self.config.hue_step();
        let fine_hue = explore_range(Bounds::new_unchecked(0.0, hue_step), 0.0, refinement_index);

        let Hsv { h, s, v } = seed.hsv();
        let h = (h + hue_step_index as f64 * hue_step + fine_hue).rem_euclid(1.0);
        let (s, v) = explore_2d(
            self.config.saturation,
            self.config.value,
            (s, v),
            refinement_index,
        );
        trace!(i, hue_step_index, refinement_index, h, s, v, "palette color");
        Color::from_hsv(Hsv { h, s, v })
    }

    /// Returns the first `length` colors of the palette; element 0 is `seed`.
    pub fn get_palette(&self, seed: &Color, length: usize) -> Vec<Color> {
        debug!(%seed, length, "generating palette");
        self.colors(seed).take(length).collect()
    }

    /// Like [`get_color`](Self::get_color), rejecting negative indices.
    pub fn get_color_signed(&self, seed: &Color, i: i64) -> Result<Color, PaletteError> {
        let index = PaletteIndex::try_from(i)?;
        Ok(self.get_color(seed, index.get()))
    }

    /// Like [`get_palette`](Self::get_palette), rejecting negative lengths.
    pub fn get_palette_signed(&self, seed: &Color, length: i64) -> Result<Vec<Color>, PaletteError> {
        let length = usize::try_from(length).map_err(|_| PaletteError::InvalidIndex(length))?;
        Ok(self.get_palette(seed, length))
    }

    /// Returns an unbounded iterator over the palette, starting at index 0.
    pub fn colors(&self, seed: &Color) -> Colors {
        Colors {
            generator: *self,
            seed: *seed,
            next: Some(0),
        }
    }
}

/// Iterator over a palette, yielding `get_color(seed, 0)`, `get_color(seed, 1)`, ...
///
/// Created by [`PaletteGenerator::colors`].
#[derive(Debug, Clone)]
pub struct Colors {
    generator: PaletteGenerator,
    seed: Color,
    next: Option<u64>,
}

impl Iterator for Colors {
    type Item = Color;

    fn next(&mut self) -> Option<Color> {
        let i = self.next?;
        self.next = i.checked_add(1);
        Some(self.generator.get_color(&self.seed, i))
    }

    fn nth(&mut self, n: usize) -> Option<Color> {
        self.next = self.next.and_then(|i| i.checked_add(n as u64));
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            Some(_) => (usize::MAX, None),
            None => (0, Some(0)),
        }
    }
}

/// Returns the `i`-th color of the palette seeded by `seed`, using the default config.
pub fn get_color(seed: &Color, i: u64) -> Color {
    PaletteGenerator::default().get_color(seed, i)
}

/// Returns the first `length` colors of the palette seeded by `seed`, using the default config.
pub fn get_palette(seed: &Color, length: usize) -> Vec<Color> {
    PaletteGenerator::default().get_palette(seed, length)
}
