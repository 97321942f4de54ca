//! Color representation and conversion functions.
//!
//! A [`Color`] stores a single canonical form, the RGB byte triple. Every
//! other representation (`Srgb` float triple, `Hsv` float triple, `#RRGGBB`
//! hex string) is derived from the bytes on demand, and every setter replaces
//! the bytes wholesale. Float inputs are rounded to the nearest byte and
//! clamped to [0, 255], never wrapped.

use crate::error::PaletteError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// RGB float triple with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// HSV float triple with components in [0, 1]. Hue is circular.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

/// A color stored as an RGB byte triple.
///
/// Serializes as an uppercase hex string `"#RRGGBB"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    /// Creates a color from individual byte components.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from an RGB byte triple.
    pub const fn from_bytes(rgb: [u8; 3]) -> Self {
        Self::from_rgb(rgb[0], rgb[1], rgb[2])
    }

    /// Parses a hex color string like `"#EACE8C"` or `"eace8c"`.
    ///
    /// The leading `#` is optional; exactly six hex digits must follow.
    /// Returns `PaletteError::InvalidFormat` otherwise.
    pub fn from_hex(hex: &str) -> Result<Self, PaletteError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 {
            return Err(PaletteError::InvalidFormat(format!(
                "expected 6 hex digits in {hex:?}, got {}",
                digits.len()
            )));
        }
        // Also rules out '+' (accepted by from_str_radix) and multi-byte chars.
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(PaletteError::InvalidFormat(format!(
                "non-hex character in {hex:?}"
            )));
        }
        let component = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| PaletteError::InvalidFormat(format!("invalid {name} component: {e}")))
        };
        Ok(Self {
            r: component(0..2, "red")?,
            g: component(2..4, "green")?,
            b: component(4..6, "blue")?,
        })
    }

    /// Creates a color from an RGB float triple, rounding and clamping each channel.
    pub fn from_srgb(c: Srgb) -> Self {
        Self {
            r: float_to_byte(c.r),
            g: float_to_byte(c.g),
            b: float_to_byte(c.b),
        }
    }

    /// Creates a color from an HSV float triple.
    pub fn from_hsv(c: Hsv) -> Self {
        Self::from_srgb(hsv_to_srgb(c))
    }

    /// Returns the RGB byte triple.
    pub const fn rgb_bytes(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Returns the RGB float triple (each byte divided by 255).
    pub fn srgb(&self) -> Srgb {
        Srgb {
            r: f64::from(self.r) / 255.0,
            g: f64::from(self.g) / 255.0,
            b: f64::from(self.b) / 255.0,
        }
    }

    /// Returns the HSV float triple.
    pub fn hsv(&self) -> Hsv {
        srgb_to_hsv(self.srgb())
    }

    /// Returns the uppercase hex code, e.g. `"#EACE8C"`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn set_rgb_bytes(&mut self, rgb: [u8; 3]) {
        *self = Self::from_bytes(rgb);
    }

    pub fn set_srgb(&mut self, c: Srgb) {
        *self = Self::from_srgb(c);
    }

    pub fn set_hsv(&mut self, c: Hsv) {
        *self = Self::from_hsv(c);
    }

    /// Replaces this color with the parsed hex code. Leaves `self` untouched on error.
    pub fn set_hex(&mut self, hex: &str) -> Result<(), PaletteError> {
        *self = Self::from_hex(hex)?;
        Ok(())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; 3]> for Color {
    fn from(rgb: [u8; 3]) -> Self {
        Self::from_bytes(rgb)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Rounds a [0, 1] channel to the nearest byte, clamping out-of-range input.
fn float_to_byte(c: f64) -> u8 {
    // NaN survives clamp and then casts to 0.
    (c * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Converts an RGB float triple to HSV using the hexcone model.
///
/// Achromatic input (all channels equal) has hue and saturation 0.
pub fn srgb_to_hsv(c: Srgb) -> Hsv {
    let max = c.r.max(c.g).max(c.b);
    let min = c.r.min(c.g).min(c.b);
    let v = max;
    if max == min {
        return Hsv { h: 0.0, s: 0.0, v };
    }
    let delta = max - min;
    let s = delta / max;
    let rc = (max - c.r) / delta;
    let gc = (max - c.g) / delta;
    let bc = (max - c.b) / delta;
    let h = if c.r == max {
        bc - gc
    } else if c.g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    Hsv {
        h: (h / 6.0).rem_euclid(1.0),
        s,
        v,
    }
}

/// Converts an HSV float triple to RGB. Hue wraps modulo 1.0.
pub fn hsv_to_srgb(c: Hsv) -> Srgb {
    let Hsv { h, s, v } = c;
    if s == 0.0 {
        return Srgb { r: v, g: v, b: v };
    }
    let h6 = h.rem_euclid(1.0) * 6.0;
    let sector = h6.floor();
    let f = h6 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match (sector as u32) % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Srgb { r, g, b }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-4;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    // -- Hex parsing --

    #[test]
    fn from_hex_parses_with_hash() {
        let c = Color::from_hex("#EACE8C").unwrap();
        assert_eq!(c.rgb_bytes(), [234, 206, 140]);
    }

    #[test]
    fn from_hex_parses_without_hash() {
        let c = Color::from_hex("00ff7f").unwrap();
        assert_eq!(c.rgb_bytes(), [0, 255, 127]);
    }

    #[test]
    fn from_hex_is_case_insensitive() {
        let upper = Color::from_hex("#ABCDEF").unwrap();
        let lower = Color::from_hex("#abcdef").unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        for bad in ["", "#", "#fff", "#12345", "#1234567", "##123456"] {
            assert!(
                matches!(Color::from_hex(bad), Err(PaletteError::InvalidFormat(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn from_hex_rejects_non_hex_characters() {
        for bad in ["#zzzzzz", "#12345g", "+fffff", "#+fffff", "#ff ff0"] {
            assert!(
                matches!(Color::from_hex(bad), Err(PaletteError::InvalidFormat(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn from_hex_rejects_multibyte_input_without_panicking() {
        assert!(Color::from_hex("#ééé").is_err());
    }

    #[test]
    fn from_str_matches_from_hex() {
        let parsed: Color = "#102030".parse().unwrap();
        assert_eq!(parsed, Color::from_rgb(0x10, 0x20, 0x30));
    }

    // -- Hex output --

    #[test]
    fn to_hex_is_uppercase() {
        let c = Color::from_hex("#eace8c").unwrap();
        assert_eq!(c.to_hex(), "#EACE8C");
    }

    #[test]
    fn to_hex_pads_small_components() {
        assert_eq!(Color::from_rgb(1, 2, 3).to_hex(), "#010203");
    }

    #[test]
    fn display_prints_hex() {
        assert_eq!(Color::from_rgb(255, 0, 16).to_string(), "#FF0010");
    }

    // -- Float representation --

    #[test]
    fn srgb_divides_by_255() {
        let s = Color::from_rgb(255, 0, 51).srgb();
        assert!(approx_eq(s.r, 1.0));
        assert!(approx_eq(s.g, 0.0));
        assert!(approx_eq(s.b, 0.2));
    }

    #[test]
    fn from_srgb_rounds_to_nearest() {
        let c = Color::from_srgb(Srgb {
            r: 0.5,
            g: 0.499 / 255.0,
            b: 0.501 / 255.0,
        });
        assert_eq!(c.rgb_bytes(), [128, 0, 1]);
    }

    #[test]
    fn from_srgb_clamps_out_of_range() {
        let c = Color::from_srgb(Srgb {
            r: 1.7,
            g: -0.3,
            b: f64::NAN,
        });
        assert_eq!(c.rgb_bytes(), [255, 0, 0]);
    }

    #[test]
    fn set_srgb_of_own_srgb_is_identity() {
        let mut c = Color::from_rgb(17, 128, 254);
        let original = c;
        c.set_srgb(c.srgb());
        assert_eq!(c, original);
    }

    // -- HSV --

    #[test]
    fn seed_hsv_matches_known_values() {
        let hsv = Color::from_hex("#EACE8C").unwrap().hsv();
        assert!(approx_eq(hsv.h, 0.11702), "h = {}", hsv.h);
        assert!(approx_eq(hsv.s, 0.40171), "s = {}", hsv.s);
        assert!(approx_eq(hsv.v, 0.91765), "v = {}", hsv.v);
    }

    #[test]
    fn primaries_have_expected_hues() {
        let cases = [
            ([255, 0, 0], 0.0),
            ([255, 255, 0], 1.0 / 6.0),
            ([0, 255, 0], 2.0 / 6.0),
            ([0, 255, 255], 3.0 / 6.0),
            ([0, 0, 255], 4.0 / 6.0),
            ([255, 0, 255], 5.0 / 6.0),
        ];
        for (rgb, hue) in cases {
            let hsv = Color::from_bytes(rgb).hsv();
            assert!(approx_eq(hsv.h, hue), "{rgb:?}: h = {}", hsv.h);
            assert!(approx_eq(hsv.s, 1.0));
            assert!(approx_eq(hsv.v, 1.0));
        }
    }

    #[test]
    fn gray_has_zero_hue_and_saturation() {
        let hsv = Color::from_rgb(128, 128, 128).hsv();
        assert_eq!(hsv.h, 0.0);
        assert_eq!(hsv.s, 0.0);
        assert!(approx_eq(hsv.v, 128.0 / 255.0));
    }

    #[test]
    fn black_is_all_zero() {
        let hsv = Color::from_rgb(0, 0, 0).hsv();
        assert_eq!((hsv.h, hsv.s, hsv.v), (0.0, 0.0, 0.0));
    }

    #[test]
    fn hsv_to_srgb_wraps_hue() {
        let a = hsv_to_srgb(Hsv { h: 0.25, s: 0.8, v: 0.6 });
        let b = hsv_to_srgb(Hsv { h: 1.25, s: 0.8, v: 0.6 });
        let c = hsv_to_srgb(Hsv { h: -0.75, s: 0.8, v: 0.6 });
        assert!(approx_eq(a.r, b.r) && approx_eq(a.g, b.g) && approx_eq(a.b, b.b));
        assert!(approx_eq(a.r, c.r) && approx_eq(a.g, c.g) && approx_eq(a.b, c.b));
    }

    #[test]
    fn hsv_to_srgb_hue_one_equals_hue_zero() {
        let a = hsv_to_srgb(Hsv { h: 0.0, s: 1.0, v: 1.0 });
        let b = hsv_to_srgb(Hsv { h: 1.0, s: 1.0, v: 1.0 });
        assert_eq!(a, b);
    }

    #[test]
    fn set_hsv_replaces_whole_state() {
        let mut c = Color::from_rgb(1, 2, 3);
        c.set_hsv(Hsv { h: 0.0, s: 1.0, v: 1.0 });
        assert_eq!(c.rgb_bytes(), [255, 0, 0]);
    }

    #[test]
    fn set_hex_leaves_color_untouched_on_error() {
        let mut c = Color::from_rgb(9, 9, 9);
        assert!(c.set_hex("#nope00").is_err());
        assert_eq!(c.rgb_bytes(), [9, 9, 9]);
        c.set_hex("ffffff").unwrap();
        assert_eq!(c.rgb_bytes(), [255, 255, 255]);
    }

    // -- Serde --

    #[test]
    fn color_serializes_as_hex_string() {
        let json = serde_json::to_string(&Color::from_rgb(234, 206, 140)).unwrap();
        assert_eq!(json, "\"#EACE8C\"");
    }

    #[test]
    fn color_deserializes_from_lowercase_hex() {
        let c: Color = serde_json::from_str("\"#eace8c\"").unwrap();
        assert_eq!(c.rgb_bytes(), [234, 206, 140]);
    }

    #[test]
    fn color_deserialize_rejects_invalid_hex() {
        assert!(serde_json::from_str::<Color>("\"#12\"").is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn hex_round_trip_is_lossless(r: u8, g: u8, b: u8) {
                let c = Color::from_rgb(r, g, b);
                prop_assert_eq!(Color::from_hex(&c.to_hex()).unwrap(), c);
            }

            #[test]
            fn srgb_round_trip_is_lossless(r: u8, g: u8, b: u8) {
                let c = Color::from_rgb(r, g, b);
                prop_assert_eq!(Color::from_srgb(c.srgb()), c);
            }

            #[test]
            fn hsv_round_trip_is_lossless(r: u8, g: u8, b: u8) {
                let c = Color::from_rgb(r, g, b);
                prop_assert_eq!(Color::from_hsv(c.hsv()), c);
            }

            #[test]
            fn hsv_components_stay_in_unit_range(r: u8, g: u8, b: u8) {
                let hsv = Color::from_rgb(r, g, b).hsv();
                prop_assert!((0.0..1.0).contains(&hsv.h), "h = {}", hsv.h);
                prop_assert!((0.0..=1.0).contains(&hsv.s), "s = {}", hsv.s);
                prop_assert!((0.0..=1.0).contains(&hsv.v), "v = {}", hsv.v);
            }

            #[test]
            fn hsv_to_srgb_stays_in_unit_range(
                h in -2.0_f64..2.0,
                s in 0.0_f64..=1.0,
                v in 0.0_f64..=1.0,
            ) {
                let c = hsv_to_srgb(Hsv { h, s, v });
                for x in [c.r, c.g, c.b] {
                    prop_assert!((-1e-12..=1.0 + 1e-12).contains(&x), "component {} out of range", x);
                }
            }
        }
    }
}
