//! Error types for palette generation.

use thiserror::Error;

/// Errors produced by color parsing, configuration and palette operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PaletteError {
    /// A hex color string was malformed (wrong length, non-hex characters).
    #[error("invalid color format: {0}")]
    InvalidFormat(String),

    /// A palette index or length was negative.
    #[error("invalid palette index {0}: must be non-negative")]
    InvalidIndex(i64),

    /// A bounds pair was not finite or did not satisfy `min < max`.
    #[error("invalid bounds [{min}, {max}]: min must be less than max and both finite")]
    InvalidBounds { min: f64, max: f64 },

    /// A palette configuration could not be used.
    #[error("invalid palette config: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_format_includes_message() {
        let err = PaletteError::InvalidFormat("expected 6 hex digits".into());
        let msg = format!("{err}");
        assert!(msg.contains("6 hex digits"), "missing message in: {msg}");
    }

    #[test]
    fn invalid_index_includes_value() {
        let err = PaletteError::InvalidIndex(-3);
        let msg = format!("{err}");
        assert!(msg.contains("-3"), "missing index in: {msg}");
    }

    #[test]
    fn invalid_bounds_includes_both_ends() {
        let err = PaletteError::InvalidBounds { min: 0.9, max: 0.5 };
        let msg = format!("{err}");
        assert!(msg.contains("0.9"), "missing min in: {msg}");
        assert!(msg.contains("0.5"), "missing max in: {msg}");
    }

    #[test]
    fn invalid_config_includes_message() {
        let err = PaletteError::InvalidConfig("hue_steps must be non-zero".into());
        let msg = format!("{err}");
        assert!(msg.contains("hue_steps"), "missing message in: {msg}");
    }

    #[test]
    fn palette_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PaletteError>();
    }

    #[test]
    fn palette_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<PaletteError>();
    }
}
