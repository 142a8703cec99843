//! Color parsing and the white-to-color scale used by the grid and legend.

use std::cell::RefCell;
use std::collections::HashMap;

/// RGB channel values.
pub type Rgb = [u8; 3];

/// Errors from color parsing and scale lookup.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
#[non_exhaustive]
pub enum ColorError {
    #[error("invalid color: {color}")]
    InvalidColor { color: String },
    #[error("color must be in rgb() or hex format: {color}")]
    UnsupportedFormat { color: String },
    #[error("value must be between 0 and 1, got {value}")]
    ValueOutOfRange { value: f64 },
}

/// Parse `rgb(r, g, b)`.
pub fn parse_rgb(color: &str) -> Result<Rgb, ColorError> {
    let invalid = || ColorError::InvalidColor {
        color: color.to_owned(),
    };
    let inner = color
        .trim()
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(invalid)?;

    let channels = inner
        .split(',')
        .map(|part| part.trim().parse::<u8>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>, _>>()?;

    <Rgb>::try_from(channels).map_err(|_| invalid())
}

/// Parse `#rrggbb`.
pub fn parse_hex(color: &str) -> Result<Rgb, ColorError> {
    let invalid = || ColorError::InvalidColor {
        color: color.to_owned(),
    };
    let hex = color.trim().strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }

    let mut rgb = [0u8; 3];
    for (channel, chunk) in rgb.iter_mut().zip(hex.as_bytes().chunks(2)) {
        let digits = std::str::from_utf8(chunk).map_err(|_| invalid())?;
        *channel = u8::from_str_radix(digits, 16).map_err(|_| invalid())?;
    }
    Ok(rgb)
}

/// Parse either supported notation.
pub fn parse_color(color: &str) -> Result<Rgb, ColorError> {
    let trimmed = color.trim();
    if trimmed.starts_with("rgb(") {
        parse_rgb(trimmed)
    } else if trimmed.starts_with('#') {
        parse_hex(trimmed)
    } else {
        Err(ColorError::UnsupportedFormat {
            color: color.to_owned(),
        })
    }
}

/// Linear scale from white (0) to a base color (1).
///
/// Results are memoized per value, so repeated lookups for the same cell
/// value return the cached string.
#[derive(Debug)]
pub struct ColorScale {
    base: Rgb,
    cache: RefCell<HashMap<u64, String>>,
}

impl ColorScale {
    /// Build a scale for `color` (`rgb(...)` or `#rrggbb`).
    pub fn new(color: &str) -> Result<Self, ColorError> {
        Ok(Self {
            base: parse_color(color)?,
            cache: RefCell::new(HashMap::new()),
        })
    }

    pub fn base(&self) -> Rgb {
        self.base
    }

    /// CSS color for `value` in `[0, 1]`.
    pub fn color_at(&self, value: f64) -> Result<String, ColorError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ColorError::ValueOutOfRange { value });
        }
        let key = value.to_bits();
        if let Some(hit) = self.cache.borrow().get(&key) {
            return Ok(hit.clone());
        }

        let [r, g, b] = self
            .base
            .map(|c| f64::from(c) * value + (1.0 - value) * 255.0);
        let result = format!("rgb({r}, {g}, {b})");
        self.cache.borrow_mut().insert(key, result.clone());
        Ok(result)
    }

    /// Number of memoized values.
    pub fn cached(&self) -> usize {
        self.cache.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("rgb(180, 0, 0)", [180, 0, 0])]
    #[case("rgb(1,2,3)", [1, 2, 3])]
    #[case("#b40000", [180, 0, 0])]
    #[case("#FFffFF", [255, 255, 255])]
    fn test_parse_color(#[case] input: &str, #[case] expected: Rgb) {
        assert_eq!(parse_color(input), Ok(expected));
    }

    #[rstest]
    #[case("rgb(1, 2)")]
    #[case("rgb(1, 2, 300)")]
    #[case("#fff")]
    #[case("#gg0000")]
    fn test_invalid_color(#[case] input: &str) {
        assert!(matches!(
            parse_color(input),
            Err(ColorError::InvalidColor { .. })
        ));
    }

    #[test]
    fn test_unsupported_format() {
        assert!(matches!(
            ColorScale::new("red"),
            Err(ColorError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_scale_endpoints() {
        let scale = ColorScale::new("#b40000").unwrap();
        assert_eq!(scale.color_at(0.0).unwrap(), "rgb(255, 255, 255)");
        assert_eq!(scale.color_at(1.0).unwrap(), "rgb(180, 0, 0)");
        assert_eq!(scale.color_at(0.5).unwrap(), "rgb(217.5, 127.5, 127.5)");
    }

    #[test]
    fn test_scale_memoizes() {
        let scale = ColorScale::new("rgb(0, 0, 255)").unwrap();
        scale.color_at(0.5).unwrap();
        scale.color_at(0.5).unwrap();
        scale.color_at(1.0).unwrap();
        assert_eq!(scale.cached(), 2);
    }

    #[test]
    fn test_scale_rejects_out_of_range() {
        let scale = ColorScale::new("#000000").unwrap();
        assert_eq!(
            scale.color_at(1.5),
            Err(ColorError::ValueOutOfRange { value: 1.5 })
        );
        assert!(scale.color_at(-0.1).is_err());
        assert!(scale.color_at(f64::NAN).is_err());
        assert_eq!(scale.cached(), 0);
    }
}
