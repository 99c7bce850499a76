use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An RGB color with 8 bit channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb`, `rrggbb` or `#rgb` color.
    pub fn from_hex(input: &str) -> Result<Self, ColorError> {
        let digits = input.trim().strip_prefix('#').unwrap_or(input.trim());
        let digits: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(ColorError::InvalidLength(input.to_string())),
        };
        let mut bytes = [0u8; 3];
        hex::decode_to_slice(&digits, &mut bytes).map_err(|_| ColorError::InvalidHex(input.to_string()))?;
        Ok(Self::new(bytes[0], bytes[1], bytes[2]))
    }

    /// Format as `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{}", hex::encode([self.r, self.g, self.b]))
    }

    pub fn css_rgb(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    pub fn css_rgba(&self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha.clamp(0.0, 1.0))
    }

    /// Mix this color towards `background`, keeping `amount` of this color.
    pub fn blend_over(self, background: Rgb, amount: f64) -> Rgb {
        let amount = amount.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (bg as f64 + (fg as f64 - bg as f64) * amount).round() as u8;
        Rgb::new(mix(self.r, background.r), mix(self.g, background.g), mix(self.b, background.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

/// Errors that can occur when parsing colors
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ColorError {
    #[error("color '{0}' must have 3 or 6 hex digits")]
    InvalidLength(String),

    #[error("color '{0}' is not valid hex")]
    InvalidHex(String),
}

/// Sample a gradient defined by `stops` at `position` (0.0 = first stop, 1.0 = last stop).
///
/// Returns `None` only when there are no stops at all. Positions outside of
/// `[0, 1]` are clamped.
pub fn interpolate_gradient(stops: &[Rgb], position: f64) -> Option<Rgb> {
    let (first, rest) = stops.split_first()?;
    if rest.is_empty() {
        return Some(*first);
    }

    let position = if position.is_nan() { 0.0 } else { position.clamp(0.0, 1.0) };
    let last = stops.len() - 1;
    let scaled = position * last as f64;
    let lower = (scaled.floor() as usize).min(last);
    let upper = (lower + 1).min(last);
    let local_t = scaled - lower as f64;

    let (from, to) = (stops[lower], stops[upper]);
    let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * local_t).round().clamp(0.0, 255.0) as u8;
    Some(Rgb::new(channel(from.r, to.r), channel(from.g, to.g), channel(from.b, to.b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);

    #[rstest]
    #[case::long("#ff8000", Rgb::new(255, 128, 0))]
    #[case::no_hash("0a0B0c", Rgb::new(10, 11, 12))]
    #[case::short("#f80", Rgb::new(255, 136, 0))]
    fn parse_hex(#[case] input: &str, #[case] expected: Rgb) {
        assert_eq!(Rgb::from_hex(input), Ok(expected));
    }

    #[rstest]
    #[case("#ff80")]
    #[case("")]
    #[case("#gg0000")]
    fn parse_invalid_hex(#[case] input: &str) {
        assert!(Rgb::from_hex(input).is_err());
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(Rgb::new(255, 128, 0).to_hex(), "#ff8000");
        assert_eq!(Rgb::new(1, 2, 3).css_rgba(0.5), "rgba(1, 2, 3, 0.5)");
    }

    #[test]
    fn single_stop_ignores_position() {
        for position in [0.0, 0.25, 0.5, 1.0] {
            assert_eq!(interpolate_gradient(&[RED], position), Some(RED));
        }
    }

    #[test]
    fn endpoints_return_stops() {
        let stops = [RED, Rgb::new(0, 255, 0), BLUE];
        assert_eq!(interpolate_gradient(&stops, 0.0), Some(RED));
        assert_eq!(interpolate_gradient(&stops, 1.0), Some(BLUE));
    }

    #[test]
    fn midpoint_rounds_half_up() {
        let stops = [Rgb::from_hex("#ff0000").unwrap(), Rgb::from_hex("#0000ff").unwrap()];
        assert_eq!(interpolate_gradient(&stops, 0.5), Some(Rgb::new(128, 0, 128)));
    }

    #[test]
    fn empty_stops_have_no_color() {
        assert_eq!(interpolate_gradient(&[], 0.3), None);
    }

    #[test]
    fn blend_towards_background() {
        assert_eq!(Rgb::WHITE.blend_over(Rgb::BLACK, 0.2), Rgb::new(51, 51, 51));
        assert_eq!(RED.blend_over(Rgb::BLACK, 1.0), RED);
    }

    #[test]
    fn deserialize_from_string() {
        let color: Rgb = serde_json::from_str("\"#00ff00\"").unwrap();
        assert_eq!(color, Rgb::new(0, 255, 0));
    }
}
