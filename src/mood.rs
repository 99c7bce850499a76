use crate::color::Rgb;
use serde::Serialize;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

const FIRE: &[Rgb] = &[Rgb::new(0xff, 0x00, 0x00), Rgb::new(0xff, 0x7a, 0x00), Rgb::new(0xff, 0xd0, 0x00)];
const OCEAN: &[Rgb] = &[Rgb::new(0x00, 0x77, 0xbe), Rgb::new(0x00, 0xc2, 0xd1), Rgb::new(0x7f, 0xff, 0xd4)];
const FOREST: &[Rgb] = &[Rgb::new(0x0b, 0x66, 0x23), Rgb::new(0x4c, 0xaf, 0x50), Rgb::new(0xa8, 0xe0, 0x63)];
const SUNSET: &[Rgb] = &[Rgb::new(0xff, 0x5e, 0x62), Rgb::new(0xff, 0x99, 0x66), Rgb::new(0xff, 0xcc, 0x70)];
const NEON: &[Rgb] = &[Rgb::new(0xff, 0x00, 0xff), Rgb::new(0x00, 0xff, 0xff), Rgb::new(0x39, 0xff, 0x14)];
const AURORA: &[Rgb] = &[Rgb::new(0x00, 0xc9, 0xa7), Rgb::new(0x84, 0x5e, 0xc2), Rgb::new(0x4d, 0x80, 0x76)];

/// A named color palette an author can pick for an echo block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    #[default]
    Fire,
    Ocean,
    Forest,
    Sunset,
    Neon,
    Aurora,
    /// No color at all.
    None,
}

impl Mood {
    /// Look up a mood by key, falling back to the default for missing or unknown keys.
    pub fn from_key(key: Option<&str>) -> Self {
        let Some(key) = key.map(str::trim).filter(|key| !key.is_empty()) else {
            return Self::default();
        };
        match Self::from_str(key) {
            Ok(mood) => mood,
            Err(_) => {
                tracing::debug!(key, fallback = %Self::default(), "unknown mood, using fallback");
                Self::default()
            }
        }
    }

    /// The gradient stops for this mood, or `None` if it disables color.
    pub fn stops(self) -> Option<&'static [Rgb]> {
        match self {
            Self::Fire => Some(FIRE),
            Self::Ocean => Some(OCEAN),
            Self::Forest => Some(FOREST),
            Self::Sunset => Some(SUNSET),
            Self::Neon => Some(NEON),
            Self::Aurora => Some(AURORA),
            Self::None => None,
        }
    }

    pub fn key(self) -> &'static str {
        self.into()
    }

    /// The human readable label shown to authors.
    pub fn label(self) -> &'static str {
        match self {
            Self::Fire => "Fire",
            Self::Ocean => "Ocean",
            Self::Forest => "Forest",
            Self::Sunset => "Sunset",
            Self::Neon => "Neon",
            Self::Aurora => "Aurora",
            Self::None => "None",
        }
    }

    pub fn all() -> impl Iterator<Item = Mood> {
        Self::iter()
    }
}
