use figlet_rs::FIGfont;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;

/// Name of the font bundled with figlet-rs.
pub const STANDARD_FONT: &str = "standard";

/// One-time cache of validated FIGlet fonts found on the system.
/// Maps lowercased font name (without .flf) to full file path.
static SYSTEM_FONT_PATHS: OnceCell<HashMap<String, String>> = OnceCell::new();

/// Fonts known to convert text with figlet-rs 0.1.5 without panicking.
/// Fonts such as banner, big, bubble, digital, gradient, morse and term make it panic.
const SAFE_FONTS: &[&str] = &[
    "3-d", "3x5", "5lineoblique", "acrobatic", "alligator", "alligator2", "alphabet", "avatar",
    "banner3", "banner3-d", "banner4", "barbwire", "basic", "bell", "bigchief", "binary",
    "block", "broadway", "bulbhead", "calgphy2", "caligraphy", "catwalk", "chunky", "coinstak",
    "colossal", "computer", "contessa", "contrast", "cosmic", "cosmike", "crawford", "cricket",
    "cursive", "cyberlarge", "cybermedium", "cybersmall", "decimal", "diamond", "doh", "doom",
    "dotmatrix", "double", "drpepper", "eftichess", "eftifont", "eftipiti", "eftirobot", "eftitalic",
    "eftiwall", "eftiwater", "epic", "fender", "fourtops", "fraktur", "fuzzy", "goofy",
    "gothic", "graceful", "graffiti", "hex", "hollywood", "invita", "isometric1", "isometric2",
    "isometric3", "isometric4", "italic", "jazmine", "jerusalem", "katakana", "kban", "larry3d",
    "lcd", "lean", "letters", "linux", "lockergnome", "madrid", "marquee", "mike",
    "mini", "mirror", "mnemonic", "moscow", "mshebrew210", "nancyj", "nancyj-fancy", "nancyj-underlined",
    "nipples", "ntgreek", "nvscript", "o8", "octal", "ogre", "os2", "pawp",
    "peaks", "pebbles", "pepper", "poison", "puffy", "rectangles", "relief", "relief2",
    "rev", "roman", "rounded", "rowancap", "rozzo", "runic", "runyc", "sblood",
    "script", "serifcap", "shadow", "short", "slant", "slide", "slscript", "small",
    "smisome1", "smkeyboard", "smscript", "smshadow", "smslant", "smtengwar", "speed", "stacey",
    "stampatello", "standard", "starwars", "stellar", "stop", "straight", "tanja", "tengwar",
    "thick", "thin", "threepoint", "ticks", "ticksslant", "tinker-toy", "tombstone", "trek",
    "twopoint", "univers", "usaflag", "weird", "whimsy",
];

fn is_safe_font(name: &str) -> bool {
    SAFE_FONTS.contains(&name.to_lowercase().as_str())
}

fn scan_figlet_font_dirs() -> Vec<&'static Path> {
    [
        "/opt/homebrew/share/figlet/fonts",
        "/usr/local/share/figlet",
        "/usr/share/figlet",
        "/usr/share/figlet/fonts",
    ]
    .into_iter()
    .map(Path::new)
    .filter(|dir| dir.is_dir())
    .collect()
}

/// Check that a font both loads and converts text.
fn validate_font_file(path: &Path) -> bool {
    let Some(path) = path.to_str() else { return false };
    let loaded = catch_unwind(|| FIGfont::from_file(path));
    let Ok(Ok(font)) = loaded else {
        return false;
    };
    let converted = catch_unwind(AssertUnwindSafe(|| font.convert("TEST").is_some()));
    matches!(converted, Ok(true))
}

/// Collect the whitelisted fonts in `dirs` that pass validation.
fn collect_fonts(dirs: &[&Path]) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for dir in dirs {
        let Ok(entries) = std::fs::read_dir(dir) else { continue };
        for path in entries.flatten().map(|entry| entry.path()) {
            if path.extension().and_then(|ext| ext.to_str()) != Some("flf") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()).map(str::to_lowercase) else {
                continue;
            };
            if map.contains_key(&stem) || !is_safe_font(&stem) {
                continue;
            }
            if validate_font_file(&path) {
                map.insert(stem, path.to_string_lossy().to_string());
            } else {
                tracing::debug!(path = %path.display(), "skipping FIGlet font that fails to convert");
            }
        }
    }
    map
}

fn build_font_map() -> HashMap<String, String> {
    let map = collect_fonts(&scan_figlet_font_dirs());
    tracing::debug!(fonts = map.len(), "scanned system FIGlet fonts");
    map
}

fn system_font_path(name: &str) -> Option<&'static String> {
    SYSTEM_FONT_PATHS.get_or_init(build_font_map).get(&name.to_lowercase())
}

/// Generator for ASCII art headlines using FIGlet fonts
pub struct BannerGenerator {
    font: FIGfont,
}

impl BannerGenerator {
    /// Create a banner generator with the given font, falling back to the standard one.
    pub fn new(font_name: &str) -> Result<Self, BannerError> {
        match Self::load_font(font_name) {
            Ok(font) => Ok(Self { font }),
            Err(e) if !font_name.eq_ignore_ascii_case(STANDARD_FONT) => {
                tracing::warn!("{e}, using the '{STANDARD_FONT}' font");
                Ok(Self { font: Self::load_font(STANDARD_FONT)? })
            }
            Err(e) => Err(e),
        }
    }

    /// Generate ASCII art lines for the given text
    pub fn generate(&self, text: &str) -> Result<Vec<String>, BannerError> {
        // some fonts make figlet-rs panic on conversion
        let res = catch_unwind(AssertUnwindSafe(|| self.font.convert(text)));
        match res {
            Ok(Some(figure)) => {
                let rendered = figure.to_string();
                let mut lines: Vec<String> = rendered.lines().map(|line| line.trim_end().to_string()).collect();
                while lines.last().is_some_and(|line| line.is_empty()) {
                    lines.pop();
                }
                Ok(lines)
            }
            Ok(None) | Err(_) => Err(BannerError::ConversionFailed(text.to_string())),
        }
    }

    fn load_font(font_name: &str) -> Result<FIGfont, BannerError> {
        let loaded = if font_name.eq_ignore_ascii_case(STANDARD_FONT) {
            catch_unwind(FIGfont::standard)
        } else {
            let path = system_font_path(font_name).ok_or_else(|| BannerError::FontUnavailable(font_name.to_string()))?;
            catch_unwind(AssertUnwindSafe(|| FIGfont::from_file(path)))
        };
        match loaded {
            Ok(Ok(font)) => Ok(font),
            Ok(Err(e)) => Err(BannerError::FontLoadFailed(font_name.to_string(), e)),
            Err(_) => Err(BannerError::FontLoadFailed(font_name.to_string(), "panic during font loading".to_string())),
        }
    }
}

/// Errors that can occur when generating banners
#[derive(thiserror::Error, Debug)]
pub enum BannerError {
    #[error("failed to load font '{0}': {1}")]
    FontLoadFailed(String, String),

    #[error("failed to convert text '{0}' to ASCII art")]
    ConversionFailed(String),

    #[error("FIGlet font '{0}' is not available")]
    FontUnavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_font() {
        let generator = BannerGenerator::new("standard").expect("failed to create generator");
        let lines = generator.generate("Hello").expect("failed to generate");
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| line.trim_end() == line));
    }

    #[test]
    fn only_whitelisted_fonts_are_safe() {
        assert!(is_safe_font("slant"));
        assert!(is_safe_font("Banner3-D"));
        assert!(!is_safe_font("big"));
        assert!(!is_safe_font("banner"));
    }

    #[test]
    fn unsafe_and_broken_fonts_are_skipped() {
        let dir = tempfile::tempdir().expect("temp dir");
        // "big" panics figlet-rs, "slant" is whitelisted but this copy is garbage
        std::fs::write(dir.path().join("big.flf"), "flf2a$ 8 6 59 15 10 0 24463").expect("write failed");
        std::fs::write(dir.path().join("slant.flf"), "not a font").expect("write failed");
        std::fs::write(dir.path().join("notes.txt"), "standard").expect("write failed");

        let fonts = collect_fonts(&[dir.path()]);
        assert!(fonts.is_empty(), "{fonts:?}");
    }

    #[test]
    fn unknown_font_falls_back_to_standard() {
        let generator = BannerGenerator::new("nonexistent_font_12345").expect("failed to create generator");
        let lines = generator.generate("Hi").expect("failed to generate");
        assert!(!lines.is_empty());
    }
}
