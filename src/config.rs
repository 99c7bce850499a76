use crate::color::Rgb;
use crate::render::banner::STANDARD_FONT;
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use strum::Display;

const CONFIG_FILE_NAME: &str = "config.yaml";

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub render: RenderConfig,
    pub preview: PreviewConfig,
}

impl Config {
    /// Load the config from a specific file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let config = serde_yaml::from_str(&contents)
            .map_err(|source| ConfigError::Invalid { path: path.to_path_buf(), source })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// The per user config file path, if a home directory can be found.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "echoblocks").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load the explicitly requested config or, failing that, the per user one if it exists.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                tracing::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// The output format used when none is given on the command line.
    pub format: OutputFormat,

    /// The animation phase static renders are taken at.
    pub phase: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { format: OutputFormat::Html, phase: 0.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    /// How long the terminal preview runs before exiting on its own.
    pub duration_millis: u64,

    /// Whether echo colors cycle during the preview.
    pub animate: bool,

    /// The FIGlet font used for hero headlines.
    pub banner_font: String,

    /// The color echoes fade into.
    pub background: Rgb,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self { duration_millis: 10_000, animate: true, banner_font: STANDARD_FONT.to_string(), background: Rgb::BLACK }
    }
}

/// The format pages are rendered in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Display, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// HTML fragments.
    #[default]
    Html,

    /// Computed frames as JSON.
    Json,

    /// One inline style per echo element.
    Css,
}

/// Errors that can occur when loading the config
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("reading config {path:?}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("invalid config {path:?}: {source}")]
    Invalid { path: PathBuf, source: serde_yaml::Error },
}
