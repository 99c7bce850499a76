pub mod echo;
pub mod hero;

pub use echo::EchoBlock;
pub use hero::HeroBlock;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A content block on a page, tagged by the template it was created from.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "_template", rename_all = "lowercase")]
pub enum Block {
    Echo(EchoBlock),
    Hero(HeroBlock),
}

impl Block {
    pub fn template_name(&self) -> &'static str {
        match self {
            Self::Echo(_) => "echo",
            Self::Hero(_) => "hero",
        }
    }
}

/// A page made out of blocks.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Page {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn from_yaml(contents: &str) -> Result<Self, PageError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self, PageError> {
        let contents = fs::read_to_string(path).map_err(|source| PageError::Io { path: path.to_path_buf(), source })?;
        let page = Self::from_yaml(&contents)?;
        tracing::debug!(path = %path.display(), blocks = page.blocks.len(), "loaded page");
        Ok(page)
    }
}

/// Errors that can occur when loading pages
#[derive(thiserror::Error, Debug)]
pub enum PageError {
    #[error("reading page {path:?}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("invalid page: {0}")]
    Parse(#[from] serde_yaml::Error),
}
