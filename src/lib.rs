//! Echo and hero content blocks for a CMS-driven marketing site.
//!
//! The interesting part is [decay]: turning an echo block's repeat count and
//! mood into per-element font size, opacity, scale and color. The rest maps
//! blocks into HTML, CSS, JSON, CMS templates and a terminal preview.

pub mod blocks;
pub mod color;
pub mod config;
pub mod decay;
pub mod fields;
pub mod mood;
pub mod phase;
pub mod render;
pub mod schema;

pub use blocks::{Block, EchoBlock, HeroBlock, Page};
pub use color::{Rgb, interpolate_gradient};
pub use config::{Config, OutputFormat};
pub use decay::{DecayConfig, RenderFrame, compute_decay_sequence};
pub use mood::Mood;
pub use phase::{Phase, PhaseTicker, advance_phase};
