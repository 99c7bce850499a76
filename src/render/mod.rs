pub mod banner;
pub mod css;
pub mod html;
pub mod terminal;

use crate::blocks::hero::{CONFETTI, ConfettiSettings, ENTRANCE, Entrance};
use crate::blocks::{Block, HeroBlock, Page};
use crate::config::OutputFormat;
use crate::decay::RenderFrame;
use crate::mood::Mood;
use crate::phase::Phase;
use serde::Serialize;
use std::fmt::Write;

#[derive(Serialize)]
#[serde(tag = "_template", rename_all = "lowercase")]
enum RenderedBlock<'a> {
    Echo { text: &'a str, mood: Mood, frames: Vec<RenderFrame> },
    Hero {
        #[serde(flatten)]
        block: &'a HeroBlock,
        entrance: Entrance,
        confetti: ConfettiSettings,
    },
}

fn rendered_blocks(page: &Page, phase: Phase) -> Vec<RenderedBlock<'_>> {
    page.blocks
        .iter()
        .map(|block| match block {
            Block::Echo(echo) => {
                RenderedBlock::Echo { text: echo.text(), mood: echo.mood(), frames: echo.frames(phase) }
            }
            Block::Hero(hero) => RenderedBlock::Hero { block: hero, entrance: ENTRANCE, confetti: CONFETTI },
        })
        .collect()
}

/// One CSS rule per echo element, named after the block and element positions.
pub fn render_stylesheet(page: &Page, phase: Phase) -> String {
    let mut output = String::new();
    for (block_index, block) in page.blocks.iter().enumerate() {
        let Block::Echo(echo) = block else { continue };
        for frame in echo.frames(phase) {
            let _ = writeln!(output, ".echo-{block_index}-{} {{ {} }}", frame.index, css::frame_style(&frame));
        }
    }
    output
}

/// Render a page in the requested format.
pub fn render_page(page: &Page, phase: Phase, format: OutputFormat) -> Result<String, serde_json::Error> {
    tracing::debug!(%format, phase = phase.value(), blocks = page.blocks.len(), "rendering page");
    match format {
        OutputFormat::Html => Ok(html::render_page(page, phase)),
        OutputFormat::Json => serde_json::to_string_pretty(&rendered_blocks(page, phase)),
        OutputFormat::Css => Ok(render_stylesheet(page, phase)),
    }
}
