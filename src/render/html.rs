use super::css::frame_style;
use crate::blocks::hero::{CONFETTI, ENTRANCE, HeroBlock, HeroMedia};
use crate::blocks::{Block, EchoBlock, Page};
use crate::phase::Phase;
use std::fmt::Write;

/// Escape text so it can be placed inside HTML text or a quoted attribute.
pub fn escape(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            _ => output.push(c),
        }
    }
    output
}

fn open_section(output: &mut String, template: &str, background: Option<&str>) {
    match background.filter(|b| !b.is_empty()) {
        Some(background) => {
            let _ = writeln!(output, r#"<section data-block="{template}" class="{}">"#, escape(background));
        }
        None => {
            let _ = writeln!(output, r#"<section data-block="{template}">"#);
        }
    }
}

/// Render an echo block at the given phase.
pub fn render_echo(block: &EchoBlock, phase: Phase) -> String {
    let mut output = String::new();
    let text = escape(block.text());
    open_section(&mut output, "echo", block.background.as_deref());
    output.push_str(r#"  <div class="flex flex-col items-center gap-2 py-12" data-tina-field="text">"#);
    output.push('\n');
    for frame in block.frames(phase) {
        let style = escape(&frame_style(&frame).to_string());
        let _ = writeln!(
            output,
            concat!(
                r#"    <div class="text-center font-bold transition-all" style="{style}""#,
                r#" data-tina-field="text">{text}</div>"#
            ),
            style = style,
            text = text,
        );
    }
    output.push_str("  </div>\n</section>\n");
    output
}

/// Render a hero block.
pub fn render_hero(block: &HeroBlock) -> String {
    let mut output = String::new();
    open_section(&mut output, "hero", block.background.as_deref());
    output.push_str("  <div class=\"text-center sm:mx-auto lg:mr-auto lg:mt-0\">\n");
    if let Some(headline) = block.headline() {
        let headline = escape(headline);
        let _ = writeln!(output, r#"    <h1 data-tina-field="headline" class="mt-8 text-balance">{headline}</h1>"#);
    }
    if let Some(tagline) = block.tagline() {
        let tagline = escape(tagline);
        let _ = writeln!(output, r#"    <p data-tina-field="tagline" class="mx-auto mt-8 max-w-2xl">{tagline}</p>"#);
    }
    if !block.actions.is_empty() {
        output.push_str("    <div class=\"mt-12 flex flex-col items-center justify-center gap-2 md:flex-row\">\n");
        for (index, action) in block.actions.iter().enumerate() {
            let icon = action
                .icon
                .as_ref()
                .map(|icon| format!(r#"<span class="icon" data-icon="{}"></span>"#, escape(&icon.name)))
                .unwrap_or_default();
            let _ = writeln!(
                output,
                r#"      <a href="{}" data-variant="{}" data-delay="{}">{icon}<span class="text-nowrap">{}</span></a>"#,
                escape(&action.link),
                action.variant().as_str(),
                ENTRANCE.child_delay(index),
                escape(&action.label)
            );
        }
        output.push_str("    </div>\n");
    }
    output.push_str("  </div>\n");

    if let Some(media) = block.image.as_ref().and_then(|image| image.media()) {
        let confetti = escape(&serde_json::to_string(&CONFETTI).unwrap_or_default());
        let _ = writeln!(
            output,
            r#"  <div class="relative mt-8 max-w-full" data-tina-field="image" data-confetti="{confetti}">"#
        );
        match block.gradient() {
            Some(gradient) => {
                let style = escape(&gradient.css());
                let _ = writeln!(output, r#"    <div aria-hidden class="absolute inset-0" style="{style}"></div>"#);
            }
            None => output.push_str("    <div aria-hidden class=\"absolute inset-0\"></div>\n"),
        }
        match media {
            HeroMedia::Image { src, alt } => {
                let (src, alt) = (escape(&src), escape(&alt));
                let _ = writeln!(output, r#"    <img src="{src}" alt="{alt}" height="4000" width="3000">"#);
            }
            HeroMedia::Video { url, thumbnail } => {
                let (url, thumbnail) = (escape(&url), escape(&thumbnail));
                let _ = writeln!(
                    output,
                    r#"    <div data-video-src="{url}"><img src="{thumbnail}" alt="Hero Video"></div>"#
                );
            }
        }
        output.push_str("  </div>\n");
    }
    output.push_str("</section>\n");
    output
}

pub fn render_block(block: &Block, phase: Phase) -> String {
    match block {
        Block::Echo(echo) => render_echo(echo, phase),
        Block::Hero(hero) => render_hero(hero),
    }
}

/// Render every block in a page, in order.
pub fn render_page(page: &Page, phase: Phase) -> String {
    page.blocks.iter().map(|block| render_block(block, phase)).collect()
}
