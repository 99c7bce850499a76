use super::banner::BannerGenerator;
use crate::blocks::hero::{ActionKind, ConfettiBurst, ConfettiTrigger, HeroBlock, HeroMedia, Rect};
use crate::blocks::{Block, EchoBlock, Page};
use crate::color::Rgb;
use crate::config::PreviewConfig;
use crate::phase::{Phase, PhaseTicker, PollableState};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseEvent, MouseEventKind,
};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

/// Width used when the terminal size can't be queried.
const FALLBACK_WIDTH: u16 = 80;

/// A line of preview output, centered and optionally colored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledLine {
    pub text: String,
    pub color: Option<Rgb>,
    /// Whether this line stands in for the hero image or video.
    pub media: bool,
}

impl StyledLine {
    fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), color: None, media: false }
    }

    fn blank() -> Self {
        Self::plain("")
    }
}

fn center(text: &str, width: u16) -> String {
    let padding = (width as usize).saturating_sub(text.width()) / 2;
    format!("{}{text}", " ".repeat(padding))
}

/// Spread characters apart so bigger echoes take more room.
fn letter_spaced(text: &str, gap: usize) -> String {
    let separator = " ".repeat(gap);
    let chars: Vec<String> = text.chars().map(String::from).collect();
    chars.join(&separator)
}

/// Lay out the lines of an echo block.
pub fn echo_lines(block: &EchoBlock, phase: Phase, width: u16, background: Rgb) -> Vec<StyledLine> {
    block
        .frames(phase)
        .iter()
        .map(|frame| {
            let gap = (frame.scale * 2.0).round() as usize;
            let text = letter_spaced(block.text(), gap);
            let color = frame.color.unwrap_or(Rgb::WHITE).blend_over(background, frame.opacity);
            StyledLine { text: center(&text, width), color: Some(color), media: false }
        })
        .collect()
}

/// Lay out the lines of a hero block.
pub fn hero_lines(block: &HeroBlock, width: u16, banner: Option<&BannerGenerator>) -> Vec<StyledLine> {
    let mut lines = Vec::new();
    if let Some(headline) = block.headline() {
        let art = banner.and_then(|banner| match banner.generate(headline) {
            Ok(art) => Some(art),
            Err(e) => {
                tracing::warn!("{e}, rendering headline as plain text");
                None
            }
        });
        let art = art.unwrap_or_else(|| vec![headline.to_string()]);
        let art_width = art.iter().map(|line| line.width()).max().unwrap_or(0);
        let padding = " ".repeat((width as usize).saturating_sub(art_width) / 2);
        lines.extend(art.into_iter().map(|line| StyledLine::plain(format!("{padding}{line}"))));
    }
    if let Some(tagline) = block.tagline() {
        lines.push(StyledLine::blank());
        lines.push(StyledLine::plain(center(tagline, width)));
    }
    if !block.actions.is_empty() {
        let actions: Vec<String> = block
            .actions
            .iter()
            .map(|action| match action.kind {
                ActionKind::Button => format!("[ {} ]", action.label),
                ActionKind::Link => format!("{} →", action.label),
            })
            .collect();
        lines.push(StyledLine::blank());
        lines.push(StyledLine::plain(center(&actions.join("   "), width)));
    }
    if let Some(media) = block.image.as_ref().and_then(|image| image.media()) {
        let text = match media {
            HeroMedia::Image { alt, .. } if !alt.is_empty() => format!("[image: {alt}]"),
            HeroMedia::Image { src, .. } => format!("[image: {src}]"),
            HeroMedia::Video { url, .. } => format!("[video: {url}]"),
        };
        lines.push(StyledLine::blank());
        lines.push(StyledLine { media: true, ..StyledLine::plain(center(&text, width)) });
    }
    lines
}

/// Lay out a whole page.
pub fn page_lines(
    page: &Page,
    phase: Phase,
    width: u16,
    banner: Option<&BannerGenerator>,
    background: Rgb,
) -> Vec<StyledLine> {
    let mut lines = Vec::new();
    for (index, block) in page.blocks.iter().enumerate() {
        if index > 0 {
            lines.push(StyledLine::blank());
        }
        match block {
            Block::Echo(echo) => lines.extend(echo_lines(echo, phase, width, background)),
            Block::Hero(hero) => lines.extend(hero_lines(hero, width, banner)),
        }
    }
    lines
}

fn queue_line<W: Write>(out: &mut W, line: &StyledLine) -> io::Result<()> {
    if let Some(Rgb { r, g, b }) = line.color {
        queue!(out, SetForegroundColor(Color::Rgb { r, g, b }))?;
    }
    queue!(out, Print(&line.text), ResetColor)
}

/// Switches the terminal into raw mode on an alternate screen and back when dropped.
struct ScreenGuard;

impl ScreenGuard {
    fn enter<W: Write>(out: &mut W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = Self;
        execute!(out, EnterAlternateScreen, EnableMouseCapture, Hide)?;
        Ok(guard)
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, DisableMouseCapture, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// An interactive terminal preview of a page.
///
/// Echo colors cycle with the preview's own [PhaseTicker]; the preview ends
/// when a key is pressed or the configured duration runs out.
pub struct TerminalPreview {
    page: Page,
    config: PreviewConfig,
    banner: Option<BannerGenerator>,
    ticker: PhaseTicker,
    confetti: ConfettiTrigger,
}

impl TerminalPreview {
    pub fn new(page: Page, config: PreviewConfig) -> Self {
        let banner = match BannerGenerator::new(&config.banner_font) {
            Ok(banner) => Some(banner),
            Err(e) => {
                tracing::warn!("banner font unavailable: {e}");
                None
            }
        };
        Self { page, config, banner, ticker: PhaseTicker::new(), confetti: ConfettiTrigger::default() }
    }

    pub fn lines(&self, width: u16) -> Vec<StyledLine> {
        page_lines(&self.page, self.ticker.phase(), width, self.banner.as_ref(), self.config.background)
    }

    /// Handle the mouse moving to a cell. Hovering the hero media line fires confetti once per preview.
    pub fn hover(&mut self, column: u16, row: u16, width: u16, height: u16) -> Option<ConfettiBurst> {
        let lines = self.lines(width);
        let line = lines.get(row as usize).filter(|line| line.media)?;
        let label = line.text.trim_start();
        let target = Rect {
            left: (line.text.len() - label.len()) as f64,
            top: row as f64,
            width: label.width() as f64,
            height: 1.0,
        };
        let column = column as f64;
        if column < target.left || column >= target.left + target.width {
            return None;
        }
        self.confetti.on_hover(target, width as f64, height as f64)
    }

    /// Print the page once, without taking over the terminal.
    pub fn print_static<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let width = terminal::size().map(|(columns, _)| columns).unwrap_or(FALLBACK_WIDTH);
        for line in self.lines(width) {
            queue_line(out, &line)?;
            queue!(out, Print("\n"))?;
        }
        out.flush()
    }

    fn draw<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let (width, height) = terminal::size().unwrap_or((FALLBACK_WIDTH, 24));
        queue!(out, Clear(ClearType::All))?;
        for (row, line) in self.lines(width).iter().take(height as usize).enumerate() {
            queue!(out, MoveTo(0, row as u16))?;
            queue_line(out, line)?;
        }
        out.flush()
    }

    /// Run the preview until a key is pressed or the duration elapses.
    pub fn run<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let _guard = ScreenGuard::enter(out)?;
        let deadline = Instant::now() + Duration::from_millis(self.config.duration_millis);
        tracing::info!(animate = self.config.animate, blocks = self.page.blocks.len(), "starting preview");

        self.ticker.reset();
        self.draw(out)?;
        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            if self.config.animate {
                match self.ticker.poll(now) {
                    PollableState::Modified => self.draw(out)?,
                    PollableState::Unmodified => (),
                    PollableState::Done => break,
                }
            }
            let wake_up = match (self.config.animate, self.ticker.next_deadline()) {
                (true, Some(tick)) => tick.min(deadline),
                _ => deadline,
            };
            if event::poll(wake_up.saturating_duration_since(Instant::now()))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => break,
                    Event::Mouse(MouseEvent { kind: MouseEventKind::Moved, column, row, .. }) => {
                        let (width, height) = terminal::size().unwrap_or((FALLBACK_WIDTH, 24));
                        if let Some(burst) = self.hover(column, row, width, height) {
                            tracing::info!(
                                particles = burst.settings.particle_count,
                                origin = ?burst.origin,
                                "confetti"
                            );
                        }
                    }
                    _ => (),
                }
            }
        }
        self.ticker.cancel();
        tracing::info!(phase = self.ticker.phase().value(), "preview finished");
        Ok(())
    }
}
