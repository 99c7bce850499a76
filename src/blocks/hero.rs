use crate::color::Rgb;
use serde::{Deserialize, Serialize};
use std::fmt;

const EMBED_PREFIX: &str = "/embed/";

/// A marketing hero section: headline, tagline, call to action buttons and an image or video.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<HeroAction>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<HeroImage>,
}

impl HeroBlock {
    /// The block a content author gets when inserting a new hero.
    pub fn template_default() -> Self {
        Self {
            tagline: Some("Here's some text above the other text".to_string()),
            headline: Some("This Big Text is Totally Awesome".to_string()),
            text: Some(
                concat!(
                    "Phasellus scelerisque, libero eu finibus rutrum, risus risus accumsan libero, ",
                    "nec molestie urna dui a leo."
                )
                .to_string(),
            ),
            ..Default::default()
        }
    }

    pub fn headline(&self) -> Option<&str> {
        self.headline.as_deref().filter(|s| !s.is_empty())
    }

    pub fn tagline(&self) -> Option<&str> {
        self.tagline.as_deref().filter(|s| !s.is_empty())
    }

    /// The gradient overlay drawn on top of the image, derived from the section background.
    pub fn gradient(&self) -> Option<BackgroundGradient> {
        self.background.as_deref().and_then(BackgroundGradient::parse)
    }
}

/// A call to action button.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroAction {
    #[serde(default)]
    pub label: String,

    #[serde(default, rename = "type")]
    pub kind: ActionKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,

    #[serde(default)]
    pub link: String,
}

impl HeroAction {
    pub fn template_default() -> Self {
        Self {
            label: "Action Label".to_string(),
            kind: ActionKind::Button,
            icon: Some(Icon { name: "Tina".to_string(), color: "white".to_string(), style: "float".to_string() }),
            link: "/".to_string(),
        }
    }

    pub fn variant(&self) -> ButtonVariant {
        match self.kind {
            ActionKind::Link => ButtonVariant::Ghost,
            ActionKind::Button => ButtonVariant::Default,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    #[default]
    Button,
    Link,
}

/// How an action button is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonVariant {
    Default,
    Ghost,
}

impl ButtonVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Ghost => "ghost",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Icon {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub style: String,
}

/// The image or video shown below the hero text.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    /// An embeddable video URL, e.g. `https://www.youtube.com/embed/<id>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl HeroImage {
    pub fn media(&self) -> Option<HeroMedia> {
        let src = self.src.as_deref().filter(|s| !s.is_empty());
        if let Some(video_url) = self.video_url.as_deref().filter(|s| !s.is_empty()) {
            let thumbnail = match (src, video_id(video_url)) {
                (Some(src), _) => src.to_string(),
                (None, Some(id)) => format!("https://i3.ytimg.com/vi/{id}/maxresdefault.jpg"),
                (None, None) => String::new(),
            };
            return Some(HeroMedia::Video { url: video_url.to_string(), thumbnail });
        }
        src.map(|src| HeroMedia::Image { src: src.to_string(), alt: self.alt.clone().unwrap_or_default() })
    }
}

/// What to actually show for a hero image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeroMedia {
    Image { src: String, alt: String },
    Video { url: String, thumbnail: String },
}

/// Extract the video id out of an embed URL.
pub fn video_id(url: &str) -> Option<&str> {
    let start = url.find(EMBED_PREFIX)? + EMBED_PREFIX.len();
    let id = url[start..].split('?').next().unwrap_or_default();
    (!id.is_empty()).then_some(id)
}

/// A `bg-<color>/<opacity>` section background turned into a gradient stop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackgroundGradient {
    pub color_name: String,
    pub opacity: u16,
}

impl BackgroundGradient {
    pub fn parse(background: &str) -> Option<Self> {
        let background = background.trim();
        if background.is_empty() {
            return None;
        }
        let (class, opacity) = match background.rsplit_once('/') {
            Some((class, opacity)) if is_opacity(opacity) => (class, opacity.parse().ok()?),
            _ => (background, 100),
        };
        let color_name = class.split('-').skip(1).collect::<Vec<_>>().join("-");
        Some(Self { color_name, opacity })
    }

    /// The CSS custom property assignment for the gradient's end color.
    pub fn css(&self) -> String {
        format!("--tw-gradient-to: {self}")
    }
}

impl fmt::Display for BackgroundGradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "color-mix(in oklab, var(--color-{}) {}%, transparent)", self.color_name, self.opacity)
    }
}

fn is_opacity(input: &str) -> bool {
    (1..=3).contains(&input.len()) && input.bytes().all(|b| b.is_ascii_digit())
}

/// A rectangle in viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// What a confetti burst looks like.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfettiSettings {
    pub particle_count: u32,
    pub spread: u32,
    pub colors: [Rgb; 6],
}

pub const CONFETTI: ConfettiSettings = ConfettiSettings {
    particle_count: 100,
    spread: 70,
    colors: [
        Rgb::new(0xff, 0, 0),
        Rgb::new(0, 0xff, 0),
        Rgb::new(0, 0, 0xff),
        Rgb::new(0xff, 0xff, 0),
        Rgb::new(0xff, 0, 0xff),
        Rgb::new(0, 0xff, 0xff),
    ],
};

/// A burst of confetti.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfettiBurst {
    #[serde(flatten)]
    pub settings: ConfettiSettings,
    /// Origin as a fraction of the viewport.
    pub origin: (f64, f64),
}

/// Fires confetti the first time the hero image is hovered, and never again.
#[derive(Debug, Default)]
pub struct ConfettiTrigger {
    fired: bool,
}

impl ConfettiTrigger {
    pub fn on_hover(&mut self, target: Rect, viewport_width: f64, viewport_height: f64) -> Option<ConfettiBurst> {
        if self.fired || viewport_width <= 0.0 || viewport_height <= 0.0 {
            return None;
        }
        self.fired = true;
        let x = (target.left + target.width / 2.0) / viewport_width;
        let y = (target.top + target.height / 2.0) / viewport_height;
        Some(ConfettiBurst { settings: CONFETTI, origin: (x, y) })
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

/// The state an entering item animates from or to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemState {
    pub opacity: f64,
    pub blur_px: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Spring {
    pub bounce: f64,
    pub duration_secs: f64,
}

/// Entrance animation for the hero actions and image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entrance {
    pub stagger_children_secs: f64,
    pub delay_children_secs: f64,
    pub hidden: ItemState,
    pub visible: ItemState,
    pub spring: Spring,
}

pub const ENTRANCE: Entrance = Entrance {
    stagger_children_secs: 0.05,
    delay_children_secs: 0.75,
    hidden: ItemState { opacity: 0.0, blur_px: 12.0, y: 12.0 },
    visible: ItemState { opacity: 1.0, blur_px: 0.0, y: 0.0 },
    spring: Spring { bounce: 0.3, duration_secs: 1.5 },
};

impl Entrance {
    /// When the nth child starts animating in.
    pub fn child_delay(&self, index: usize) -> f64 {
        self.delay_children_secs + self.stagger_children_secs * index as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("bg-sky-500/50", "sky-500", 50)]
    #[case("bg-white", "white", 100)]
    #[case("bg-gray-900/100", "gray-900", 100)]
    #[case("bg-default/5", "default", 5)]
    fn background_gradient(#[case] background: &str, #[case] color: &str, #[case] opacity: u16) {
        let gradient = BackgroundGradient::parse(background).unwrap();
        assert_eq!(gradient, BackgroundGradient { color_name: color.into(), opacity });
    }

    #[test]
    fn gradient_css() {
        let hero = HeroBlock { background: Some("bg-sky-500/50".into()), ..Default::default() };
        assert_eq!(
            hero.gradient().unwrap().css(),
            "--tw-gradient-to: color-mix(in oklab, var(--color-sky-500) 50%, transparent)"
        );
        assert!(HeroBlock::default().gradient().is_none());
    }

    #[rstest]
    #[case("https://www.youtube.com/embed/abc123?si=x", Some("abc123"))]
    #[case("https://www.youtube.com/embed/abc123", Some("abc123"))]
    #[case("https://www.youtube.com/watch?v=abc123", None)]
    fn extract_video_id(#[case] url: &str, #[case] expected: Option<&str>) {
        assert_eq!(video_id(url), expected);
    }

    #[test]
    fn video_thumbnail_fallbacks() {
        let mut image = HeroImage { video_url: Some("https://youtube.com/embed/xyz".into()), ..Default::default() };
        assert_eq!(
            image.media(),
            Some(HeroMedia::Video {
                url: "https://youtube.com/embed/xyz".into(),
                thumbnail: "https://i3.ytimg.com/vi/xyz/maxresdefault.jpg".into()
            })
        );

        image.src = Some("/uploads/thumb.png".into());
        let Some(HeroMedia::Video { thumbnail, .. }) = image.media() else { panic!("not a video") };
        assert_eq!(thumbnail, "/uploads/thumb.png");

        let image = HeroImage { video_url: Some("https://vimeo.com/1".into()), ..Default::default() };
        let Some(HeroMedia::Video { thumbnail, .. }) = image.media() else { panic!("not a video") };
        assert_eq!(thumbnail, "");
    }

    #[test]
    fn plain_image() {
        let image = HeroImage { src: Some("/a.png".into()), ..Default::default() };
        assert_eq!(image.media(), Some(HeroMedia::Image { src: "/a.png".into(), alt: String::new() }));
        assert_eq!(HeroImage::default().media(), None);
    }

    #[test]
    fn link_actions_are_ghosts() {
        let action = HeroAction { kind: ActionKind::Link, ..Default::default() };
        assert_eq!(action.variant(), ButtonVariant::Ghost);
        assert_eq!(HeroAction::template_default().variant(), ButtonVariant::Default);
    }

    #[test]
    fn confetti_fires_once() {
        let mut trigger = ConfettiTrigger::default();
        let rect = Rect { left: 100.0, top: 50.0, width: 200.0, height: 100.0 };
        let burst = trigger.on_hover(rect, 800.0, 400.0).unwrap();
        assert_eq!(burst.origin, (0.25, 0.25));
        assert_eq!(burst.settings.particle_count, 100);
        assert!(trigger.has_fired());
        assert!(trigger.on_hover(rect, 800.0, 400.0).is_none());
    }

    #[test]
    fn staggered_children() {
        assert_eq!(ENTRANCE.child_delay(0), 0.75);
        assert!((ENTRANCE.child_delay(2) - 0.85).abs() < 1e-9);
    }

    #[test]
    fn deserialize_actions() {
        let yaml = concat!(
            "headline: Hi\nactions:\n",
            "  - label: Docs\n    type: link\n    link: /docs\n",
            "  - label: Start\n    link: /\n",
        );
        let hero: HeroBlock = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(hero.actions.len(), 2);
        assert_eq!(hero.actions[0].kind, ActionKind::Link);
        assert_eq!(hero.actions[1].kind, ActionKind::Button);
    }
}
