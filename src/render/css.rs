use crate::decay::RenderFrame;
use std::fmt;

/// An ordered list of inline CSS declarations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleDeclarations(Vec<(&'static str, String)>);

impl StyleDeclarations {
    pub fn push(&mut self, property: &'static str, value: impl Into<String>) {
        self.0.push((property, value.into()));
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.iter().find(|(name, _)| *name == property).map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for StyleDeclarations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (property, value)) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, " ")?;
            }
            write!(f, "{property}: {value};")?;
        }
        Ok(())
    }
}

/// Glow radii can't be negative once they become a blur.
pub fn clamp_glow_radius(radius: f64) -> f64 {
    radius.max(0.0)
}

/// Map a frame into the inline style of its element.
pub fn frame_style(frame: &RenderFrame) -> StyleDeclarations {
    let mut style = StyleDeclarations::default();
    style.push("font-size", format!("{}rem", frame.font_size));
    style.push("opacity", frame.opacity.to_string());
    style.push("transform", format!("scale({})", frame.scale));
    if let Some(color) = frame.color {
        style.push("color", color.css_rgb());
    }
    if let Some(glow) = frame.glow {
        let radius = clamp_glow_radius(glow.radius);
        style.push("text-shadow", format!("0 0 {radius}px {}", glow.color.css_rgba(glow.alpha)));
    }
    style
}
