use crate::decay::{DecayConfig, RenderFrame, compute_decay_sequence};
use crate::mood::Mood;
use crate::phase::Phase;
use serde::{Deserialize, Serialize};

/// Text shown when the author didn't provide any.
pub const DEFAULT_ECHO_TEXT: &str = "Echo";

/// Repeat count used when the author didn't provide one.
pub const DEFAULT_REPEAT_COUNT: usize = 3;

/// Repeat count for freshly inserted echo blocks.
pub const TEMPLATE_REPEAT_COUNT: i64 = 5;

/// A block that repeats a piece of text, each copy fading away a bit more.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EchoBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
}

impl EchoBlock {
    /// The block a content author gets when inserting a new echo.
    pub fn template_default() -> Self {
        Self {
            text: Some(DEFAULT_ECHO_TEXT.to_string()),
            count: Some(TEMPLATE_REPEAT_COUNT),
            ..Default::default()
        }
    }

    pub fn text(&self) -> &str {
        match self.text.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => DEFAULT_ECHO_TEXT,
        }
    }

    /// The number of copies to render: missing or zero means the default, anything else is at least one.
    pub fn repeat_count(&self) -> usize {
        match self.count {
            None | Some(0) => DEFAULT_REPEAT_COUNT,
            Some(count) => usize::try_from(count).unwrap_or(0).max(1),
        }
    }

    pub fn mood(&self) -> Mood {
        Mood::from_key(self.mood.as_deref())
    }

    pub fn decay_config(&self) -> DecayConfig {
        DecayConfig::new(self.repeat_count())
    }

    /// Compute the frames for this block at the given phase.
    pub fn frames(&self, phase: Phase) -> Vec<RenderFrame> {
        compute_decay_sequence(&self.decay_config(), self.mood().stops(), phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn block(count: Option<i64>) -> EchoBlock {
        EchoBlock { count, ..Default::default() }
    }

    #[rstest]
    #[case::missing(None, 3)]
    #[case::zero(Some(0), 3)]
    #[case::negative(Some(-4), 1)]
    #[case::one(Some(1), 1)]
    #[case::many(Some(12), 12)]
    fn repeat_count(#[case] count: Option<i64>, #[case] expected: usize) {
        assert_eq!(block(count).repeat_count(), expected);
    }

    #[rstest]
    #[case(None, "Echo")]
    #[case(Some(""), "Echo")]
    #[case(Some("Hello"), "Hello")]
    fn text_falls_back(#[case] text: Option<&str>, #[case] expected: &str) {
        let block = EchoBlock { text: text.map(String::from), ..Default::default() };
        assert_eq!(block.text(), expected);
    }

    #[test]
    fn default_mood_is_colored() {
        let frames = EchoBlock::default().frames(Phase::ZERO);
        assert_eq!(frames.len(), 3);
        assert!(frames.iter().all(|f| f.color.is_some()));
    }

    #[test]
    fn none_mood_disables_color() {
        let block = EchoBlock { mood: Some("none".into()), count: Some(4), ..Default::default() };
        let frames = block.frames(Phase::new(0.3));
        assert_eq!(frames.len(), 4);
        assert!(frames.iter().all(|f| f.color.is_none()));
    }

    #[test]
    fn template_default() {
        let block = EchoBlock::template_default();
        assert_eq!(block.text(), "Echo");
        assert_eq!(block.repeat_count(), 5);
    }

    #[test]
    fn deserialize() {
        let block: EchoBlock = serde_yaml::from_str("text: Hi\ncount: 7\nmood: ocean\n").unwrap();
        assert_eq!(block.text(), "Hi");
        assert_eq!(block.repeat_count(), 7);
        assert_eq!(block.mood(), Mood::Ocean);
    }
}
