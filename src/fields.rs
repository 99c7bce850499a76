//! Editing widgets for the echo block fields.
//!
//! These hold the state behind the custom inputs shown in the CMS sidebar.
//! Drawing them is up to the CMS; what lives here is how raw input turns into
//! field values.

use std::ops::RangeInclusive;

/// Badge shown above every custom field.
pub const CUSTOM_FIELD_BADGE: &str = "Custom Field";

pub const ECHO_TEXT_PLACEHOLDER: &str = "Enter text to echo...";

/// The values the repeat count inputs accept.
pub const COUNT_RANGE: RangeInclusive<i64> = 1..=20;

pub const COUNT_STEP: i64 = 1;

/// A custom field widget.
pub trait FieldWidget {
    /// The component name the schema refers to.
    fn component(&self) -> &'static str;

    fn badge(&self) -> &'static str {
        CUSTOM_FIELD_BADGE
    }
}

/// Parse the leading integer of `input`, treating garbage and zero as one.
pub fn parse_count(input: &str) -> i64 {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return 1;
    }
    let magnitude: i64 = rest[..digits].parse().unwrap_or(i64::MAX);
    match if negative { -magnitude } else { magnitude } {
        0 => 1,
        value => value,
    }
}

/// Free text input for the echoed text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EchoTextInput {
    value: Option<String>,
}

impl EchoTextInput {
    pub fn new(value: Option<String>) -> Self {
        Self { value }
    }

    /// What the input box shows.
    pub fn display_value(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }

    pub fn placeholder(&self) -> &'static str {
        ECHO_TEXT_PLACEHOLDER
    }

    pub fn on_change(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl FieldWidget for EchoTextInput {
    fn component(&self) -> &'static str {
        "EchoTextInput"
    }
}

/// Which of the two count controls produced a change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountControl {
    Slider,
    Number,
}

/// A slider and a number box editing the same repeat count.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EchoCountInput {
    value: Option<i64>,
}

impl EchoCountInput {
    pub fn new(value: Option<i64>) -> Self {
        Self { value }
    }

    /// What both controls show. An unset or zero value shows as one.
    pub fn display_value(&self) -> i64 {
        match self.value {
            None | Some(0) => 1,
            Some(value) => value,
        }
    }

    /// Handle raw input from either control. Both controls end up showing the stored value.
    pub fn on_change(&mut self, control: CountControl, raw: &str) -> i64 {
        let value = parse_count(raw).clamp(*COUNT_RANGE.start(), *COUNT_RANGE.end());
        tracing::trace!(?control, raw, value, "repeat count changed");
        self.value = Some(value);
        value
    }

    pub fn value(&self) -> Option<i64> {
        self.value
    }

    pub fn range(&self) -> RangeInclusive<i64> {
        COUNT_RANGE
    }

    /// Slider increment.
    pub fn step(&self) -> i64 {
        COUNT_STEP
    }
}

impl FieldWidget for EchoCountInput {
    fn component(&self) -> &'static str {
        "EchoCountInput"
    }
}
