//! CMS block templates.
//!
//! These describe, for the CMS, which fields each block has and how they're
//! edited. They're emitted as JSON and registered by the CMS itself.

use crate::blocks::echo::EchoBlock;
use crate::blocks::hero::{HeroAction, HeroBlock};
use crate::fields::{EchoCountInput, EchoTextInput, FieldWidget};
use crate::mood::Mood;
use serde::Serialize;
use serde_json::Value;

/// A block template.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub name: &'static str,
    pub label: &'static str,
    pub ui: TemplateUi,
    pub fields: Vec<Field>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateUi {
    pub preview_src: &'static str,
    pub default_item: Value,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Object,
    Image,
}

/// A single field within a template.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    #[serde(rename = "type")]
    pub kind: FieldType,
    pub label: &'static str,
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub list: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ui: Option<FieldUi>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
}

impl Field {
    fn new(kind: FieldType, label: &'static str, name: &'static str) -> Self {
        Self { kind, label, name, description: None, list: false, options: Vec::new(), ui: None, fields: Vec::new() }
    }

    fn string(label: &'static str, name: &'static str) -> Self {
        Self::new(FieldType::String, label, name)
    }

    fn description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    fn widget(mut self, widget: &dyn FieldWidget) -> Self {
        self.ui = Some(FieldUi { component: Some(widget.component()), ..Default::default() });
        self
    }

    fn count_bounds(mut self, input: &EchoCountInput) -> Self {
        let range = input.range();
        let ui = self.ui.get_or_insert_with(FieldUi::default);
        ui.min = Some(*range.start());
        ui.max = Some(*range.end());
        ui.step = Some(input.step());
        self
    }

    fn options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = options;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldOption {
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldUi {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_item: Option<Value>,
    /// Which property of a list item labels it in the sidebar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_label: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<i64>,
}

/// The section background field every block starts with.
fn background_field() -> Field {
    Field::string("Background", "background").description("Section background color, e.g. bg-sky-500/50")
}

fn icon_field() -> Field {
    Field {
        fields: vec![Field::string("Name", "name"), Field::string("Color", "color"), Field::string("Style", "style")],
        ..Field::new(FieldType::Object, "Icon", "icon")
    }
}

fn to_value<T: Serialize>(item: &T) -> Value {
    // plain structs with string keys always serialize
    serde_json::to_value(item).unwrap_or(Value::Null)
}

pub fn echo_template() -> Template {
    let moods = Mood::all().map(|mood| FieldOption { label: mood.label(), value: mood.key() }).collect();
    Template {
        name: "echo",
        label: "Echo",
        ui: TemplateUi { preview_src: "/blocks/echo.png", default_item: to_value(&EchoBlock::template_default()) },
        fields: vec![
            background_field(),
            Field::string("Text", "text").description("The text to repeat").widget(&EchoTextInput::default()),
            Field::new(FieldType::Number, "Repeat Count", "count")
                .description("How many times to repeat the text")
                .widget(&EchoCountInput::default())
                .count_bounds(&EchoCountInput::default()),
            Field::string("Mood", "mood").description("Color palette for the echoes").options(moods),
        ],
    }
}

pub fn hero_template() -> Template {
    let actions = Field {
        list: true,
        ui: Some(FieldUi {
            default_item: Some(to_value(&HeroAction::template_default())),
            item_label: Some("label"),
            ..Default::default()
        }),
        fields: vec![
            Field::string("Label", "label"),
            Field::string("Type", "type").options(vec![
                FieldOption { label: "Button", value: "button" },
                FieldOption { label: "Link", value: "link" },
            ]),
            icon_field(),
            Field::string("Link", "link"),
        ],
        ..Field::new(FieldType::Object, "Actions", "actions")
    };
    let image = Field {
        fields: vec![
            Field::new(FieldType::Image, "Image Source", "src"),
            Field::string("Alt Text", "alt"),
            Field::string("Video URL", "videoUrl")
                .description("If using a YouTube video, make sure to use the embed version of the video URL"),
        ],
        ..Field::new(FieldType::Object, "Image", "image")
    };
    Template {
        name: "hero",
        label: "Hero",
        ui: TemplateUi { preview_src: "/blocks/hero.png", default_item: to_value(&HeroBlock::template_default()) },
        fields: vec![
            background_field(),
            Field::string("Headline", "headline"),
            Field::string("Tagline", "tagline"),
            actions,
            image,
        ],
    }
}

pub fn all_templates() -> Vec<Template> {
    vec![echo_template(), hero_template()]
}
