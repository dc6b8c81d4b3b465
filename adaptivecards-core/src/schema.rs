use crate::action::ActionPayload;
use serde::{Deserialize, Serialize};

/// Root of a card document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveCard {
    #[serde(rename = "type")]
    pub card_type: String,
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub body: Vec<Element>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ActionPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_action: Option<ActionPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<BackgroundImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BackgroundImage {
    Url(String),
    Object { url: String },
}

impl BackgroundImage {
    pub fn url(&self) -> &str {
        match self {
            BackgroundImage::Url(url) => url,
            BackgroundImage::Object { url } => url,
        }
    }
}

/// Body element, tagged by its schema `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Element {
    TextBlock(TextBlock),
    Image(Image),
    Media(Media),
    Container(Container),
    ColumnSet(ColumnSet),
    FactSet(FactSet),
    ImageSet(ImageSet),
    ActionSet(ActionSet),
    #[serde(rename = "Input.Text")]
    TextInput(TextInput),
    #[serde(rename = "Input.Number")]
    NumberInput(NumberInput),
    #[serde(rename = "Input.Date")]
    DateInput(DateInput),
    #[serde(rename = "Input.Time")]
    TimeInput(TimeInput),
    #[serde(rename = "Input.Toggle")]
    ToggleInput(ToggleInput),
    #[serde(rename = "Input.ChoiceSet")]
    ChoiceSetInput(ChoiceSetInput),
    /// Element types this renderer does not know; skipped at mount
    #[serde(other)]
    Unknown,
}

impl Element {
    /// Schema type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Element::TextBlock(_) => "TextBlock",
            Element::Image(_) => "Image",
            Element::Media(_) => "Media",
            Element::Container(_) => "Container",
            Element::ColumnSet(_) => "ColumnSet",
            Element::FactSet(_) => "FactSet",
            Element::ImageSet(_) => "ImageSet",
            Element::ActionSet(_) => "ActionSet",
            Element::TextInput(_) => "Input.Text",
            Element::NumberInput(_) => "Input.Number",
            Element::DateInput(_) => "Input.Date",
            Element::TimeInput(_) => "Input.Time",
            Element::ToggleInput(_) => "Input.Toggle",
            Element::ChoiceSetInput(_) => "Input.ChoiceSet",
            Element::Unknown => "Unknown",
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Element::TextBlock(e) => e.id.as_deref(),
            Element::Image(e) => e.id.as_deref(),
            Element::Media(e) => e.id.as_deref(),
            Element::Container(e) => e.id.as_deref(),
            Element::ColumnSet(e) => e.id.as_deref(),
            Element::FactSet(e) => e.id.as_deref(),
            Element::ImageSet(e) => e.id.as_deref(),
            Element::ActionSet(e) => e.id.as_deref(),
            Element::TextInput(e) => Some(e.id.as_str()),
            Element::NumberInput(e) => Some(e.id.as_str()),
            Element::DateInput(e) => Some(e.id.as_str()),
            Element::TimeInput(e) => Some(e.id.as_str()),
            Element::ToggleInput(e) => Some(e.id.as_str()),
            Element::ChoiceSetInput(e) => Some(e.id.as_str()),
            Element::Unknown => None,
        }
    }

    /// `isVisible` as declared in the schema (absent means visible)
    pub fn declared_visible(&self) -> bool {
        let flag = match self {
            Element::TextBlock(e) => e.is_visible,
            Element::Image(e) => e.is_visible,
            Element::Media(e) => e.is_visible,
            Element::Container(e) => e.is_visible,
            Element::ColumnSet(e) => e.is_visible,
            Element::FactSet(e) => e.is_visible,
            Element::ImageSet(e) => e.is_visible,
            Element::ActionSet(e) => e.is_visible,
            Element::TextInput(e) => e.is_visible,
            Element::NumberInput(e) => e.is_visible,
            Element::DateInput(e) => e.is_visible,
            Element::TimeInput(e) => e.is_visible,
            Element::ToggleInput(e) => e.is_visible,
            Element::ChoiceSetInput(e) => e.is_visible,
            Element::Unknown => None,
        };
        flag.unwrap_or(true)
    }

    pub fn select_action(&self) -> Option<&ActionPayload> {
        match self {
            Element::Image(e) => e.select_action.as_ref(),
            Element::Container(e) => e.select_action.as_ref(),
            Element::ColumnSet(e) => e.select_action.as_ref(),
            _ => None,
        }
    }

    pub fn is_input(&self) -> bool {
        matches!(
            self,
            Element::TextInput(_)
                | Element::NumberInput(_)
                | Element::DateInput(_)
                | Element::TimeInput(_)
                | Element::ToggleInput(_)
                | Element::ChoiceSetInput(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_lines: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub size: ImageSize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_action: Option<ActionPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

/// Image `size`; unrecognised values fall back to `Auto`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ImageSize {
    #[default]
    Auto,
    Stretch,
    Small,
    Medium,
    Large,
}

impl From<String> for ImageSize {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "stretch" => ImageSize::Stretch,
            "small" => ImageSize::Small,
            "medium" => ImageSize::Medium,
            "large" => ImageSize::Large,
            _ => ImageSize::Auto,
        }
    }
}

impl From<ImageSize> for String {
    fn from(size: ImageSize) -> Self {
        match size {
            ImageSize::Auto => "auto",
            ImageSize::Stretch => "stretch",
            ImageSize::Small => "small",
            ImageSize::Medium => "medium",
            ImageSize::Large => "large",
        }
        .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub sources: Vec<MediaSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSource {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub items: Vec<Element>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_action: Option<ActionPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_action: Option<ActionPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub items: Vec<Element>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_action: Option<ActionPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub facts: Vec<Fact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    pub title: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub actions: Vec<ActionPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

// ─── Inputs ──────────────────────────────────────────────────────────────────
//
// Input ids default to "" so a missing id still parses; `parse_card` rejects
// it, `parse_card_unchecked` lets it through.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextInput {
    #[serde(default)]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_multiline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_action: Option<ActionPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberInput {
    #[serde(default)]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateInput {
    #[serde(default)]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeInput {
    #[serde(default)]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleInput {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_off: Option<String>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

impl ToggleInput {
    pub fn value_on(&self) -> &str {
        self.value_on.as_deref().unwrap_or("true")
    }

    pub fn value_off(&self) -> &str {
        self.value_off.as_deref().unwrap_or("false")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceSetInput {
    #[serde(default)]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default)]
    pub is_multi_select: bool,
    #[serde(default)]
    pub style: ChoiceSetStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

impl ChoiceSetInput {
    pub fn has_choice(&self, value: &str) -> bool {
        self.choices.iter().any(|c| c.value == value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub title: String,
    pub value: String,
}

/// ChoiceSet presentation; anything but `expanded` renders as the compact picker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChoiceSetStyle {
    #[default]
    Compact,
    Expanded,
}

impl From<String> for ChoiceSetStyle {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case("expanded") {
            ChoiceSetStyle::Expanded
        } else {
            ChoiceSetStyle::Compact
        }
    }
}

impl From<ChoiceSetStyle> for String {
    fn from(style: ChoiceSetStyle) -> Self {
        match style {
            ChoiceSetStyle::Compact => "compact".to_string(),
            ChoiceSetStyle::Expanded => "expanded".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_element_type_parses() {
        let element: Element = serde_json::from_value(json!({ "type": "RichTextBlock", "inlines": [] })).unwrap();
        assert_eq!(element, Element::Unknown);
        assert_eq!(element.id(), None);
    }

    #[test]
    fn test_image_size_default_arm() {
        let image: Image = serde_json::from_value(json!({ "url": "http://img", "size": "gigantic" })).unwrap();
        assert_eq!(image.size, ImageSize::Auto);
        let image: Image = serde_json::from_value(json!({ "url": "http://img", "size": "Large" })).unwrap();
        assert_eq!(image.size, ImageSize::Large);
    }

    #[test]
    fn test_input_without_id_parses_as_empty() {
        let element: Element = serde_json::from_value(json!({ "type": "Input.Text" })).unwrap();
        assert_eq!(element.id(), Some(""));
        assert!(element.is_input());
    }

    #[test]
    fn test_declared_visible() {
        let element: Element =
            serde_json::from_value(json!({ "type": "TextBlock", "id": "t", "text": "hi", "isVisible": false }))
                .unwrap();
        assert!(!element.declared_visible());
        let element: Element = serde_json::from_value(json!({ "type": "TextBlock", "text": "hi" })).unwrap();
        assert!(element.declared_visible());
    }

    #[test]
    fn test_background_image_forms() {
        let card: AdaptiveCard = serde_json::from_value(json!({
            "type": "AdaptiveCard",
            "backgroundImage": { "url": "http://bg" }
        }))
        .unwrap();
        assert_eq!(card.background_image.as_ref().map(|b| b.url()), Some("http://bg"));
    }
}
