use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Action type tag
///
/// Unknown `type` strings land in `Other` so host-defined actions survive a
/// parse and are dispatched like a submit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionKind {
    OpenUrl,
    Submit,
    ToggleVisibility,
    ShowCard,
    Execute,
    Other(String),
}

impl ActionKind {
    pub fn as_str(&self) -> &str {
        match self {
            ActionKind::OpenUrl => "Action.OpenUrl",
            ActionKind::Submit => "Action.Submit",
            ActionKind::ToggleVisibility => "Action.ToggleVisibility",
            ActionKind::ShowCard => "Action.ShowCard",
            ActionKind::Execute => "Action.Execute",
            ActionKind::Other(name) => name,
        }
    }
}

impl From<String> for ActionKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Action.OpenUrl" => ActionKind::OpenUrl,
            "Action.Submit" => ActionKind::Submit,
            "Action.ToggleVisibility" => ActionKind::ToggleVisibility,
            "Action.ShowCard" => ActionKind::ShowCard,
            "Action.Execute" => ActionKind::Execute,
            _ => ActionKind::Other(value),
        }
    }
}

impl From<&str> for ActionKind {
    fn from(value: &str) -> Self {
        ActionKind::from(value.to_string())
    }
}

impl From<ActionKind> for String {
    fn from(kind: ActionKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry of `targetElements`: a bare id flips, an object may pin the value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetElement {
    Id(String),
    #[serde(rename_all = "camelCase")]
    Explicit {
        element_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        is_visible: Option<bool>,
    },
}

impl TargetElement {
    pub fn element_id(&self) -> &str {
        match self {
            TargetElement::Id(id) => id,
            TargetElement::Explicit { element_id, .. } => element_id,
        }
    }

    /// Explicit visibility, `None` means flip
    pub fn pinned(&self) -> Option<bool> {
        match self {
            TargetElement::Id(_) => None,
            TargetElement::Explicit { is_visible, .. } => *is_visible,
        }
    }
}

impl From<&str> for TargetElement {
    fn from(id: &str) -> Self {
        TargetElement::Id(id.to_string())
    }
}

/// An action as declared in the card, built fresh at interaction time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPayload {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_elements: Vec<TargetElement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    /// Nested card of `Action.ShowCard`, kept raw
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Value>,
    /// Host-defined fields (e.g. on custom actions) passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ActionPayload {
    pub fn new(kind: impl Into<ActionKind>) -> Self {
        Self {
            kind: kind.into(),
            id: None,
            title: None,
            url: None,
            data: None,
            target_elements: Vec::new(),
            verb: None,
            is_enabled: None,
            alt_text: None,
            card: None,
            extra: Map::new(),
        }
    }

    pub fn open_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::new(ActionKind::OpenUrl)
        }
    }

    pub fn submit(data: Value) -> Self {
        Self {
            data: Some(data),
            ..Self::new(ActionKind::Submit)
        }
    }

    pub fn toggle_visibility<I, T>(targets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TargetElement>,
    {
        Self {
            target_elements: targets.into_iter().map(Into::into).collect(),
            ..Self::new(ActionKind::ToggleVisibility)
        }
    }

    pub fn show_card(card: Value) -> Self {
        Self {
            card: Some(card),
            ..Self::new(ActionKind::ShowCard)
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Actions default to enabled when `isEnabled` is absent
    pub fn is_enabled(&self) -> bool {
        self.is_enabled.unwrap_or(true)
    }

    /// The declared url when it is non-empty
    pub fn navigable_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }
}
