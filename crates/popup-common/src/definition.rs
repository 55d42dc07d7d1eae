//! Builder types for popup definitions.
//!
//! A definition is a title plus an ordered list of elements, each discriminated
//! by a `type` field. The requester never inspects or validates a definition
//! (it is serialized and passed to the server verbatim), so these types exist
//! purely for callers that prefer constructing definitions in Rust over
//! hand-writing `serde_json::json!` literals. Element descriptors the server
//! understands but this enum does not model can always be sent as raw JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A popup definition: optional title and the ordered elements to display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopupDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub elements: Vec<Element>,
}

impl PopupDefinition {
    /// Create a definition with a title.
    pub fn new(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            elements: Vec::new(),
        }
    }

    /// Create a definition without a title.
    pub fn untitled() -> Self {
        Self {
            title: None,
            elements: Vec::new(),
        }
    }

    /// Append an element.
    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    /// Serialize into the JSON value the requester sends.
    pub fn into_value(self) -> Value {
        serde_json::to_value(self).expect("popup definition serializes to JSON")
    }
}

impl From<PopupDefinition> for Value {
    fn from(definition: PopupDefinition) -> Value {
        definition.into_value()
    }
}

/// A single popup element, discriminated by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    /// Static text display.
    Text { content: String },

    /// Rich markdown display.
    Markdown { content: String },

    /// Boolean checkbox input.
    Checkbox {
        label: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        default: Option<bool>,
    },

    /// Text input field, single or multi-line.
    Input {
        label: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        rows: Option<u32>,
    },

    /// Single selection from a list of options.
    Select {
        label: String,
        options: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        default: Option<String>,
    },

    /// Multiple selection from a list of options.
    Multiselect {
        label: String,
        options: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },

    /// Numeric slider input.
    Slider {
        label: String,
        min: f64,
        max: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        default: Option<f64>,
    },

    /// Labeled container grouping nested elements.
    Group {
        label: String,
        elements: Vec<Element>,
    },
}

impl Element {
    /// Static text element.
    pub fn text(content: &str) -> Self {
        Element::Text {
            content: content.to_string(),
        }
    }

    /// Checkbox element without an explicit id.
    pub fn checkbox(label: &str) -> Self {
        Element::Checkbox {
            label: label.to_string(),
            id: None,
            default: None,
        }
    }

    /// Text input element keyed by `id`.
    pub fn input(label: &str, id: &str) -> Self {
        Element::Input {
            label: label.to_string(),
            id: Some(id.to_string()),
            placeholder: None,
            rows: None,
        }
    }

    /// Single-select element keyed by `id`.
    pub fn select(label: &str, id: &str, options: &[&str]) -> Self {
        Element::Select {
            label: label.to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
            id: Some(id.to_string()),
            default: None,
        }
    }
}
