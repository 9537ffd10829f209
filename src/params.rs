//! Typed tool-entry configuration.
//!
//! Every widget kind accepts exactly one parameter shape. Descriptors carry a
//! `WidgetParams` value and the registry records which `ParamShape` each kind
//! expects, so a mismatch is caught before the factory runs.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetParams {
    #[default]
    Empty,
    Text {
        body: String,
    },
    Button {
        label: String,
        #[serde(default)]
        action: Option<String>,
    },
    ToggleList {
        items: Vec<ToggleOption>,
    },
    Select {
        options: Vec<String>,
        #[serde(default)]
        selected: usize,
    },
    Slider {
        min: i64,
        max: i64,
        value: i64,
    },
    Input {
        #[serde(default)]
        placeholder: String,
        #[serde(default)]
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleOption {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub checked: bool,
}

impl ToggleOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>, checked: bool) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            checked,
        }
    }
}

impl WidgetParams {
    pub fn shape(&self) -> ParamShape {
        match self {
            WidgetParams::Empty => ParamShape::Empty,
            WidgetParams::Text { .. } => ParamShape::Text,
            WidgetParams::Button { .. } => ParamShape::Button,
            WidgetParams::ToggleList { .. } => ParamShape::ToggleList,
            WidgetParams::Select { .. } => ParamShape::Select,
            WidgetParams::Slider { .. } => ParamShape::Slider,
            WidgetParams::Input { .. } => ParamShape::Input,
        }
    }

    pub fn text(body: impl Into<String>) -> Self {
        WidgetParams::Text { body: body.into() }
    }

    pub fn button(label: impl Into<String>) -> Self {
        WidgetParams::Button {
            label: label.into(),
            action: None,
        }
    }
}

/// The discriminant of a `WidgetParams` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamShape {
    Empty,
    Text,
    Button,
    ToggleList,
    Select,
    Slider,
    Input,
}

impl ParamShape {
    /// `Empty` params are accepted by every kind so that descriptors can omit
    /// configuration and let the factory fall back to its defaults.
    pub fn accepts(self, params: &WidgetParams) -> bool {
        let found = params.shape();
        found == self || found == ParamShape::Empty
    }
}

impl fmt::Display for ParamShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParamShape::Empty => "empty",
            ParamShape::Text => "text",
            ParamShape::Button => "button",
            ParamShape::ToggleList => "toggle_list",
            ParamShape::Select => "select",
            ParamShape::Slider => "slider",
            ParamShape::Input => "input",
        };
        write!(f, "{}", s)
    }
}
