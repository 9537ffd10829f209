use serde::{Deserialize, Serialize};

use crate::params::WidgetParams;

/// A collapsible group of tool entries in the side tool box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompartmentDescriptor {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub tools: Vec<ToolEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolEntry {
    pub id: String,
    pub widget_kind: String,
    #[serde(default)]
    pub params: WidgetParams,
}

impl CompartmentDescriptor {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tools: Vec::new(),
        }
    }

    pub fn tool(mut self, entry: ToolEntry) -> Self {
        self.tools.push(entry);
        self
    }
}

impl ToolEntry {
    pub fn new(
        id: impl Into<String>,
        widget_kind: impl Into<String>,
        params: WidgetParams,
    ) -> Self {
        Self {
            id: id.into(),
            widget_kind: widget_kind.into(),
            params,
        }
    }
}
