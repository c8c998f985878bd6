//! Payload types returned by the tools.
//!
//! Each payload serializes with a `type` field naming the visualization, so a
//! renderer can dispatch on it without knowing which tool produced it.

use serde::Serialize;

use crate::db::Value;

/// Column key and display label.
pub type ColumnInfo = (String, String);

pub(crate) fn column_info(pairs: &[(&str, &str)]) -> Vec<ColumnInfo> {
    pairs
        .iter()
        .map(|(key, label)| (key.to_string(), label.to_string()))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Table")]
pub struct Table {
    pub columns: Vec<ColumnInfo>,
    pub rows: Vec<Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "PopulationPyramid")]
pub struct PopulationPyramid {
    /// Oldest age group first.
    pub items: Vec<PyramidItem>,
}

/// One age group: male count on the left, female count on the right.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PyramidItem {
    pub label: String,
    pub start: Value,
    pub end: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "AreaMap", rename_all = "camelCase")]
pub struct AreaMap {
    pub map_id: String,
    pub color_map: String,
    pub items: Vec<AreaItem>,
    pub on_click: Vec<ClickAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaItem {
    pub name: Value,
    pub value: Value,
}

/// What the renderer does when an area is clicked.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickAction {
    pub action: String,
    pub dtype_name: String,
    pub id_field: String,
    pub label_field: String,
}

impl ClickAction {
    /// Select the clicked country.
    pub fn select_country() -> Self {
        Self {
            action: "DTypeClick".to_string(),
            dtype_name: "Country".to_string(),
            id_field: "selected$$area".to_string(),
            label_field: "selected$$area$label".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Series", rename_all = "camelCase")]
pub struct Series {
    pub title: String,
    pub y_col_title: String,
    pub x_col: String,
    pub x_axis_type: String,
    pub val_cols: Vec<String>,
    pub smooth: bool,
    pub cols: Vec<ColumnInfo>,
    pub rows: Vec<Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "InfoBox")]
pub struct InfoBox {
    pub columns: Vec<ColumnInfo>,
    /// Values in `columns` order; null where the country has no value.
    pub row: Vec<Value>,
}
