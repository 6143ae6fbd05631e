//! Explore view rows
//!
//! Turns an [`ImageMetadata`] record into the ordered `Label: value` rows
//! shown by the explore dialog.

use serde_json::Value;

use super::fields::{FieldDefinition, EXPORT_IMAGE_FIELDS};
use crate::models::ImageMetadata;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExploreRow {
    pub key: &'static str,
    pub label: String,
    pub value: String,
}

/// Rows for every explore-visible field whose value is non-empty, in table
/// order. Missing and null values count as empty.
pub fn explore_rows(metadata: &ImageMetadata) -> Vec<ExploreRow> {
    EXPORT_IMAGE_FIELDS
        .iter()
        .filter(|def| def.is_explore_visible)
        .filter_map(|def| {
            let value = metadata.value(def.key)?;
            let value = display_value(def, &value);
            if value.is_empty() {
                return None;
            }
            Some(ExploreRow {
                key: def.key,
                label: def.display_label(),
                value,
            })
        })
        .collect()
}

/// Display string for one field value.
///
/// Arrays in fields with options become their option labels joined with
/// `", "`; an element without a matching option keeps its raw value. Any
/// other array is joined with a bare `,`.
pub fn display_value(def: &FieldDefinition, value: &Value) -> String {
    match (value, def.options) {
        (Value::Array(items), Some(_)) => items
            .iter()
            .map(|item| {
                let raw = stringify(item);
                match def.option_label(&raw) {
                    Some(label) => label.to_string(),
                    None => raw,
                }
            })
            .collect::<Vec<_>>()
            .join(", "),
        (other, _) => stringify(other),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}
