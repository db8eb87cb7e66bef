//! Structured-data compression options

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Five-level ordinal deciding field inclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldImportance {
    /// Always include (id, status).
    Critical,
    /// Usually include (name, description).
    High,
    /// Sometimes include (details, assignee).
    Medium,
    /// Rarely include (notes, source).
    Low,
    /// Never include (timestamps, secrets).
    Never,
}

impl FieldImportance {
    pub fn value(&self) -> f64 {
        match self {
            FieldImportance::Critical => 1.0,
            FieldImportance::High => 0.8,
            FieldImportance::Medium => 0.5,
            FieldImportance::Low => 0.2,
            FieldImportance::Never => 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdCompressionConfig {
    /// Always include these fields.
    pub required_fields: Option<Vec<String>>,
    /// Never include these fields.
    pub excluded_fields: Option<Vec<String>>,
    /// Per-field importance scores; override the auto-detected defaults.
    pub field_importance: Option<BTreeMap<String, f64>>,
    /// Include fields scoring at or above this threshold.
    #[serde(default = "default_importance_threshold")]
    pub importance_threshold: f64,
    /// Fall back to substring-based importance detection.
    #[serde(default = "default_true")]
    pub auto_detect: bool,
    /// Truncate long text in complex fields.
    #[serde(default = "default_max_description_length")]
    pub max_description_length: usize,
    /// Keep nested dicts and lists instead of flattening.
    #[serde(default = "default_true")]
    pub preserve_structure: bool,
    /// Fields rendered first, in `default_fields_order`.
    #[serde(default = "default_simple_fields")]
    pub simple_fields: Vec<String>,
    /// Order for simple fields; identifiers come before names.
    #[serde(default = "default_fields_order")]
    pub default_fields_order: Vec<String>,
    /// Substring rules for auto-detected importance.
    #[serde(default = "default_fields_importance")]
    pub default_fields_importance: Vec<(String, FieldImportance)>,
}

fn default_importance_threshold() -> f64 {
    0.5
}

fn default_true() -> bool {
    true
}

fn default_max_description_length() -> usize {
    200
}

fn default_simple_fields() -> Vec<String> {
    ["id", "uuid", "title", "name", "type", "priority", "article_id", "product_id"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_fields_order() -> Vec<String> {
    ["id", "uuid", "priority", "article_id", "product_id", "title", "name", "type"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_fields_importance() -> Vec<(String, FieldImportance)> {
    use FieldImportance::*;
    [
        ("id", Critical),
        ("uuid", Critical),
        ("external_id", Critical),
        ("status", Critical),
        ("name", High),
        ("title", High),
        ("type", High),
        ("category", High),
        ("subcategory", Medium),
        ("tags", High),
        ("description", High),
        ("details", Medium),
        ("notes", Low),
        ("priority", High),
        ("severity", High),
        ("resolution", High),
        ("owner", High),
        ("assignee", Medium),
        ("department", Medium),
        ("channel", High),
        ("language", Medium),
        ("source", Low),
        ("metadata", Low),
        ("created_at", Low),
        ("updated_at", Low),
        ("version", Low),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), *v))
    .collect()
}

impl Default for SdCompressionConfig {
    fn default() -> Self {
        Self {
            required_fields: None,
            excluded_fields: None,
            field_importance: None,
            importance_threshold: default_importance_threshold(),
            auto_detect: true,
            max_description_length: default_max_description_length(),
            preserve_structure: true,
            simple_fields: default_simple_fields(),
            default_fields_order: default_fields_order(),
            default_fields_importance: default_fields_importance(),
        }
    }
}
