//! Structured-data encoder: header + delimiter-separated value rows

use clm_core::{ClmOutput, Metadata, OriginalInput};
use serde_json::{json, Map, Value};

use crate::config::{FieldImportance, SdCompressionConfig};

pub const COMPONENT: &str = "ds_compression";

const ROW_SEPARATOR: &str = "|";

pub struct SdEncoder {
    config: SdCompressionConfig,
    delimiter: String,
}

impl SdEncoder {
    pub fn new(config: SdCompressionConfig) -> Self {
        Self {
            config,
            delimiter: ",".to_string(),
        }
    }

    pub fn with_delimiter(config: SdCompressionConfig, delimiter: impl Into<String>) -> Self {
        Self {
            config,
            delimiter: delimiter.into(),
        }
    }

    /// Compress a record or record collection:
    /// `{k1,k2}[v1,v2][v1,v2]...`
    pub fn encode(&self, data: &Value) -> ClmOutput {
        let compressed = match data {
            Value::Object(record) => self.encode_record(record),
            Value::Array(records) => self.encode_records(records),
            other => self.format_value(other, None),
        };

        tracing::debug!(compressed_length = compressed.len(), "compressed records");

        let serialized = data.to_string();
        let mut metadata = Metadata::new();
        metadata.insert("original_length".into(), json!(serialized.len()));
        metadata.insert("compressed_length".into(), json!(compressed.len()));
        metadata.insert(
            "has_numbers".into(),
            json!(serialized.chars().any(|c| c.is_ascii_digit())),
        );
        metadata.insert("has_urls".into(), json!(serialized.contains("http://") || serialized.contains("https://")));

        ClmOutput::new(
            OriginalInput::from(data.clone()),
            COMPONENT,
            compressed,
            metadata,
        )
    }

    fn encode_record(&self, record: &Map<String, Value>) -> String {
        let filtered = self.filter_record(record);
        format!("{}{}", self.format_header(&filtered), self.format_row(&filtered))
    }

    fn encode_records(&self, records: &[Value]) -> String {
        let filtered: Vec<Vec<(String, Value)>> = records
            .iter()
            .filter_map(Value::as_object)
            .map(|r| self.filter_record(r))
            .collect();

        let Some(first) = filtered.first() else {
            return String::new();
        };

        let mut out = self.format_header(first);
        for row in &filtered {
            out.push_str(&self.format_row(row));
        }
        out
    }

    /// Filter and order one record: simple fields first in the declared
    /// order, complex fields after in first-seen order. The identifier
    /// field always survives.
    fn filter_record(&self, record: &Map<String, Value>) -> Vec<(String, Value)> {
        let mut simple: Vec<(String, Value)> = Vec::new();
        let mut complex: Vec<(String, Value)> = Vec::new();

        for (key, value) in record {
            let key_lower = key.to_lowercase();
            let keep = key_lower == "id" || self.should_include_field(&key_lower, value);
            if !keep {
                continue;
            }

            let value = if value.is_object() && self.config.preserve_structure {
                Value::Object(
                    self.filter_record(value.as_object().expect("checked"))
                        .into_iter()
                        .collect(),
                )
            } else {
                value.clone()
            };

            if self.config.simple_fields.contains(&key_lower) {
                simple.push((key_lower, value));
            } else {
                complex.push((key_lower, value));
            }
        }

        simple.sort_by_key(|(key, _)| {
            self.config
                .default_fields_order
                .iter()
                .position(|o| o == key)
                .unwrap_or(usize::MAX)
        });

        simple.extend(complex);
        simple
    }

    fn format_header(&self, fields: &[(String, Value)]) -> String {
        let keys: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
        format!("{{{}}}", keys.join(&self.delimiter))
    }

    fn format_row(&self, fields: &[(String, Value)]) -> String {
        let values: Vec<String> = fields
            .iter()
            .map(|(key, value)| {
                let max_length = (!self.config.simple_fields.contains(key))
                    .then_some(self.config.max_description_length);
                self.format_value(value, max_length)
            })
            .collect();
        format!("[{}]", values.join(&self.delimiter))
    }

    fn format_value(&self, value: &Value, max_length: Option<usize>) -> String {
        let formatted = match value {
            Value::Array(items) => {
                if items.first().map(Value::is_object).unwrap_or(false) {
                    items
                        .iter()
                        .filter_map(Value::as_object)
                        .map(|o| self.format_inline_object(o))
                        .collect::<Vec<_>>()
                        .join(ROW_SEPARATOR)
                } else {
                    items
                        .iter()
                        .map(plain_string)
                        .collect::<Vec<_>>()
                        .join("+")
                }
            }
            Value::Object(map) => self.format_inline_object(map),
            Value::String(s) => s.replace(&self.delimiter, ";"),
            Value::Bool(true) => "true".to_string(),
            Value::Bool(false) => "false".to_string(),
            other => plain_string(other),
        };

        match max_length {
            Some(max) if formatted.len() > max => {
                let mut end = max;
                while !formatted.is_char_boundary(end) {
                    end -= 1;
                }
                format!("{}...", &formatted[..end])
            }
            _ => formatted,
        }
    }

    /// `{schema}[values]` for a nested object.
    fn format_inline_object(&self, map: &Map<String, Value>) -> String {
        let fields: Vec<(String, Value)> = self.order_fields(map);
        let schema: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
        let values: Vec<String> = fields
            .iter()
            .map(|(_, v)| self.format_value(v, None))
            .collect();
        format!(
            "{{{}}}[{}]",
            schema.join(&self.delimiter),
            values.join(&self.delimiter)
        )
    }

    fn order_fields(&self, map: &Map<String, Value>) -> Vec<(String, Value)> {
        let mut simple: Vec<(String, Value)> = Vec::new();
        let mut complex: Vec<(String, Value)> = Vec::new();
        for (key, value) in map {
            let key_lower = key.to_lowercase();
            if self.config.simple_fields.contains(&key_lower) {
                simple.push((key_lower, value.clone()));
            } else {
                complex.push((key_lower, value.clone()));
            }
        }
        simple.sort_by_key(|(key, _)| {
            self.config
                .default_fields_order
                .iter()
                .position(|o| o == key)
                .unwrap_or(usize::MAX)
        });
        simple.extend(complex);
        simple
    }

    /// Inclusion order: excluded, required, explicit importance,
    /// auto-detected importance, then keep.
    fn should_include_field(&self, key: &str, value: &Value) -> bool {
        if let Some(excluded) = &self.config.excluded_fields {
            if excluded.iter().any(|e| e == key) {
                return false;
            }
        }
        if let Some(required) = &self.config.required_fields {
            if required.iter().any(|r| r == key) {
                return true;
            }
        }
        if let Some(importance) = &self.config.field_importance {
            if let Some(score) = importance.get(key) {
                return *score >= self.config.importance_threshold;
            }
        }
        if self.config.auto_detect {
            return self.detect_field_importance(key, value).value()
                >= self.config.importance_threshold;
        }
        true
    }

    fn detect_field_importance(&self, key: &str, value: &Value) -> FieldImportance {
        for (pattern, importance) in &self.config.default_fields_importance {
            if key.contains(pattern.as_str()) {
                return *importance;
            }
        }

        if key.starts_with('_') || key.starts_with("internal_") {
            return FieldImportance::Low;
        }
        if key.ends_with("_at") || key.ends_with("_date") {
            return FieldImportance::Never;
        }
        if value.is_null()
            || value.as_str().map(str::is_empty).unwrap_or(false)
            || value.as_array().map(Vec::is_empty).unwrap_or(false)
        {
            return FieldImportance::Never;
        }
        if let Some(s) = value.as_str() {
            if s.len() > 500 {
                return FieldImportance::Medium;
            }
            if s.len() < 3 {
                return FieldImportance::Low;
            }
        }
        FieldImportance::Medium
    }
}

fn plain_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(config: SdCompressionConfig, data: Value) -> String {
        SdEncoder::new(config).encode(&data).compressed
    }

    #[test]
    fn excluded_fields_never_appear() {
        let config = SdCompressionConfig {
            excluded_fields: Some(vec!["warehouse".into(), "created_date".into()]),
            ..Default::default()
        };
        let data = serde_json::json!([
            {"id": "P1", "name": "A", "description": "first product", "warehouse": "X"},
            {"id": "P2", "name": "B", "description": "second product", "warehouse": "Y"}
        ]);
        let out = encode(config, data);
        assert!(out.starts_with("{id,name,description}"));
        assert!(!out.contains("warehouse"));
        assert!(!out.contains('X'));
        assert_eq!(out.matches('[').count(), 2);
    }

    #[test]
    fn single_record_emits_one_pair() {
        let config = SdCompressionConfig {
            required_fields: Some(vec!["id".into()]),
            ..Default::default()
        };
        let out = encode(config, serde_json::json!({"id": "T-1"}));
        assert_eq!(out, "{id}[T-1]");
    }

    #[test]
    fn simple_fields_order_before_complex() {
        let data = serde_json::json!({
            "description": "long text here",
            "name": "Widget",
            "id": "W-1"
        });
        let out = encode(SdCompressionConfig::default(), data);
        assert!(out.starts_with("{id,name,description}"));
    }

    #[test]
    fn timestamps_drop_under_auto_detect() {
        let data = serde_json::json!({
            "id": "1",
            "name": "A",
            "created_at": "2024-01-01",
            "updated_at": "2024-01-02"
        });
        let out = encode(SdCompressionConfig::default(), data);
        assert!(!out.contains("created_at"));
        assert!(!out.contains("2024"));
    }

    #[test]
    fn delimiter_in_strings_is_escaped() {
        let data = serde_json::json!({"id": "1", "description": "red, blue, green"});
        let out = encode(SdCompressionConfig::default(), data);
        assert!(out.contains("red; blue; green"));
    }

    #[test]
    fn long_complex_values_truncate_with_ellipsis() {
        let config = SdCompressionConfig {
            max_description_length: 10,
            ..Default::default()
        };
        let data = serde_json::json!({
            "id": "1",
            "description": "a very long description that keeps going"
        });
        let out = encode(config, data);
        assert!(out.contains("..."));
    }

    #[test]
    fn lists_of_scalars_join_with_plus() {
        let data = serde_json::json!({"id": "1", "tags": ["a", "b", "c"]});
        let out = encode(SdCompressionConfig::default(), data);
        assert!(out.contains("a+b+c"));
    }

    #[test]
    fn nested_objects_recurse_with_schema() {
        let data = serde_json::json!({
            "id": "1",
            "owner": {"name": "Ann", "team": "核心"}
        });
        let out = encode(SdCompressionConfig::default(), data);
        assert!(out.contains("{name,team}[Ann,核心]"));
    }

    #[test]
    fn lists_of_objects_join_rows_with_pipe() {
        let data = serde_json::json!({
            "id": "1",
            "tags": [{"name": "a"}, {"name": "b"}]
        });
        let out = encode(SdCompressionConfig::default(), data);
        assert!(out.contains("{name}[a]|{name}[b]"));
    }

    #[test]
    fn booleans_render_lowercase() {
        let data = serde_json::json!({"id": "1", "status": true});
        let out = encode(SdCompressionConfig::default(), data);
        assert!(out.contains("true"));
    }

    #[test]
    fn expansion_falls_back_to_original() {
        // One tiny field explodes into a header longer than the input
        let data = serde_json::json!({"id": 1});
        let out = SdEncoder::new(SdCompressionConfig::default()).encode(&data);
        assert!(out.c_tokens() <= out.n_tokens());
    }
}
