//! Output envelope with token accounting and the expansion safeguard

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static pattern"));

/// The input as the caller handed it over: free text or a JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OriginalInput {
    Text(String),
    Value(Value),
}

impl OriginalInput {
    /// Serialized form used for length accounting and the safeguard swap.
    pub fn serialized(&self) -> String {
        match self {
            OriginalInput::Text(s) => s.clone(),
            OriginalInput::Value(v) => serde_json::to_string(v).unwrap_or_default(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            OriginalInput::Text(s) => s.len(),
            OriginalInput::Value(v) => serde_json::to_string(v).map(|s| s.len()).unwrap_or(0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<String> for OriginalInput {
    fn from(s: String) -> Self {
        OriginalInput::Text(s)
    }
}

impl From<&str> for OriginalInput {
    fn from(s: &str) -> Self {
        OriginalInput::Text(s.to_string())
    }
}

impl From<Value> for OriginalInput {
    fn from(v: Value) -> Self {
        OriginalInput::Value(v)
    }
}

/// Free-form per-component metadata carried next to the compressed stream.
pub type Metadata = serde_json::Map<String, Value>;

/// Compression result envelope.
///
/// Construction normalizes whitespace in `compressed` (all runs collapse to
/// one space) and applies the expansion safeguard: when the compressed form
/// estimates to more tokens than the original, the serialized original is
/// kept instead and `metadata.description` records why.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClmOutput {
    pub original: OriginalInput,
    pub component: String,
    pub compressed: String,
    pub metadata: Metadata,
}

impl ClmOutput {
    pub fn new(
        original: OriginalInput,
        component: &str,
        compressed: String,
        mut metadata: Metadata,
    ) -> Self {
        let compressed = normalize_whitespace(&compressed);

        let n = estimate_tokens(&original.serialized());
        let c = estimate_tokens(&compressed);

        let compressed = if c > n {
            metadata.insert(
                "description".to_string(),
                Value::String("CL Tokens greater than NL token. Keeping NL input".to_string()),
            );
            normalize_whitespace(&original.serialized())
        } else {
            compressed
        };

        Self {
            original,
            component: component.to_string(),
            compressed,
            metadata,
        }
    }

    /// Estimated token count of the original input.
    pub fn n_tokens(&self) -> usize {
        estimate_tokens(&self.original.serialized())
    }

    /// Estimated token count of the compressed output.
    pub fn c_tokens(&self) -> usize {
        estimate_tokens(&self.compressed)
    }

    /// Token reduction as a percentage, rounded to one decimal place.
    pub fn compression_ratio(&self) -> f64 {
        let n = self.n_tokens();
        if n == 0 {
            return 0.0;
        }
        let ratio = (1.0 - self.c_tokens() as f64 / n as f64) * 100.0;
        (ratio * 10.0).round() / 10.0
    }
}

/// Token estimate at ~4 characters per token, never below 1.
pub fn estimate_tokens(text: &str) -> usize {
    (text.len() / 4).max(1)
}

/// Collapse every whitespace run to a single space and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn whitespace_collapses_to_single_spaces() {
        assert_eq!(normalize_whitespace("a\t b\n\nc   d"), "a b c d");
        assert_eq!(normalize_whitespace("  x  "), "x");
    }

    #[test]
    fn expansion_keeps_original() {
        let out = ClmOutput::new(
            OriginalInput::from("hi"),
            "SYSTEM_PROMPT",
            "[REQ:ANALYZE] [TARGET:ANSWER]".to_string(),
            Metadata::new(),
        );
        assert_eq!(out.compressed, "hi");
        assert_eq!(
            out.metadata.get("description").and_then(Value::as_str),
            Some("CL Tokens greater than NL token. Keeping NL input")
        );
    }

    #[test]
    fn compression_ratio_rounds_to_one_decimal() {
        let original = "x".repeat(120);
        let out = ClmOutput::new(
            OriginalInput::from(original.as_str()),
            "SYSTEM_PROMPT",
            "[REQ:ANALYZE]".to_string(),
            Metadata::new(),
        );
        // 30 input tokens, 3 output tokens -> 90.0
        assert_eq!(out.compression_ratio(), 90.0);
    }

    #[test]
    fn value_original_serializes_for_accounting() {
        let v = json!({"id": "P1", "name": "A"});
        let input = OriginalInput::from(v);
        assert!(input.serialized().contains("\"id\""));
    }

    #[test]
    fn safeguard_serializes_structured_original() {
        let v = json!({"a": 1});
        let out = ClmOutput::new(
            OriginalInput::from(v),
            "ds_compression",
            "{a}[1] trailing expansion padding".to_string(),
            Metadata::new(),
        );
        assert_eq!(out.compressed, "{\"a\":1}");
    }
}
