//! Output-schema analysis
//!
//! Two paths into one compact schema string:
//! - structured: a JSON value (explicit block or caller-supplied) encoded
//!   recursively, with optional type inference
//! - natural language: normalized prose parsed through a priority list of
//!   field grammars, with indentation-based nesting
//!
//! Attribute extraction (ENUMS, CONSTRAINTS, SPECS) only runs when the
//! configuration asks for attributes.

use std::collections::BTreeMap;

use clm_core::{OutputField, OutputFormatType, OutputSchema};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Map, Value};

static JSON_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)```(?:json)?\s*(\{[\s\S]*?\})\s*```").expect("static pattern")
});
static BARE_JSON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\{[\s\S]{10,2000}\})").expect("static pattern"));
static RANGE_ENUM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+\.?\d*)\s*-\s*(\d+\.?\d*)\s*(?:means|is|=|:)\s*([A-Za-z_ ]+)")
        .expect("static pattern")
});
static INLINE_ENUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([\w.]+)\s*\(([^)]+\|[^)]+)\)").expect("static pattern"));
static BLOCK_ENUM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^([^\n:]{1,80}):\s*\n((?:\s*-\s*[^\n]+\n?)+)").expect("static pattern")
});
static SPECS_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)specs\s*[:=]\s*\{([\s\S]+?)\}").expect("static pattern"));
static TYPE_RULE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([\w.]+)\s+(?:is|are)\s+(?:a|an)?\s*(float|int|integer|boolean|bool|string|str|array|list|object)")
        .expect("static pattern")
});
static CONTAINS_KEYS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:contains?|includes?|have the following keys|fields are)\s*[:\-]?\s*(.+)")
        .expect("static pattern")
});
static REQUIREMENT_RULE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([\w.]+)\s+(required|optional|must be present|must be absent)")
        .expect("static pattern")
});
static FIELD_ENUMERATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:fields?|keys?)\s*(?:are|:)\s*(.+)").expect("static pattern")
});

const NON_ENUM_HEADERS: &[&str] = &[
    "output", "format", "instruction", "instructions", "requirement", "requirements",
    "responsibilities", "responsibility", "document", "documentation", "ensure", "provide",
];
const ENUM_HINT_HEADERS: &[&str] = &[
    "steps", "types", "values", "options", "levels", "statuses", "categories",
];

pub struct OutputFormatAnalyzer {
    pub infer_types: bool,
    pub add_attrs: bool,
}

impl OutputFormatAnalyzer {
    /// Structured path: the caller already has a JSON value.
    pub fn analyze_value(&self, value: &Value, extra_text: &str) -> OutputSchema {
        let schema = self.encode_schema(value);
        let mut attributes = BTreeMap::new();

        if self.add_attrs {
            self.attach_enum_attributes(extra_text, &mut attributes);
            if let Some(specs) = self.extract_specs(extra_text) {
                attributes.insert("SPECS".to_string(), specs.to_string());
            }
        }

        OutputSchema {
            format_type: OutputFormatType::Json,
            fields: self.fields_of(value),
            schema,
            attributes,
            raw_schema: Some(value.to_string()),
            format_hint: None,
        }
    }

    /// Natural-language path. Returns `None` when the text carries no
    /// recognizable schema description.
    pub fn analyze_text(&self, text: &str) -> Option<OutputSchema> {
        let normalized = normalize_text(text);

        if let Some(value) = find_json_block(&normalized) {
            return Some(self.analyze_value(&value, &normalized));
        }

        let format = detect_format(&normalized);
        let entries = parse_entries(&normalized);
        if entries.is_empty() {
            return None;
        }

        let nested = detect_nested(&normalized, &entries);
        let schema = encode_entries(&entries);
        let keys: Vec<String> = entries.iter().map(|e| e.key.clone()).collect();

        let mut attributes = BTreeMap::new();
        attributes.insert("KEYS".to_string(), keys.join("+"));
        if nested {
            attributes.insert("NESTED".to_string(), "true".to_string());
        }
        if self.add_attrs {
            self.attach_enum_attributes(&normalized, &mut attributes);
            if let Some(specs) = self.extract_specs(&normalized) {
                attributes.insert("SPECS".to_string(), specs.to_string());
            }
        }

        let fields = entries
            .iter()
            .map(|e| {
                let mut field = OutputField::named(&e.key);
                field.description = e.desc.clone();
                field.nested = (!e.children.is_empty()).then(|| {
                    e.children.iter().map(|c| OutputField::named(c)).collect()
                });
                field
            })
            .collect();

        Some(OutputSchema {
            format_type: format,
            fields,
            schema,
            attributes,
            raw_schema: Some(text.to_string()),
            format_hint: Some(format),
        })
    }

    /// Compact schema encoding. Without type inference primitive types are
    /// omitted but nested object structure is preserved; with it every
    /// leaf carries one of STR, INT, FLOAT, BOOL, ANY.
    fn encode_schema(&self, value: &Value) -> String {
        match value {
            Value::Object(map) => {
                let parts: Vec<String> = map
                    .iter()
                    .map(|(key, val)| match val {
                        Value::Object(_) => format!("{key}:{}", self.encode_schema(val)),
                        Value::Array(items) => {
                            if items.is_empty() {
                                format!("{key}:[]")
                            } else if items[0].is_object() {
                                format!("{key}:[{}]", self.encode_schema(&items[0]))
                            } else if self.infer_types {
                                format!("{key}:[{}]", infer_type(&items[0]))
                            } else {
                                key.clone()
                            }
                        }
                        _ if self.infer_types => format!("{key}:{}", infer_type(val)),
                        _ => key.clone(),
                    })
                    .collect();
                format!("{{{}}}", parts.join(","))
            }
            Value::Array(items) => {
                if items.is_empty() {
                    "[]".to_string()
                } else if items[0].is_object() {
                    format!("[{}]", self.encode_schema(&items[0]))
                } else if self.infer_types {
                    format!("[{}]", infer_type(&items[0]))
                } else {
                    "[]".to_string()
                }
            }
            _ if self.infer_types => infer_type(value).to_string(),
            _ => String::new(),
        }
    }

    fn fields_of(&self, value: &Value) -> Vec<OutputField> {
        let Value::Object(map) = value else {
            return Vec::new();
        };
        map.iter()
            .map(|(key, val)| {
                let mut field = OutputField::named(key);
                match val {
                    Value::Object(_) => {
                        field.field_type = Some("object".to_string());
                        field.nested = Some(self.fields_of(val));
                    }
                    Value::Array(_) => {
                        field.field_type = Some("array".to_string());
                        field.description = Some(val.to_string());
                    }
                    _ => {
                        if self.infer_types {
                            field.field_type = Some(infer_type(val).to_string());
                        }
                    }
                }
                field
            })
            .collect()
    }

    /// ENUMS from range lines, inline `field(A|B)` forms, and bullet
    /// blocks under a categorical header; imperative headers become
    /// CONSTRAINTS instead.
    fn attach_enum_attributes(&self, text: &str, attributes: &mut BTreeMap<String, String>) {
        let mut enums = Map::new();
        let mut constraints = Map::new();

        let ranges: Vec<Value> = RANGE_ENUM
            .captures_iter(text)
            .filter_map(|caps| {
                let min: f64 = caps[1].parse().ok()?;
                let max: f64 = caps[2].parse().ok()?;
                let label = caps[3].trim().to_uppercase().replace(' ', "_");
                Some(json!({"min": min, "max": max, "label": label}))
            })
            .collect();
        if !ranges.is_empty() {
            enums.insert("ranges".to_string(), Value::Array(ranges));
        }

        for caps in INLINE_ENUM.captures_iter(text) {
            let values: Vec<String> = caps[2]
                .split('|')
                .map(|v| v.trim().to_uppercase())
                .filter(|v| !v.is_empty())
                .collect();
            if values.len() >= 2 {
                enums.insert(
                    caps[1].to_lowercase(),
                    json!({"kind": "categorical", "values": values}),
                );
            }
        }

        for caps in BLOCK_ENUM.captures_iter(text) {
            let header = caps[1].trim().to_lowercase();
            let header = header.split_whitespace().collect::<Vec<_>>().join(" ");
            let items: Vec<String> = caps[2]
                .lines()
                .map(|line| line.trim().trim_start_matches(['-', '*', ' ']).to_string())
                .filter(|line| !line.is_empty())
                .collect();
            if items.len() < 2 {
                continue;
            }
            if is_imperative_header(&header) {
                constraints.insert(
                    header.replace(' ', "_"),
                    json!({"kind": "required", "items": items}),
                );
            } else if is_enum_header(&header) {
                let values: Vec<String> = items.iter().map(|i| i.to_uppercase()).collect();
                enums.insert(
                    header.replace(' ', "_"),
                    json!({"kind": "categorical", "values": values}),
                );
            }
        }

        if !enums.is_empty() {
            attributes.insert("ENUMS".to_string(), Value::Object(enums).to_string());
        }
        if !constraints.is_empty() {
            attributes.insert(
                "CONSTRAINTS".to_string(),
                Value::Object(constraints).to_string(),
            );
        }
    }

    /// SPECS from an explicit `SPECS={...}` block, else NL heuristics.
    fn extract_specs(&self, text: &str) -> Option<Value> {
        if let Some(caps) = SPECS_BLOCK.captures(text) {
            let parsed = parse_specs_block(&caps[1]);
            if !parsed.is_empty() {
                return Some(Value::Object(parsed));
            }
        }
        self.extract_specs_from_nl(text)
    }

    fn extract_specs_from_nl(&self, text: &str) -> Option<Value> {
        let mut inferred = Map::new();

        let types: Map<String, Value> = TYPE_RULE
            .captures_iter(text)
            .map(|caps| (caps[1].to_string(), json!(caps[2].to_uppercase())))
            .collect();
        if !types.is_empty() {
            inferred.insert("types".to_string(), Value::Object(types));
        }

        if let Some(caps) = CONTAINS_KEYS.captures(text) {
            let fields: Vec<String> = caps[1]
                .split(&[',', '\n'][..])
                .map(|f| f.trim().trim_matches(['.', ',', '-', ' ']).to_string())
                .filter(|f| !f.is_empty())
                .collect();
            if !fields.is_empty() {
                inferred.insert("fields".to_string(), json!(fields));
            }
        }

        let requirements: Map<String, Value> = REQUIREMENT_RULE
            .captures_iter(text)
            .map(|caps| {
                let rule = if caps[2].to_lowercase().contains("optional") {
                    "OPTIONAL"
                } else {
                    "REQUIRED"
                };
                (caps[1].to_string(), json!(rule))
            })
            .collect();
        if !requirements.is_empty() {
            inferred.insert("requirements".to_string(), Value::Object(requirements));
        }

        (!inferred.is_empty()).then(|| Value::Object(inferred))
    }
}

fn infer_type(value: &Value) -> &'static str {
    match value {
        Value::Bool(_) => "BOOL",
        Value::Number(n) if n.is_i64() || n.is_u64() => "INT",
        Value::Number(_) => "FLOAT",
        Value::String(_) => "STR",
        _ => "ANY",
    }
}

/// Unify arrows, dashes, smart quotes, bullets, and line endings.
pub fn normalize_text(text: &str) -> String {
    let mut text = text
        .replace('→', "->")
        .replace(['–', '—'], "-")
        .replace(['“', '”'], "\"")
        .replace(['’', '‘'], "'")
        .replace("\r\n", "\n")
        .replace('\r', "\n");

    static BULLET: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?m)^(\s*)(?:[-*•]|\d+\.|\(\w\))\s+").expect("static pattern"));
    text = BULLET.replace_all(&text, "$1- ").to_string();

    static BLANKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("static pattern"));
    BLANKS.replace_all(&text, "\n\n").trim().to_string()
}

/// A fenced or bare JSON block, if it parses.
fn find_json_block(text: &str) -> Option<Value> {
    let candidate = JSON_FENCE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .or_else(|| BARE_JSON.captures(text).and_then(|caps| caps.get(1)))?;
    serde_json::from_str(candidate.as_str()).ok()
}

fn detect_format(text: &str) -> OutputFormatType {
    let lower = text.to_lowercase();
    for phrase in [
        "list of dictionaries", "list of dicts", "list of objects", "list where each",
        "each item",
    ] {
        if lower.contains(phrase) {
            return OutputFormatType::List;
        }
    }
    if lower.contains("json") || lower.contains('{') {
        return OutputFormatType::Json;
    }
    if lower.contains("dictionary") || lower.contains("dict") || lower.contains("object") {
        return OutputFormatType::Json;
    }
    if lower.contains("yaml") || lower.contains("yml") {
        return OutputFormatType::Yaml;
    }
    static LIST_HINTS: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"\bkeys?\b|\bfields?\b|\bcontains\b|\bshould include\b").expect("static pattern")
    });
    if LIST_HINTS.is_match(&lower) {
        return OutputFormatType::List;
    }
    OutputFormatType::Structured
}

#[derive(Debug, Clone)]
struct Entry {
    key: String,
    desc: Option<String>,
    children: Vec<String>,
}

static GRAMMAR_QUOTED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"["']([\w\- ]{1,80})["']\s*[:\-]\s*(.+)"#).expect("static pattern")
});
static GRAMMAR_ARROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([\w\- ]{1,80})\s*->\s*(.+)").expect("static pattern"));
static GRAMMAR_COLON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([\w\- ]{1,80})\s*:\s*(.+)").expect("static pattern"));
static GRAMMAR_PAREN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([\w\- ]{1,80})\s*\(([^)]+)\)").expect("static pattern"));
static GRAMMAR_SINGLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^["']?([\w\-]{1,60})["']?$"#).expect("static pattern"));
static GRAMMAR_HYPHEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([\w\- ]{1,80})\s+-\s+(.+)").expect("static pattern"));
static PARENT_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([\w\-]{1,60}):\s*$").expect("static pattern"));

fn normalize_key(key: &str) -> String {
    key.trim()
        .trim_matches(['"', '\''])
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// Parse candidate lines into entries, expanding "fields are: a, b, c"
/// enumerations and attaching indented children to `parent:` headers.
fn parse_entries(text: &str) -> Vec<Entry> {
    let mut entries: Vec<Entry> = Vec::new();
    let mut parent: Option<(usize, usize)> = None; // (entry index, indent)

    let mut push = |entries: &mut Vec<Entry>, key: String, desc: Option<String>| {
        if !key.is_empty() && !entries.iter().any(|e| e.key == key) {
            entries.push(Entry {
                key,
                desc,
                children: Vec::new(),
            });
            return true;
        }
        false
    };

    for raw in text.lines() {
        if raw.trim().is_empty() {
            continue;
        }
        let indent = raw.len() - raw.trim_start().len();
        let line = raw.trim().trim_start_matches("- ").trim();

        // Enumerations expand into one entry per listed name
        if let Some(caps) = FIELD_ENUMERATION.captures(line) {
            for part in split_respecting_quotes(&caps[1]) {
                let part = part.trim().trim_matches(['"', '\'']);
                if !part.is_empty() && !part.contains(' ') {
                    push(&mut entries, normalize_key(part), None);
                }
            }
            parent = None;
            continue;
        }

        // `parent:` header opens a nested block
        if let Some(caps) = PARENT_LINE.captures(line) {
            let key = normalize_key(&caps[1]);
            if push(&mut entries, key, None) {
                parent = Some((entries.len() - 1, indent));
            }
            continue;
        }

        // A child of the open header folds into it instead of the top level
        if let Some((parent_idx, parent_indent)) = parent {
            if indent > parent_indent {
                if let Some((key, _)) = match_grammar(line) {
                    entries[parent_idx].children.push(key);
                }
                continue;
            }
            parent = None;
        }

        if let Some((key, desc)) = match_grammar(line) {
            push(&mut entries, key, desc);
        }
    }

    entries
}

/// Priority list of field grammars.
fn match_grammar(line: &str) -> Option<(String, Option<String>)> {
    let clean_desc =
        |desc: &str| -> Option<String> {
            let d = desc.trim().trim_matches(['"', '\'']).trim_end_matches(['.', ';']);
            (!d.is_empty()).then(|| d.to_string())
        };

    if let Some(caps) = GRAMMAR_QUOTED.captures(line) {
        return Some((normalize_key(&caps[1]), clean_desc(&caps[2])));
    }
    if let Some(caps) = GRAMMAR_ARROW.captures(line) {
        return Some((normalize_key(&caps[1]), clean_desc(&caps[2])));
    }
    if let Some(caps) = GRAMMAR_COLON.captures(line) {
        return Some((normalize_key(&caps[1]), clean_desc(&caps[2])));
    }
    if let Some(caps) = GRAMMAR_PAREN.captures(line) {
        return Some((normalize_key(&caps[1]), clean_desc(&caps[2])));
    }
    if let Some(caps) = GRAMMAR_SINGLE.captures(line) {
        return Some((normalize_key(&caps[1]), None));
    }
    if let Some(caps) = GRAMMAR_HYPHEN.captures(line) {
        return Some((normalize_key(&caps[1]), clean_desc(&caps[2])));
    }
    None
}

fn split_respecting_quotes(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for c in text.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            ',' if !in_quotes => {
                parts.push(current.clone());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

fn detect_nested(text: &str, entries: &[Entry]) -> bool {
    let lower = text.to_lowercase();
    if lower.contains("nested")
        || lower.contains("hierarch")
        || lower.contains("each item contains")
        || lower.contains("each object contains")
    {
        return true;
    }
    entries.iter().any(|e| !e.children.is_empty())
}

/// `{a,b:{c,d},e}` from the parsed entry tree.
fn encode_entries(entries: &[Entry]) -> String {
    let parts: Vec<String> = entries
        .iter()
        .map(|e| {
            if e.children.is_empty() {
                e.key.clone()
            } else {
                format!("{}:{{{}}}", e.key, e.children.join(","))
            }
        })
        .collect();
    format!("{{{}}}", parts.join(","))
}

fn is_imperative_header(header: &str) -> bool {
    if ["should", "must", "required"].iter().any(|w| header.contains(w)) {
        return true;
    }
    NON_ENUM_HEADERS.iter().any(|w| header.starts_with(w))
}

fn is_enum_header(header: &str) -> bool {
    ENUM_HINT_HEADERS.iter().any(|w| header.contains(w))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer(infer_types: bool, add_attrs: bool) -> OutputFormatAnalyzer {
        OutputFormatAnalyzer {
            infer_types,
            add_attrs,
        }
    }

    #[test]
    fn structured_without_types_keeps_nesting_only() {
        let value = json!({
            "summary": "short text",
            "qa_scores": {"verification": 0.9, "policy_adherence": 0.7},
            "violations": ["late disclosure"]
        });
        let schema = analyzer(false, false).analyze_value(&value, "");
        assert_eq!(
            schema.schema,
            "{summary,qa_scores:{verification,policy_adherence},violations}"
        );
    }

    #[test]
    fn structured_with_types_labels_leaves() {
        let value = json!({
            "summary": "text",
            "qa_scores": {"verification": 0.9},
            "violations": ["x"],
            "count": 3,
            "ok": true
        });
        let schema = analyzer(true, false).analyze_value(&value, "");
        assert_eq!(
            schema.schema,
            "{summary:STR,qa_scores:{verification:FLOAT},violations:[STR],count:INT,ok:BOOL}"
        );
    }

    #[test]
    fn empty_arrays_encode_as_brackets() {
        let value = json!({"tags": []});
        let schema = analyzer(true, false).analyze_value(&value, "");
        assert_eq!(schema.schema, "{tags:[]}");
    }

    #[test]
    fn nl_bullets_with_nesting() {
        let text = "Return JSON with:\n- summary: one paragraph\n- qa_scores:\n  - verification\n  - policy_adherence\n- violations\n- recommendations";
        let schema = analyzer(false, true).analyze_text(text).unwrap();
        assert_eq!(
            schema.schema,
            "{summary,qa_scores:{verification,policy_adherence},violations,recommendations}"
        );
        assert_eq!(
            schema.attributes.get("KEYS").unwrap(),
            "summary+qa_scores+violations+recommendations"
        );
        assert_eq!(schema.attributes.get("NESTED").unwrap(), "true");
    }

    #[test]
    fn range_lines_become_enum_ranges() {
        let text = "Score each call.\n0.00-0.49: Fail\n0.50-0.74: Needs Improvement\nfields are: score, label";
        let schema = analyzer(false, true).analyze_text(text).unwrap();
        let enums = schema.attributes.get("ENUMS").unwrap();
        assert!(enums.contains("\"ranges\""));
        assert!(enums.contains("NEEDS_IMPROVEMENT"));
    }

    #[test]
    fn explicit_json_block_takes_the_structured_path() {
        let text = "Respond exactly as ```json\n{\"answer\": \"text\", \"confidence\": 0.5}\n```";
        let schema = analyzer(false, false).analyze_text(text).unwrap();
        assert_eq!(schema.schema, "{answer,confidence}");
        assert_eq!(schema.format_type, OutputFormatType::Json);
    }

    #[test]
    fn malformed_json_degrades_to_nl_parsing() {
        let text = "Return {\"answer\": oops,} with fields are: answer, confidence";
        let schema = analyzer(false, false).analyze_text(text).unwrap();
        assert!(schema.schema.contains("answer"));
    }

    #[test]
    fn inline_enum_values() {
        let text = "fields are: status, note\nstatus (OPEN|CLOSED|PENDING)";
        let schema = analyzer(false, true).analyze_text(text).unwrap();
        let enums = schema.attributes.get("ENUMS").unwrap();
        assert!(enums.contains("OPEN"));
        assert!(enums.contains("categorical"));
    }

    #[test]
    fn specs_from_nl_type_rules() {
        let text = "fields are: score, label\nscore is a float and label required";
        let schema = analyzer(false, true).analyze_text(text).unwrap();
        let specs = schema.attributes.get("SPECS").unwrap();
        assert!(specs.contains("FLOAT"));
        assert!(specs.contains("REQUIRED"));
    }

    #[test]
    fn out_token_shape() {
        let text = "Return JSON with:\n- a: first\n- b: second";
        let schema = analyzer(false, false).analyze_text(text).unwrap();
        assert_eq!(schema.build_token(), "[OUT_JSON:{a,b}:KEYS=a+b]");
    }
}
