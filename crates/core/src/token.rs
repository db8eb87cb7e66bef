//! Token IR: the intermediate structures assembled into the compressed stream

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Canonical request actions (REQ tokens). Closed set; the intent detector
/// always resolves to exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Req {
    Analyze,
    Extract,
    Generate,
    Predict,
    Validate,
    Transform,
    Format,
    Rank,
    Debug,
    Search,
    Execute,
    Summarize,
    Classify,
    Compare,
    Optimize,
    Explain,
}

impl Req {
    pub const ALL: [Req; 16] = [
        Req::Analyze,
        Req::Extract,
        Req::Generate,
        Req::Predict,
        Req::Validate,
        Req::Transform,
        Req::Format,
        Req::Rank,
        Req::Debug,
        Req::Search,
        Req::Execute,
        Req::Summarize,
        Req::Classify,
        Req::Compare,
        Req::Optimize,
        Req::Explain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Req::Analyze => "ANALYZE",
            Req::Extract => "EXTRACT",
            Req::Generate => "GENERATE",
            Req::Predict => "PREDICT",
            Req::Validate => "VALIDATE",
            Req::Transform => "TRANSFORM",
            Req::Format => "FORMAT",
            Req::Rank => "RANK",
            Req::Debug => "DEBUG",
            Req::Search => "SEARCH",
            Req::Execute => "EXECUTE",
            Req::Summarize => "SUMMARIZE",
            Req::Classify => "CLASSIFY",
            Req::Compare => "COMPARE",
            Req::Optimize => "OPTIMIZE",
            Req::Explain => "EXPLAIN",
        }
    }

    /// Map a vocabulary family name to a canonical action, when one exists.
    /// Vocabulary families like LIST or CALCULATE drive target dispatch but
    /// have no REQ of their own.
    pub fn from_family(name: &str) -> Option<Req> {
        Req::ALL.iter().copied().find(|r| r.as_str() == name)
    }
}

impl std::fmt::Display for Req {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub token: Req,
    pub confidence: f64,
    pub trigger_word: String,
    pub modifier: Option<String>,
    #[serde(default)]
    pub unmatched_verbs: Vec<String>,
}

impl Intent {
    pub fn new(token: Req, confidence: f64, trigger_word: impl Into<String>) -> Self {
        Self {
            token,
            confidence,
            trigger_word: trigger_word.into(),
            modifier: None,
            unmatched_verbs: Vec::new(),
        }
    }
}

/// Domains implied by a target token when no explicit domain is printed.
pub fn default_domain(token: &str) -> Option<&'static str> {
    match token {
        "CALL" | "TICKET" => Some("SUPPORT"),
        _ => None,
    }
}

/// The object the requested action operates on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Target {
    pub token: String,
    pub domain: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl Target {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            domain: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_attributes(mut self, attributes: BTreeMap<String, String>) -> Self {
        self.attributes = attributes;
        self
    }

    /// `[TARGET:<TOKEN>[:DOMAIN=...][:K=V...]]` with attribute keys in
    /// sorted order. DOMAIN is omitted when it equals the token's default
    /// domain mapping.
    pub fn build_token(&self) -> String {
        let token = self.token.to_uppercase();
        let mut parts = vec![format!("TARGET:{token}")];

        if let Some(domain) = self.domain.as_deref() {
            let domain = domain.to_uppercase();
            if default_domain(&token) != Some(domain.as_str()) {
                parts.push(format!("DOMAIN={domain}"));
            }
        }

        for (k, v) in &self.attributes {
            parts.push(format!("{k}={v}"));
        }

        format!("[{}]", parts.join(":"))
    }
}

/// Fields the prompt asks to pull out of its input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ExtractionField {
    pub fields: Vec<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl ExtractionField {
    /// `[EXTRACT:F1+F2...]`, attribute pairs appended as `:K=V`.
    pub fn build_token(&self) -> Option<String> {
        if self.fields.is_empty() {
            return None;
        }
        let mut out = format!("[EXTRACT:{}", self.fields.join("+"));
        for (k, v) in &self.attributes {
            out.push_str(&format!(":{k}={v}"));
        }
        out.push(']');
        Some(out)
    }
}

/// Stylistic constraint aspects (CTX tokens).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Aspect {
    Audience,
    Length,
    Style,
    Tone,
    Language,
    Region,
    Priority,
    Sla,
    Format,
}

impl Aspect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Aspect::Audience => "AUDIENCE",
            Aspect::Length => "LENGTH",
            Aspect::Style => "STYLE",
            Aspect::Tone => "TONE",
            Aspect::Language => "LANGUAGE",
            Aspect::Region => "REGION",
            Aspect::Priority => "PRIORITY",
            Aspect::Sla => "SLA",
            Aspect::Format => "FORMAT",
        }
    }
}

/// A single stylistic constraint, e.g. AUDIENCE=BEGINNER.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub aspect: Aspect,
    pub value: String,
}

impl Context {
    pub fn new(aspect: Aspect, value: impl Into<String>) -> Self {
        Self {
            aspect,
            value: value.into(),
        }
    }

    pub fn build_token(&self) -> String {
        format!("[CTX:{}={}]", self.aspect.as_str(), self.value)
    }
}

/// Expected output shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormatType {
    Json,
    List,
    Structured,
    Yaml,
}

impl OutputFormatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormatType::Json => "JSON",
            OutputFormatType::List => "LIST",
            OutputFormatType::Structured => "STRUCTURED",
            OutputFormatType::Yaml => "YAML",
        }
    }
}

/// One field of the expected output schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputField {
    pub name: String,
    pub field_type: Option<String>,
    pub description: Option<String>,
    pub required: bool,
    pub nested: Option<Vec<OutputField>>,
}

impl OutputField {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: None,
            description: None,
            required: true,
            nested: None,
        }
    }
}

/// Output schema extracted from a structured value or free prose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSchema {
    pub format_type: OutputFormatType,
    pub fields: Vec<OutputField>,
    /// Compact schema string, e.g. `{summary,qa_scores:{verification}}`.
    pub schema: String,
    pub attributes: BTreeMap<String, String>,
    pub raw_schema: Option<String>,
    pub format_hint: Option<OutputFormatType>,
}

impl OutputSchema {
    /// `[OUT_<FMT>:<schema>:K=V...]` with attributes ordered
    /// KEYS, ENUMS, SPECS, then the rest sorted.
    pub fn build_token(&self) -> String {
        let fmt = self.format_hint.unwrap_or(self.format_type);
        let mut parts = vec![format!("OUT_{}", fmt.as_str()), self.schema.clone()];

        let mut ordered: Vec<&str> = Vec::new();
        for key in ["KEYS", "ENUMS", "SPECS"] {
            if self.attributes.contains_key(key) {
                ordered.push(key);
            }
        }
        for key in self.attributes.keys() {
            if !matches!(key.as_str(), "KEYS" | "ENUMS" | "SPECS") {
                ordered.push(key);
            }
        }

        for key in ordered {
            parts.push(format!("{key}={}", self.attributes[key]));
        }

        format!("[{}]", parts.join(":"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn req_family_roundtrip() {
        assert_eq!(Req::from_family("ANALYZE"), Some(Req::Analyze));
        assert_eq!(Req::from_family("LIST"), None);
    }

    #[test]
    fn target_token_sorts_attributes() {
        let mut t = Target::new("CODE");
        t.attributes.insert("LANG".into(), "PYTHON".into());
        t.attributes.insert("FILE_TYPE".into(), "PY".into());
        assert_eq!(t.build_token(), "[TARGET:CODE:FILE_TYPE=PY:LANG=PYTHON]");
    }

    #[test]
    fn target_token_omits_default_domain() {
        let t = Target::new("CALL").with_domain("SUPPORT");
        assert_eq!(t.build_token(), "[TARGET:CALL]");

        let t = Target::new("CALL").with_domain("SALES");
        assert_eq!(t.build_token(), "[TARGET:CALL:DOMAIN=SALES]");
    }

    #[test]
    fn extraction_token_joins_with_plus() {
        let f = ExtractionField {
            fields: vec!["NAMES".into(), "DATES".into()],
            attributes: BTreeMap::new(),
        };
        assert_eq!(f.build_token().unwrap(), "[EXTRACT:NAMES+DATES]");
    }

    #[test]
    fn empty_extraction_builds_nothing() {
        assert_eq!(ExtractionField::default().build_token(), None);
    }

    #[test]
    fn out_token_orders_known_attributes_first() {
        let mut attributes = BTreeMap::new();
        attributes.insert("SPECS".to_string(), "{}".to_string());
        attributes.insert("KEYS".to_string(), "a+b".to_string());
        attributes.insert("NESTED".to_string(), "true".to_string());
        let schema = OutputSchema {
            format_type: OutputFormatType::Json,
            fields: vec![],
            schema: "{a,b}".to_string(),
            attributes,
            raw_schema: None,
            format_hint: None,
        };
        assert_eq!(
            schema.build_token(),
            "[OUT_JSON:{a,b}:KEYS=a+b:SPECS={}:NESTED=true]"
        );
    }
}
