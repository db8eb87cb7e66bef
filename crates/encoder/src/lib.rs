//! CLM compressor facade
//!
//! `ClmEncoder` classifies an input and routes it to the prompt,
//! transcript, or structured-data encoder. Construction loads the
//! language pack and the NLP provider once; encoding is synchronous and
//! stateless between calls.
//!
//! # Example
//!
//! ```
//! use clm_encoder::{ClmConfig, ClmEncoder};
//!
//! let encoder = ClmEncoder::new(ClmConfig::default()).unwrap();
//! let out = encoder
//!     .encode_text("Analyze this Python code for security issues")
//!     .unwrap();
//! assert!(out.compressed.contains("[REQ:ANALYZE]"));
//! ```

use std::sync::Arc;

use clm_core::{classify, ClmOutput, InputKind, Metadata, NlpProvider, OriginalInput, Result};
use clm_language::{Lang, LanguagePack};
use clm_nlp::LexiconNlp;
use clm_prompt::{SysPromptConfig, SysPromptEncoder};
use clm_structured::{SdCompressionConfig, SdEncoder};
use clm_transcript::TranscriptEncoder;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClmConfig {
    #[serde(default)]
    pub lang: Lang,
    #[serde(default)]
    pub ds: SdCompressionConfig,
    #[serde(default)]
    pub sys_prompt: SysPromptConfig,
}

pub struct ClmEncoder {
    lang: Lang,
    sys_prompt: SysPromptEncoder,
    transcript: TranscriptEncoder,
    structured: SdEncoder,
}

impl ClmEncoder {
    /// Build an encoder with the default rule-based NLP provider.
    pub fn new(config: ClmConfig) -> Result<Self> {
        Self::with_nlp(config, Arc::new(LexiconNlp::new()))
    }

    /// Build an encoder around a caller-supplied NLP provider.
    pub fn with_nlp(config: ClmConfig, nlp: Arc<dyn NlpProvider>) -> Result<Self> {
        let pack = Arc::new(LanguagePack::load(config.lang)?);
        Ok(Self {
            lang: config.lang,
            sys_prompt: SysPromptEncoder::new(nlp.clone(), pack.clone(), config.sys_prompt),
            transcript: TranscriptEncoder::new(nlp, pack),
            structured: SdEncoder::new(config.ds),
        })
    }

    /// Encode any input. Unroutable inputs produce `None`.
    pub fn encode(&self, input: &OriginalInput, metadata: Option<Metadata>) -> Option<ClmOutput> {
        let metadata = metadata.unwrap_or_default();

        match classify(input) {
            InputKind::Unknown => {
                warn!("Unknown Data Type. Can't compress");
                None
            }
            InputKind::StructuredData => {
                let OriginalInput::Value(value) = input else {
                    return None;
                };
                let mut out = self.structured.encode(value);
                out.metadata
                    .insert("language".to_string(), serde_json::json!(self.lang.code()));
                Some(out)
            }
            InputKind::Transcript => {
                Some(self.transcript.encode(&input.serialized(), &metadata))
            }
            InputKind::Prompt => Some(self.sys_prompt.compress(&input.serialized())),
        }
    }

    /// Convenience wrapper for text inputs.
    pub fn encode_text(&self, text: &str) -> Option<ClmOutput> {
        self.encode(&OriginalInput::from(text), None)
    }

    /// Convenience wrapper for structured inputs.
    pub fn encode_value(&self, value: &Value) -> Option<ClmOutput> {
        self.encode(&OriginalInput::from(value.clone()), None)
    }
}

pub use clm_core::{ClmError, Req};
pub use clm_language::Lang as Language;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_language_fails_construction() {
        let config = ClmConfig {
            lang: Lang::Fr,
            ..Default::default()
        };
        assert!(ClmEncoder::new(config).is_err());
    }

    #[test]
    fn unknown_input_returns_none() {
        let encoder = ClmEncoder::new(ClmConfig::default()).unwrap();
        assert!(encoder.encode_text("   ").is_none());
        assert!(encoder.encode_value(&serde_json::json!(42)).is_none());
    }

    #[test]
    fn routing_by_shape() {
        let encoder = ClmEncoder::new(ClmConfig::default()).unwrap();

        let prompt = encoder.encode_text("Summarize this document").unwrap();
        assert_eq!(prompt.component, "SYSTEM_PROMPT");

        let transcript = encoder
            .encode_text("Agent: hello\nCustomer: my internet is down")
            .unwrap();
        assert_eq!(transcript.component, "TRANSCRIPT");

        let structured = encoder
            .encode_value(&serde_json::json!([{"id": "1", "name": "A"}]))
            .unwrap();
        assert_eq!(structured.component, "ds_compression");
    }
}
