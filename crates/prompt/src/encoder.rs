//! System-prompt encoder

use std::sync::Arc;

use clm_core::{ClmOutput, Metadata, NlpProvider, OriginalInput};
use clm_language::LanguagePack;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::attributes::AttributeParser;
use crate::context::ContextParser;
use crate::intent::IntentDetector;
use crate::output_format::OutputFormatAnalyzer;
use crate::target::TargetExtractor;
use crate::tokenizer::Tokenizer;

pub const COMPONENT: &str = "SYSTEM_PROMPT";

static HAS_NUMBERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").expect("static pattern"));
static HAS_URLS: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://").expect("static pattern"));

/// Prompt-encoder options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SysPromptConfig {
    /// Infer output field types in schema strings.
    #[serde(default)]
    pub infer_types: bool,
    /// Attach ENUMS/CONSTRAINTS/SPECS attributes to the OUT token.
    #[serde(default = "default_true")]
    pub add_attrs: bool,
    /// Carry examples extracted from the input (reserved).
    #[serde(default)]
    pub add_examples: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SysPromptConfig {
    fn default() -> Self {
        Self {
            infer_types: false,
            add_attrs: true,
            add_examples: false,
        }
    }
}

pub struct SysPromptEncoder {
    nlp: Arc<dyn NlpProvider>,
    pack: Arc<LanguagePack>,
    config: SysPromptConfig,
}

impl SysPromptEncoder {
    pub fn new(nlp: Arc<dyn NlpProvider>, pack: Arc<LanguagePack>, config: SysPromptConfig) -> Self {
        Self { nlp, pack, config }
    }

    /// Compress one prompt into the canonical token sequence.
    pub fn compress(&self, prompt: &str) -> ClmOutput {
        let doc = self.nlp.analyze(prompt);

        let intent_detector = IntentDetector::new(&self.pack);
        let intents = intent_detector.detect(prompt, &doc);
        let primary_req = intents[0].token;
        let specs = intent_detector.detect_specs(prompt, primary_req);

        let target_extractor = TargetExtractor::new(&self.pack);
        let target = target_extractor.extract(prompt, Some(primary_req), &doc);

        let attribute_parser = AttributeParser::new(&self.pack);
        let extractions = attribute_parser.parse_extraction_fields(prompt);
        let quantifier = attribute_parser.extract_quantifier(prompt, &doc);
        let specifications = attribute_parser.extract_specifications(prompt, &doc);

        let contexts = ContextParser::new(&self.pack).parse(prompt);

        let format_analyzer = OutputFormatAnalyzer {
            infer_types: self.config.infer_types,
            add_attrs: self.config.add_attrs,
        };
        let output_format = format_analyzer.analyze_text(prompt);

        let compressed = Tokenizer::build_sequence(
            &intents,
            &target,
            extractions.as_ref(),
            &contexts,
            output_format.as_ref(),
        );
        tracing::debug!(
            req = intents[0].token.as_str(),
            target_token = %target.token,
            "compressed prompt"
        );

        let verbs: Vec<String> = doc.verb_lemmas();
        let noun_chunks = doc.noun_chunk_texts();
        let lower = prompt.to_lowercase();
        let has_code_indicators = self
            .pack
            .vocabulary
            .code_indicators
            .iter()
            .any(|ind| lower.contains(ind));

        let mut metadata = Metadata::new();
        metadata.insert("original_length".into(), json!(prompt.len()));
        metadata.insert("compressed_length".into(), json!(compressed.len()));
        metadata.insert("num_intents".into(), json!(intents.len()));
        metadata.insert("num_targets".into(), json!(1));
        metadata.insert(
            "input_tokens".into(),
            json!(prompt.split_whitespace().count()),
        );
        metadata.insert(
            "output_tokens".into(),
            json!(compressed.split_whitespace().count()),
        );
        metadata.insert("verbs".into(), json!(verbs));
        metadata.insert("noun_chunks".into(), json!(noun_chunks));
        metadata.insert("language".into(), json!(self.pack.lang.code()));
        metadata.insert("has_numbers".into(), json!(HAS_NUMBERS.is_match(prompt)));
        metadata.insert("has_urls".into(), json!(HAS_URLS.is_match(prompt)));
        metadata.insert("has_code_indicators".into(), json!(has_code_indicators));
        metadata.insert(
            "unmatched_verbs".into(),
            json!(intents[0].unmatched_verbs.clone()),
        );
        metadata.insert("intents".into(), json!(intents));
        metadata.insert("target".into(), json!(target));
        metadata.insert("extractions".into(), json!(extractions));
        metadata.insert("contexts".into(), json!(contexts));
        metadata.insert("output_format".into(), json!(output_format));
        metadata.insert("specs".into(), json!(specs));
        metadata.insert("quantifier".into(), json!(quantifier));
        metadata.insert("specifications".into(), json!(specifications));

        ClmOutput::new(OriginalInput::from(prompt), COMPONENT, compressed, metadata)
    }

    /// Compress a batch of prompts in order.
    pub fn compress_batch(&self, prompts: &[&str]) -> Vec<ClmOutput> {
        prompts.iter().map(|p| self.compress(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clm_language::Lang;
    use clm_nlp::LexiconNlp;

    fn encoder() -> SysPromptEncoder {
        SysPromptEncoder::new(
            Arc::new(LexiconNlp::new()),
            Arc::new(LanguagePack::load(Lang::En).unwrap()),
            SysPromptConfig::default(),
        )
    }

    #[test]
    fn analyze_code_scenario() {
        let out = encoder().compress("Analyze this Python code for security issues");
        assert!(out.compressed.contains("[REQ:ANALYZE]"));
        assert!(out.compressed.contains("[TARGET:CODE:LANG=PYTHON]"));
    }

    #[test]
    fn summarize_transcript_scenario() {
        let out = encoder().compress("Summarize this 30-minute customer call transcript");
        assert!(out.compressed.contains("[REQ:SUMMARIZE]"));
        assert!(out.compressed.contains("[TARGET:TRANSCRIPT:DURATION=30]"));
    }

    #[test]
    fn metadata_carries_required_keys() {
        let out = encoder().compress("Summarize this document briefly");
        for key in [
            "original_length",
            "compressed_length",
            "language",
            "has_numbers",
            "has_urls",
            "num_intents",
            "num_targets",
            "verbs",
            "noun_chunks",
            "has_code_indicators",
            "unmatched_verbs",
            "intents",
            "target",
            "extractions",
            "contexts",
            "output_format",
        ] {
            assert!(out.metadata.contains_key(key), "missing {key}");
        }
    }

    #[test]
    fn token_heads_follow_the_canonical_order() {
        let out = encoder()
            .compress("Summarize this customer call transcript in a brief professional tone");
        let heads: Vec<&str> = out
            .compressed
            .split(' ')
            .filter_map(|t| t.strip_prefix('['))
            .map(|t| t.split([':', ']']).next().unwrap())
            .collect();
        let order = ["REQ", "TARGET", "EXTRACT", "CTX", "OUT"];
        let mut last = 0;
        for head in heads {
            let position = order
                .iter()
                .position(|o| head.starts_with(o))
                .expect("unknown token head");
            assert!(position >= last);
            last = position;
        }
    }

    #[test]
    fn batch_compression_preserves_order() {
        let outs = encoder().compress_batch(&[
            "Summarize this customer call transcript for me please",
            "Debug this Python function, it keeps crashing on startup",
        ]);
        assert_eq!(outs.len(), 2);
        assert!(outs[0].compressed.contains("SUMMARIZE"));
        assert!(outs[1].compressed.contains("DEBUG"));
    }
}
