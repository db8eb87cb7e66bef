//! Target extraction: ordered strategies, then normalization to one target

pub mod attributes;
pub mod extractors;
pub mod normalizer;

use clm_core::{Doc, Req, Target};
use clm_language::LanguagePack;

use attributes::AttributeEnhancer;
use normalizer::TargetNormalizer;

pub struct TargetExtractor<'a> {
    pack: &'a LanguagePack,
    enhancer: AttributeEnhancer<'a>,
    normalizer: TargetNormalizer,
}

impl<'a> TargetExtractor<'a> {
    pub fn new(pack: &'a LanguagePack) -> Self {
        Self {
            pack,
            enhancer: AttributeEnhancer::new(pack),
            normalizer: TargetNormalizer,
        }
    }

    /// Run the pipeline:
    /// 1. imperative (short-circuits)
    /// 2. question (short-circuits)
    /// 3. noun + compound + pattern (collect)
    /// 4. fallback when nothing collected
    /// then normalize to a single target.
    pub fn extract(&self, text: &str, req: Option<Req>, doc: &Doc) -> Target {
        let imperative = extractors::ImperativeExtractor {
            pack: self.pack,
            enhancer: &self.enhancer,
        };
        if let Some(target) = imperative.extract(text, doc) {
            return self.normalize_one(target);
        }

        let question = extractors::QuestionExtractor {
            pack: self.pack,
            enhancer: &self.enhancer,
        };
        if let Some(target) = question.extract(text, doc) {
            return self.normalize_one(target);
        }

        let mut candidates = Vec::new();
        candidates.extend(
            extractors::NounExtractor {
                pack: self.pack,
                enhancer: &self.enhancer,
            }
            .extract(text, doc),
        );
        candidates.extend(
            extractors::CompoundExtractor {
                pack: self.pack,
                enhancer: &self.enhancer,
            }
            .extract(text, doc),
        );
        candidates.extend(
            extractors::PatternExtractor {
                pack: self.pack,
                enhancer: &self.enhancer,
            }
            .extract(text, doc),
        );

        if candidates.is_empty() {
            let fallback = extractors::FallbackExtractor {
                pack: self.pack,
                enhancer: &self.enhancer,
            };
            candidates.push(fallback.extract(text, req, doc));
        }

        self.normalizer
            .normalize_many(candidates)
            .unwrap_or_else(|| Target::new("ANSWER"))
    }

    fn normalize_one(&self, target: Target) -> Target {
        self.normalizer
            .normalize_many(vec![target])
            .unwrap_or_else(|| Target::new("ANSWER"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clm_core::NlpProvider;
    use clm_language::Lang;
    use clm_nlp::LexiconNlp;

    fn extract(text: &str) -> Target {
        let pack = LanguagePack::load(Lang::En).unwrap();
        let doc = LexiconNlp::new().analyze(text);
        TargetExtractor::new(&pack).extract(text, None, &doc)
    }

    fn extract_with(text: &str, req: Req) -> Target {
        let pack = LanguagePack::load(Lang::En).unwrap();
        let doc = LexiconNlp::new().analyze(text);
        TargetExtractor::new(&pack).extract(text, Some(req), &doc)
    }

    #[test]
    fn analyze_code_imperative() {
        let target = extract("Analyze this Python code for security issues");
        assert_eq!(target.token, "CODE");
        assert_eq!(target.attributes.get("LANG").unwrap(), "PYTHON");
        assert_eq!(target.build_token(), "[TARGET:CODE:LANG=PYTHON]");
    }

    #[test]
    fn summarize_transcript_with_duration() {
        let target = extract("Summarize this 30-minute customer call transcript");
        assert_eq!(target.token, "TRANSCRIPT");
        assert_eq!(target.build_token(), "[TARGET:TRANSCRIPT:DURATION=30]");
    }

    #[test]
    fn extract_data_imperative() {
        let target = extract("Extract the data from the file");
        assert_eq!(target.token, "DATA");
    }

    #[test]
    fn debug_function_is_code() {
        let target = extract("Debug this function");
        assert_eq!(target.token, "CODE");
    }

    #[test]
    fn optimize_sql_is_query() {
        let target = extract("Optimize this SQL query for performance");
        assert_eq!(target.token, "QUERY");
    }

    #[test]
    fn classify_support_ticket() {
        let target = extract("Classify this support ticket by urgency");
        assert_eq!(target.token, "TICKET");
    }

    #[test]
    fn question_becomes_concept() {
        let target = extract("What is object-oriented programming?");
        assert_eq!(target.token, "CONCEPT");
        assert_eq!(
            target.attributes.get("TOPIC").unwrap(),
            "OBJECT-ORIENTED_PROGRAMMING"
        );
    }

    #[test]
    fn noun_matches_collect_and_normalize() {
        let target = extract("I need help with my support ticket about billing");
        assert_eq!(target.token, "TICKET");
    }

    #[test]
    fn fallback_generate_without_list_words_is_content() {
        let target = extract_with("make something nice", Req::Generate);
        assert_eq!(target.token, "CONTENT");
    }

    #[test]
    fn fallback_explain_is_concept() {
        let target = extract_with("hmm interesting", Req::Explain);
        assert_eq!(target.token, "CONCEPT");
    }

    #[test]
    fn fallback_default_is_answer() {
        let target = extract("gibberish babble");
        assert_eq!(target.token, "ANSWER");
    }
}
