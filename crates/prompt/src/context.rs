//! CTX parsing: stylistic constraints from the prompt text

use clm_core::{Aspect, Context};
use clm_language::LanguagePack;

/// Keywords signalling a stylistic request. A prompt that never signals
/// style intent yields no CTX at all.
const CTX_INTENT_KEYWORDS: &[&str] = &[
    "write", "give", "provide", "explain", "describe", "summarize", "make it", "in a", "as a",
    "keep it", "brief", "short", "long", "detailed", "simple", "concise",
];

/// Schema-definition markers suppress CTX: output formats are not style.
const SCHEMA_MARKERS: &[&str] = &[
    "output format", "{", "}", "criteria", "scoring", "qa_", "compliance", "policy adherence",
];

const LEADING_ROLE_WORDS: &[&str] = &["manager", "developer", "engineer", "analyst"];

pub struct ContextParser<'a> {
    pack: &'a LanguagePack,
}

impl<'a> ContextParser<'a> {
    pub fn new(pack: &'a LanguagePack) -> Self {
        Self { pack }
    }

    pub fn parse(&self, text: &str) -> Vec<Context> {
        let lower = text.trim().to_lowercase();
        if !self.has_ctx_intent(&lower) {
            return Vec::new();
        }

        let mut contexts: Vec<Context> = Vec::new();
        let mut matched_length = false;
        let mut matched_audience = false;

        if let Some(audience) = self.pack.rules.match_audience(&lower) {
            contexts.push(Context::new(Aspect::Audience, audience));
            matched_audience = true;
        }
        if let Some(length) = self.pack.rules.match_length(&lower) {
            contexts.push(Context::new(Aspect::Length, length));
            matched_length = true;
        }
        // STYLE duplicates LENGTH words often enough that LENGTH wins
        if !matched_length {
            if let Some(style) = self.pack.rules.match_style(&lower) {
                contexts.push(Context::new(Aspect::Style, style));
            }
        }
        if let Some(tone) = self.pack.rules.match_tone(&lower) {
            contexts.push(Context::new(Aspect::Tone, tone));
        }

        for (aspect, patterns) in &self.pack.rules.ctx {
            for (pattern, value) in patterns {
                if pattern.is_match(&lower) {
                    contexts.push(Context::new(*aspect, value.clone()));
                    break;
                }
            }
        }

        // "As a manager, ..." implies a business audience
        if !matched_audience {
            let words: Vec<&str> = lower.split_whitespace().collect();
            if words.first() == Some(&"as")
                && words
                    .get(2)
                    .map(|w| LEADING_ROLE_WORDS.contains(&w.trim_matches(',')))
                    .unwrap_or(false)
            {
                contexts.push(Context::new(Aspect::Audience, "BUSINESS"));
            }
        }

        let mut unique = Vec::new();
        for ctx in contexts {
            if !unique
                .iter()
                .any(|c: &Context| c.aspect == ctx.aspect && c.value == ctx.value)
            {
                unique.push(ctx);
            }
        }
        unique
    }

    fn has_ctx_intent(&self, lower: &str) -> bool {
        if SCHEMA_MARKERS.iter().any(|m| lower.contains(m)) {
            return false;
        }
        CTX_INTENT_KEYWORDS.iter().any(|kw| lower.contains(kw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clm_language::Lang;

    fn parse(text: &str) -> Vec<Context> {
        let pack = LanguagePack::load(Lang::En).unwrap();
        ContextParser::new(&pack).parse(text)
    }

    #[test]
    fn audience_and_length_combine() {
        let contexts = parse("Write a brief explanation for beginners");
        assert!(contexts
            .iter()
            .any(|c| c.aspect == Aspect::Audience && c.value == "BEGINNER"));
        assert!(contexts
            .iter()
            .any(|c| c.aspect == Aspect::Length && c.value == "BRIEF"));
    }

    #[test]
    fn style_is_skipped_when_length_matched() {
        let contexts = parse("Keep it short and simple");
        assert!(contexts.iter().any(|c| c.aspect == Aspect::Length));
        assert!(!contexts.iter().any(|c| c.aspect == Aspect::Style));
    }

    #[test]
    fn schema_markers_disable_ctx() {
        let contexts = parse("Write output format {\"summary\": \"...\"} in a brief style");
        assert!(contexts.is_empty());
    }

    #[test]
    fn no_stylistic_intent_no_ctx() {
        assert!(parse("The quarterly revenue figures").is_empty());
    }

    #[test]
    fn leading_as_role_implies_business_audience() {
        let contexts = parse("As a manager, give me the highlights");
        assert!(contexts
            .iter()
            .any(|c| c.aspect == Aspect::Audience && c.value == "BUSINESS"));
    }

    #[test]
    fn generic_aspects_match_at_most_once() {
        let contexts = parse("Write this urgent summary asap");
        let priorities: Vec<_> = contexts
            .iter()
            .filter(|c| c.aspect == Aspect::Priority)
            .collect();
        assert_eq!(priorities.len(), 1);
    }
}
