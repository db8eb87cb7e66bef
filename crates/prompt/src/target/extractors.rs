//! The extractor pipeline stages
//!
//! Ordered strategies, each a value with one `extract` operation. The
//! imperative and question stages short-circuit; the noun, compound, and
//! pattern stages collect; the fallback only runs when nothing collected.

use clm_core::{Doc, Pos, Req, Target};
use clm_language::LanguagePack;
use regex::Regex;

use super::attributes::AttributeEnhancer;

/// Case-insensitive leading-verb matcher for one REQ family.
fn leading_verb(pack: &LanguagePack, family: &str, text: &str) -> bool {
    let synonyms = pack.vocabulary.req_synonyms(family);
    if synonyms.is_empty() {
        return false;
    }
    let alternation = synonyms
        .iter()
        .map(|s| regex::escape(s))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)^(?:{alternation})\s+"))
        .map(|re| re.is_match(text.trim_start()))
        .unwrap_or(false)
}

/// A scored domain, with the all-zero DEFAULT reading as no domain.
fn detected_domain(enhancer: &AttributeEnhancer<'_>, text: &str, doc: &Doc) -> Option<String> {
    let (domain, _) = enhancer.domain_detector().detect(text, doc);
    (domain != "DEFAULT").then_some(domain)
}

fn contains_any(text: &str, words: &[&str], window: Option<usize>) -> bool {
    let slice = match window {
        Some(n) if text.len() > n => {
            let mut end = n;
            while !text.is_char_boundary(end) {
                end -= 1;
            }
            &text[..end]
        }
        _ => text,
    };
    words.iter().any(|w| slice.contains(w))
}

/// Imperative commands: the leading verb's REQ family picks the target.
pub struct ImperativeExtractor<'a> {
    pub pack: &'a LanguagePack,
    pub enhancer: &'a AttributeEnhancer<'a>,
}

impl ImperativeExtractor<'_> {
    pub fn extract(&self, text: &str, doc: &Doc) -> Option<Target> {
        let lower = text.to_lowercase();
        let lower = lower.trim();
        let vocab = &self.pack.vocabulary;

        let token = if leading_verb(self.pack, "LIST", lower) {
            "ITEMS"
        } else if leading_verb(self.pack, "CALCULATE", lower) {
            "RESULT"
        } else if leading_verb(self.pack, "EXTRACT", lower) {
            "DATA"
        } else if leading_verb(self.pack, "ANALYZE", lower) {
            if contains_any(lower, vocab.target_synonyms("CODE"), Some(30)) {
                "CODE"
            } else if contains_any(lower, vocab.target_synonyms("DATA"), Some(30)) {
                "DATA"
            } else {
                "DOCUMENT"
            }
        } else if leading_verb(self.pack, "GENERATE", lower) {
            "CONTENT"
        } else if leading_verb(self.pack, "CLASSIFY", lower) {
            if contains_any(lower, vocab.target_synonyms("TICKET"), Some(30)) {
                "TICKET"
            } else if contains_any(lower, vocab.target_synonyms("EMAIL"), Some(30)) {
                "EMAIL"
            } else {
                "CONTENT"
            }
        } else if leading_verb(self.pack, "SUMMARIZE", lower) {
            self.summarize_target(lower)
        } else if leading_verb(self.pack, "OPTIMIZE", lower) {
            if contains_any(lower, vocab.target_synonyms("QUERY"), Some(30)) {
                "QUERY"
            } else {
                "CODE"
            }
        } else if leading_verb(self.pack, "DEBUG", lower) {
            "CODE"
        } else if leading_verb(self.pack, "TRANSFORM", lower) {
            self.transform_target(lower)
        } else {
            return None;
        };

        Some(Target::new(token).with_attributes(self.enhancer.enhance(token, text, doc)))
    }

    fn summarize_target(&self, lower: &str) -> &'static str {
        let vocab = &self.pack.vocabulary;
        if contains_any(lower, vocab.target_synonyms("TRANSCRIPT"), None) {
            "TRANSCRIPT"
        } else if contains_any(lower, vocab.target_synonyms("CALL"), None) {
            "CALL"
        } else if contains_any(lower, &vocab.meeting_words, None) {
            "MEETING"
        } else {
            "DOCUMENT"
        }
    }

    fn transform_target(&self, lower: &str) -> &'static str {
        let vocab = &self.pack.vocabulary;
        if contains_any(lower, vocab.target_synonyms("TRANSCRIPT"), Some(40)) {
            "TRANSCRIPT"
        } else if contains_any(lower, vocab.target_synonyms("DOCUMENT"), Some(40))
            || contains_any(lower, &vocab.proposal_words, Some(40))
        {
            "DOCUMENT"
        } else {
            "CONTENT"
        }
    }
}

/// Questions led by a question word become CONCEPT targets.
pub struct QuestionExtractor<'a> {
    pub pack: &'a LanguagePack,
    pub enhancer: &'a AttributeEnhancer<'a>,
}

impl QuestionExtractor<'_> {
    pub fn extract(&self, text: &str, doc: &Doc) -> Option<Target> {
        if !self.pack.vocabulary.is_question(text) {
            return None;
        }
        let attributes = self.enhancer.enhance("CONCEPT", text, doc);
        let mut target = Target::new("CONCEPT").with_attributes(attributes);
        target.domain = detected_domain(self.enhancer, text, doc);
        Some(target)
    }
}

/// Vocabulary matches over nouns and noun chunks.
pub struct NounExtractor<'a> {
    pub pack: &'a LanguagePack,
    pub enhancer: &'a AttributeEnhancer<'a>,
}

impl NounExtractor<'_> {
    pub fn extract(&self, text: &str, doc: &Doc) -> Vec<Target> {
        let mut targets: Vec<Target> = Vec::new();
        let domain = detected_domain(self.enhancer, text, doc);

        for word in &doc.words {
            if !matches!(word.pos, Pos::Noun | Pos::Propn) {
                continue;
            }
            if let Some(token) = self.pack.vocabulary.get_target_token(&word.text) {
                if targets.iter().any(|t| t.token == token) {
                    continue;
                }
                let mut target =
                    Target::new(token).with_attributes(self.enhancer.enhance(token, text, doc));
                target.domain = domain.clone();
                targets.push(target);
            }
        }

        for chunk in doc.noun_chunk_texts() {
            if let Some(token) = self.pack.vocabulary.get_target_token(&chunk.to_lowercase()) {
                if targets.iter().any(|t| t.token == token) {
                    continue;
                }
                let mut target =
                    Target::new(token).with_attributes(self.enhancer.enhance(token, text, doc));
                target.domain = domain.clone();
                targets.push(target);
            }
        }

        targets
    }
}

/// Multi-word target synonyms present verbatim in the text.
pub struct CompoundExtractor<'a> {
    pub pack: &'a LanguagePack,
    pub enhancer: &'a AttributeEnhancer<'a>,
}

impl CompoundExtractor<'_> {
    pub fn extract(&self, text: &str, doc: &Doc) -> Vec<Target> {
        let lower = text.to_lowercase();
        let mut targets: Vec<Target> = Vec::new();
        let domain = detected_domain(self.enhancer, text, doc);

        let mut push = |token: &str, this: &Self| {
            if targets.iter().any(|t| t.token == token) {
                return;
            }
            let mut target =
                Target::new(token).with_attributes(this.enhancer.enhance(token, text, doc));
            target.domain = domain.clone();
            targets.push(target);
        };

        for (token, synonyms) in &self.pack.vocabulary.target_tokens {
            for synonym in synonyms {
                if synonym.contains(' ') && lower.contains(synonym) {
                    push(token, self);
                }
            }
        }
        for (phrase, token) in &self.pack.vocabulary.compound_phrases {
            if lower.contains(phrase) {
                push(token, self);
            }
        }

        targets
    }
}

/// Demonstrative, "for X", and concept patterns.
pub struct PatternExtractor<'a> {
    pub pack: &'a LanguagePack,
    pub enhancer: &'a AttributeEnhancer<'a>,
}

impl PatternExtractor<'_> {
    pub fn extract(&self, text: &str, doc: &Doc) -> Vec<Target> {
        let mut targets = Vec::new();
        let domain = detected_domain(self.enhancer, text, doc);

        if let Some(mut target) = self.demonstrative_target(text, doc) {
            target.domain = domain.clone();
            targets.push(target);
        }
        if let Some(mut target) = self.for_target(text, doc) {
            target.domain = domain.clone();
            targets.push(target);
        }
        if let Some(mut target) = self.concept_target(text, doc) {
            target.domain = domain;
            targets.push(target);
        }

        targets
    }

    /// "this code", "that query": a demonstrative followed by a known noun.
    fn demonstrative_target(&self, text: &str, doc: &Doc) -> Option<Target> {
        for (i, word) in doc.words.iter().enumerate() {
            let lower = word.text.to_lowercase();
            if !self.pack.vocabulary.demonstratives.contains(&lower.as_str()) {
                continue;
            }
            let next = doc.words.get(i + 1)?;
            if !matches!(next.pos, Pos::Noun | Pos::Propn) {
                continue;
            }
            if let Some(token) = self.pack.vocabulary.get_target_token(&next.text) {
                let attributes = self.enhancer.enhance(token, text, doc);
                return Some(Target::new(token).with_attributes(attributes));
            }
        }
        None
    }

    /// "for a <synonym>" with optional filler words in between.
    fn for_target(&self, text: &str, doc: &Doc) -> Option<Target> {
        let lower = text.to_lowercase();
        for (token, synonyms) in &self.pack.vocabulary.target_tokens {
            for synonym in synonyms {
                let pattern = format!(
                    r"for\s+(?:a|an|the)?\s*(?:\w+\s+)*?{}",
                    regex::escape(synonym)
                );
                if Regex::new(&pattern).map(|re| re.is_match(&lower)).unwrap_or(false) {
                    let attributes = self.enhancer.enhance(token, text, doc);
                    return Some(Target::new(*token).with_attributes(attributes));
                }
            }
        }
        None
    }

    /// Concept mentions: explicit "concept of", an explain verb without
    /// code/data/document synonyms, or a known technical concept.
    fn concept_target(&self, text: &str, doc: &Doc) -> Option<Target> {
        let lower = text.to_lowercase();
        let vocab = &self.pack.vocabulary;

        let explicit = vocab.concept_phrases.iter().any(|p| lower.contains(p));

        let explain_without_artifact = vocab
            .req_synonyms("EXPLAIN")
            .iter()
            .any(|v| lower.contains(v))
            && !contains_any(&lower, vocab.target_synonyms("CODE"), None)
            && !contains_any(&lower, vocab.target_synonyms("DATA"), None)
            && !contains_any(&lower, vocab.target_synonyms("DOCUMENT"), None);

        let known_concept = vocab.technical_concepts.iter().any(|c| lower.contains(c));

        if explicit || explain_without_artifact || known_concept {
            let attributes = self.enhancer.enhance("CONCEPT", text, doc);
            return Some(Target::new("CONCEPT").with_attributes(attributes));
        }
        None
    }
}

/// Last resort, driven by the detected REQ.
pub struct FallbackExtractor<'a> {
    pub pack: &'a LanguagePack,
    pub enhancer: &'a AttributeEnhancer<'a>,
}

impl FallbackExtractor<'_> {
    pub fn extract(&self, text: &str, req: Option<Req>, doc: &Doc) -> Target {
        let lower = text.to_lowercase();
        let vocab = &self.pack.vocabulary;

        let token = match req {
            Some(Req::Generate) => {
                let list_indicators = vocab
                    .req_synonyms("LIST")
                    .iter()
                    .chain(vocab.target_synonyms("ITEMS").iter())
                    .chain(vocab.quantifier_words.iter())
                    .any(|w| lower.contains(*w));
                if list_indicators {
                    "ITEMS"
                } else {
                    "CONTENT"
                }
            }
            Some(Req::Explain) => "CONCEPT",
            _ => "ANSWER",
        };

        let mut target =
            Target::new(token).with_attributes(self.enhancer.enhance(token, text, doc));
        target.domain = detected_domain(self.enhancer, text, doc);
        target
    }
}
