//! Attribute enrichment for extracted targets
//!
//! Adds TOPIC, SUBJECT, TYPE, DURATION, CONTEXT, ISSUE, DOMAIN, and LANG
//! attributes depending on the target token.

use std::collections::BTreeMap;

use clm_core::{Doc, Pos};
use clm_language::LanguagePack;
use once_cell::sync::Lazy;
use regex::Regex;

static RESULT_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:calculate|compute|find) (?:the )?([\w\s]+)").expect("static pattern")
});
static ARTICLE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:the|a|an)\s+").expect("static pattern"));
static NON_WORD_TOPIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d\W_]+$").expect("static pattern"));
static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static pattern"));

pub struct AttributeEnhancer<'a> {
    pack: &'a LanguagePack,
    domain: DomainDetector<'a>,
}

impl<'a> AttributeEnhancer<'a> {
    pub fn new(pack: &'a LanguagePack) -> Self {
        Self {
            pack,
            domain: DomainDetector { pack },
        }
    }

    pub fn domain_detector(&self) -> &DomainDetector<'a> {
        &self.domain
    }

    pub fn enhance(&self, token: &str, text: &str, doc: &Doc) -> BTreeMap<String, String> {
        let mut attributes = BTreeMap::new();
        let lower = text.to_lowercase();

        if matches!(token, "CONCEPT" | "PROCEDURE" | "ANSWER" | "FACT") {
            if let Some(topic) = self.extract_topic(&lower, doc) {
                attributes.insert("TOPIC".to_string(), topic);
            }
        }

        if matches!(token, "CONTENT" | "ITEMS" | "ANSWER" | "DOCUMENT") {
            if let Some(subject) = self.pack.rules.match_subject_pattern(&lower) {
                attributes.insert("SUBJECT".to_string(), subject);
            }
        }

        if token == "RESULT" {
            if let Some(caps) = RESULT_TYPE.captures(&lower) {
                let kind = caps[1].trim().replace(' ', "_").to_uppercase();
                attributes.insert("TYPE".to_string(), kind);
            }
        }

        if matches!(token, "TRANSCRIPT" | "CALL" | "MEETING") {
            if let Some(minutes) = self.pack.rules.match_duration_minutes(&lower) {
                attributes.insert("DURATION".to_string(), minutes.to_string());
            }
        }

        if matches!(token, "TRANSCRIPT" | "DOCUMENT") {
            if let Some(kind) = self.pack.rules.match_type(&lower) {
                attributes.insert("TYPE".to_string(), kind);
            }
        }

        if let Some(context) = self.pack.rules.match_context(&lower) {
            attributes.insert("CONTEXT".to_string(), context);
        }

        if matches!(token, "COMPLAINT" | "TICKET") {
            if let Some(issue) = self.pack.rules.extract_issue_context(text) {
                attributes.insert("ISSUE".to_string(), issue.replace(' ', "_").to_uppercase());
            }
        }

        let (domain, _) = self.domain.detect(text, doc);
        if !domain.is_empty() {
            attributes.insert("DOMAIN".to_string(), domain);
        }

        if let Some(lang) = self.detect_programming_language(&lower) {
            attributes.insert("LANG".to_string(), lang);
        }

        attributes
    }

    /// TOPIC: question subject, explain subject, concept pattern,
    /// procedure pattern, then the first meaningful noun chunk.
    fn extract_topic(&self, lower: &str, doc: &Doc) -> Option<String> {
        for candidate in [
            self.pack.rules.extract_question_subject(lower),
            self.pack.rules.extract_explain_subject(lower),
            self.pack.rules.extract_concept(lower),
            self.pack.rules.extract_procedure(lower),
        ]
        .into_iter()
        .flatten()
        {
            if let Some(cleaned) = self.clean_topic(&candidate) {
                return self.validate_topic(&format_topic(&cleaned));
            }
        }

        for chunk in doc.noun_chunk_texts() {
            let mut chunk = chunk.to_lowercase().trim().to_string();
            if self.pack.vocabulary.stopwords.contains(&chunk.as_str()) {
                continue;
            }
            for demonstrative in &self.pack.vocabulary.demonstratives {
                if let Some(rest) = chunk.strip_prefix(&format!("{demonstrative} ")) {
                    chunk = rest.trim().to_string();
                }
            }
            if chunk.is_empty() || self.pack.vocabulary.stopwords.contains(&chunk.as_str()) {
                continue;
            }
            if chunk.len() > 3 {
                if let Some(cleaned) = self.clean_topic(&chunk) {
                    if let Some(valid) = self.validate_topic(&format_topic(&cleaned)) {
                        return Some(valid);
                    }
                }
            }
        }
        None
    }

    /// Strip leading pronouns, demonstratives, modals, and articles, then
    /// remove action verbs and trailing filler.
    fn clean_topic(&self, topic: &str) -> Option<String> {
        let mut t = topic.trim().to_string();

        for prefix_set in [
            &self.pack.vocabulary.pronouns,
            &self.pack.vocabulary.demonstratives,
            &self.pack.vocabulary.modals,
        ] {
            for word in prefix_set.iter() {
                if let Some(rest) = strip_word_prefix(&t, word) {
                    t = rest;
                }
            }
        }
        t = ARTICLE_PREFIX.replace(&t, "").to_string();

        for verb in &self.pack.vocabulary.action_verbs {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(verb));
            if let Ok(re) = Regex::new(&pattern) {
                t = re.replace_all(&t, "").to_string();
            }
        }

        t = self.pack.rules.cleanup_tail(&t);
        let t = SPACES.replace_all(&t, " ").trim().to_string();
        let t = trim_topic(&t);
        (!t.is_empty()).then_some(t)
    }

    fn validate_topic(&self, topic: &str) -> Option<String> {
        if topic.len() < 2 || NON_WORD_TOPIC.is_match(topic) {
            return None;
        }
        let upper = topic.to_uppercase();
        if self
            .pack
            .vocabulary
            .demonstratives
            .iter()
            .any(|d| upper == d.to_uppercase())
        {
            return None;
        }
        if let Some(rest) = upper.strip_prefix("THIS_") {
            if rest.len() < 2 {
                return None;
            }
            return Some(rest.to_string());
        }
        Some(upper)
    }

    /// LANG only fires in the presence of a code indicator.
    fn detect_programming_language(&self, lower: &str) -> Option<String> {
        if !self
            .pack
            .vocabulary
            .code_indicators
            .iter()
            .any(|ind| lower.contains(ind))
        {
            return None;
        }
        self.pack
            .rules
            .match_programming_language(lower)
            .map(|l| l.to_uppercase())
    }
}

fn format_topic(topic: &str) -> String {
    topic.replace(' ', "_").replace('\'', "").to_uppercase()
}

/// Stop a greedy topic at the first preposition or conjunction and cap it
/// at four words.
fn trim_topic(topic: &str) -> String {
    topic
        .split_whitespace()
        .take_while(|w| !matches!(w.to_lowercase().as_str(), "in" | "with" | "for" | "and" | "or"))
        .take(4)
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_word_prefix(text: &str, word: &str) -> Option<String> {
    let lower = text.to_lowercase();
    let prefix = format!("{} ", word.to_lowercase());
    lower
        .starts_with(&prefix)
        .then(|| text[prefix.len()..].trim().to_string())
}

/// Scored domain detection: keyword hits, regex hits, noun-chunk and
/// verb-lemma boosts; ties resolved by the priority list.
pub struct DomainDetector<'a> {
    pack: &'a LanguagePack,
}

impl DomainDetector<'_> {
    pub fn detect(&self, text: &str, doc: &Doc) -> (String, f64) {
        let lower = text.trim().to_lowercase();
        let mut scores: Vec<(String, f64)> = Vec::new();
        let mut bump = |domain: &str, points: f64| {
            if let Some(entry) = scores.iter_mut().find(|(d, _)| d.as_str() == domain) {
                entry.1 += points;
            } else {
                scores.push((domain.to_string(), points));
            }
        };

        for (domain, keywords) in &self.pack.vocabulary.domain_candidates {
            for keyword in keywords {
                if lower.contains(keyword) {
                    bump(domain, 1.0);
                }
            }
        }

        for (pattern, domain) in &self.pack.rules.domain_regex {
            if pattern.is_match(&lower) {
                bump(domain, 2.0);
            }
        }

        for chunk in doc.noun_chunk_texts() {
            let chunk = chunk.to_lowercase();
            for (domain, keywords) in &self.pack.vocabulary.domain_candidates {
                if keywords.iter().any(|k| chunk.contains(k)) {
                    bump(domain, 1.5);
                }
            }
        }

        for word in &doc.words {
            if word.pos != Pos::Verb {
                continue;
            }
            let lemma = word.lemma.as_str();
            if self.pack.vocabulary.technical_lemmas.contains(&lemma) {
                bump("TECHNICAL", 1.5);
            }
            if self.pack.vocabulary.finance_lemmas.contains(&lemma) {
                bump("FINANCE", 1.5);
            }
            if self.pack.vocabulary.support_lemmas.contains(&lemma) {
                bump("SUPPORT", 1.5);
            }
        }

        let highest = scores.iter().map(|(_, s)| *s).fold(0.0, f64::max);
        if highest == 0.0 {
            return ("DEFAULT".to_string(), 0.0);
        }

        let candidates: Vec<&String> = scores
            .iter()
            .filter(|(_, s)| *s == highest)
            .map(|(d, _)| d)
            .collect();
        if candidates.len() > 1 {
            for preferred in &self.pack.vocabulary.domains_priority {
                if candidates.iter().any(|c| c.as_str() == *preferred) {
                    return ((*preferred).to_string(), highest);
                }
            }
        }
        (candidates[0].clone(), highest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clm_core::NlpProvider;
    use clm_language::{Lang, LanguagePack};
    use clm_nlp::LexiconNlp;

    fn enhance(token: &str, text: &str) -> BTreeMap<String, String> {
        let pack = LanguagePack::load(Lang::En).unwrap();
        let doc = LexiconNlp::new().analyze(text);
        AttributeEnhancer::new(&pack).enhance(token, text, &doc)
    }

    #[test]
    fn transcript_duration_in_minutes() {
        let attrs = enhance("TRANSCRIPT", "Summarize this 30-minute customer call transcript");
        assert_eq!(attrs.get("DURATION").unwrap(), "30");
        assert_eq!(attrs.get("TYPE").unwrap(), "CALL");
        assert_eq!(attrs.get("CONTEXT").unwrap(), "CUSTOMER");
    }

    #[test]
    fn hour_durations_convert() {
        let attrs = enhance("CALL", "notes from the 2 hour call");
        assert_eq!(attrs.get("DURATION").unwrap(), "120");
    }

    #[test]
    fn code_language_needs_an_indicator() {
        let attrs = enhance("CODE", "Analyze this Python code for security issues");
        assert_eq!(attrs.get("LANG").unwrap(), "PYTHON");

        let attrs = enhance("CONTENT", "write a poem about python snakes");
        assert!(!attrs.contains_key("LANG"));
    }

    #[test]
    fn concept_topic_from_question() {
        let attrs = enhance("CONCEPT", "What is object-oriented programming?");
        assert_eq!(attrs.get("TOPIC").unwrap(), "OBJECT-ORIENTED_PROGRAMMING");
    }

    #[test]
    fn result_type_from_calculation_phrase() {
        let attrs = enhance("RESULT", "Calculate the average response time");
        assert!(attrs.get("TYPE").unwrap().starts_with("AVERAGE_RESPONSE_TIME"));
    }

    #[test]
    fn domain_scoring_prefers_support_on_ties() {
        let pack = LanguagePack::load(Lang::En).unwrap();
        let doc = LexiconNlp::new().analyze("customer ticket about an error");
        let detector = AttributeEnhancer::new(&pack);
        let (domain, score) = detector.domain_detector().detect("customer ticket about an error", &doc);
        assert_eq!(domain, "SUPPORT");
        assert!(score > 0.0);
    }

    #[test]
    fn no_signal_means_default_domain() {
        let pack = LanguagePack::load(Lang::En).unwrap();
        let doc = LexiconNlp::new().analyze("hello there");
        let (domain, score) = AttributeEnhancer::new(&pack)
            .domain_detector()
            .detect("hello there", &doc);
        assert_eq!(domain, "DEFAULT");
        assert_eq!(score, 0.0);
    }
}
