//! Quantifiers, numeric specifications, and extraction fields

use std::collections::BTreeMap;

use clm_core::{Doc, EntityLabel, ExtractionField};
use clm_language::LanguagePack;
use once_cell::sync::Lazy;
use regex::Regex;

static DIGIT_QUANTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d+)\s*(tips?|items?|examples?|steps?|ways?|methods?)\b")
        .expect("static pattern")
});

const COUNTABLE_NOUNS: &[&str] = &[
    "tip", "tips", "item", "items", "example", "examples", "step", "steps", "way", "ways",
    "method", "methods",
];

pub struct AttributeParser<'a> {
    pack: &'a LanguagePack,
}

impl<'a> AttributeParser<'a> {
    pub fn new(pack: &'a LanguagePack) -> Self {
        Self { pack }
    }

    /// Quantifier: digit+noun, number-word+noun, bare number-word, then a
    /// cardinal entity.
    pub fn extract_quantifier(&self, text: &str, doc: &Doc) -> Option<(String, i64)> {
        let clean = clm_core::normalize_whitespace(text).to_lowercase();

        if let Some(caps) = DIGIT_QUANTIFIER.captures(&clean) {
            if let Ok(n) = caps[1].parse::<i64>() {
                return Some((format!("NUM_{n}"), n));
            }
        }

        for (word, value) in self.pack.rules.number_words() {
            let followed = format!(
                r"\b{}\s+(?:tips|items|examples|steps|ways|methods)\b",
                regex::escape(word)
            );
            if Regex::new(&followed).map(|re| re.is_match(&clean)).unwrap_or(false) {
                return Some((word.to_uppercase(), *value));
            }
        }

        for (word, value) in self.pack.rules.number_words() {
            let bare = format!(r"\b{}\b", regex::escape(word));
            if Regex::new(&bare).map(|re| re.is_match(&clean)).unwrap_or(false) {
                return Some((word.to_uppercase(), *value));
            }
        }

        for entity in doc.entities_labeled(&EntityLabel::Cardinal) {
            if let Ok(n) = entity.text.parse::<i64>() {
                return Some((format!("NUM_{n}"), n));
            }
        }

        None
    }

    /// Numeric specifications: the SPEC pattern table, number-word counts,
    /// and cardinal entities followed by a countable noun.
    pub fn extract_specifications(&self, text: &str, doc: &Doc) -> BTreeMap<String, i64> {
        let clean = clm_core::normalize_whitespace(text);
        let lower = clean.to_lowercase();
        let mut specs = BTreeMap::new();

        for (label, n) in self.pack.rules.match_specs(&clean) {
            specs.entry(label).or_insert(n);
        }

        for (word, value) in self.pack.rules.number_words() {
            let followed = format!(
                r"\b{}\s+(?:tips|examples|items|ways|methods|steps)\b",
                regex::escape(word)
            );
            if Regex::new(&followed).map(|re| re.is_match(&lower)).unwrap_or(false) {
                specs.entry("COUNT".to_string()).or_insert(*value);
                break;
            }
        }

        for entity in doc.entities_labeled(&EntityLabel::Cardinal) {
            let Ok(n) = entity.text.parse::<i64>() else {
                continue;
            };
            let Some(next) = doc.words.get(entity.end) else {
                continue;
            };
            let next = next.lemma.to_lowercase();
            if matches!(next.as_str(), "line" | "lines") {
                specs.entry("LINES".to_string()).or_insert(n);
            } else if COUNTABLE_NOUNS.contains(&next.as_str()) {
                specs.entry("COUNT".to_string()).or_insert(n);
            }
        }

        specs
    }

    /// Extraction fields: gated on an extraction indicator; fields come
    /// from the standard-field table, kept in the vocabulary's declaration
    /// order, with QA criteria appended under a DOMAIN=QA qualifier.
    pub fn parse_extraction_fields(&self, text: &str) -> Option<ExtractionField> {
        let lower = text.to_lowercase();
        if !self.pack.rules.has_extraction_indicator(&lower) {
            return None;
        }

        let matched = self.pack.rules.standard_field_matches(&lower);
        let mut fields: Vec<String> = self
            .pack
            .vocabulary
            .extract_fields
            .iter()
            .filter(|name| matched.iter().any(|m| m == *name))
            .map(|name| (*name).to_string())
            .collect();
        // Matched labels outside the declared set keep their scan order
        for label in &matched {
            if !fields.contains(label) {
                fields.push(label.clone());
            }
        }

        let mut attributes = BTreeMap::new();
        if self.pack.rules.has_qa_indicator(&lower) {
            let criteria = self.pack.rules.match_qa_criteria(&lower);
            if !criteria.is_empty() {
                for criterion in criteria {
                    if !fields.contains(&criterion) {
                        fields.push(criterion);
                    }
                }
                attributes.insert("DOMAIN".to_string(), "QA".to_string());
            }
        }

        if fields.is_empty() {
            return None;
        }
        Some(ExtractionField { fields, attributes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clm_core::NlpProvider;
    use clm_language::{Lang, LanguagePack};
    use clm_nlp::LexiconNlp;

    fn parser_ctx() -> LanguagePack {
        LanguagePack::load(Lang::En).unwrap()
    }

    #[test]
    fn digit_quantifier_wins() {
        let pack = parser_ctx();
        let parser = AttributeParser::new(&pack);
        let doc = LexiconNlp::new().analyze("Give me 5 tips for writing tests");
        assert_eq!(
            parser.extract_quantifier("Give me 5 tips for writing tests", &doc),
            Some(("NUM_5".to_string(), 5))
        );
    }

    #[test]
    fn word_quantifier_falls_back() {
        let pack = parser_ctx();
        let parser = AttributeParser::new(&pack);
        let doc = LexiconNlp::new().analyze("Suggest three ways to improve");
        assert_eq!(
            parser.extract_quantifier("Suggest three ways to improve", &doc),
            Some(("THREE".to_string(), 3))
        );
    }

    #[test]
    fn specifications_collect_lines_and_counts() {
        let pack = parser_ctx();
        let parser = AttributeParser::new(&pack);
        let text = "Write a summary in 10 lines with 3 examples";
        let doc = LexiconNlp::new().analyze(text);
        let specs = parser.extract_specifications(text, &doc);
        assert_eq!(specs.get("LINES"), Some(&10));
        assert_eq!(specs.get("COUNT"), Some(&3));
    }

    #[test]
    fn extraction_fields_keep_declaration_order() {
        let pack = parser_ctx();
        let parser = AttributeParser::new(&pack);
        let fields = parser
            .parse_extraction_fields("Extract the dates, names and amounts from the invoice")
            .unwrap();
        // Declaration order in the vocabulary: NAMES before DATES before AMOUNTS
        assert_eq!(fields.fields, vec!["NAMES", "DATES", "AMOUNTS"]);
    }

    #[test]
    fn qa_criteria_carry_domain_qualifier() {
        let pack = parser_ctx();
        let parser = AttributeParser::new(&pack);
        let fields = parser
            .parse_extraction_fields("Extract and score policy adherence and verification")
            .unwrap();
        assert!(fields.fields.contains(&"POLICY".to_string()));
        assert!(fields.fields.contains(&"VERIFICATION".to_string()));
        assert_eq!(fields.attributes.get("DOMAIN").unwrap(), "QA");
    }

    #[test]
    fn no_indicator_means_no_fields() {
        let pack = parser_ctx();
        let parser = AttributeParser::new(&pack);
        assert!(parser.parse_extraction_fields("hello world").is_none());
    }
}
