//! Rule bundles: per-language regex pattern tables, compiled once
//!
//! `RuleSet` is plain data supplied by a language module. `compile()`
//! validates every pattern up front; a pattern that does not compile is a
//! fatal configuration error, the encoder cannot be constructed around it.

use clm_core::{Aspect, ClmError, Result};
use regex::Regex;

/// Unit attached to a duration capture; hours convert to minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Minutes,
    Hours,
}

#[derive(Debug, Clone)]
pub struct RuleSet {
    pub comparison_map: Vec<(&'static str, &'static str)>,
    pub domain_regex: Vec<(&'static str, &'static str)>,
    pub duration_patterns: Vec<(&'static str, DurationUnit)>,
    pub standard_field_keywords: Vec<(&'static str, &'static str)>,
    pub audience_map: Vec<(&'static str, &'static str)>,
    pub length_map: Vec<(&'static str, &'static str)>,
    pub style_map: Vec<(&'static str, &'static str)>,
    pub tone_map: Vec<(&'static str, &'static str)>,
    pub number_words: Vec<(&'static str, i64)>,
    pub spec_patterns: Vec<(&'static str, &'static str)>,
    pub programming_language_patterns: Vec<(&'static str, &'static str)>,
    pub extraction_indicators: Vec<&'static str>,
    pub qa_criteria: Vec<(&'static str, &'static str)>,
    pub qa_indicators: Vec<&'static str>,
    pub question_patterns: Vec<(&'static str, usize)>,
    pub explain_patterns: Vec<(&'static str, usize)>,
    pub concept_pattern: (&'static str, usize),
    pub procedure_pattern: (&'static str, usize),
    pub cleanup_tail: &'static str,
    pub subject_patterns: Vec<(&'static str, &'static str)>,
    /// Substring keyword -> communication type, first match wins.
    pub type_map: Vec<(&'static str, &'static str)>,
    /// Substring keyword -> context label, first match wins.
    pub context_map: Vec<(&'static str, &'static str)>,
    pub issue_patterns: Vec<&'static str>,
    pub ctx_patterns: Vec<(Aspect, Vec<(&'static str, &'static str)>)>,
}

impl RuleSet {
    pub fn compile(self) -> Result<CompiledRules> {
        Ok(CompiledRules {
            comparison: compile_map(&self.comparison_map)?,
            domain_regex: compile_map(&self.domain_regex)?,
            duration: self
                .duration_patterns
                .iter()
                .map(|(p, unit)| Ok((compile(p)?, *unit)))
                .collect::<Result<Vec<_>>>()?,
            standard_fields: compile_map(&self.standard_field_keywords)?,
            audience: compile_map(&self.audience_map)?,
            length: compile_map(&self.length_map)?,
            style: compile_map(&self.style_map)?,
            tone: compile_map(&self.tone_map)?,
            number_words: self
                .number_words
                .iter()
                .map(|(w, n)| ((*w).to_string(), *n))
                .collect(),
            specs: compile_map(&self.spec_patterns)?,
            languages: compile_map(&self.programming_language_patterns)?,
            extraction_indicators: compile_list(&self.extraction_indicators)?,
            qa_criteria: compile_map(&self.qa_criteria)?,
            qa_indicators: compile_list(&self.qa_indicators)?,
            questions: compile_group(&self.question_patterns)?,
            explain: compile_group(&self.explain_patterns)?,
            concept: (compile(self.concept_pattern.0)?, self.concept_pattern.1),
            procedure: (compile(self.procedure_pattern.0)?, self.procedure_pattern.1),
            tail: compile(self.cleanup_tail)?,
            subjects: compile_map(&self.subject_patterns)?,
            type_map: to_owned_map(&self.type_map),
            context_map: to_owned_map(&self.context_map),
            issues: compile_list(&self.issue_patterns)?,
            ctx: self
                .ctx_patterns
                .iter()
                .map(|(aspect, pairs)| Ok((*aspect, compile_map(pairs)?)))
                .collect::<Result<Vec<_>>>()?,
        })
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("(?i){pattern}")).map_err(|source| ClmError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

fn compile_map(pairs: &[(&str, &str)]) -> Result<Vec<(Regex, String)>> {
    pairs
        .iter()
        .map(|(p, v)| Ok((compile(p)?, (*v).to_string())))
        .collect()
}

fn compile_list(patterns: &[&str]) -> Result<Vec<Regex>> {
    patterns.iter().map(|p| compile(p)).collect()
}

fn compile_group(pairs: &[(&str, usize)]) -> Result<Vec<(Regex, usize)>> {
    pairs.iter().map(|(p, g)| Ok((compile(p)?, *g))).collect()
}

fn to_owned_map(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// All pattern tables compiled and ready for matching.
pub struct CompiledRules {
    comparison: Vec<(Regex, String)>,
    pub domain_regex: Vec<(Regex, String)>,
    duration: Vec<(Regex, DurationUnit)>,
    standard_fields: Vec<(Regex, String)>,
    audience: Vec<(Regex, String)>,
    length: Vec<(Regex, String)>,
    style: Vec<(Regex, String)>,
    tone: Vec<(Regex, String)>,
    number_words: Vec<(String, i64)>,
    specs: Vec<(Regex, String)>,
    languages: Vec<(Regex, String)>,
    extraction_indicators: Vec<Regex>,
    qa_criteria: Vec<(Regex, String)>,
    qa_indicators: Vec<Regex>,
    questions: Vec<(Regex, usize)>,
    explain: Vec<(Regex, usize)>,
    concept: (Regex, usize),
    procedure: (Regex, usize),
    tail: Regex,
    subjects: Vec<(Regex, String)>,
    type_map: Vec<(String, String)>,
    context_map: Vec<(String, String)>,
    issues: Vec<Regex>,
    pub ctx: Vec<(Aspect, Vec<(Regex, String)>)>,
}

fn first_match(table: &[(Regex, String)], text: &str) -> Option<String> {
    table
        .iter()
        .find(|(pattern, _)| pattern.is_match(text))
        .map(|(_, value)| value.clone())
}

/// Longest-span winner; declaration order breaks ties.
fn longest_match(table: &[(Regex, String)], text: &str) -> Option<String> {
    let mut best: Option<(usize, &String)> = None;
    for (pattern, value) in table {
        if let Some(m) = pattern.find(text) {
            let len = m.end() - m.start();
            if best.map(|(b, _)| len > b).unwrap_or(true) {
                best = Some((len, value));
            }
        }
    }
    best.map(|(_, v)| v.clone())
}

impl CompiledRules {
    pub fn match_comparison(&self, text: &str) -> Option<String> {
        first_match(&self.comparison, text)
    }

    pub fn match_standard_field(&self, text: &str) -> Option<String> {
        first_match(&self.standard_fields, text)
    }

    pub fn standard_field_matches(&self, text: &str) -> Vec<String> {
        let mut out = Vec::new();
        for (pattern, value) in &self.standard_fields {
            if pattern.is_match(text) && !out.contains(value) {
                out.push(value.clone());
            }
        }
        out
    }

    pub fn match_audience(&self, text: &str) -> Option<String> {
        longest_match(&self.audience, text)
    }

    pub fn match_length(&self, text: &str) -> Option<String> {
        longest_match(&self.length, text)
    }

    pub fn match_style(&self, text: &str) -> Option<String> {
        longest_match(&self.style, text)
    }

    pub fn match_tone(&self, text: &str) -> Option<String> {
        longest_match(&self.tone, text)
    }

    /// (label, captured integer) for every spec pattern that matches.
    pub fn match_specs(&self, text: &str) -> Vec<(String, i64)> {
        let mut out = Vec::new();
        for (pattern, label) in &self.specs {
            if let Some(caps) = pattern.captures(text) {
                if let Some(n) = caps.get(1).and_then(|m| m.as_str().parse().ok()) {
                    out.push((label.clone(), n));
                }
            }
        }
        out
    }

    pub fn match_programming_language(&self, text: &str) -> Option<String> {
        first_match(&self.languages, text)
    }

    pub fn has_extraction_indicator(&self, text: &str) -> bool {
        self.extraction_indicators.iter().any(|p| p.is_match(text))
    }

    pub fn match_qa_criteria(&self, text: &str) -> Vec<String> {
        let mut out = Vec::new();
        for (pattern, value) in &self.qa_criteria {
            if pattern.is_match(text) && !out.contains(value) {
                out.push(value.clone());
            }
        }
        out
    }

    pub fn has_qa_indicator(&self, text: &str) -> bool {
        self.qa_indicators.iter().any(|p| p.is_match(text))
    }

    pub fn extract_question_subject(&self, text: &str) -> Option<String> {
        extract_group(&self.questions, text)
    }

    pub fn extract_explain_subject(&self, text: &str) -> Option<String> {
        extract_group(&self.explain, text)
    }

    pub fn extract_concept(&self, text: &str) -> Option<String> {
        capture_group(&self.concept, text)
    }

    pub fn extract_procedure(&self, text: &str) -> Option<String> {
        capture_group(&self.procedure, text)
    }

    /// Strip trailing prepositions and filler words.
    pub fn cleanup_tail(&self, text: &str) -> String {
        self.tail.replace_all(text, "").trim().to_string()
    }

    pub fn match_subject_pattern(&self, text: &str) -> Option<String> {
        first_match(&self.subjects, text)
    }

    /// Duration in minutes from the duration pattern table.
    pub fn match_duration_minutes(&self, text: &str) -> Option<i64> {
        for (pattern, unit) in &self.duration {
            if let Some(caps) = pattern.captures(text) {
                if let Some(n) = caps.get(1).and_then(|m| m.as_str().parse::<i64>().ok()) {
                    return Some(match unit {
                        DurationUnit::Minutes => n,
                        DurationUnit::Hours => n * 60,
                    });
                }
            }
        }
        None
    }

    pub fn match_type(&self, text: &str) -> Option<String> {
        self.type_map
            .iter()
            .find(|(keyword, _)| text.contains(keyword.as_str()))
            .map(|(_, value)| value.clone())
    }

    pub fn match_context(&self, text: &str) -> Option<String> {
        self.context_map
            .iter()
            .find(|(keyword, _)| text.contains(keyword.as_str()))
            .map(|(_, value)| value.clone())
    }

    pub fn extract_issue_context(&self, text: &str) -> Option<String> {
        for pattern in &self.issues {
            if let Some(caps) = pattern.captures(text) {
                if let Some(m) = caps.get(1) {
                    return Some(m.as_str().trim().to_string());
                }
            }
        }
        None
    }

    pub fn parse_number_word(&self, word: &str) -> Option<i64> {
        let word = word.to_lowercase();
        self.number_words
            .iter()
            .find(|(w, _)| *w == word)
            .map(|(_, n)| *n)
    }

    pub fn number_words(&self) -> &[(String, i64)] {
        &self.number_words
    }
}

fn extract_group(table: &[(Regex, usize)], text: &str) -> Option<String> {
    for (pattern, group) in table {
        if let Some(caps) = pattern.captures(text) {
            if let Some(m) = caps.get(*group) {
                return Some(m.as_str().trim().to_string());
            }
        }
    }
    None
}

fn capture_group(entry: &(Regex, usize), text: &str) -> Option<String> {
    entry
        .0
        .captures(text)
        .and_then(|caps| caps.get(entry.1).map(|m| m.as_str().trim().to_string()))
}

#[cfg(test)]
mod tests {
    use crate::en;

    #[test]
    fn english_rules_compile() {
        assert!(en::rules().compile().is_ok());
    }

    #[test]
    fn duration_hours_convert_to_minutes() {
        let rules = en::rules().compile().unwrap();
        assert_eq!(rules.match_duration_minutes("a 30-minute call"), Some(30));
        assert_eq!(rules.match_duration_minutes("a 2 hour meeting"), Some(120));
    }

    #[test]
    fn longest_span_wins_for_context_categories() {
        let rules = en::rules().compile().unwrap();
        // "non-technical" must beat the bare "technical" match
        assert_eq!(
            rules.match_audience("explain for a non-technical audience"),
            Some("NON_TECHNICAL".to_string())
        );
    }

    #[test]
    fn invalid_pattern_is_a_construction_error() {
        let mut rules = en::rules();
        rules.issue_patterns.push("(broken");
        assert!(rules.compile().is_err());
    }

    #[test]
    fn question_subject_extraction() {
        let rules = en::rules().compile().unwrap();
        assert_eq!(
            rules.extract_question_subject("what is object-oriented programming?"),
            Some("object-oriented programming".to_string())
        );
    }
}
