//! Intent detection: one canonical REQ per prompt
//!
//! Resolution blends three evidence kinds, in this order:
//! 1. signals: vocabulary phrases whose REQ family carries an inherent
//!    signal kind (extraction, prediction, validation, ...)
//! 2. artifacts: structural cues in the text (a `{...}` block, bullet
//!    lines, probability words)
//! 3. fallbacks: direct synonym/lemma matches, imperative patterns,
//!    question shape, and finally ANALYZE

use clm_core::{Doc, Intent, Pos, Req};
use clm_language::LanguagePack;
use once_cell::sync::Lazy;
use regex::Regex;

/// Signal kinds derived from REQ families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Extraction,
    Prediction,
    Transformation,
    Formatting,
    Validation,
    Ranking,
    Debugging,
    Search,
    Execution,
}

/// Fixed family-to-signal table.
fn signal_for_family(family: &str) -> Option<Signal> {
    match family {
        "EXTRACT" => Some(Signal::Extraction),
        "PREDICT" => Some(Signal::Prediction),
        "TRANSFORM" => Some(Signal::Transformation),
        "FORMAT" => Some(Signal::Formatting),
        "VALIDATE" => Some(Signal::Validation),
        "RANK" => Some(Signal::Ranking),
        "DEBUG" => Some(Signal::Debugging),
        "SEARCH" => Some(Signal::Search),
        "EXECUTE" => Some(Signal::Execution),
        _ => None,
    }
}

/// Structural cues detected by regex over the raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    Structured,
    Probability,
    List,
    Validation,
    Decision,
    Text,
}

static STRUCTURED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[\s\S]*?\}").expect("static pattern"));
static PROBABILITY_WORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(probability|odds|chance|likelihood)\b").expect("static pattern"));
static LIST_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*[-*]\s+").expect("static pattern"));
static VALIDATION_WORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(validate|verify|check compliance|ensure)\b").expect("static pattern"));
static DECISION_WORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(recommend|best option|choose|decision)\b").expect("static pattern"));

pub struct IntentDetector<'a> {
    pack: &'a LanguagePack,
    spec_detector: SpecDetector<'a>,
}

impl<'a> IntentDetector<'a> {
    pub fn new(pack: &'a LanguagePack) -> Self {
        Self {
            pack,
            spec_detector: SpecDetector { pack },
        }
    }

    /// Detect intents, primary first. Exactly one intent is always
    /// returned; the detector never comes back empty.
    pub fn detect(&self, text: &str, doc: &Doc) -> Vec<Intent> {
        let signals = self.detect_signals(text);
        let artifacts = detect_artifacts(text);

        let mut primary = self
            .resolve(text, &signals, &artifacts)
            .or_else(|| self.detect_direct(text, doc))
            .or_else(|| self.detect_imperative(text))
            .or_else(|| self.detect_question(text))
            .unwrap_or_else(|| Intent::new(Req::Analyze, 0.7, ""));

        primary.modifier = self
            .pack
            .vocabulary
            .detect_modifier(primary.token.as_str(), text);
        primary.unmatched_verbs = self.unmatched_verbs(text, doc);

        vec![primary]
    }

    /// SPEC artifacts for the resolved REQ (kept in metadata).
    pub fn detect_specs(&self, text: &str, req: Req) -> Vec<String> {
        let artifacts = detect_artifacts(text);
        self.spec_detector.extract(text, &artifacts, req)
    }

    /// Vocabulary phrases present in the text, mapped to signal kinds.
    /// The triggering phrase is kept for the trigger-word field.
    fn detect_signals(&self, text: &str) -> Vec<(Signal, String)> {
        let lower = text.to_lowercase();
        let mut found: Vec<(Signal, String)> = Vec::new();

        for (family, phrases) in &self.pack.vocabulary.req_tokens {
            let Some(signal) = signal_for_family(family) else {
                continue;
            };
            if found.iter().any(|(s, _)| *s == signal) {
                continue;
            }
            if let Some(phrase) = phrases.iter().find(|p| lower.contains(*p)) {
                if signal == Signal::Formatting && self.should_ignore_format_in(&lower) {
                    continue;
                }
                found.push((signal, (*phrase).to_string()));
            }
        }
        found
    }

    /// Resolution order, first match wins. Falls through to `None` when
    /// neither signals nor artifacts decide.
    fn resolve(&self, text: &str, signals: &[(Signal, String)], artifacts: &[Artifact]) -> Option<Intent> {
        let has_signal = |s: Signal| signals.iter().any(|(sig, _)| *sig == s);
        let trigger = |s: Signal| -> String {
            signals
                .iter()
                .find(|(sig, _)| *sig == s)
                .map(|(_, t)| t.clone())
                .unwrap_or_default()
        };
        let has_artifact = |a: Artifact| artifacts.contains(&a);

        if has_artifact(Artifact::Validation) || has_signal(Signal::Validation) {
            let t = if has_signal(Signal::Validation) {
                trigger(Signal::Validation)
            } else {
                "validation".to_string()
            };
            return Some(Intent::new(Req::Validate, 0.9, t));
        }
        if has_signal(Signal::Extraction) && !has_artifact(Artifact::Probability) {
            return Some(Intent::new(Req::Extract, 0.9, trigger(Signal::Extraction)));
        }
        if has_signal(Signal::Prediction) {
            return Some(Intent::new(Req::Predict, 0.9, trigger(Signal::Prediction)));
        }
        if has_signal(Signal::Transformation) {
            return Some(Intent::new(Req::Transform, 0.9, trigger(Signal::Transformation)));
        }
        if has_signal(Signal::Formatting) {
            return Some(Intent::new(Req::Format, 0.9, trigger(Signal::Formatting)));
        }
        if has_artifact(Artifact::Probability) {
            let req = if self.has_epistemic_grounding(text) {
                Req::Predict
            } else {
                Req::Generate
            };
            return Some(Intent::new(req, 0.9, "probability"));
        }
        if has_artifact(Artifact::Structured)
            || has_artifact(Artifact::Text)
            || has_artifact(Artifact::List)
        {
            return Some(Intent::new(Req::Generate, 0.9, "artifact"));
        }
        if has_signal(Signal::Ranking) && self.explicit_rank(text) {
            return Some(Intent::new(Req::Rank, 0.9, trigger(Signal::Ranking)));
        }
        if has_artifact(Artifact::Decision) {
            return Some(Intent::new(Req::Rank, 0.9, "decision"));
        }
        if has_signal(Signal::Debugging) {
            return Some(Intent::new(Req::Debug, 0.9, trigger(Signal::Debugging)));
        }
        if has_signal(Signal::Search) {
            return Some(Intent::new(Req::Search, 0.9, trigger(Signal::Search)));
        }
        if has_signal(Signal::Execution) {
            return Some(Intent::new(Req::Execute, 0.9, trigger(Signal::Execution)));
        }
        None
    }

    /// Direct synonym matching for REQ families without a signal kind:
    /// multi-word phrase, then verb lemma, then whole word.
    fn detect_direct(&self, text: &str, doc: &Doc) -> Option<Intent> {
        let lower = text.to_lowercase();

        for (family, phrases) in &self.pack.vocabulary.req_tokens {
            let Some(req) = Req::from_family(family) else {
                continue;
            };
            for phrase in phrases {
                if phrase.contains(' ') && lower.contains(phrase) {
                    if req == Req::Rank && !self.explicit_rank(text) {
                        continue;
                    }
                    return Some(Intent::new(req, 1.0, *phrase));
                }
            }
        }

        for word in &doc.words {
            if word.pos != Pos::Verb {
                continue;
            }
            if let Some(family) = self.pack.vocabulary.get_req_family(&word.lemma, text) {
                if let Some(req) = Req::from_family(family) {
                    if req == Req::Rank && !self.explicit_rank(text) {
                        continue;
                    }
                    if req == Req::Format && self.should_ignore_format(doc) {
                        continue;
                    }
                    return Some(Intent::new(req, 0.95, word.text.clone()));
                }
            }
        }

        for (family, phrases) in &self.pack.vocabulary.req_tokens {
            let Some(req) = Req::from_family(family) else {
                continue;
            };
            for phrase in phrases {
                if phrase.contains(' ') {
                    continue;
                }
                let bounded = format!(r"\b{}\b", regex::escape(phrase));
                if Regex::new(&bounded).map(|re| re.is_match(&lower)).unwrap_or(false) {
                    if req == Req::Rank && !self.explicit_rank(text) {
                        continue;
                    }
                    return Some(Intent::new(req, 0.9, *phrase));
                }
            }
        }

        None
    }

    fn detect_imperative(&self, text: &str) -> Option<Intent> {
        let (family, _) = self.pack.vocabulary.detect_imperative_pattern(text)?;
        let req = Req::from_family(family)?;
        let trigger = text.split_whitespace().next().unwrap_or("").to_lowercase();
        Some(Intent::new(req, 0.92, trigger))
    }

    /// A leading question word plus a question mark reads as an
    /// explanation request.
    fn detect_question(&self, text: &str) -> Option<Intent> {
        if self.pack.vocabulary.is_question(text) {
            return Some(Intent::new(Req::Explain, 0.85, "question"));
        }
        None
    }

    fn explicit_rank(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.pack
            .vocabulary
            .rank_triggers
            .iter()
            .any(|t| lower.contains(t))
    }

    /// FORMAT only counts when used verbally; "in JSON format" is a noun.
    fn should_ignore_format(&self, doc: &Doc) -> bool {
        for word in &doc.words {
            if word.lemma == "format" && word.pos != Pos::Verb {
                return true;
            }
            if matches!(word.lemma.as_str(), "structure" | "layout" | "arrangement")
                && matches!(word.pos, Pos::Noun | Pos::Adj)
            {
                return true;
            }
        }
        false
    }

    /// Text-only variant for the signal pass, which runs before a doc is
    /// guaranteed: "format" immediately preceded by a noun-ish word reads
    /// nominal.
    fn should_ignore_format_in(&self, lower: &str) -> bool {
        static NOMINAL_FORMAT: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"\b(?:json|yaml|csv|table|output|file|date|this)\s+format\b")
                .expect("static pattern")
        });
        NOMINAL_FORMAT.is_match(lower)
    }

    fn has_epistemic_grounding(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        let e = &self.pack.vocabulary.epistemic;
        let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));
        has(&e.uncertainty) && (has(&e.future) || has(&e.real_world))
    }

    fn unmatched_verbs(&self, text: &str, doc: &Doc) -> Vec<String> {
        doc.words
            .iter()
            .filter(|w| w.pos == Pos::Verb)
            .filter(|w| self.pack.vocabulary.get_req_family(&w.lemma, text).is_none())
            .map(|w| w.lemma.clone())
            .collect()
    }
}

pub fn detect_artifacts(text: &str) -> Vec<Artifact> {
    let lower = text.to_lowercase();
    let mut artifacts = Vec::new();

    if STRUCTURED_BLOCK.is_match(text) {
        artifacts.push(Artifact::Structured);
    }
    if PROBABILITY_WORDS.is_match(&lower) {
        artifacts.push(Artifact::Probability);
    }
    if LIST_LINE.is_match(text) {
        artifacts.push(Artifact::List);
    }
    if VALIDATION_WORDS.is_match(&lower) {
        artifacts.push(Artifact::Validation);
    }
    if DECISION_WORDS.is_match(&lower) {
        artifacts.push(Artifact::Decision);
    }
    if lower.contains("report") || lower.contains("analysis") {
        artifacts.push(Artifact::Text);
    }

    artifacts
}

/// SPEC extraction: the artifact the output should *be*. Conservative by
/// design; the ontology is closed and format-shaped entries are excluded.
struct SpecDetector<'a> {
    pack: &'a LanguagePack,
}

const SPEC_ONTOLOGY: &[&str] = &[
    "SUPPORT_RESPONSE",
    "TROUBLESHOOTING_GUIDE",
    "BETTING_ODDS",
    "PROBABILITY_DISTRIBUTION",
    "FORECAST",
    "REPORT",
    "SUMMARY",
    "RECOMMENDATION",
    "RANKING",
    "JSON_OBJECT",
    "JSON_SCHEMA",
    "FIELDS",
    "ENTITIES",
    "VALIDATION_RESULT",
];

const NON_DOMAIN_SPECS: &[&str] = &["JSON_OBJECT", "JSON_SCHEMA", "PROBABILITY_DISTRIBUTION"];

static EXPLICIT_OUTPUT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:generate|return|provide|output|produce)\s+(?:a|an|the)?\s*([a-zA-Z_ ]{2,40})")
        .expect("static pattern")
});

impl SpecDetector<'_> {
    fn extract(&self, text: &str, artifacts: &[Artifact], req: Req) -> Vec<String> {
        let mut scored: Vec<(String, i32)> = Vec::new();
        let mut bump = |name: String, points: i32| {
            if let Some(entry) = scored.iter_mut().find(|(n, _)| *n == name) {
                entry.1 += points;
            } else {
                scored.push((name, points));
            }
        };

        for caps in EXPLICIT_OUTPUT.captures_iter(text) {
            if let Some(m) = caps.get(1) {
                let noun = m.as_str().trim().to_uppercase().replace(' ', "_");
                bump(noun, 3);
            }
        }

        for artifact in artifacts {
            match artifact {
                Artifact::Validation => bump("VALIDATION_RESULT".to_string(), 2),
                Artifact::Decision => bump("RECOMMENDATION".to_string(), 2),
                _ => {}
            }
        }

        let lower = text.to_lowercase();
        for (spec, keywords) in &self.pack.vocabulary.spec_keywords {
            if keywords.iter().any(|kw| lower.contains(kw)) {
                bump((*spec).to_string(), 1);
            }
        }

        let mut final_specs: Vec<(String, i32)> = scored
            .into_iter()
            .filter(|(name, _)| {
                SPEC_ONTOLOGY.contains(&name.as_str()) && !NON_DOMAIN_SPECS.contains(&name.as_str())
            })
            .filter(|(name, _)| name != "VALIDATION_RESULT" || req == Req::Validate)
            .collect();
        final_specs.sort_by(|a, b| b.1.cmp(&a.1));
        final_specs.truncate(1);
        final_specs.into_iter().map(|(name, _)| name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clm_language::{Lang, LanguagePack};
    use clm_nlp::LexiconNlp;
    use clm_core::NlpProvider;

    fn detect(text: &str) -> Intent {
        let pack = LanguagePack::load(Lang::En).unwrap();
        let nlp = LexiconNlp::new();
        let doc = nlp.analyze(text);
        IntentDetector::new(&pack).detect(text, &doc).remove(0)
    }

    #[test]
    fn validation_artifact_wins_first() {
        assert_eq!(detect("Please validate the inputs and ensure compliance.").token, Req::Validate);
    }

    #[test]
    fn extraction_signal_beats_generation_artifacts() {
        assert_eq!(detect("Extract the fields and provide a report.").token, Req::Extract);
    }

    #[test]
    fn artifacts_alone_yield_generate() {
        assert_eq!(detect("Prepare an analysis of quarterly figures.").token, Req::Generate);
        assert_eq!(detect("- item one\n- item two").token, Req::Generate);
    }

    #[test]
    fn probability_without_grounding_is_generate() {
        assert_eq!(detect("What is the probability of two dice summing to seven?").token, Req::Generate);
    }

    #[test]
    fn probability_with_epistemic_grounding_is_predict() {
        assert_eq!(detect("What is the chance of rain tomorrow?").token, Req::Predict);
    }

    #[test]
    fn decision_keywords_rank_when_nothing_earlier_fires() {
        assert_eq!(detect("Please choose the best option among these alternatives.").token, Req::Rank);
    }

    #[test]
    fn direct_synonyms_cover_unsignaled_families() {
        assert_eq!(detect("Summarize this customer call transcript").token, Req::Summarize);
        assert_eq!(detect("Analyze this Python code for security issues").token, Req::Analyze);
    }

    #[test]
    fn modifier_binds_to_the_resolved_req() {
        let intent = detect("Summarize the meeting notes briefly");
        assert_eq!(intent.token, Req::Summarize);
        assert_eq!(intent.modifier.as_deref(), Some("BRIEF"));
    }

    #[test]
    fn nominal_format_does_not_trigger_format() {
        let intent = detect("Summarize the call in JSON format");
        assert_ne!(intent.token, Req::Format);
    }

    #[test]
    fn default_is_analyze() {
        assert_eq!(detect("Consider various aspects of the situation").token, Req::Analyze);
    }

    #[test]
    fn every_prompt_yields_exactly_one_req() {
        for text in ["", "xyzzy", "the weather is nice", "???"] {
            let pack = LanguagePack::load(Lang::En).unwrap();
            let doc = LexiconNlp::new().analyze(text);
            let intents = IntentDetector::new(&pack).detect(text, &doc);
            assert_eq!(intents.len(), 1);
        }
    }

    #[test]
    fn spec_detection_is_scored_and_closed() {
        let pack = LanguagePack::load(Lang::En).unwrap();
        let detector = IntentDetector::new(&pack);
        let specs = detector.detect_specs("Generate a forecast for next quarter", Req::Generate);
        assert_eq!(specs, vec!["FORECAST".to_string()]);

        // VALIDATION_RESULT needs REQ=VALIDATE
        let specs = detector.detect_specs("ensure compliance of the record", Req::Generate);
        assert!(specs.is_empty() || specs[0] != "VALIDATION_RESULT");
    }
}
