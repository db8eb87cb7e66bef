//! Rule-based NLP provider
//!
//! `LexiconNlp` implements the `NlpProvider` contract without a model
//! download: lexicon-driven POS tagging, a suffix lemmatizer, a shallow
//! noun chunker, and NER built from ordered label+regex entity rules with
//! a context check for account-vs-phone numbers. Deterministic by
//! construction: the same text always produces the same `Doc`.

mod lexicon;
mod ner;
mod tagger;

pub use ner::EntityRule;

use clm_core::{Doc, NlpProvider, Result};

/// Default NLP provider.
pub struct LexiconNlp {
    ner: ner::EntityRecognizer,
}

impl LexiconNlp {
    pub fn new() -> Self {
        Self {
            ner: ner::EntityRecognizer::with_default_rules(),
        }
    }

    /// Add ruler patterns on top of the defaults. Labels are free-form and
    /// surface as `EntityLabel::Custom`. Fails fast on an uncompilable
    /// pattern.
    pub fn with_entity_rules(rules: &[(&str, &str)]) -> Result<Self> {
        let mut recognizer = ner::EntityRecognizer::with_default_rules();
        for (label, pattern) in rules {
            recognizer.add_rule(label, pattern)?;
        }
        tracing::debug!(count = rules.len(), "added entity ruler patterns");
        Ok(Self { ner: recognizer })
    }
}

impl Default for LexiconNlp {
    fn default() -> Self {
        Self::new()
    }
}

impl NlpProvider for LexiconNlp {
    fn analyze(&self, text: &str) -> Doc {
        let (words, offsets, sentences) = tagger::tag(text);
        let noun_chunks = tagger::noun_chunks(&words);
        let entities = self.ner.recognize(text, &offsets);

        Doc {
            text: text.to_string(),
            words,
            entities,
            noun_chunks,
            sentences,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clm_core::{EntityLabel, Pos};

    fn doc(text: &str) -> Doc {
        LexiconNlp::new().analyze(text)
    }

    #[test]
    fn imperative_first_word_is_a_verb() {
        let d = doc("Analyze this Python code for security issues");
        assert_eq!(d.words[0].pos, Pos::Verb);
        assert_eq!(d.words[0].lemma, "analyze");
    }

    #[test]
    fn nouns_stay_nouns_mid_sentence() {
        let d = doc("Summarize this customer call transcript");
        let call = d.words.iter().find(|w| w.text == "call").unwrap();
        assert_eq!(call.pos, Pos::Noun);
        let transcript = d.words.iter().find(|w| w.text == "transcript").unwrap();
        assert_eq!(transcript.pos, Pos::Noun);
    }

    #[test]
    fn capitalized_mid_sentence_is_proper_noun() {
        let d = doc("Analyze this Python code");
        let python = d.words.iter().find(|w| w.text == "Python").unwrap();
        assert_eq!(python.pos, Pos::Propn);
    }

    #[test]
    fn noun_chunks_cover_nominal_runs() {
        let d = doc("Summarize this customer call transcript");
        let chunks = d.noun_chunk_texts();
        assert!(chunks.iter().any(|c| c.contains("customer call transcript")));
    }

    #[test]
    fn person_after_introduction_phrase() {
        let d = doc("Hello, my name is Sarah and I will help you today");
        let persons: Vec<_> = d.entities_labeled(&EntityLabel::Person).collect();
        assert_eq!(persons.len(), 1);
        assert_eq!(persons[0].text, "Sarah");
    }

    #[test]
    fn money_amounts_are_recognized() {
        let d = doc("I was charged $29.99 twice on my statement");
        let money: Vec<_> = d.entities_labeled(&EntityLabel::Money).collect();
        assert_eq!(money[0].text, "$29.99");
    }

    #[test]
    fn account_context_wins_over_phone_shape() {
        let d = doc("My account number is 847-392-1045");
        let label = EntityLabel::Custom("ACCOUNT_NUMBER".to_string());
        assert!(d.entities_labeled(&label).next().is_some());

        let d = doc("Call me at 555-123-4567");
        let label = EntityLabel::Custom("PHONE_NUMBER".to_string());
        assert!(d.entities_labeled(&label).next().is_some());
    }

    #[test]
    fn emails_and_urls_survive_tokenization() {
        let d = doc("Reach me at jane.doe@example.com or https://example.com/help");
        assert!(d
            .entities_labeled(&EntityLabel::Custom("EMAIL".to_string()))
            .any(|e| e.text == "jane.doe@example.com"));
        assert!(d
            .entities_labeled(&EntityLabel::Url)
            .any(|e| e.text.starts_with("https://")));
    }

    #[test]
    fn cardinal_numbers_fall_through() {
        let d = doc("Give me 5 tips");
        let cardinals: Vec<_> = d.entities_labeled(&EntityLabel::Cardinal).collect();
        assert_eq!(cardinals[0].text, "5");
    }

    #[test]
    fn custom_rules_are_applied() {
        let nlp = LexiconNlp::with_entity_rules(&[("SKU", r"\bSKU-\d{4}\b")]).unwrap();
        let d = nlp.analyze("Please restock SKU-1234 soon");
        assert!(d
            .entities_labeled(&EntityLabel::Custom("SKU".to_string()))
            .next()
            .is_some());
    }

    #[test]
    fn invalid_custom_rule_is_fatal() {
        assert!(LexiconNlp::with_entity_rules(&[("BAD", "(unclosed")]).is_err());
    }

    #[test]
    fn analysis_is_deterministic() {
        let text = "Agent: my name is Sarah. Customer: my internet keeps dropping at 9am";
        let a = format!("{:?}", doc(text));
        let b = format!("{:?}", doc(text));
        assert_eq!(a, b);
    }
}
