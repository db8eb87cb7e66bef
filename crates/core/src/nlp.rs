//! NLP provider contract
//!
//! The encoders treat linguistic analysis as a borrowed capability: any
//! provider that can tokenize with lemma/POS attributes, segment sentences,
//! iterate noun chunks, and recognize named entities satisfies the
//! pipeline. `clm-nlp` ships the default rule-based provider.

use serde::{Deserialize, Serialize};

/// Coarse part-of-speech tags, after the Universal Dependencies set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pos {
    Verb,
    Noun,
    Propn,
    Adj,
    Adv,
    Pron,
    Det,
    Adp,
    Num,
    Punct,
    Other,
}

/// A single analyzed token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub lemma: String,
    pub pos: Pos,
}

/// Entity labels: the standard NER set plus ruler-defined domain labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityLabel {
    Person,
    Org,
    Gpe,
    Loc,
    Date,
    Time,
    Money,
    Cardinal,
    Quantity,
    Url,
    Custom(String),
}

/// A recognized entity spanning `tokens` (half-open word-index range).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
}

/// An analyzed document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Doc {
    pub text: String,
    pub words: Vec<Word>,
    pub entities: Vec<Entity>,
    /// Half-open word-index ranges of noun chunks, in document order.
    pub noun_chunks: Vec<(usize, usize)>,
    /// Half-open word-index ranges of sentences.
    pub sentences: Vec<(usize, usize)>,
}

impl Doc {
    /// Noun chunk surface texts, in document order.
    pub fn noun_chunk_texts(&self) -> Vec<String> {
        self.noun_chunks
            .iter()
            .map(|&(start, end)| self.span_text(start, end))
            .collect()
    }

    pub fn span_text(&self, start: usize, end: usize) -> String {
        self.words[start..end.min(self.words.len())]
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Lemmas of every verb, in document order.
    pub fn verb_lemmas(&self) -> Vec<String> {
        self.words
            .iter()
            .filter(|w| w.pos == Pos::Verb)
            .map(|w| w.lemma.clone())
            .collect()
    }

    pub fn entities_labeled<'a>(&'a self, label: &'a EntityLabel) -> impl Iterator<Item = &'a Entity> + 'a {
        self.entities.iter().filter(move |e| &e.label == label)
    }
}

/// The capability the encoders borrow. Implementations must be
/// deterministic: the same text always yields the same `Doc`.
pub trait NlpProvider: Send + Sync {
    fn analyze(&self, text: &str) -> Doc;
}
