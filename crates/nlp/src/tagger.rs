//! Tokenization, POS tagging, lemmatization, and noun chunking

use std::collections::{HashMap, HashSet};

use clm_core::{Pos, Word};
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::lexicon;

/// Spans kept whole through word segmentation: URLs, emails, amounts.
static PROTECTED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"https?://[^\s<>\x22]+",
        r"|[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}",
        r"|\$\d+(?:,\d{3})*(?:\.\d+)?",
    ))
    .expect("static pattern")
});

static VERB_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| lexicon::VERBS.iter().copied().collect());
static DET_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| lexicon::DETERMINERS.iter().copied().collect());
static PRON_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| lexicon::PRONOUNS.iter().copied().collect());
static PREP_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| lexicon::PREPOSITIONS.iter().copied().collect());
static AUX_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| lexicon::AUXILIARIES.iter().copied().collect());
static CONJ_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| lexicon::CONJUNCTIONS.iter().copied().collect());
static ADV_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| lexicon::ADVERBS.iter().copied().collect());
static ADJ_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| lexicon::ADJECTIVES.iter().copied().collect());
static IRREGULAR: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| lexicon::IRREGULAR_LEMMAS.iter().copied().collect());

/// Word spans as byte ranges: unicode word boundaries, with protected
/// spans (URLs, emails, money) kept whole.
fn word_spans(text: &str) -> Vec<(usize, usize)> {
    let protected: Vec<(usize, usize)> = PROTECTED
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();

    let mut spans: Vec<(usize, usize)> = Vec::new();
    for (start, segment) in text.split_word_bound_indices() {
        if segment.trim().is_empty() {
            continue;
        }
        let end = start + segment.len();
        if let Some(&(ps, pe)) = protected
            .iter()
            .find(|&&(ps, pe)| start >= ps && end <= pe)
        {
            if spans.last() != Some(&(ps, pe)) {
                spans.push((ps, pe));
            }
            continue;
        }
        spans.push((start, end));
    }
    spans
}

/// Tokenize and tag. Returns the words, their byte-offset ranges, and the
/// sentence ranges (half-open word indices).
pub fn tag(text: &str) -> (Vec<Word>, Vec<(usize, usize)>, Vec<(usize, usize)>) {
    let mut words = Vec::new();
    let mut offsets = Vec::new();
    let mut sent_starts = Vec::new();

    let mut prev_end = 0usize;
    let mut sentence_start = true;
    for (start, end) in word_spans(text) {
        // A blank line also opens a sentence
        if text[prev_end..start].matches('\n').count() >= 1 {
            sentence_start = true;
        }
        sent_starts.push(sentence_start);
        offsets.push((start, end));
        let token = &text[start..end];
        sentence_start = matches!(token, "." | "!" | "?");
        prev_end = end;

        words.push(make_word(token));
    }

    // Contextual passes need the neighbors, so they run after the first pass
    for i in 0..words.len() {
        if words[i].pos == Pos::Noun && is_verb_in_context(&words, i, sent_starts[i]) {
            words[i].pos = Pos::Verb;
        }
    }
    promote_proper_nouns(&mut words, &sent_starts);

    let sentences = sentence_ranges(&sent_starts);
    (words, offsets, sentences)
}

fn make_word(token: &str) -> Word {
    let lower = token.to_lowercase();

    let pos = if !token.chars().any(|c| c.is_alphanumeric()) {
        Pos::Punct
    } else if token.starts_with('$') || token.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        Pos::Num
    } else if DET_SET.contains(lower.as_str()) {
        Pos::Det
    } else if PRON_SET.contains(lower.as_str()) {
        Pos::Pron
    } else if PREP_SET.contains(lower.as_str()) {
        Pos::Adp
    } else if AUX_SET.contains(lower.as_str()) || CONJ_SET.contains(lower.as_str()) {
        Pos::Other
    } else if ADV_SET.contains(lower.as_str()) || (lower.ends_with("ly") && lower.len() > 4) {
        Pos::Adv
    } else if ADJ_SET.contains(lower.as_str()) {
        Pos::Adj
    } else {
        Pos::Noun
    };

    Word {
        lemma: lemma_of(&lower),
        text: token.to_string(),
        pos,
    }
}

/// Promote a noun-tagged word to verb when its lemma is a known verb and
/// the position reads verbal: sentence-initial (imperative), after "to",
/// after an auxiliary or subject pronoun, or carrying -ing/-ed morphology.
fn is_verb_in_context(words: &[Word], i: usize, sentence_start: bool) -> bool {
    let lower = words[i].text.to_lowercase();
    if !VERB_SET.contains(words[i].lemma.as_str()) {
        return false;
    }
    if sentence_start {
        return true;
    }
    if (lower.ends_with("ing") || lower.ends_with("ed")) && lower != words[i].lemma {
        return true;
    }
    if i > 0 {
        let prev = words[i - 1].text.to_lowercase();
        if prev == "to" || prev == "please" || prev == "and" {
            return true;
        }
        if AUX_SET.contains(prev.as_str()) {
            return true;
        }
        if matches!(prev.as_str(), "i" | "we" | "you" | "they" | "he" | "she" | "it") {
            return true;
        }
    }
    false
}

fn sentence_ranges(sent_starts: &[bool]) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut start = 0usize;
    for (i, &is_start) in sent_starts.iter().enumerate() {
        if is_start && i > start {
            ranges.push((start, i));
            start = i;
        }
    }
    if start < sent_starts.len() {
        ranges.push((start, sent_starts.len()));
    }
    ranges
}

/// Lemmatize a lowercase token: irregular table first, then suffix rules
/// validated against the verb lexicon.
pub fn lemma_of(lower: &str) -> String {
    if let Some(base) = IRREGULAR.get(lower) {
        return (*base).to_string();
    }
    if VERB_SET.contains(lower) {
        return lower.to_string();
    }

    if let Some(stem) = lower.strip_suffix("ing") {
        if let Some(base) = resolve_stem(stem) {
            return base;
        }
    }
    if let Some(stem) = lower.strip_suffix("ed") {
        if let Some(base) = resolve_stem(stem) {
            return base;
        }
    }
    if let Some(stem) = lower.strip_suffix("ies") {
        if stem.len() >= 2 {
            return format!("{stem}y");
        }
    }
    if lower.ends_with("sses") || lower.ends_with("ches") || lower.ends_with("shes") {
        return lower[..lower.len() - 2].to_string();
    }
    if let Some(stem) = lower.strip_suffix('s') {
        if !stem.ends_with('s') && stem.len() >= 2 {
            return stem.to_string();
        }
    }
    lower.to_string()
}

/// Try plain stem, stem+e, and un-doubled final consonant against the
/// verb lexicon.
fn resolve_stem(stem: &str) -> Option<String> {
    if stem.len() < 2 {
        return None;
    }
    if VERB_SET.contains(stem) {
        return Some(stem.to_string());
    }
    let with_e = format!("{stem}e");
    if VERB_SET.contains(with_e.as_str()) {
        return Some(with_e);
    }
    let bytes = stem.as_bytes();
    if bytes.len() >= 2 && bytes[bytes.len() - 1] == bytes[bytes.len() - 2] {
        let undoubled = &stem[..stem.len() - 1];
        if VERB_SET.contains(undoubled) {
            return Some(undoubled.to_string());
        }
    }
    None
}

/// A chunk is a maximal Det/Adj/Noun/Propn/Num run containing at least one
/// Noun or Propn.
pub fn noun_chunks(words: &[Word]) -> Vec<(usize, usize)> {
    let mut chunks = Vec::new();
    let mut start: Option<usize> = None;
    let mut has_nominal = false;

    for (i, w) in words.iter().enumerate() {
        let chunkable = matches!(w.pos, Pos::Det | Pos::Adj | Pos::Noun | Pos::Propn | Pos::Num);
        if chunkable {
            if start.is_none() {
                start = Some(i);
                has_nominal = false;
            }
            if matches!(w.pos, Pos::Noun | Pos::Propn) {
                has_nominal = true;
            }
        } else if let Some(s) = start.take() {
            if has_nominal {
                chunks.push((s, i));
            }
        }
    }
    if let Some(s) = start {
        if has_nominal {
            chunks.push((s, words.len()));
        }
    }
    chunks
}

/// Mark capitalized non-initial alphabetic words as proper nouns.
pub fn promote_proper_nouns(words: &mut [Word], sent_starts: &[bool]) {
    for (i, w) in words.iter_mut().enumerate() {
        if w.pos == Pos::Noun
            && !sent_starts.get(i).copied().unwrap_or(false)
            && w.text.chars().next().is_some_and(|c| c.is_uppercase())
        {
            w.pos = Pos::Propn;
        }
    }
}
