//! Transcript keyword tables
//!
//! Everything the transcript analyzer matches against ships here as data:
//! issue taxonomies, severities, resolution cues, action events (including
//! the explicit-only phrase table, which varies by deployment), sentiment
//! emotions, and the small normalization tables (day names, number words,
//! address abbreviations).

/// One emotion with its trigger keywords and intensity.
#[derive(Debug, Clone)]
pub struct Emotion {
    pub name: &'static str,
    pub keywords: Vec<&'static str>,
    pub intensity: f64,
}

/// One detectable action event family.
#[derive(Debug, Clone)]
pub struct ActionFamily {
    /// Vocabulary family name, e.g. TROUBLESHOOT.
    pub family: &'static str,
    /// Canonical event emitted into the token stream, e.g. ESCALATION.
    pub event: &'static str,
    pub keywords: Vec<&'static str>,
}

#[derive(Debug, Clone, Default)]
pub struct TranscriptLexicon {
    /// Issue category -> trigger keywords. Matching is longest-keyword
    /// first across all categories.
    pub issue_type_keywords: Vec<(&'static str, Vec<&'static str>)>,
    pub severity_keywords: Vec<(&'static str, Vec<&'static str>)>,
    pub resolution_keywords: Vec<(&'static str, Vec<&'static str>)>,
    pub billing_cause_keywords: Vec<(&'static str, Vec<&'static str>)>,
    pub technical_issue_map: Vec<(&'static str, Vec<&'static str>)>,
    /// Agent phrases confirming the reported issue, as action events.
    pub issue_confirmation_map: Vec<(&'static str, Vec<&'static str>)>,
    pub troubleshooting_actions: Vec<(&'static str, Vec<&'static str>)>,
    pub action_families: Vec<ActionFamily>,
    /// Events that only count when an exact deployment phrase is present.
    pub explicit_only_actions: Vec<&'static str>,
    pub explicit_action_phrases: Vec<(&'static str, Vec<&'static str>)>,
    pub completion_keywords: Vec<&'static str>,
    pub completion_phrases: Vec<&'static str>,
    pub completion_now_patterns: Vec<&'static str>,
    pub positive_customer_confirmations: Vec<&'static str>,
    pub agent_confirmation_phrases: Vec<&'static str>,
    pub emotions: Vec<Emotion>,
    pub day_names: Vec<(&'static str, &'static str)>,
    pub word_to_num: Vec<(&'static str, i64)>,
    pub address_abbreviations: Vec<(&'static str, &'static str)>,
}

/// A flattened keyword index: (keyword, category) sorted by keyword length
/// descending so multi-word phrases win over their substrings.
pub type KeywordIndex = Vec<(String, String)>;

pub fn build_keyword_index(table: &[(&'static str, Vec<&'static str>)]) -> KeywordIndex {
    let mut pairs: Vec<(String, String)> = table
        .iter()
        .flat_map(|(category, keywords)| {
            keywords
                .iter()
                .map(move |kw| (kw.to_lowercase(), (*category).to_string()))
        })
        .collect();
    pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
    pairs
}

/// First category whose keyword occurs in the text.
pub fn lookup_category(text: &str, index: &KeywordIndex) -> Option<String> {
    index
        .iter()
        .find(|(keyword, _)| text.contains(keyword.as_str()))
        .map(|(_, category)| category.clone())
}

impl TranscriptLexicon {
    pub fn explicit_phrases_for(&self, event: &str) -> &[&'static str] {
        self.explicit_action_phrases
            .iter()
            .find(|(name, _)| *name == event)
            .map(|(_, phrases)| phrases.as_slice())
            .unwrap_or(&[])
    }

    pub fn day_code(&self, name: &str) -> Option<&'static str> {
        let name = name.to_lowercase();
        self.day_names
            .iter()
            .find(|(day, _)| *day == name)
            .map(|(_, code)| *code)
    }

    pub fn word_number(&self, word: &str) -> Option<i64> {
        let word = word.to_lowercase();
        self.word_to_num
            .iter()
            .find(|(w, _)| *w == word)
            .map(|(_, n)| *n)
    }
}
