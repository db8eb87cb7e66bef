//! Vocabulary: per-language keyword sets behind the prompt pipeline
//!
//! The struct holds data only; language modules fill it in. Lookups keep
//! declaration order so runs are reproducible across processes.

/// Epistemic keyword buckets used to ground probability requests.
#[derive(Debug, Clone, Default)]
pub struct EpistemicKeywords {
    pub future: Vec<&'static str>,
    pub uncertainty: Vec<&'static str>,
    pub real_world: Vec<&'static str>,
}

/// Modifier keywords bound to a REQ family, e.g. ANALYZE -> DEEP.
#[derive(Debug, Clone)]
pub struct ModifierSet {
    pub family: &'static str,
    pub modifiers: Vec<(&'static str, Vec<&'static str>)>,
}

/// Imperative sentence pattern: leading triggers resolving to a REQ family
/// and a default target.
#[derive(Debug, Clone)]
pub struct ImperativePattern {
    pub triggers: Vec<&'static str>,
    pub req_family: &'static str,
    pub target: &'static str,
}

#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    /// REQ families with trigger synonyms, in priority order. Families
    /// without a canonical REQ (LIST, CALCULATE) only drive target
    /// dispatch.
    pub req_tokens: Vec<(&'static str, Vec<&'static str>)>,
    /// TARGET tokens with trigger synonyms, in priority order.
    pub target_tokens: Vec<(&'static str, Vec<&'static str>)>,
    /// Verbs excluded from intent detection.
    pub noise_verbs: Vec<&'static str>,
    /// Verb -> surrounding patterns that make it non-actionable.
    pub context_filters: Vec<(&'static str, Vec<&'static str>)>,
    /// Extraction field names, declaration order is output order.
    pub extract_fields: Vec<&'static str>,
    pub imperative_patterns: Vec<ImperativePattern>,
    pub question_words: Vec<&'static str>,
    pub demonstratives: Vec<&'static str>,
    pub pronouns: Vec<&'static str>,
    pub modals: Vec<&'static str>,
    pub action_verbs: Vec<&'static str>,
    pub stopwords: Vec<&'static str>,
    pub code_indicators: Vec<&'static str>,
    pub quantifier_words: Vec<&'static str>,
    pub meeting_words: Vec<&'static str>,
    pub proposal_words: Vec<&'static str>,
    pub compound_phrases: Vec<(&'static str, &'static str)>,
    pub domain_candidates: Vec<(&'static str, Vec<&'static str>)>,
    pub domains_priority: Vec<&'static str>,
    pub technical_lemmas: Vec<&'static str>,
    pub finance_lemmas: Vec<&'static str>,
    pub support_lemmas: Vec<&'static str>,
    pub epistemic: EpistemicKeywords,
    pub concept_phrases: Vec<&'static str>,
    pub technical_concepts: Vec<&'static str>,
    pub modifiers: Vec<ModifierSet>,
    pub rank_triggers: Vec<&'static str>,
    pub spec_keywords: Vec<(&'static str, Vec<&'static str>)>,
}

impl Vocabulary {
    /// REQ family for a single word, honoring noise and context filters.
    pub fn get_req_family(&self, word: &str, context: &str) -> Option<&'static str> {
        let word = word.to_lowercase();
        if self.noise_verbs.contains(&word.as_str()) {
            return None;
        }
        if let Some((_, patterns)) = self
            .context_filters
            .iter()
            .find(|(verb, _)| *verb == word.as_str())
        {
            let context = context.to_lowercase();
            if patterns.iter().any(|p| context.contains(p)) {
                return None;
            }
        }
        self.req_tokens
            .iter()
            .find(|(_, synonyms)| synonyms.contains(&word.as_str()))
            .map(|(family, _)| *family)
    }

    /// TARGET token for a word or phrase.
    pub fn get_target_token(&self, word: &str) -> Option<&'static str> {
        let word = word.to_lowercase();
        self.target_tokens
            .iter()
            .find(|(_, synonyms)| synonyms.contains(&word.as_str()))
            .map(|(token, _)| *token)
    }

    /// Synonyms of one REQ family.
    pub fn req_synonyms(&self, family: &str) -> &[&'static str] {
        self.req_tokens
            .iter()
            .find(|(name, _)| *name == family)
            .map(|(_, synonyms)| synonyms.as_slice())
            .unwrap_or(&[])
    }

    /// Synonyms of one TARGET token.
    pub fn target_synonyms(&self, token: &str) -> &[&'static str] {
        self.target_tokens
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, synonyms)| synonyms.as_slice())
            .unwrap_or(&[])
    }

    /// Leading imperative pattern, e.g. "List ..." -> (GENERATE, ITEMS).
    pub fn detect_imperative_pattern(&self, text: &str) -> Option<(&'static str, &'static str)> {
        let text = text.to_lowercase();
        let text = text.trim_start();
        for pattern in &self.imperative_patterns {
            for trigger in &pattern.triggers {
                if text.starts_with(&format!("{trigger} ")) {
                    return Some((pattern.req_family, pattern.target));
                }
            }
        }
        None
    }

    /// Whether the text reads as a question led by a question word.
    pub fn is_question(&self, text: &str) -> bool {
        let trimmed = text.trim();
        if !trimmed.ends_with('?') {
            return false;
        }
        let lower = trimmed.to_lowercase();
        self.question_words.iter().any(|w| lower.starts_with(w))
    }

    /// Modifier for a REQ family found in the text, at most one.
    pub fn detect_modifier(&self, family: &str, text: &str) -> Option<String> {
        let text = text.to_lowercase();
        let set = self.modifiers.iter().find(|m| m.family == family)?;
        for (modifier, keywords) in &set.modifiers {
            if keywords.iter().any(|kw| text.contains(kw)) {
                return Some((*modifier).to_string());
            }
        }
        None
    }
}
