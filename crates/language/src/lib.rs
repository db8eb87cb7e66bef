//! Language bundles for the CLM compressor
//!
//! A `LanguagePack` carries everything language-specific the encoders
//! consume: the prompt vocabulary, the compiled pattern rules, and the
//! transcript keyword tables. Packs are loaded once at configuration time
//! and immutable afterwards; pattern compilation failures abort
//! construction.

pub mod en;
pub mod rules;
pub mod transcript;
pub mod vocabulary;

use clm_core::{ClmError, Result};
use serde::{Deserialize, Serialize};

pub use rules::{CompiledRules, DurationUnit, RuleSet};
pub use transcript::{
    build_keyword_index, lookup_category, ActionFamily, Emotion, KeywordIndex, TranscriptLexicon,
};
pub use vocabulary::{EpistemicKeywords, ImperativePattern, ModifierSet, Vocabulary};

/// Supported pack languages. Only English ships a bundle today; the other
/// variants are accepted by configuration and rejected at load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Es,
    Pt,
    Fr,
}

impl Lang {
    pub fn code(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Es => "es",
            Lang::Pt => "pt",
            Lang::Fr => "fr",
        }
    }
}

/// Immutable language bundle shared by all encoders.
pub struct LanguagePack {
    pub lang: Lang,
    pub vocabulary: Vocabulary,
    pub rules: CompiledRules,
    pub transcript: TranscriptLexicon,
}

impl LanguagePack {
    /// Load and compile the bundle for `lang`.
    pub fn load(lang: Lang) -> Result<Self> {
        match lang {
            Lang::En => {
                let pack = Self {
                    lang,
                    vocabulary: en::vocabulary(),
                    rules: en::rules().compile()?,
                    transcript: en::transcript(),
                };
                tracing::debug!(
                    lang = lang.code(),
                    req_families = pack.vocabulary.req_tokens.len(),
                    "loaded language pack"
                );
                Ok(pack)
            }
            other => Err(ClmError::UnsupportedLanguage(other.code().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_pack_loads() {
        let pack = LanguagePack::load(Lang::En).unwrap();
        assert_eq!(pack.lang, Lang::En);
        assert!(!pack.vocabulary.req_tokens.is_empty());
    }

    #[test]
    fn other_languages_are_rejected() {
        assert!(matches!(
            LanguagePack::load(Lang::Pt),
            Err(ClmError::UnsupportedLanguage(code)) if code == "pt"
        ));
    }
}
