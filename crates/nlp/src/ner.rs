//! Named-entity recognition from ordered label+regex rules

use clm_core::{ClmError, Entity, EntityLabel, Result};
use regex::Regex;

/// One ruler entry. When the pattern has a first capture group, the group
/// is the entity text; otherwise the whole match is.
pub struct EntityRule {
    pub label: EntityLabel,
    pub pattern: Regex,
}

pub struct EntityRecognizer {
    rules: Vec<EntityRule>,
}

fn custom(label: &str) -> EntityLabel {
    EntityLabel::Custom(label.to_string())
}

impl EntityRecognizer {
    /// Rule order is priority order: an earlier rule's span blocks any
    /// later rule that overlaps it.
    pub fn with_default_rules() -> Self {
        let rule = |label: EntityLabel, pattern: &str| EntityRule {
            label,
            pattern: Regex::new(pattern).expect("static pattern"),
        };

        let rules = vec![
            rule(EntityLabel::Url, r"https?://[^\s<>'\x22{}|\\^`\[\]]+"),
            rule(
                custom("EMAIL"),
                r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
            ),
            rule(EntityLabel::Money, r"\$\d+(?:,\d{3})*(?:\.\d{1,2})?"),
            rule(
                EntityLabel::Person,
                r"(?:[Mm]y name is|[Tt]his is|[Ii]'?m|[Ii] am)\s+([A-Z][a-z]+)\b",
            ),
            rule(
                EntityLabel::Person,
                r"(?:[Tt]hanks|[Tt]hank you),?\s+([A-Z][a-z]+)\b",
            ),
            rule(
                EntityLabel::Org,
                r"\b([A-Z][A-Za-z&]+(?:\s+[A-Z][A-Za-z&]+)*\s+(?:Corp|Inc|LLC|Ltd|Company|Technologies|Solutions|Group))\b",
            ),
            rule(
                EntityLabel::Gpe,
                r"\b(New York|Los Angeles|San Francisco|Chicago|Seattle|Austin|Boston|Denver|Dallas|Miami|Portland|Atlanta|London|Toronto)\b",
            ),
            rule(
                custom("TRACKING_NUMBER"),
                r"\b(?:1Z[0-9A-Z]{8,}|(?:TRK|PL)-?\d{6,})\b",
            ),
            rule(custom("CLAIM_NUMBER"), r"\b(?:CLM|CLAIM)-?\d{4,}\b"),
            rule(custom("TICKET_NUMBER"), r"\b(?:TK|TKT)-?\d{4,}\b"),
            rule(custom("CASE_NUMBER"), r"\bCS-?\d{5,}\b"),
            rule(custom("ORDER_NUMBER"), r"\b(?:ORD|PO)-?\d{4,}\b"),
            rule(custom("PRODUCT_MODEL"), r"\b[A-Z]{2,4}-\d{2,4}[A-Z]\b"),
            // Same surface shape as a phone number; resolved by context below
            rule(custom("ACCOUNT_NUMBER"), r"\b\d{3}-\d{3}-\d{4}\b"),
            rule(
                custom("PHONE_NUMBER"),
                r"\(\d{3}\)\s*\d{3}-\d{4}|\b\d{3}-\d{3}-\d{4}\b|\b\d{10}\b",
            ),
            rule(
                EntityLabel::Time,
                r"\b\d{1,2}:\d{2}\s?(?:am|pm|AM|PM)?\b|\b\d{1,2}\s?(?:am|pm|AM|PM)\b",
            ),
            rule(
                EntityLabel::Date,
                r"(?i)\b(monday|tuesday|wednesday|thursday|friday|saturday|sunday|today|tomorrow|yesterday)\b",
            ),
            rule(EntityLabel::Cardinal, r"\b\d+\b"),
        ];

        Self { rules }
    }

    pub fn add_rule(&mut self, label: &str, pattern: &str) -> Result<()> {
        let compiled = Regex::new(pattern).map_err(|source| ClmError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        // Custom rules outrank the built-in fallbacks
        self.rules.insert(
            0,
            EntityRule {
                label: custom(label),
                pattern: compiled,
            },
        );
        Ok(())
    }

    pub fn recognize(&self, text: &str, offsets: &[(usize, usize)]) -> Vec<Entity> {
        let mut taken: Vec<(usize, usize)> = Vec::new();
        let mut found: Vec<(usize, Entity)> = Vec::new();

        for rule in &self.rules {
            for caps in rule.pattern.captures_iter(text) {
                let m = caps.get(1).or_else(|| caps.get(0)).expect("match exists");
                let (start, end) = (m.start(), m.end());
                if taken.iter().any(|&(s, e)| start < e && end > s) {
                    continue;
                }

                let label = resolve_label(&rule.label, text, start);
                taken.push((start, end));
                found.push((
                    start,
                    Entity {
                        text: m.as_str().to_string(),
                        label,
                        start: token_index(offsets, start),
                        end: token_index(offsets, end.saturating_sub(1)) + 1,
                    },
                ));
            }
        }

        found.sort_by_key(|(start, _)| *start);
        found.into_iter().map(|(_, e)| e).collect()
    }
}

/// The 3-3-4 digit shape is an account number only when the preceding
/// context mentions an account; otherwise it reads as a phone number.
fn resolve_label(label: &EntityLabel, text: &str, start: usize) -> EntityLabel {
    if let EntityLabel::Custom(name) = label {
        if name == "ACCOUNT_NUMBER" {
            let window_start = start.saturating_sub(40);
            let preceding = text[window_start..start].to_lowercase();
            if !(preceding.contains("account") || preceding.contains("acct")) {
                return EntityLabel::Custom("PHONE_NUMBER".to_string());
            }
        }
    }
    label.clone()
}

/// Word index containing the byte offset, or the nearest following word.
fn token_index(offsets: &[(usize, usize)], byte: usize) -> usize {
    for (i, &(_, e)) in offsets.iter().enumerate() {
        if byte < e {
            return i;
        }
    }
    offsets.len().saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earlier_rules_block_overlapping_later_rules() {
        let recognizer = EntityRecognizer::with_default_rules();
        let entities = recognizer.recognize("charged $14.99 today", &[(0, 7), (8, 14), (15, 20)]);
        let money: Vec<_> = entities
            .iter()
            .filter(|e| e.label == EntityLabel::Money)
            .collect();
        assert_eq!(money.len(), 1);
        // The digits inside the amount must not re-match as CARDINAL
        assert!(!entities
            .iter()
            .any(|e| e.label == EntityLabel::Cardinal && e.text.contains("14")));
    }

    #[test]
    fn tracking_number_matches_prefixed_ids() {
        let recognizer = EntityRecognizer::with_default_rules();
        let entities = recognizer.recognize("tracking number PL-7294008", &[(0, 8), (9, 15), (16, 26)]);
        assert!(entities
            .iter()
            .any(|e| e.label == EntityLabel::Custom("TRACKING_NUMBER".into())
                && e.text == "PL-7294008"));
    }
}
