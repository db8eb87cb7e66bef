//! Target normalization: merge many candidates into one clean target

use clm_core::Target;

/// Primary-selection priority. Unlisted tokens rank last.
const PRIORITY: &[&str] = &[
    "TRANSCRIPT", "CALL", "MEETING", "TICKET", "EMAIL", "REPORT", "DOCUMENT", "CODE", "DATA",
    "QUERY", "CONTENT", "ITEMS", "RESULT", "ANSWER", "CONCEPT",
];

/// Attribute keys a token admits. An empty entry means anything goes.
fn allowed_keys(token: &str) -> Option<&'static [&'static str]> {
    Some(match token {
        "CALL" => &["DURATION", "LANG"],
        "TRANSCRIPT" => &["DURATION", "PARTICIPANTS"],
        "EMAIL" => &["PRIORITY"],
        "DATA" => &["FORMAT", "SIZE", "ROWS"],
        "CODE" => &["LANG", "FILE_TYPE"],
        "DOCUMENT" => &["SUBJECT"],
        "CONTENT" => &["SUBJECT", "FORMAT"],
        "TICKET" => &["STATUS", "ISSUE", "PRIORITY"],
        "CONCEPT" => &["TOPIC"],
        "ANSWER" => &[],
        "ITEMS" => &["SUBJECT"],
        "RESULT" => &["TYPE"],
        "QUERY" => &["LANG", "FORMAT"],
        _ => return None,
    })
}

const BANNED: &[&str] = &["CONTEXT", "TOPIC_HINT", "RAW", "FORMAT_HINT", "CTX", "REQ"];

pub struct TargetNormalizer;

impl TargetNormalizer {
    /// Merge a candidate list into exactly one normalized target. The
    /// primary is chosen by priority; the others contribute attributes
    /// first-writer-wins.
    pub fn normalize_many(&self, targets: Vec<Target>) -> Option<Target> {
        if targets.is_empty() {
            return None;
        }

        let primary_idx = targets
            .iter()
            .enumerate()
            .min_by_key(|(_, t)| {
                PRIORITY
                    .iter()
                    .position(|p| *p == t.token.to_uppercase())
                    .unwrap_or(usize::MAX)
            })
            .map(|(i, _)| i)
            .unwrap_or(0);

        let mut merged = targets[primary_idx].clone();
        for (i, other) in targets.iter().enumerate() {
            if i == primary_idx {
                continue;
            }
            for (k, v) in &other.attributes {
                merged.attributes.entry(k.clone()).or_insert_with(|| v.clone());
            }
            if merged.domain.is_none() {
                merged.domain = other.domain.clone();
            }
        }

        // An explicit DOMAIN attribute never survives the merge
        merged.attributes.remove("DOMAIN");

        Some(self.normalize(merged))
    }

    /// Normalize a single target: upper-case token and domain, drop
    /// banned keys, keys outside the token's allow-set, and values that
    /// just repeat the token.
    pub fn normalize(&self, mut target: Target) -> Target {
        target.token = target.token.trim().to_uppercase();
        target.domain = target
            .domain
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_uppercase);

        let allowed = allowed_keys(&target.token);
        let token = target.token.clone();

        let attributes = std::mem::take(&mut target.attributes);
        for (key, value) in attributes {
            let key = key.trim().to_uppercase();
            if key.is_empty() || BANNED.contains(&key.as_str()) {
                continue;
            }
            if value.trim().to_uppercase() == token {
                continue;
            }
            // An empty allow-set admits anything, same as an unlisted token
            if let Some(allowed) = allowed {
                if !allowed.is_empty() && !allowed.contains(&key.as_str()) {
                    continue;
                }
            }
            target.attributes.insert(key, value);
        }

        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn target(token: &str, attrs: &[(&str, &str)]) -> Target {
        let mut attributes = BTreeMap::new();
        for (k, v) in attrs {
            attributes.insert(k.to_string(), v.to_string());
        }
        Target::new(token).with_attributes(attributes)
    }

    #[test]
    fn priority_picks_transcript_over_call() {
        let normalizer = TargetNormalizer;
        let out = normalizer
            .normalize_many(vec![target("CALL", &[]), target("TRANSCRIPT", &[])])
            .unwrap();
        assert_eq!(out.token, "TRANSCRIPT");
    }

    #[test]
    fn attributes_merge_first_writer_wins() {
        let normalizer = TargetNormalizer;
        let out = normalizer
            .normalize_many(vec![
                target("CODE", &[("LANG", "PYTHON")]),
                target("DATA", &[("LANG", "RUST"), ("FORMAT", "CSV")]),
            ])
            .unwrap();
        assert_eq!(out.token, "CODE");
        assert_eq!(out.attributes.get("LANG").unwrap(), "PYTHON");
        // FORMAT is not allowed on CODE
        assert!(!out.attributes.contains_key("FORMAT"));
    }

    #[test]
    fn banned_and_redundant_attributes_drop() {
        let normalizer = TargetNormalizer;
        let out = normalizer.normalize(target("concept", &[("CTX", "x"), ("TOPIC", "RECURSION")]));
        assert_eq!(out.token, "CONCEPT");
        assert_eq!(out.attributes.get("TOPIC").unwrap(), "RECURSION");
        assert!(!out.attributes.contains_key("CTX"));

        // A value equal to the token itself is redundant tagging
        let out = normalizer.normalize(target("CONCEPT", &[("TOPIC", "concept")]));
        assert!(out.attributes.is_empty());
    }

    #[test]
    fn normalization_is_idempotent() {
        let normalizer = TargetNormalizer;
        let once = normalizer.normalize(target("Call", &[("DURATION", "30"), ("RAW", "x")]));
        let twice = normalizer.normalize(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn domain_attribute_never_survives_merge() {
        let normalizer = TargetNormalizer;
        let out = normalizer
            .normalize_many(vec![target("CODE", &[("DOMAIN", "SECURITY"), ("LANG", "PYTHON")])])
            .unwrap();
        assert!(!out.attributes.contains_key("DOMAIN"));
        assert_eq!(out.domain, None);
    }
}
