//! Entity extraction into named buckets
//!
//! The NLP provider's entities are routed into uppercase-normalized
//! buckets; EMAIL, PHONE, and URL regexes run as a fallback so those
//! buckets fill even when the provider misses them.

use std::collections::BTreeMap;

use clm_core::{Doc, EntityLabel};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("static pattern")
});
static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(\d{3}\)\s*\d{3}-\d{4}|\b\d{3}-\d{3}-\d{4}\b|\b\d{10}\b").expect("static pattern")
});
static URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s<>'\x22{}|\\^`\[\]]+").expect("static pattern"));

pub const BUCKETS: &[&str] = &[
    "persons",
    "organizations",
    "locations",
    "dates",
    "times",
    "money",
    "account_numbers",
    "tracking_numbers",
    "claim_numbers",
    "ticket_numbers",
    "case_numbers",
    "order_numbers",
    "product_models",
    "emails",
    "phone_numbers",
    "urls",
];

pub struct EntityExtractor;

impl EntityExtractor {
    /// Bucketed entities for one turn, deduplicated and sorted. Values
    /// are upper-cased except URLs and web-ish strings.
    pub fn extract(&self, text: &str, doc: &Doc) -> BTreeMap<String, Vec<String>> {
        let mut buckets: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for bucket in BUCKETS {
            buckets.insert((*bucket).to_string(), Vec::new());
        }

        let mut push = |bucket: &str, value: &str| {
            if let Some(values) = buckets.get_mut(bucket) {
                values.push(value.to_string());
            }
        };

        for entity in &doc.entities {
            match &entity.label {
                EntityLabel::Person => push("persons", &entity.text),
                EntityLabel::Org => push("organizations", &entity.text),
                EntityLabel::Gpe | EntityLabel::Loc => push("locations", &entity.text),
                EntityLabel::Date => push("dates", &entity.text),
                EntityLabel::Time => push("times", &entity.text),
                EntityLabel::Money => push("money", &entity.text),
                EntityLabel::Url => push("urls", &entity.text),
                EntityLabel::Custom(name) => {
                    let bucket = format!("{}s", name.to_lowercase());
                    push(&bucket, &entity.text);
                }
                EntityLabel::Cardinal | EntityLabel::Quantity => {}
            }
        }

        for m in EMAIL.find_iter(text) {
            push("emails", m.as_str());
        }
        for m in PHONE.find_iter(text) {
            push("phone_numbers", m.as_str());
        }
        for m in URL.find_iter(text) {
            push("urls", m.as_str());
        }

        for values in buckets.values_mut() {
            let mut normalized: Vec<String> = values
                .iter()
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(|v| {
                    if v.starts_with("http") || v.starts_with("www") {
                        v.to_string()
                    } else {
                        v.to_uppercase()
                    }
                })
                .collect();
            normalized.sort();
            normalized.dedup();
            *values = normalized;
        }

        buckets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clm_core::NlpProvider;
    use clm_nlp::LexiconNlp;

    fn extract(text: &str) -> BTreeMap<String, Vec<String>> {
        let doc = LexiconNlp::new().analyze(text);
        EntityExtractor.extract(text, &doc)
    }

    #[test]
    fn money_and_person_route_to_buckets() {
        let buckets = extract("Hi, my name is Sarah, I see the $29.99 charge");
        assert_eq!(buckets["persons"], vec!["SARAH"]);
        assert_eq!(buckets["money"], vec!["$29.99"]);
    }

    #[test]
    fn email_fallback_fills_bucket() {
        let buckets = extract("reach me at jane.doe@example.com please");
        assert_eq!(buckets["emails"], vec!["JANE.DOE@EXAMPLE.COM"]);
    }

    #[test]
    fn duplicates_collapse() {
        let buckets = extract("charged $29.99 and again $29.99");
        assert_eq!(buckets["money"], vec!["$29.99"]);
    }

    #[test]
    fn account_number_with_context() {
        let buckets = extract("my account number is 847-392-1045");
        assert_eq!(buckets["account_numbers"], vec!["847-392-1045"]);
        assert!(buckets["phone_numbers"].is_empty() || buckets["phone_numbers"][0] == "847-392-1045");
    }
}
