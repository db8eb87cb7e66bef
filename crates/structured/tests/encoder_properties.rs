//! Property: a single-required-field mapping compresses to one pair

use clm_structured::{SdCompressionConfig, SdEncoder};
use proptest::prelude::*;
use regex::Regex;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn single_required_field_emits_one_pair(
        key in "[a-z][a-z0-9_]{0,15}",
        value in "[a-zA-Z0-9 ]{1,40}",
    ) {
        let config = SdCompressionConfig {
            required_fields: Some(vec![key.clone()]),
            ..Default::default()
        };
        let encoder = SdEncoder::new(config);
        let data = serde_json::json!({ key.clone(): value });
        let out = encoder.encode(&data);

        let shape = Regex::new(r"^\{[^{}\[\]]*\}\[[^{}\[\]]*\]$").unwrap();
        prop_assert!(
            shape.is_match(&out.compressed),
            "unexpected shape: {}",
            out.compressed
        );
        let expected_prefix = format!("{{{}}}", key);
        prop_assert!(out.compressed.starts_with(&expected_prefix));
    }

    /// Field order is deterministic across repeated encodings.
    #[test]
    fn encoding_is_deterministic(
        a in "[a-z]{1,8}",
        b in "[a-z]{1,8}",
    ) {
        prop_assume!(a != b);
        let data = serde_json::json!({ a: "one two three", b: "four five six" });
        let first = SdEncoder::new(SdCompressionConfig::default()).encode(&data);
        let second = SdEncoder::new(SdCompressionConfig::default()).encode(&data);
        prop_assert_eq!(first.compressed, second.compressed);
    }
}
