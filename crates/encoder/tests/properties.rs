//! Property-based invariants over the full encoder

use clm_core::{classify, InputKind, OriginalInput};
use clm_encoder::{ClmConfig, ClmEncoder};
use proptest::prelude::*;

fn encoder() -> ClmEncoder {
    ClmEncoder::new(ClmConfig::default()).unwrap()
}

/// Top-level bracket tokens with balanced nesting inside.
fn top_level_tokens(compressed: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, c) in compressed.char_indices() {
        match c {
            '[' => {
                if depth == 0 {
                    start = i;
                }
                depth += 1;
            }
            ']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    tokens.push(&compressed[start..=i]);
                }
            }
            _ => {}
        }
    }
    tokens
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Classifying the same input twice yields the same route.
    #[test]
    fn classifier_is_deterministic(text in ".{0,200}") {
        let input = OriginalInput::from(text.as_str());
        prop_assert_eq!(classify(&input), classify(&input));
    }

    /// Whitespace-only text cannot be compressed and has no side effects.
    #[test]
    fn unknown_inputs_return_none(spaces in "[ \t\n]{0,20}") {
        let enc = encoder();
        prop_assert!(enc.encode_text(&spaces).is_none());
    }

    /// The envelope never grows the payload.
    #[test]
    fn envelope_never_expands(text in "[a-zA-Z ,.]{1,200}") {
        prop_assume!(!text.trim().is_empty());
        let out = encoder().encode_text(&text).unwrap();
        prop_assert!(out.c_tokens() <= out.n_tokens());
    }

    /// Compressed output is whitespace-normalized.
    #[test]
    fn compressed_has_clean_whitespace(text in "[a-zA-Z \t\n,.]{1,200}") {
        prop_assume!(!text.trim().is_empty());
        let out = encoder().encode_text(&text).unwrap();
        prop_assert!(!out.compressed.contains('\t'));
        prop_assert!(!out.compressed.contains('\n'));
        prop_assert!(!out.compressed.contains("  "));
    }
}

const LONG_TRANSCRIPT: &str = "\
Agent: thank you for calling support today, my name is Sarah, how can I help you?
Customer: my internet connection keeps dropping at 9am and 6pm every day since Monday, this is very frustrating
Agent: I can see the problem on your line, let me run a diagnostic right away
Customer: it drops right in the middle of my video calls and I work from home every single day
Agent: I understand how disruptive that must be, the diagnostic shows congestion during peak hours
Customer: please get this fixed as quickly as you possibly can
Agent: I have escalated this to our network team, you should see stable service within 24 hours
Customer: thank you so much, you have been really helpful today";

#[test]
fn token_streams_are_well_formed() {
    let enc = encoder();
    let prompts = [
        "Analyze this Python code for security issues",
        "Summarize this 30-minute customer call transcript",
        "Extract the customer names and important dates from the attached document",
        "Could you please give me 5 practical tips for writing unit tests, keep the tone professional",
        "What is object-oriented programming and how does it compare to functional programming in practice?",
        LONG_TRANSCRIPT,
    ];

    for prompt in prompts {
        let out = enc.encode_text(prompt).unwrap();
        let tokens = top_level_tokens(&out.compressed);
        assert!(!tokens.is_empty(), "no tokens for {prompt:?}");

        // Balanced brackets overall
        let opens = out.compressed.matches('[').count();
        let closes = out.compressed.matches(']').count();
        assert_eq!(opens, closes, "unbalanced brackets for {prompt:?}");

        // Every top-level token has an upper-case head
        for token in &tokens {
            let head: String = token[1..]
                .chars()
                .take_while(|c| c.is_ascii_uppercase() || *c == '_')
                .collect();
            assert!(!head.is_empty(), "headless token {token} in {prompt:?}");
        }

        // Tokens are single-space separated
        let rebuilt = tokens.join(" ");
        assert_eq!(rebuilt, out.compressed);
    }
}

#[test]
fn prompt_token_heads_are_ordered() {
    let enc = encoder();
    let out = enc
        .encode_text(
            "Extract all of the customer names, important dates and disputed amounts \
             from this support call transcript, keep the tone brief and professional",
        )
        .unwrap();
    let order = ["REQ", "TARGET", "EXTRACT", "CTX", "OUT"];
    let mut last = 0;
    for token in top_level_tokens(&out.compressed) {
        let head: String = token[1..]
            .chars()
            .take_while(|c| c.is_ascii_uppercase() || *c == '_')
            .collect();
        let position = order
            .iter()
            .position(|o| head.starts_with(o))
            .unwrap_or_else(|| panic!("unexpected head {head}"));
        assert!(position >= last);
        last = position;
    }
}
