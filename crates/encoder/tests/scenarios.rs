//! End-to-end scenarios across all three encoders

use clm_encoder::{ClmConfig, ClmEncoder};
use clm_structured::SdCompressionConfig;
use serde_json::json;

fn encoder() -> ClmEncoder {
    ClmEncoder::new(ClmConfig::default()).unwrap()
}

#[test]
fn imperative_code_analysis() {
    let out = encoder()
        .encode_text("Analyze this Python code for security issues")
        .unwrap();
    assert!(out.compressed.contains("[REQ:ANALYZE]"));
    assert!(out.compressed.contains("[TARGET:CODE:LANG=PYTHON]"));
}

#[test]
fn summarize_transcript_with_duration() {
    let out = encoder()
        .encode_text("Summarize this 30-minute customer call transcript")
        .unwrap();
    assert!(out.compressed.contains("[REQ:SUMMARIZE]"));
    assert!(out.compressed.contains("[TARGET:TRANSCRIPT:DURATION=30]"));
}

const QA_SCHEMA_PROMPT: &str = "\
Review the call and return the QA assessment as JSON:
{\"summary\": \"one paragraph recap\", \"qa_scores\": {\"verification\": 0.0, \"policy_adherence\": 0.0}, \"violations\": [\"rule broken\"], \"recommendations\": [\"follow up\"]}
Scoring bands: 0.00-0.49: Fail, 0.50-0.74: Needs Improvement";

#[test]
fn output_schema_from_prose() {
    let out = encoder().encode_text(QA_SCHEMA_PROMPT).unwrap();
    assert!(out.compressed.contains(
        "{summary,qa_scores:{verification,policy_adherence},violations,recommendations}"
    ));
}

#[test]
fn output_schema_with_enum_ranges() {
    let config = ClmConfig {
        sys_prompt: clm_prompt::SysPromptConfig {
            infer_types: true,
            add_attrs: true,
            add_examples: false,
        },
        ..Default::default()
    };
    let out = ClmEncoder::new(config)
        .unwrap()
        .encode_text(QA_SCHEMA_PROMPT)
        .unwrap();
    assert!(out.compressed.contains("ENUMS="));
    assert!(out.compressed.contains("\"ranges\""));
    assert!(out.compressed.contains("NEEDS_IMPROVEMENT"));
}

const BILLING_TRANSCRIPT: &str = "\
Agent: Thank you for calling support, my name is Sarah, how can I help you today?
Customer: I was charged $29.99 twice on my statement and I am furious about it
Agent: I can see the duplicate charge on your account, the payment was processed twice
Customer: The second $29.99 charge needs to go
Agent: I've processed the refund to your card just now, your reference is RFD-908712
Customer: Thank you so much, you have been really helpful";

#[test]
fn transcript_billing_dispute_with_duplicate_charge() {
    let out = encoder().encode_text(BILLING_TRANSCRIPT).unwrap();
    assert_eq!(out.component, "TRANSCRIPT");

    // The duplicated $29.99 appears exactly once in the AMOUNTS list
    let issue = out
        .compressed
        .split(' ')
        .find(|t| t.starts_with("[ISSUE:BILLING_DISPUTE"))
        .expect("billing issue token");
    assert!(issue.contains("AMOUNTS=$29.99"));
    assert!(!issue.contains("$29.99+$29.99"));

    let refund = out
        .compressed
        .split(' ')
        .find(|t| t.starts_with("[ACTION:REFUND"))
        .expect("refund action token");
    assert!(refund.contains("RESULT=COMPLETED"));
}

#[test]
fn transcript_sentiment_trajectory() {
    let out = encoder().encode_text(BILLING_TRANSCRIPT).unwrap();
    let sentiment = out
        .compressed
        .split(' ')
        .find(|t| t.starts_with("[SENTIMENT:"))
        .expect("sentiment token");

    // Starts negative, ends positive, no duplicate consecutive labels
    assert!(sentiment.starts_with("[SENTIMENT:ANGRY"));
    assert!(sentiment.contains("GRATEFUL"));
    let labels: Vec<&str> = sentiment
        .trim_start_matches("[SENTIMENT:")
        .trim_end_matches(']')
        .split('→')
        .collect();
    for pair in labels.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
}

#[test]
fn structured_data_compression() {
    let config = ClmConfig {
        ds: SdCompressionConfig {
            excluded_fields: Some(vec!["warehouse".into(), "created_date".into()]),
            ..Default::default()
        },
        ..Default::default()
    };
    let data = json!([
        {"id": "P1", "name": "A", "description": "first product", "warehouse": "X"},
        {"id": "P2", "name": "B", "description": "second product", "warehouse": "X"}
    ]);
    let out = ClmEncoder::new(config).unwrap().encode_value(&data).unwrap();

    assert!(out.compressed.starts_with("{id,name,description}"));
    assert_eq!(out.compressed.matches('[').count(), 2);
    assert!(!out.compressed.contains("warehouse"));
    assert!(!out.compressed.contains('X'));
}

#[test]
fn compressed_is_never_longer_than_the_original() {
    let outs = [
        encoder().encode_text("hi").unwrap(),
        encoder().encode_text(BILLING_TRANSCRIPT).unwrap(),
        encoder()
            .encode_value(&json!({"id": "1", "name": "A"}))
            .unwrap(),
    ];
    for out in outs {
        assert!(out.c_tokens() <= out.n_tokens());
    }
}

#[test]
fn whitespace_is_normalized() {
    let out = encoder()
        .encode_text("Summarize   this\tdocument\n\nbriefly")
        .unwrap();
    assert!(!out.compressed.contains('\t'));
    assert!(!out.compressed.contains('\n'));
    assert!(!out.compressed.contains("  "));
}
