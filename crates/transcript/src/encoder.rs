//! Transcript token serialization
//!
//! Emits, in order: CALL, CUSTOMER, ID, CONTACT, one ISSUE per issue, one
//! ACTION per action, RESOLUTION, SENTIMENT.

use std::sync::Arc;

use clm_core::{ClmOutput, Metadata, NlpProvider, OriginalInput};
use clm_language::LanguagePack;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;

use crate::analyzer::TranscriptAnalyzer;
use crate::types::{
    Action, CallInfo, CustomerProfile, Issue, Resolution, SentimentTrajectory,
    TranscriptAnalysis,
};

pub const COMPONENT: &str = "TRANSCRIPT";

static HAS_NUMBERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").expect("static pattern"));
static HAS_URLS: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://").expect("static pattern"));

/// Identifier buckets surfaced in the `[ID:...]` token, fixed order.
const ID_BUCKETS: &[(&str, &str)] = &[
    ("tracking_numbers", "TRACKING"),
    ("claim_numbers", "CLAIM"),
    ("product_models", "PRODUCT"),
    ("order_numbers", "ORDER"),
    ("ticket_numbers", "TICKET"),
    ("case_numbers", "CASE"),
];

pub struct TranscriptEncoder {
    nlp: Arc<dyn NlpProvider>,
    pack: Arc<LanguagePack>,
    analyzer: TranscriptAnalyzer,
}

impl TranscriptEncoder {
    pub fn new(nlp: Arc<dyn NlpProvider>, pack: Arc<LanguagePack>) -> Self {
        let analyzer = TranscriptAnalyzer::new(nlp.clone(), pack.clone());
        Self {
            nlp,
            pack,
            analyzer,
        }
    }

    pub fn encode(&self, transcript: &str, metadata: &Metadata) -> ClmOutput {
        let analysis = self.analyzer.analyze(transcript, metadata);
        let compressed = self.serialize(&analysis);

        let doc = self.nlp.analyze(transcript);
        let mut out_metadata = metadata.clone();
        out_metadata.insert("original_length".into(), json!(transcript.len()));
        out_metadata.insert("compressed_length".into(), json!(compressed.len()));
        out_metadata.insert("verbs".into(), json!(doc.verb_lemmas()));
        out_metadata.insert("noun_chunks".into(), json!(doc.noun_chunk_texts()));
        out_metadata.insert("language".into(), json!(self.pack.lang.code()));
        out_metadata.insert("has_numbers".into(), json!(HAS_NUMBERS.is_match(transcript)));
        out_metadata.insert("has_urls".into(), json!(HAS_URLS.is_match(transcript)));

        ClmOutput::new(
            OriginalInput::from(transcript),
            COMPONENT,
            compressed,
            out_metadata,
        )
    }

    /// The analysis without serialization, for callers that only want the
    /// structured view.
    pub fn analyze(&self, transcript: &str, metadata: &Metadata) -> TranscriptAnalysis {
        self.analyzer.analyze(transcript, metadata)
    }

    fn serialize(&self, analysis: &TranscriptAnalysis) -> String {
        let mut tokens = Vec::new();

        tokens.push(encode_call_info(&analysis.call_info));
        tokens.push(self.encode_customer(&analysis.customer));
        if let Some(identifiers) = encode_identifiers(analysis) {
            tokens.push(identifiers);
        }
        if let Some(contact) = encode_contact(analysis) {
            tokens.push(contact);
        }
        for issue in &analysis.issues {
            tokens.push(encode_issue(issue));
        }
        for action in &analysis.actions {
            tokens.push(encode_action(action));
        }
        tokens.push(encode_resolution(&analysis.resolution));
        tokens.push(encode_sentiment(&analysis.sentiment_trajectory));

        tokens.join(" ")
    }

    /// Address compression: spaces to underscores plus the suffix
    /// abbreviation table.
    fn compress_address(&self, address: &str) -> String {
        let mut compressed = address.replace(' ', "_");
        for (full, abbreviation) in &self.pack.transcript.address_abbreviations {
            compressed = compressed.replace(full, abbreviation);
            compressed = compressed.replace(&full.to_uppercase(), abbreviation);
        }
        compressed
    }

    fn encode_customer(&self, customer: &CustomerProfile) -> String {
        let mut parts = vec!["CUSTOMER".to_string()];

        if let Some(account) = &customer.account {
            parts.push(format!("ACCOUNT={account}"));
        }
        if let Some(tier) = &customer.tier {
            parts.push(format!("TIER={tier}"));
        }
        if let Some(tenure) = &customer.tenure {
            parts.push(format!("TENURE={tenure}"));
        }
        if let Some(address) = customer.attributes.get("address") {
            parts.push(format!("ADDRESS={}", self.compress_address(address)));
        }
        if let Some(org) = customer.attributes.get("organization") {
            parts.push(format!("ORG={}", org.replace(' ', "_")));
        }
        if let Some(location) = customer.attributes.get("location") {
            parts.push(format!("LOCATION={location}"));
        }

        format!("[{}]", parts.join(":"))
    }
}

/// `[CALL:TYPE[:AGENT=...]:DURATION=<m>m[:CHANNEL=...]]`; two turns
/// approximate one minute.
fn encode_call_info(call: &CallInfo) -> String {
    let mut parts = vec!["CALL".to_string(), call.call_type.clone()];

    if let Some(agent) = &call.agent {
        parts.push(format!("AGENT={agent}"));
    }
    if call.duration_turns > 0 {
        let minutes = (call.duration_turns / 2).max(1);
        parts.push(format!("DURATION={minutes}m"));
    }
    if !call.channel.is_empty() {
        parts.push(format!("CHANNEL={}", call.channel));
    }

    format!("[{}]", parts.join(":"))
}

fn encode_identifiers(analysis: &TranscriptAnalysis) -> Option<String> {
    let mut parts = Vec::new();

    for (bucket, label) in ID_BUCKETS {
        let mut values: Vec<String> = analysis
            .turns
            .iter()
            .flat_map(|t| t.entity_bucket(bucket).iter().cloned())
            .collect();
        values.sort();
        values.dedup();
        if !values.is_empty() {
            parts.push(format!("{label}={}", values.join(",")));
        }
    }

    (!parts.is_empty()).then(|| format!("[ID:{}]", parts.join(":")))
}

fn encode_contact(analysis: &TranscriptAnalysis) -> Option<String> {
    let collect = |bucket: &str| -> Vec<String> {
        let mut values: Vec<String> = analysis
            .turns
            .iter()
            .flat_map(|t| t.entity_bucket(bucket).iter().cloned())
            .collect();
        values.sort();
        values.dedup();
        values
    };

    let emails = collect("emails");
    let phones = collect("phone_numbers");

    let mut parts = Vec::new();
    if !emails.is_empty() {
        parts.push(format!("EMAIL={}", emails.join(",")));
    }
    if !phones.is_empty() {
        parts.push(format!("PHONE={}", phones.join(",")));
    }

    (!parts.is_empty()).then(|| format!("[CONTACT:{}]", parts.join(":")))
}

fn encode_issue(issue: &Issue) -> String {
    let mut parts = vec!["ISSUE".to_string(), issue.issue_type.clone()];

    if !issue.disputed_amounts.is_empty() {
        parts.push(format!("AMOUNTS={}", issue.disputed_amounts.join("+")));
    }
    parts.push(format!("SEVERITY={}", issue.severity));
    if let Some(frequency) = &issue.frequency {
        parts.push(format!("FREQ={frequency}"));
    }
    if let Some(duration) = &issue.duration {
        parts.push(format!("DURATION={duration}"));
    }
    if let Some(pattern) = &issue.pattern {
        parts.push(format!("PATTERN={pattern}"));
    }
    if !issue.days.is_empty() {
        parts.push(format!("DAYS={}", issue.days.join("+")));
    }
    if let Some(impact) = &issue.impact {
        parts.push(format!("IMPACT={impact}"));
    }

    format!("[{}]", parts.join(":"))
}

fn encode_action(action: &Action) -> String {
    let mut parts = vec!["ACTION".to_string(), action.action_type.clone()];

    if let Some(step) = &action.step {
        parts.push(format!("STEP={step}"));
    }
    if let Some(reference) = &action.reference {
        parts.push(format!("REFERENCE={reference}"));
    }
    if let Some(timeline) = &action.timeline {
        parts.push(format!("TIMELINE={timeline}"));
    }
    if let Some(amount) = &action.amount {
        parts.push(format!("AMOUNT={amount}"));
    }
    if let Some(method) = &action.payment_method {
        parts.push(format!("METHOD={method}"));
    }
    parts.push(format!("RESULT={}", action.result));

    format!("[{}]", parts.join(":"))
}

fn encode_resolution(resolution: &Resolution) -> String {
    let mut parts = vec!["RESOLUTION".to_string(), resolution.resolution_type.clone()];

    if let Some(timeline) = &resolution.timeline {
        parts.push(format!("TIMELINE={timeline}"));
    }
    if let Some(ticket) = &resolution.ticket_id {
        parts.push(format!("TICKET={ticket}"));
    }
    if let Some(next_steps) = &resolution.next_steps {
        parts.push(format!("NEXT={}", next_steps.replace(' ', "_")));
    }

    format!("[{}]", parts.join(":"))
}

/// `[SENTIMENT:start→...→end]` deduplicating repeated emotions while
/// preserving order.
fn encode_sentiment(sentiment: &SentimentTrajectory) -> String {
    if sentiment.turning_points.is_empty() {
        return format!("[SENTIMENT:{}→{}]", sentiment.start, sentiment.end);
    }

    let mut trajectory = vec![sentiment.start.clone()];
    for (_, emotion) in &sentiment.turning_points {
        if trajectory.last() != Some(emotion) && !trajectory.contains(emotion) {
            trajectory.push(emotion.clone());
        }
    }
    if trajectory.last() != Some(&sentiment.end) {
        trajectory.push(sentiment.end.clone());
    }

    format!("[SENTIMENT:{}]", trajectory.join("→"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Speaker;
    use crate::types::Turn;
    use clm_language::Lang;
    use clm_nlp::LexiconNlp;

    fn encoder() -> TranscriptEncoder {
        TranscriptEncoder::new(
            Arc::new(LexiconNlp::new()),
            Arc::new(LanguagePack::load(Lang::En).unwrap()),
        )
    }

    #[test]
    fn call_info_duration_halves_turns() {
        let call = CallInfo {
            call_id: "1".into(),
            call_type: "SUPPORT".into(),
            channel: "VOICE".into(),
            duration_turns: 10,
            agent: Some("Sarah".into()),
        };
        assert_eq!(
            encode_call_info(&call),
            "[CALL:SUPPORT:AGENT=Sarah:DURATION=5m:CHANNEL=VOICE]"
        );
    }

    #[test]
    fn single_turn_rounds_up_to_a_minute() {
        let call = CallInfo {
            call_id: "1".into(),
            call_type: "SUPPORT".into(),
            channel: "VOICE".into(),
            duration_turns: 1,
            agent: None,
        };
        assert!(encode_call_info(&call).contains("DURATION=1m"));
    }

    #[test]
    fn customer_token_compresses_address() {
        let enc = encoder();
        let mut customer = CustomerProfile::default();
        customer
            .attributes
            .insert("address".into(), "123 Main Street".into());
        customer
            .attributes
            .insert("organization".into(), "Acme Corp".into());
        let token = enc.encode_customer(&customer);
        assert!(token.contains("ADDRESS=123_Main_St"));
        assert!(token.contains("ORG=Acme_Corp"));
    }

    #[test]
    fn sentiment_token_deduplicates() {
        let trajectory = SentimentTrajectory {
            start: "FRUSTRATED".into(),
            end: "SATISFIED".into(),
            turning_points: vec![
                (1, "NEUTRAL".into()),
                (2, "FRUSTRATED".into()),
                (3, "SATISFIED".into()),
            ],
        };
        assert_eq!(
            encode_sentiment(&trajectory),
            "[SENTIMENT:FRUSTRATED→NEUTRAL→SATISFIED]"
        );
    }

    #[test]
    fn identifier_token_uses_fixed_bucket_order() {
        let mut turn = Turn::new(Speaker::Customer, "x");
        turn.entities
            .insert("ticket_numbers".into(), vec!["TK-1234".into()]);
        turn.entities
            .insert("tracking_numbers".into(), vec!["PL-7294008".into()]);
        let analysis = TranscriptAnalysis {
            call_info: CallInfo {
                call_id: "1".into(),
                call_type: "SUPPORT".into(),
                channel: "VOICE".into(),
                duration_turns: 1,
                agent: None,
            },
            customer: CustomerProfile::default(),
            turns: vec![turn],
            issues: vec![],
            actions: vec![],
            resolution: Resolution::default(),
            sentiment_trajectory: SentimentTrajectory::default(),
        };
        assert_eq!(
            encode_identifiers(&analysis).unwrap(),
            "[ID:TRACKING=PL-7294008:TICKET=TK-1234]"
        );
    }

    #[test]
    fn end_to_end_billing_dispute() {
        let transcript = "\
Agent: Thank you for calling, my name is Sarah, how can I help?
Customer: I was charged $29.99 twice on my statement, this is unacceptable
Agent: I can see the duplicate charge, it was processed twice by mistake
Customer: I want the $29.99 charge removed from my bill
Agent: I've processed the refund to your card, reference RFD-908712
Customer: Thank you so much";
        let out = encoder().encode(transcript, &Metadata::new());

        assert!(out.compressed.starts_with("[CALL:SUPPORT:AGENT=Sarah"));
        assert!(out
            .compressed
            .contains("[ISSUE:BILLING_DISPUTE:AMOUNTS=$29.99"));
        let refund = out
            .compressed
            .split(' ')
            .find(|t| t.starts_with("[ACTION:REFUND"))
            .expect("refund action token");
        assert!(refund.contains("RESULT=COMPLETED"));
        assert!(refund.contains("REFERENCE=RFD-908712"));
        assert!(out.compressed.contains("[SENTIMENT:ANGRY→GRATEFUL]"));
    }

    #[test]
    fn token_sequence_order_is_canonical() {
        let transcript = "\
Agent: hello, this is Marcus from support
Customer: my internet keeps dropping since Monday, very frustrating
Agent: let me run a diagnostic, I can see the problem
Customer: thanks";
        let out = encoder().encode(transcript, &Metadata::new());
        let heads: Vec<String> = out
            .compressed
            .split(" [")
            .map(|t| {
                t.trim_start_matches('[')
                    .split([':', ']'])
                    .next()
                    .unwrap()
                    .to_string()
            })
            .collect();
        let order = [
            "CALL",
            "CUSTOMER",
            "ID",
            "CONTACT",
            "ISSUE",
            "ACTION",
            "RESOLUTION",
            "SENTIMENT",
        ];
        let mut last = 0;
        for head in heads {
            let position = order.iter().position(|o| *o == head).expect("known head");
            assert!(position >= last, "token {head} out of order");
            last = position;
        }
    }
}
