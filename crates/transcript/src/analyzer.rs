//! Transcript analysis: per-turn signals aggregated into call facts
//!
//! Per turn: intent, targets, sentiment, entities. Across turns: call
//! metadata, customer profile, issues, the ordered action chain, the
//! resolution, and the sentiment trajectory.

use std::sync::Arc;

use clm_core::{Metadata, NlpProvider};
use clm_language::{build_keyword_index, lookup_category, KeywordIndex, LanguagePack};
use clm_prompt::{IntentDetector, TargetExtractor};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::entities::EntityExtractor;
use crate::sentiment::SentimentAnalyzer;
use crate::temporal::TemporalAnalyzer;
use crate::turns::parse_turns;
use crate::types::{
    Action, CallInfo, CustomerProfile, Issue, Resolution, Speaker, TranscriptAnalysis, Turn,
};

static INTRODUCED_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:my name is|i'?m|this is)\s+([A-Z][a-z]+)").expect("static pattern")
});
static THANKED_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)thank(?:s| you),\s+([A-Z][a-z]+)").expect("static pattern"));
static PLAN_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\w+)\s+plan\b").expect("static pattern"));
static TENURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)customer for\s+(\d+)\s*(?:years?|yrs?)").expect("static pattern")
});
static REFERENCE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z]{2,5}-\d{3,})\b").expect("static pattern"));
static REFERENCE_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:reference|confirmation|ref)[^\w]{0,6}#?\s*([A-Z0-9-]{4,30})")
        .expect("static pattern")
});
static ID_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:id|ticket|case|order)[^\w]{0,6}#?\s*([A-Z0-9-]{3,30})")
        .expect("static pattern")
});
static MONEY_AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\s?[\d,]+(?:\.\d{1,2})?").expect("static pattern"));
static PLAN_CHANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)from (\w+) to (\w+)").expect("static pattern"));
static WITHIN_HOURS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)within\s+(\d+)\s*hours?").expect("static pattern"));
static WITHIN_DAYS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)within\s+(\d+)\s*days?").expect("static pattern"));

const SALES_MARKERS: &[&str] = &["upgrade", "pricing", "buy", "interested in"];
const BILLING_ISSUES: &[&str] = &[
    "BILLING_DISPUTE",
    "UNEXPECTED_CHARGE",
    "REFUND_REQUEST",
    "OVERCHARGE",
];

pub struct TranscriptAnalyzer {
    nlp: Arc<dyn NlpProvider>,
    pack: Arc<LanguagePack>,
    issue_index: KeywordIndex,
    severity_index: KeywordIndex,
    resolution_index: KeywordIndex,
    billing_cause_index: KeywordIndex,
    technical_index: KeywordIndex,
    confirmation_index: KeywordIndex,
    troubleshooting_index: KeywordIndex,
    /// (keyword, event, explicit-only), longest keyword first.
    action_index: Vec<(String, String, bool)>,
    completion_now: Vec<Regex>,
}

impl TranscriptAnalyzer {
    pub fn new(nlp: Arc<dyn NlpProvider>, pack: Arc<LanguagePack>) -> Self {
        let lex = &pack.transcript;
        let issue_index = build_keyword_index(&lex.issue_type_keywords);
        let severity_index = build_keyword_index(&lex.severity_keywords);
        let resolution_index = build_keyword_index(&lex.resolution_keywords);
        let billing_cause_index = build_keyword_index(&lex.billing_cause_keywords);
        let technical_index = build_keyword_index(&lex.technical_issue_map);
        let confirmation_index = build_keyword_index(&lex.issue_confirmation_map);
        let troubleshooting_index = build_keyword_index(&lex.troubleshooting_actions);

        let mut action_index: Vec<(String, String, bool)> = lex
            .action_families
            .iter()
            .flat_map(|family| {
                let explicit = lex.explicit_only_actions.contains(&family.event);
                family
                    .keywords
                    .iter()
                    .map(move |kw| (kw.to_lowercase(), family.event.to_string(), explicit))
            })
            .collect();
        action_index.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));

        let completion_now = lex
            .completion_now_patterns
            .iter()
            .filter_map(|pattern| match Regex::new(pattern) {
                Ok(regex) => Some(regex),
                Err(error) => {
                    tracing::warn!(%pattern, %error, "skipping completion pattern");
                    None
                }
            })
            .collect();

        Self {
            nlp,
            pack,
            issue_index,
            severity_index,
            resolution_index,
            billing_cause_index,
            technical_index,
            confirmation_index,
            troubleshooting_index,
            action_index,
            completion_now,
        }
    }

    pub fn analyze(&self, transcript: &str, metadata: &Metadata) -> TranscriptAnalysis {
        let mut turns = parse_turns(transcript);

        let intent_detector = IntentDetector::new(&self.pack);
        let target_extractor = TargetExtractor::new(&self.pack);
        let sentiment = SentimentAnalyzer::new(&self.pack.transcript);
        let entity_extractor = EntityExtractor;

        for turn in &mut turns {
            let doc = self.nlp.analyze(&turn.text);
            let mut intents = intent_detector.detect(&turn.text, &doc);
            let primary = intents.remove(0);
            turn.targets
                .push(target_extractor.extract(&turn.text, Some(primary.token), &doc));
            turn.intent = Some(primary);
            turn.sentiment = Some(sentiment.analyze_turn(&turn.text).0);
            turn.entities = entity_extractor.extract(&turn.text, &doc);
        }

        let call_info = self.extract_call_info(&turns, metadata);
        let customer = self.extract_customer_profile(&turns);
        let issues = self.extract_issues(&turns);
        let actions = self.extract_actions(&turns);
        let resolution = self.extract_resolution(&turns);
        let sentiment_trajectory = sentiment.track_trajectory(&turns);

        tracing::debug!(
            turns = turns.len(),
            issues = issues.len(),
            actions = actions.len(),
            "analyzed transcript"
        );

        TranscriptAnalysis {
            call_info,
            customer,
            turns,
            issues,
            actions,
            resolution,
            sentiment_trajectory,
        }
    }

    fn extract_call_info(&self, turns: &[Turn], metadata: &Metadata) -> CallInfo {
        let full_text = turns
            .iter()
            .map(|t| t.text.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        let call_type = if SALES_MARKERS.iter().any(|m| full_text.contains(m)) {
            "SALES"
        } else {
            "SUPPORT"
        };

        let meta_str = |key: &str| {
            metadata
                .get(key)
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };

        CallInfo {
            call_id: meta_str("call_id").unwrap_or_else(|| "unknown".to_string()),
            call_type: call_type.to_string(),
            channel: meta_str("channel").unwrap_or_else(|| "VOICE".to_string()),
            duration_turns: turns.len(),
            agent: meta_str("agent").or_else(|| detect_introduced_name(turns, Speaker::Agent)),
        }
    }

    fn extract_customer_profile(&self, turns: &[Turn]) -> CustomerProfile {
        let mut profile = CustomerProfile {
            name: self.extract_customer_name(turns),
            ..Default::default()
        };

        for turn in turns {
            if profile.account.is_none() {
                if let Some(account) = turn.entity_bucket("account_numbers").first() {
                    profile.account = Some(account.clone());
                }
            }
            if let Some(email) = turn.entity_bucket("emails").first() {
                profile
                    .attributes
                    .entry("email".to_string())
                    .or_insert_with(|| email.clone());
            }
            if let Some(org) = turn.entity_bucket("organizations").first() {
                profile
                    .attributes
                    .entry("organization".to_string())
                    .or_insert_with(|| org.clone());
            }
            if let Some(location) = turn.entity_bucket("locations").first() {
                profile
                    .attributes
                    .entry("location".to_string())
                    .or_insert_with(|| location.clone());
            }
            if profile.tier.is_none() {
                if let Some(caps) = PLAN_NAME.captures(&turn.text) {
                    profile.tier = Some(map_plan_to_tier(&caps[1]));
                }
            }
            if profile.tenure.is_none() {
                if let Some(caps) = TENURE.captures(&turn.text) {
                    profile.tenure = Some(format!("{}yr", &caps[1]));
                }
            }
        }

        profile
    }

    fn extract_customer_name(&self, turns: &[Turn]) -> Option<String> {
        for turn in turns.iter().take(3).filter(|t| t.speaker == Speaker::Agent) {
            if let Some(person) = turn.entity_bucket("persons").first() {
                return Some(titlecase(person));
            }
            if let Some(caps) = INTRODUCED_NAME.captures(&turn.text) {
                return Some(titlecase(&caps[1]));
            }
            if let Some(caps) = THANKED_NAME.captures(&turn.text) {
                return Some(caps[1].to_string());
            }
        }
        for turn in turns {
            if let Some(email) = turn.entity_bucket("emails").first() {
                let local = email.split('@').next().unwrap_or("");
                if local.contains('.') {
                    return local.split('.').next().map(titlecase);
                }
            }
        }
        None
    }

    fn extract_issues(&self, turns: &[Turn]) -> Vec<Issue> {
        let customer_text = turns
            .iter()
            .filter(|t| t.speaker == Speaker::Customer)
            .map(|t| t.text.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");

        let Some(issue_type) = lookup_category(&customer_text, &self.issue_index) else {
            return Vec::new();
        };

        let severity = lookup_category(&customer_text, &self.severity_index)
            .unwrap_or_else(|| "LOW".to_string());

        let temporal = TemporalAnalyzer::new(&self.pack.transcript).extract(&customer_text);

        let mut issue = Issue {
            issue_type: issue_type.clone(),
            severity,
            frequency: temporal.frequency,
            duration: temporal.duration,
            pattern: temporal.pattern,
            impact: None,
            disputed_amounts: Vec::new(),
            cause: None,
            plan_change: None,
            days: temporal.days,
        };

        if BILLING_ISSUES.contains(&issue_type.as_str()) {
            issue.disputed_amounts = self.extract_disputed_amounts(turns);
            let (cause, plan_change) = self.detect_billing_cause(turns);
            issue.cause = cause;
            issue.plan_change = plan_change;
        } else if matches!(issue_type.as_str(), "CONNECTIVITY" | "TECHNICAL")
            || issue_type.starts_with("INTERNET")
            || issue_type.starts_with("WIFI")
        {
            issue.cause = lookup_category(&customer_text, &self.technical_index);
        }

        vec![issue]
    }

    /// Ordered unique money amounts from customer turns that talk about
    /// a charge, bill, statement, or payment.
    fn extract_disputed_amounts(&self, turns: &[Turn]) -> Vec<String> {
        let mut amounts = Vec::new();
        for turn in turns.iter().filter(|t| t.speaker == Speaker::Customer) {
            let lower = turn.text.to_lowercase();
            if !["charge", "bill", "statement", "payment"]
                .iter()
                .any(|k| lower.contains(k))
            {
                continue;
            }
            for amount in turn.entity_bucket("money") {
                if !amounts.contains(amount) {
                    amounts.push(amount.clone());
                }
            }
        }
        amounts
    }

    fn detect_billing_cause(&self, turns: &[Turn]) -> (Option<String>, Option<String>) {
        for turn in turns.iter().filter(|t| t.speaker == Speaker::Agent) {
            let lower = turn.text.to_lowercase();
            if let Some(cause) = lookup_category(&lower, &self.billing_cause_index) {
                let plan_change = if matches!(
                    cause.as_str(),
                    "MID_CYCLE_UPGRADE" | "MID_CYCLE_DOWNGRADE"
                ) {
                    PLAN_CHANGE.captures(&lower).map(|caps| {
                        format!("{}→{}", caps[1].to_uppercase(), caps[2].to_uppercase())
                    })
                } else {
                    None
                };
                return (Some(cause), plan_change);
            }
        }
        (None, None)
    }

    /// Action events from agent turns: issue confirmations, then
    /// troubleshooting phrases, then vocabulary action families with the
    /// explicit-only gate. First occurrence creates the action; later
    /// mentions merge details.
    fn extract_actions(&self, turns: &[Turn]) -> Vec<Action> {
        let mut actions: Vec<Action> = Vec::new();

        for (index, turn) in turns.iter().enumerate() {
            if turn.speaker != Speaker::Agent {
                continue;
            }
            let events = self.detect_action_events(&turn.text);

            for event in events {
                let existing = actions.iter().position(|a| a.action_type == event);
                let position = match existing {
                    Some(p) => p,
                    None => {
                        actions.push(Action::new(&event));
                        actions.len() - 1
                    }
                };

                let needs_reference = event.contains("REFUND") || event.contains("ESCALATION");
                if needs_reference && actions[position].reference.is_none() {
                    actions[position].reference = extract_reference(&turn.text);
                }

                if event.contains("REFUND") || event.contains("CREDIT") {
                    let (amount, method) = extract_financial_details(turn);
                    if actions[position].amount.is_none() {
                        actions[position].amount = amount;
                    }
                    if actions[position].payment_method.is_none() {
                        actions[position].payment_method = method;
                    }
                    if actions[position].timeline.is_none() {
                        actions[position].timeline = self.extract_timeline(&turn.text);
                    }
                }

                if actions[position].result == "PENDING"
                    && self.action_completed(turns, index, turn)
                {
                    actions[position].result = "COMPLETED".to_string();
                }
            }
        }

        actions
    }

    fn detect_action_events(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let mut seen: Vec<String> = Vec::new();

        for (keyword, category) in &self.confirmation_index {
            if lower.contains(keyword.as_str()) && !seen.contains(category) {
                seen.push(category.clone());
            }
        }
        for (keyword, category) in &self.troubleshooting_index {
            if lower.contains(keyword.as_str()) && !seen.contains(category) {
                seen.push(category.clone());
            }
        }
        for (keyword, event, explicit) in &self.action_index {
            if seen.contains(event) || !lower.contains(keyword.as_str()) {
                continue;
            }
            if *explicit {
                let phrases = self.pack.transcript.explicit_phrases_for(event);
                if !phrases.iter().any(|p| lower.contains(p)) {
                    continue;
                }
            }
            seen.push(event.clone());
        }

        seen
    }

    fn action_completed(&self, turns: &[Turn], index: usize, action_turn: &Turn) -> bool {
        let lower = action_turn.text.to_lowercase();
        let lex = &self.pack.transcript;

        if lex
            .completion_keywords
            .iter()
            .chain(lex.completion_phrases.iter())
            .any(|k| lower.contains(k))
        {
            return true;
        }
        if self.completion_now.iter().any(|re| re.is_match(&lower)) {
            return true;
        }

        for turn in turns.iter().skip(index + 1).take(2) {
            let lower = turn.text.to_lowercase();
            match turn.speaker {
                Speaker::Customer => {
                    if lex
                        .positive_customer_confirmations
                        .iter()
                        .any(|k| lower.contains(k))
                    {
                        return true;
                    }
                }
                Speaker::Agent => {
                    if lex
                        .agent_confirmation_phrases
                        .iter()
                        .any(|k| lower.contains(k))
                    {
                        return true;
                    }
                }
                Speaker::System => {}
            }
        }
        false
    }

    /// Over the last five agent turns, newest first.
    fn extract_resolution(&self, turns: &[Turn]) -> Resolution {
        let agent_turns: Vec<&Turn> = turns
            .iter()
            .filter(|t| t.speaker == Speaker::Agent)
            .collect();

        for turn in agent_turns.iter().rev().take(5) {
            let lower = turn.text.to_lowercase();
            let Some(key) = lookup_category(&lower, &self.resolution_index) else {
                continue;
            };
            let (resolution_type, next_steps) = if key == "PENDING_REPLACEMENT" {
                ("PENDING".to_string(), Some("REPLACEMENT".to_string()))
            } else {
                (key, None)
            };
            return Resolution {
                resolution_type,
                timeline: self.extract_timeline(&lower),
                next_steps,
                ticket_id: turn
                    .entity_bucket("ticket_numbers")
                    .first()
                    .cloned(),
            };
        }

        Resolution::default()
    }

    fn extract_timeline(&self, text: &str) -> Option<String> {
        let temporal = TemporalAnalyzer::new(&self.pack.transcript).extract(text);
        if let Some(duration) = temporal.duration {
            return Some(duration.to_uppercase());
        }
        let lower = text.to_lowercase();
        if lower.contains("tomorrow") {
            return Some("TOMORROW".to_string());
        }
        if lower.contains("today") {
            return Some("TODAY".to_string());
        }
        if let Some(caps) = WITHIN_HOURS.captures(text) {
            return Some(format!("{}h", &caps[1]));
        }
        if let Some(caps) = WITHIN_DAYS.captures(text) {
            return Some(format!("{}d", &caps[1]));
        }
        None
    }
}

fn detect_introduced_name(turns: &[Turn], speaker: Speaker) -> Option<String> {
    for turn in turns.iter().take(3).filter(|t| t.speaker == speaker) {
        if let Some(person) = turn.entity_bucket("persons").first() {
            return Some(titlecase(person));
        }
        if let Some(caps) = INTRODUCED_NAME.captures(&turn.text) {
            return Some(caps[1].to_string());
        }
    }
    None
}

fn extract_reference(text: &str) -> Option<String> {
    if let Some(m) = REFERENCE_CODE.find(text) {
        return Some(m.as_str().to_string());
    }
    if let Some(caps) = REFERENCE_PHRASE.captures(text) {
        return Some(caps[1].to_string());
    }
    if let Some(caps) = ID_PHRASE.captures(text) {
        return Some(caps[1].to_string());
    }
    None
}

fn extract_financial_details(turn: &Turn) -> (Option<String>, Option<String>) {
    let amount = turn
        .entity_bucket("money")
        .first()
        .cloned()
        .or_else(|| MONEY_AMOUNT.find(&turn.text).map(|m| m.as_str().to_string()));

    let lower = turn.text.to_lowercase();
    let method = if lower.contains("paypal") {
        Some("PAYPAL")
    } else if lower.contains("check") {
        Some("CHECK")
    } else if lower.contains("credit card") || lower.contains("card") {
        Some("CARD_CREDIT")
    } else if lower.contains("account credit")
        || (lower.contains("account") && lower.contains("credit"))
    {
        Some("ACCOUNT_CREDIT")
    } else {
        None
    };

    (amount, method.map(str::to_string))
}

fn map_plan_to_tier(plan: &str) -> String {
    let plan = plan.to_lowercase();
    if plan.contains("premium") {
        "PREMIUM"
    } else if plan.contains("enterprise") {
        "ENTERPRISE"
    } else if plan.contains("basic") {
        "BASIC"
    } else {
        "STANDARD"
    }
    .to_string()
}

fn titlecase(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
