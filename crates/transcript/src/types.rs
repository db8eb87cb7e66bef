//! Transcript analysis data model

use std::collections::BTreeMap;

use clm_core::{Intent, Target};
use serde::{Deserialize, Serialize};

/// Normalized speaker roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Agent,
    Customer,
    System,
}

/// One conversational turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: Option<f64>,
    pub intent: Option<Intent>,
    #[serde(default)]
    pub targets: Vec<Target>,
    pub sentiment: Option<String>,
    #[serde(default)]
    pub entities: BTreeMap<String, Vec<String>>,
}

impl Turn {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
            timestamp: None,
            intent: None,
            targets: Vec::new(),
            sentiment: None,
            entities: BTreeMap::new(),
        }
    }

    pub fn entity_bucket(&self, bucket: &str) -> &[String] {
        self.entities
            .get(bucket)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

/// Call metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallInfo {
    pub call_id: String,
    /// SUPPORT or SALES.
    pub call_type: String,
    pub channel: String,
    /// Turn count; the encoder converts to approximate minutes.
    pub duration_turns: usize,
    pub agent: Option<String>,
}

/// Customer information gathered across turns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub name: Option<String>,
    pub account: Option<String>,
    pub tier: Option<String>,
    pub tenure: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

/// A reported customer issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub issue_type: String,
    pub severity: String,
    pub frequency: Option<String>,
    pub duration: Option<String>,
    pub pattern: Option<String>,
    pub impact: Option<String>,
    #[serde(default)]
    pub disputed_amounts: Vec<String>,
    pub cause: Option<String>,
    pub plan_change: Option<String>,
    #[serde(default)]
    pub days: Vec<String>,
}

/// An atomic action event performed by the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub action_type: String,
    pub step: Option<String>,
    /// PENDING, COMPLETED, FAILED, or TEMP_FIX.
    pub result: String,
    pub reference: Option<String>,
    pub timeline: Option<String>,
    pub amount: Option<String>,
    pub payment_method: Option<String>,
}

impl Action {
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            step: None,
            result: "PENDING".to_string(),
            reference: None,
            timeline: None,
            amount: None,
            payment_method: None,
        }
    }
}

/// How the conversation resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    /// RESOLVED, PENDING, ESCALATED, or UNKNOWN.
    pub resolution_type: String,
    pub timeline: Option<String>,
    pub next_steps: Option<String>,
    pub ticket_id: Option<String>,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            resolution_type: "UNKNOWN".to_string(),
            timeline: None,
            next_steps: None,
            ticket_id: None,
        }
    }
}

/// Customer sentiment across the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentTrajectory {
    pub start: String,
    pub end: String,
    /// (customer-turn index, sentiment) at each change.
    #[serde(default)]
    pub turning_points: Vec<(usize, String)>,
}

impl Default for SentimentTrajectory {
    fn default() -> Self {
        Self {
            start: "NEUTRAL".to_string(),
            end: "NEUTRAL".to_string(),
            turning_points: Vec::new(),
        }
    }
}

/// Temporal digest of a text segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemporalPattern {
    pub days: Vec<String>,
    pub times: Vec<String>,
    pub duration: Option<String>,
    pub frequency: Option<String>,
    pub pattern: Option<String>,
}

/// Complete analysis of one transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptAnalysis {
    pub call_info: CallInfo,
    pub customer: CustomerProfile,
    pub turns: Vec<Turn>,
    pub issues: Vec<Issue>,
    pub actions: Vec<Action>,
    pub resolution: Resolution,
    pub sentiment_trajectory: SentimentTrajectory,
}
