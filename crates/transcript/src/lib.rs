//! Transcript encoder for the CLM compressor
//!
//! Conversational analysis over `speaker: text` transcripts:
//! - turn parsing and speaker normalization (`turns`)
//! - per-turn sentiment, entities, and temporal digests (`sentiment`,
//!   `entities`, `temporal`)
//! - aggregation into call facts (`analyzer`)
//! - token serialization (`encoder`)

pub mod analyzer;
pub mod encoder;
pub mod entities;
pub mod sentiment;
pub mod temporal;
pub mod turns;
pub mod types;

pub use analyzer::TranscriptAnalyzer;
pub use encoder::{TranscriptEncoder, COMPONENT};
pub use entities::EntityExtractor;
pub use sentiment::SentimentAnalyzer;
pub use temporal::TemporalAnalyzer;
pub use turns::parse_turns;
pub use types::{
    Action, CallInfo, CustomerProfile, Issue, Resolution, SentimentTrajectory, Speaker,
    TemporalPattern, TranscriptAnalysis, Turn,
};
