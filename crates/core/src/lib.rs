//! Core types for the CLM compressor
//!
//! This crate provides the foundations shared by every encoder:
//! - Output envelope (`ClmOutput`) with token accounting and the
//!   expansion safeguard
//! - Token IR: `Intent`, `Target`, `Context`, `ExtractionField`,
//!   `OutputSchema` and their serialized token forms
//! - Input classifier (`classify`) routing to the encoders
//! - The `NlpProvider` trait and its `Doc` document model
//! - Error types

pub mod classify;
pub mod envelope;
pub mod error;
pub mod nlp;
pub mod token;

pub use classify::{classify, InputKind};
pub use envelope::{estimate_tokens, normalize_whitespace, ClmOutput, Metadata, OriginalInput};
pub use error::{ClmError, Result};
pub use nlp::{Doc, Entity, EntityLabel, NlpProvider, Pos, Word};
pub use token::{
    default_domain, Aspect, Context, ExtractionField, Intent, OutputField, OutputFormatType,
    OutputSchema, Req, Target,
};
