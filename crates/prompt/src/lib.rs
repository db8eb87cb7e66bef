//! System-prompt encoder for the CLM compressor
//!
//! Turns a natural-language prompt into the canonical token sequence
//! `[REQ:...] [TARGET:...] [EXTRACT:...] [CTX:...] [OUT_...:...]`:
//! - intent detection (`intent`): signals, artifacts, fallbacks
//! - target extraction (`target`): ordered extractor pipeline plus
//!   normalization
//! - attribute parsing (`attributes`, `context`): quantifiers, numeric
//!   specifications, extraction fields, stylistic constraints
//! - output-schema analysis (`output_format`)
//! - token assembly (`tokenizer`)

pub mod attributes;
pub mod context;
pub mod encoder;
pub mod intent;
pub mod output_format;
pub mod target;
pub mod tokenizer;

pub use attributes::AttributeParser;
pub use context::ContextParser;
pub use encoder::{SysPromptConfig, SysPromptEncoder, COMPONENT};
pub use intent::{Artifact, IntentDetector, Signal};
pub use output_format::OutputFormatAnalyzer;
pub use target::TargetExtractor;
pub use tokenizer::Tokenizer;
