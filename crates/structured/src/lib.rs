//! Structured-data encoder for the CLM compressor
//!
//! Schema-first compression of homogeneous record collections: one
//! `{k1,k2,...}` header, one `[v1,v2,...]` row per record, with
//! importance-based field filtering and deterministic ordering.

pub mod config;
pub mod encoder;

pub use config::{FieldImportance, SdCompressionConfig};
pub use encoder::{SdEncoder, COMPONENT};
