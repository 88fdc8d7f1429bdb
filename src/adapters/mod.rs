//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - scam classifiers and reply generators, rule-based and
//!   model-backed
//! - `storage` - conversation repositories (in-memory, YAML files)

pub mod ai;
pub mod storage;
