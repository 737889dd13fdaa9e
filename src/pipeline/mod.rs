//! Per-item pipeline stages between fetch and store
//!
//! The dedup gate decides whether an item is new; the sink composes and
//! writes the persisted record. Both are invoked by the orchestrator once
//! per accepted item, strictly in that order.

mod dedup;
mod sink;

pub use dedup::{check_link, DedupDecision};
pub use sink::{compose_record, persist};
