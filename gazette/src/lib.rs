//! gazette
//!
//! The market-briefing pipeline: sweep per-symbol snapshots concurrently
//! with isolated failure handling, absorb optional news enrichment, submit
//! the combined evidence to a multi-agent analysis service, and
//! conditionally email the resulting briefing.
//!
//! The pipeline addresses each external service through the traits in
//! [`gazette_core::source`], so any of them can be swapped for fakes in
//! tests or alternative providers in production wiring.
#![warn(missing_docs)]

/// Concurrent per-symbol market sweep.
pub mod aggregate;
/// Analysis request assembly and reply formatting.
pub mod briefing;
/// News enrichment with total failure absorption.
pub mod enrich;
/// Briefing email construction and delivery.
pub mod notify;
/// The top-level pipeline.
pub mod pipeline;

pub use pipeline::{Pipeline, PipelineBuilder};
