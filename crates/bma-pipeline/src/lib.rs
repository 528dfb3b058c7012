//! Analysis pipeline orchestrator.
//!
//! Wires the blob store and the inference gateway into the single entry
//! point the rest of the system calls:
//! `Analyzer::run_analysis(bytes, size, filename) -> BrandAnalysis`.
//!
//! One logical pipeline per request; no mutable state is shared between
//! runs.

pub mod analyzer;
pub mod error;
pub mod retry;

pub use analyzer::{Analyzer, AnalyzerConfig};
pub use error::{PipelineError, PipelineResult};
pub use retry::{retry_async, RetryPolicy};
