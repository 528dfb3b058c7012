//! Presentation-layer consumers of the validated analysis record.
//!
//! Everything here borrows a `&BrandAnalysis` read-only and produces
//! pure data: chart specs for a frontend to draw, and a markdown report
//! for sharing. No styling, no layout.

pub mod chart;
pub mod report;

pub use chart::{build_chart, standard_charts, ChartKind, ChartSpec, Dimension};
pub use report::render_markdown;
