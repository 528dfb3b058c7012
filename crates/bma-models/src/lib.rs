//! Shared data models for the Brand Media Analyzer.
//!
//! This crate provides:
//! - The typed `BrandAnalysis` record and its nested types
//! - The canonical schema contract the model output must conform to
//! - The validator/normalizer that turns raw model output into a record

pub mod analysis;
pub mod schema;
pub mod validate;

pub use analysis::{
    AudienceProfile, BrandAnalysis, BrandMatch, ValuesTone, VideoAsset, MAX_VIDEO_BYTES,
};
pub use schema::{response_schema, top_level_fields, FieldKind, FieldSpec, CONTRACT};
pub use validate::{validate, ValidationError, ValidationResult};
