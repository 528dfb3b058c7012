//! Google Cloud Storage blob store adapter.
//!
//! This crate provides:
//! - Durable video upload to a GCS bucket via the JSON media-upload API
//! - Stable `gs://` URI assignment for persisted objects
//! - Cached, refresh-margined service-account bearer tokens
//! - The [`BlobStore`] seam trait the pipeline is generic over

pub mod client;
pub mod error;
pub mod token;

pub use client::{BlobStore, GcsClient, GcsConfig, StoredVideo};
pub use error::{StorageError, StorageResult};
pub use token::{AccessTokenSource, TokenCache, GCS_SCOPE};
