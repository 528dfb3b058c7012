//! Gemini inference gateway.
//!
//! The sole point of interaction with the AI backend. One
//! `generateContent` call per invocation, carrying the video reference,
//! the rendered prompt, and the response schema constraint. The gateway
//! transports; it never interprets the payload's semantic content.

pub mod client;
pub mod error;
pub mod prompt;
pub mod types;

pub use client::{GeminiClient, GeminiConfig, InferenceModel};
pub use error::{GatewayError, GatewayResult};
pub use prompt::{render_prompt, PROMPT_DIMENSIONS, PROMPT_TEMPLATE, PROMPT_VERSION};
