//! Serializers for digests.
//!
//! Plain text rendering is [`Digest::render`](crate::Digest::render); this
//! module adds structured output for tooling.

pub mod json;

pub use json::{JsonOptions, JsonSerializer};
