//! Core types for the anime guesser gateway.
//!
//! Defines the classification result returned by the CLIP service and the
//! inbound request bodies accepted by the gateway, together with their JSON
//! wire format.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod character;
pub mod error;
pub mod request;

pub use character::{Character, ClassificationResult};
pub use error::CoreError;
pub use request::{AnalyzeRequest, ReExamineRequest};
