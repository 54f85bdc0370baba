//! Client for the external CLIP classification service.
//!
//! Translates the gateway's operations (analyze, re-examine, refresh, health)
//! into single-attempt HTTP calls with a bounded timeout, and decodes the
//! JSON replies into [`guesser_core`] types.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod classifier;
pub mod client;
pub mod config;
pub mod error;

pub use classifier::Classifier;
pub use client::ClipClient;
pub use config::ClipConfig;
pub use error::{ClipError, Endpoint};
