//! HTTP API gateway for the anime guesser.
//!
//! Exposes `/api/*` routes that validate inbound requests and relay them to
//! the CLIP classification service through a [`guesser_clip::Classifier`].

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod routes;
