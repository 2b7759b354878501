//! Transport client.
//!
//! [`ModelsClient`] holds the bearer token, the base URL and a reusable
//! reqwest handle. Each operation performs exactly one HTTP round trip.

mod client;
mod config;

pub use client::ModelsClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
