#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod http;
mod error;
#[cfg(test)]
mod testing;

pub mod endpoints;
pub mod rate_limit;
pub mod types;

pub use crate::http::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, ModelsClient};
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::rate_limit::RateLimitInfo;
pub use crate::types::{ChatRequest, ChatResponse, Choice, Message, Model, Role, Usage};

/// Tracing target for transport client operations.
pub const TRACING_TARGET_CLIENT: &str = "ghmodels::client";

/// Tracing target for rate-limit header extraction.
pub const TRACING_TARGET_RATE_LIMIT: &str = "ghmodels::rate_limit";
