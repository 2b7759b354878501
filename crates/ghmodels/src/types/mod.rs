//! Request and response records exchanged with the inference API.
//!
//! These are plain value types. Response-side records decode leniently:
//! missing fields fall back to their defaults.

mod catalog;
mod chat;
mod message;

pub use catalog::Model;
pub use chat::{ChatRequest, ChatResponse, Choice, Usage};
pub use message::{Message, Role};
