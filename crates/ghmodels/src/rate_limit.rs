//! Rate-limit window reported through response headers.
//!
//! The service reports its quota in four optional headers. Each one that is
//! present and starts with a base-10 integer (optional sign, then digits)
//! fills the matching field of [`RateLimitInfo`] with that integer; trailing
//! text is ignored. Anything else leaves the field at zero. Extraction never
//! fails.

use std::time::Duration;

use jiff::Timestamp;
use reqwest::header::{HeaderMap, HeaderName, RETRY_AFTER};
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_RATE_LIMIT;

/// Maximum number of requests allowed in the current window.
pub const X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");

/// Requests left in the current window.
pub const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");

/// Unix timestamp at which the current window resets.
pub const X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// Rate-limit information attached to every chat response.
///
/// A zero field means the header was absent or unparsable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RateLimitInfo {
    /// `X-RateLimit-Limit`: requests allowed per window.
    pub limit: i64,
    /// `X-RateLimit-Remaining`: requests left in the window.
    pub remaining: i64,
    /// `X-RateLimit-Reset`: unix timestamp (seconds) of the next reset.
    pub reset: i64,
    /// `Retry-After`: seconds to wait, usually only sent with a 429.
    pub retry_after: i64,
}

impl RateLimitInfo {
    /// Extracts rate-limit information from response headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            limit: parse_header(headers, &X_RATELIMIT_LIMIT),
            remaining: parse_header(headers, &X_RATELIMIT_REMAINING),
            reset: parse_header(headers, &X_RATELIMIT_RESET),
            retry_after: parse_header(headers, &RETRY_AFTER),
        }
    }

    /// Returns the reset time, or `None` when the service did not report one.
    pub fn reset_at(&self) -> Option<Timestamp> {
        if self.reset <= 0 {
            return None;
        }
        Timestamp::from_second(self.reset).ok()
    }

    /// Returns how long to wait before retrying, if the service said so.
    pub fn retry_after(&self) -> Option<Duration> {
        u64::try_from(self.retry_after)
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Returns whether a known quota has been used up.
    pub fn is_exhausted(&self) -> bool {
        self.limit > 0 && self.remaining <= 0
    }
}

fn parse_header(headers: &HeaderMap, name: &HeaderName) -> i64 {
    let Some(raw) = headers.get(name).and_then(|value| value.to_str().ok()) else {
        return 0;
    };

    if raw.trim().is_empty() {
        return 0;
    }

    leading_integer(raw).unwrap_or_else(|| {
        tracing::trace!(
            target: TRACING_TARGET_RATE_LIMIT,
            header = %name,
            value = raw,
            "Ignoring unparsable rate-limit header"
        );
        0
    })
}

/// Parses the integer at the start of `raw`, skipping leading whitespace.
///
/// Returns `None` when there are no digits or the value overflows `i64`.
fn leading_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let sign_len = usize::from(raw.starts_with(['+', '-']));
    let digit_len = raw[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();

    if digit_len == 0 {
        return None;
    }

    raw[..sign_len + digit_len].parse().ok()
}
