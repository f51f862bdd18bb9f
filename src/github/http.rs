//! Response classification shared by every GitHub request.
//!
//! GitHub reports an exhausted quota with `403` as well as `429`; both carry
//! `X-RateLimit-Reset` (unix seconds). Other APIs send `Retry-After` (seconds
//! from now). Either is turned into a local `HH:MM:SS` string for display.

use super::error::FetchError;
use chrono::{DateTime, Local, Utc};
use reqwest::StatusCode;

const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

/// Pass a successful response through, or classify the failure.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, FetchError> {
    let status = resp.status();
    if status == StatusCode::NOT_FOUND {
        return Err(FetchError::NotFound);
    }
    if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::FORBIDDEN {
        return Err(FetchError::RateLimited {
            retry_after: parse_retry_after(&resp),
        });
    }
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            text: status.canonical_reason().unwrap_or("Unknown").to_string(),
        });
    }
    Ok(resp)
}

/// Reset time from `X-RateLimit-Reset`, falling back to `Retry-After`.
fn parse_retry_after(resp: &reqwest::Response) -> Option<String> {
    let header = |name: &str| {
        resp.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<i64>().ok())
    };

    if let Some(epoch) = header(RATE_LIMIT_RESET) {
        return format_reset(epoch);
    }
    header(reqwest::header::RETRY_AFTER.as_str())
        .and_then(|secs| Utc::now().timestamp().checked_add(secs))
        .and_then(format_reset)
}

/// Format a unix timestamp as local wall-clock time.
fn format_reset(epoch_secs: i64) -> Option<String> {
    DateTime::from_timestamp(epoch_secs, 0)
        .map(|t| t.with_timezone(&Local).format("%H:%M:%S").to_string())
}
