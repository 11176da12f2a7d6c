// src/fetch/retry.rs
use std::thread;
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use tracing::warn;

use crate::errors::SyncError;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 50,
            initial_delay: Duration::from_secs(1),
        }
    }
}

/// Explicit backoff state for the retry loop.
///
/// A server-provided `Retry-After` hint is used verbatim and leaves the
/// doubling state untouched; without a hint the current delay is used and
/// doubled for the next step (1s, 2s, 4s, ...).
#[derive(Debug)]
pub struct Backoff {
    delay: Duration,
}

impl Backoff {
    pub fn new(initial: Duration) -> Self {
        Self { delay: initial }
    }

    pub fn next_wait(&mut self, hint: Option<Duration>) -> Duration {
        match hint {
            Some(h) => h,
            None => {
                let current = self.delay;
                self.delay = self.delay.saturating_mul(2);
                current
            }
        }
    }
}

fn retry_after_hint(headers: &HeaderMap) -> Option<Duration> {
    let secs: u64 = headers.get(RETRY_AFTER)?.to_str().ok()?.trim().parse().ok()?;
    Some(Duration::from_secs(secs))
}

/// GET `url` with bearer auth, retrying rate-limit (429) responses.
///
/// Any other error status is returned immediately as `Upstream`; a
/// transport failure (no response at all) is `Network` and never retried.
pub fn fetch_with_retry(
    client: &Client,
    url: &str,
    bearer_token: &str,
    policy: RetryPolicy,
) -> Result<Response, SyncError> {
    let mut backoff = Backoff::new(policy.initial_delay);
    let mut attempts: u32 = 0;

    loop {
        let resp = client
            .get(url)
            .bearer_auth(bearer_token)
            .send()
            .map_err(|e| SyncError::Network(format!("{url}: {e}")))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        if status != StatusCode::TOO_MANY_REQUESTS {
            let body = resp.text().unwrap_or_default();
            return Err(SyncError::Upstream {
                url: url.to_string(),
                status,
                body,
            });
        }

        if attempts >= policy.max_retries {
            return Err(SyncError::FetchExhausted {
                url: url.to_string(),
                status,
            });
        }
        attempts += 1;

        let wait = backoff.next_wait(retry_after_hint(resp.headers()));
        warn!(
            url,
            attempt = attempts,
            wait_secs = wait.as_secs_f64(),
            "Rate limit hit, backing off"
        );
        thread::sleep(wait);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn backoff_doubles_without_hints() {
        let mut backoff = Backoff::new(Duration::from_secs(1));

        // Delay before attempt n is initial * 2^(n-1).
        let waits: Vec<u64> = (0..5).map(|_| backoff.next_wait(None).as_secs()).collect();
        assert_eq!(waits, vec![1, 2, 4, 8, 16]);
    }

    #[test]
    fn hint_is_used_verbatim_and_does_not_advance_state() {
        let mut backoff = Backoff::new(Duration::from_secs(1));

        assert_eq!(backoff.next_wait(None).as_secs(), 1);
        assert_eq!(backoff.next_wait(Some(Duration::from_secs(30))).as_secs(), 30);
        // Doubling picks up where it left off.
        assert_eq!(backoff.next_wait(None).as_secs(), 2);
        assert_eq!(backoff.next_wait(None).as_secs(), 4);
    }

    #[test]
    fn retry_after_header_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(retry_after_hint(&headers), None);

        headers.insert(RETRY_AFTER, HeaderValue::from_static("7"));
        assert_eq!(retry_after_hint(&headers), Some(Duration::from_secs(7)));

        // HTTP-date form is not a seconds count; treated as no hint.
        headers.insert(
            RETRY_AFTER,
            HeaderValue::from_static("Wed, 21 Oct 2026 07:28:00 GMT"),
        );
        assert_eq!(retry_after_hint(&headers), None);
    }
}
