use std::time::Duration;

use reqwest::{RequestBuilder, Response};

use crate::error::{unexpected_error, upstream_error, Error};

/// Extra attempts after the first one fails.
pub const MAX_RETRIES: u32 = 2;
const RETRY_DELAY_MS: u64 = 100;

/// Sends an idempotent GET, retrying on transport errors and non-2xx statuses.
#[tracing::instrument(skip(request))]
pub async fn get_with_retry(request: RequestBuilder, provider: &str) -> Result<Response, Error> {
    let mut attempt = 0;

    loop {
        let pending = request
            .try_clone()
            .ok_or_else(|| unexpected_error(format!("{} request cannot be retried", provider)))?;

        let failure = match pending.send().await {
            Ok(res) if res.status().is_success() => return Ok(res),
            Ok(res) => format!("status {} returned from {}", res.status(), provider),
            Err(err) => format!("error on {} api request: {}", provider, err),
        };

        if attempt >= MAX_RETRIES {
            return Err(upstream_error(failure));
        }

        attempt += 1;
        tracing::warn!(provider, attempt, error = %failure, "retrying request");
        tokio::time::sleep(Duration::from_millis(RETRY_DELAY_MS * attempt as u64)).await;
    }
}

/// Cuts long upstream bodies down before they end up in logs.
pub fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;

    match body.char_indices().nth(MAX) {
        Some((end, _)) => &body[..end],
        None => body,
    }
}
