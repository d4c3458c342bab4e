use std::{future::Future, time::Duration};

use serde::de::DeserializeOwned;
use tracing::error;

use crate::domain::common::entities::app_errors::CoreError;

/// Decodes a constrained-object response, tolerating a markdown code fence
/// around the JSON.
pub fn decode_generated<T>(raw: &str) -> Result<T, CoreError>
where
    T: DeserializeOwned,
{
    let body = strip_code_fence(raw);

    serde_json::from_str(body).map_err(|e| {
        error!("Failed to decode LLM object: {}", e);
        CoreError::Generation(format!("Invalid object returned by model: {}", e))
    })
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Runs a generation future under the configured upper bound.
pub async fn with_timeout<F, T>(timeout: Duration, future: F) -> Result<T, CoreError>
where
    F: Future<Output = Result<T, CoreError>>,
{
    tokio::time::timeout(timeout, future).await.map_err(|_| {
        error!("Generation timed out after {:?}", timeout);
        CoreError::Generation(format!("Generation timed out after {}s", timeout.as_secs()))
    })?
}
