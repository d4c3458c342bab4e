use std::{
    pin::Pin,
    task::{Context, Poll},
    time::Duration,
};

use futures::{Stream, StreamExt, stream};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::domain::{
    common::entities::app_errors::CoreError,
    generation::{helpers::with_timeout, ports::TextStream},
};

/// Cloneable abort signal for an in-flight stream.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamOutcome {
    Completed(String),
    /// Aborted by the consumer. Whatever arrived before is dropped.
    Cancelled,
}

/// A recipe text stream that stops delivering chunks once cancelled.
pub struct RecipeStream {
    inner: TextStream,
    handle: CancelHandle,
}

impl RecipeStream {
    pub fn new(source: TextStream) -> Self {
        Self::build(source, None)
    }

    /// Once `deadline` passes, yields one `Generation` error, cancels itself
    /// and ends.
    pub fn with_deadline(source: TextStream, deadline: Instant) -> Self {
        Self::build(source, Some(deadline))
    }

    fn build(source: TextStream, deadline: Option<Instant>) -> Self {
        let handle = CancelHandle::new();
        let token = handle.token.clone();

        let inner = stream::unfold(Some((source, token)), move |state| async move {
            let (mut source, token) = state?;
            let expired = async {
                match deadline {
                    Some(deadline) => tokio::time::sleep_until(deadline).await,
                    None => std::future::pending().await,
                }
            };

            tokio::select! {
                biased;
                _ = token.cancelled() => None,
                next = source.next() => next.map(|item| (item, Some((source, token)))),
                _ = expired => {
                    token.cancel();
                    warn!("Recipe stream passed its deadline");
                    Some((
                        Err(CoreError::Generation("Recipe generation timed out".to_string())),
                        None,
                    ))
                }
            }
        });

        Self {
            inner: Box::pin(inner),
            handle,
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.handle.clone()
    }

    pub fn cancel(&self) {
        self.handle.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.handle.is_cancelled()
    }

    /// Concatenates every chunk. The first chunk error aborts with that error.
    pub async fn collect_text(mut self) -> Result<StreamOutcome, CoreError> {
        let mut buffer = String::new();

        while let Some(chunk) = self.inner.next().await {
            buffer.push_str(&chunk?);
        }

        if self.handle.is_cancelled() {
            debug!("Recipe stream cancelled, discarding {} bytes", buffer.len());
            return Ok(StreamOutcome::Cancelled);
        }

        Ok(StreamOutcome::Completed(buffer))
    }

    /// Like [`RecipeStream::collect_text`], bounded by `timeout`.
    pub async fn collect_text_within(self, timeout: Duration) -> Result<StreamOutcome, CoreError> {
        with_timeout(timeout, self.collect_text()).await
    }
}

impl Stream for RecipeStream {
    type Item = Result<String, CoreError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl std::fmt::Debug for RecipeStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeStream")
            .field("cancelled", &self.handle.is_cancelled())
            .finish()
    }
}
