use std::{future::Future, pin::Pin};

use futures::Stream;

use crate::domain::common::entities::app_errors::CoreError;

/// Lazy, finite and non-restartable sequence of generated text fragments.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String, CoreError>> + Send>>;

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectGenerationRequest {
    pub prompt: String,
    pub system_prompt: Option<String>,
    pub response_schema: serde_json::Value,
    pub temperature: Option<f32>,
}

/// LLM Client trait for calling AI models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    /// Constrained-object mode. Returns the raw JSON text of the object.
    fn generate_object(
        &self,
        request: ObjectGenerationRequest,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    /// Streaming-text mode.
    fn generate_stream(
        &self,
        prompt: String,
        system_prompt: String,
    ) -> impl Future<Output = Result<TextStream, CoreError>> + Send;
}
