use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::{
    domain::{
        common::{LLMConfig, entities::app_errors::CoreError},
        generation::ports::{LLMClient, ObjectGenerationRequest, TextStream},
    },
    infrastructure::llm::sse::sse_text_stream,
};

#[derive(Debug, Clone)]
pub struct GeminiLLMClient {
    api_key: String,
    model_name: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Default, Serialize)]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    #[serde(default)]
    message: String,
}

impl GeminiResponse {
    /// Text of every part of the first candidate, concatenated.
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        (!text.is_empty()).then_some(text)
    }
}

impl GeminiLLMClient {
    pub fn new(config: &LLMConfig) -> Self {
        Self {
            api_key: config.gemini_api_key.clone(),
            model_name: config.gemini_model.clone(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn build_request(
        prompt: String,
        system_prompt: Option<String>,
        generation_config: Option<GenerationConfig>,
    ) -> GeminiRequest {
        GeminiRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: system_prompt.map(|text| Content {
                role: None,
                parts: vec![Part { text }],
            }),
            generation_config,
        }
    }

    async fn post(
        &self,
        method: &str,
        query: &[(&str, &str)],
        request: &GeminiRequest,
    ) -> Result<Response, CoreError> {
        let url = format!("{}/models/{}:{}", self.base_url, self.model_name, method);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .query(query)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!("Gemini API request failed: {}", e);
                CoreError::Generation(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Gemini API error: {} - {}", status, error_text);
            return Err(CoreError::Generation(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        Ok(response)
    }
}

/// Maps one streamed `data:` payload to its text, skipping empty deltas.
fn parse_stream_payload(data: &str) -> Option<Result<String, CoreError>> {
    match serde_json::from_str::<GeminiResponse>(data) {
        Ok(GeminiResponse {
            error: Some(err), ..
        }) => {
            error!("Gemini stream error: {}", err.message);
            Some(Err(CoreError::Generation(format!(
                "LLM stream error: {}",
                err.message
            ))))
        }
        Ok(response) => response.text().map(Ok),
        Err(e) => {
            error!("Failed to parse Gemini stream chunk: {}", e);
            Some(Err(CoreError::Generation(format!(
                "Failed to parse LLM stream chunk: {}",
                e
            ))))
        }
    }
}

impl LLMClient for GeminiLLMClient {
    #[instrument(skip(self, request), fields(model = %self.model_name))]
    async fn generate_object(&self, request: ObjectGenerationRequest) -> Result<String, CoreError> {
        let body = Self::build_request(
            request.prompt,
            request.system_prompt,
            Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(request.response_schema),
                temperature: request.temperature,
            }),
        );

        let response = self.post("generateContent", &[], &body).await?;

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            error!("Failed to parse Gemini response: {}", e);
            CoreError::Generation(format!("Failed to parse LLM response: {}", e))
        })?;

        gemini_response
            .text()
            .ok_or_else(|| CoreError::Generation("No response from LLM".to_string()))
    }

    #[instrument(skip(self, prompt, system_prompt), fields(model = %self.model_name))]
    async fn generate_stream(
        &self,
        prompt: String,
        system_prompt: String,
    ) -> Result<TextStream, CoreError> {
        let body = Self::build_request(prompt, Some(system_prompt), None);

        let response = self
            .post("streamGenerateContent", &[("alt", "sse")], &body)
            .await?;
        debug!("Gemini stream opened");

        Ok(sse_text_stream(
            Box::pin(response.bytes_stream()),
            parse_stream_payload,
        ))
    }
}
