use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::{NoContext, Timestamp};

pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct CookwiseConfig {
    pub database: DatabaseConfig,
    pub llm: LLMConfig,
    pub generation: GenerationSettings,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.name
        )
    }
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
}

/// Knobs shared by every generation call the services make.
#[derive(Clone, Debug)]
pub struct GenerationSettings {
    pub suggestion_temperature: f32,
    pub recipe_temperature: f32,
    pub extraction_temperature: f32,
    /// Upper bound for one object call, or for collecting a whole stream.
    pub timeout: Duration,
    /// How many of the most recently shown names go into the exclude clause.
    /// `None` renders all of them; the exclude set itself is never trimmed.
    pub exclude_prompt_limit: Option<usize>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            suggestion_temperature: 0.85,
            recipe_temperature: 0.7,
            extraction_temperature: 0.2,
            timeout: Duration::from_secs(60),
            exclude_prompt_limit: None,
        }
    }
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
