//! Google Gemini collaborator over the `generateContent` REST endpoint.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use fitpath_db::models::{Language, PlanItem, UserProfile};

use super::collaborator::Collaborator;
use super::prompts;
use super::schema;
use super::types::{AiError, NutritionEstimate, PlanDraft, ReviewResult};

/// Default model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Base URL for the Gemini API.
pub const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const API_KEY_HEADER: &str = "x-goog-api-key";
const JSON_MIME_TYPE: &str = "application/json";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Connection settings for [`GeminiClient`].
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_owned(),
            base_url: API_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `{base_url}/models/{model}:generateContent`
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn user(text: String) -> Self {
        Self {
            role: Some("user".to_owned()),
            parts: vec![Part { text: Some(text) }],
        }
    }

    fn system(text: String) -> Self {
        Self {
            role: None,
            parts: vec![Part { text: Some(text) }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<u16>,
    message: String,
}

/// Extract the concatenated text of the first candidate.
///
/// A response without candidates or text yields an empty string; an
/// embedded `error` object becomes [`AiError::Api`].
pub fn extract_text(body: &str) -> Result<String, AiError> {
    let response: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| AiError::invalid(format!("malformed generateContent response: {e}")))?;

    if let Some(error) = response.error {
        return Err(AiError::Api {
            status: error.code.unwrap_or(200),
            message: error.message,
        });
    }

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Ok(String::new());
    };
    if let Some(reason) = candidate.finish_reason.as_deref() {
        if reason != "STOP" {
            debug!(finish_reason = reason, "candidate finished early");
        }
    }

    Ok(candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default())
}

/// Pull a readable message out of an error response body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<GenerateResponse>(body)
        .ok()
        .and_then(|r| r.error)
        .map_or_else(|| body.trim().to_owned(), |e| e.message)
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Collaborator backed by the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http: Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, AiError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Send one prompt and return the reply text (possibly empty).
    #[instrument(skip_all, fields(model = %self.config.model))]
    async fn generate(
        &self,
        prompt: String,
        system_instruction: Option<String>,
        response_schema: Option<Value>,
    ) -> Result<String, AiError> {
        let request = GenerateRequest {
            contents: vec![Content::user(prompt)],
            system_instruction: system_instruction.map(Content::system),
            generation_config: response_schema.map(|schema| GenerationConfig {
                response_mime_type: JSON_MIME_TYPE,
                response_schema: schema,
            }),
        };

        debug!("sending generateContent request");
        let response = self
            .http
            .post(self.config.endpoint())
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let message = api_error_message(&body);
            warn!(status = status.as_u16(), %message, "Gemini API error");
            return Err(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let text = extract_text(&body)?;
        debug!(chars = text.len(), "generateContent reply received");
        Ok(text)
    }
}

#[async_trait]
impl Collaborator for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate_plan(
        &self,
        profile: &UserProfile,
        adjustment: Option<&str>,
        language: Language,
    ) -> Result<Vec<PlanDraft>, AiError> {
        let text = self
            .generate(
                prompts::plan_prompt(profile, adjustment, language),
                Some(prompts::plan_system_instruction(language)),
                Some(schema::plan_schema()),
            )
            .await?;
        schema::parse_plan(&text)
    }

    async fn generate_briefing(
        &self,
        profile: &UserProfile,
        plan: &[PlanItem],
        language: Language,
    ) -> Result<String, AiError> {
        let text = self
            .generate(prompts::briefing_prompt(profile, plan, language), None, None)
            .await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(AiError::EmptyResponse);
        }
        Ok(text.to_owned())
    }

    async fn review_day(
        &self,
        profile: &UserProfile,
        plan: &[PlanItem],
        feedback: &str,
        language: Language,
    ) -> Result<ReviewResult, AiError> {
        let text = self
            .generate(
                prompts::review_prompt(profile, plan, feedback, language),
                None,
                Some(schema::review_schema()),
            )
            .await?;
        schema::parse_review(&text)
    }

    async fn analyze_food(
        &self,
        description: &str,
        language: Language,
    ) -> Result<NutritionEstimate, AiError> {
        let text = self
            .generate(
                prompts::food_prompt(description, language),
                None,
                Some(schema::food_schema()),
            )
            .await?;
        schema::parse_food(&text)
    }
}
