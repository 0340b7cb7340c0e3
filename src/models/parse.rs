use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::interview::{InterviewDuration, InterviewStatus, DEFAULT_COLOR};

/// Body of `POST /parse`, mirroring the dashboard's paste-and-parse dialog.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ParseRequest {
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,
    pub api_key: String,
    /// Provider-specific model id; falls back to the provider default.
    pub model: Option<String>,
    pub model_type: ModelProvider,
}

/// Supported chat-completion providers. Both speak the OpenAI wire shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    OpenAi,
    DeepSeek,
}

impl ModelProvider {
    pub fn endpoint(&self) -> &'static str {
        match self {
            ModelProvider::OpenAi => "https://api.openai.com/v1/chat/completions",
            ModelProvider::DeepSeek => "https://api.deepseek.com/chat/completions",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ModelProvider::OpenAi => "gpt-4o-mini",
            ModelProvider::DeepSeek => "deepseek-chat",
        }
    }
}

/// Provider + credentials + optional model override, resolved from the
/// request body before the gateway is invoked.
#[derive(Debug, Clone)]
pub struct ModelSelector {
    pub provider: ModelProvider,
    pub api_key: String,
    pub model: Option<String>,
}

impl ModelSelector {
    pub fn model_id(&self) -> &str {
        self.model
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| self.provider.default_model())
    }
}

impl From<&ParseRequest> for ModelSelector {
    fn from(request: &ParseRequest) -> Self {
        Self {
            provider: request.model_type,
            api_key: request.api_key.clone(),
            model: request.model.clone(),
        }
    }
}

/// Gateway output: the form fields the model managed to extract. Text fields
/// are always present after a successful extraction (empty string when the
/// model found nothing); after a failed one only `status` and `color` remain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFieldPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<InterviewDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: InterviewStatus,
    pub color: String,
}

impl FormFieldPatch {
    /// The degraded patch returned when the round trip or the inner JSON
    /// parse fails: no extracted fields, just the forced defaults.
    pub fn minimal() -> Self {
        Self {
            company_name: None,
            position: None,
            date: None,
            start_time: None,
            duration: None,
            location: None,
            notes: None,
            status: InterviewStatus::Scheduled,
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub data: FormFieldPatch,
}
