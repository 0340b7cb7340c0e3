use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::interview::{InterviewDuration, InterviewStatus, DEFAULT_COLOR};
use crate::models::parse::{FormFieldPatch, ModelSelector};
use crate::utils::logger::LOGGER;

/// Fixed instruction sent as the system message. The provider is asked for a
/// JSON-constrained response holding exactly the seven form fields.
const SYSTEM_INSTRUCTION: &str = r#"You are a professional interview information extraction assistant. Extract the interview details from the text below and return them as JSON.

The information to extract:
1. Company name (companyName)
2. Position title (position)
3. Interview date in YYYY-MM-DD format (date)
4. Start time in HH:MM format (startTime)
5. Interview duration, one of: "30min", "1h", "1.5h", "2h", "2.5h", "3h" (duration)
6. Interview location (location)
7. Additional notes (notes)

Return the result in exactly this JSON shape:
{
  "companyName": "company name",
  "position": "position title",
  "date": "YYYY-MM-DD",
  "startTime": "HH:MM",
  "duration": "interview duration",
  "location": "interview location",
  "notes": "additional notes"
}

If a piece of information cannot be extracted from the text, return an empty string for that field. Make sure the returned JSON is well-formed and parseable."#;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    response_format: ResponseFormat,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// The seven fields the model is asked for. Fields that are absent or an
/// explicit JSON `null` both deserialize to `None`, which downstream
/// defaulting treats as "not extracted".
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtractedFields {
    #[serde(default)]
    company_name: Option<String>,
    #[serde(default)]
    position: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    start_time: Option<String>,
    #[serde(default)]
    duration: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Debug, thiserror::Error)]
enum ExtractError {
    #[error("request to provider failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("provider response contained no choices")]
    EmptyChoices,
    #[error("completion content was not valid JSON: {0}")]
    Content(#[from] serde_json::Error),
}

/// Forwards free text to a chat-completion endpoint and normalizes the reply
/// into form-field values. One blocking round trip, no retry, no streaming;
/// every failure degrades to the minimal status/color patch so the caller
/// never sees an error.
#[derive(Debug, Clone)]
pub struct ExtractionGateway {
    client: reqwest::Client,
    endpoint_override: Option<String>,
}

impl ExtractionGateway {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint_override: None,
        }
    }

    /// Route every provider to a fixed URL instead of the provider table.
    /// Used by tests to point the gateway at a local mock.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint_override = Some(endpoint.into());
        self
    }

    pub async fn extract(&self, text: &str, selector: &ModelSelector) -> FormFieldPatch {
        match self.call_provider(text, selector).await {
            Ok(fields) => patch_from_fields(fields),
            Err(e) => {
                LOGGER.log_error(
                    &e.to_string(),
                    [(
                        "component".to_string(),
                        serde_json::Value::String("extraction_gateway".to_string()),
                    )]
                    .iter()
                    .cloned()
                    .collect::<HashMap<_, _>>(),
                );
                FormFieldPatch::minimal()
            }
        }
    }

    async fn call_provider(
        &self,
        text: &str,
        selector: &ModelSelector,
    ) -> Result<ExtractedFields, ExtractError> {
        let endpoint = self
            .endpoint_override
            .as_deref()
            .unwrap_or_else(|| selector.provider.endpoint());

        let request = ChatCompletionRequest {
            model: selector.model_id().to_string(),
            response_format: ResponseFormat {
                format_type: "json_object",
            },
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_INSTRUCTION.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: text.to_string(),
                },
            ],
        };

        let response = self
            .client
            .post(endpoint)
            .header("Authorization", format!("Bearer {}", selector.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Status(status));
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let choice = completion.choices.first().ok_or(ExtractError::EmptyChoices)?;
        let fields: ExtractedFields = serde_json::from_str(&choice.message.content)?;

        Ok(fields)
    }
}

impl Default for ExtractionGateway {
    fn default() -> Self {
        Self::new()
    }
}

/// Successful extraction: every text field is present (empty when the model
/// found nothing), duration defaults to one hour, and status/color are
/// force-set regardless of model output.
fn patch_from_fields(fields: ExtractedFields) -> FormFieldPatch {
    let duration = match fields.duration.unwrap_or_default() {
        d if d.is_empty() => InterviewDuration::OneHour,
        d => InterviewDuration::from(d),
    };

    FormFieldPatch {
        company_name: Some(fields.company_name.unwrap_or_default()),
        position: Some(fields.position.unwrap_or_default()),
        date: Some(fields.date.unwrap_or_default()),
        start_time: Some(fields.start_time.unwrap_or_default()),
        duration: Some(duration),
        location: Some(fields.location.unwrap_or_default()),
        notes: Some(fields.notes.unwrap_or_default()),
        status: InterviewStatus::Scheduled,
        color: DEFAULT_COLOR.to_string(),
    }
}
