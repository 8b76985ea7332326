/// LLM client: the single point of entry for generative-text calls.
///
/// Wraps the Gemini `generateContent` endpoint. Requests carry an optional
/// inline attachment (base64 bytes plus media type) next to the instruction.
///
/// Failures carry an `LlmErrorKind` decided here, from the HTTP status, the
/// structured Google error body, or the safety fields of a 200 response.
/// Nothing is retried: the caller re-triggers the action.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

/// What went wrong, as far as the caller needs to know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LlmErrorKind {
    SafetyBlocked,
    InvalidCredential,
    QuotaExceeded,
    Network,
    UnsupportedInput,
    EmptyContent,
    Other,
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct LlmError {
    pub kind: LlmErrorKind,
    pub message: String,
}

impl LlmError {
    pub fn new(kind: LlmErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        let kind = if e.is_decode() {
            LlmErrorKind::Other
        } else {
            LlmErrorKind::Network
        };
        LlmError::new(kind, format!("HTTP error: {e}"))
    }
}

/// An inline file sent alongside the instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineAttachment {
    pub mime_type: String,
    pub data_base64: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub instruction: String,
    pub attachment: Option<InlineAttachment>,
}

/// Anything that turns an instruction (plus attachment) into plain text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    system_instruction: GeminiContent<'a>,
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum GeminiPart<'a> {
    Text { text: &'a str },
    InlineData { inline_data: GeminiInlineData<'a> },
}

#[derive(Debug, Serialize)]
struct GeminiInlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    details: Vec<GoogleErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorDetail {
    reason: Option<String>,
}

/// Finish reasons that mean the output was withheld by a content filter.
const SAFETY_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "RECITATION",
    "BLOCKLIST",
    "PROHIBITED_CONTENT",
    "SPII",
    "IMAGE_SAFETY",
];

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Gemini-backed `TextGenerator`. Cheap to clone.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_base: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_base: String, model: String, api_key: String) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder().build()?,
            api_base,
            model,
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        let body = build_request(request);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(classify_error_response(status.as_u16(), &text));
        }

        let parsed: GeminiResponse = serde_json::from_str(&text).map_err(|e| {
            LlmError::new(LlmErrorKind::Other, format!("Unreadable model response: {e}"))
        })?;
        let output = extract_text(parsed)?;

        debug!("Generation succeeded: {} chars", output.len());
        Ok(output)
    }
}

fn build_request(request: &GenerationRequest) -> GeminiRequest<'_> {
    let mut parts = Vec::with_capacity(2);
    if let Some(attachment) = &request.attachment {
        parts.push(GeminiPart::InlineData {
            inline_data: GeminiInlineData {
                mime_type: &attachment.mime_type,
                data: &attachment.data_base64,
            },
        });
    }
    parts.push(GeminiPart::Text {
        text: &request.instruction,
    });

    GeminiRequest {
        system_instruction: GeminiContent {
            role: None,
            parts: vec![GeminiPart::Text {
                text: prompts::PLAIN_TEXT_SYSTEM,
            }],
        },
        contents: vec![GeminiContent {
            role: Some("user"),
            parts,
        }],
    }
}

/// Maps a non-success response to an error kind using the HTTP status and the
/// structured `status` / `details[].reason` fields of Google's error body.
fn classify_error_response(status: u16, body: &str) -> LlmError {
    let parsed = serde_json::from_str::<GoogleError>(body).ok().map(|e| e.error);
    let api_status = parsed.as_ref().map(|e| e.status.as_str()).unwrap_or("");
    let key_invalid = parsed.as_ref().is_some_and(|e| {
        e.details
            .iter()
            .any(|d| d.reason.as_deref() == Some("API_KEY_INVALID"))
    });

    let kind = if key_invalid
        || status == 401
        || status == 403
        || matches!(api_status, "UNAUTHENTICATED" | "PERMISSION_DENIED")
    {
        LlmErrorKind::InvalidCredential
    } else if status == 429 || api_status == "RESOURCE_EXHAUSTED" {
        LlmErrorKind::QuotaExceeded
    } else if status == 400 || api_status == "INVALID_ARGUMENT" {
        LlmErrorKind::UnsupportedInput
    } else {
        LlmErrorKind::Other
    };

    let message = parsed
        .map(|e| e.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.to_string());
    LlmError::new(kind, format!("API error (status {status}): {message}"))
}

/// Concatenates candidate text, or reports why there is none.
fn extract_text(response: GeminiResponse) -> Result<String, LlmError> {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(LlmError::new(
            LlmErrorKind::SafetyBlocked,
            format!("Prompt blocked: {reason}"),
        ));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::new(LlmErrorKind::EmptyContent, "Model returned no candidates"))?;

    if let Some(reason) = candidate
        .finish_reason
        .as_deref()
        .filter(|r| SAFETY_FINISH_REASONS.contains(r))
    {
        return Err(LlmError::new(
            LlmErrorKind::SafetyBlocked,
            format!("Response withheld: {reason}"),
        ));
    }

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(LlmError::new(
            LlmErrorKind::EmptyContent,
            "Model returned empty content",
        ));
    }
    Ok(text)
}
