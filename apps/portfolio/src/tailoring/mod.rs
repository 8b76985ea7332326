//! Resume tailoring: an uploaded PDF plus a job description in, tailored plain text out.
//!
//! `TailorSession` holds the form state (one optional upload, one text
//! field). `TailorController` owns the generator handle. Each visitor's page
//! keeps its own submit disabled while a request is in flight; requests from
//! different visitors run concurrently.

pub mod clipboard;
pub mod handlers;
pub mod prompts;

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::llm_client::{
    GeminiClient, GenerationRequest, InlineAttachment, LlmError, LlmErrorKind, TextGenerator,
};
use clipboard::CopyFeedback;
use prompts::build_tailor_prompt;

const PDF_MEDIA_TYPE: &str = "application/pdf";
const PDF_MAGIC: &[u8] = b"%PDF-";
const AI_KEY_PLACEHOLDERS: &[&str] = &["YOUR_GEMINI_API_KEY", "PLACEHOLDER_API_KEY"];

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TailorErrorKind {
    MissingFile,
    MissingJobDescription,
    UnsupportedFileType,
    UnparseableInput,
    SafetyBlocked,
    InvalidCredential,
    QuotaExceeded,
    Network,
    NotConfigured,
    Other,
}

/// A tailoring failure. `kind` is set where the failure is detected.
#[derive(Debug, Clone, Error)]
#[error("{kind:?}: {detail}")]
pub struct TailorError {
    pub kind: TailorErrorKind,
    pub detail: String,
}

impl TailorError {
    pub fn new(kind: TailorErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// Message shown in the tailoring status area.
    pub fn user_message(&self) -> String {
        match self.kind {
            TailorErrorKind::MissingFile => {
                "Please upload your resume (PDF) before tailoring.".to_string()
            }
            TailorErrorKind::MissingJobDescription => {
                "Please paste the job description before tailoring.".to_string()
            }
            TailorErrorKind::UnsupportedFileType => {
                "Only PDF resumes are supported. Please upload a .pdf file.".to_string()
            }
            TailorErrorKind::UnparseableInput => "The uploaded resume could not be read. \
                Make sure it is a valid, text-based PDF."
                .to_string(),
            TailorErrorKind::SafetyBlocked => "The request was blocked by the AI service's \
                safety filters. Try adjusting the job description."
                .to_string(),
            TailorErrorKind::InvalidCredential => "The AI service rejected the configured \
                API key. Check GEMINI_API_KEY."
                .to_string(),
            TailorErrorKind::QuotaExceeded => {
                "The AI service quota has been exceeded. Please try again later.".to_string()
            }
            TailorErrorKind::Network => "Could not reach the AI service. \
                Check your network connection and try again."
                .to_string(),
            TailorErrorKind::NotConfigured => {
                format!("Resume tailoring is not configured: {}", self.detail)
            }
            TailorErrorKind::Other => format!(
                "Something went wrong while tailoring your resume: {}",
                self.detail
            ),
        }
    }
}

impl From<LlmError> for TailorError {
    fn from(e: LlmError) -> Self {
        let kind = match e.kind {
            LlmErrorKind::SafetyBlocked => TailorErrorKind::SafetyBlocked,
            LlmErrorKind::InvalidCredential => TailorErrorKind::InvalidCredential,
            LlmErrorKind::QuotaExceeded => TailorErrorKind::QuotaExceeded,
            LlmErrorKind::Network => TailorErrorKind::Network,
            LlmErrorKind::UnsupportedInput => TailorErrorKind::UnparseableInput,
            LlmErrorKind::EmptyContent | LlmErrorKind::Other => TailorErrorKind::Other,
        };
        TailorError::new(kind, e.message)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Session state
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub media_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, media_type: Option<String>, bytes: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            media_type,
            bytes,
        }
    }

    /// `application/pdf`, or a generic/absent media type on a `.pdf` file name.
    pub fn is_pdf(&self) -> bool {
        let media_type = self
            .media_type
            .as_deref()
            .and_then(|m| m.split(';').next())
            .map(|m| m.trim().to_ascii_lowercase())
            .unwrap_or_default();
        match media_type.as_str() {
            PDF_MEDIA_TYPE => true,
            "" | "application/octet-stream" => {
                self.file_name.to_ascii_lowercase().ends_with(".pdf")
            }
            _ => false,
        }
    }
}

/// Form state for one tailoring attempt.
#[derive(Debug, Clone, Default)]
pub struct TailorSession {
    upload: Option<UploadedFile>,
    job_description: String,
}

impl TailorSession {
    /// Replaces the current upload. A rejected file clears the previous one.
    pub fn select_file(&mut self, file: UploadedFile) -> Result<(), TailorError> {
        self.upload = None;
        if file.bytes.is_empty() {
            return Err(TailorError::new(
                TailorErrorKind::MissingFile,
                format!("'{}' is empty", file.file_name),
            ));
        }
        if !file.is_pdf() {
            return Err(TailorError::new(
                TailorErrorKind::UnsupportedFileType,
                format!(
                    "'{}' has type {}",
                    file.file_name,
                    file.media_type.as_deref().unwrap_or("unknown")
                ),
            ));
        }
        self.upload = Some(file);
        Ok(())
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.job_description = text.into();
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.upload.is_some() && !self.job_description.trim().is_empty()
    }

    fn validate(&self) -> Result<(&UploadedFile, &str), TailorError> {
        let upload = match (&self.upload, self.can_submit()) {
            (Some(upload), true) => upload,
            (None, _) => {
                return Err(TailorError::new(
                    TailorErrorKind::MissingFile,
                    "no file selected",
                ))
            }
            (Some(_), false) => {
                return Err(TailorError::new(
                    TailorErrorKind::MissingJobDescription,
                    "job description is blank",
                ))
            }
        };
        let job_description = self.job_description.trim();
        if !upload.bytes.starts_with(PDF_MAGIC) {
            return Err(TailorError::new(
                TailorErrorKind::UnparseableInput,
                format!("'{}' does not start with a PDF header", upload.file_name),
            ));
        }
        Ok((upload, job_description))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Controller
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TailorResult {
    pub text: String,
}

/// What the page needs to draw the tailoring form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TailorPanel {
    pub enabled: bool,
    pub status: Option<String>,
    pub copy_success: CopyFeedback,
    pub copy_failure: CopyFeedback,
}

enum Backend {
    Ready(Arc<dyn TextGenerator>),
    Unavailable(String),
}

pub struct TailorController {
    backend: Backend,
}

/// Rejects a missing or placeholder AI credential.
pub fn validate_ai_key(key: Option<&str>) -> Result<&str, String> {
    match key.map(str::trim) {
        None | Some("") => Err("GEMINI_API_KEY is not set.".to_string()),
        Some(k) if AI_KEY_PLACEHOLDERS.contains(&k) => {
            Err(format!("GEMINI_API_KEY ('{k}') is a placeholder."))
        }
        Some(k) => Ok(k),
    }
}

impl TailorController {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            backend: Backend::Ready(generator),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            backend: Backend::Unavailable(reason.into()),
        }
    }

    /// Builds the Gemini-backed controller, or a disabled one when the AI
    /// credential is missing. Sheet configuration has no bearing on this.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        match validate_ai_key(config.gemini_api_key.as_deref()) {
            Ok(key) => {
                let client = GeminiClient::new(
                    config.gemini_api_base.clone(),
                    config.gemini_model.clone(),
                    key.to_string(),
                )?;
                Ok(Self::new(Arc::new(client)))
            }
            Err(reason) => {
                warn!("Resume tailoring disabled: {reason}");
                Ok(Self::unavailable(reason))
            }
        }
    }

    pub fn panel(&self) -> TailorPanel {
        let status = match &self.backend {
            Backend::Ready(_) => None,
            Backend::Unavailable(reason) => Some(
                TailorError::new(TailorErrorKind::NotConfigured, reason.clone()).user_message(),
            ),
        };
        TailorPanel {
            enabled: status.is_none(),
            status,
            copy_success: CopyFeedback::copied(),
            copy_failure: CopyFeedback::failed(),
        }
    }

    /// Validates the session, then sends the encoded PDF and the filled
    /// instruction to the generator. Nothing reaches the generator when
    /// validation fails.
    pub async fn submit(&self, session: &TailorSession) -> Result<TailorResult, TailorError> {
        let (upload, job_description) = session.validate()?;

        let generator = match &self.backend {
            Backend::Ready(generator) => generator,
            Backend::Unavailable(reason) => {
                return Err(TailorError::new(TailorErrorKind::NotConfigured, reason.clone()))
            }
        };

        info!(
            "Tailoring '{}' ({} bytes) against a {}-char job description",
            upload.file_name,
            upload.bytes.len(),
            job_description.len()
        );

        let request = GenerationRequest {
            instruction: build_tailor_prompt(PDF_MEDIA_TYPE, job_description),
            attachment: Some(InlineAttachment {
                mime_type: PDF_MEDIA_TYPE.to_string(),
                data_base64: STANDARD.encode(&upload.bytes),
            }),
        };

        match generator.generate(&request).await {
            Ok(text) => {
                info!("Tailoring finished: {} chars", text.len());
                Ok(TailorResult { text })
            }
            Err(e) => {
                let err = TailorError::from(e);
                error!("Tailoring failed: {err}");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::llm_client::fakes::FakeGenerator;

    const PDF_BYTES: &[u8] = b"%PDF-1.7\n1 0 obj\n<<>>\nendobj\n%%EOF";

    fn pdf(name: &str) -> UploadedFile {
        UploadedFile::new(
            name,
            Some("application/pdf".to_string()),
            Bytes::from_static(PDF_BYTES),
        )
    }

    fn ready_session() -> TailorSession {
        let mut session = TailorSession::default();
        session.select_file(pdf("resume.pdf")).unwrap();
        session.set_job_description("Senior PM for payments");
        session
    }

    #[test]
    fn test_can_submit_requires_file_and_trimmed_description() {
        let mut session = TailorSession::default();
        assert!(!session.can_submit());
        session.set_job_description("   ");
        session.select_file(pdf("resume.pdf")).unwrap();
        assert!(!session.can_submit());
        session.set_job_description("PM role");
        assert!(session.can_submit());
    }

    #[test]
    fn test_select_file_rejects_non_pdf_and_clears_previous() {
        let mut session = ready_session();
        let docx = UploadedFile::new(
            "resume.docx",
            Some(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
                    .to_string(),
            ),
            Bytes::from_static(b"PK\x03\x04"),
        );
        let err = session.select_file(docx).unwrap_err();
        assert_eq!(err.kind, TailorErrorKind::UnsupportedFileType);
        assert!(session.upload.is_none());
        assert!(!session.can_submit());
    }

    #[test]
    fn test_is_pdf_accepts_generic_type_with_pdf_extension() {
        let file = UploadedFile::new("CV.PDF", None, Bytes::from_static(PDF_BYTES));
        assert!(file.is_pdf());
        let file = UploadedFile::new(
            "cv.pdf",
            Some("application/octet-stream".to_string()),
            Bytes::from_static(PDF_BYTES),
        );
        assert!(file.is_pdf());
        let file = UploadedFile::new("cv.txt", None, Bytes::from_static(b"hi"));
        assert!(!file.is_pdf());
    }

    #[test]
    fn test_select_empty_file_is_missing_file() {
        let mut session = TailorSession::default();
        let err = session
            .select_file(UploadedFile::new("empty.pdf", None, Bytes::new()))
            .unwrap_err();
        assert_eq!(err.kind, TailorErrorKind::MissingFile);
    }

    #[tokio::test]
    async fn test_submit_without_file_never_calls_generator() {
        let fake = Arc::new(FakeGenerator::replying("unused"));
        let controller = TailorController::new(fake.clone());
        let mut session = TailorSession::default();
        session.set_job_description("PM role");

        let err = controller.submit(&session).await.unwrap_err();
        assert_eq!(err.kind, TailorErrorKind::MissingFile);
        assert_eq!(
            err.user_message(),
            "Please upload your resume (PDF) before tailoring."
        );
        assert_eq!(fake.call_count(), 0);
    }

    #[tokio::test]
    async fn test_submit_without_description_never_calls_generator() {
        let fake = Arc::new(FakeGenerator::replying("unused"));
        let controller = TailorController::new(fake.clone());
        let mut session = TailorSession::default();
        session.select_file(pdf("resume.pdf")).unwrap();

        let err = controller.submit(&session).await.unwrap_err();
        assert_eq!(err.kind, TailorErrorKind::MissingJobDescription);
        assert_eq!(fake.call_count(), 0);
    }

    #[tokio::test]
    async fn test_submit_rejects_bytes_without_pdf_header() {
        let fake = Arc::new(FakeGenerator::replying("unused"));
        let controller = TailorController::new(fake.clone());
        let mut session = TailorSession::default();
        session
            .select_file(UploadedFile::new(
                "fake.pdf",
                Some("application/pdf".to_string()),
                Bytes::from_static(b"not a pdf"),
            ))
            .unwrap();
        session.set_job_description("PM role");

        let err = controller.submit(&session).await.unwrap_err();
        assert_eq!(err.kind, TailorErrorKind::UnparseableInput);
        assert_eq!(fake.call_count(), 0);
    }

    #[tokio::test]
    async fn test_submit_sends_encoded_pdf_and_returns_text_verbatim() {
        let fake = Arc::new(FakeGenerator::replying("  JANE DOE\nTailored summary\n"));
        let controller = TailorController::new(fake.clone());

        let result = controller.submit(&ready_session()).await.unwrap();
        assert_eq!(result.text, "  JANE DOE\nTailored summary\n");
        assert_eq!(fake.call_count(), 1);

        let request = fake.last_request.lock().unwrap().clone().unwrap();
        let attachment = request.attachment.unwrap();
        assert_eq!(attachment.mime_type, "application/pdf");
        assert_eq!(attachment.data_base64, STANDARD.encode(PDF_BYTES));
        assert!(request.instruction.contains("Senior PM for payments"));
        assert!(request.instruction.contains("application/pdf"));
    }

    #[tokio::test]
    async fn test_generator_errors_map_to_tailor_kinds() {
        let cases = [
            (LlmErrorKind::SafetyBlocked, TailorErrorKind::SafetyBlocked),
            (LlmErrorKind::InvalidCredential, TailorErrorKind::InvalidCredential),
            (LlmErrorKind::QuotaExceeded, TailorErrorKind::QuotaExceeded),
            (LlmErrorKind::Network, TailorErrorKind::Network),
            (LlmErrorKind::UnsupportedInput, TailorErrorKind::UnparseableInput),
            (LlmErrorKind::EmptyContent, TailorErrorKind::Other),
        ];
        for (llm_kind, expected) in cases {
            let controller =
                TailorController::new(Arc::new(FakeGenerator::failing(llm_kind, "boom")));
            let err = controller.submit(&ready_session()).await.unwrap_err();
            assert_eq!(err.kind, expected, "mapping for {llm_kind:?}");
        }
    }

    #[tokio::test]
    async fn test_unmatched_error_message_includes_raw_text() {
        let controller = TailorController::new(Arc::new(FakeGenerator::failing(
            LlmErrorKind::Other,
            "API error (status 503): overloaded",
        )));
        let err = controller.submit(&ready_session()).await.unwrap_err();
        assert!(err.user_message().contains("overloaded"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_submits_from_separate_sessions_run_concurrently() {
        let delay = Duration::from_millis(200);
        let fake = Arc::new(FakeGenerator::replying("done").delayed(delay));
        let controller = TailorController::new(fake.clone());
        let first = ready_session();
        let mut second = ready_session();
        second.set_job_description("Staff engineer, infra");

        let started = tokio::time::Instant::now();
        let (a, b) = tokio::join!(controller.submit(&first), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            controller.submit(&second).await
        });

        assert_eq!(a.unwrap().text, "done");
        assert_eq!(b.unwrap().text, "done");
        assert_eq!(fake.call_count(), 2);
        assert!(started.elapsed() < delay * 2);
    }

    #[tokio::test]
    async fn test_session_with_file_but_no_description_reports_description() {
        let controller = TailorController::new(Arc::new(FakeGenerator::replying("unused")));
        let mut session = TailorSession::default();
        session.select_file(pdf("resume.pdf")).unwrap();
        session.set_job_description(" \n\t ");
        assert!(!session.can_submit());

        let err = controller.submit(&session).await.unwrap_err();
        assert_eq!(err.kind, TailorErrorKind::MissingJobDescription);
        assert_eq!(
            err.user_message(),
            "Please paste the job description before tailoring."
        );
    }

    #[tokio::test]
    async fn test_unavailable_controller_reports_configuration() {
        let controller = TailorController::unavailable("GEMINI_API_KEY is not set.");
        let panel = controller.panel();
        assert!(!panel.enabled);
        assert!(panel.status.unwrap().contains("GEMINI_API_KEY"));

        let err = controller.submit(&ready_session()).await.unwrap_err();
        assert_eq!(err.kind, TailorErrorKind::NotConfigured);
    }

    #[test]
    fn test_validate_ai_key_rejects_missing_and_placeholders() {
        assert!(validate_ai_key(None).is_err());
        assert!(validate_ai_key(Some("  ")).is_err());
        assert!(validate_ai_key(Some("PLACEHOLDER_API_KEY")).is_err());
        assert_eq!(validate_ai_key(Some(" AIzaReal ")), Ok("AIzaReal"));
    }

    #[test]
    fn test_ready_panel_is_enabled_with_copy_feedback() {
        let panel = TailorController::new(Arc::new(FakeGenerator::replying("x"))).panel();
        assert!(panel.enabled);
        assert!(panel.status.is_none());
        assert!(panel.copy_success.success);
        assert!(!panel.copy_failure.success);
    }
}
