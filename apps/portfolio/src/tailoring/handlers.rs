use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::errors::AppError;
use crate::state::AppState;
use crate::tailoring::{TailorResult, TailorSession, UploadedFile};

/// POST /api/v1/tailor
///
/// Multipart form: `resume` (PDF file) and `job_description` (text).
/// Responds with the generated text exactly as the model returned it.
pub async fn handle_tailor(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TailorResult>, AppError> {
    let mut session = TailorSession::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed form data: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
                let media_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
                session.select_file(UploadedFile::new(file_name, media_type, bytes))?;
            }
            "job_description" => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Could not read job description: {e}"))
                })?;
                session.set_job_description(text);
            }
            other => tracing::debug!("Ignoring unexpected form field '{other}'"),
        }
    }

    let result = state.tailor.submit(&session).await?;
    Ok(Json(result))
}
