//! Ask endpoint: multipart upload plus question, answered with citations

use std::io::Write;

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::AnswerResponse;

/// POST /api/ask - Answer a question against an uploaded document
///
/// Multipart fields: `file` (required), `prompt` (required), `upload_id`
/// (optional; absent means the index is rebuilt for this request only).
pub async fn ask(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnswerResponse>> {
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut prompt: Option<String> = None;
    let mut upload_id: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::internal(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "upload".to_string());
                let declared_mime = field.content_type().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| Error::internal(format!("Failed to read file: {}", e)))?;
                file = Some((filename, declared_mime, data.to_vec()));
            }
            "prompt" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| Error::internal(format!("Failed to read prompt: {}", e)))?;
                prompt = Some(text);
            }
            "upload_id" | "file_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| Error::internal(format!("Failed to read upload_id: {}", e)))?;
                if !text.trim().is_empty() {
                    upload_id = Some(text.trim().to_string());
                }
            }
            _ => {}
        }
    }

    let (filename, declared_mime, data) = file.ok_or(Error::MissingField("file"))?;
    let prompt = prompt
        .filter(|p| !p.trim().is_empty())
        .ok_or(Error::MissingField("prompt"))?;

    tracing::info!(
        "Question against '{}' ({} bytes, upload_id: {})",
        filename,
        data.len(),
        upload_id.as_deref().unwrap_or("<none>")
    );

    // Spool the upload into the scratch directory; the temp file is removed
    // when this handler returns, success or failure.
    let mut scratch_file = tempfile::Builder::new()
        .prefix("docqa-upload-")
        .tempfile_in(&state.config().server.scratch_dir)?;
    scratch_file.write_all(&data)?;

    let outcome = state
        .pipeline()
        .answer_upload(
            upload_id.as_deref(),
            &prompt,
            scratch_file.path(),
            &declared_mime,
        )
        .await?;

    tracing::info!(
        "Answered with {} source(s), {} dropped",
        outcome.sources.len(),
        outcome.dropped_sources
    );

    Ok(Json(outcome.into()))
}
