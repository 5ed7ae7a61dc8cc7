//! HTTP request handlers

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use tracing::{error, info, info_span, Instrument, Span};
use uuid::Uuid;

use crate::docx::DOCX_CONTENT_TYPE;
use crate::extract::extract_meeting_details;
use crate::web::AppState;

/// Input form page
pub const FORM_PAGE: &str = include_str!("form.html");

/// Form body posted by the input page
#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    pub email_text: String,
}

/// Serve the input form
pub async fn index() -> Html<&'static str> {
    Html(FORM_PAGE)
}

/// Extract meeting details from the posted email and return the filled
/// template as a download
pub async fn generate(
    State(state): State<AppState>,
    Form(form): Form<GenerateForm>,
) -> Result<Response, (StatusCode, String)> {
    let request_id = Uuid::new_v4();
    let span = info_span!("generate", %request_id);

    async move {
        let details = extract_meeting_details(&form.email_text);
        info!(
            "Meeting date {:?}, {} agenda points",
            details.meeting_date,
            details.agenda_points.len()
        );

        let filler = state.filler.clone();
        let span = Span::current();
        let (file_name, bytes) = tokio::task::spawn_blocking(move || {
            let _enter = span.enter();
            let document = filler.fill(&details)?;
            let bytes = document.read();
            let file_name = document.file_name().to_string();
            document.cleanup();
            bytes.map(|bytes| (file_name, bytes))
        })
        .await
        .map_err(|e| {
            error!("Generation task failed: {}", e);
            internal_error("Document generation was interrupted".to_string())
        })?
        .map_err(|e| {
            error!("Failed to generate document: {}", e);
            internal_error(format!("Failed to generate document: {}", e))
        })?;

        let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file_name))
            .map_err(|e| internal_error(format!("Invalid download name: {}", e)))?;

        info!("Sending {} ({} bytes)", file_name, bytes.len());

        Ok::<_, (StatusCode, String)>(
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, HeaderValue::from_static(DOCX_CONTENT_TYPE)),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            )
                .into_response(),
        )
    }
    .instrument(span)
    .await
}

fn internal_error(message: String) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, message)
}
