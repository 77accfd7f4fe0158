// POST /process: classify one email from a multipart form.
//
// Fields: `email_text` (inline text) and `email_file` (.txt or .pdf upload).
// Returns 200 with the triage report, or 400 with {"error": ...} when the
// file type is unsupported or there is nothing to classify. Bodies over the
// configured limit are refused by the multipart reader (413).

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{debug, warn};

use crate::pipeline::submission::Submission;
use crate::web::{api_error, AppState};

const TEXT_FIELD: &str = "email_text";
const FILE_FIELD: &str = "email_file";

/// POST /process: run the triage pipeline on the submitted email.
pub async fn process_email(State(state): State<AppState>, multipart: Multipart) -> Response {
    let submission = match read_submission(multipart).await {
        Ok(s) => s,
        Err(e) => {
            warn!(error = %e, "Rejected malformed upload");
            return api_error(e.status(), &e.body_text());
        }
    };

    let content = match submission.resolve() {
        Ok(content) => content,
        Err(rejection) => {
            debug!(reason = %rejection, "Submission rejected");
            return api_error(StatusCode::BAD_REQUEST, rejection.message());
        }
    };

    let report = state.triage.process(&content).await;
    Json(report).into_response()
}

/// Collect the known form fields; unknown fields are skipped.
async fn read_submission(mut multipart: Multipart) -> Result<Submission, MultipartError> {
    let mut submission = Submission::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(TEXT_FIELD) => {
                submission.text = Some(field.text().await?);
            }
            Some(FILE_FIELD) => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?.to_vec();
                submission = submission.with_file(filename, bytes);
            }
            _ => {}
        }
    }

    Ok(submission)
}
