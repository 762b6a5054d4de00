//! Request handlers.

use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use chrono::Local;
use serde_json::json;
use uuid::Uuid;

use crate::storage::format_filename;

use super::error::ApiError;
use super::types::{HealthResponse, ReadResponse};
use super::AppState;

/// One uploaded palm image, held in memory until the Drive upload.
struct PalmUpload {
    data: Bytes,
    filename: String,
    mime_type: String,
}

/// The parsed multipart submission.
#[derive(Default)]
struct Submission {
    name: Option<String>,
    dob: Option<String>,
    tob: Option<String>,
    pob: Option<String>,
    gender: Option<String>,
    palm_left: Option<PalmUpload>,
    palm_right: Option<PalmUpload>,
}

impl Submission {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut submission = Submission::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::Multipart(e.to_string()))?
        {
            let Some(field_name) = field.name().map(str::to_string) else {
                continue;
            };

            match field_name.as_str() {
                "palmLeft" | "palmRight" => {
                    let filename = field
                        .file_name()
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("{}.jpg", field_name));
                    let mime_type = field
                        .content_type()
                        .map(str::to_string)
                        .unwrap_or_else(|| "application/octet-stream".to_string());
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::Multipart(e.to_string()))?;

                    let upload = PalmUpload {
                        data,
                        filename,
                        mime_type,
                    };
                    if field_name == "palmLeft" {
                        submission.palm_left = Some(upload);
                    } else {
                        submission.palm_right = Some(upload);
                    }
                }
                other => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| ApiError::Multipart(e.to_string()))?;
                    match other {
                        "name" => submission.name = Some(text),
                        "dob" => submission.dob = Some(text),
                        "tob" => submission.tob = Some(text),
                        "pob" => submission.pob = Some(text),
                        "gender" => submission.gender = Some(text),
                        _ => {} // unknown fields are ignored
                    }
                }
            }
        }

        Ok(submission)
    }
}

/// Handle `POST /read`: upload both palm images, then run the agent loop.
pub async fn read(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ReadResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let submission = Submission::from_multipart(multipart).await?;

    // Reject before touching any collaborator
    let (palm_left, palm_right) = match (submission.palm_left, submission.palm_right) {
        (Some(left), Some(right)) => (left, right),
        _ => return Err(ApiError::MissingImages),
    };

    let name = submission.name.ok_or(ApiError::MissingField("name"))?;
    let dob = submission.dob.ok_or(ApiError::MissingField("dob"))?;
    let tob = submission.tob.ok_or(ApiError::MissingField("tob"))?;
    let pob = submission.pob.ok_or(ApiError::MissingField("pob"))?;
    let gender = submission.gender.ok_or(ApiError::MissingField("gender"))?;

    tracing::info!(%request_id, user = %name, "processing reading request");

    let now = Local::now();
    let left_name = format_filename(&palm_left.filename, &name, now);
    let right_name = format_filename(&palm_right.filename, &name, now);

    let palm_left_url = state
        .store
        .store(palm_left.data, &left_name, &palm_left.mime_type)
        .await
        .map_err(|e| ApiError::Upstream(e.to_string()))?;
    let palm_right_url = state
        .store
        .store(palm_right.data, &right_name, &palm_right.mime_type)
        .await
        .map_err(|e| ApiError::Upstream(e.to_string()))?;

    let user_data = json!({
        "name": name,
        "dob": dob,
        "tob": tob,
        "pob": pob,
        "gender": gender,
        "palmLeft": palm_left_url,
        "palmRight": palm_right_url,
    });

    let user_message = format!(
        "Generate an astrology report for the following user: {}",
        user_data
    );

    let result = state.agent.run(&user_message).await?;
    tracing::info!(%request_id, "reading complete ({} chars)", result.len());

    Ok(Json(ReadResponse { result }))
}

/// Handle `GET /health`.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
