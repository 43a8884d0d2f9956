use axum::{extract::State, Json};
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

use super::provider_failure;
use crate::dtos::{SummaryRequest, SummaryResponse};
use crate::startup::AppState;

const SUMMARY_FAILURE_DETAIL: &str = "Failed to generate summary via AI service.";

#[tracing::instrument(skip(state, request))]
pub async fn summarize(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SummaryRequest>,
) -> Result<Json<SummaryResponse>, AppError> {
    let services = state.ai()?;

    let summary = services
        .summarization
        .summarize(&request.title, &request.content)
        .await
        .map_err(|e| provider_failure(e, SUMMARY_FAILURE_DETAIL))?;

    Ok(Json(SummaryResponse { summary }))
}
