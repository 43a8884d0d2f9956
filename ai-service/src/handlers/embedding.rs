use axum::{extract::State, Json};
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

use super::provider_failure;
use crate::dtos::{BatchEmbedRequest, BatchEmbedResponse, EmbedRequest, EmbedResponse};
use crate::startup::AppState;

const EMBEDDING_FAILURE_DETAIL: &str = "Failed to generate embedding via AI service.";
const BATCH_FAILURE_DETAIL: &str = "Failed to generate batch embeddings via AI service.";

#[tracing::instrument(skip(state, request), fields(task_type = request.task_type.as_str()))]
pub async fn embed_text(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<EmbedRequest>,
) -> Result<Json<EmbedResponse>, AppError> {
    let services = state.ai()?;

    let embedding = services
        .embedding
        .embed(&request.text, request.task_type)
        .await
        .map_err(|e| provider_failure(e, EMBEDDING_FAILURE_DETAIL))?;

    Ok(Json(EmbedResponse::new(
        embedding,
        services.embedding.model(),
    )))
}

#[tracing::instrument(skip(state, request), fields(count = request.texts.len()))]
pub async fn embed_batch(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<BatchEmbedRequest>,
) -> Result<Json<BatchEmbedResponse>, AppError> {
    let services = state.ai()?;

    let embeddings = services
        .embedding
        .embed_batch(&request.texts)
        .await
        .map_err(|e| provider_failure(e, BATCH_FAILURE_DETAIL))?;

    Ok(Json(BatchEmbedResponse::new(
        embeddings,
        services.embedding.model(),
    )))
}
