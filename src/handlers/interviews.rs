use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::{
    models::interview::{CreateInterviewRequest, InterviewPatch, InterviewRecord},
    utils::errors::AppError,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub date: Option<NaiveDate>,
}

pub async fn get_interviews(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<InterviewRecord>> {
    let interviews = match query.date {
        Some(date) => state.store.list_by_date(date),
        None => state.store.list_all(),
    };

    Json(interviews)
}

pub async fn get_interview(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InterviewRecord>, AppError> {
    state
        .store
        .get(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Interview {} not found", id)))
}

pub async fn create_interview(
    State(state): State<AppState>,
    Json(payload): Json<CreateInterviewRequest>,
) -> (StatusCode, Json<InterviewRecord>) {
    // Creation-timestamp-derived id, immutable thereafter.
    let id = Utc::now().timestamp_millis().to_string();
    let record = payload.into_record(id);

    state.store.add(record.clone()).await;

    (StatusCode::CREATED, Json(record))
}

/// Merging onto a missing id is a no-op, not an error: the response is a
/// 200 with a `null` body and the record set is left unchanged.
pub async fn update_interview(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<InterviewPatch>,
) -> Json<Option<InterviewRecord>> {
    Json(state.store.update(&id, payload).await)
}

/// Idempotent: deleting an absent id responds 204 exactly like a present one.
pub async fn delete_interview(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> StatusCode {
    state.store.delete(&id).await;
    StatusCode::NO_CONTENT
}
