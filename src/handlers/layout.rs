use axum::{
    extract::{Query, State},
    response::Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    services::layout::{layout, PositionedEvent},
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct LayoutQuery {
    pub week_start: NaiveDate,
}

/// Draw instructions for the week starting at `week_start`. The engine reads
/// the full record list each call; records outside the window are simply
/// absent from the response.
pub async fn get_layout(
    State(state): State<AppState>,
    Query(query): Query<LayoutQuery>,
) -> Json<Vec<PositionedEvent>> {
    let records = state.store.list_all();
    Json(layout(&records, query.week_start))
}
