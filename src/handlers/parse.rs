use axum::{extract::State, response::Json};
use validator::Validate;

use crate::{
    models::parse::{ModelSelector, ParseRequest, ParseResponse},
    utils::{errors::AppError, logger::LOGGER},
    AppState,
};

/// Forwards pasted free text to the selected provider and returns whatever
/// fields could be extracted. Only a missing/empty `text` is a client error;
/// provider failures degrade inside the gateway to the minimal patch.
pub async fn parse_interview_text(
    State(state): State<AppState>,
    Json(payload): Json<ParseRequest>,
) -> Result<Json<ParseResponse>, AppError> {
    payload.validate()?;

    let selector = ModelSelector::from(&payload);
    let data = state.gateway.extract(&payload.text, &selector).await;

    LOGGER.log_request("POST", "/parse", 200);

    Ok(Json(ParseResponse { data }))
}
