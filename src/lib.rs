pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{
    handlers::{interviews, layout, parse},
    services::{parser::ExtractionGateway, store::InterviewStore},
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<InterviewStore>,
    pub gateway: ExtractionGateway,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/interviews", get(interviews::get_interviews))
        .route("/interviews", post(interviews::create_interview))
        .route("/interviews/:id", get(interviews::get_interview))
        .route("/interviews/:id", put(interviews::update_interview))
        .route(
            "/interviews/:id",
            axum::routing::delete(interviews::delete_interview),
        )
        .route("/layout", get(layout::get_layout))
        .route("/parse", post(parse::parse_interview_text))
        .with_state(state)
}
