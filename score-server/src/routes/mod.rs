use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

mod compute;
mod health;
mod question;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/question", get(question::get_question))
        .route("/compute", post(compute::compute))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
