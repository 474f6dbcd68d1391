use crate::error::{ServerError, ServerResult};
use crate::state::AppState;
use axum::{Json, extract::State};
use blind_score::protocol::QuestionResponse;
use rand::seq::IndexedRandom;

pub async fn get_question(State(state): State<AppState>) -> ServerResult<Json<QuestionResponse>> {
    let question = state
        .config
        .questions
        .choose(&mut rand::rng())
        .ok_or_else(|| ServerError::NotFound("no interview questions configured".into()))?;

    Ok(Json(QuestionResponse {
        question: question.clone(),
    }))
}
