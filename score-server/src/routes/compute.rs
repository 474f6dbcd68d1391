use crate::error::{ServerError, ServerResult};
use crate::state::AppState;
use axum::{Json, extract::State, extract::rejection::JsonRejection};
use blind_score::protocol::{ComputeRequest, ComputeResponse};

/// Raises every encrypted feature to its weight. The payload is validated as a whole; any
/// problem rejects the request without partial output.
pub async fn compute(
    State(state): State<AppState>,
    payload: Result<Json<ComputeRequest>, JsonRejection>,
) -> ServerResult<Json<ComputeResponse>> {
    let Json(request) = payload.map_err(|e| ServerError::BadRequest(e.body_text()))?;

    tracing::debug!(
        features = request.encrypted_features.len(),
        "compute request received"
    );

    // modular exponentiation on 4096-bit residues; keep it off the async workers
    let aggregator = state.aggregator;
    let response = tokio::task::spawn_blocking(move || aggregator.aggregate(&request))
        .await
        .map_err(|e| ServerError::Internal(format!("aggregation task failed: {e}")))??;

    Ok(Json(response))
}
