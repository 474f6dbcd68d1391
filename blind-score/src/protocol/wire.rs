//! JSON bodies exchanged with the scoring server.
//!
//! Every big integer, including the small weights, travels as a decimal string.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePublicKey {
    pub n: String,
    pub g: String,
}

/// `POST /compute` body. `encrypted_features` and `weights` are aligned with the client's
/// active categories in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeRequest {
    pub public_key: WirePublicKey,
    pub encrypted_features: Vec<String>,
    pub weights: Vec<String>,
}

/// Successful `POST /compute` reply: one scaled ciphertext per request entry, same order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeResponse {
    pub encrypted_contributions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Either reply shape of `POST /compute`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComputeReply {
    Success(ComputeResponse),
    Failure(ErrorResponse),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub question: String,
}
