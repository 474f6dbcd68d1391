#[derive(thiserror::Error, Debug)]
pub enum BlindScoreError {
    /// Secure randomness was unavailable or the requested modulus size is unusable.
    #[error("KeyGeneration: {0}")]
    KeyGeneration(String),
    /// The answer text was empty after trimming.
    #[error("No answer text was supplied")]
    EmptyAnswer,
    /// Scoring was attempted before the session key pair finished generating.
    #[error("Session keys are not ready yet")]
    NotReady,

    #[error("Encryption: {0}")]
    Encryption(String),
    #[error("Decryption: {0}")]
    Decryption(String),
    /// The aggregation payload was rejected (malformed key, length mismatch, weight range).
    #[error("Aggregation: {0}")]
    Aggregation(String),

    #[error("Weight {weight} for category `{category}` is outside 0..={max}")]
    InvalidWeight {
        category: &'static str,
        weight: u8,
        max: u8,
    },
    #[error("Codec: {0}")]
    Codec(String),
    #[error("InvalidModulus: {0}")]
    InvalidModulus(String),

    #[error("Data serialization: {0}")]
    SerializationError(#[from] serde_json::Error),
}
