//! Server-side blind transform.
//!
//! The aggregator only ever sees the public key and cleartext weights. For every
//! `(ciphertext, weight)` pair it returns `ciphertext^weight mod n²`, which decrypts to
//! `value × weight`. Nothing is summed here: the client still has to flip the sign of the
//! penalty category and cap the reward categories before adding them up.

use crate::ciphertext::Ciphertext;
use crate::codec::decode_small;
use crate::errors::BlindScoreError;
use crate::keypair::PublicKey;
use crate::policy::MAX_WEIGHT;
use crate::protocol::wire::{ComputeRequest, ComputeResponse};

/// Stateless per-feature scaler. Safe to share between concurrent requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregator {
    max_weight: u8,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self {
            max_weight: MAX_WEIGHT,
        }
    }
}

impl Aggregator {
    /// An aggregator accepting weights in `1..=max_weight`. The range can only be narrowed:
    /// `max_weight` must lie in `1..=MAX_WEIGHT`.
    pub fn try_with(max_weight: u8) -> Result<Self, BlindScoreError> {
        if !(1..=MAX_WEIGHT).contains(&max_weight) {
            return Err(BlindScoreError::Aggregation(format!(
                "max weight must be within 1..={}, got {}",
                MAX_WEIGHT, max_weight
            )));
        }
        Ok(Self { max_weight })
    }

    pub fn max_weight(&self) -> u8 {
        self.max_weight
    }

    /// Validates the whole request, then scales every ciphertext by its weight.
    ///
    /// # Errors
    /// `Aggregation` when the public key is malformed, the lists are empty or differ in length,
    /// a weight is outside `1..=max_weight` or a ciphertext is not a valid residue. No partial
    /// result is ever produced.
    pub fn aggregate(&self, request: &ComputeRequest) -> Result<ComputeResponse, BlindScoreError> {
        let public_key = PublicKey::from_wire(&request.public_key)
            .map_err(|e| BlindScoreError::Aggregation(format!("invalid public key: {}", e)))?;

        let features = &request.encrypted_features;
        let weights = &request.weights;
        if features.len() != weights.len() {
            return Err(BlindScoreError::Aggregation(format!(
                "{} encrypted features but {} weights",
                features.len(),
                weights.len()
            )));
        }
        if features.is_empty() {
            return Err(BlindScoreError::Aggregation("no encrypted features".into()));
        }

        let weights = weights
            .iter()
            .enumerate()
            .map(|(i, w)| {
                decode_small(w, 1, self.max_weight, &format!("weight #{}", i))
                    .map_err(|e| BlindScoreError::Aggregation(e.to_string()))
            })
            .collect::<Result<Vec<u8>, _>>()?;

        let ciphertexts = features
            .iter()
            .enumerate()
            .map(|(i, text)| {
                public_key.ciphertext_from_decimal(text).map_err(|e| {
                    BlindScoreError::Aggregation(format!("encrypted feature #{}: {}", i, e))
                })
            })
            .collect::<Result<Vec<Ciphertext>, _>>()?;

        let contributions: Vec<String> = ciphertexts
            .iter()
            .zip(&weights)
            .enumerate()
            .map(|(i, (c, &w))| {
                let scaled = c.scale(u64::from(w), &public_key);
                log::debug!(
                    "index={} weight={} c_i={} c_i^w_i={}",
                    i,
                    w,
                    c.to_decimal(),
                    scaled.to_decimal()
                );
                scaled.to_decimal()
            })
            .collect();

        Ok(ComputeResponse {
            encrypted_contributions: contributions,
        })
    }
}

/// Runs [`Aggregator::aggregate`] with the default weight range.
pub fn aggregate(request: &ComputeRequest) -> Result<ComputeResponse, BlindScoreError> {
    Aggregator::default().aggregate(request)
}
