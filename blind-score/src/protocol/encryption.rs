//! Client-side encryption of active features and decryption of the server's contributions.

use crate::ciphertext::Ciphertext;
use crate::errors::BlindScoreError;
use crate::features::FeatureVector;
use crate::keypair::{PrivateKey, PublicKey};
use crate::policy::{ActiveSet, MAX_WEIGHT, ScoringPolicy};
use crate::protocol::wire::{ComputeRequest, ComputeResponse};

/// Largest feature count the client will encrypt.
pub const MAX_COUNT: u64 = u32::MAX as u64;
/// Largest plaintext an honest reply can decrypt to: a maximal count at the maximal weight.
pub const MAX_CONTRIBUTION: u64 = MAX_COUNT * MAX_WEIGHT as u64;

/// Encrypts the value of every active category independently, in ascending category order.
///
/// # Errors
/// `Encryption` when a count exceeds [`MAX_COUNT`].
pub fn encrypt_active(
    features: &FeatureVector,
    active: &ActiveSet,
    public_key: &PublicKey,
) -> Result<Vec<Ciphertext>, BlindScoreError> {
    active
        .iter()
        .map(|category| {
            let count = features.get(category);
            if count > MAX_COUNT {
                return Err(BlindScoreError::Encryption(format!(
                    "count {} for `{}` exceeds {}",
                    count, category, MAX_COUNT
                )));
            }
            public_key.encrypt_u64(count)
        })
        .collect()
}

/// Decrypts every ciphertext, preserving order. Any failure aborts the whole batch.
///
/// Every value must be at most [`MAX_CONTRIBUTION`]. That bound is how a reply computed under a
/// different key is caught: such a ciphertext decrypts without complaint, but to a value spread
/// over the whole of `0..n`, which is below the bound with probability `MAX_CONTRIBUTION / n`.
///
/// # Errors
/// `Decryption` for a malformed ciphertext or an implausibly large value.
pub fn decrypt_all(
    ciphertexts: &[Ciphertext],
    private_key: &PrivateKey,
) -> Result<Vec<u64>, BlindScoreError> {
    ciphertexts
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let value = private_key.decrypt_u64(c)?;
            if value > MAX_CONTRIBUTION {
                return Err(BlindScoreError::Decryption(format!(
                    "value #{} is above {}; reply was not produced under this key",
                    i, MAX_CONTRIBUTION
                )));
            }
            Ok(value)
        })
        .collect()
}

/// Assembles the `POST /compute` body for the active categories.
pub fn build_request(
    public_key: &PublicKey,
    ciphertexts: &[Ciphertext],
    active: &ActiveSet,
    policy: &ScoringPolicy,
) -> Result<ComputeRequest, BlindScoreError> {
    if ciphertexts.len() != active.len() {
        return Err(BlindScoreError::Encryption(format!(
            "{} ciphertexts for {} active categories",
            ciphertexts.len(),
            active.len()
        )));
    }

    Ok(ComputeRequest {
        public_key: public_key.to_wire(),
        encrypted_features: ciphertexts.iter().map(Ciphertext::to_decimal).collect(),
        weights: active
            .iter()
            .map(|category| policy.weight(category).to_string())
            .collect(),
    })
}

/// Decodes the server's contributions, checking they line up with the request.
pub fn decode_response(
    response: &ComputeResponse,
    public_key: &PublicKey,
    expected: usize,
) -> Result<Vec<Ciphertext>, BlindScoreError> {
    let contributions = &response.encrypted_contributions;
    if contributions.len() != expected {
        return Err(BlindScoreError::Decryption(format!(
            "server returned {} contributions for {} features",
            contributions.len(),
            expected
        )));
    }

    contributions
        .iter()
        .map(|text| {
            public_key
                .ciphertext_from_decimal(text)
                .map_err(|e| BlindScoreError::Decryption(e.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::Category;
    use crate::test_keys::{OTHER_KEYS, TEST_KEYS};

    #[test]
    fn encrypts_only_active_values_in_order() -> Result<(), BlindScoreError> {
        let features = FeatureVector::new([10, 2, 1, 1, 0, 1]);
        let policy = ScoringPolicy::try_with([3, 0, 1, 0, 0, 2])?;
        let active = policy.active();

        let ciphertexts = encrypt_active(&features, &active, TEST_KEYS.public_key())?;
        assert_eq!(ciphertexts.len(), 3);
        assert_eq!(decrypt_all(&ciphertexts, TEST_KEYS.private_key())?, vec![10, 1, 1]);

        let request = build_request(TEST_KEYS.public_key(), &ciphertexts, &active, &policy)?;
        assert_eq!(request.weights, vec!["3", "1", "2"]);
        assert_eq!(request.encrypted_features.len(), 3);
        assert!(active.contains(Category::Teamwork));
        Ok(())
    }

    #[test]
    fn decrypt_all_fails_on_any_foreign_ciphertext() -> Result<(), BlindScoreError> {
        let pk = TEST_KEYS.public_key();
        for v in [0u64, 1, 20] {
            let mixed = vec![pk.encrypt_u64(1)?, OTHER_KEYS.public_key().encrypt_u64(v)?];
            assert!(matches!(
                decrypt_all(&mixed, TEST_KEYS.private_key()),
                Err(BlindScoreError::Decryption(_))
            ));
        }
        Ok(())
    }

    #[test]
    fn decrypt_all_enforces_plausibility_bound() -> Result<(), BlindScoreError> {
        let pk = TEST_KEYS.public_key();
        let sk = TEST_KEYS.private_key();
        let edge = vec![pk.encrypt_u64(MAX_CONTRIBUTION)?];
        assert_eq!(decrypt_all(&edge, sk)?, vec![MAX_CONTRIBUTION]);

        let above = vec![pk.encrypt_u64(MAX_CONTRIBUTION + 1)?];
        assert!(matches!(
            decrypt_all(&above, sk),
            Err(BlindScoreError::Decryption(_))
        ));
        Ok(())
    }

    #[test]
    fn refuses_to_encrypt_oversized_counts() {
        let features = FeatureVector::new([MAX_COUNT + 1, 0, 0, 0, 0, 0]);
        let active = ScoringPolicy::default().active();
        assert!(matches!(
            encrypt_active(&features, &active, TEST_KEYS.public_key()),
            Err(BlindScoreError::Encryption(_))
        ));
    }

    #[test]
    fn response_length_must_match() -> Result<(), BlindScoreError> {
        let pk = TEST_KEYS.public_key();
        let response = ComputeResponse {
            encrypted_contributions: vec![pk.encrypt_u64(1)?.to_decimal()],
        };
        assert!(matches!(
            decode_response(&response, pk, 2),
            Err(BlindScoreError::Decryption(_))
        ));
        assert_eq!(decode_response(&response, pk, 1)?.len(), 1);
        Ok(())
    }

    #[test]
    fn response_values_are_range_checked() {
        let pk = TEST_KEYS.public_key();
        let response = ComputeResponse {
            encrypted_contributions: vec![crate::codec::encode_decimal(pk.n_squared().modulus())],
        };
        assert!(matches!(
            decode_response(&response, pk, 1),
            Err(BlindScoreError::Decryption(_))
        ));
    }
}
