use crate::errors::BlindScoreError;
use crate::ring::{is_probable_prime, random_bits};

use num_bigint::BigUint;
use num_traits::One;

/// Candidates tried before giving up; a 1024-bit prime needs ~355 odd candidates on average.
const MAX_CANDIDATES: usize = 100_000;

/// Generates a random probable prime of exactly `bits` bits whose two top bits are set, so
/// that the product of two such primes has exactly `2 * bits` bits.
pub fn generate_prime(bits: u64) -> Result<BigUint, BlindScoreError> {
    if bits < 8 {
        return Err(BlindScoreError::KeyGeneration(format!(
            "prime size must be at least 8 bits, got {}",
            bits
        )));
    }

    let top = (BigUint::one() << (bits - 1)) | (BigUint::one() << (bits - 2));
    for _ in 0..MAX_CANDIDATES {
        let raw = random_bits(bits).map_err(BlindScoreError::KeyGeneration)?;
        let candidate = raw | &top | BigUint::one();
        if is_probable_prime(&candidate).map_err(BlindScoreError::KeyGeneration)? {
            return Ok(candidate);
        }
    }

    Err(BlindScoreError::KeyGeneration(format!(
        "no {}-bit prime found after {} candidates",
        bits, MAX_CANDIDATES
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primes_have_requested_size_and_top_bits() -> Result<(), BlindScoreError> {
        for bits in [16u64, 64, 128] {
            let p = generate_prime(bits)?;
            assert_eq!(p.bits(), bits);
            assert_eq!(&p >> (bits - 2), BigUint::from(3u32));
            assert!(is_probable_prime(&p).unwrap());
        }
        Ok(())
    }

    #[test]
    fn tiny_sizes_are_rejected() {
        assert!(matches!(
            generate_prime(4),
            Err(BlindScoreError::KeyGeneration(_))
        ));
    }
}
