//! Implementation of ring ops using arbitrary-precision modular arithmetic.

use crate::errors::BlindScoreError;

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

/// Represents a finite ring Z_k over arbitrary-precision integers.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Ring {
    modulus: BigUint,
}

impl Ring {
    /// Create a new Ring with the given modulus.
    ///
    /// The modulus must be greater than 1.
    pub fn try_with(modulus: BigUint) -> Result<Self, BlindScoreError> {
        if modulus <= BigUint::one() {
            return Err(BlindScoreError::InvalidModulus(format!(
                "Modulus must be greater than 1, got {}",
                modulus
            )));
        }

        Ok(Ring { modulus })
    }

    /// Returns the modulus of the ring.
    ///
    /// # Example
    ///
    /// ```
    /// # use blind_score::ring::Ring;
    /// # use num_bigint::BigUint;
    /// let ring = Ring::try_with(BigUint::from(13u32)).unwrap();
    /// assert_eq!(ring.modulus(), &BigUint::from(13u32));
    /// ```
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Whether `value` is already a canonical representative, i.e. `value < modulus`.
    pub fn contains(&self, value: &BigUint) -> bool {
        value < &self.modulus
    }

    /// Normalizes a value to be within the range `[0, modulus - 1]`.
    pub fn normalize(&self, value: &BigUint) -> BigUint {
        value % &self.modulus
    }

    /// Computes `(a + b) mod modulus`.
    ///
    /// # Example
    ///
    /// ```
    /// # use blind_score::ring::Ring;
    /// # use num_bigint::BigUint;
    /// let ring = Ring::try_with(BigUint::from(10u32)).unwrap();
    /// let sum = ring.add(&BigUint::from(7u32), &BigUint::from(5u32));
    /// assert_eq!(sum, BigUint::from(2u32));
    /// ```
    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.modulus
    }

    /// Computes `(a * b) mod modulus`.
    ///
    /// # Example
    ///
    /// ```
    /// # use blind_score::ring::Ring;
    /// # use num_bigint::BigUint;
    /// let ring = Ring::try_with(BigUint::from(10u32)).unwrap();
    /// let product = ring.mul(&BigUint::from(7u32), &BigUint::from(5u32));
    /// assert_eq!(product, BigUint::from(5u32));
    /// ```
    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.modulus
    }

    /// Computes `base^exponent mod modulus` by square-and-multiply.
    pub fn pow(&self, base: &BigUint, exponent: &BigUint) -> BigUint {
        base.modpow(exponent, &self.modulus)
    }

    /// Computes the modular multiplicative inverse `a^-1 mod modulus`.
    ///
    /// The inverse exists if and only if `gcd(a, modulus) == 1`.
    /// Uses the Extended Euclidean Algorithm.
    ///
    /// # Errors
    ///
    /// Returns `BlindScoreError::InvalidModulus` if the inverse does not exist.
    ///
    /// # Example
    ///
    /// ```
    /// # use blind_score::ring::Ring;
    /// # use num_bigint::BigUint;
    /// let ring = Ring::try_with(BigUint::from(10u32)).unwrap();
    /// assert_eq!(ring.inv(&BigUint::from(3u32)).unwrap(), BigUint::from(7u32));
    /// assert!(ring.inv(&BigUint::from(2u32)).is_err());
    /// ```
    pub fn inv(&self, a: &BigUint) -> Result<BigUint, BlindScoreError> {
        let a_norm = self.normalize(a);
        if a_norm.is_zero() {
            return Err(BlindScoreError::InvalidModulus(format!(
                "Cannot invert 0 in mod {}",
                self.modulus
            )));
        }

        let a_signed = BigInt::from_biguint(Sign::Plus, a_norm);
        let m_signed = BigInt::from_biguint(Sign::Plus, self.modulus.clone());
        let egcd = a_signed.extended_gcd(&m_signed);
        if !egcd.gcd.is_one() {
            return Err(BlindScoreError::InvalidModulus(format!(
                "Modular inverse does not exist mod {} (gcd={})",
                self.modulus, egcd.gcd
            )));
        }

        egcd.x
            .mod_floor(&m_signed)
            .to_biguint()
            .ok_or_else(|| BlindScoreError::InvalidModulus("negative inverse after mod_floor".into()))
    }

    /// Whether `a` is a unit of the ring (`gcd(a, modulus) == 1`).
    pub fn is_unit(&self, a: &BigUint) -> bool {
        !a.is_zero() && a.gcd(&self.modulus).is_one()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(v: u64) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn test_ring_creation() {
        assert!(Ring::try_with(big(11)).is_ok());
        assert!(Ring::try_with(big(25)).is_ok());
        assert!(Ring::try_with(big(1)).is_err());
        assert!(Ring::try_with(big(0)).is_err());
    }

    #[test]
    fn test_element_normalization() -> Result<(), BlindScoreError> {
        let ring = Ring::try_with(big(11))?;
        assert_eq!(ring.normalize(&big(5)), big(5));
        assert_eq!(ring.normalize(&big(16)), big(5));
        assert!(ring.contains(&big(10)));
        assert!(!ring.contains(&big(11)));
        Ok(())
    }

    #[test]
    fn test_multiplication_and_pow() -> Result<(), BlindScoreError> {
        let ring = Ring::try_with(big(11))?;
        assert_eq!(ring.mul(&big(5), &big(8)), big(7));
        assert_eq!(ring.pow(&big(2), &big(10)), big(1));
        assert_eq!(ring.pow(&big(7), &big(0)), big(1));
        Ok(())
    }

    #[test]
    fn test_inversion() -> Result<(), BlindScoreError> {
        let ring = Ring::try_with(big(11))?;
        assert_eq!(ring.inv(&big(5))?, big(9));
        assert!(ring.inv(&big(0)).is_err());

        let composite = Ring::try_with(big(12))?;
        assert!(composite.inv(&big(4)).is_err());
        assert!(composite.is_unit(&big(5)));
        assert!(!composite.is_unit(&big(6)));
        Ok(())
    }
}
