//! Opaque Paillier ciphertexts and their homomorphic operations.

use crate::codec::encode_decimal;
use crate::keypair::PublicKey;

use num_bigint::BigUint;

/// An element of Z*_{n²} produced by [`PublicKey::encrypt`].
///
/// Only ever combined under the public key it was produced with:
/// `Enc(a) ⊕ Enc(b) = Enc(a + b)` and `Enc(a) ⊗ k = Enc(k·a)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext(BigUint);

impl Ciphertext {
    /// Wraps an already validated residue. Validation lives in [`PublicKey::accept`].
    pub(crate) fn from_residue(value: BigUint) -> Self {
        Self(value)
    }

    pub fn residue(&self) -> &BigUint {
        &self.0
    }

    /// Homomorphic addition: `c1 · c2 mod n²` decrypts to the sum of the plaintexts.
    pub fn add(&self, other: &Ciphertext, public_key: &PublicKey) -> Ciphertext {
        Ciphertext(public_key.n_squared().mul(&self.0, &other.0))
    }

    /// Homomorphic scalar multiplication: `c^k mod n²` decrypts to `k · m`.
    ///
    /// `k = 0` yields the trivial encryption of zero (`1`).
    pub fn scale(&self, k: u64, public_key: &PublicKey) -> Ciphertext {
        Ciphertext(public_key.n_squared().pow(&self.0, &BigUint::from(k)))
    }

    /// Canonical decimal-string form for the wire.
    pub fn to_decimal(&self) -> String {
        encode_decimal(&self.0)
    }
}
