//! # Key pair
//!
//! Paillier key generation, encryption under the public key and decryption under the private
//! key. The private key is zeroized when dropped.

pub mod keys;
pub mod primes;

pub use keys::{DEFAULT_KEY_BITS, KeyPair, MAX_KEY_BITS, MIN_KEY_BITS, PrivateKey, PublicKey};
