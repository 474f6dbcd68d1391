use crate::ciphertext::Ciphertext;
use crate::codec::{decode_bounded, decode_with_bits, encode_decimal};
use crate::errors::BlindScoreError;
use crate::keypair::primes::generate_prime;
use crate::protocol::wire::WirePublicKey;
use crate::ring::{Ring, l_function, random_unit};

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use zeroize::Zeroize;

use std::fmt;
use std::time::Instant;

/// Reference modulus size.
pub const DEFAULT_KEY_BITS: u64 = 2048;
/// Smallest modulus accepted anywhere; only meant for tests.
pub const MIN_KEY_BITS: u64 = 128;
/// Largest modulus accepted from the wire.
pub const MAX_KEY_BITS: u64 = 8192;

/// Paillier public key `(n, g)` with the derived ring Z_{n²}.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    n: BigUint,
    g: BigUint,
    n_squared: Ring,
}

/// Paillier private key `(λ, μ)`. Never leaves the client and is zeroized on drop.
pub struct PrivateKey {
    lambda: BigUint,
    mu: BigUint,
    n: BigUint,
    n_squared: Ring,
}

/// The session key pair.
#[derive(Debug)]
pub struct KeyPair {
    pub public: PublicKey,
    pub private: PrivateKey,
}

impl PublicKey {
    /// Builds a public key, checking that it is well formed: `n` odd and large enough,
    /// `0 < g < n²` and `gcd(g, n) = 1`.
    pub fn try_with(n: BigUint, g: BigUint) -> Result<Self, BlindScoreError> {
        if n.is_even() || n.bits() < MIN_KEY_BITS || n.bits() > MAX_KEY_BITS {
            return Err(BlindScoreError::Encryption(format!(
                "public modulus must be odd with {}..={} bits, got {} bits",
                MIN_KEY_BITS,
                MAX_KEY_BITS,
                n.bits()
            )));
        }

        let n_squared = Ring::try_with(&n * &n)?;
        if !n_squared.contains(&g) || g.is_zero() || !g.gcd(&n).is_one() {
            return Err(BlindScoreError::Encryption(
                "generator g must be a unit below n²".into(),
            ));
        }

        Ok(Self { n, g, n_squared })
    }

    pub fn n(&self) -> &BigUint {
        &self.n
    }

    pub fn g(&self) -> &BigUint {
        &self.g
    }

    pub fn n_squared(&self) -> &Ring {
        &self.n_squared
    }

    /// Encrypts `message` (which must be below `n`) with fresh randomness:
    /// `c = g^m · r^n mod n²`.
    pub fn encrypt(&self, message: &BigUint) -> Result<Ciphertext, BlindScoreError> {
        if message >= &self.n {
            return Err(BlindScoreError::Encryption(
                "plaintext does not fit the key's message space".into(),
            ));
        }

        let r = random_unit(&self.n).map_err(BlindScoreError::Encryption)?;
        let gm = self.n_squared.pow(&self.g, message);
        let rn = self.n_squared.pow(&r, &self.n);

        Ok(Ciphertext::from_residue(self.n_squared.mul(&gm, &rn)))
    }

    pub fn encrypt_u64(&self, message: u64) -> Result<Ciphertext, BlindScoreError> {
        self.encrypt(&BigUint::from(message))
    }

    /// Accepts a raw residue as a ciphertext under this key: `0 < c < n²` and `gcd(c, n) = 1`.
    pub fn accept(&self, residue: BigUint) -> Result<Ciphertext, BlindScoreError> {
        if residue.is_zero() || !self.n_squared.contains(&residue) {
            return Err(BlindScoreError::Codec(
                "ciphertext is outside (0, n²)".into(),
            ));
        }
        if !residue.gcd(&self.n).is_one() {
            return Err(BlindScoreError::Codec(
                "ciphertext is not a unit modulo n".into(),
            ));
        }
        Ok(Ciphertext::from_residue(residue))
    }

    /// Decodes and validates a decimal-string ciphertext.
    pub fn ciphertext_from_decimal(&self, text: &str) -> Result<Ciphertext, BlindScoreError> {
        let residue = decode_bounded(text, self.n_squared.modulus(), "ciphertext")?;
        self.accept(residue)
    }

    pub fn to_wire(&self) -> WirePublicKey {
        WirePublicKey {
            n: encode_decimal(&self.n),
            g: encode_decimal(&self.g),
        }
    }

    /// Decodes a public key received over the wire. `g` is range-checked against `n²`.
    pub fn from_wire(wire: &WirePublicKey) -> Result<Self, BlindScoreError> {
        let n = decode_with_bits(&wire.n, MAX_KEY_BITS, "public key n")?;
        let g = decode_bounded(&wire.g, &(&n * &n), "public key g")?;
        Self::try_with(n, g)
    }
}

impl PrivateKey {
    /// Decrypts `m = L(c^λ mod n²) · μ mod n`.
    ///
    /// Any unit below `n²` decrypts to *some* residue mod `n`, so this cannot tell a ciphertext
    /// made under a different key from a genuine one. Callers that know their plaintexts are
    /// small use [`PrivateKey::decrypt_u64`], which can.
    ///
    /// # Errors
    /// `Decryption` when the ciphertext is `0`, not below `n²` or not a unit modulo `n`.
    pub fn decrypt(&self, ciphertext: &Ciphertext) -> Result<BigUint, BlindScoreError> {
        let c = ciphertext.residue();
        if c.is_zero() || !self.n_squared.contains(c) || !c.gcd(&self.n).is_one() {
            return Err(BlindScoreError::Decryption("malformed ciphertext".into()));
        }

        let u = self.n_squared.pow(c, &self.lambda);
        let l = l_function(&u, &self.n)
            .ok_or_else(|| BlindScoreError::Decryption("L(c^λ) is undefined".into()))?;

        Ok((l * &self.mu) % &self.n)
    }

    /// Decrypts a value that must fit a `u64` (feature counts and their scaled contributions).
    ///
    /// This bound is what detects a key mismatch. A ciphertext produced under another key
    /// decrypts to a value spread over `0..n`, which lands below `2^64` with probability
    /// `2^64 / n` (at most `2^-64` for the smallest accepted modulus).
    ///
    /// # Errors
    /// `Decryption` for a malformed ciphertext or a value of 64 bits or more.
    pub fn decrypt_u64(&self, ciphertext: &Ciphertext) -> Result<u64, BlindScoreError> {
        self.decrypt(ciphertext)?.to_u64().ok_or_else(|| {
            BlindScoreError::Decryption(
                "decrypted value does not fit a 64-bit count; wrong key?".into(),
            )
        })
    }
}

impl Zeroize for PrivateKey {
    fn zeroize(&mut self) {
        // num-bigint exposes no in-place scrubbing; overwrite the secrets so the old limbs are
        // released and the key becomes unusable.
        self.lambda.set_zero();
        self.mu.set_zero();
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("bits", &self.n.bits())
            .finish_non_exhaustive()
    }
}

impl KeyPair {
    /// Generates a Paillier key pair whose modulus `n = p·q` has exactly `bits` bits.
    ///
    /// Uses `g = n + 1`, `λ = lcm(p − 1, q − 1)` and `μ = L(g^λ mod n²)⁻¹ mod n`.
    ///
    /// # Errors
    /// `KeyGeneration` when `bits` is odd or outside `MIN_KEY_BITS..=MAX_KEY_BITS`, or when the
    /// operating-system random source is unavailable.
    pub fn generate(bits: u64) -> Result<Self, BlindScoreError> {
        if bits % 2 != 0 || !(MIN_KEY_BITS..=MAX_KEY_BITS).contains(&bits) {
            return Err(BlindScoreError::KeyGeneration(format!(
                "modulus size must be even and within {}..={}, got {}",
                MIN_KEY_BITS, MAX_KEY_BITS, bits
            )));
        }

        let started = Instant::now();
        let half = bits / 2;
        loop {
            let p = generate_prime(half)?;
            let q = generate_prime(half)?;
            if p == q {
                continue;
            }

            let n = &p * &q;
            let p_minus_one = &p - 1u32;
            let q_minus_one = &q - 1u32;
            let phi = &p_minus_one * &q_minus_one;
            if n.bits() != bits || !n.gcd(&phi).is_one() {
                continue;
            }

            let lambda = p_minus_one.lcm(&q_minus_one);
            let g = &n + 1u32;
            let public = PublicKey::try_with(n.clone(), g)?;

            let u = public.n_squared.pow(&public.g, &lambda);
            let l = l_function(&u, &n).ok_or_else(|| {
                BlindScoreError::KeyGeneration("L(g^λ) is undefined for this modulus".into())
            })?;
            let mu = Ring::try_with(n.clone())?
                .inv(&l)
                .map_err(|e| BlindScoreError::KeyGeneration(e.to_string()))?;

            let private = PrivateKey {
                lambda,
                mu,
                n,
                n_squared: public.n_squared.clone(),
            };

            log::debug!("generated {}-bit key pair in {:?}", bits, started.elapsed());
            return Ok(Self { public, private });
        }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private
    }
}
