use lazy_static::lazy_static;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::TryRngCore;
use rand::rngs::OsRng;

/// Miller–Rabin rounds; error probability is at most 4^-40.
const MILLER_RABIN_ROUNDS: usize = 40;
const SIEVE_LIMIT: usize = 2000;

lazy_static! {
    /// Odd primes below `SIEVE_LIMIT`, used to discard most candidates before Miller–Rabin.
    static ref SMALL_PRIMES: Vec<u32> = {
        let mut composite = vec![false; SIEVE_LIMIT];
        let mut primes = Vec::new();
        for i in 2..SIEVE_LIMIT {
            if composite[i] {
                continue;
            }
            if i > 2 {
                primes.push(i as u32);
            }
            let mut j = i * i;
            while j < SIEVE_LIMIT {
                composite[j] = true;
                j += i;
            }
        }
        primes
    };
}

/// Returns a uniformly random integer in `[0, 2^bits)` drawn from the operating-system CSPRNG.
///
/// # Errors
/// Returns the OS error message when the entropy source is unavailable.
pub fn random_bits(bits: u64) -> Result<BigUint, String> {
    if bits == 0 {
        return Ok(BigUint::zero());
    }
    let byte_len = bits.div_ceil(8) as usize;
    let mut bytes = vec![0u8; byte_len];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| format!("secure random source unavailable: {}", e))?;

    // mask so the value stays below 2^bits
    let excess = (byte_len as u64) * 8 - bits;
    if excess > 0 {
        bytes[0] &= 0xFFu8 >> excess;
    }
    Ok(BigUint::from_bytes_be(&bytes))
}

/// Returns a uniformly random integer in `[0, bound)` by rejection sampling.
pub fn random_below(bound: &BigUint) -> Result<BigUint, String> {
    if bound.is_zero() {
        return Err("cannot sample below zero".into());
    }
    let bits = bound.bits();
    loop {
        let candidate = random_bits(bits)?;
        if &candidate < bound {
            return Ok(candidate);
        }
    }
}

/// Returns a uniformly random unit of Z_n, i.e. `r` in `[1, n)` with `gcd(r, n) == 1`.
pub fn random_unit(n: &BigUint) -> Result<BigUint, String> {
    loop {
        let r = random_below(n)?;
        if !r.is_zero() && r.gcd(n).is_one() {
            return Ok(r);
        }
    }
}

/// Paillier's `L(u) = (u - 1) / n`, defined only when `u ≡ 1 (mod n)`.
pub fn l_function(u: &BigUint, n: &BigUint) -> Option<BigUint> {
    if u.is_zero() {
        return None;
    }
    let (quotient, remainder) = (u - 1u32).div_rem(n);
    remainder.is_zero().then_some(quotient)
}

/// Probabilistic primality test: trial division by small primes, then Miller–Rabin.
pub fn is_probable_prime(candidate: &BigUint) -> Result<bool, String> {
    let two = BigUint::from(2u32);
    if candidate < &two {
        return Ok(false);
    }
    if candidate == &two {
        return Ok(true);
    }
    if candidate.is_even() {
        return Ok(false);
    }

    for &p in SMALL_PRIMES.iter() {
        let p = BigUint::from(p);
        if candidate == &p {
            return Ok(true);
        }
        if (candidate % &p).is_zero() {
            return Ok(false);
        }
    }

    // candidate - 1 = d * 2^s with d odd
    let n_minus_one = candidate - 1u32;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;
    // witnesses are drawn from [2, candidate - 2]
    let witness_span = candidate - 3u32;

    'witness: for _ in 0..MILLER_RABIN_ROUNDS {
        let a = random_below(&witness_span)? + 2u32;
        let mut x = a.modpow(&d, candidate);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = x.modpow(&two, candidate);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return Ok(false);
    }

    Ok(true)
}
