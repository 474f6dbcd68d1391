//! Canonical decimal-string codec for the arbitrary-precision integers that cross the wire.
//!
//! Ciphertexts, public-key components and weights are always transported as decimal strings,
//! never as JSON numbers. Decoding is strict: exactly one textual form is accepted per value and
//! every value is range-checked against the bound that governs it.

use crate::errors::BlindScoreError;

use num_bigint::BigUint;

/// Encodes `value` as its canonical base-10 string.
///
/// # Example
///
/// ```
/// # use blind_score::codec::encode_decimal;
/// # use num_bigint::BigUint;
/// assert_eq!(encode_decimal(&BigUint::from(1234u32)), "1234");
/// ```
pub fn encode_decimal(value: &BigUint) -> String {
    value.to_str_radix(10)
}

/// Decodes a canonical decimal string without an upper bound.
///
/// Rejects empty strings, signs, whitespace, non-ASCII digits and leading zeros (`"0"` itself is
/// accepted).
pub fn decode_decimal(text: &str, what: &str) -> Result<BigUint, BlindScoreError> {
    check_syntax(text, what)?;
    BigUint::parse_bytes(text.as_bytes(), 10)
        .ok_or_else(|| BlindScoreError::Codec(format!("{} could not be parsed", what)))
}

/// Decodes a canonical decimal string of at most `max_bits` bits.
///
/// Text longer than any such value is rejected before it is converted.
pub fn decode_with_bits(text: &str, max_bits: u64, what: &str) -> Result<BigUint, BlindScoreError> {
    check_length(text, max_bits, what)?;
    let value = decode_decimal(text, what)?;
    if value.bits() > max_bits {
        return Err(BlindScoreError::Codec(format!(
            "{} exceeds {} bits",
            what, max_bits
        )));
    }
    Ok(value)
}

/// Decodes a canonical decimal string and requires the value to be strictly below `bound`.
pub fn decode_bounded(text: &str, bound: &BigUint, what: &str) -> Result<BigUint, BlindScoreError> {
    check_length(text, bound.bits(), what)?;
    let value = decode_decimal(text, what)?;
    if &value >= bound {
        return Err(BlindScoreError::Codec(format!(
            "{} exceeds the modulus range",
            what
        )));
    }
    Ok(value)
}

/// Decodes a small integer (weights) and requires it to lie in `min..=max`.
pub fn decode_small(text: &str, min: u8, max: u8, what: &str) -> Result<u8, BlindScoreError> {
    let value = decode_with_bits(text, u8::BITS as u64, what)?;
    u8::try_from(&value)
        .ok()
        .filter(|v| (min..=max).contains(v))
        .ok_or_else(|| {
            BlindScoreError::Codec(format!(
                "{} must be within {}..={}, got {}",
                what, min, max, value
            ))
        })
}

/// Most decimal digits a value of `bits` bits can have: `⌊bits · log10 2⌋ + 1`.
pub fn max_decimal_digits(bits: u64) -> usize {
    // 0.30103 is log10 2 rounded up
    (bits * 30_103 / 100_000 + 1) as usize
}

fn check_length(text: &str, max_bits: u64, what: &str) -> Result<(), BlindScoreError> {
    let limit = max_decimal_digits(max_bits);
    if text.len() > limit {
        return Err(BlindScoreError::Codec(format!(
            "{} is {} characters long, at most {} digits allowed",
            what,
            text.len(),
            limit
        )));
    }
    Ok(())
}

fn check_syntax(text: &str, what: &str) -> Result<(), BlindScoreError> {
    if text.is_empty() {
        return Err(BlindScoreError::Codec(format!("{} is empty", what)));
    }
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BlindScoreError::Codec(format!(
            "{} is not a decimal integer: {:?}",
            what,
            truncate(text)
        )));
    }
    if text.len() > 1 && text.starts_with('0') {
        return Err(BlindScoreError::Codec(format!(
            "{} has leading zeros: {:?}",
            what,
            truncate(text)
        )));
    }
    Ok(())
}

fn truncate(text: &str) -> String {
    const SHOWN: usize = 32;
    if text.chars().count() <= SHOWN {
        text.to_string()
    } else {
        let head: String = text.chars().take(SHOWN).collect();
        format!("{}…", head)
    }
}
