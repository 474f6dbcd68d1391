//! # Ring Module
//!
//! Provides the [`Ring`] struct for arbitrary-precision arithmetic in Z_k, plus the
//! entropy and number-theory helpers the key pair and ciphertext code builds on.

pub mod helper;
pub mod math;

pub use helper::{is_probable_prime, l_function, random_below, random_bits, random_unit};
pub use math::Ring;
