//! Blind scoring of interview answers.
//!
//! The client extracts six counts from an answer, encrypts the ones with a non-zero weight
//! under a Paillier key and sends them away together with the weights. The server raises every
//! ciphertext to its weight without learning anything about the counts; the client decrypts the
//! scaled values and finishes the score locally (sign, caps, percentage and grade).

pub mod ciphertext;
pub mod codec;
pub mod errors;
pub mod features;
pub mod feedback;
pub mod keypair;
pub mod policy;
pub mod preset;
pub mod protocol;
pub mod ring;
pub mod score;
pub mod session;
