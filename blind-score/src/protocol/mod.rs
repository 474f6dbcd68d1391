//! # Protocol
//!
//! The client/server exchange: wire bodies, the client's encryption layer and the server's
//! blind aggregator.

pub mod aggregator;
pub mod encryption;
pub mod wire;

pub use aggregator::{Aggregator, aggregate};
pub use encryption::{build_request, decode_response, decrypt_all, encrypt_active};
pub use wire::{
    ComputeReply, ComputeRequest, ComputeResponse, ErrorResponse, QuestionResponse, WirePublicKey,
};
