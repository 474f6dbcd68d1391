//! HTTP front of the blind aggregator.
//!
//! The server never holds a key: every `POST /compute` carries its own public key, so the only
//! shared state is the immutable configuration.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
