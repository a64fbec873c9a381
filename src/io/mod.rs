//! Payload generation module
//!
//! Produces the pseudo-random byte buffers pushed through each storage
//! backend.

pub mod payload;

pub use payload::{Payload, PayloadGenerator};
