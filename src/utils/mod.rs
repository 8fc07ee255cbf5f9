//! Utility functions and helpers
//!
//! Bincode encoding used by the registry store and the message codec,
//! plus serde helpers for byte payloads.

pub mod serialization;

pub use serialization::{base64_bytes, deserialize, serialize, MAX_DECODE_BYTES};
