//! Fee registry storage
//!
//! The check only reads from a `FeeRegistry`. An in-memory registry serves
//! tests and embedding; the Sled-backed one persists the parameters for the
//! command-line tool.

pub mod fee_registry;
pub mod sled_registry;

pub use fee_registry::{FeeRegistry, MemoryFeeRegistry};
pub use sled_registry::SledFeeRegistry;
