//! # Rewards Ante - Minimum Consensus Fee Check
//!
//! This is the admission rule a transaction has to pass before it gets into
//! a block: it must pay at least the minimum gas unit price times its gas
//! limit. When I come back to this code, here's what I need to remember:
//!
//! ## What It Does
//! - **Simulation**: dry-runs are never fee checked
//! - **Minimum Price**: read fresh from the fee registry on every check; unset or zero means no policy
//! - **Rounding**: price x gas limit is rounded half-up, never truncated
//! - **Flat Fees**: contract calls are looked up in the registry, through nested `MsgExec` too
//! - **Decision**: any declared coin of the price denom covering the minimum lets the tx through
//!
//! ## How I Organized My Code
//! - `core/`: fee types, messages, transactions, the codec and the check itself
//! - `address/`: bech32 contract address parsing
//! - `storage/`: the fee registry trait, in-memory and Sled-backed registries
//! - `config/`: settings from defaults, TOML and environment
//! - `utils/`: bincode and serde helpers
//! - `cli/`: command-line tool for managing the registry and checking transactions
//!
//! ## Things To Keep In Mind
//! - Flat fees are discovered but only enforced with `enforce_flat_fees`
//! - Nested delegated execution is bounded by `max_delegation_depth`
//! - The first error in message order rejects the whole transaction

pub mod address;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod storage;
pub mod utils;

#[cfg(test)]
pub mod fixtures;

// Re-export commonly used types for convenience
pub use cli::{Command, Opt};
pub use config::{Config, Settings, GLOBAL_CONFIG};
pub use crate::core::{
    AnyMsg, BincodeMessageCodec, CheckerOptions, Coin, Coins, Dec, DecCoin, Fee,
    FlatFeeDiscovery, Message, MessageInspector, MinFeeChecker, MsgExec, MsgExecuteContract,
    Proceed, Transaction,
};
pub use error::{AnteError, Result};
pub use storage::{FeeRegistry, MemoryFeeRegistry, SledFeeRegistry};
