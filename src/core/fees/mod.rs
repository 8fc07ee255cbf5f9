//! Minimum fee admission check
//!
//! - `min_fee`: the check run once per transaction before execution
//! - `flat_fee`: discovery of contract flat fees across nested messages
//!
//! Both only read from the fee registry; nothing is stored between checks.

pub mod flat_fee;
pub mod min_fee;

pub use flat_fee::FlatFeeDiscovery;
pub use min_fee::{CheckerOptions, MinFeeChecker, Proceed};
