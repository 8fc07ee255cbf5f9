//! Core admission functionality
//!
//! This module contains the fee types, the transaction and message model,
//! the codec for wrapped messages and the minimum fee check itself.

pub mod codec;
pub mod coin;
pub mod decimal;
pub mod fees;
pub mod message;
pub mod transaction;

pub use codec::{BincodeMessageCodec, MessageInspector};
pub use coin::{validate_denom, Coin, Coins, DecCoin};
pub use decimal::Dec;
pub use fees::{CheckerOptions, FlatFeeDiscovery, MinFeeChecker, Proceed};
pub use message::{
    AnyMsg, Message, MsgExec, MsgExecuteContract, MsgInstantiateContract, MsgSend,
};
pub use transaction::{Fee, Transaction};
