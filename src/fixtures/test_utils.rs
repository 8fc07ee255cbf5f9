//! Test utilities for fee check testing

use crate::address::AccAddress;
use crate::core::{Coin, Coins, Fee, Message, MsgSend, Transaction};
use crate::storage::MemoryFeeRegistry;

pub const PREFIX: &str = "archway";
pub const GRANTEE: &str = "archway1grantee";

/// Deterministic bech32 contract address built from a seed byte
pub fn contract_address(seed: u8) -> String {
    AccAddress::new(vec![seed; 32])
        .and_then(|addr| addr.to_bech32(PREFIX))
        .expect("seeded contract address should encode")
}

/// Contract execution against the seeded contract
pub fn contract_call(seed: u8) -> Message {
    Message::execute_contract(GRANTEE, &contract_address(seed), b"{\"increment\":{}}")
}

/// Message that never carries a flat fee
pub fn send_msg() -> Message {
    Message::Send(MsgSend {
        from_address: GRANTEE.to_string(),
        to_address: "archway1recipient".to_string(),
        amount: Coins::from_coin(&Coin::new("uarch", 10)),
    })
}

/// Registry holding only a minimum gas unit price such as `0.0025uarch`
pub fn price_registry(price: &str) -> MemoryFeeRegistry {
    MemoryFeeRegistry::with_min_consensus_fee(price.parse().expect("valid test price"))
}

/// Registry with flat fees for seeded contracts and no price
pub fn flat_fee_registry(fees: &[(u8, Coin)]) -> MemoryFeeRegistry {
    let registry = MemoryFeeRegistry::new();
    for (seed, fee) in fees {
        let contract = AccAddress::new(vec![*seed; 32]).expect("seeded address");
        registry.set_flat_fee(contract, fee.clone());
    }
    registry
}

/// Fee-bearing transaction
pub fn fee_tx(amounts: &[(&str, u128)], gas_limit: u64, messages: Vec<Message>) -> Transaction {
    let amount = Coins::try_from(
        amounts
            .iter()
            .map(|(denom, amount)| Coin::new(*denom, *amount))
            .collect::<Vec<_>>(),
    )
    .expect("distinct fee denominations");
    Transaction::new(messages, Fee::new(amount, gas_limit))
}
