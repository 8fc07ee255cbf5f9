use crate::core::coin::Coins;
use crate::core::message::Message;
use crate::error::{AnteError, Result};
use serde::{Deserialize, Serialize};

/// Fee fields declared by a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    pub amount: Coins,
    pub gas_limit: u64,
}

impl Fee {
    pub fn new(amount: Coins, gas_limit: u64) -> Fee {
        Fee { amount, gas_limit }
    }
}

/// Transaction as seen by the admission check
///
/// `fee` is optional because not every transaction shape is fee-bearing;
/// the check rejects those that are not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub messages: Vec<Message>,
    #[serde(default)]
    pub fee: Option<Fee>,
    #[serde(default)]
    pub memo: String,
}

impl Transaction {
    pub fn new(messages: Vec<Message>, fee: Fee) -> Transaction {
        Transaction {
            messages,
            fee: Some(fee),
            memo: String::new(),
        }
    }

    /// Transaction without fee fields
    pub fn without_fee(messages: Vec<Message>) -> Transaction {
        Transaction {
            messages,
            fee: None,
            memo: String::new(),
        }
    }

    pub fn get_messages(&self) -> &[Message] {
        &self.messages
    }

    /// Fee fields, or `MalformedTransaction` when the shape has none
    pub fn fee_tx(&self) -> Result<&Fee> {
        self.fee.as_ref().ok_or_else(|| {
            AnteError::MalformedTransaction("transaction does not support fee fields".to_string())
        })
    }

    pub fn from_json(json: &str) -> Result<Transaction> {
        serde_json::from_str(json)
            .map_err(|e| AnteError::MalformedTransaction(format!("failed to decode transaction: {e}")))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
