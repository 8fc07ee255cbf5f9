//! Transaction messages inspected by the fee check
//!
//! Only contract execution and delegated execution matter for flat fees;
//! the remaining variants are carried so real transactions can be modelled.

use crate::core::coin::Coins;
use crate::error::Result;
use crate::utils::{base64_bytes, serialize};
use serde::{Deserialize, Serialize};

pub const EXECUTE_CONTRACT_TYPE_URL: &str = "/cosmwasm.wasm.v1.MsgExecuteContract";
pub const INSTANTIATE_CONTRACT_TYPE_URL: &str = "/cosmwasm.wasm.v1.MsgInstantiateContract";
pub const EXEC_TYPE_URL: &str = "/cosmos.authz.v1beta1.MsgExec";
pub const SEND_TYPE_URL: &str = "/cosmos.bank.v1beta1.MsgSend";

/// Opaque encoded message, as carried inside a delegated execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct AnyMsg {
    pub type_url: String,
    #[serde(with = "base64_bytes")]
    pub value: Vec<u8>,
}

/// Call into a deployed contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct MsgExecuteContract {
    pub sender: String,
    pub contract: String,
    #[serde(with = "base64_bytes")]
    pub msg: Vec<u8>,
    #[serde(default)]
    pub funds: Coins,
}

/// Execute wrapped messages on behalf of a granter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct MsgExec {
    pub grantee: String,
    pub msgs: Vec<AnyMsg>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct MsgSend {
    pub from_address: String,
    pub to_address: String,
    pub amount: Coins,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct MsgInstantiateContract {
    pub sender: String,
    pub code_id: u64,
    pub label: String,
    #[serde(with = "base64_bytes")]
    pub msg: Vec<u8>,
    #[serde(default)]
    pub funds: Coins,
}

/// Messages a transaction can carry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    ExecuteContract(MsgExecuteContract),
    Exec(MsgExec),
    Send(MsgSend),
    InstantiateContract(MsgInstantiateContract),
}

impl Message {
    pub fn type_url(&self) -> &'static str {
        match self {
            Message::ExecuteContract(_) => EXECUTE_CONTRACT_TYPE_URL,
            Message::Exec(_) => EXEC_TYPE_URL,
            Message::Send(_) => SEND_TYPE_URL,
            Message::InstantiateContract(_) => INSTANTIATE_CONTRACT_TYPE_URL,
        }
    }

    /// Pack into an opaque envelope for use inside `MsgExec`
    pub fn to_any(&self) -> Result<AnyMsg> {
        Ok(AnyMsg {
            type_url: self.type_url().to_string(),
            value: serialize(self)?,
        })
    }

    pub fn execute_contract(sender: &str, contract: &str, msg: &[u8]) -> Message {
        Message::ExecuteContract(MsgExecuteContract {
            sender: sender.to_string(),
            contract: contract.to_string(),
            msg: msg.to_vec(),
            funds: Coins::new(),
        })
    }

    /// Wrap `inner` messages into a delegated execution
    pub fn exec(grantee: &str, inner: &[Message]) -> Result<Message> {
        let msgs = inner.iter().map(Message::to_any).collect::<Result<Vec<_>>>()?;
        Ok(Message::Exec(MsgExec {
            grantee: grantee.to_string(),
            msgs,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_urls() {
        let msg = Message::execute_contract("archway1sender", "archway1contract", b"{}");
        assert_eq!(msg.type_url(), EXECUTE_CONTRACT_TYPE_URL);

        let exec = Message::exec("archway1grantee", &[msg.clone()]).unwrap();
        assert_eq!(exec.type_url(), EXEC_TYPE_URL);
    }

    #[test]
    fn test_exec_packs_inner_messages() {
        let inner = Message::execute_contract("archway1sender", "archway1contract", b"{}");
        let exec = Message::exec("archway1grantee", &[inner.clone(), inner]).unwrap();

        match exec {
            Message::Exec(MsgExec { msgs, .. }) => {
                assert_eq!(msgs.len(), 2);
                assert!(msgs.iter().all(|m| m.type_url == EXECUTE_CONTRACT_TYPE_URL));
                assert!(msgs.iter().all(|m| !m.value.is_empty()));
            }
            other => panic!("expected exec, got {other:?}"),
        }
    }

    #[test]
    fn test_json_tagging() {
        let msg = Message::execute_contract("archway1sender", "archway1contract", b"{}");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"execute_contract\""));
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }
}
