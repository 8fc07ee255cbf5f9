use crate::address::AccAddress;
use crate::core::codec::MessageInspector;
use crate::core::coin::Coins;
use crate::core::message::{Message, MsgExec};
use crate::error::{AnteError, Result};
use crate::storage::FeeRegistry;
use log::debug;

/// Sums contract flat fees across a message tree
///
/// Contract executions are looked up in the registry; delegated executions
/// are decoded and walked, at most `max_depth` levels deep. Every other
/// message contributes nothing.
pub struct FlatFeeDiscovery<'a, R: ?Sized, I: ?Sized> {
    registry: &'a R,
    inspector: &'a I,
    bech32_prefix: &'a str,
    max_depth: usize,
}

impl<'a, R, I> FlatFeeDiscovery<'a, R, I>
where
    R: FeeRegistry + ?Sized,
    I: MessageInspector + ?Sized,
{
    pub fn new(
        registry: &'a R,
        inspector: &'a I,
        bech32_prefix: &'a str,
        max_depth: usize,
    ) -> Self {
        FlatFeeDiscovery {
            registry,
            inspector,
            bech32_prefix,
            max_depth,
        }
    }

    /// Total flat fees owed by `messages`, stopping at the first error
    pub fn total(&self, messages: &[Message]) -> Result<Coins> {
        let total = messages.iter().try_fold(Coins::new(), |acc, msg| {
            acc.checked_add(&self.contract_flat_fees(msg, 0)?)
        })?;
        total.validate()?;
        Ok(total)
    }

    fn contract_flat_fees(&self, msg: &Message, depth: usize) -> Result<Coins> {
        let fees = match msg {
            Message::ExecuteContract(execute) => self.registered_fee(&execute.contract)?,
            Message::Exec(exec) => self.delegated_fees(exec, depth)?,
            Message::Send(_) | Message::InstantiateContract(_) => Coins::new(),
        };
        fees.validate()?;
        Ok(fees)
    }

    fn registered_fee(&self, contract: &str) -> Result<Coins> {
        let address = AccAddress::from_bech32_with_prefix(contract, self.bech32_prefix)?;
        match self.registry.flat_fee(&address)? {
            Some(fee) => {
                debug!("Contract {contract} has flat fee {fee}");
                Coins::new().with_coin(&fee)
            }
            None => Ok(Coins::new()),
        }
    }

    fn delegated_fees(&self, exec: &MsgExec, depth: usize) -> Result<Coins> {
        if depth >= self.max_depth {
            return Err(AnteError::UnauthorizedPayload(format!(
                "delegated messages nested deeper than {} levels",
                self.max_depth
            )));
        }

        exec.msgs.iter().try_fold(Coins::new(), |acc, any| {
            let inner = self.inspector.decode(any).map_err(|e| {
                AnteError::UnauthorizedPayload(format!("error decoding authz messages: {e}"))
            })?;
            acc.checked_add(&self.contract_flat_fees(&inner, depth + 1)?)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::codec::BincodeMessageCodec;
    use crate::core::message::{AnyMsg, EXECUTE_CONTRACT_TYPE_URL};
    use crate::core::Coin;
    use crate::fixtures::{contract_address, contract_call, flat_fee_registry, GRANTEE};
    use crate::storage::MemoryFeeRegistry;

    fn discover(
        registry: &MemoryFeeRegistry,
        messages: &[Message],
        max_depth: usize,
    ) -> Result<Coins> {
        let codec = BincodeMessageCodec::default();
        FlatFeeDiscovery::new(registry, &codec, "archway", max_depth).total(messages)
    }

    #[test]
    fn test_direct_contract_call() {
        let registry = flat_fee_registry(&[(1, Coin::new("uarch", 100))]);
        let fees = discover(&registry, &[contract_call(1)], 5).unwrap();
        assert_eq!(fees.amount_of("uarch"), 100);
    }

    #[test]
    fn test_unregistered_contract_owes_nothing() {
        let registry = flat_fee_registry(&[(1, Coin::new("uarch", 100))]);
        let fees = discover(&registry, &[contract_call(2)], 5).unwrap();
        assert!(fees.is_empty());
    }

    #[test]
    fn test_delegated_execution_sums_wrapped_calls() {
        let registry = flat_fee_registry(&[
            (1, Coin::new("uarch", 100)),
            (2, Coin::new("uarch", 250)),
        ]);
        let exec = Message::exec(GRANTEE, &[contract_call(1), contract_call(2)]).unwrap();

        let fees = discover(&registry, &[exec], 5).unwrap();
        assert_eq!(fees.amount_of("uarch"), 350);
    }

    #[test]
    fn test_nested_delegation_and_mixed_denoms() {
        let registry = flat_fee_registry(&[
            (1, Coin::new("uarch", 100)),
            (2, Coin::new("uatom", 3)),
        ]);
        let inner = Message::exec(GRANTEE, &[contract_call(2)]).unwrap();
        let outer = Message::exec(GRANTEE, &[contract_call(1), inner]).unwrap();

        let fees = discover(&registry, &[outer, contract_call(1)], 5).unwrap();
        assert_eq!(fees.amount_of("uarch"), 200);
        assert_eq!(fees.amount_of("uatom"), 3);
    }

    #[test]
    fn test_undecodable_wrapped_message() {
        let registry = flat_fee_registry(&[]);
        let exec = Message::Exec(MsgExec {
            grantee: GRANTEE.to_string(),
            msgs: vec![AnyMsg {
                type_url: EXECUTE_CONTRACT_TYPE_URL.to_string(),
                value: vec![0xff, 0x00, 0x13],
            }],
        });

        let err = discover(&registry, &[exec], 5).unwrap_err();
        assert!(matches!(err, AnteError::UnauthorizedPayload(_)));
    }

    #[test]
    fn test_depth_bound() {
        let registry = flat_fee_registry(&[(1, Coin::new("uarch", 1))]);
        let mut msg = contract_call(1);
        for _ in 0..3 {
            msg = Message::exec(GRANTEE, &[msg]).unwrap();
        }

        assert_eq!(discover(&registry, &[msg.clone()], 3).unwrap().amount_of("uarch"), 1);
        assert!(matches!(
            discover(&registry, &[msg], 2),
            Err(AnteError::UnauthorizedPayload(_))
        ));
    }

    #[test]
    fn test_invalid_contract_address() {
        let registry = flat_fee_registry(&[]);
        let msg = Message::execute_contract(GRANTEE, "not-a-contract", b"{}");
        assert!(matches!(
            discover(&registry, &[msg], 5),
            Err(AnteError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_first_error_wins() {
        let registry = flat_fee_registry(&[]);
        let bad_address = Message::execute_contract(GRANTEE, "bogus", b"{}");
        let bad_payload = Message::Exec(MsgExec {
            grantee: GRANTEE.to_string(),
            msgs: vec![AnyMsg {
                type_url: EXECUTE_CONTRACT_TYPE_URL.to_string(),
                value: vec![],
            }],
        });

        assert!(matches!(
            discover(&registry, &[bad_address.clone(), bad_payload.clone()], 5),
            Err(AnteError::InvalidAddress(_))
        ));
        assert!(matches!(
            discover(&registry, &[bad_payload, bad_address], 5),
            Err(AnteError::UnauthorizedPayload(_))
        ));
    }

    #[test]
    fn test_invalid_registered_denom() {
        let registry = MemoryFeeRegistry::new();
        let contract = AccAddress::from_bech32_with_prefix(&contract_address(1), "archway").unwrap();
        registry.set_flat_fee(contract, Coin::new("u$", 10));

        assert!(matches!(
            discover(&registry, &[contract_call(1)], 5),
            Err(AnteError::InvalidFeeAmount(_))
        ));
    }
}
