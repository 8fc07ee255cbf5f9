use crate::address::AccAddress;
use crate::core::{Coin, DecCoin};
use crate::error::{AnteError, Result};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Read side of the rewards parameters consulted by the fee check
pub trait FeeRegistry {
    /// Minimum gas unit price, `None` when not set
    fn min_consensus_fee(&self) -> Result<Option<DecCoin>>;

    /// Flat fee owed for calling `contract`, `None` when not registered
    fn flat_fee(&self, contract: &AccAddress) -> Result<Option<Coin>>;
}

impl<T: FeeRegistry + ?Sized> FeeRegistry for &T {
    fn min_consensus_fee(&self) -> Result<Option<DecCoin>> {
        (**self).min_consensus_fee()
    }

    fn flat_fee(&self, contract: &AccAddress) -> Result<Option<Coin>> {
        (**self).flat_fee(contract)
    }
}

impl<T: FeeRegistry + ?Sized> FeeRegistry for Arc<T> {
    fn min_consensus_fee(&self) -> Result<Option<DecCoin>> {
        (**self).min_consensus_fee()
    }

    fn flat_fee(&self, contract: &AccAddress) -> Result<Option<Coin>> {
        (**self).flat_fee(contract)
    }
}

#[derive(Default)]
struct RegistryState {
    min_consensus_fee: Option<DecCoin>,
    flat_fees: HashMap<AccAddress, Coin>,
}

/// In-memory registry
pub struct MemoryFeeRegistry {
    inner: RwLock<RegistryState>,
}

impl Default for MemoryFeeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFeeRegistry {
    pub fn new() -> MemoryFeeRegistry {
        MemoryFeeRegistry {
            inner: RwLock::new(RegistryState::default()),
        }
    }

    pub fn with_min_consensus_fee(price: DecCoin) -> MemoryFeeRegistry {
        let registry = Self::new();
        registry.set_min_consensus_fee(Some(price));
        registry
    }

    pub fn set_min_consensus_fee(&self, price: Option<DecCoin>) {
        match self.inner.write() {
            Ok(mut state) => state.min_consensus_fee = price,
            Err(_) => log::error!("Failed to acquire write lock on fee registry"),
        }
    }

    pub fn set_flat_fee(&self, contract: AccAddress, fee: Coin) {
        match self.inner.write() {
            Ok(mut state) => {
                state.flat_fees.insert(contract, fee);
            }
            Err(_) => log::error!("Failed to acquire write lock on fee registry"),
        }
    }

    pub fn remove_flat_fee(&self, contract: &AccAddress) -> bool {
        match self.inner.write() {
            Ok(mut state) => state.flat_fees.remove(contract).is_some(),
            Err(_) => {
                log::error!("Failed to acquire write lock on fee registry");
                false
            }
        }
    }
}

impl FeeRegistry for MemoryFeeRegistry {
    fn min_consensus_fee(&self) -> Result<Option<DecCoin>> {
        let state = self
            .inner
            .read()
            .map_err(|_| AnteError::Database("fee registry lock poisoned".to_string()))?;
        Ok(state.min_consensus_fee.clone())
    }

    fn flat_fee(&self, contract: &AccAddress) -> Result<Option<Coin>> {
        let state = self
            .inner
            .read()
            .map_err(|_| AnteError::Database("fee registry lock poisoned".to_string()))?;
        Ok(state.flat_fees.get(contract).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_registry() {
        let registry = MemoryFeeRegistry::new();
        assert!(registry.min_consensus_fee().unwrap().is_none());
        let contract = AccAddress::new(vec![1; 32]).unwrap();
        assert!(registry.flat_fee(&contract).unwrap().is_none());
    }

    #[test]
    fn test_set_and_remove() {
        let registry = MemoryFeeRegistry::with_min_consensus_fee("0.0025uarch".parse().unwrap());
        let contract = AccAddress::new(vec![1; 32]).unwrap();
        registry.set_flat_fee(contract.clone(), Coin::new("uarch", 100));

        assert_eq!(
            registry.min_consensus_fee().unwrap().unwrap().to_string(),
            "0.0025uarch"
        );
        assert_eq!(
            registry.flat_fee(&contract).unwrap(),
            Some(Coin::new("uarch", 100))
        );

        assert!(registry.remove_flat_fee(&contract));
        assert!(!registry.remove_flat_fee(&contract));
        assert!(registry.flat_fee(&contract).unwrap().is_none());

        registry.set_min_consensus_fee(None);
        assert!(registry.min_consensus_fee().unwrap().is_none());
    }

    #[test]
    fn test_shared_handles_see_updates() {
        let registry = Arc::new(MemoryFeeRegistry::new());
        let handle = Arc::clone(&registry);
        registry.set_min_consensus_fee(Some("1uarch".parse().unwrap()));
        assert!(handle.min_consensus_fee().unwrap().is_some());
    }
}
