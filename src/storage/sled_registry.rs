use crate::address::AccAddress;
use crate::core::{Coin, DecCoin};
use crate::error::{AnteError, Result};
use crate::storage::FeeRegistry;
use crate::utils::{deserialize, serialize};
use log::info;
use sled::{Db, Tree};
use std::path::Path;

const PARAMS_TREE: &str = "rewards_params";
const FLAT_FEES_TREE: &str = "flat_fees";
const MIN_CONSENSUS_FEE_KEY: &[u8] = b"min_consensus_fee";

/// Registry persisted in a Sled database
///
/// Layout: `rewards_params` holds the minimum consensus fee, `flat_fees`
/// maps raw contract address bytes to a bincode-encoded `Coin`.
#[derive(Clone)]
pub struct SledFeeRegistry {
    db: Db,
}

impl SledFeeRegistry {
    /// Open (or create) the registry database at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<SledFeeRegistry> {
        let db = sled::open(path.as_ref())
            .map_err(|e| AnteError::Database(format!("Failed to open database: {e}")))?;
        Ok(SledFeeRegistry { db })
    }

    fn params_tree(&self) -> Result<Tree> {
        self.db
            .open_tree(PARAMS_TREE)
            .map_err(|e| AnteError::Database(format!("Failed to open params tree: {e}")))
    }

    fn flat_fees_tree(&self) -> Result<Tree> {
        self.db
            .open_tree(FLAT_FEES_TREE)
            .map_err(|e| AnteError::Database(format!("Failed to open flat fees tree: {e}")))
    }

    pub fn set_min_consensus_fee(&self, price: &DecCoin) -> Result<()> {
        crate::core::validate_denom(&price.denom)?;
        self.params_tree()?
            .insert(MIN_CONSENSUS_FEE_KEY, serialize(price)?)?;
        info!("Set minimum consensus fee to {price}");
        Ok(())
    }

    pub fn clear_min_consensus_fee(&self) -> Result<()> {
        self.params_tree()?.remove(MIN_CONSENSUS_FEE_KEY)?;
        info!("Cleared minimum consensus fee");
        Ok(())
    }

    pub fn set_flat_fee(&self, contract: &AccAddress, fee: &Coin) -> Result<()> {
        fee.validate()?;
        self.flat_fees_tree()?
            .insert(contract.as_bytes(), serialize(fee)?)?;
        info!("Set flat fee {fee} for contract {contract}");
        Ok(())
    }

    /// Returns whether a flat fee was registered
    pub fn remove_flat_fee(&self, contract: &AccAddress) -> Result<bool> {
        let removed = self.flat_fees_tree()?.remove(contract.as_bytes())?.is_some();
        if removed {
            info!("Removed flat fee for contract {contract}");
        }
        Ok(removed)
    }

    /// All registered flat fees ordered by address bytes
    pub fn flat_fees(&self) -> Result<Vec<(AccAddress, Coin)>> {
        let mut fees = Vec::new();
        for item in self.flat_fees_tree()?.iter() {
            let (k, v) = item.map_err(|e| {
                AnteError::Database(format!("Failed to iterate flat fees tree: {e}"))
            })?;
            let coin: Coin = deserialize(v.as_ref())?;
            fees.push((AccAddress::new(k.to_vec())?, coin));
        }
        Ok(fees)
    }

    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }
}

impl FeeRegistry for SledFeeRegistry {
    fn min_consensus_fee(&self) -> Result<Option<DecCoin>> {
        match self.params_tree()?.get(MIN_CONSENSUS_FEE_KEY)? {
            Some(bytes) => Ok(Some(deserialize(bytes.as_ref())?)),
            None => Ok(None),
        }
    }

    fn flat_fee(&self, contract: &AccAddress) -> Result<Option<Coin>> {
        match self.flat_fees_tree()?.get(contract.as_bytes())? {
            Some(bytes) => Ok(Some(deserialize(bytes.as_ref())?)),
            None => Ok(None),
        }
    }
}
