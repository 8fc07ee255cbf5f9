use crate::config::Settings;
use crate::core::codec::MessageInspector;
use crate::core::coin::{Coin, Coins};
use crate::core::fees::flat_fee::FlatFeeDiscovery;
use crate::core::transaction::{Fee, Transaction};
use crate::error::{AnteError, Result};
use crate::storage::FeeRegistry;
use log::{debug, warn};

/// Why a transaction was allowed to continue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proceed {
    /// Dry-run, fees are not checked
    Simulation,
    /// No minimum gas unit price is active
    NoMinimumPrice,
    /// The computed minimum rounded down to nothing
    ZeroMinimumFee,
    /// The declared fee covers the minimum
    FeeCovered,
}

/// Options for `MinFeeChecker`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerOptions {
    pub bech32_prefix: String,
    pub max_delegation_depth: usize,
    /// Add discovered flat fees to the required minimum
    pub enforce_flat_fees: bool,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        CheckerOptions::from(&Settings::default())
    }
}

impl From<&Settings> for CheckerOptions {
    fn from(settings: &Settings) -> Self {
        CheckerOptions {
            bech32_prefix: settings.bech32_prefix.clone(),
            max_delegation_depth: settings.max_delegation_depth,
            enforce_flat_fees: settings.enforce_flat_fees,
        }
    }
}

/// Rejects transactions whose fee is below the network minimum
///
/// The minimum is the rewards module's minimum gas unit price times the
/// declared gas limit. Flat fees of the contracts a transaction calls are
/// discovered as well; they only raise the minimum when
/// `enforce_flat_fees` is set. The checker keeps no state between calls.
pub struct MinFeeChecker<R, I> {
    registry: R,
    inspector: I,
    options: CheckerOptions,
}

impl<R: FeeRegistry, I: MessageInspector> MinFeeChecker<R, I> {
    pub fn new(registry: R, inspector: I) -> Self {
        Self::with_options(registry, inspector, CheckerOptions::default())
    }

    pub fn with_options(registry: R, inspector: I, options: CheckerOptions) -> Self {
        MinFeeChecker {
            registry,
            inspector,
            options,
        }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Decide whether `tx` may continue
    pub fn check(&self, tx: &Transaction, simulate: bool) -> Result<Proceed> {
        if simulate {
            debug!("Skipping min fee check for simulated transaction");
            return Ok(Proceed::Simulation);
        }

        let fee = tx.fee_tx()?;

        let price = match self.registry.min_consensus_fee()? {
            Some(price) if !price.is_zero() => price,
            _ => {
                debug!("No minimum gas unit price set, skipping min fee check");
                return Ok(Proceed::NoMinimumPrice);
            }
        };

        if fee.gas_limit == 0 {
            return Err(AnteError::InvalidGasLimit(
                "tx gas limit is not set".to_string(),
            ));
        }

        let min_fee_expected = Coin::new(
            price.denom.clone(),
            price.amount.mul_int_round(fee.gas_limit)?,
        );

        let flat_fees = FlatFeeDiscovery::new(
            &self.registry,
            &self.inspector,
            &self.options.bech32_prefix,
            self.options.max_delegation_depth,
        )
        .total(tx.get_messages())?;

        debug!(
            "Min fee expected {min_fee_expected} (price {price}, gas {}), flat fees [{flat_fees}]",
            fee.gas_limit
        );

        if self.options.enforce_flat_fees {
            Self::check_with_flat_fees(fee, &min_fee_expected, &flat_fees)
        } else {
            Self::check_gas_fee(fee, &min_fee_expected)
        }
    }

    /// Run the check and hand the transaction to `next` when it passes
    pub fn ante_handle<T, F>(&self, tx: &Transaction, simulate: bool, next: F) -> Result<T>
    where
        F: FnOnce(&Transaction, bool) -> Result<T>,
    {
        self.check(tx, simulate)?;
        next(tx, simulate)
    }

    fn check_gas_fee(fee: &Fee, min_fee_expected: &Coin) -> Result<Proceed> {
        if min_fee_expected.is_zero() {
            return Ok(Proceed::ZeroMinimumFee);
        }

        let required = Coins::from_coin(min_fee_expected);
        if fee.amount.is_any_gte(&required) {
            return Ok(Proceed::FeeCovered);
        }

        warn!(
            "Rejecting transaction: fee {} below minimum {required}",
            fee.amount
        );
        Err(AnteError::InsufficientFee {
            fee: fee.amount.clone(),
            required,
        })
    }

    fn check_with_flat_fees(
        fee: &Fee,
        min_fee_expected: &Coin,
        flat_fees: &Coins,
    ) -> Result<Proceed> {
        let required = Coins::new()
            .with_coin(min_fee_expected)?
            .checked_add(flat_fees)?;
        if required.is_empty() {
            return Ok(Proceed::ZeroMinimumFee);
        }
        if fee.amount.is_all_gte(&required) {
            return Ok(Proceed::FeeCovered);
        }

        warn!(
            "Rejecting transaction: fee {} below minimum {required} including flat fees",
            fee.amount
        );
        Err(AnteError::InsufficientFee {
            fee: fee.amount.clone(),
            required,
        })
    }
}
