//! Coin types used for declared fees, flat fees and the gas unit price

use crate::core::decimal::Dec;
use crate::error::{AnteError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

const MIN_DENOM_LEN: usize = 3;
const MAX_DENOM_LEN: usize = 128;

/// Check a denomination against `[a-zA-Z][a-zA-Z0-9/:._-]{2,127}`
pub fn validate_denom(denom: &str) -> Result<()> {
    let mut chars = denom.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let valid_tail = chars.all(|c| c.is_ascii_alphanumeric() || "/:._-".contains(c));

    if !starts_with_letter
        || !valid_tail
        || denom.len() < MIN_DENOM_LEN
        || denom.len() > MAX_DENOM_LEN
    {
        return Err(AnteError::InvalidFeeAmount(format!(
            "invalid denom: {denom:?}"
        )));
    }
    Ok(())
}

/// Split `500uarch` / `0.0025uarch` into amount and denom
fn split_amount_denom(s: &str) -> Result<(&str, &str)> {
    let s = s.trim();
    let idx = s
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .ok_or_else(|| AnteError::InvalidFeeAmount(format!("missing denom in {s:?}")))?;
    if idx == 0 {
        return Err(AnteError::InvalidFeeAmount(format!(
            "missing amount in {s:?}"
        )));
    }
    let (amount, denom) = s.split_at(idx);
    validate_denom(denom)?;
    Ok((amount, denom))
}

/// Integer amount of a single denomination
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, bincode::Encode, bincode::Decode,
)]
pub struct Coin {
    pub denom: String,
    #[serde(with = "amount_string")]
    pub amount: u128,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: u128) -> Coin {
        Coin {
            denom: denom.into(),
            amount,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    pub fn validate(&self) -> Result<()> {
        validate_denom(&self.denom)
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for Coin {
    type Err = AnteError;

    fn from_str(s: &str) -> Result<Self> {
        let (amount, denom) = split_amount_denom(s)?;
        let amount = amount.parse::<u128>().map_err(|e| {
            AnteError::InvalidFeeAmount(format!("invalid coin amount {amount:?}: {e}"))
        })?;
        Ok(Coin::new(denom, amount))
    }
}

/// Decimal amount of a single denomination, used for the gas unit price
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, bincode::Encode, bincode::Decode,
)]
pub struct DecCoin {
    pub denom: String,
    pub amount: Dec,
}

impl DecCoin {
    pub fn new(denom: impl Into<String>, amount: Dec) -> DecCoin {
        DecCoin {
            denom: denom.into(),
            amount,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl fmt::Display for DecCoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for DecCoin {
    type Err = AnteError;

    fn from_str(s: &str) -> Result<Self> {
        let (amount, denom) = split_amount_denom(s)?;
        Ok(DecCoin::new(denom, amount.parse()?))
    }
}

/// Set of coins keyed by denomination, zero amounts never stored
///
/// Built from a list, each denomination may appear once: two `250uarch`
/// entries are not one `500uarch` entry.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, bincode::Encode, bincode::Decode,
)]
#[serde(try_from = "Vec<Coin>", into = "Vec<Coin>")]
pub struct Coins(BTreeMap<String, u128>);

impl Coins {
    pub fn new() -> Coins {
        Coins(BTreeMap::new())
    }

    pub fn from_coin(coin: &Coin) -> Coins {
        let mut map = BTreeMap::new();
        if !coin.is_zero() {
            map.insert(coin.denom.clone(), coin.amount);
        }
        Coins(map)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn amount_of(&self, denom: &str) -> u128 {
        self.0.get(denom).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = Coin> + '_ {
        self.0
            .iter()
            .map(|(denom, amount)| Coin::new(denom.clone(), *amount))
    }

    /// Return a new set with `coin` added to its denomination
    pub fn with_coin(mut self, coin: &Coin) -> Result<Coins> {
        if coin.is_zero() {
            return Ok(self);
        }
        let total = self
            .amount_of(&coin.denom)
            .checked_add(coin.amount)
            .ok_or_else(|| AnteError::InvalidFeeAmount(format!("coin overflow adding {coin}")))?;
        self.0.insert(coin.denom.clone(), total);
        Ok(self)
    }

    /// Per-denomination sum of two sets
    pub fn checked_add(&self, other: &Coins) -> Result<Coins> {
        other
            .iter()
            .try_fold(self.clone(), |acc, coin| acc.with_coin(&coin))
    }

    /// True if any denomination of `other` is covered by this set
    pub fn is_any_gte(&self, other: &Coins) -> bool {
        other
            .0
            .iter()
            .any(|(denom, amount)| self.amount_of(denom) >= *amount)
    }

    /// True if every denomination of `other` is covered by this set
    pub fn is_all_gte(&self, other: &Coins) -> bool {
        other
            .0
            .iter()
            .all(|(denom, amount)| self.amount_of(denom) >= *amount)
    }

    /// Denominations must be well formed and amounts strictly positive
    pub fn validate(&self) -> Result<()> {
        for (denom, amount) in &self.0 {
            validate_denom(denom)?;
            if *amount == 0 {
                return Err(AnteError::InvalidFeeAmount(format!(
                    "coin {amount}{denom} amount is not positive"
                )));
            }
        }
        Ok(())
    }
}

impl TryFrom<Vec<Coin>> for Coins {
    type Error = AnteError;

    fn try_from(coins: Vec<Coin>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        let mut map = BTreeMap::new();
        for coin in coins {
            if !seen.insert(coin.denom.clone()) {
                return Err(AnteError::InvalidFeeAmount(format!(
                    "duplicate denomination {}",
                    coin.denom
                )));
            }
            if !coin.is_zero() {
                map.insert(coin.denom, coin.amount);
            }
        }
        Ok(Coins(map))
    }
}

impl From<Coins> for Vec<Coin> {
    fn from(coins: Coins) -> Self {
        coins.iter().collect()
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", rendered.join(","))
    }
}

/// Amounts travel as decimal strings so they survive JSON number limits
mod amount_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(amount: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(amount)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
