//! Fixed-point decimal used for gas unit prices
//!
//! Prices are stored as `u128` atomics with 18 fractional digits, the same
//! precision the rewards module uses for its minimum consensus fee.

use crate::error::{AnteError, Result};
use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of fractional digits carried by a `Dec`
pub const DEC_PRECISION: usize = 18;

/// 10^18, the atomics value of `1.0`
const DEC_ONE: u128 = 1_000_000_000_000_000_000;

/// Unsigned decimal with 18 digits of precision
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    bincode::Encode,
    bincode::Decode,
)]
pub struct Dec(u128);

impl Dec {
    pub const ZERO: Dec = Dec(0);

    /// Build a decimal from a whole number
    pub fn from_int(value: u128) -> Result<Dec> {
        value
            .checked_mul(DEC_ONE)
            .map(Dec)
            .ok_or_else(|| AnteError::InvalidFeeAmount(format!("decimal overflow: {value}")))
    }

    pub fn atomics(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiply by an integer and round half-up to the nearest whole unit
    pub fn mul_int_round(&self, value: u64) -> Result<u128> {
        let product = BigUint::from(self.0) * BigUint::from(value);
        let half = BigUint::from(DEC_ONE / 2);
        let rounded = (product + half) / BigUint::from(DEC_ONE);

        u128::try_from(&rounded).map_err(|_| {
            AnteError::InvalidFeeAmount(format!("fee amount overflow: {self} x {value}"))
        })
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / DEC_ONE;
        let fraction = self.0 % DEC_ONE;
        if fraction == 0 {
            return write!(f, "{whole}");
        }

        let digits = format!("{fraction:0width$}", width = DEC_PRECISION);
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

impl FromStr for Dec {
    type Err = AnteError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid =
            |reason: &str| AnteError::InvalidFeeAmount(format!("invalid decimal {s:?}: {reason}"));

        let (whole, fraction) = match s.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (s, ""),
        };

        if whole.is_empty() {
            return Err(invalid("missing integer part"));
        }
        if s.contains('.') && fraction.is_empty() {
            return Err(invalid("missing fractional part"));
        }
        let digits_only = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !digits_only(whole) || !digits_only(fraction) {
            return Err(invalid("expected digits"));
        }
        if fraction.len() > DEC_PRECISION {
            return Err(invalid("too much precision"));
        }

        let whole: u128 = whole.parse().map_err(|_| invalid("integer part overflow"))?;
        let padded = format!("{fraction:0<width$}", width = DEC_PRECISION);
        let fraction: u128 = padded.parse().map_err(|_| invalid("bad fractional part"))?;

        whole
            .checked_mul(DEC_ONE)
            .and_then(|atomics| atomics.checked_add(fraction))
            .map(Dec)
            .ok_or_else(|| invalid("value out of range"))
    }
}

impl Serialize for Dec {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Dec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
