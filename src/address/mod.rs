//! Account and contract addresses
//!
//! Contract addresses arrive as bech32 strings inside messages; the registry
//! keys flat fees by the raw address bytes.

pub mod bech32;

use crate::error::{AnteError, Result};
use std::fmt;

/// Longest address payload accepted, matching the SDK's address verifier
pub const MAX_ADDR_LEN: usize = 255;

/// Raw account or contract address bytes
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccAddress(Vec<u8>);

impl AccAddress {
    pub fn new(bytes: Vec<u8>) -> Result<AccAddress> {
        verify_address_format(&bytes)?;
        Ok(AccAddress(bytes))
    }

    /// Parse a bech32 address whose human-readable part must be `prefix`
    pub fn from_bech32_with_prefix(address: &str, prefix: &str) -> Result<AccAddress> {
        if address.trim().is_empty() {
            return Err(AnteError::InvalidAddress(
                "empty address string is not allowed".to_string(),
            ));
        }

        let (hrp, bytes) = bech32::decode(address)
            .map_err(|e| AnteError::InvalidAddress(format!("decoding bech32 failed: {e}")))?;
        if hrp != prefix {
            return Err(AnteError::InvalidAddress(format!(
                "invalid Bech32 prefix; expected {prefix}, got {hrp}"
            )));
        }
        AccAddress::new(bytes)
    }

    pub fn to_bech32(&self, prefix: &str) -> Result<String> {
        bech32::encode(prefix, &self.0)
            .map_err(|e| AnteError::InvalidAddress(format!("encoding bech32 failed: {e}")))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for AccAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", data_encoding::HEXUPPER.encode(&self.0))
    }
}

fn verify_address_format(bytes: &[u8]) -> Result<()> {
    if bytes.is_empty() {
        return Err(AnteError::InvalidAddress(
            "addresses cannot be empty".to_string(),
        ));
    }
    if bytes.len() > MAX_ADDR_LEN {
        return Err(AnteError::InvalidAddress(format!(
            "address max length is {MAX_ADDR_LEN}, got {}",
            bytes.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_contract_address() {
        let addr = AccAddress::new(vec![7u8; 32]).unwrap();
        let encoded = addr.to_bech32("archway").unwrap();

        let parsed = AccAddress::from_bech32_with_prefix(&encoded, "archway").unwrap();
        assert_eq!(parsed, addr);
        assert_eq!(parsed.as_bytes().len(), 32);
    }

    #[test]
    fn test_wrong_prefix_is_rejected() {
        let encoded = AccAddress::new(vec![1u8; 20])
            .unwrap()
            .to_bech32("cosmos")
            .unwrap();
        let err = AccAddress::from_bech32_with_prefix(&encoded, "archway").unwrap_err();
        assert!(matches!(err, AnteError::InvalidAddress(_)));
        assert!(err.to_string().contains("expected archway"));
    }

    #[test]
    fn test_garbage_is_rejected() {
        for bad in ["", "   ", "archway1", "not-an-address", "archway1qqqqqqqq"] {
            assert!(matches!(
                AccAddress::from_bech32_with_prefix(bad, "archway"),
                Err(AnteError::InvalidAddress(_))
            ));
        }
    }

    #[test]
    fn test_empty_payload_is_rejected() {
        let encoded = bech32::encode("archway", &[]).unwrap();
        assert!(AccAddress::from_bech32_with_prefix(&encoded, "archway").is_err());
        assert!(AccAddress::new(vec![0u8; MAX_ADDR_LEN + 1]).is_err());
    }
}
