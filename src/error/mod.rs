//! Error handling for the fee admission check
//!
//! Every rejection the checker can produce has its own variant so callers can
//! translate it into a transaction failure without parsing strings.

use crate::core::Coins;
use std::fmt;

/// Result type alias for admission operations
pub type Result<T> = std::result::Result<T, AnteError>;

/// ABCI codes used by the Cosmos SDK root codespace
pub const CODE_INTERNAL: u32 = 1;
pub const CODE_TX_DECODE: u32 = 2;
pub const CODE_UNAUTHORIZED: u32 = 4;
pub const CODE_INVALID_ADDRESS: u32 = 7;
pub const CODE_INVALID_COINS: u32 = 10;
pub const CODE_INSUFFICIENT_FEE: u32 = 13;
pub const CODE_INVALID_REQUEST: u32 = 18;

/// Error types for the minimum fee check and its collaborators
#[derive(Debug, Clone)]
pub enum AnteError {
    /// Transaction does not carry fee fields
    MalformedTransaction(String),
    /// Gas limit is zero while a minimum price is active
    InvalidGasLimit(String),
    /// Contract address could not be parsed
    InvalidAddress(String),
    /// Delegated sub-message could not be decoded
    UnauthorizedPayload(String),
    /// Fee amounts or denominations are not valid
    InvalidFeeAmount(String),
    /// Declared fee does not cover the required minimum
    InsufficientFee { fee: Coins, required: Coins },
    /// Registry storage errors
    Database(String),
    /// Serialization/deserialization errors
    Serialization(String),
    /// Configuration errors
    Config(String),
    /// File I/O errors
    Io(String),
}

impl AnteError {
    /// ABCI code the transaction-processing chain reports for this rejection
    pub fn code(&self) -> u32 {
        match self {
            AnteError::MalformedTransaction(_) => CODE_TX_DECODE,
            AnteError::InvalidGasLimit(_) => CODE_INVALID_REQUEST,
            AnteError::InvalidAddress(_) => CODE_INVALID_ADDRESS,
            AnteError::UnauthorizedPayload(_) => CODE_UNAUTHORIZED,
            AnteError::InvalidFeeAmount(_) => CODE_INVALID_COINS,
            AnteError::InsufficientFee { .. } => CODE_INSUFFICIENT_FEE,
            AnteError::Database(_)
            | AnteError::Serialization(_)
            | AnteError::Config(_)
            | AnteError::Io(_) => CODE_INTERNAL,
        }
    }

    /// True for errors caused by the transaction itself rather than by the node
    pub fn is_rejection(&self) -> bool {
        self.code() != CODE_INTERNAL
    }
}

impl fmt::Display for AnteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnteError::MalformedTransaction(msg) => write!(f, "tx parse error: {msg}"),
            AnteError::InvalidGasLimit(msg) => write!(f, "invalid request: {msg}"),
            AnteError::InvalidAddress(msg) => write!(f, "invalid address: {msg}"),
            AnteError::UnauthorizedPayload(msg) => write!(f, "unauthorized: {msg}"),
            AnteError::InvalidFeeAmount(msg) => write!(f, "invalid coins: {msg}"),
            AnteError::InsufficientFee { fee, required } => {
                write!(
                    f,
                    "insufficient fee: tx fee {fee} is less than min fee: {required}"
                )
            }
            AnteError::Database(msg) => write!(f, "Database error: {msg}"),
            AnteError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            AnteError::Config(msg) => write!(f, "Configuration error: {msg}"),
            AnteError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for AnteError {}

impl From<std::io::Error> for AnteError {
    fn from(err: std::io::Error) -> Self {
        AnteError::Io(err.to_string())
    }
}

impl From<sled::Error> for AnteError {
    fn from(err: sled::Error) -> Self {
        AnteError::Database(err.to_string())
    }
}

impl From<bincode::error::EncodeError> for AnteError {
    fn from(err: bincode::error::EncodeError) -> Self {
        AnteError::Serialization(err.to_string())
    }
}

impl From<bincode::error::DecodeError> for AnteError {
    fn from(err: bincode::error::DecodeError) -> Self {
        AnteError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for AnteError {
    fn from(err: serde_json::Error) -> Self {
        AnteError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for AnteError {
    fn from(err: toml::de::Error) -> Self {
        AnteError::Config(err.to_string())
    }
}
