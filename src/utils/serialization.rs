// Bincode helpers shared by the registry store and the message codec
use crate::error::{AnteError, Result};
use serde::{Deserialize, Serialize};

/// Upper bound on bytes a single decode may consume
pub const MAX_DECODE_BYTES: usize = 1024 * 1024;

/// Serialize data using bincode 2.0 with standard configuration
pub fn serialize<T: Serialize + bincode::Encode>(data: &T) -> Result<Vec<u8>> {
    let config = bincode::config::standard();
    bincode::encode_to_vec(data, config)
        .map_err(|e| AnteError::Serialization(format!("Serialization failed: {e}")))
}

/// Deserialize data using bincode 2.0 with a byte limit, so hostile length
/// prefixes fail instead of allocating
pub fn deserialize<T>(bytes: &[u8]) -> Result<T>
where
    T: for<'de> Deserialize<'de> + bincode::Decode<()>,
{
    let config = bincode::config::standard().with_limit::<MAX_DECODE_BYTES>();
    let (data, _) = bincode::decode_from_slice(bytes, config)
        .map_err(|e| AnteError::Serialization(format!("Deserialization failed: {e}")))?;
    Ok(data)
}

/// Serde helper rendering byte payloads as base64 strings in JSON
pub mod base64_bytes {
    use data_encoding::BASE64;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        BASE64
            .decode(raw.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
