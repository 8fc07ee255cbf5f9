//! Decoding of opaque messages wrapped by delegated execution

use crate::core::message::{AnyMsg, Message};
use crate::error::{AnteError, Result};
use crate::utils::{deserialize, MAX_DECODE_BYTES};

/// Default cap on a single wrapped message
pub const DEFAULT_MAX_MESSAGE_BYTES: usize = 64 * 1024;

/// Turns an opaque wrapped message into a concrete one
///
/// Implementations must return an error, never panic, on malformed input.
pub trait MessageInspector {
    fn decode(&self, any: &AnyMsg) -> Result<Message>;
}

impl<T: MessageInspector + ?Sized> MessageInspector for &T {
    fn decode(&self, any: &AnyMsg) -> Result<Message> {
        (**self).decode(any)
    }
}

/// Inspector for envelopes produced by `Message::to_any`
#[derive(Debug, Clone)]
pub struct BincodeMessageCodec {
    max_message_bytes: usize,
}

impl BincodeMessageCodec {
    /// Limits above the bincode decode limit are clamped to it
    pub fn new(max_message_bytes: usize) -> BincodeMessageCodec {
        BincodeMessageCodec {
            max_message_bytes: max_message_bytes.min(MAX_DECODE_BYTES),
        }
    }

    pub fn max_message_bytes(&self) -> usize {
        self.max_message_bytes
    }
}

impl Default for BincodeMessageCodec {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MESSAGE_BYTES)
    }
}

impl MessageInspector for BincodeMessageCodec {
    fn decode(&self, any: &AnyMsg) -> Result<Message> {
        if any.value.len() > self.max_message_bytes {
            return Err(AnteError::Serialization(format!(
                "message of {} bytes exceeds limit of {}",
                any.value.len(),
                self.max_message_bytes
            )));
        }

        let message: Message = deserialize(&any.value)?;
        if message.type_url() != any.type_url {
            return Err(AnteError::Serialization(format!(
                "type url mismatch: envelope {}, payload {}",
                any.type_url,
                message.type_url()
            )));
        }
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::{EXEC_TYPE_URL, EXECUTE_CONTRACT_TYPE_URL};

    fn contract_msg() -> Message {
        Message::execute_contract("archway1sender", "archway1contract", b"{\"ping\":{}}")
    }

    #[test]
    fn test_decode_round_trip() {
        let codec = BincodeMessageCodec::default();
        let any = contract_msg().to_any().unwrap();
        assert_eq!(codec.decode(&any).unwrap(), contract_msg());
    }

    #[test]
    fn test_decode_garbage_fails() {
        let codec = BincodeMessageCodec::default();
        let any = AnyMsg {
            type_url: EXECUTE_CONTRACT_TYPE_URL.to_string(),
            value: vec![0xde, 0xad, 0xbe, 0xef],
        };
        assert!(codec.decode(&any).is_err());

        let empty = AnyMsg {
            type_url: EXECUTE_CONTRACT_TYPE_URL.to_string(),
            value: vec![],
        };
        assert!(codec.decode(&empty).is_err());
    }

    #[test]
    fn test_decode_type_url_mismatch_fails() {
        let codec = BincodeMessageCodec::default();
        let mut any = contract_msg().to_any().unwrap();
        any.type_url = EXEC_TYPE_URL.to_string();
        assert!(codec.decode(&any).is_err());
    }

    #[test]
    fn test_limit_never_exceeds_decode_limit() {
        assert_eq!(
            BincodeMessageCodec::default().max_message_bytes(),
            DEFAULT_MAX_MESSAGE_BYTES
        );
        assert_eq!(
            BincodeMessageCodec::new(usize::MAX).max_message_bytes(),
            MAX_DECODE_BYTES
        );
    }

    #[test]
    fn test_decode_oversized_payload_fails() {
        let codec = BincodeMessageCodec::new(8);
        let any = contract_msg().to_any().unwrap();
        assert!(any.value.len() > 8);
        assert!(codec.decode(&any).is_err());
    }
}
