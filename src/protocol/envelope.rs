//! Inbound response envelope.
//!
//! Every reply from the remote end is one JSON message discriminated by its
//! `type` field. Malformed JSON or an unknown discriminator is a decode
//! failure, distinct from a well-formed error envelope.

// ============================================================================
// Imports
// ============================================================================

use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;

// ============================================================================
// Envelope
// ============================================================================

/// A response envelope from the remote end.
///
/// # Format
///
/// Success:
/// ```json
/// {
///   "type": "success",
///   "result": { ... }
/// }
/// ```
///
/// Error:
/// ```json
/// {
///   "type": "error",
///   "error": "error code",
///   "message": "error message"
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Envelope {
    /// Successful response carrying the method result.
    Success {
        /// Result payload; shape depends on the method.
        #[serde(default)]
        result: Value,
    },

    /// Protocol-level error response.
    Error {
        /// Error kind reported by the remote end.
        error: String,
        /// Human-readable error message.
        message: String,
    },
}

impl Envelope {
    /// Parses an envelope from its wire representation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) on malformed JSON or an
    /// unknown `type` discriminator.
    pub fn decode(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Returns `true` if this is a success envelope.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Extracts the success payload, discarding error details.
    #[inline]
    #[must_use]
    pub fn into_result(self) -> Option<Value> {
        match self {
            Self::Success { result } => Some(result),
            Self::Error { .. } => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_success() {
        let envelope = Envelope::decode(r#"{"type":"success","result":{"sessionId":"s-1"}}"#)
            .expect("decode");

        assert!(envelope.is_success());
        assert_eq!(envelope.into_result(), Some(json!({"sessionId": "s-1"})));
    }

    #[test]
    fn test_decode_success_without_result() {
        let envelope = Envelope::decode(r#"{"type":"success"}"#).expect("decode");

        assert_eq!(envelope.into_result(), Some(Value::Null));
    }

    #[test]
    fn test_decode_error() {
        let envelope =
            Envelope::decode(r#"{"type":"error","error":"no such frame","message":"gone"}"#)
                .expect("decode");

        assert!(!envelope.is_success());
        match envelope {
            Envelope::Error { error, message } => {
                assert_eq!(error, "no such frame");
                assert_eq!(message, "gone");
            }
            Envelope::Success { .. } => panic!("expected error envelope"),
        }
    }

    #[test]
    fn test_decode_unknown_discriminator() {
        assert!(Envelope::decode(r#"{"type":"event","method":"log.entryAdded"}"#).is_err());
    }

    #[test]
    fn test_decode_malformed_json() {
        assert!(Envelope::decode("not json at all").is_err());
    }

    #[test]
    fn test_round_trip() {
        // Encoding a navigate command and decoding a matching success
        // envelope yields the result payload untouched.
        let command = crate::protocol::Command::new(
            "browsingContext.navigate",
            json!({"context": "abc", "url": "https://x"}),
        );
        let wire = command.encode().expect("serialize");
        assert!(wire.contains(r#""context":"abc""#));

        let envelope =
            Envelope::decode(r#"{"type":"success","result":{"url":"https://x"}}"#).expect("decode");
        assert_eq!(envelope.into_result(), Some(json!({"url": "https://x"})));
    }
}
