//! Outbound command envelope.
//!
//! Commands follow the `module.methodName` format of the BiDi protocol.
//! Parameters are carried as an opaque JSON mapping built by the domain
//! layer; the codec serializes them verbatim.

// ============================================================================
// Imports
// ============================================================================

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

// ============================================================================
// Constants
// ============================================================================

/// Fixed command identifier.
///
/// Only one command is ever in flight per connection, so the id never needs
/// to vary. If pipelining is added, ids must become connection-scoped
/// monotonic counters with a pending-request table keyed by id.
pub const COMMAND_ID: u64 = 1;

// ============================================================================
// Command
// ============================================================================

/// A command from local end to remote end.
///
/// # Format
///
/// ```json
/// {
///   "id": 1,
///   "method": "module.methodName",
///   "params": { ... }
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Command {
    /// Command identifier, echoed by the remote end.
    pub id: u64,

    /// Method name in `module.methodName` format.
    pub method: String,

    /// Method parameters, serialized verbatim.
    pub params: Value,
}

impl Command {
    /// Creates a new command with the fixed id.
    #[inline]
    #[must_use]
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self {
            id: COMMAND_ID,
            method: method.into(),
            params,
        }
    }

    /// Serializes the command to its wire representation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if the parameters are
    /// not serializable, a programming error rather than a runtime
    /// condition.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
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
    fn test_encode_sets_fixed_id() {
        let command = Command::new("session.new", json!({"capabilities": {}}));
        let wire = command.encode().expect("serialize");
        let value: Value = serde_json::from_str(&wire).expect("parse back");

        assert_eq!(value["id"], json!(1));
        assert_eq!(value["method"], json!("session.new"));
        assert_eq!(value["params"], json!({"capabilities": {}}));
    }

    #[test]
    fn test_encode_preserves_params() {
        let params = json!({"context": "abc", "url": "https://x"});
        let command = Command::new("browsingContext.navigate", params.clone());
        let wire = command.encode().expect("serialize");
        let value: Value = serde_json::from_str(&wire).expect("parse back");

        assert_eq!(value["params"], params);
    }

    #[test]
    fn test_encode_empty_params() {
        let command = Command::new("session.end", json!({}));
        let wire = command.encode().expect("serialize");

        assert!(wire.contains(r#""params":{}"#));
    }
}
