//! BiDi wire protocol message types.
//!
//! This module defines the command/envelope codec for the WebDriver BiDi
//! message exchange:
//!
//! | Module | Description |
//! |--------|-------------|
//! | `command` | Outbound command envelope |
//! | `envelope` | Inbound success/error envelope |
//!
//! # Wire Format
//!
//! Outbound:
//!
//! ```json
//! {"id": 1, "method": "browsingContext.navigate", "params": {"url": "..."}}
//! ```
//!
//! Inbound, discriminated by the `type` field:
//!
//! ```json
//! {"type": "success", "result": {...}}
//! {"type": "error", "error": "invalid argument", "message": "..."}
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Outbound command envelope.
pub mod command;

/// Inbound response envelope.
pub mod envelope;

// ============================================================================
// Re-exports
// ============================================================================

pub use command::{COMMAND_ID, Command};
pub use envelope::Envelope;
