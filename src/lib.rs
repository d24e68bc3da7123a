//! WebDriver BiDi client - browser automation over a JSON WebSocket protocol.
//!
//! This library speaks the bidirectional WebDriver BiDi wire protocol to a
//! running browser, letting callers issue semantic operations (navigate,
//! evaluate script, query DOM state) against remote browsing contexts
//! without handling wire framing, response correlation, or session
//! bookkeeping themselves.
//!
//! # Architecture
//!
//! The core is the protocol execution layer, a strict stack:
//!
//! - [`transport`] - One WebSocket connection per logical operation
//! - [`protocol`] - Command/envelope codec
//! - [`Session`] - Negotiated `session.new` .. `session.end` scope
//! - [`execute`] - The single entry point running the full lifecycle
//!
//! [`Browser`] and [`Tab`] are a thin veneer that builds parameter
//! payloads and calls [`execute`] exactly once per logical action.
//!
//! Each `execute` call opens a fresh connection and session and tears both
//! down before returning. Concurrent callers are correct by isolation, not
//! synchronization; callers that want to amortize the negotiation cost can
//! hold a [`Session`] open over their own [`Connection`] instead.
//!
//! # Quick Start
//!
//! ```no_run
//! use webdriver_bidi::{Browser, Endpoint, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let browser = Browser::new(Endpoint::localhost(9222));
//!
//!     // Drive a fresh tab
//!     if let Some(mut tab) = browser.create_tab().await? {
//!         tab.navigate("https://example.com").await?;
//!         let title = tab.evaluate("document.title").await?;
//!         println!("title: {title:?}");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`browser`] | Domain veneer: [`Browser`], [`Tab`] |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`executor`] | Single-shot method execution |
//! | [`protocol`] | Wire message types |
//! | [`session`] | Session lifecycle |
//! | [`transport`] | WebSocket transport layer |
//!
//! # Error Model
//!
//! Only connection faults and session lifecycle failures surface as
//! [`Error`]; a protocol-level error envelope is logged and reported as an
//! absent result, so ordinary negative outcomes ("element not found",
//! "navigation failed") are presence checks, not error handling.

// ============================================================================
// Modules
// ============================================================================

/// Domain veneer: Browser and Tab handles.
pub mod browser;

/// Error types and result aliases.
pub mod error;

/// Single-shot method execution.
pub mod executor;

/// Wire protocol message types.
pub mod protocol;

/// Session lifecycle and method invocation.
pub mod session;

/// WebSocket transport layer.
pub mod transport;

#[cfg(test)]
pub(crate) mod test_server;

// ============================================================================
// Re-exports
// ============================================================================

// Domain types
pub use browser::{Browser, Tab};

// Core types
pub use executor::execute;
pub use session::Session;
pub use transport::{Connection, Endpoint};

// Protocol types
pub use protocol::{Command, Envelope};

// Error types
pub use error::{Error, Result};
