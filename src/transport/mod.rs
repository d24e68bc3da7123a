//! WebSocket transport layer.
//!
//! This module handles communication between local end (Rust) and the
//! remote BiDi server over a persistent WebSocket.
//!
//! # Connection Lifecycle
//!
//! 1. [`Connection::open`] - Dial `ws://<host>:<port>/session`
//! 2. [`Connection::send`] / [`Connection::receive`] - One command, one reply
//! 3. [`Connection::close`] - Close handshake, idempotent
//!
//! A closed connection is never reused; each logical operation opens a
//! fresh one.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `connection` | WebSocket connection |
//! | `endpoint` | Remote server address |

// ============================================================================
// Submodules
// ============================================================================

/// WebSocket connection.
pub mod connection;

/// Remote server address.
pub mod endpoint;

// ============================================================================
// Re-exports
// ============================================================================

pub use connection::Connection;
pub use endpoint::Endpoint;
