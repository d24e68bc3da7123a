//! Remote server address.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

// ============================================================================
// Endpoint
// ============================================================================

/// Address of a BiDi server.
///
/// Immutable; supplied by the caller of [`execute`](crate::execute) and
/// carried by [`Browser`](crate::Browser) and [`Tab`](crate::Tab) handles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    /// Host name or IP address.
    host: String,
    /// TCP port the server listens on.
    port: u16,
}

impl Endpoint {
    /// Creates an endpoint from host and port.
    #[inline]
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Creates a localhost endpoint, the common case for a locally
    /// launched browser.
    #[inline]
    #[must_use]
    pub fn localhost(port: u16) -> Self {
        Self::new("localhost", port)
    }

    /// Returns the host.
    #[inline]
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[inline]
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the WebSocket URL of the BiDi session resource.
    #[inline]
    #[must_use]
    pub fn session_url(&self) -> String {
        format!("ws://{}:{}/session", self.host, self.port)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

// ============================================================================
// Tests
// ============================================================================
