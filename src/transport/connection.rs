//! WebSocket connection to the BiDi server.
//!
//! One [`Connection`] owns one client-side WebSocket stream. The exchange
//! discipline is strictly sequential: every command sent receives exactly
//! one envelope before the connection is reused or closed, so no
//! correlation table is needed.

// ============================================================================
// Imports
// ============================================================================

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::debug;

use crate::error::{Error, Result};
use crate::transport::Endpoint;

// ============================================================================
// Connection
// ============================================================================

/// A WebSocket connection to a BiDi server.
///
/// Opened against an [`Endpoint`], used for one command/envelope exchange
/// at a time, and closed deterministically when the caller's scope ends.
/// Once closed it must not be reused; a new logical operation always opens
/// a fresh connection.
pub struct Connection {
    /// Underlying WebSocket stream.
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
    /// Set once the connection has been closed, by us or by the peer.
    closed: bool,
}

impl Connection {
    /// Dials the endpoint's BiDi session URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] if the endpoint is unreachable or
    /// refuses the WebSocket handshake.
    pub async fn open(endpoint: &Endpoint) -> Result<Self> {
        let url = endpoint.session_url();
        let (ws, _) = connect_async(url.as_str())
            .await
            .map_err(|e| Error::connection(e.to_string()))?;

        debug!(%endpoint, "Connection established");

        Ok(Self { ws, closed: false })
    }

    /// Sends one text frame.
    ///
    /// # Errors
    ///
    /// - [`Error::ConnectionClosed`] if the connection was already closed
    /// - [`Error::WebSocket`] if the write fails
    pub async fn send(&mut self, text: String) -> Result<()> {
        if self.closed {
            return Err(Error::ConnectionClosed);
        }

        self.ws.send(Message::Text(text.into())).await?;
        Ok(())
    }

    /// Receives the next text frame, skipping control frames.
    ///
    /// Blocks until a full message arrives or the peer drops the
    /// connection.
    ///
    /// # Errors
    ///
    /// - [`Error::ConnectionClosed`] if the peer closed the connection
    /// - [`Error::WebSocket`] if the read fails
    pub async fn receive(&mut self) -> Result<String> {
        if self.closed {
            return Err(Error::ConnectionClosed);
        }

        loop {
            match self.ws.next().await {
                Some(Ok(Message::Text(text))) => return Ok(text.to_string()),

                Some(Ok(Message::Close(_))) | None => {
                    debug!("WebSocket closed by remote");
                    self.closed = true;
                    return Err(Error::ConnectionClosed);
                }

                Some(Err(e)) => {
                    self.closed = true;
                    return Err(e.into());
                }

                // Ignore Binary, Ping, Pong
                Some(Ok(_)) => {}
            }
        }
    }

    /// Closes the connection.
    ///
    /// Idempotent: closing an already-closed connection is a no-op. A
    /// failed close handshake is logged and swallowed; the socket is
    /// released either way when the stream drops.
    pub async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        if let Err(e) = self.ws.close(None).await {
            debug!(error = %e, "Close handshake failed");
        } else {
            debug!("Connection closed");
        }
    }

    /// Returns `true` if the connection has been closed.
    #[inline]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

// ============================================================================
// Tests
// ============================================================================
