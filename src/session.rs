//! BiDi session lifecycle and method invocation.
//!
//! A [`Session`] is the negotiated scope within which protocol methods are
//! valid, bounded by `session.new` and `session.end`. The lifecycle is
//! encoded in move semantics: [`Session::open`] is the only constructor
//! and [`Session::close`] consumes the session, so invoking a method after
//! termination is a compile error rather than a runtime check.
//!
//! Protocol-level failures never abort an invocation; they are logged and
//! reported as an absent result. Only transport faults and lifecycle
//! failures surface as errors.

// ============================================================================
// Imports
// ============================================================================

use serde_json::{Value, json};
use tracing::{debug, error, warn};

use crate::error::{Error, Result};
use crate::protocol::{Command, Envelope};
use crate::transport::Connection;

// ============================================================================
// Session
// ============================================================================

/// An open BiDi session over a borrowed connection.
///
/// The default path ([`execute`](crate::execute)) negotiates one session
/// per method call. Callers that want to amortize the negotiation cost can
/// hold a `Session` open across many [`invoke`](Session::invoke) calls:
///
/// ```no_run
/// use serde_json::json;
/// use webdriver_bidi::{Connection, Endpoint, Session, Result};
///
/// # async fn example() -> Result<()> {
/// let mut connection = Connection::open(&Endpoint::localhost(9222)).await?;
/// let mut session = Session::open(&mut connection).await?;
///
/// session.invoke("browsingContext.getTree", json!({"maxDepth": 1})).await?;
/// session.invoke("browsingContext.create", json!({"type": "tab"})).await?;
///
/// session.close().await?;
/// connection.close().await;
/// # Ok(())
/// # }
/// ```
pub struct Session<'c> {
    /// Connection the session runs over.
    connection: &'c mut Connection,
    /// Session identifier assigned by the remote end.
    id: String,
}

impl<'c> Session<'c> {
    /// Negotiates a new session on the connection.
    ///
    /// Sends `session.new` with empty capabilities and requires a success
    /// envelope carrying a `sessionId`.
    ///
    /// # Errors
    ///
    /// - [`Error::Session`] if the remote end does not acknowledge the
    ///   creation; fatal, callers must not proceed
    /// - Connection errors from the underlying send/receive
    pub async fn open(connection: &'c mut Connection) -> Result<Session<'c>> {
        let result = round_trip(connection, "session.new", json!({"capabilities": {}})).await?;

        let id = result
            .as_ref()
            .and_then(|v| v.get("sessionId"))
            .and_then(Value::as_str)
            .ok_or_else(|| Error::session("session.new was not acknowledged"))?
            .to_string();

        debug!(session_id = %id, "Session opened");

        Ok(Self { connection, id })
    }

    /// Returns the session identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Invokes a protocol method within the session.
    ///
    /// Returns `Some(result)` on a success envelope. A protocol error
    /// envelope or an undecodable reply is logged and reported as `None`;
    /// absence is the normal signal for "method did not succeed".
    ///
    /// # Errors
    ///
    /// Only transport faults: [`Error::ConnectionClosed`],
    /// [`Error::WebSocket`], or [`Error::Json`] if the parameters cannot
    /// be serialized.
    pub async fn invoke(&mut self, method: &str, params: Value) -> Result<Option<Value>> {
        round_trip(self.connection, method, params).await
    }

    /// Terminates the session.
    ///
    /// Sends `session.end` and requires a success envelope. Consumes the
    /// session; the connection remains usable for a fresh negotiation.
    ///
    /// # Errors
    ///
    /// - [`Error::Session`] if the remote end does not acknowledge the
    ///   termination; fatal
    /// - Connection errors from the underlying send/receive
    pub async fn close(self) -> Result<()> {
        match round_trip(self.connection, "session.end", json!({})).await? {
            Some(_) => {
                debug!(session_id = %self.id, "Session closed");
                Ok(())
            }
            None => Err(Error::session("session.end was not acknowledged")),
        }
    }
}

// ============================================================================
// Command Exchange
// ============================================================================

/// Runs one command/envelope exchange on the connection.
///
/// Encodes, sends, awaits exactly one envelope, decodes. Protocol errors
/// and undecodable replies become `None`; transport faults propagate.
async fn round_trip(
    connection: &mut Connection,
    method: &str,
    params: Value,
) -> Result<Option<Value>> {
    let wire = Command::new(method, params).encode()?;
    connection.send(wire).await?;

    let reply = connection.receive().await?;

    match Envelope::decode(&reply) {
        Ok(Envelope::Success { result }) => Ok(Some(result)),

        Ok(Envelope::Error { error, message }) => {
            error!(method, kind = %error, %message, "Command failed");
            Ok(None)
        }

        Err(e) => {
            warn!(method, error = %e, "Undecodable reply");
            Ok(None)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server;
    use crate::transport::Endpoint;

    const NEW_OK: &str = r#"{"type":"success","result":{"sessionId":"s-1"}}"#;
    const END_OK: &str = r#"{"type":"success","result":{}}"#;

    async fn connect(port: u16) -> Connection {
        Connection::open(&Endpoint::new("127.0.0.1", port))
            .await
            .expect("connect")
    }

    #[tokio::test]
    async fn test_open_then_close() {
        let port = test_server::spawn(vec![NEW_OK, END_OK]).await;
        let mut connection = connect(port).await;

        let session = Session::open(&mut connection).await.expect("open");
        assert_eq!(session.id(), "s-1");

        session.close().await.expect("close");

        connection.close().await;
        assert!(connection.is_closed());
    }

    #[tokio::test]
    async fn test_open_rejected() {
        let reply = r#"{"type":"error","error":"session not created","message":"busy"}"#;
        let port = test_server::spawn(vec![reply]).await;
        let mut connection = connect(port).await;

        let err = Session::open(&mut connection)
            .await
            .err()
            .expect("open should fail");
        assert!(err.is_session_error());

        connection.close().await;
    }

    #[tokio::test]
    async fn test_open_missing_session_id() {
        let port = test_server::spawn(vec![r#"{"type":"success","result":{}}"#]).await;
        let mut connection = connect(port).await;

        let err = Session::open(&mut connection)
            .await
            .err()
            .expect("open should fail");
        assert!(err.is_session_error());

        connection.close().await;
    }

    #[tokio::test]
    async fn test_invoke_success() {
        let reply = r#"{"type":"success","result":{"contexts":[]}}"#;
        let port = test_server::spawn(vec![NEW_OK, reply, END_OK]).await;
        let mut connection = connect(port).await;

        let mut session = Session::open(&mut connection).await.expect("open");
        let result = session
            .invoke("browsingContext.getTree", json!({"maxDepth": 1}))
            .await
            .expect("invoke");

        assert_eq!(result, Some(json!({"contexts": []})));

        session.close().await.expect("close");
        connection.close().await;
    }

    #[tokio::test]
    async fn test_invoke_protocol_error_is_absent() {
        let reply = r#"{"type":"error","error":"unknown command","message":"nope"}"#;
        let port = test_server::spawn(vec![NEW_OK, reply, END_OK]).await;
        let mut connection = connect(port).await;

        let mut session = Session::open(&mut connection).await.expect("open");
        let result = session
            .invoke("bogus.method", json!({}))
            .await
            .expect("invoke must not raise on a protocol error");

        assert_eq!(result, None);

        session.close().await.expect("close");
        connection.close().await;
    }

    #[tokio::test]
    async fn test_invoke_undecodable_reply_is_absent() {
        let port = test_server::spawn(vec![NEW_OK, "garbage", END_OK]).await;
        let mut connection = connect(port).await;

        let mut session = Session::open(&mut connection).await.expect("open");
        let result = session
            .invoke("session.status", json!({}))
            .await
            .expect("invoke must not raise on a decode failure");

        assert_eq!(result, None);

        session.close().await.expect("close");
        connection.close().await;
    }

    #[tokio::test]
    async fn test_close_rejected() {
        let reply = r#"{"type":"error","error":"invalid session id","message":"gone"}"#;
        let port = test_server::spawn(vec![NEW_OK, reply]).await;
        let mut connection = connect(port).await;

        let session = Session::open(&mut connection).await.expect("open");
        let err = session.close().await.err().expect("close should fail");
        assert!(err.is_session_error());

        connection.close().await;
    }

    #[tokio::test]
    async fn test_multiple_invokes_on_one_session() {
        let first = r#"{"type":"success","result":{"context":"ctx-1"}}"#;
        let second = r#"{"type":"success","result":{"context":"ctx-2"}}"#;
        let port = test_server::spawn(vec![NEW_OK, first, second, END_OK]).await;
        let mut connection = connect(port).await;

        let mut session = Session::open(&mut connection).await.expect("open");

        let a = session
            .invoke("browsingContext.create", json!({"type": "tab"}))
            .await
            .expect("first invoke");
        let b = session
            .invoke("browsingContext.create", json!({"type": "tab"}))
            .await
            .expect("second invoke");

        assert_eq!(a, Some(json!({"context": "ctx-1"})));
        assert_eq!(b, Some(json!({"context": "ctx-2"})));

        session.close().await.expect("close");
        connection.close().await;
    }
}
