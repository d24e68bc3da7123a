//! Single-shot method execution.
//!
//! [`execute`] is the one entry point the domain layer uses: it runs the
//! full lifecycle (connect, negotiate session, invoke, terminate session,
//! disconnect) exactly once per call. Each call is self-contained, so
//! concurrent callers share no mutable state and need no locking; the
//! price is per-call connection and session setup.

// ============================================================================
// Imports
// ============================================================================

use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::session::Session;
use crate::transport::{Connection, Endpoint};

// ============================================================================
// Execute
// ============================================================================

/// Executes one protocol method against the endpoint.
///
/// Opens a fresh connection and session, invokes the method once, then
/// tears both down. The connection is closed on every exit path,
/// including invoke and teardown failures.
///
/// Returns `Some(result)` for a success envelope, `None` when the method
/// did not succeed (protocol error or undecodable reply, both logged).
///
/// # Errors
///
/// - [`Error::Connection`](crate::Error::Connection) if the endpoint is
///   unreachable
/// - [`Error::Session`](crate::Error::Session) if session creation or
///   termination is not acknowledged
/// - Connection errors if the peer drops mid-exchange
pub async fn execute(endpoint: &Endpoint, method: &str, params: Value) -> Result<Option<Value>> {
    debug!(%endpoint, method, "Executing method");

    let mut connection = Connection::open(endpoint).await?;
    let result = run_in_session(&mut connection, method, params).await;
    connection.close().await;

    result
}

/// Runs one invocation inside a freshly negotiated session.
async fn run_in_session(
    connection: &mut Connection,
    method: &str,
    params: Value,
) -> Result<Option<Value>> {
    let mut session = Session::open(connection).await?;

    match session.invoke(method, params).await {
        Ok(value) => {
            session.close().await?;
            Ok(value)
        }
        Err(err) => {
            // The invoke fault takes precedence; teardown is best-effort
            // on a connection that may already be gone.
            let _ = session.close().await;
            Err(err)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
