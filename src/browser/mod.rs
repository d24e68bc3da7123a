//! Browser entities module.
//!
//! The thin domain veneer over [`execute`](crate::execute):
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Browser`] | Browser handle (tab enumeration and creation) |
//! | [`Tab`] | Browsing context handle (navigation, scripting, DOM helpers) |
//!
//! # Example
//!
//! ```no_run
//! use webdriver_bidi::{Browser, Endpoint, Result};
//!
//! # async fn example() -> Result<()> {
//! let browser = Browser::new(Endpoint::localhost(9222));
//!
//! if let Some(mut tab) = browser.create_tab().await? {
//!     tab.navigate("https://example.com").await?;
//! }
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Browsing context automation.
pub mod tab;

// ============================================================================
// Re-exports
// ============================================================================

pub use tab::Tab;

// ============================================================================
// Imports
// ============================================================================

use serde_json::{Value, json};
use tracing::debug;

use crate::error::Result;
use crate::executor::execute;
use crate::transport::Endpoint;

// ============================================================================
// Browser
// ============================================================================

/// A handle to a running browser reachable at a BiDi endpoint.
///
/// Holds no connection; every operation runs through one self-contained
/// [`execute`](crate::execute) call.
#[derive(Debug, Clone)]
pub struct Browser {
    /// Endpoint of the BiDi server.
    endpoint: Endpoint,
}

impl Browser {
    /// Creates a browser handle for the endpoint.
    #[inline]
    #[must_use]
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    /// Returns the endpoint.
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Lists the currently open tabs.
    ///
    /// Queries the context tree one level deep. An unsuccessful query
    /// yields an empty list.
    ///
    /// # Errors
    ///
    /// Connection and session lifecycle errors from the underlying call.
    pub async fn tabs(&self) -> Result<Vec<Tab>> {
        let result = execute(
            &self.endpoint,
            "browsingContext.getTree",
            json!({"maxDepth": 1}),
        )
        .await?;

        let Some(result) = result else {
            return Ok(Vec::new());
        };

        let tabs: Vec<Tab> = result
            .get("contexts")
            .and_then(Value::as_array)
            .map(|contexts| {
                contexts
                    .iter()
                    .filter_map(|context| {
                        let id = context.get("context")?.as_str()?;
                        let url = context.get("url").and_then(Value::as_str).unwrap_or("");
                        Some(Tab::new(self.endpoint.clone(), id, url))
                    })
                    .collect()
            })
            .unwrap_or_default();

        debug!(count = tabs.len(), "Listed tabs");
        Ok(tabs)
    }

    /// Creates a new tab.
    ///
    /// Returns `None` if the remote end rejected the creation.
    ///
    /// # Errors
    ///
    /// Connection and session lifecycle errors from the underlying call.
    pub async fn create_tab(&self) -> Result<Option<Tab>> {
        let result = execute(&self.endpoint, "browsingContext.create", json!({"type": "tab"}))
            .await?;

        let tab = result
            .as_ref()
            .and_then(|v| v.get("context"))
            .and_then(Value::as_str)
            .map(|id| Tab::new(self.endpoint.clone(), id, ""));

        if let Some(ref tab) = tab {
            debug!(context = %tab.id(), "Tab created");
        }

        Ok(tab)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server;

    const NEW_OK: &str = r#"{"type":"success","result":{"sessionId":"s-1"}}"#;
    const END_OK: &str = r#"{"type":"success","result":{}}"#;

    #[tokio::test]
    async fn test_tabs() {
        let tree = r#"{"type":"success","result":{"contexts":[
            {"context":"ctx-1","url":"https://example.com"},
            {"context":"ctx-2","url":"about:blank"}
        ]}}"#;
        let port = test_server::spawn(vec![NEW_OK, tree, END_OK]).await;

        let browser = Browser::new(Endpoint::new("127.0.0.1", port));
        let tabs = browser.tabs().await.expect("tabs");

        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs[0].id(), "ctx-1");
        assert_eq!(tabs[0].url(), "https://example.com");
        assert_eq!(tabs[1].id(), "ctx-2");
    }

    #[tokio::test]
    async fn test_tabs_on_failure_is_empty() {
        let reply = r#"{"type":"error","error":"unknown command","message":"nope"}"#;
        let port = test_server::spawn(vec![NEW_OK, reply, END_OK]).await;

        let browser = Browser::new(Endpoint::new("127.0.0.1", port));
        let tabs = browser.tabs().await.expect("tabs");

        assert!(tabs.is_empty());
    }

    #[tokio::test]
    async fn test_create_tab() {
        let created = r#"{"type":"success","result":{"context":"ctx-1"}}"#;
        let port = test_server::spawn(vec![NEW_OK, created, END_OK]).await;

        let browser = Browser::new(Endpoint::new("127.0.0.1", port));
        let tab = browser.create_tab().await.expect("create_tab");

        let tab = tab.expect("tab should be created");
        assert_eq!(tab.id(), "ctx-1");
        assert_eq!(tab.url(), "");
    }

    #[tokio::test]
    async fn test_create_tab_rejected() {
        let reply = r#"{"type":"error","error":"invalid argument","message":"no"}"#;
        let port = test_server::spawn(vec![NEW_OK, reply, END_OK]).await;

        let browser = Browser::new(Endpoint::new("127.0.0.1", port));
        let tab = browser.create_tab().await.expect("create_tab");

        assert!(tab.is_none());
    }
}
