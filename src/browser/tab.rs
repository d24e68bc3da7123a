//! Browsing context automation.
//!
//! A [`Tab`] wraps one browsing context id and drives it through
//! [`execute`](crate::execute), one self-contained call per operation.
//! Element helpers are built on `script.evaluate` with JS snippets
//! constructed from a caller-supplied element query (for example
//! `document.querySelector('#submit')`).

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde_json::{Value, json};
use tracing::debug;

use crate::error::Result;
use crate::executor::execute;
use crate::transport::Endpoint;

// ============================================================================
// Tab
// ============================================================================

/// A handle to one browsing context.
///
/// Tracks the context id and its last known URL. The `Err`/`Ok` split of
/// every method follows the crate-wide convention: `Err` is a transport or
/// lifecycle fault, while `false`/`None` means the remote end reported the
/// operation unsuccessful.
#[derive(Debug, Clone)]
pub struct Tab {
    /// Endpoint of the BiDi server.
    endpoint: Endpoint,
    /// Browsing context identifier.
    id: String,
    /// Last known URL, updated by navigation.
    url: String,
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tab(endpoint={}, id={}, url={})",
            self.endpoint, self.id, self.url
        )
    }
}

impl Tab {
    /// Creates a tab handle for an existing browsing context.
    #[inline]
    #[must_use]
    pub fn new(endpoint: Endpoint, id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            endpoint,
            id: id.into(),
            url: url.into(),
        }
    }

    /// Returns the browsing context id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the last known URL.
    #[inline]
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

// ============================================================================
// Tab - Navigation
// ============================================================================

impl Tab {
    /// Navigates the tab to a URL, waiting for the load to complete.
    ///
    /// On success the tracked URL is updated from the result (the remote
    /// end may have followed redirects).
    ///
    /// # Errors
    ///
    /// Connection and session lifecycle errors from the underlying call.
    pub async fn navigate(&mut self, url: &str) -> Result<bool> {
        let result = execute(
            &self.endpoint,
            "browsingContext.navigate",
            json!({"url": url, "context": self.id, "wait": "complete"}),
        )
        .await?;

        Ok(self.track_url(result))
    }

    /// Reloads the tab, waiting for the load to complete.
    ///
    /// # Errors
    ///
    /// Connection and session lifecycle errors from the underlying call.
    pub async fn reload(&mut self) -> Result<bool> {
        let result = execute(
            &self.endpoint,
            "browsingContext.reload",
            json!({"context": self.id, "wait": "complete"}),
        )
        .await?;

        Ok(self.track_url(result))
    }

    /// Closes the tab.
    ///
    /// # Errors
    ///
    /// Connection and session lifecycle errors from the underlying call.
    pub async fn close(&self) -> Result<bool> {
        let result = execute(
            &self.endpoint,
            "browsingContext.close",
            json!({"context": self.id}),
        )
        .await?;

        Ok(result.is_some())
    }

    /// Updates the tracked URL from a navigation result.
    fn track_url(&mut self, result: Option<Value>) -> bool {
        match result {
            Some(result) => {
                if let Some(url) = result.get("url").and_then(Value::as_str) {
                    self.url = url.to_string();
                    debug!(context = %self.id, url = %self.url, "Navigation completed");
                }
                true
            }
            None => false,
        }
    }
}

// ============================================================================
// Tab - Script Evaluation
// ============================================================================

impl Tab {
    /// Evaluates a JavaScript expression in the tab, awaiting promises.
    ///
    /// Returns the `result` sub-object of the success payload, a remote
    /// value with a `type` and optionally a `value` field. `None` means
    /// the evaluation did not succeed.
    ///
    /// # Errors
    ///
    /// Connection and session lifecycle errors from the underlying call.
    pub async fn evaluate(&self, script: &str) -> Result<Option<Value>> {
        debug!(context = %self.id, script_len = script.len(), "Evaluating script");

        let response = execute(
            &self.endpoint,
            "script.evaluate",
            json!({
                "expression": script,
                "target": {"context": self.id},
                "awaitPromise": true,
            }),
        )
        .await?;

        Ok(response
            .as_ref()
            .and_then(|v| v.get("result"))
            .filter(|v| !v.is_null())
            .cloned())
    }
}

// ============================================================================
// Tab - Element Helpers
// ============================================================================

impl Tab {
    /// Checks whether the queried element has an attribute.
    ///
    /// `None` means the evaluation failed or produced a null remote value.
    ///
    /// # Errors
    ///
    /// Connection and session lifecycle errors from the underlying call.
    pub async fn has_element_attribute(
        &self,
        query: &str,
        attribute: &str,
    ) -> Result<Option<bool>> {
        let script = format!("{query}.hasAttribute({})", js_string(attribute));
        Ok(remote_value(self.evaluate(&script).await?).and_then(|v| v.as_bool()))
    }

    /// Gets an attribute value from the queried element.
    ///
    /// # Errors
    ///
    /// Connection and session lifecycle errors from the underlying call.
    pub async fn get_element_attribute(
        &self,
        query: &str,
        attribute: &str,
    ) -> Result<Option<String>> {
        let script = format!("{query}.{attribute}");
        Ok(remote_value(self.evaluate(&script).await?)
            .and_then(|v| v.as_str().map(str::to_string)))
    }

    /// Sets an attribute on the queried element and dispatches `input`
    /// and `change` events so framework listeners observe the update.
    ///
    /// # Errors
    ///
    /// Connection and session lifecycle errors from the underlying call.
    pub async fn set_element_attribute(
        &self,
        query: &str,
        attribute: &str,
        value: &str,
    ) -> Result<bool> {
        let script = [
            format!("var element = {query}"),
            format!("element.{attribute} = {}", js_string(value)),
            "element.dispatchEvent(new Event('input'))".to_string(),
            "element.dispatchEvent(new Event('change'))".to_string(),
        ]
        .join(";");

        Ok(self.evaluate(&script).await?.is_some())
    }

    /// Removes an attribute from the queried element.
    ///
    /// # Errors
    ///
    /// Connection and session lifecycle errors from the underlying call.
    pub async fn remove_element_attribute(&self, query: &str, attribute: &str) -> Result<bool> {
        let script = format!("{query}.removeAttribute({})", js_string(attribute));
        Ok(self.evaluate(&script).await?.is_some())
    }

    /// Checks whether the query resolves to an element.
    ///
    /// # Errors
    ///
    /// Connection and session lifecycle errors from the underlying call.
    pub async fn is_element_found(&self, query: &str) -> Result<Option<bool>> {
        Ok(self
            .evaluate(query)
            .await?
            .map(|result| remote_type(&result) != Some("null".to_string())))
    }

    /// Checks whether the queried element is fully inside the viewport.
    ///
    /// # Errors
    ///
    /// Connection and session lifecycle errors from the underlying call.
    pub async fn is_element_displayed(&self, query: &str) -> Result<Option<bool>> {
        let check = [
            "rect.top >= 0",
            "rect.left >= 0",
            "rect.bottom <= (window.innerHeight || document.documentElement.clientHeight)",
            "rect.right <= (window.innerWidth || document.documentElement.clientWidth)",
        ]
        .join(" && ");
        let script = [
            format!("var element = {query}"),
            "var rect = element.getBoundingClientRect()".to_string(),
            check,
        ]
        .join(";");

        Ok(self
            .evaluate(&script)
            .await?
            .and_then(|result| result.get("value").and_then(Value::as_bool)))
    }

    /// Checks whether the queried element is disabled.
    ///
    /// # Errors
    ///
    /// Connection and session lifecycle errors from the underlying call.
    pub async fn is_element_disabled(&self, query: &str) -> Result<Option<bool>> {
        self.has_element_attribute(query, "disabled").await
    }

    /// Checks whether two queries resolve to the same element.
    ///
    /// # Errors
    ///
    /// Connection and session lifecycle errors from the underlying call.
    pub async fn is_element_equal(&self, query1: &str, query2: &str) -> Result<Option<bool>> {
        let script = format!("{query1} === {query2}");
        Ok(self
            .evaluate(&script)
            .await?
            .and_then(|result| result.get("value").and_then(Value::as_bool)))
    }

    /// Focuses the queried element.
    ///
    /// # Errors
    ///
    /// Connection and session lifecycle errors from the underlying call.
    pub async fn focus_element(&self, query: &str) -> Result<bool> {
        Ok(self.evaluate(&format!("{query}.focus()")).await?.is_some())
    }

    /// Clicks the queried element.
    ///
    /// # Errors
    ///
    /// Connection and session lifecycle errors from the underlying call.
    pub async fn click_element(&self, query: &str) -> Result<bool> {
        Ok(self.evaluate(&format!("{query}.click()")).await?.is_some())
    }

    /// Scrolls the queried element into the center of the viewport.
    ///
    /// # Errors
    ///
    /// Connection and session lifecycle errors from the underlying call.
    pub async fn scroll_element(&self, query: &str) -> Result<bool> {
        let script =
            format!(r#"{query}.scrollIntoView({{"block": "center", "inline": "nearest"}})"#);
        Ok(self.evaluate(&script).await?.is_some())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Escapes a string for safe use in JavaScript.
fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\""))
}

/// Extracts the `value` of a non-null remote value.
fn remote_value(result: Option<Value>) -> Option<Value> {
    let result = result?;
    if remote_type(&result)? == "null" {
        return None;
    }
    result.get("value").cloned()
}

/// Extracts the `type` tag of a remote value.
fn remote_type(result: &Value) -> Option<String> {
    result
        .get("type")
        .and_then(Value::as_str)
        .map(str::to_string)
}

// ============================================================================
// Tests
// ============================================================================
