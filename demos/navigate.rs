//! Navigation demonstration against a running BiDi server.
//!
//! Demonstrates:
//! - Listing open tabs
//! - Creating a tab and navigating it
//! - Evaluating a script in the page
//!
//! Usage:
//!   cargo run --example navigate -- [port]
//!
//! The port defaults to 9222. Start a browser with its BiDi server
//! enabled first, e.g. `firefox --remote-debugging-port 9222`.

// ============================================================================
// Imports
// ============================================================================

use tracing_subscriber::EnvFilter;

use webdriver_bidi::{Browser, Endpoint, Result};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let port = std::env::args()
        .nth(1)
        .and_then(|p| p.parse().ok())
        .unwrap_or(9222);

    if let Err(e) = run(port).await {
        eprintln!("\n[ERROR] {e}");
        std::process::exit(1);
    }
}

async fn run(port: u16) -> Result<()> {
    let browser = Browser::new(Endpoint::localhost(port));

    println!("=== Open tabs ===");
    for tab in browser.tabs().await? {
        println!("  {tab}");
    }

    let Some(mut tab) = browser.create_tab().await? else {
        eprintln!("Tab creation was rejected");
        return Ok(());
    };
    println!("\nCreated {tab}");

    if tab.navigate("https://example.com").await? {
        println!("Navigated to {}", tab.url());
    }

    if let Some(title) = tab.evaluate("document.title").await? {
        println!("document.title -> {title}");
    }

    tab.close().await?;
    Ok(())
}
