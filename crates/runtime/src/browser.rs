//! Headless browser handle and its capability seam
//!
//! `BrowserControl` is the minimal interface the capture layer needs from a
//! browser-automation backend; `HeadlessBrowser` is the chromedriver-backed
//! implementation that owns the driver process and its WebDriver session.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use vizshot_protocol::Viewport;

use crate::client::WebDriverClient;
use crate::error::{Error, Result};
use crate::server::DriverServer;

/// Minimal browser capabilities the capture controller relies on.
///
/// Any headless-automation backend that can navigate, wait for an element,
/// run a script, and take a screenshot can stand in for the real browser —
/// tests substitute a recording implementation through this trait.
#[async_trait]
pub trait BrowserControl: Send {
    /// Navigate to an absolute URL, returning once the load settles.
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// The URL the browser is currently at.
    async fn current_url(&mut self) -> Result<String>;

    /// Poll until an element matching the CSS selector appears, bounded by
    /// `timeout`.
    async fn wait_for_element(&mut self, selector: &str, timeout: Duration) -> Result<()>;

    /// Run a synchronous script against the live page.
    async fn execute(&mut self, script: &str) -> Result<serde_json::Value>;

    /// Capture the current frame as PNG bytes.
    async fn screenshot(&mut self) -> Result<Vec<u8>>;

    /// Gracefully end the session and terminate the browser process.
    ///
    /// Must be idempotent: a second call is a no-op.
    async fn shutdown(&mut self) -> Result<()>;

    /// Force-terminate the underlying process without waiting.
    ///
    /// For teardown paths that cannot await (Drop, failed construction).
    /// Must be safe to call after `shutdown`.
    fn force_terminate(&mut self);
}

/// A chromedriver process plus the WebDriver session it serves.
///
/// Exclusive ownership: only the holder of this value may issue commands to
/// the browser, and disposal terminates the process.
#[derive(Debug)]
pub struct HeadlessBrowser {
    server: Option<DriverServer>,
    client: WebDriverClient,
}

impl HeadlessBrowser {
    /// Launch chromedriver and open a headless session with a fixed window
    /// size.
    ///
    /// On any failure after the process spawns, the process is killed before
    /// the error is returned — a failed launch leaves nothing running.
    pub async fn launch(viewport: Viewport, extra_args: &[String]) -> Result<Self> {
        let server = DriverServer::launch().await?;

        match WebDriverClient::new_session(server.base_url(), viewport, extra_args).await {
            Ok(client) => {
                debug!(target = "vizshot", port = server.port(), "headless browser up");
                Ok(Self {
                    server: Some(server),
                    client,
                })
            }
            Err(e) => {
                let mut server = server;
                server.start_kill();
                Err(e)
            }
        }
    }

    fn ensure_open(&self, operation: &str) -> Result<()> {
        if self.server.is_none() {
            return Err(Error::TargetClosed {
                operation: operation.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl BrowserControl for HeadlessBrowser {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.ensure_open("navigate")?;
        self.client.navigate(url).await
    }

    async fn current_url(&mut self) -> Result<String> {
        self.ensure_open("read current url")?;
        self.client.current_url().await
    }

    async fn wait_for_element(&mut self, selector: &str, timeout: Duration) -> Result<()> {
        self.ensure_open("wait for element")?;
        self.client.wait_for_element(selector, timeout).await
    }

    async fn execute(&mut self, script: &str) -> Result<serde_json::Value> {
        self.ensure_open("execute script")?;
        self.client.execute(script).await
    }

    async fn screenshot(&mut self) -> Result<Vec<u8>> {
        self.ensure_open("take screenshot")?;
        self.client.screenshot().await
    }

    async fn shutdown(&mut self) -> Result<()> {
        let Some(server) = self.server.take() else {
            return Ok(());
        };

        // Best-effort session delete; the process kill below is what
        // actually releases the resources.
        if let Err(e) = self.client.quit().await {
            warn!(target = "vizshot", error = %e, "webdriver session delete failed");
        }

        server.shutdown().await
    }

    fn force_terminate(&mut self) {
        if let Some(mut server) = self.server.take() {
            server.start_kill();
        }
    }
}

impl Drop for HeadlessBrowser {
    /// Backstop: if the handle is dropped without `shutdown`, kill the
    /// driver process rather than leaking it.
    fn drop(&mut self) {
        self.force_terminate();
    }
}
