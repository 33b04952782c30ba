//! W3C WebDriver session client
//!
//! A thin HTTP/JSON client for the handful of WebDriver endpoints the
//! capture controller needs: session creation, window sizing, navigation,
//! script execution, element lookup, and screenshots.

use std::time::Duration;

use base64::Engine as _;
use serde::de::DeserializeOwned;
use tracing::debug;

use vizshot_protocol::webdriver::{
    ElementLocator, ErrorValue, ExecuteRequest, NavigateRequest, NewSessionRequest,
    NewSessionValue, ValueEnvelope, WindowRect,
};
use vizshot_protocol::Viewport;

use crate::error::{Error, Result};

/// Delay between element-presence probes during a bounded wait.
const ELEMENT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// One WebDriver session against a running chromedriver.
///
/// All methods are plain request/response calls; the session holds no state
/// beyond its id and the driver's base URL.
#[derive(Debug)]
pub struct WebDriverClient {
    http: reqwest::Client,
    base: String,
    session_id: String,
}

impl WebDriverClient {
    /// Create a new headless browser session.
    ///
    /// Launches Chrome with `--headless=new` and `--no-sandbox`, a fixed
    /// window size matching `viewport`, and any extra arguments. The window
    /// rect is then set explicitly so the viewport is exact rather than
    /// best-effort.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConnectionFailed` if the driver rejects the session,
    /// or the underlying HTTP/WebDriver error.
    pub async fn new_session(
        base: impl Into<String>,
        viewport: Viewport,
        extra_args: &[String],
    ) -> Result<Self> {
        let base = base.into();
        let http = reqwest::Client::new();

        let request = NewSessionRequest::headless(viewport, extra_args);
        let response = http
            .post(format!("{base}/session"))
            .json(&request)
            .send()
            .await?;
        let created: NewSessionValue = unwrap_value(response).await?;

        debug!(
            target = "vizshot",
            session = %created.session_id,
            width = viewport.width,
            height = viewport.height,
            "webdriver session created"
        );

        let client = Self {
            http,
            base,
            session_id: created.session_id,
        };

        // The window size is fixed at construction and never mutated after.
        client.set_window_rect(viewport).await?;

        Ok(client)
    }

    /// The id of this WebDriver session.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    fn session_url(&self, endpoint: &str) -> String {
        format!("{}/session/{}/{}", self.base, self.session_id, endpoint)
    }

    async fn set_window_rect(&self, viewport: Viewport) -> Result<()> {
        let response = self
            .http
            .post(self.session_url("window/rect"))
            .json(&WindowRect::from(viewport))
            .send()
            .await?;
        let _: serde_json::Value = unwrap_value(response).await?;
        Ok(())
    }

    /// Navigate the session to `url`, returning once the page load settles.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        let response = self
            .http
            .post(self.session_url("url"))
            .json(&NavigateRequest {
                url: url.to_string(),
            })
            .send()
            .await?;

        unwrap_value::<serde_json::Value>(response)
            .await
            .map_err(|e| match e {
                Error::WebDriver { .. } => Error::NavigationFailed {
                    url: url.to_string(),
                },
                other => other,
            })?;
        Ok(())
    }

    /// The URL the session is currently at.
    pub async fn current_url(&self) -> Result<String> {
        let response = self.http.get(self.session_url("url")).send().await?;
        unwrap_value(response).await
    }

    /// Run a synchronous script against the live page.
    pub async fn execute(&self, script: &str) -> Result<serde_json::Value> {
        let response = self
            .http
            .post(self.session_url("execute/sync"))
            .json(&ExecuteRequest::script(script))
            .send()
            .await?;

        unwrap_value(response).await.map_err(|e| match e {
            Error::WebDriver { error, message } if error != "invalid session id" => {
                Error::ScriptFailed(format!("{error}: {message}"))
            }
            other => other,
        })
    }

    /// Whether an element matching the CSS selector is present in the page.
    pub async fn element_present(&self, selector: &str) -> Result<bool> {
        let response = self
            .http
            .post(self.session_url("element"))
            .json(&ElementLocator::css(selector))
            .send()
            .await?;

        match unwrap_value::<serde_json::Value>(response).await {
            Ok(_) => Ok(true),
            Err(Error::WebDriver { error, .. }) if error == "no such element" => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Poll until an element matching the CSS selector appears.
    ///
    /// # Errors
    ///
    /// Returns `Error::Timeout` naming the selector if the bound elapses
    /// without the element appearing.
    pub async fn wait_for_element(&self, selector: &str, timeout: Duration) -> Result<()> {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            if self.element_present(selector).await? {
                return Ok(());
            }

            if tokio::time::Instant::now() >= deadline {
                return Err(Error::Timeout {
                    ms: timeout.as_millis() as u64,
                    condition: format!("element '{selector}'"),
                });
            }

            tokio::time::sleep(ELEMENT_POLL_INTERVAL).await;
        }
    }

    /// Capture the current frame as PNG bytes.
    pub async fn screenshot(&self) -> Result<Vec<u8>> {
        let response = self.http.get(self.session_url("screenshot")).send().await?;
        let encoded: String = unwrap_value(response).await?;

        base64::prelude::BASE64_STANDARD
            .decode(encoded.trim_end())
            .map_err(|e| Error::ConnectionFailed(format!("Failed to decode screenshot: {}", e)))
    }

    /// End the session, closing the browser it controls.
    pub async fn quit(&self) -> Result<()> {
        let response = self
            .http
            .delete(format!("{}/session/{}", self.base, self.session_id))
            .send()
            .await?;
        let _: serde_json::Value = unwrap_value(response).await?;
        debug!(target = "vizshot", session = %self.session_id, "webdriver session deleted");
        Ok(())
    }
}

/// Unwrap a WebDriver response envelope, mapping non-2xx bodies onto
/// `Error::WebDriver`.
async fn unwrap_value<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        let envelope: ValueEnvelope<T> = response.json().await?;
        Ok(envelope.value)
    } else {
        let envelope: ValueEnvelope<ErrorValue> = response.json().await.map_err(|_| {
            Error::ConnectionFailed(format!("driver returned {status} with unreadable body"))
        })?;
        Err(Error::WebDriver {
            error: envelope.value.error,
            message: envelope.value.message,
        })
    }
}
