//! W3C WebDriver wire shapes.
//!
//! Request and response bodies for the WebDriver endpoints the capture
//! controller uses: session creation, window rect, navigation, script
//! execution, element lookup, screenshots, and the driver status probe.

use serde::{Deserialize, Serialize};

use crate::scene::Viewport;

/// Every WebDriver response wraps its payload in a `value` field.
#[derive(Debug, Clone, Deserialize)]
pub struct ValueEnvelope<T> {
    /// The wrapped payload
    pub value: T,
}

/// Error body returned by the remote end on a non-2xx response.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorValue {
    /// W3C error code (e.g. "no such element", "invalid session id")
    pub error: String,
    /// Human-readable message from the remote end
    pub message: String,
    /// Remote stack trace, often empty
    #[serde(default)]
    pub stacktrace: Option<String>,
}

/// Body of `POST /session`.
#[derive(Debug, Clone, Serialize)]
pub struct NewSessionRequest {
    /// W3C capabilities object
    pub capabilities: Capabilities,
}

/// W3C capabilities wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct Capabilities {
    /// Capabilities every matched session must satisfy
    #[serde(rename = "alwaysMatch")]
    pub always_match: AlwaysMatch,
}

/// The `alwaysMatch` capability set.
#[derive(Debug, Clone, Serialize)]
pub struct AlwaysMatch {
    /// Browser to drive ("chrome")
    #[serde(rename = "browserName")]
    pub browser_name: String,
    /// Chromium-specific launch options
    #[serde(rename = "goog:chromeOptions")]
    pub chrome_options: ChromeOptions,
}

/// Chromium launch options carried in `goog:chromeOptions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChromeOptions {
    /// Command-line arguments passed to the browser process
    pub args: Vec<String>,
}

impl NewSessionRequest {
    /// Builds a session request for a headless, sandboxless Chrome with a
    /// fixed window size, plus any caller-supplied extra arguments.
    pub fn headless(viewport: Viewport, extra_args: &[String]) -> Self {
        let mut args = vec![
            "--headless=new".to_string(),
            "--no-sandbox".to_string(),
            "--disable-gpu".to_string(),
            "--disable-dev-shm-usage".to_string(),
            format!("--window-size={},{}", viewport.width, viewport.height),
        ];
        args.extend_from_slice(extra_args);

        Self {
            capabilities: Capabilities {
                always_match: AlwaysMatch {
                    browser_name: "chrome".to_string(),
                    chrome_options: ChromeOptions { args },
                },
            },
        }
    }
}

/// Payload of a successful `POST /session` response.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSessionValue {
    /// Identifier for the created session
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

/// Body of `POST /session/{id}/window/rect`.
///
/// Only width and height are sent; the window position is left to the
/// remote end.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WindowRect {
    /// Window width in pixels
    pub width: i32,
    /// Window height in pixels
    pub height: i32,
}

impl From<Viewport> for WindowRect {
    fn from(v: Viewport) -> Self {
        Self {
            width: v.width,
            height: v.height,
        }
    }
}

/// Body of `POST /session/{id}/url`.
#[derive(Debug, Clone, Serialize)]
pub struct NavigateRequest {
    /// Absolute URL to navigate to
    pub url: String,
}

/// Body of `POST /session/{id}/execute/sync`.
#[derive(Debug, Clone, Serialize)]
pub struct ExecuteRequest {
    /// JavaScript function body to run in the page
    pub script: String,
    /// Arguments exposed to the script as `arguments`
    pub args: Vec<serde_json::Value>,
}

impl ExecuteRequest {
    /// An argument-less synchronous script.
    pub fn script(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            args: Vec::new(),
        }
    }
}

/// Body of `POST /session/{id}/element`.
#[derive(Debug, Clone, Serialize)]
pub struct ElementLocator {
    /// Location strategy ("css selector")
    pub using: String,
    /// Selector text
    pub value: String,
}

impl ElementLocator {
    /// A CSS-selector locator.
    pub fn css(selector: impl Into<String>) -> Self {
        Self {
            using: "css selector".to_string(),
            value: selector.into(),
        }
    }
}

/// Payload of `GET /status`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusValue {
    /// Whether the driver can accept new sessions
    pub ready: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_session_request_shape() {
        let req = NewSessionRequest::headless(Viewport::new(800, 600), &[]);
        let json = serde_json::to_value(&req).unwrap();

        let args = json["capabilities"]["alwaysMatch"]["goog:chromeOptions"]["args"]
            .as_array()
            .unwrap();
        let args: Vec<&str> = args.iter().map(|a| a.as_str().unwrap()).collect();
        assert!(args.contains(&"--headless=new"));
        assert!(args.contains(&"--no-sandbox"));
        assert!(args.contains(&"--window-size=800,600"));
        assert_eq!(
            json["capabilities"]["alwaysMatch"]["browserName"],
            "chrome"
        );
    }

    #[test]
    fn extra_args_are_appended() {
        let extra = vec!["--force-dark-mode".to_string()];
        let req = NewSessionRequest::headless(Viewport::new(100, 100), &extra);
        let json = serde_json::to_value(&req).unwrap();
        let args = json["capabilities"]["alwaysMatch"]["goog:chromeOptions"]["args"]
            .as_array()
            .unwrap();
        assert_eq!(args.last().unwrap(), "--force-dark-mode");
    }

    #[test]
    fn parses_success_envelope() {
        let body = r#"{"value":{"sessionId":"abc123"}}"#;
        let parsed: ValueEnvelope<NewSessionValue> = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.value.session_id, "abc123");
    }

    #[test]
    fn parses_error_envelope() {
        let body = r#"{"value":{"error":"no such element","message":"Unable to locate element: #stats-plot"}}"#;
        let parsed: ValueEnvelope<ErrorValue> = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.value.error, "no such element");
        assert!(parsed.value.stacktrace.is_none());
    }

    #[test]
    fn parses_status_value() {
        let body = r#"{"value":{"ready":true,"message":"ChromeDriver ready for new sessions."}}"#;
        let parsed: ValueEnvelope<StatusValue> = serde_json::from_str(body).unwrap();
        assert!(parsed.value.ready);
    }

    #[test]
    fn css_locator_uses_w3c_strategy() {
        let locator = ElementLocator::css("#stats-plot");
        let json = serde_json::to_value(&locator).unwrap();
        assert_eq!(json["using"], "css selector");
        assert_eq!(json["value"], "#stats-plot");
    }
}
