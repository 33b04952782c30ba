//! Vizshot Runtime - Driver lifecycle and browser remote control
//!
//! This crate provides the low-level runtime infrastructure for driving a
//! headless Chrome through chromedriver:
//!
//! - **Driver management**: Locating the chromedriver executable
//! - **Server**: Launching and terminating the chromedriver process
//! - **Client**: W3C WebDriver session over HTTP/JSON
//! - **Capability seam**: The `BrowserControl` trait the capture layer
//!   programs against
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   vizshot    │  Capture controller (camera, lighting, UI removal)
//! └──────┬───────┘
//!        │ uses BrowserControl
//! ┌──────▼───────┐
//! │ viz-runtime  │  This crate
//! │  ┌─────────┐ │
//! │  │ Browser │ │  HeadlessBrowser = server + client
//! │  └─────────┘ │
//! │  ┌─────────┐ │
//! │  │ Client  │ │  WebDriver HTTP session
//! │  └─────────┘ │
//! │  ┌─────────┐ │
//! │  │ Server  │ │  chromedriver process management
//! │  └─────────┘ │
//! └──────────────┘
//! ```
//!
//! # Decoupling via BrowserControl
//!
//! The capture layer consumes browsers through the `BrowserControl` trait
//! rather than the concrete `HeadlessBrowser`, so tests (or an alternative
//! automation backend) can substitute their own implementation.

pub mod browser;
pub mod client;
pub mod driver;
pub mod error;
pub mod server;

// Re-export key types at crate root
pub use browser::{BrowserControl, HeadlessBrowser};
pub use client::WebDriverClient;
pub use driver::get_driver_executable;
pub use error::{Error, Result};
pub use server::DriverServer;
