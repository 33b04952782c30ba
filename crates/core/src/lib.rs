//! vizshot: Clean screenshots of a live 3D scene visualizer
//!
//! This crate drives a headless browser at a running scene visualizer,
//! strips the on-screen UI (stats plot, control panel), sets up
//! presentation lighting, positions the camera, and saves screenshots.
//!
//! The visualizer itself is an external collaborator reached through the
//! [`Session`] trait; this crate never implements the scene graph, it only
//! issues commands against it.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use vizshot::{Capture, CaptureOptions, Session, Vector3, Viewport};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session: Arc<dyn Session> = connect_to_visualizer().await?;
//!
//!     let mut capture = Capture::launch(
//!         session,
//!         Viewport::new(1080, 720),
//!         CaptureOptions::default(),
//!     )
//!     .await?;
//!
//!     // set up the scene here
//!
//!     capture.look_at(Vector3::ZERO, Vector3::new(0.0, -3.0, 2.0)).await?;
//!     capture.grab("filename.png").await?;
//!
//!     capture.close().await?;
//!     Ok(())
//! }
//! ```

mod capture;
mod options;
mod session;

pub mod js;

pub use capture::Capture;
pub use options::CaptureOptions;
pub use session::Session;

// Re-export the value types callers pass into the API
pub use vizshot_protocol::{Pose, PropertyValue, Rotation, Vector3, Viewport};

// Re-export the browser seam and runtime handle for substitution/advanced use
pub use vizshot_runtime::{BrowserControl, HeadlessBrowser};

// Re-export Error and Result from vizshot-runtime
pub use vizshot_runtime::{Error, Result};

/// Scene-graph node paths for the visualizer's built-in lights.
///
/// These match the visualizer's fixed lighting rig layout and are used by
/// both the construction-time lighting defaults and [`Capture::look_at`].
pub mod nodes {
    /// Spot light node
    pub const SPOT_LIGHT: &str = "/Lights/SpotLight/<object>";
    /// Point light on the positive-X side
    pub const POINT_LIGHT_POSITIVE_X: &str = "/Lights/PointLightPositiveX/<object>";
    /// Point light on the negative-X side
    pub const POINT_LIGHT_NEGATIVE_X: &str = "/Lights/PointLightNegativeX/<object>";
}
