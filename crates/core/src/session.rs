//! The visualizer session collaborator.

use async_trait::async_trait;

use vizshot_protocol::{Pose, PropertyValue, Vector3};
use vizshot_runtime::Result;

/// A running visualizer instance the capture controller issues commands to.
///
/// The session is created externally and passed in by reference; the
/// controller never owns its lifecycle. Implementations map these calls onto
/// whatever wire protocol the visualizer speaks.
#[async_trait]
pub trait Session: Send + Sync {
    /// The base URL of the visualizer's web page.
    fn web_url(&self) -> String;

    /// Set a property of a named scene-graph node to a boolean or numeric
    /// value.
    async fn set_property(&self, path: &str, property: &str, value: PropertyValue) -> Result<()>;

    /// Set a named scene-graph node's transform.
    async fn set_transform(&self, path: &str, pose: Pose) -> Result<()>;

    /// Place the camera at `eye`, aimed at `target`.
    async fn set_camera_pose(&self, eye: Vector3, target: Vector3) -> Result<()>;
}
