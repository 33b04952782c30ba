//! Scene value types sent to the visualizer session.
//!
//! These are the primitive values the capture controller pushes into the
//! remote scene graph: positions, poses, and node property values.

use serde::{Deserialize, Serialize};

/// A 3-component position or offset in world space.
///
/// Immutable value type; arithmetic returns new values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
}

impl Vector3 {
    /// The zero vector.
    pub const ZERO: Vector3 = Vector3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Creates a vector from its components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Component-wise approximate equality, for float comparisons in tests.
    pub fn approx_eq(&self, other: &Vector3, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon
            && (self.y - other.y).abs() <= epsilon
            && (self.z - other.z).abs() <= epsilon
    }
}

impl std::ops::Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

/// An orientation as a unit quaternion.
///
/// The capture controller only ever sends the identity orientation, but the
/// wire shape carries a full quaternion so session implementations can map
/// it onto their transform format directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
    /// Scalar component
    pub w: f64,
}

impl Rotation {
    /// The identity orientation.
    pub const IDENTITY: Rotation = Rotation {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Returns true if this is exactly the identity orientation.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// An orientation plus a position, describing a scene-graph node's placement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    /// Orientation (identity unless a caller constructs otherwise)
    pub rotation: Rotation,
    /// Position in world space
    pub position: Vector3,
}

impl Pose {
    /// A pose at `position` with identity orientation.
    pub const fn at(position: Vector3) -> Self {
        Self {
            rotation: Rotation::IDENTITY,
            position,
        }
    }
}

/// A value assignable to a named scene-graph node property.
///
/// Serializes untagged, so `Bool(true)` is `true` and `Number(40.0)` is
/// `40.0` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Boolean property (e.g. shadow casting)
    Bool(bool),
    /// Numeric property (e.g. light intensity)
    Number(f64),
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        PropertyValue::Bool(v)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        PropertyValue::Number(v)
    }
}

/// Viewport dimensions for the browser window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Window width in pixels
    pub width: i32,
    /// Window height in pixels
    pub height: i32,
}

impl Viewport {
    /// Creates a viewport from width and height in pixels.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_add_is_componentwise() {
        let a = Vector3::new(1.0, -2.0, 3.0);
        let b = Vector3::new(0.5, 2.0, -1.0);
        assert_eq!(a + b, Vector3::new(1.5, 0.0, 2.0));
    }

    #[test]
    fn vector_approx_eq_tolerates_epsilon() {
        let a = Vector3::new(1.0, 1.0, 1.0);
        let b = Vector3::new(1.0 + 1e-12, 1.0, 1.0 - 1e-12);
        assert!(a.approx_eq(&b, 1e-9));
        assert!(!a.approx_eq(&Vector3::new(1.1, 1.0, 1.0), 1e-9));
    }

    #[test]
    fn default_pose_is_identity_at_origin() {
        let pose = Pose::default();
        assert!(pose.rotation.is_identity());
        assert_eq!(pose.position, Vector3::ZERO);
    }

    #[test]
    fn pose_at_keeps_identity_rotation() {
        let pose = Pose::at(Vector3::new(2.0, 0.0, 2.0));
        assert!(pose.rotation.is_identity());
        assert_eq!(pose.position, Vector3::new(2.0, 0.0, 2.0));
    }

    #[test]
    fn property_value_serializes_untagged() {
        let shadow = serde_json::to_string(&PropertyValue::Bool(true)).unwrap();
        assert_eq!(shadow, "true");
        let intensity = serde_json::to_string(&PropertyValue::Number(40.0)).unwrap();
        assert_eq!(intensity, "40.0");
    }

    #[test]
    fn vector_serde_round_trip() {
        let v = Vector3::new(0.0, -5.0, 1.0);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"x":0.0,"y":-5.0,"z":1.0}"#);
        let back: Vector3 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
