//! Wire and scene value types for vizshot.
//!
//! This crate contains the serde-serializable types used by the capture
//! controller: the 3D value types sent to the visualizer session (vectors,
//! poses, property values) and the W3C WebDriver wire shapes spoken to the
//! headless browser.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! - **Pure data**: No behavior beyond serialization/deserialization and
//!   small value-type math
//! - **1:1 with the wire**: WebDriver shapes match the W3C endpoint bodies
//! - **Stable**: Changes only when a wire format changes
//!
//! Higher-level ergonomic APIs are built on top of these types in `vizshot`.

pub mod scene;
pub mod webdriver;

pub use scene::*;
pub use webdriver::*;
