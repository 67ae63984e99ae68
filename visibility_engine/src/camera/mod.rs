//! Camera module: viewer state and frustum.
//!
//! Passive data containers. The host computes the viewer position and
//! projection each frame and hands a `ViewerState` to the controller.

mod frustum;
mod viewer;

pub use frustum::{
    Frustum,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
pub use viewer::{ViewerState, DEFAULT_FOV_Y};
