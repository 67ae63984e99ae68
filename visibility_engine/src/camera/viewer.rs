/// ViewerState: the point of view culling decisions are made from.
///
/// A passive snapshot: position, optional frustum, vertical field of view.
/// The caller builds one per frame; the controller compares successive
/// snapshots to decide when a full re-evaluation is needed.

use glam::{Mat4, Vec3};
use super::frustum::Frustum;

/// Default vertical field of view (60°, in radians)
pub const DEFAULT_FOV_Y: f32 = std::f32::consts::FRAC_PI_3;

/// Plane and fov differences below this are treated as unchanged
const VIEW_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerState {
    position: Vec3,
    frustum: Option<Frustum>,
    fov_y: f32,
}

impl ViewerState {
    /// Viewer at `position` with no frustum and the default field of view.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            frustum: None,
            fov_y: DEFAULT_FOV_Y,
        }
    }

    /// Viewer with a frustum extracted from `view_projection`.
    pub fn from_view_projection(position: Vec3, view_projection: &Mat4, fov_y: f32) -> Self {
        Self {
            position,
            frustum: Some(Frustum::from_view_projection(view_projection)),
            fov_y,
        }
    }

    /// Replace the frustum (`None` disables frustum tests).
    pub fn with_frustum(mut self, frustum: Option<Frustum>) -> Self {
        self.frustum = frustum;
        self
    }

    /// Replace the vertical field of view (radians).
    pub fn with_fov_y(mut self, fov_y: f32) -> Self {
        self.fov_y = fov_y;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn frustum(&self) -> Option<&Frustum> {
        self.frustum.as_ref()
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Whether moving from `previous` to `self` invalidates earlier decisions.
    ///
    /// True when the position moved further than `move_threshold`, or the
    /// frustum or field of view changed beyond float noise. A viewer that
    /// keeps rotating therefore re-evaluates the whole set on every
    /// processing tick; hosts that rotate constantly can raise
    /// `frames_between_updates` or pass a viewer without a frustum.
    pub fn differs_from(&self, previous: &ViewerState, move_threshold: f32) -> bool {
        if self.position.distance(previous.position) > move_threshold {
            return true;
        }
        if (self.fov_y - previous.fov_y).abs() > VIEW_EPSILON {
            return true;
        }
        match (&self.frustum, &previous.frustum) {
            (Some(current), Some(prev)) => !current.abs_diff_eq(prev, VIEW_EPSILON),
            (None, None) => false,
            _ => true,
        }
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}

#[cfg(test)]
#[path = "viewer_tests.rs"]
mod tests;
