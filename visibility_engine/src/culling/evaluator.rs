/// Culling evaluators.
///
/// A CullingEvaluator decides whether one tracked object should be drawn
/// from the current viewer. It is a pure function of its inputs: no engine
/// state is touched and no hidden time or random state is consulted, so
/// identical inputs always give identical decisions.

use crate::camera::ViewerState;
use crate::scene::{ObjectCategory, TrackedObject, AABB};
use super::settings::{CullingProfile, CullingSettings};

/// Strategy deciding the visibility of a single object.
pub trait CullingEvaluator: Send + Sync {
    /// Return `true` if the object should be drawn.
    fn evaluate(
        &self,
        object: &TrackedObject,
        viewer: &ViewerState,
        settings: &CullingSettings,
    ) -> bool;
}

/// Projected size of `bounds` as a percentage of the viewport height.
///
/// Returns `f32::INFINITY` when the viewer sits on the bounds center.
pub fn screen_size_percent(bounds: &AABB, viewer: &ViewerState) -> f32 {
    let distance = viewer.position().distance(bounds.center());
    if distance <= f32::EPSILON {
        return f32::INFINITY;
    }

    let tan_half_fov = (viewer.fov_y() * 0.5).tan();
    if tan_half_fov <= 0.0 {
        return 0.0;
    }

    bounds.diameter() / (2.0 * distance * tan_half_fov) * 100.0
}

/// Distance, frustum and screen-size rule.
///
/// In order:
/// 1. Master switch off → visible.
/// 2. Category exempt (animated with animation culling off, opaque with
///    opaque culling off) → visible.
/// 3. Viewer inside the bounds → visible.
/// 4. Outside the viewer frustum (when one is set) → hidden.
/// 5. Closer than the profile's distance threshold → visible.
/// 6. Opaque/emissive and larger on screen than the profile allows → visible.
/// 7. Otherwise hidden.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultEvaluator;

impl DefaultEvaluator {
    pub fn new() -> Self {
        Self
    }

    fn is_exempt(category: ObjectCategory, settings: &CullingSettings) -> bool {
        if category.contains(ObjectCategory::ANIMATED) {
            return !settings.enable_animation_culling;
        }
        category.contains(ObjectCategory::OPAQUE) && !settings.enable_opaque_culling
    }

    fn profile(category: ObjectCategory, settings: &CullingSettings) -> &CullingProfile {
        if category.contains(ObjectCategory::ANIMATED) {
            &settings.animated_profile
        } else {
            &settings.renderer_profile
        }
    }
}

impl CullingEvaluator for DefaultEvaluator {
    fn evaluate(
        &self,
        object: &TrackedObject,
        viewer: &ViewerState,
        settings: &CullingSettings,
    ) -> bool {
        if !settings.enable_object_culling {
            return true;
        }

        let category = object.category();
        if Self::is_exempt(category, settings) {
            return true;
        }

        let bounds = object.world_bounds();
        if bounds.contains_point(viewer.position()) {
            return true;
        }

        if let Some(frustum) = viewer.frustum() {
            if !frustum.intersects_aabb(bounds) {
                return false;
            }
        }

        let profile = Self::profile(category, settings);
        let distance = viewer.position().distance(bounds.center());
        if distance < profile.visible_distance_threshold {
            return true;
        }

        let screen_size = screen_size_percent(bounds, viewer);
        if category.contains(ObjectCategory::OPAQUE) && screen_size > profile.opaque_size_threshold {
            return true;
        }
        if category.contains(ObjectCategory::EMISSIVE) && screen_size > profile.emissive_size_threshold {
            return true;
        }

        false
    }
}

#[cfg(test)]
#[path = "evaluator_tests.rs"]
mod tests;
