/// Tracked objects: renderables eligible for culling.
///
/// A TrackedObject pairs a world-space bounding volume with a weak
/// reference to the host's render toggle. The host keeps the strong
/// reference: once it drops the renderable, the object is treated as
/// already removed and skipped by the controller.

use std::sync::{Arc, Weak};
use bitflags::bitflags;
use glam::Mat4;
use slotmap::new_key_type;
use super::bounds::AABB;
use super::render_toggle::RenderToggle;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a TrackedObject within an ObjectsTracker.
    ///
    /// Keys remain valid even after other objects are removed.
    pub struct TrackedObjectKey;
}

// ===== CATEGORY =====

bitflags! {
    /// Culling categories. Each category can be exempted from culling
    /// by its own switch in `CullingSettings`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ObjectCategory: u32 {
        /// Opaque geometry; stays visible while large on screen
        const OPAQUE   = 1 << 0;
        /// Emissive geometry; stays visible while large on screen
        const EMISSIVE = 1 << 1;
        /// Animated (skinned) geometry; uses the animated profile
        const ANIMATED = 1 << 2;
    }
}

impl Default for ObjectCategory {
    fn default() -> Self {
        ObjectCategory::OPAQUE
    }
}

// ===== DESCRIPTOR =====

/// Registration parameters for `ObjectsTracker::add`.
#[derive(Clone)]
pub struct TrackedObjectDesc {
    /// Host render toggle (held weakly)
    pub toggle: Weak<dyn RenderToggle>,
    /// Bounds in local space
    pub local_bounds: AABB,
    /// Initial world transform
    pub world_matrix: Mat4,
    /// Culling categories
    pub category: ObjectCategory,
}

impl TrackedObjectDesc {
    /// Opaque object at the origin.
    pub fn new<T: RenderToggle + 'static>(toggle: &Arc<T>, local_bounds: AABB) -> Self {
        let weak: Weak<T> = Arc::downgrade(toggle);
        Self::from_weak(weak, local_bounds)
    }

    /// Same as `new` for a toggle already held as a trait object.
    pub fn from_weak(toggle: Weak<dyn RenderToggle>, local_bounds: AABB) -> Self {
        Self {
            toggle,
            local_bounds,
            world_matrix: Mat4::IDENTITY,
            category: ObjectCategory::default(),
        }
    }

    pub fn with_world_matrix(mut self, world_matrix: Mat4) -> Self {
        self.world_matrix = world_matrix;
        self
    }

    pub fn with_category(mut self, category: ObjectCategory) -> Self {
        self.category = category;
        self
    }
}

// ===== APPLY OUTCOME =====

/// Result of applying a decision to a render toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The flag was flipped
    Changed,
    /// The flag already matched the decision
    Unchanged,
    /// The host dropped the render toggle
    TargetMissing,
}

// ===== TRACKED OBJECT =====

pub struct TrackedObject {
    toggle: Weak<dyn RenderToggle>,
    local_bounds: AABB,
    world_matrix: Mat4,
    /// Cached `local_bounds` transformed by `world_matrix`
    world_bounds: AABB,
    category: ObjectCategory,
    /// Visibility last written by the controller (None = never culled)
    last_decision: Option<bool>,
}

impl TrackedObject {
    pub(crate) fn from_desc(desc: TrackedObjectDesc) -> Self {
        let world_bounds = desc.local_bounds.transformed(&desc.world_matrix);
        Self {
            toggle: desc.toggle,
            local_bounds: desc.local_bounds,
            world_matrix: desc.world_matrix,
            world_bounds,
            category: desc.category,
            last_decision: None,
        }
    }

    pub fn local_bounds(&self) -> &AABB {
        &self.local_bounds
    }

    pub fn world_bounds(&self) -> &AABB {
        &self.world_bounds
    }

    pub fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    pub fn category(&self) -> ObjectCategory {
        self.category
    }

    /// Visibility last applied by the controller, if any.
    pub fn last_decision(&self) -> Option<bool> {
        self.last_decision
    }

    /// Whether the host still owns the render toggle.
    pub fn is_alive(&self) -> bool {
        self.toggle.strong_count() > 0
    }

    /// Current visibility as seen by the host (None if the target is gone).
    pub fn is_visible(&self) -> Option<bool> {
        self.toggle.upgrade().map(|t| !t.is_force_hidden())
    }

    pub(crate) fn set_world_matrix(&mut self, world_matrix: Mat4) {
        self.world_matrix = world_matrix;
        self.world_bounds = self.local_bounds.transformed(&world_matrix);
    }

    pub(crate) fn set_category(&mut self, category: ObjectCategory) {
        self.category = category;
    }

    /// Write `visible` to the render toggle, skipping redundant writes.
    pub(crate) fn apply_visibility(&mut self, visible: bool) -> ApplyOutcome {
        let Some(toggle) = self.toggle.upgrade() else {
            return ApplyOutcome::TargetMissing;
        };

        self.last_decision = Some(visible);
        if toggle.is_force_hidden() == !visible {
            return ApplyOutcome::Unchanged;
        }
        toggle.set_force_hidden(!visible);
        ApplyOutcome::Changed
    }

    /// Force the toggle back to visible and forget the last decision.
    ///
    /// Returns true if the flag was hidden before.
    pub(crate) fn restore_visible(&mut self) -> bool {
        self.last_decision = None;
        match self.toggle.upgrade() {
            Some(toggle) if toggle.is_force_hidden() => {
                toggle.set_force_hidden(false);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "tracked_object_tests.rs"]
mod tests;
