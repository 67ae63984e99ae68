/// Culling configuration.
///
/// Settings are plain values. The controller keeps its own copy and only
/// hands out clones, so editing a copy has no effect until it is passed
/// back through `CullingController::set_settings`.

use std::time::Duration;
use crate::error::{Error, Result};

/// Distance and screen-size thresholds for one family of objects.
#[derive(Debug, Clone, PartialEq)]
pub struct CullingProfile {
    /// Objects closer than this (world units, to bounds center) stay visible
    pub visible_distance_threshold: f32,
    /// Opaque objects larger than this on screen (% of viewport height) stay visible
    pub opaque_size_threshold: f32,
    /// Emissive objects larger than this on screen (% of viewport height) stay visible
    pub emissive_size_threshold: f32,
}

impl CullingProfile {
    /// Profile for static renderers
    pub fn renderer() -> Self {
        Self {
            visible_distance_threshold: 30.0,
            opaque_size_threshold: 6.0,
            emissive_size_threshold: 2.5,
        }
    }

    /// Profile for animated (skinned) renderers; they stay visible further out
    pub fn animated() -> Self {
        Self {
            visible_distance_threshold: 50.0,
            opaque_size_threshold: 6.0,
            emissive_size_threshold: 2.5,
        }
    }

    fn validate(&self, name: &str) -> Result<()> {
        let fields = [
            ("visible_distance_threshold", self.visible_distance_threshold),
            ("opaque_size_threshold", self.opaque_size_threshold),
            ("emissive_size_threshold", self.emissive_size_threshold),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidSettings(format!(
                    "{}.{} must be finite and non-negative (got {})", name, field, value
                )));
            }
        }
        Ok(())
    }
}

/// Active configuration of a `CullingController`.
#[derive(Debug, Clone, PartialEq)]
pub struct CullingSettings {
    /// Master switch. When false, every object is visible.
    pub enable_object_culling: bool,
    /// When false, animated objects are never culled
    pub enable_animation_culling: bool,
    /// When false, opaque (non-animated) objects are never culled
    pub enable_opaque_culling: bool,
    /// Thresholds for static objects
    pub renderer_profile: CullingProfile,
    /// Thresholds for animated objects
    pub animated_profile: CullingProfile,
    /// Maximum time spent evaluating objects in one tick
    pub max_time_budget: Duration,
    /// Ticks skipped between two processing ticks (0 = process every tick)
    pub frames_between_updates: u32,
    /// Viewer displacement (world units) that triggers a full re-evaluation
    pub viewer_move_threshold: f32,
}

impl CullingSettings {
    /// Check every threshold is finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        self.renderer_profile.validate("renderer_profile")?;
        self.animated_profile.validate("animated_profile")?;
        if !self.viewer_move_threshold.is_finite() || self.viewer_move_threshold < 0.0 {
            return Err(Error::InvalidSettings(format!(
                "viewer_move_threshold must be finite and non-negative (got {})",
                self.viewer_move_threshold
            )));
        }
        Ok(())
    }
}

impl Default for CullingSettings {
    fn default() -> Self {
        Self {
            enable_object_culling: true,
            enable_animation_culling: true,
            enable_opaque_culling: true,
            renderer_profile: CullingProfile::renderer(),
            animated_profile: CullingProfile::animated(),
            max_time_budget: Duration::from_millis(4),
            frames_between_updates: 0,
            viewer_move_threshold: 1.0,
        }
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
