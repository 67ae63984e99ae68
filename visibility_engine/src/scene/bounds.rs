/// Axis-aligned bounding volumes for tracked objects.
///
/// Local bounds are supplied when an object is registered; world bounds
/// are recomputed from the world transform whenever the object moves.

use glam::{Mat4, Vec3};

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box of the given full size centered on `center`.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self { min: center - half, max: center + half }
    }

    /// Unit cube centered on the origin.
    pub fn unit() -> Self {
        Self::from_center_size(Vec3::ZERO, Vec3::ONE)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Length of the box diagonal.
    pub fn diameter(&self) -> f32 {
        self.size().length()
    }

    /// All coordinates finite and min <= max on every axis.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min.cmple(self.max).all()
    }

    /// Transform this local-space AABB by a matrix, returning a new AABB.
    ///
    /// Arvo's method: projects each matrix axis onto the extents for a
    /// tight result without transforming all 8 corners.
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        AABB { min: new_min, max: new_max }
    }

    /// Whether `point` lies inside or on the boundary of the box.
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Test if this AABB intersects (overlaps or touches) another AABB.
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }
}

impl Default for AABB {
    fn default() -> Self {
        Self::unit()
    }
}

#[cfg(test)]
#[path = "bounds_tests.rs"]
mod tests;
