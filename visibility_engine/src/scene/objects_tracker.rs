/// ObjectsTracker: the authoritative set of cullable objects.
///
/// Uses a SlotMap for O(1) insert/remove with stable keys, and an
/// FxHashSet as the dirty set. The tracker is the only owner of both;
/// other components mutate them through the methods below.

use rustc_hash::FxHashSet;
use slotmap::SlotMap;
use glam::Mat4;
use crate::error::Result;
use crate::{engine_bail, engine_debug};
use super::tracked_object::{
    ApplyOutcome, ObjectCategory, TrackedObject, TrackedObjectDesc, TrackedObjectKey,
};

pub struct ObjectsTracker {
    /// Tracked objects stored in a slot map for O(1) insert/remove
    objects: SlotMap<TrackedObjectKey, TrackedObject>,
    /// Objects needing re-evaluation since the last consume_dirty()
    dirty: FxHashSet<TrackedObjectKey>,
    /// An object was added or removed since the last consume_dirty()
    structure_changed: bool,
}

impl ObjectsTracker {
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
            dirty: FxHashSet::default(),
            structure_changed: false,
        }
    }

    /// Register a new object. It is dirty until the next tick evaluates it.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if the local bounds are inverted or
    /// not finite, or if the world matrix is not finite.
    pub fn add(&mut self, desc: TrackedObjectDesc) -> Result<TrackedObjectKey> {
        if !desc.local_bounds.is_valid() {
            engine_bail!("visibility::ObjectsTracker",
                "Invalid local bounds {:?}", desc.local_bounds);
        }
        if !desc.world_matrix.is_finite() {
            engine_bail!("visibility::ObjectsTracker",
                "World matrix is not finite");
        }

        let key = self.objects.insert(TrackedObject::from_desc(desc));
        self.dirty.insert(key);
        self.structure_changed = true;
        Ok(key)
    }

    /// Deregister an object, restoring its render toggle to visible first.
    ///
    /// Returns false if the key is unknown.
    pub fn remove(&mut self, key: TrackedObjectKey) -> bool {
        match self.objects.remove(key) {
            Some(mut object) => {
                object.restore_visible();
                self.dirty.remove(&key);
                self.structure_changed = true;
                true
            }
            None => false,
        }
    }

    /// Drop an object whose render toggle no longer exists.
    ///
    /// Unlike `remove`, the toggle is not touched.
    pub fn forget(&mut self, key: TrackedObjectKey) -> bool {
        if self.objects.remove(key).is_some() {
            self.dirty.remove(&key);
            engine_debug!("visibility::ObjectsTracker",
                "Forgot {:?}: render target was dropped", key);
            true
        } else {
            false
        }
    }

    /// Record a transform change. Returns `Ok(false)` if the key is unknown.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` and keeps the previous transform if
    /// `world_matrix` is not finite.
    pub fn notify_moved(&mut self, key: TrackedObjectKey, world_matrix: Mat4) -> Result<bool> {
        if !world_matrix.is_finite() {
            engine_bail!("visibility::ObjectsTracker",
                "World matrix for {:?} is not finite", key);
        }

        if let Some(object) = self.objects.get_mut(key) {
            object.set_world_matrix(world_matrix);
            self.dirty.insert(key);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Change an object's categories. Returns false if the key is unknown.
    pub fn set_category(&mut self, key: TrackedObjectKey, category: ObjectCategory) -> bool {
        if let Some(object) = self.objects.get_mut(key) {
            object.set_category(category);
            self.dirty.insert(key);
            true
        } else {
            false
        }
    }

    /// True iff an object was added, removed or moved since the last consume.
    pub fn is_dirty(&self) -> bool {
        self.structure_changed || !self.dirty.is_empty()
    }

    /// Number of objects waiting for evaluation.
    pub fn dirty_count(&self) -> usize {
        self.dirty.len()
    }

    /// Whether `key` is waiting for evaluation.
    pub fn is_object_dirty(&self, key: TrackedObjectKey) -> bool {
        self.dirty.contains(&key)
    }

    /// Take and clear the dirty set.
    pub fn consume_dirty(&mut self) -> FxHashSet<TrackedObjectKey> {
        self.structure_changed = false;
        std::mem::take(&mut self.dirty)
    }

    /// Put back keys a tick could not process. Unknown keys are ignored.
    pub fn requeue<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = TrackedObjectKey>,
    {
        for key in keys {
            if self.objects.contains_key(key) {
                self.dirty.insert(key);
            }
        }
    }

    /// Mark every tracked object for re-evaluation.
    ///
    /// Objects whose render toggle was dropped are pruned first.
    pub fn mark_all_dirty(&mut self) {
        self.prune_dropped();
        self.dirty.extend(self.objects.keys());
    }

    /// Forget every object whose render toggle was dropped by the host.
    ///
    /// Returns the number of objects pruned.
    pub fn prune_dropped(&mut self) -> usize {
        let before = self.objects.len();
        let dirty = &mut self.dirty;
        self.objects.retain(|key, object| {
            let alive = object.is_alive();
            if !alive {
                dirty.remove(&key);
            }
            alive
        });

        let pruned = before - self.objects.len();
        if pruned > 0 {
            engine_debug!("visibility::ObjectsTracker",
                "Pruned {} objects: render target was dropped", pruned);
        }
        pruned
    }

    /// Write a decision to an object's render toggle.
    ///
    /// Returns None if the key is unknown.
    pub(crate) fn apply_decision(
        &mut self,
        key: TrackedObjectKey,
        visible: bool,
    ) -> Option<ApplyOutcome> {
        self.objects.get_mut(key).map(|object| object.apply_visibility(visible))
    }

    /// Force every render toggle back to visible.
    ///
    /// Returns the number of toggles that were hidden.
    pub fn restore_all_visible(&mut self) -> usize {
        self.prune_dropped();
        self.objects
            .values_mut()
            .map(|object| object.restore_visible())
            .filter(|&was_hidden| was_hidden)
            .count()
    }

    pub fn object(&self, key: TrackedObjectKey) -> Option<&TrackedObject> {
        self.objects.get(key)
    }

    pub fn contains(&self, key: TrackedObjectKey) -> bool {
        self.objects.contains_key(key)
    }

    /// Iterate over all tracked objects (key, object)
    pub fn objects(&self) -> impl Iterator<Item = (TrackedObjectKey, &TrackedObject)> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Remove every object, restoring all render toggles to visible.
    pub fn clear(&mut self) {
        self.restore_all_visible();
        if !self.objects.is_empty() {
            self.structure_changed = true;
        }
        self.objects.clear();
        self.dirty.clear();
    }
}

impl Default for ObjectsTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "objects_tracker_tests.rs"]
mod tests;
