/// Tests for ObjectsTracker
///
/// Registration, dirty-set bookkeeping, removal guarantees and
/// handling of dropped render targets.

use super::*;
use crate::error::Error;
use crate::scene::{RenderFlag, RenderToggle, AABB};
use glam::Vec3;
use std::sync::Arc;

// ============================================================================
// Helper Functions
// ============================================================================

fn desc_at(flag: &Arc<RenderFlag>, position: Vec3) -> TrackedObjectDesc {
    TrackedObjectDesc::new(flag, AABB::unit())
        .with_world_matrix(Mat4::from_translation(position))
}

fn tracker_with(count: usize) -> (ObjectsTracker, Vec<Arc<RenderFlag>>, Vec<TrackedObjectKey>) {
    let mut tracker = ObjectsTracker::new();
    let mut flags = Vec::new();
    let mut keys = Vec::new();
    for i in 0..count {
        let flag = RenderFlag::shared();
        keys.push(tracker.add(desc_at(&flag, Vec3::new(i as f32, 0.0, 0.0))).unwrap());
        flags.push(flag);
    }
    (tracker, flags, keys)
}

// ============================================================================
// Add
// ============================================================================

#[test]
fn test_new_tracker_is_clean() {
    let tracker = ObjectsTracker::new();
    assert!(tracker.is_empty());
    assert!(!tracker.is_dirty());
    assert_eq!(tracker.dirty_count(), 0);
}

#[test]
fn test_add_marks_dirty() {
    let (tracker, _flags, keys) = tracker_with(1);
    assert_eq!(tracker.len(), 1);
    assert!(tracker.is_dirty());
    assert!(tracker.is_object_dirty(keys[0]));
    assert!(tracker.contains(keys[0]));
}

#[test]
fn test_add_rejects_inverted_bounds() {
    let mut tracker = ObjectsTracker::new();
    let flag = RenderFlag::shared();
    let desc = TrackedObjectDesc::new(&flag, AABB::new(Vec3::ONE, Vec3::ZERO));

    let result = tracker.add(desc);
    assert!(matches!(result, Err(Error::InvalidArgument(_))));
    assert!(tracker.is_empty());
    assert!(!tracker.is_dirty());
}

#[test]
fn test_add_rejects_non_finite_matrix() {
    let mut tracker = ObjectsTracker::new();
    let flag = RenderFlag::shared();
    let desc = desc_at(&flag, Vec3::new(f32::NAN, 0.0, 0.0));

    assert!(tracker.add(desc).is_err());
}

// ============================================================================
// Consume
// ============================================================================

#[test]
fn test_consume_dirty_returns_and_clears() {
    let (mut tracker, _flags, keys) = tracker_with(3);

    let dirty = tracker.consume_dirty();
    assert_eq!(dirty.len(), 3);
    for key in &keys {
        assert!(dirty.contains(key));
    }
    assert!(!tracker.is_dirty());
    assert_eq!(tracker.dirty_count(), 0);
}

#[test]
fn test_dirty_membership_is_unique() {
    let (mut tracker, _flags, keys) = tracker_with(1);
    tracker.notify_moved(keys[0], Mat4::IDENTITY).unwrap();
    tracker.notify_moved(keys[0], Mat4::IDENTITY).unwrap();
    assert_eq!(tracker.dirty_count(), 1);
}

// ============================================================================
// NotifyMoved
// ============================================================================

#[test]
fn test_notify_moved_marks_only_that_object() {
    let (mut tracker, _flags, keys) = tracker_with(3);
    tracker.consume_dirty();

    assert!(tracker.notify_moved(keys[1], Mat4::from_translation(Vec3::splat(50.0))).unwrap());
    assert!(tracker.is_dirty());
    assert_eq!(tracker.dirty_count(), 1);
    assert!(tracker.is_object_dirty(keys[1]));
    assert_eq!(
        tracker.object(keys[1]).unwrap().world_bounds().center(),
        Vec3::splat(50.0)
    );
}

#[test]
fn test_notify_moved_unknown_key() {
    let (mut tracker, _flags, keys) = tracker_with(1);
    tracker.remove(keys[0]);
    tracker.consume_dirty();

    assert!(!tracker.notify_moved(keys[0], Mat4::IDENTITY).unwrap());
    assert!(!tracker.is_dirty());
}

#[test]
fn test_notify_moved_rejects_non_finite_matrix() {
    let (mut tracker, _flags, keys) = tracker_with(1);
    tracker.consume_dirty();
    let before = *tracker.object(keys[0]).unwrap().world_bounds();

    let nan = Mat4::from_translation(Vec3::new(f32::NAN, 0.0, 0.0));
    let result = tracker.notify_moved(keys[0], nan);

    assert!(matches!(result, Err(Error::InvalidArgument(_))));
    assert!(!tracker.is_dirty());
    assert_eq!(*tracker.object(keys[0]).unwrap().world_bounds(), before);
    assert_eq!(*tracker.object(keys[0]).unwrap().world_matrix(), Mat4::IDENTITY);
}

#[test]
fn test_set_category_marks_dirty() {
    let (mut tracker, _flags, keys) = tracker_with(1);
    tracker.consume_dirty();

    assert!(tracker.set_category(keys[0], ObjectCategory::ANIMATED));
    assert!(tracker.is_object_dirty(keys[0]));
    assert_eq!(tracker.object(keys[0]).unwrap().category(), ObjectCategory::ANIMATED);
}

// ============================================================================
// Remove
// ============================================================================

#[test]
fn test_remove_marks_dirty_and_restores_visible() {
    let (mut tracker, flags, keys) = tracker_with(1);
    tracker.apply_decision(keys[0], false);
    tracker.consume_dirty();
    assert!(flags[0].is_force_hidden());

    assert!(tracker.remove(keys[0]));
    assert!(flags[0].is_visible());
    assert!(tracker.is_dirty());
    assert_eq!(tracker.dirty_count(), 0);
    assert!(!tracker.contains(keys[0]));
}

#[test]
fn test_remove_drops_pending_dirty_entry() {
    let (mut tracker, _flags, keys) = tracker_with(2);
    tracker.remove(keys[0]);

    let dirty = tracker.consume_dirty();
    assert_eq!(dirty.len(), 1);
    assert!(dirty.contains(&keys[1]));
}

#[test]
fn test_remove_unknown_key() {
    let (mut tracker, _flags, keys) = tracker_with(1);
    assert!(tracker.remove(keys[0]));
    assert!(!tracker.remove(keys[0]));
}

#[test]
fn test_remove_with_dropped_target() {
    let (mut tracker, mut flags, keys) = tracker_with(1);
    flags.clear();
    assert!(tracker.remove(keys[0]));
}

// ============================================================================
// Requeue / mark all / forget
// ============================================================================

#[test]
fn test_requeue_restores_keys() {
    let (mut tracker, _flags, keys) = tracker_with(2);
    let dirty = tracker.consume_dirty();

    tracker.requeue(dirty);
    assert_eq!(tracker.dirty_count(), 2);
    assert!(tracker.is_object_dirty(keys[0]));
}

#[test]
fn test_requeue_ignores_removed_keys() {
    let (mut tracker, _flags, keys) = tracker_with(2);
    let dirty = tracker.consume_dirty();
    tracker.remove(keys[0]);
    tracker.consume_dirty();

    tracker.requeue(dirty);
    assert_eq!(tracker.dirty_count(), 1);
    assert!(tracker.is_object_dirty(keys[1]));
}

#[test]
fn test_mark_all_dirty() {
    let (mut tracker, _flags, _keys) = tracker_with(4);
    tracker.consume_dirty();

    tracker.mark_all_dirty();
    assert_eq!(tracker.dirty_count(), 4);
}

#[test]
fn test_forget_does_not_count_as_structural_change() {
    let (mut tracker, mut flags, keys) = tracker_with(1);
    tracker.consume_dirty();
    flags.clear();

    assert!(tracker.forget(keys[0]));
    assert!(tracker.is_empty());
    assert!(!tracker.is_dirty());
    assert!(!tracker.forget(keys[0]));
}

#[test]
fn test_prune_dropped_removes_dead_entries() {
    let (mut tracker, mut flags, keys) = tracker_with(3);
    tracker.consume_dirty();
    flags.remove(1);

    assert_eq!(tracker.prune_dropped(), 1);
    assert_eq!(tracker.len(), 2);
    assert!(!tracker.contains(keys[1]));
    assert!(tracker.contains(keys[0]));
    assert!(tracker.contains(keys[2]));
    assert_eq!(tracker.prune_dropped(), 0);
}

#[test]
fn test_mark_all_dirty_skips_dropped_targets() {
    let (mut tracker, mut flags, keys) = tracker_with(2);
    tracker.consume_dirty();
    flags.remove(0);

    tracker.mark_all_dirty();
    assert_eq!(tracker.len(), 1);
    assert_eq!(tracker.dirty_count(), 1);
    assert!(!tracker.is_object_dirty(keys[0]));
    assert!(tracker.is_object_dirty(keys[1]));
}

// ============================================================================
// Decisions and restore
// ============================================================================

#[test]
fn test_apply_decision() {
    let (mut tracker, flags, keys) = tracker_with(1);

    assert_eq!(tracker.apply_decision(keys[0], false), Some(ApplyOutcome::Changed));
    assert!(flags[0].is_force_hidden());
    assert_eq!(tracker.apply_decision(keys[0], false), Some(ApplyOutcome::Unchanged));
}

#[test]
fn test_apply_decision_unknown_key() {
    let (mut tracker, _flags, keys) = tracker_with(1);
    tracker.remove(keys[0]);
    assert_eq!(tracker.apply_decision(keys[0], true), None);
}

#[test]
fn test_restore_all_visible_counts_hidden() {
    let (mut tracker, flags, keys) = tracker_with(3);
    tracker.apply_decision(keys[0], false);
    tracker.apply_decision(keys[2], false);

    assert_eq!(tracker.restore_all_visible(), 2);
    assert!(flags.iter().all(|f| f.is_visible()));
}

#[test]
fn test_clear_restores_and_empties() {
    let (mut tracker, flags, keys) = tracker_with(2);
    tracker.apply_decision(keys[1], false);
    tracker.consume_dirty();

    tracker.clear();
    assert!(tracker.is_empty());
    assert!(tracker.is_dirty());
    assert!(flags[1].is_visible());
}

#[test]
fn test_objects_iteration() {
    let (tracker, _flags, keys) = tracker_with(3);
    let iterated: Vec<TrackedObjectKey> = tracker.objects().map(|(k, _)| k).collect();
    assert_eq!(iterated.len(), 3);
    for key in &keys {
        assert!(iterated.contains(key));
    }
}
