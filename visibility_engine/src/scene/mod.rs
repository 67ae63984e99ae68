//! Scene module: tracked objects and their bounds.
//!
//! Holds the set of renderables the culling controller may hide,
//! together with the dirty set that drives re-evaluation.

mod bounds;
mod render_toggle;
mod tracked_object;
mod objects_tracker;

pub use bounds::AABB;
pub use render_toggle::{RenderToggle, RenderFlag};
pub use tracked_object::{
    TrackedObject, TrackedObjectDesc, TrackedObjectKey, ObjectCategory, ApplyOutcome,
};
pub use objects_tracker::ObjectsTracker;
