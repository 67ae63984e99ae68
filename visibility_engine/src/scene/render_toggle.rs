/// Render toggles: the "force hidden" switch on a host renderable.
///
/// The culling controller never draws anything. It only flips this flag
/// on whatever object the host renderer consults before drawing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Host-side render switch driven by the culling controller.
///
/// Implementations must be cheap to query: the controller reads the
/// current state before writing to avoid redundant updates.
pub trait RenderToggle: Send + Sync {
    /// Suppress (`true`) or resume (`false`) drawing.
    fn set_force_hidden(&self, hidden: bool);

    /// Current state of the flag.
    fn is_force_hidden(&self) -> bool;
}

/// Atomic render flag, usable directly by hosts that poll a boolean.
///
/// Starts visible. Reads and writes are relaxed: the flag carries no
/// other data, and the render thread only needs the latest value.
#[derive(Debug, Default)]
pub struct RenderFlag {
    force_hidden: AtomicBool,
}

impl RenderFlag {
    pub fn new() -> Self {
        Self { force_hidden: AtomicBool::new(false) }
    }

    /// New flag wrapped in an `Arc`, ready to hand to the tracker.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Convenience inverse of `is_force_hidden`.
    pub fn is_visible(&self) -> bool {
        !self.is_force_hidden()
    }
}

impl RenderToggle for RenderFlag {
    fn set_force_hidden(&self, hidden: bool) {
        self.force_hidden.store(hidden, Ordering::Relaxed);
    }

    fn is_force_hidden(&self) -> bool {
        self.force_hidden.load(Ordering::Relaxed)
    }
}
