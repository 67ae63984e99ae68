/*!
# Visibility Engine

Time-budgeted visibility culling for renderable objects.

The host engine registers its renderables with an `ObjectsTracker`,
reports their movements, and calls `CullingController::tick()` once per
frame. The controller re-evaluates only what changed, writes each
decision to the renderable's "force hidden" flag, and stops for the
frame once its time budget is spent.

## Architecture

- **ObjectsTracker**: live set of cullable objects and their dirty set
- **CullingEvaluator**: pure visibility rule (distance, frustum, screen size)
- **CullingController**: Stopped/Running lifecycle, per-tick budget, throttle
- **RenderToggle**: host-side switch the controller drives
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod camera;
pub mod scene;
pub mod culling;

// Main visibility namespace module
pub mod visibility {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine-wide services (logging)
    pub use crate::engine::Engine;

    // Most used types at the namespace root
    pub use crate::camera::ViewerState;
    pub use crate::culling::{CullingController, CullingSettings, TickReport};
    pub use crate::scene::{ObjectsTracker, RenderFlag, RenderToggle, TrackedObjectDesc};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }

    // Culling sub-module
    pub mod culling {
        pub use crate::culling::*;
    }
}

// Re-export math library at crate root
pub use glam;
