/// CullingController: budgeted, demand-driven visibility scheduler.
///
/// Called once per host frame via `tick()`. Each tick drains the tracker's
/// dirty set, evaluates every dirty object and writes the decision to its
/// render toggle, stopping early when the time budget runs out. Unprocessed
/// objects go back into the dirty set for the next tick.
///
/// The controller owns its ObjectsTracker, settings, evaluator and clock.
/// The viewer is passed in on every tick.

use crate::camera::ViewerState;
use crate::error::Result;
use crate::scene::{ApplyOutcome, ObjectsTracker, TrackedObjectKey};
use crate::{engine_debug, engine_error, engine_info, engine_trace};
use super::clock::{Clock, SystemClock};
use super::evaluator::{CullingEvaluator, DefaultEvaluator};
use super::settings::CullingSettings;

/// Lifecycle state of a CullingController
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Stopped,
    Running,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Objects evaluated this tick
    pub evaluated: usize,
    /// Render toggles switched to visible
    pub shown: usize,
    /// Render toggles switched to hidden
    pub hidden: usize,
    /// Dirty keys skipped (render target dropped or object removed)
    pub skipped: usize,
    /// Dirty keys carried over to the next tick
    pub deferred: usize,
    /// Hidden objects restored because culling was switched off
    pub restored: usize,
    /// The time budget ran out before the dirty set was drained
    pub budget_exceeded: bool,
}

impl TickReport {
    /// True if the tick touched nothing.
    pub fn is_idle(&self) -> bool {
        *self == TickReport::default()
    }
}

pub struct CullingController {
    state: ControllerState,
    settings: CullingSettings,
    /// Settings replaced since the last running tick
    settings_dirty: bool,
    tracker: ObjectsTracker,
    evaluator: Box<dyn CullingEvaluator>,
    clock: Box<dyn Clock>,
    /// Viewer used for the last full re-evaluation
    reference_viewer: Option<ViewerState>,
    /// Ticks skipped since the last processing tick
    frames_since_update: u32,
}

impl CullingController {
    /// Create a stopped controller with the default evaluator and wall clock.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSettings` if `settings` fails validation.
    pub fn new(settings: CullingSettings) -> Result<Self> {
        settings.validate().map_err(|err| {
            engine_error!("visibility::CullingController", "Rejected settings: {}", err);
            err
        })?;

        Ok(Self {
            state: ControllerState::Stopped,
            settings,
            settings_dirty: false,
            tracker: ObjectsTracker::new(),
            evaluator: Box::new(DefaultEvaluator::new()),
            clock: Box::new(SystemClock),
            reference_viewer: None,
            frames_since_update: 0,
        })
    }

    /// Replace the evaluator.
    pub fn with_evaluator<E: CullingEvaluator + 'static>(mut self, evaluator: E) -> Self {
        self.evaluator = Box::new(evaluator);
        self
    }

    /// Replace the clock used to enforce the time budget.
    pub fn with_clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // ===== LIFECYCLE =====

    /// Stopped → Running. No-op if already running.
    ///
    /// Every tracked object is marked dirty so the first tick evaluates
    /// the whole set.
    pub fn start(&mut self) {
        if self.state == ControllerState::Running {
            return;
        }

        self.state = ControllerState::Running;
        self.tracker.mark_all_dirty();
        self.reference_viewer = None;
        self.frames_since_update = self.settings.frames_between_updates;

        engine_info!("visibility::CullingController",
            "Started ({} tracked objects)", self.tracker.len());
    }

    /// Running → Stopped. No-op if already stopped.
    ///
    /// Every tracked object is forced back to visible before returning.
    pub fn stop(&mut self) {
        if self.state == ControllerState::Stopped {
            return;
        }

        self.state = ControllerState::Stopped;
        let restored = self.tracker.restore_all_visible();

        engine_info!("visibility::CullingController",
            "Stopped ({} objects restored to visible)", restored);
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ControllerState::Running
    }

    /// Pending work: tracker changes or a settings change not yet applied.
    pub fn is_dirty(&self) -> bool {
        self.tracker.is_dirty() || self.settings_dirty
    }

    // ===== SETTINGS =====

    /// Replace the active settings. Takes effect on the next tick.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSettings` and keeps the current settings if
    /// `settings` fails validation.
    pub fn set_settings(&mut self, settings: CullingSettings) -> Result<()> {
        settings.validate().map_err(|err| {
            engine_error!("visibility::CullingController", "Rejected settings: {}", err);
            err
        })?;

        engine_info!("visibility::CullingController",
            "Settings updated (object culling {})",
            if settings.enable_object_culling { "on" } else { "off" });

        self.settings = settings;
        self.settings_dirty = true;
        Ok(())
    }

    /// Copy of the active settings. Editing it has no effect until it is
    /// passed to `set_settings`.
    pub fn settings_copy(&self) -> CullingSettings {
        self.settings.clone()
    }

    // ===== OBJECTS =====

    pub fn tracker(&self) -> &ObjectsTracker {
        &self.tracker
    }

    /// Mutable tracker access for registering, moving and removing objects.
    pub fn tracker_mut(&mut self) -> &mut ObjectsTracker {
        &mut self.tracker
    }

    /// Force a full re-evaluation on the next processing tick.
    pub fn mark_all_dirty(&mut self) {
        self.tracker.mark_all_dirty();
    }

    // ===== TICK =====

    /// Run one scheduling step from `viewer`'s point of view.
    pub fn tick(&mut self, viewer: &ViewerState) -> TickReport {
        let mut report = TickReport::default();
        if self.state == ControllerState::Stopped {
            return report;
        }

        self.apply_pending_settings(&mut report);
        self.track_viewer(viewer);

        if self.frames_since_update < self.settings.frames_between_updates {
            self.frames_since_update += 1;
            return report;
        }
        self.frames_since_update = 0;

        if !self.tracker.is_dirty() {
            return report;
        }

        let dirty = self.tracker.consume_dirty();
        let start = self.clock.now();
        let mut pending = dirty.into_iter();

        while let Some(key) = pending.next() {
            self.process(key, viewer, &mut report);

            let elapsed = self.clock.now().saturating_duration_since(start);
            if elapsed > self.settings.max_time_budget {
                let remaining: Vec<TrackedObjectKey> = pending.collect();
                if !remaining.is_empty() {
                    report.deferred = remaining.len();
                    report.budget_exceeded = true;
                    self.tracker.requeue(remaining);
                    engine_debug!("visibility::CullingController",
                        "Budget of {:?} exceeded after {:?}, {} objects deferred",
                        self.settings.max_time_budget, elapsed, report.deferred);
                }
                break;
            }
        }

        engine_trace!("visibility::CullingController",
            "Tick: {} evaluated, {} shown, {} hidden, {} skipped, {} deferred",
            report.evaluated, report.shown, report.hidden, report.skipped, report.deferred);

        report
    }

    /// Apply a settings change raised by `set_settings`.
    ///
    /// Switching culling off restores every object immediately, bypassing
    /// both the budget and the frame throttle. Any other change re-evaluates
    /// the whole set.
    fn apply_pending_settings(&mut self, report: &mut TickReport) {
        if !self.settings_dirty {
            return;
        }
        self.settings_dirty = false;

        if self.settings.enable_object_culling {
            self.tracker.mark_all_dirty();
        } else {
            report.restored = self.tracker.restore_all_visible();
            self.tracker.consume_dirty();
        }
    }

    /// Mark everything dirty when the viewer moved past the threshold.
    fn track_viewer(&mut self, viewer: &ViewerState) {
        let moved = match &self.reference_viewer {
            Some(previous) => viewer.differs_from(previous, self.settings.viewer_move_threshold),
            None => true,
        };

        if moved {
            if self.reference_viewer.is_some() {
                self.tracker.mark_all_dirty();
            }
            self.reference_viewer = Some(*viewer);
        }
    }

    /// Evaluate one dirty object and write the decision to its toggle.
    fn process(&mut self, key: TrackedObjectKey, viewer: &ViewerState, report: &mut TickReport) {
        let visible = match self.tracker.object(key) {
            Some(object) => self.evaluator.evaluate(object, viewer, &self.settings),
            None => {
                report.skipped += 1;
                return;
            }
        };

        match self.tracker.apply_decision(key, visible) {
            Some(ApplyOutcome::Changed) => {
                report.evaluated += 1;
                if visible {
                    report.shown += 1;
                } else {
                    report.hidden += 1;
                }
            }
            Some(ApplyOutcome::Unchanged) => report.evaluated += 1,
            Some(ApplyOutcome::TargetMissing) => {
                self.tracker.forget(key);
                report.skipped += 1;
            }
            None => report.skipped += 1,
        }
    }
}

impl Drop for CullingController {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
