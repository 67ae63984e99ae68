//! Culling module: settings, evaluation rule and the scheduling controller.

mod clock;
mod controller;
mod evaluator;
mod settings;

pub use clock::{Clock, SystemClock, StepClock};
pub use controller::{CullingController, ControllerState, TickReport};
pub use evaluator::{CullingEvaluator, DefaultEvaluator, screen_size_percent};
pub use settings::{CullingSettings, CullingProfile};
