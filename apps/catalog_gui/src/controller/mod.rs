//! Controller layer: load events, reducer state transitions, and fetch orchestration.

pub mod events;
pub mod orchestration;
pub mod reducer;
pub mod view_controller;

pub use reducer::LoadState;
pub use view_controller::{FailurePolicy, HandleOutcome, ViewController};
