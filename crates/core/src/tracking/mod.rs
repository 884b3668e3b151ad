//! Activity tracking state machine
//!
//! Owns "what is currently active", drives time accrual across
//! focus/idle/navigation transitions, and flushes accrued time into the
//! stats store.

mod service;
mod state;

pub use service::TrackerService;
pub use state::{IdleSignal, TrackingPhase, TrackingState};
