//! Tick and maintenance scheduling
//!
//! Join handles are tracked, cancellation is explicit, and every job
//! execution is wrapped in a timeout.

mod error;
mod jobs;
mod maintenance;
mod tick;

pub use error::{SchedulerError, SchedulerResult};
pub use jobs::{CleanupJob, DailyResetJob, ScheduledJob, TickJob};
pub use maintenance::{MaintenanceScheduler, MaintenanceSchedulerConfig};
pub use tick::TickDriver;
