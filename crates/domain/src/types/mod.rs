//! Domain data types
//!
//! Record shapes persisted by the storage layer and exchanged over the
//! messaging surface. Serde renames keep the serialized form compatible
//! with the records written by earlier versions of the tracker.

pub mod activity;
pub mod export;
pub mod limits;
pub mod settings;

pub use activity::{ActivityLog, DailyStats, SiteUsage};
pub use export::{ExportDocument, ImportDocument};
pub use limits::{BlockDecision, MatchType, SiteLimit, SiteLimitPatch};
pub use settings::{Theme, TrackerSettings};
