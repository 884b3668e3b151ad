//! # TabGuard Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The activity tracking state machine
//! - Limit registry and enforcement decisions
//! - URL pattern matching
//! - The messaging gateway and export/import services
//!
//! ## Architecture Principles
//! - Only depends on `tabguard-domain`
//! - No database or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod export;
pub mod limits;
pub mod messaging;
pub mod patterns;
pub mod ports;
pub mod tracking;

// Re-export specific items to avoid ambiguity
pub use export::TransferService;
pub use limits::{LimitEnforcer, LimitRegistry};
pub use messaging::{GatewayRequest, GatewayResponse, MessageGateway};
pub use ports::{Clock, LimitsRepository, SettingsProvider, StatsStore, TabCommands};
pub use tracking::{IdleSignal, TrackerService, TrackingPhase};
