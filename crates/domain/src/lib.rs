//! # TabGuard Domain
//!
//! Business domain types and models for TabGuard.
//!
//! This crate contains:
//! - Domain data types (ActivityLog, DailyStats, SiteLimit, etc.)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants and formatting helpers
//!
//! ## Architecture
//! - No dependencies on other TabGuard crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::format::{badge_text, format_short_duration};
