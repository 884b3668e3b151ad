//! Small pure helpers shared across crates

pub mod format;
