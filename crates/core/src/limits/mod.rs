//! Site limit rules: validated CRUD and the enforcement decision

mod enforcer;
mod registry;

pub use enforcer::LimitEnforcer;
pub use registry::LimitRegistry;
