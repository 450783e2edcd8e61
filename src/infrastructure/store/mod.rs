//! Local JSON persistence adapters

mod atomic;
mod json_state;
mod json_usage;

pub use json_state::JsonStateStore;
pub use json_usage::JsonUsageLog;
